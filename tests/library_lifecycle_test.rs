use std::rc::Rc;

use chrono::NaiveDate;
use library_manager::{
    IssueError, Library, LibraryState, ManualClock, ReturnError, Store,
};
use tempfile::TempDir;

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

fn open(dir: &TempDir, clock: &Rc<ManualClock>) -> Library {
    let store = Store::new(dir.path().join("library.sqlite"));
    Library::open_with_clock(store, Box::new(Rc::clone(clock)))
}

#[test]
fn test_return_on_due_date_has_no_fine() {
    let dir = TempDir::new().unwrap();
    let clock = Rc::new(ManualClock::new(start_date()));
    let mut library = open(&dir, &clock);

    library.add_book(1, "T", "A").unwrap();
    library.add_member(9, "M").unwrap();
    library.issue_book(1, 9).unwrap();
    assert!(library.find_book(1).unwrap().issued);

    clock.advance(14);
    let outcome = library.return_book(1).unwrap();

    assert_eq!(outcome.fine, None);
    assert!(!library.find_book(1).unwrap().issued);
    assert!(library.active_loans().is_empty());
}

#[test]
fn test_return_twenty_days_after_issue_charges_six() {
    let dir = TempDir::new().unwrap();
    let clock = Rc::new(ManualClock::new(start_date()));
    let mut library = open(&dir, &clock);

    library.add_book(1, "T", "A").unwrap();
    library.add_member(9, "M").unwrap();
    library.issue_book(1, 9).unwrap();

    clock.advance(20);
    let outcome = library.return_book(1).unwrap();

    assert_eq!(outcome.fine, Some(6));
    assert!(!library.find_book(1).unwrap().issued);
}

#[test]
fn test_errors_leave_state_unchanged() {
    let dir = TempDir::new().unwrap();
    let clock = Rc::new(ManualClock::new(start_date()));
    let mut library = open(&dir, &clock);

    library.add_book(1, "T", "A").unwrap();
    library.add_member(9, "M").unwrap();
    let before = library.state().clone();

    assert_eq!(library.issue_book(2, 9), Err(IssueError::BookNotFound(2)));
    assert_eq!(library.issue_book(1, 8), Err(IssueError::MemberNotFound(8)));
    assert_eq!(library.return_book(1), Err(ReturnError::NotIssued(1)));
    assert!(library.add_book(1, "X", "Y").is_err());
    assert!(library.add_member(9, "Z").is_err());

    assert_eq!(library.state(), &before);
}

#[test]
fn test_state_survives_save_and_reopen() {
    let dir = TempDir::new().unwrap();
    let clock = Rc::new(ManualClock::new(start_date()));

    let mut library = open(&dir, &clock);
    library.add_book(5, "Middlemarch", "Eliot").unwrap();
    library.add_book(2, "Persuasion", "Austen").unwrap();
    library.add_book(8, "Vanity Fair", "Thackeray").unwrap();
    library.add_member(1, "Ada").unwrap();
    library.add_member(3, "Grace").unwrap();
    library.issue_book(8, 3).unwrap();
    clock.advance(2);
    library.issue_book(5, 1).unwrap();
    library.save().unwrap();
    let saved = library.state().clone();
    drop(library);

    let reopened = open(&dir, &clock);
    assert_eq!(reopened.state(), &saved);
    let order: Vec<_> = reopened.books().iter().map(|b| b.id).collect();
    assert_eq!(order, vec![5, 2, 8]);
    assert_eq!(reopened.active_loans()[0].book_id, 8);
    assert_eq!(
        reopened.active_loans()[1].due_date,
        NaiveDate::from_ymd_opt(2024, 6, 19).unwrap()
    );
}

#[test]
fn test_overdue_loans_after_reopen() {
    let dir = TempDir::new().unwrap();
    let clock = Rc::new(ManualClock::new(start_date()));

    let mut library = open(&dir, &clock);
    library.add_book(1, "A", "a").unwrap();
    library.add_book(2, "B", "b").unwrap();
    library.add_member(9, "M").unwrap();
    library.issue_book(1, 9).unwrap();
    clock.advance(5);
    library.issue_book(2, 9).unwrap();
    library.save().unwrap();

    clock.set(NaiveDate::from_ymd_opt(2024, 6, 18).unwrap());
    let reopened = open(&dir, &clock);
    let overdue: Vec<_> = reopened.overdue_loans().iter().map(|l| l.book_id).collect();
    assert_eq!(overdue, vec![1]);
}

#[test]
fn test_open_reads_from_the_given_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("library.sqlite");
    let clock = Rc::new(ManualClock::new(start_date()));

    let mut library = open(&dir, &clock);
    library.add_book(3, "Kindred", "Butler").unwrap();
    library.save().unwrap();

    let reopened = Library::open(Store::new(&path));
    assert_eq!(reopened.store().path(), path.as_path());
    assert_eq!(reopened.find_book(3).unwrap().title, "Kindred");
}

#[test]
fn test_corrupt_file_starts_empty_and_is_replaced_on_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("library.sqlite");
    std::fs::write(&path, vec![0xAB_u8; 4096]).unwrap();
    let clock = Rc::new(ManualClock::new(start_date()));

    let mut library = open(&dir, &clock);
    assert_eq!(library.state(), &LibraryState::new());

    library.add_member(4, "Lin").unwrap();
    library.save().unwrap();
    assert_eq!(Store::new(&path).load().members().len(), 1);
}
