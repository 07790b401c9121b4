//! Runs parsed commands against a [`Library`] and renders the replies as
//! plain text lines.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use crate::config::{split_line, Command, ShellLine};
use crate::library::Library;

/// Run one command. Operation failures come back as errors whose message is
/// ready to show the user.
pub fn execute(library: &mut Library, command: Command) -> Result<String> {
    debug!(?command, "executing command");

    let reply = match command {
        Command::AddBook { id, title, author } => {
            library.add_book(id, &title, &author)?;
            "Book added successfully!".to_string()
        }
        Command::FindBook { id } => match library.find_book(id) {
            Some(book) => book.to_string(),
            None => anyhow::bail!("Book not found."),
        },
        Command::Books => render_lines(library.books(), "No books in the catalog."),
        Command::AddMember { id, name } => {
            library.add_member(id, &name)?;
            "Member added successfully!".to_string()
        }
        Command::FindMember { id } => match library.find_member(id) {
            Some(member) => member.to_string(),
            None => anyhow::bail!("Member not found."),
        },
        Command::Members => render_lines(library.members(), "No registered members."),
        Command::Issue { book_id, member_id } => {
            let loan = library.issue_book(book_id, member_id)?;
            format!("Book issued successfully. Due on {}.", loan.due_date)
        }
        Command::Return { book_id } => library.return_book(book_id)?.to_string(),
        Command::Loans => render_lines(library.active_loans(), "No active loans."),
        Command::Overdue => render_lines(library.overdue_loans(), "No overdue books."),
        Command::Shell => anyhow::bail!("Already in a shell session."),
    };

    Ok(reply)
}

/// Read commands line by line until end of input or `quit`. Errors from a
/// single line are printed and the session carries on.
pub fn run_shell<R: BufRead, W: Write>(library: &mut Library, input: R, mut output: W) -> Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read command")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        let reply = match split_line(line) {
            Err(err) => format!("Error: {err}"),
            Ok(words) => match ShellLine::try_parse_from(words) {
                Ok(parsed) => match execute(library, parsed.command) {
                    Ok(text) => text,
                    Err(err) => format!("Error: {err}"),
                },
                Err(err) => err.to_string().trim_end().to_string(),
            },
        };
        writeln!(output, "{reply}").context("failed to write reply")?;
    }

    Ok(())
}

fn render_lines<T: ToString>(items: impl IntoIterator<Item = T>, empty: &str) -> String {
    let lines: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    if lines.is_empty() {
        empty.to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use chrono::NaiveDate;

    use super::*;
    use crate::clock::ManualClock;
    use crate::db::Store;
    use crate::models::LibraryState;

    fn library(clock: Rc<ManualClock>) -> Library {
        Library::from_parts(
            LibraryState::new(),
            Store::new("unused.sqlite"),
            Box::new(clock),
        )
    }

    #[test]
    fn shell_session_runs_each_line() {
        let clock = Rc::new(ManualClock::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        let mut library = library(Rc::clone(&clock));
        let script = r#"
            # set up
            add-book 1 "Brave New World" Huxley
            add-book 1 Again Someone
            add-member 9 Mira
            issue 1 9
            issue 1 9
            return 2
            quit
            books
        "#;

        let mut out = Vec::new();
        run_shell(&mut library, script.as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Book added successfully!",
                "Error: Book with ID 1 already exists.",
                "Member added successfully!",
                "Book issued successfully. Due on 2024-03-15.",
                "Error: Book is already issued.",
                "Error: Book not found.",
            ]
        );
        assert!(library.find_book(1).unwrap().issued);
    }

    #[test]
    fn late_return_reply_mentions_fine() {
        let clock = Rc::new(ManualClock::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        let mut library = library(Rc::clone(&clock));
        library.add_book(1, "T", "A").unwrap();
        library.add_member(9, "M").unwrap();
        library.issue_book(1, 9).unwrap();
        clock.advance(17);

        let overdue = execute(&mut library, Command::Overdue).unwrap();
        assert!(overdue.starts_with("Book ID: 1"));

        let reply = execute(&mut library, Command::Return { book_id: 1 }).unwrap();
        assert_eq!(
            reply,
            "Book is overdue by 3 days. Fine to be paid: ₹3\nBook returned successfully."
        );
        assert_eq!(
            execute(&mut library, Command::Loans).unwrap(),
            "No active loans."
        );
    }

    #[test]
    fn unclosed_quote_in_shell_adds_nothing() {
        let clock = Rc::new(ManualClock::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        let mut library = library(clock);
        let mut out = Vec::new();
        run_shell(&mut library, "add-book 1 \"abc\nbooks\n".as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            vec!["Error: Unclosed quote in command.", "No books in the catalog."]
        );
        assert!(library.find_book(1).is_none());
    }

    #[test]
    fn unknown_shell_command_is_reported() {
        let clock = Rc::new(ManualClock::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        let mut library = library(clock);
        let mut out = Vec::new();
        run_shell(&mut library, "lend 1 2\n".as_bytes(), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("unrecognized subcommand"));
    }
}
