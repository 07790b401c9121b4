//! Command-line surface of the `library-manager` binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::models::{BookId, MemberId};

#[derive(Debug, Parser)]
#[command(name = "library-manager")]
#[command(about = "Track a small library's books, members and loans")]
pub struct CliConfig {
    /// Path of the library data file (defaults to ~/.library-manager/library.sqlite)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today instead of the system date
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add a book to the catalog
    AddBook {
        id: BookId,
        title: String,
        author: String,
    },
    /// Show one book by id
    FindBook { id: BookId },
    /// List every book
    Books,
    /// Register a member
    AddMember { id: MemberId, name: String },
    /// Show one member by id
    FindMember { id: MemberId },
    /// List every member
    Members,
    /// Lend a book to a member for 14 days
    Issue { book_id: BookId, member_id: MemberId },
    /// Take a book back and report any fine
    Return { book_id: BookId },
    /// List active loans
    Loans,
    /// List loans past their due date
    Overdue,
    /// Read commands from stdin, one per line, saving once at the end
    Shell,
}

/// One line typed into the interactive shell.
#[derive(Debug, Parser)]
#[command(name = "library-manager", no_binary_name = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Command,
}

/// A shell line opened a double quote and never closed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unclosed quote in command.")]
pub struct UnclosedQuote;

/// Split a shell line into words. Double quotes group words containing
/// spaces, so `add-book 4 "War and Peace" Tolstoy` yields four words. A quote
/// left open at the end of the line is rejected rather than guessed at.
pub fn split_line(line: &str) -> Result<Vec<String>, UnclosedQuote> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut pending = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                pending = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if pending {
                    words.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }
    if in_quotes {
        return Err(UnclosedQuote);
    }
    if pending {
        words.push(current);
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_words_stay_together() {
        assert_eq!(
            split_line(r#"add-book 4 "War and Peace"  Tolstoy"#).unwrap(),
            vec!["add-book", "4", "War and Peace", "Tolstoy"]
        );
        assert_eq!(
            split_line(r#"add-member 2 """#).unwrap(),
            vec!["add-member", "2", ""]
        );
        assert!(split_line("   ").unwrap().is_empty());
    }

    #[test]
    fn unclosed_quote_is_rejected() {
        assert_eq!(split_line(r#"add-book 1 "abc"#), Err(UnclosedQuote));
        assert_eq!(split_line(r#"add-book 1 "a" "b"#), Err(UnclosedQuote));
    }

    #[test]
    fn parses_global_options_and_subcommand() {
        let config = CliConfig::try_parse_from([
            "library-manager",
            "issue",
            "1",
            "9",
            "--today",
            "2024-03-01",
            "--data-file",
            "lib.sqlite",
        ])
        .unwrap();

        assert_eq!(config.command, Command::Issue { book_id: 1, member_id: 9 });
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(config.data_file, Some(PathBuf::from("lib.sqlite")));
    }

    #[test]
    fn shell_line_needs_no_binary_name() {
        let line = ShellLine::try_parse_from(split_line(r#"add-member 9 "Mira K""#).unwrap()).unwrap();
        assert_eq!(
            line.command,
            Command::AddMember {
                id: 9,
                name: "Mira K".to_string()
            }
        );
    }
}
