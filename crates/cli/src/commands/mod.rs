//! Command implementations.
//!
//! Session operations report their own failures as notifications; the
//! commands here only fail on bad input or local I/O.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod shell;

use shopfront_storefront::{Level, Session, StoreError};
use thiserror::Error;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The HTTP client could not be built.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Reading from the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An argument could not be used.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Print and clear every pending notification.
#[allow(clippy::print_stdout, clippy::print_stderr)]
pub fn print_notifications(session: &mut Session) {
    for note in session.drain_notifications() {
        match note.level {
            Level::Error => eprintln!("{note}"),
            Level::Success | Level::Info => println!("{note}"),
        }
    }
}
