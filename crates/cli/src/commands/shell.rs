//! Interactive shell: one session across many commands.
//!
//! Each line is parsed exactly like a `shop` invocation without the program
//! name. `exit` or end of input leaves the shell.

use std::io::{BufRead, Write};

use clap::Parser;
use shopfront_storefront::Session;

use super::{CliError, print_notifications};
use crate::{Cli, Commands};

const PROMPT: &str = "shop> ";

/// Split a shell line into words. Double quotes group words.
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for ch in line.chars() {
        match ch {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Read and run commands until `exit` or end of input.
#[allow(clippy::print_stdout, clippy::print_stderr)]
pub async fn run(session: &mut Session) -> Result<(), CliError> {
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("{PROMPT}");
        std::io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }

        let words = split_words(&line);
        match words.first().map(String::as_str) {
            None => continue,
            Some("exit" | "quit") => return Ok(()),
            Some(_) => {}
        }

        let cli = match Cli::try_parse_from(std::iter::once("shop".to_string()).chain(words)) {
            Ok(cli) => cli,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        if matches!(cli.command, Commands::Shell) {
            eprintln!("Already in the shell");
            continue;
        }

        if let Err(e) = crate::execute(cli.command, session).await {
            eprintln!("{e}");
        }
        print_notifications(session);
    }
}
