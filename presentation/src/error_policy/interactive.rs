//! Interactive error policy for failing parcels.
//!
//! When a parcel cannot be fetched or classified, the user is asked how to
//! go on:
//!
//! ```text
//! ! 020301_1.0001.7 could not be drawn
//!   Identifier 020301_1.0001.7 does not exist: brak wyników
//!
//!   [c]ontinue  [a]ll (skip every later failure)  [s]top (discard drawing)
//! parcel>
//! ```
//!
//! | Command | Aliases | Decision |
//! |---------|---------|----------|
//! | `continue` | `c`, empty line | [`ErrorDecision::Continue`] |
//! | `all` | `a`, `continue_all` | [`ErrorDecision::ContinueAll`] |
//! | `stop` | `s`, `q` | [`ErrorDecision::Stop`] |

use crate::progress::reporter::ProgressReporter;
use async_trait::async_trait;
use colored::Colorize;
use parcel_application::{ErrorPolicyError, ErrorPolicyPort};
use parcel_domain::{ErrorDecision, ParcelId};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Map a typed answer to a decision; `None` for anything unrecognised.
pub fn parse_decision(input: &str) -> Option<ErrorDecision> {
    match input.trim().to_lowercase().as_str() {
        "" | "c" | "continue" => Some(ErrorDecision::Continue),
        "a" | "all" | "continue_all" | "continue-all" => Some(ErrorDecision::ContinueAll),
        "s" | "q" | "stop" | "quit" => Some(ErrorDecision::Stop),
        _ => None,
    }
}

/// Terminal prompt implementing [`ErrorPolicyPort`].
///
/// Hides the progress bar (if one is attached) while waiting for input.
pub struct InteractiveErrorPolicy {
    reporter: Option<Arc<ProgressReporter>>,
}

impl InteractiveErrorPolicy {
    pub fn new() -> Self {
        Self { reporter: None }
    }

    pub fn with_reporter(mut self, reporter: Arc<ProgressReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    fn display_prompt(id: &ParcelId, message: &str) {
        println!();
        println!(
            "{} {} could not be drawn",
            "!".yellow().bold(),
            id.to_string().bold()
        );
        println!("  {}", message.dimmed());
        println!();
        println!(
            "  {}ontinue  {}ll (skip every later failure)  {}top (discard drawing)",
            "[c]".green(),
            "[a]".cyan(),
            "[s]".red()
        );
    }

    fn read_decision<R: BufRead>(input: &mut R) -> Result<ErrorDecision, ErrorPolicyError> {
        loop {
            print!("{} ", "parcel>".magenta().bold());
            io::stdout()
                .flush()
                .map_err(|e| ErrorPolicyError::Io(format!("Failed to flush stdout: {e}")))?;

            let mut line = String::new();
            let read = input
                .read_line(&mut line)
                .map_err(|e| ErrorPolicyError::Io(format!("Failed to read input: {e}")))?;
            if read == 0 {
                return Err(ErrorPolicyError::Cancelled);
            }

            match parse_decision(&line) {
                Some(decision) => return Ok(decision),
                None => println!(
                    "{} Unknown answer: {} (use c, a or s)",
                    "!".yellow(),
                    line.trim().red()
                ),
            }
        }
    }

    fn ask(id: &ParcelId, message: &str) -> Result<ErrorDecision, ErrorPolicyError> {
        Self::display_prompt(id, message);
        let stdin = io::stdin();
        let mut lock = stdin.lock();
        Self::read_decision(&mut lock)
    }
}

impl Default for InteractiveErrorPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ErrorPolicyPort for InteractiveErrorPolicy {
    async fn decide(
        &self,
        id: &ParcelId,
        message: &str,
    ) -> Result<ErrorDecision, ErrorPolicyError> {
        match &self.reporter {
            Some(reporter) => reporter.suspend(|| Self::ask(id, message)),
            None => Self::ask(id, message),
        }
    }
}
