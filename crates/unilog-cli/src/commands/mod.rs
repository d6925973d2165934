//! CLI command implementations

pub mod compare;
pub mod concat;
pub mod generate;
pub mod info;
pub mod resize;

use anyhow::Result;
use std::fmt;
use unilog_core::{BatchOutcome, BatchReport, Settings};

/// Shared state for every command.
pub struct Context {
    /// Settings after CLI overrides.
    pub settings: Settings,
    /// `-v` count.
    pub verbose: u8,
}

/// A batch finished with at least one failed item.
#[derive(Debug)]
pub struct BatchFailed {
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for BatchFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} items failed", self.failed, self.total)
    }
}

impl std::error::Error for BatchFailed {}

/// Prints one line per item and a summary; fails if any item did not
/// complete.
pub fn print_batch<T>(report: &BatchReport<T>, describe: impl Fn(&T) -> String) -> Result<()> {
    for item in &report.items {
        match &item.outcome {
            BatchOutcome::Done(v) => println!("  ok       {}  {}", item.label, describe(v)),
            BatchOutcome::Failed { message, kind } => {
                println!("  FAILED   {}  {} [{}]", item.label, message, kind)
            }
            BatchOutcome::Cancelled => println!("  skipped  {}", item.label),
        }
    }
    println!(
        "Processed: {} success, {} failed, {} skipped",
        report.succeeded(),
        report.failed(),
        report.cancelled()
    );

    if report.is_success() {
        Ok(())
    } else {
        Err(BatchFailed {
            failed: report.failed() + report.cancelled(),
            total: report.items.len(),
        }
        .into())
    }
}
