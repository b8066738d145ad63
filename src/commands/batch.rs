//! Batch sanitization.
//!
//! Reads one value per line from a file or stdin and sanitizes each with the
//! same sanitizer. Blank lines are skipped. A summary goes to stderr after
//! the last value.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use super::{Kind, Options, apply, print_outcome};

/// Counts reported after a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub accepted: usize,
    pub rejected: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.accepted + self.rejected
    }
}

/// Sanitize every non-blank line of `reader`.
///
/// # Errors
///
/// Returns an error if a line cannot be read or output cannot be written.
pub fn run<R: BufRead>(reader: R, kind: Kind, options: Options, json: bool) -> Result<Summary> {
    let mut summary = Summary::default();

    for (number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", number + 1))?;
        let value = line.trim_end_matches('\r');
        if value.trim().is_empty() {
            continue;
        }

        let outcome = apply(kind, value, options);
        if outcome.is_ok() {
            summary.accepted += 1;
        } else {
            summary.rejected += 1;
            debug!(line = number + 1, "Batch value rejected");
        }
        print_outcome(&outcome, json)?;
    }

    Ok(summary)
}

/// Execute the batch command.
///
/// Returns `true` when every value was accepted.
///
/// # Errors
///
/// Returns an error if the input file cannot be opened or read.
pub fn execute(kind: Kind, input: Option<&Path>, options: Options, json: bool) -> Result<bool> {
    let summary = match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            run(BufReader::new(file), kind, options, json)?
        },
        None => run(io::stdin().lock(), kind, options, json)?,
    };

    if !json {
        eprintln!(
            "{} values: {} accepted, {} rejected",
            summary.total(),
            summary.accepted,
            summary.rejected
        );
    }
    Ok(summary.rejected == 0)
}
