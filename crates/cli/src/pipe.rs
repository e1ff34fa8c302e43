//! Pipe mode for processing stdin line by line.
//!
//! Each non-empty line is resolved on its own. All lines share the phrase
//! table taken when pipe mode starts, so "today" means the same day for the
//! whole stream.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use datespan_core::DateParser;

use crate::pretty::{self, JsonRecord};

/// Configuration for pipe mode.
pub struct PipeModeConfig {
    /// Emit one JSON object per line instead of human-readable output
    pub json: bool,
    /// Print only the normalized form of each line
    pub normalize_only: bool,
}

/// Counts reported when pipe mode finishes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipeSummary {
    pub resolved: usize,
    pub failed: usize,
}

/// Run pipe mode over stdin.
pub fn run_pipe_mode(parser: &DateParser, config: &PipeModeConfig) -> io::Result<PipeSummary> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let handle = stdin.lock();
    let mut out = stdout.lock();

    process_lines(parser, handle, &mut out, config)
}

/// Resolve every line of `input`, writing one result line per input line.
pub fn process_lines(
    parser: &DateParser,
    input: impl BufRead,
    out: &mut impl Write,
    config: &PipeModeConfig,
) -> io::Result<PipeSummary> {
    let mut summary = PipeSummary::default();

    for line_result in input.lines() {
        let line = line_result?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if config.normalize_only {
            writeln!(out, "{}", parser.normalize(line))?;
            continue;
        }

        let outcome = parser.resolve_cached(line);
        match &outcome {
            Ok(_) => summary.resolved += 1,
            Err(e) => {
                summary.failed += 1;
                tracing::debug!(line, error = %e, "Line did not resolve");
            }
        }

        if config.json {
            let record = JsonRecord::new(line, parser.normalize(line), &outcome);
            writeln!(out, "{}", serde_json::to_string(&record)?)?;
        } else {
            match &outcome {
                Ok(resolved) => writeln!(out, "{}\t{}", line, pretty::format_inline(resolved))?,
                Err(_) => writeln!(out, "{}\t{}", line, "unparseable".red())?,
            }
        }
    }

    Ok(summary)
}
