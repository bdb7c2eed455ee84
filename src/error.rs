use std::fmt;
use std::io;
use std::path::PathBuf;

use pest::error::{Error, InputLocation, LineColLocation};

use crate::parser::{describe_rule, Rule};

/**
 * A failed recognition attempt: where the mismatch was detected and pest's
 * description of the offending token and of what would have been accepted.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedError {
    inner: Box<Error<Rule>>,
}

impl PositionedError {
    pub(crate) fn new(inner: Error<Rule>) -> Self {
        PositionedError { inner: Box::new(inner) }
    }

    /// Byte offset into the text handed to the recognizer.
    pub fn offset(&self) -> usize {
        match self.inner.location {
            InputLocation::Pos(pos) => pos,
            InputLocation::Span((start, _)) => start,
        }
    }

    /// 1-based (line, column) relative to the text handed to the recognizer.
    pub fn line_col(&self) -> (usize, usize) {
        match self.inner.line_col {
            LineColLocation::Pos(line_col) => line_col,
            LineColLocation::Span(start, _) => start,
        }
    }

    /// The pest error with rule names rendered as the tokens they match.
    pub fn message(&self) -> String {
        (*self.inner).clone().renamed_rules(describe_rule).to_string()
    }

    /**
     * `message` with its line reference (the `--> line:col` header and the
     * line number in the gutter) replaced by `line`. Only the number
     * changes; the gutter is re-padded to its width.
     */
    pub fn message_at_line(&self, line: usize) -> String {
        let message = self.message();
        let (attempt_line, _) = self.line_col();

        let old_number = attempt_line.to_string();
        let old_gutter = " ".repeat(old_number.len());
        let new_number = line.to_string();
        let new_gutter = " ".repeat(new_number.len());

        let header = format!("{}--> {}:", old_gutter, old_number);
        let numbered = format!("{} |", old_number);

        message
            .lines()
            .map(|text| {
                if let Some(rest) = text.strip_prefix(&header) {
                    format!("{}--> {}:{}", new_gutter, new_number, rest)
                } else if let Some(rest) = text.strip_prefix(&numbered) {
                    format!("{} |{}", new_number, rest)
                } else {
                    match text.strip_prefix(&old_gutter) {
                        Some(rest) if rest.starts_with(" |") || rest.starts_with(" =") => {
                            format!("{}{}", new_gutter, rest)
                        }
                        _ => text.to_string(),
                    }
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for PositionedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for PositionedError {}

/// I/O failures of the per-directory driver.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
