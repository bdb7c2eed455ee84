//! Multi-error recovery: recognize, and after each failure skip to the next
//! clause terminator and try again on what is left.

use crate::parser::recognize;

/// One reported syntax error.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// 1-based, in discovery order.
    pub index: usize,
    /// Running line count: the sum of the attempt-local lines of this and
    /// every earlier error in the file.
    pub line: usize,
    /// 1-based, within the failed attempt's text.
    pub column: usize,
    /// Byte offset into the whole file.
    pub offset: usize,
    /// pest's description, its line reference replaced by `line`.
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub file_index: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub valid: bool,
}

impl FileReport {
    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    /// `offset` is where the last attempt failed, relative to the remainder.
    Resynchronizing { offset: usize },
    Done,
}

struct RecoveryEngine<'a> {
    text: &'a str,
    // Bytes of `text` already skipped by resynchronization.
    consumed: usize,
    // Running sum of the 1-based line of every failure, each counted
    // from the start of its own attempt.
    line_count: usize,
    diagnostics: Vec<Diagnostic>,
}

/**
 * Checks `text` and collects every syntax error that can be found in one
 * pass. Always terminates: each resynchronization consumes at least one `.`.
 */
pub fn check(text: &str, file_index: usize) -> FileReport {
    let mut engine = RecoveryEngine::new(text);
    let mut state = State::Scanning;

    loop {
        state = match state {
            State::Scanning => engine.scan(),
            State::Resynchronizing { offset } => engine.resynchronize(offset),
            State::Done => break,
        };
    }

    let report = engine.finish(file_index);
    log::debug!(
        "file {}: {} syntax error(s)",
        report.file_index,
        report.error_count()
    );
    report
}

impl<'a> RecoveryEngine<'a> {
    fn new(text: &'a str) -> Self {
        RecoveryEngine {
            text,
            consumed: 0,
            line_count: 0,
            diagnostics: Vec::new(),
        }
    }

    fn remaining(&self) -> &'a str {
        &self.text[self.consumed..]
    }

    fn scan(&mut self) -> State {
        let error = match recognize(self.remaining()) {
            Ok(()) => return State::Done,
            Err(error) => error,
        };

        let offset = error.offset();
        let (attempt_line, column) = error.line_col();
        self.line_count += attempt_line;

        let diagnostic = Diagnostic {
            index: self.diagnostics.len() + 1,
            line: self.line_count,
            column,
            offset: self.consumed + offset,
            message: error.message_at_line(self.line_count),
        };
        log::trace!(
            "error {} at line {}, column {} (byte {})",
            diagnostic.index,
            diagnostic.line,
            diagnostic.column,
            diagnostic.offset
        );
        self.diagnostics.push(diagnostic);

        State::Resynchronizing { offset }
    }

    fn resynchronize(&mut self, offset: usize) -> State {
        let remaining = self.remaining();

        let Some(found) = remaining.get(offset..).and_then(|tail| tail.find('.')) else {
            log::debug!(
                "no clause terminator after byte {}, giving up on the rest",
                self.consumed + offset
            );
            return State::Done;
        };

        // A run of terminators counts as one boundary.
        let mut cursor = offset + found;
        cursor += remaining[cursor..].bytes().take_while(|&b| b == b'.').count();

        self.consumed += cursor;
        log::trace!("resuming at byte {}", self.consumed);

        if self.remaining().trim().is_empty() {
            State::Done
        } else {
            State::Scanning
        }
    }

    fn finish(self, file_index: usize) -> FileReport {
        FileReport {
            file_index,
            valid: self.diagnostics.is_empty(),
            diagnostics: self.diagnostics,
        }
    }
}
