use std::fmt;

use crate::recovery::{check, FileReport};

/// First line of the aggregate report.
pub const BANNER: &str = "CMP321 Parser Project\n";

/**
 * Checks one file's text and renders its block of the aggregate report.
 * Syntax errors are part of the returned text; this never fails.
 */
pub fn process_file(raw_text: &str, file_index: usize) -> String {
    check(raw_text, file_index).to_string()
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n-----File {}:\n", self.file_index)?;

        if self.valid {
            return f.write_str("Syntax is Correct\n\n");
        }

        for diagnostic in &self.diagnostics {
            write!(f, "\nError {} - {}\n", diagnostic.index, diagnostic.message)?;
        }

        let count = self.error_count();
        write!(
            f,
            "Total Errors in File {}: {} error{}\n\n",
            self.file_index,
            count,
            plural(count)
        )
    }
}
