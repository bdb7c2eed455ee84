//! Directory plumbing: reads `1.txt`, `2.txt`, ... until the first gap and
//! writes the aggregate report in one go.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::DriverError;
use crate::report::{process_file, BANNER};

/// The aggregate report and how many files went into it.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output: String,
    pub files: usize,
}

pub fn input_path(dir: &Path, file_index: usize) -> PathBuf {
    dir.join(format!("{}.txt", file_index))
}

/**
 * Checks every numbered file in `dir`, in order, starting from `1.txt`.
 * A missing file ends the run; any other read failure aborts it.
 */
pub fn check_directory(dir: &Path) -> Result<RunSummary, DriverError> {
    let mut summary = RunSummary {
        output: String::from(BANNER),
        files: 0,
    };

    for file_index in 1.. {
        let path = input_path(dir, file_index);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} not found, stopping", path.display());
                break;
            }
            Err(source) => return Err(DriverError::Read { path, source }),
        };

        log::info!("checking {}", path.display());
        summary.output.push_str(&process_file(&text, file_index));
        summary.files += 1;
    }

    Ok(summary)
}

/**
 * Writes `contents` to `path` through a temporary file in the same
 * directory, so an earlier report is never left half overwritten.
 */
pub fn write_report(path: &Path, contents: &str) -> Result<(), DriverError> {
    let write_error = |source: io::Error| DriverError::Write { path: path.to_path_buf(), source };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(contents.as_bytes()).map_err(write_error)?;
    file.persist(path).map_err(|e| write_error(e.error))?;

    log::info!("wrote {}", path.display());
    Ok(())
}
