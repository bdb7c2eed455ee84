//! Syntax checker for a small Prolog-style clause notation: facts and rules
//! followed by a mandatory `?-` query. Reports every syntax error it can find
//! per file, resynchronizing at clause terminators.

extern crate pest;
#[macro_use]
extern crate pest_derive;

pub mod ast;
pub mod driver;
pub mod error;
pub mod parser;
pub mod recovery;
pub mod report;

pub use error::{DriverError, PositionedError};
pub use parser::{parse, recognize, Rule};
pub use recovery::{check, Diagnostic, FileReport};
pub use report::{process_file, BANNER};
