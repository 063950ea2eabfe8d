//! Error types for free-text field parsing with error codes and helpful messages.
//!
//! This is the caller-side error surface: it covers the text fields a front
//! end hands us (comma-separated digit lists, the `digit:count` mapping
//! syntax) and is reported *before* the search engine is ever invoked. It is
//! deliberately distinct from
//! [`InvalidConstraint`](crate::constraints::InvalidConstraint), which covers
//! the engine's own structural validation.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (E001-E005) for documentation lookup:
//!
//! - E001: `ParseIntError` (Integer parsing error)
//! - E002: `DigitOutOfRange` (Digit outside 1-9 in a digit-counts entry)
//! - E003: `SubUnitOccurrence` (Occurrence below 1 in a digit-counts entry)
//! - E004: `InvalidDigitCountsEntry` (Malformed digit-counts entry)
//! - E005: `NomError` (Low-level nom parser error)
//!
//! # Examples
//!
//! ```
//! use cagesum::errors::ParseError;
//! use cagesum::parser::parse_digit_counts;
//!
//! match parse_digit_counts("1:0") {
//!     Err(e) => {
//!         println!("Error: {e}");
//!         println!("Code: {}", e.code());
//!         if let Some(help) = e.help() {
//!             println!("Help: {help}");
//!         }
//!     }
//!     Ok(_) => println!("Success"),
//! }
//! ```

use nom::error::{ErrorKind, FromExternalError, ParseError as NomParseError};
use std::io;
use std::num::ParseIntError;

/// Custom error type for field-parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("int-parsing error: {0}")]
    ParseIntError(#[from] ParseIntError),

    #[error("digit {digit} in digit-counts entry must be between 1 and 9")]
    DigitOutOfRange { digit: i32 },

    #[error("occurrence {count} for digit {digit} must be at least 1")]
    SubUnitOccurrence { digit: i32, count: i32 },

    #[error("invalid digit-counts entry: \"{entry}\"")]
    InvalidDigitCountsEntry { entry: String },

    // nom parser error (lowest level)
    #[error("nom parser error: {0:?}")]
    NomError(ErrorKind),
}

impl From<ParseError> for io::Error {
    fn from(pe: ParseError) -> Self {
        // String version is the least fragile (no Send/Sync bounds issues)
        io::Error::new(io::ErrorKind::InvalidInput, pe.to_string())
    }
}

impl From<ParseIntError> for Box<ParseError> {
    fn from(pie: ParseIntError) -> Self {
        Box::new(ParseError::ParseIntError(pie))
    }
}

impl<'a> NomParseError<&'a str> for Box<ParseError> {
    fn from_error_kind(_input: &'a str, kind: ErrorKind) -> Self {
        Box::new(ParseError::NomError(kind))
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        // usually just return the existing error unchanged
        other
    }
}

impl<'a> FromExternalError<&'a str, ParseIntError> for Box<ParseError> {
    fn from_external_error(_input: &'a str, _kind: ErrorKind, e: ParseIntError) -> Self {
        Box::new(ParseError::ParseIntError(e))
    }
}

impl ParseError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::ParseIntError(_) => "E001",
            ParseError::DigitOutOfRange { .. } => "E002",
            ParseError::SubUnitOccurrence { .. } => "E003",
            ParseError::InvalidDigitCountsEntry { .. } => "E004",
            ParseError::NomError(_) => "E005",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ParseError::ParseIntError(_) => {
                Some("Fields take whole numbers separated by commas (e.g., '1,2,3')")
            }
            ParseError::DigitOutOfRange { .. } => {
                Some("Digit-count entries apply to the digits 1 through 9")
            }
            ParseError::SubUnitOccurrence { .. } => {
                Some("An occurrence count of 0 means the digit never appears; omit the entry or use ignored digits instead")
            }
            ParseError::InvalidDigitCountsEntry { .. } => {
                Some("Expected format: digit:count or digit:min-max, comma-separated (e.g., '1:3,2:2' or '1:2-5,2:3')")
            }
            ParseError::NomError(_) => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
