use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during parsing
///
/// Only structural failures are errors. Malformed lines, unknown tags and
/// dangling references are skipped and counted instead.
#[derive(Error, Debug)]
pub enum ParserError {
    /// Failed to read file
    #[error("IO error reading {0}: {1}")]
    IoError(PathBuf, #[source] std::io::Error),

    /// Input is not decodable as text
    #[error("Cannot decode {0} as text: {1}")]
    Encoding(PathBuf, String),

    /// File too large
    #[error("File {0} exceeds maximum size ({1} bytes)")]
    FileTooLarge(PathBuf, usize),

    /// Not a single line of the input looks like GEDCOM
    #[error("{0} does not contain any GEDCOM records")]
    NotGedcom(PathBuf),

    /// Strict mode requires a HEAD record first
    #[error("{0} does not start with a HEAD record")]
    MissingHeader(PathBuf),

    /// Configuration rejected by `ParserConfig::validate`
    #[error("Invalid parser configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for parser operations
pub type ParserResult<T> = Result<T, ParserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_input() {
        let err = ParserError::NotGedcom(PathBuf::from("family.ged"));
        assert_eq!(err.to_string(), "family.ged does not contain any GEDCOM records");

        let err = ParserError::FileTooLarge(PathBuf::from("big.ged"), 42);
        assert_eq!(err.to_string(), "File big.ged exceeds maximum size (42 bytes)");
    }
}
