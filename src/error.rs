//! Error types for the record list and its persistence channels

use std::{fmt, io};

/// Errors raised by [`List`](crate::list::List) access
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// Positional access past the end of the list
    #[error("Index: {index}, Size: {len}")]
    IndexOutOfRange {
        /// The index that was requested
        index: usize,
        /// Length of the list at the time of the request
        len: usize,
    },
}

/// A single field of a text block that could not be turned into a value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Date field not in ISO `YYYY-MM-DD` form
    #[error("invalid date for {field}: '{value}'")]
    InvalidDate { field: &'static str, value: String },

    /// Height that is not a whole number of centimeters
    #[error("invalid height: '{value}'")]
    InvalidHeight { value: String },

    /// Block names a prisoner but omits a required field
    #[error("record '{name}' is missing {field}")]
    Missing { name: String, field: &'static str },
}

/// Result type alias for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while reading or writing either persistence channel
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A record's `Display` implementation failed while writing text
    #[error("formatting a record failed")]
    Format(#[from] fmt::Error),

    /// Malformed text block
    #[error("line {line}: {source}")]
    Parse {
        /// 1-based line number where the problem was detected
        line: usize,
        #[source]
        source: FieldError,
    },

    /// Snapshot header is missing or does not carry the expected magic
    #[error("invalid snapshot format: {0}")]
    InvalidFormat(String),

    /// Snapshot was written by an incompatible format version
    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Snapshot payload shorter than its header claims
    #[error("snapshot truncated: expected {expected} payload bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    /// Snapshot payload encoding failed
    #[error("snapshot serialization failed: {0}")]
    Serialize(String),

    /// Snapshot payload decoding failed
    #[error("snapshot deserialization failed: {0}")]
    Deserialize(String),
}

impl CodecError {
    /// Returns true if the error comes from the data rather than the file system
    pub const fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. }
                | Self::InvalidFormat(_)
                | Self::UnsupportedVersion { .. }
                | Self::Truncated { .. }
                | Self::Deserialize(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_error_message_carries_index_and_size() {
        let err = ListError::IndexOutOfRange { index: 5, len: 2 };
        assert_eq!(err.to_string(), "Index: 5, Size: 2");
    }

    #[test]
    fn test_parse_error_message() {
        let err = CodecError::Parse {
            line: 3,
            source: FieldError::InvalidHeight { value: "tall".into() },
        };
        assert_eq!(err.to_string(), "line 3: invalid height: 'tall'");
        assert!(err.is_corruption());
    }

    #[test]
    fn test_io_error_is_not_corruption() {
        let err: CodecError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(!err.is_corruption());

        let err: CodecError = fmt::Error.into();
        assert!(!err.is_corruption());
    }
}
