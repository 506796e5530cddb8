//! Library error types.
//!
//! Provides unified error handling with actionable context for debugging.

use std::path::PathBuf;
use thiserror::Error;

/// Library result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<PathBuf>,
    },

    /// The outer script container is truncated or its header points outside the buffer
    #[error("Malformed script container: {message}")]
    MalformedContainer {
        /// Description of what is wrong with the container.
        message: String,
    },

    /// The embedded archive could not be read or written
    #[error("Archive error: {message}")]
    Archive {
        /// Description of the archive failure.
        message: String,
    },

    /// The script model entry is absent from the embedded archive
    #[error("Archive has no `{name}` entry")]
    MissingEntry {
        /// Name of the entry that was expected.
        name: String,
    },

    /// The script model document is not valid JSON
    #[error("Script model JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A raw record field has the wrong shape
    #[error("Schema error at {path}: {message}")]
    Schema {
        /// JSON path of the offending field, e.g. `Cues[0].Properties.Name`.
        path: String,
        /// Description of the mismatch.
        message: String,
    },

    /// A value that must be an exact integer on the wire is not
    #[error("Invariant violation: {field} must be an integer, got {value}")]
    InvariantViolation {
        /// Name of the offending property.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// An in-memory record that would not survive an encode/decode round trip
    #[error("Invalid model at {path}: {message}")]
    InvalidModel {
        /// Path of the offending record, e.g. `Cues[1].Content`.
        path: String,
        /// What makes the record unrepresentable.
        message: String,
    },

    /// A cue position outside the script's cue sequence
    #[error("Cue index {index} is out of range for {len} cues")]
    CueIndex {
        /// The requested position.
        index: usize,
        /// Number of cues in the script.
        len: usize,
    },

    /// A delimited-string or hex primitive could not be parsed
    #[error("Cannot parse {input:?} as a {kind}")]
    Primitive {
        /// Kind of primitive that was expected.
        kind: &'static str,
        /// The offending input.
        input: String,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a malformed-container error
    pub fn container(message: impl Into<String>) -> Self {
        Self::MalformedContainer { message: message.into() }
    }

    /// Create an archive error
    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive { message: message.into() }
    }

    /// Create a schema error for the field at `path`
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema { path: path.into(), message: message.into() }
    }

    /// Create an invalid-model error for the record at `path`
    pub fn model(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidModel { path: path.into(), message: message.into() }
    }

    /// Create a primitive parse error
    pub fn primitive(kind: &'static str, input: impl Into<String>) -> Self {
        Self::Primitive { kind, input: input.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Whether the error comes from the bytes being decoded rather than the environment
    pub const fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedContainer { .. }
                | Self::Archive { .. }
                | Self::MissingEntry { .. }
                | Self::Json(_)
                | Self::Schema { .. }
                | Self::Primitive { .. }
        )
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Self::Archive { message: e.to_string() }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn schema_error_names_the_path() {
        let err = Error::schema("Cues[2].Properties.Name", "expected a string");
        assert_eq!(
            err.to_string(),
            "Schema error at Cues[2].Properties.Name: expected a string"
        );
    }

    #[test]
    fn format_errors_are_classified() {
        assert!(Error::container("short").is_format_error());
        assert!(Error::MissingEntry { name: "x".into() }.is_format_error());
        assert!(!Error::config("bad", "fix it").is_format_error());
        let invariant = Error::InvariantViolation { field: "mainWidth", value: 1.5 };
        assert!(!invariant.is_format_error());
        assert!(!Error::model("Cues[0].Content", "duplicate stanza").is_format_error());
    }

    #[test]
    fn zip_errors_become_archive_errors() {
        let err: Error = zip::result::ZipError::FileNotFound.into();
        match err {
            Error::Archive { message } => assert!(!message.is_empty()),
            other => panic!("Expected archive error, got {other:?}"),
        }
    }
}
