//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// Remote document store error with status context
    #[error("Document store error: {message}")]
    Store {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// A write was rejected because the document changed since it was read
    #[error("Revision conflict on {path}: the document was changed by someone else")]
    Conflict {
        /// Store path of the conflicting document.
        path: String,
    },

    /// Requested song does not exist
    #[error("Song not found: {0}")]
    NotFound(String),

    /// A song with the same id is already listed
    #[error("Song already exists: {0}")]
    AlreadyExists(String),

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// File or document parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Edit addressed a line, chord or position that does not exist
    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// What was being indexed ("line", "chord", "position", ...).
        what: &'static str,
        /// The offending index.
        index: usize,
        /// Length of the indexed sequence.
        len: usize,
    },

    /// Chord name rejected by an edit
    #[error("Invalid chord: {0}")]
    InvalidChord(String),

    /// Song failed validation before save
    #[error("Invalid song: {0}")]
    InvalidSong(String),

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a store error with HTTP status
    pub fn store_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            401 => Some("Check the GITHUB_TOKEN environment variable"),
            403 => Some("Your token may lack contents permission, or you are rate limited"),
            404 => Some("Check GITHUB_OWNER and GITHUB_REPO"),
            500..=599 => Some("GitHub server error - try again later"),
            _ => None,
        };
        Self::Store {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Create an index error
    pub const fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { what, index, len }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::parse(e.to_string(), None)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn store_status_provides_hints() {
        let err = Error::store_status("Unauthorized", 401);
        match err {
            Error::Store { hint: Some(h), .. } => {
                assert!(h.contains("GITHUB_TOKEN"));
            }
            _ => panic!("Expected Store error with hint"),
        }
    }

    #[test]
    fn out_of_range_message_names_the_sequence() {
        let err = Error::out_of_range("chord", 3, 2);
        assert_eq!(err.to_string(), "chord index 3 out of range (len 2)");
    }
}
