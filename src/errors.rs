//! Shared error types for the library

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dovmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// A dataset line that is not a usable record
    #[error("Invalid record at line {line}{}: {message}", pattern_suffix(.pattern))]
    InvalidRecord {
        line: usize,
        pattern: Option<String>,
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// File system errors with the offending path
    #[error("File system error for {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

fn pattern_suffix(pattern: &Option<String>) -> String {
    pattern
        .as_ref()
        .map(|p| format!(" ({:?})", p))
        .unwrap_or_default()
}

impl Error {
    /// Create an invalid record error
    pub fn invalid_record(
        line: usize,
        pattern: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidRecord {
            line,
            pattern,
            message: message.into(),
        }
    }

    /// Create a file system error with path context
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_record_message() {
        let err = Error::invalid_record(3, Some("a*".to_string()), "missing steps");
        assert_eq!(err.to_string(), r#"Invalid record at line 3 ("a*"): missing steps"#);
        let err = Error::invalid_record(4, None, "not JSON");
        assert_eq!(err.to_string(), "Invalid record at line 4: not JSON");
    }

    #[test]
    fn test_file_system_names_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::file_system("data/sl.jsonl", source);
        assert_eq!(err.to_string(), "File system error for data/sl.jsonl: gone");
    }
}
