use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for SDK manager operations
pub type Result<T> = std::result::Result<T, TsmError>;

/// Errors that can occur while resolving, installing or running SDK builds
#[derive(Error, Debug)]
pub enum TsmError {
    /// HTTP request could not be completed
    #[error("request to {url} failed: {message}")]
    Http {
        /// Requested URL
        url: String,
        /// Transport error description
        message: String,
    },

    /// Build server answered with a non-success status
    #[error("got HTTP {code} from {url}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        code: u16,
    },

    /// Response body was not valid JSON for the expected shape
    #[error("invalid JSON from {url}: {source}")]
    Json {
        /// Requested URL
        url: String,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// Response was valid JSON but is missing required data
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse {
        /// Requested URL
        url: String,
        /// What was wrong with it
        reason: String,
    },

    /// An installation's metadata record is incomplete
    #[error("{} does not appear to contain a valid sdk: {reason}", path.display())]
    InvalidMetadata {
        /// Installation directory
        path: PathBuf,
        /// What was missing
        reason: String,
    },

    /// Local filesystem operation failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Archive could not be extracted
    #[error("failed to extract {}: {reason}", path.display())]
    Extract {
        /// Archive path
        path: PathBuf,
        /// Extraction error description
        reason: String,
    },

    /// No build matched the query
    #[error("no matching SDK builds for {}", query.as_deref().unwrap_or("<any>"))]
    NoMatch {
        /// Query that matched nothing
        query: Option<String>,
    },

    /// Helper process could not be started
    #[error("failed to start {program}: {source}")]
    Spawn {
        /// Program that was executed
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Helper process exited unsuccessfully
    #[error("{program} exited with {}", code.map_or_else(|| "a signal".to_string(), |c| format!("code: {c}")))]
    Process {
        /// Program that was executed
        program: String,
        /// Exit code, absent when the process was killed by a signal
        code: Option<i32>,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Broad classification of a [`TsmError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport or HTTP status failure
    Fetch,
    /// Malformed remote or local data where parsing is required to succeed
    Parse,
    /// Local filesystem failure
    Io,
    /// Zero candidates matched a query
    NotFound,
    /// External helper failed
    Process,
    /// Invalid configuration
    Config,
}

impl TsmError {
    /// Create an I/O error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Http { .. } | Self::Status { .. } => ErrorKind::Fetch,
            Self::Json { .. } | Self::MalformedResponse { .. } | Self::InvalidMetadata { .. } => {
                ErrorKind::Parse
            }
            Self::Io { .. } | Self::Extract { .. } => ErrorKind::Io,
            Self::NoMatch { .. } => ErrorKind::NotFound,
            Self::Spawn { .. } | Self::Process { .. } => ErrorKind::Process,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns true if no build matched the query
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NoMatch { .. })
    }

    /// Returns the HTTP status code if the server rejected the request
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns the exit code of a failed helper process
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Process { code, .. } => *code,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let err = TsmError::Status {
            url: "http://example.com/branches.json".into(),
            code: 404,
        };
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert_eq!(err.status_code(), Some(404));

        let err = TsmError::NoMatch { query: Some("9.9".into()) };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "no matching SDK builds for 9.9");

        let err = TsmError::Process {
            program: "python".into(),
            code: Some(2),
        };
        assert_eq!(err.kind(), ErrorKind::Process);
        assert_eq!(err.exit_code(), Some(2));
        assert_eq!(err.to_string(), "python exited with code: 2");
    }
}
