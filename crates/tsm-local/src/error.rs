use std::path::PathBuf;
use thiserror::Error;
use tsm_core::TsmError;

/// Result type alias for local operations
pub type LocalResult<T> = std::result::Result<T, LocalError>;

/// Errors from local installation handling
#[derive(Error, Debug)]
pub enum LocalError {
    /// Filesystem error
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Archive could not be unpacked
    #[error("failed to extract {}: {reason}", path.display())]
    Extract {
        /// Archive path
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Program could not be started
    #[error("failed to start {program}: {source}")]
    Spawn {
        /// Program name
        program: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Program ran but exited unsuccessfully
    #[error("{program} exited with {}", code.map_or_else(|| "a signal".to_string(), |c| format!("code: {c}")))]
    Exit {
        /// Program name
        program: String,
        /// Exit code, if the process wasn't killed by a signal
        code: Option<i32>,
    },

    /// Error raised by shared core logic
    #[error(transparent)]
    Core(#[from] TsmError),
}

impl LocalError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<LocalError> for TsmError {
    fn from(err: LocalError) -> Self {
        match err {
            LocalError::Io { path, source } => Self::Io { path, source },
            LocalError::Extract { path, reason } => Self::Extract { path, reason },
            LocalError::Spawn { program, source } => Self::Spawn { program, source },
            LocalError::Exit { program, code } => Self::Process { program, code },
            LocalError::Core(err) => err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsm_core::ErrorKind;

    #[test]
    fn test_conversion_keeps_kind() {
        let io = LocalError::io("/sdks", std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(TsmError::from(io).kind(), ErrorKind::Io);

        let exit = LocalError::Exit {
            program: "titanium.py".into(),
            code: Some(2),
        };
        let err = TsmError::from(exit);
        assert_eq!(err.kind(), ErrorKind::Process);
        assert_eq!(err.exit_code(), Some(2));
        assert_eq!(err.to_string(), "titanium.py exited with code: 2");
    }

    #[test]
    fn test_core_errors_pass_through() {
        let err = LocalError::from(TsmError::NoMatch { query: None });
        assert!(TsmError::from(err).is_not_found());
    }
}
