//! Error taxonomy for loading and evaluating user implementations.
//!
//! Runner-level failures never reach callers of [`crate::runners::Runner::results`];
//! they are logged and collapsed into an empty result sequence. These variants
//! keep the cause distinguishable for diagnostics.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Error, Debug)]
pub enum HarnessError {
    /// Artifact missing, unreadable, or not a well-formed module.
    #[error("failed to load {path}: {message}")]
    Load { path: PathBuf, message: String },

    /// Instantiation failed or the operation does not match the demanded
    /// name and signature.
    #[error("implementation does not satisfy contract: {0}")]
    Reflection(String),

    /// User code trapped or misbehaved while running.
    #[error("implementation failed during execution: {0}")]
    Invocation(String),

    /// Reading or writing a descriptor, source file, or ledger failed.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Descriptor file could not be parsed.
    #[error("invalid descriptor {path}: {message}")]
    Descriptor { path: PathBuf, message: String },
}

impl HarnessError {
    pub fn load(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        HarnessError::Load {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HarnessError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = HarnessError::load("/tmp/a.wasm", "bad magic");
        assert_eq!(err.to_string(), "failed to load /tmp/a.wasm: bad magic");

        let err = HarnessError::Reflection("missing export `has_triple`".to_string());
        assert_eq!(
            err.to_string(),
            "implementation does not satisfy contract: missing export `has_triple`"
        );
    }

    #[test]
    fn io_error_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = HarnessError::io("/tmp/x", io_err);
        assert!(matches!(err, HarnessError::Io { .. }));
        let source = std::error::Error::source(&err).expect("source");
        assert!(source.to_string().contains("file not found"));
    }
}
