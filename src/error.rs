// error.rs -- Crate-wide error type.
//
// Numeric routines that can only fail on degenerate input (singular
// systems, collinear points) return Option. Everything that validates
// caller input, touches the OS or coordinates threads returns Result.

use thiserror::Error;

/// Errors produced by tidop.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("size mismatch: expected {expected}, found {found}")]
    SizeMismatch { expected: usize, found: usize },

    #[error("not enough points: {required} required, {found} given")]
    NotEnoughPoints { required: usize, found: usize },

    #[error("singular system: {0}")]
    Singular(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Config(#[from] toml::de::Error),

    #[error("process failed (exit code {code:?}): {message}")]
    Process { code: Option<i32>, message: String },

    #[error("task error: {0}")]
    Task(String),

    #[error("queue is stopped")]
    QueueStopped,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for `Error::InvalidArgument`.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = Error::NotEnoughPoints { required: 3, found: 2 };
        assert_eq!(e.to_string(), "not enough points: 3 required, 2 given");

        let e = Error::SizeMismatch { expected: 4, found: 5 };
        assert_eq!(e.to_string(), "size mismatch: expected 4, found 5");

        assert_eq!(Error::QueueStopped.to_string(), "queue is stopped");
    }

    #[test]
    fn test_io_conversion() {
        fn open() -> Result<()> {
            std::fs::read("/definitely/not/a/real/path")?;
            Ok(())
        }
        assert!(matches!(open(), Err(Error::Io(_))));
    }
}
