//! Error types for the terminal backend.
//!
//! Every failure of an underlying OS facility is reported with the name of
//! the operation that failed. The binary treats all of these as fatal.

use std::io;
use std::path::PathBuf;

/// Errors raised while resolving configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file exists but could not be read
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file could not be parsed as TOML
    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Explicitly requested config file does not exist
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Character set name is not one of ascii, block, braille
    #[error("unknown character set '{0}' (expected ascii, block or braille)")]
    UnknownCharacterSet(String),

    /// `config init` refuses to overwrite an existing file
    #[error("Config file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Scaling factor leaves no pixels on one of the axes
    #[error("invalid scaling factor {0}: resolution would be empty")]
    InvalidScaling(u32),
}

/// Errors raised by the backend at runtime.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// An OS call failed; `op` names the call.
    #[error("{op}: {source}")]
    Os {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// Host handed over a framebuffer of the wrong length
    #[error("framebuffer holds {actual} pixels, expected {expected}")]
    FramebufferSize { expected: usize, actual: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BackendError {
    /// Wrap an I/O error with the name of the OS operation that produced it.
    pub fn os(op: &'static str, source: io::Error) -> Self {
        BackendError::Os { op, source }
    }

    /// Build an `Os` error from the thread's last OS error (`errno`).
    pub fn last_os(op: &'static str) -> Self {
        BackendError::Os {
            op,
            source: io::Error::last_os_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_error_names_operation() {
        let err = BackendError::os(
            "tcsetattr",
            io::Error::new(io::ErrorKind::Other, "bad file descriptor"),
        );
        assert_eq!(err.to_string(), "tcsetattr: bad file descriptor");
    }

    #[test]
    fn test_unknown_charset_message() {
        let err = ConfigError::UnknownCharacterSet("emoji".to_string());
        assert_eq!(
            err.to_string(),
            "unknown character set 'emoji' (expected ascii, block or braille)"
        );
    }

    #[test]
    fn test_config_error_converts_into_backend_error() {
        let err: BackendError = ConfigError::InvalidScaling(0).into();
        assert!(matches!(err, BackendError::Config(ConfigError::InvalidScaling(0))));
    }
}
