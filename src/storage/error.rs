//! Error type shared by [`ListFile`](super::ListFile) and
//! [`TypedListFile`](super::TypedListFile)

use std::path::PathBuf;

use thiserror::Error;

/// Boxed source error produced by a line codec
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias for list file operations
pub type Result<T, E = ListFileError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ListFileError {
    #[error("I/O error while {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Index {index} is out of range for a list of {len} line(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Cannot convert '{value}' to {target}: {source}")]
    Conversion {
        value: String,
        target: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Cannot serialize {target} value: {source}")]
    Serialize {
        target: &'static str,
        #[source]
        source: BoxError,
    },
}

impl ListFileError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Builds a conversion error for a value of type `T`
    #[must_use]
    pub fn conversion<T: ?Sized>(value: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Conversion {
            value: value.into(),
            target: std::any::type_name::<T>(),
            source: source.into(),
        }
    }

    /// Builds an error for a value of type `T` that could not be encoded
    #[must_use]
    pub fn serialize<T: ?Sized>(source: impl Into<BoxError>) -> Self {
        Self::Serialize {
            target: std::any::type_name::<T>(),
            source: source.into(),
        }
    }

    /// Returns true for errors raised while converting between values and lines
    pub fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion { .. } | Self::Serialize { .. })
    }

    /// Returns true for errors raised by the file system
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_operation_and_path() {
        let err = ListFileError::io(
            "writing",
            "/tmp/list.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );

        assert!(err.is_io());
        let message = err.to_string();
        assert!(message.contains("writing"));
        assert!(message.contains("/tmp/list.txt"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn conversion_error_names_target_type() {
        let source = "abc".parse::<i32>().unwrap_err();
        let err = ListFileError::conversion::<i32>("abc", source);

        assert!(!err.is_io());
        assert!(err.is_conversion());
        assert_eq!(
            err.to_string(),
            "Cannot convert 'abc' to i32: invalid digit found in string"
        );
    }

    #[test]
    fn index_error_message() {
        let err = ListFileError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "Index 4 is out of range for a list of 2 line(s)"
        );
    }
}
