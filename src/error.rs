//! Error types for the fluent-fs filesystem abstraction.

use std::path::{Path, PathBuf};

/// Filesystem error type with contextual variants.
///
/// All variants include relevant context (path, operation) where applicable.
/// Uses `#[non_exhaustive]` for forward compatibility.
///
/// This is the *recoverable* error tier. The `assert_*` and `must_*` methods
/// on [`File`](crate::File) and [`Dir`](crate::Dir) promote these into panics
/// with a message naming the handle and the violated expectation.
///
/// # Examples
///
/// ```rust
/// use fluent_fs::FsError;
/// use std::path::PathBuf;
///
/// let err = FsError::NotFound { path: PathBuf::from("/missing.txt") };
/// assert_eq!(err.to_string(), "not found: /missing.txt");
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// Path does not exist.
    #[error("not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Expected a file but found something else.
    #[error("not a file: {path}")]
    NotAFile {
        /// The path that is not a file.
        path: PathBuf,
    },

    /// Expected a directory but found something else.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path that is not a directory.
        path: PathBuf,
    },

    /// A child lookup was given an absolute path.
    #[error("path must be relative: {path}")]
    PathNotRelative {
        /// The offending absolute path.
        path: PathBuf,
    },

    /// Invalid data encountered (e.g. non-UTF-8 file contents).
    #[error("invalid data: {path} ({details})")]
    InvalidData {
        /// The path with invalid data.
        path: PathBuf,
        /// Details about the invalid data.
        details: String,
    },

    /// Template source failed to parse.
    #[error("template parse error: {details}")]
    TemplateParse {
        /// Parser diagnostic.
        details: String,
    },

    /// Template execution failed (e.g. missing data field).
    #[error("template render error: {details}")]
    TemplateRender {
        /// Execution diagnostic.
        details: String,
    },

    /// The host viewer could not open the path.
    #[error("could not open {path} in host viewer: {details}")]
    Viewer {
        /// The path that was handed to the host viewer.
        path: PathBuf,
        /// Launcher diagnostic.
        details: String,
    },

    /// I/O error with context.
    #[error("{operation} failed for {path}: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The path involved in the operation.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Wrap an `io::Error` with the failing operation and path.
    ///
    /// A not-found kind becomes [`FsError::NotFound`] so callers can match on
    /// it without digging through `io::ErrorKind`.
    pub fn io(operation: &'static str, path: &Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound {
                path: path.to_path_buf(),
            },
            _ => FsError::Io {
                operation,
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// Returns `true` for the not-found variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_error_not_found_display() {
        let err = FsError::NotFound {
            path: PathBuf::from("/missing"),
        };
        assert_eq!(err.to_string(), "not found: /missing");
    }

    #[test]
    fn fs_error_path_not_relative_display() {
        let err = FsError::PathNotRelative {
            path: PathBuf::from("/abs/child"),
        };
        assert_eq!(err.to_string(), "path must be relative: /abs/child");
    }

    #[test]
    fn fs_error_io_display_includes_operation_and_path() {
        let err = FsError::Io {
            operation: "open source file",
            path: PathBuf::from("/src.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("open source file"));
        assert!(msg.contains("/src.txt"));
    }

    #[test]
    fn fs_error_io_helper_maps_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err = FsError::io("stat", Path::new("/gone"), io_err);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "not found: /gone");
    }

    #[test]
    fn fs_error_io_helper_keeps_other_kinds() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err = FsError::io("stat", Path::new("/secret"), io_err);
        assert!(matches!(err, FsError::Io { operation: "stat", .. }));
    }
}
