//! Read operations for filesystem backends.

use std::io::Read;
use std::path::Path;

use crate::{FsError, Metadata};

/// Read operations for a filesystem backend.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access; backends use interior mutability for their own state.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsRead`.
pub trait FsRead: Send + Sync {
    /// Get metadata for a path.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    fn stat(&self, path: &Path) -> Result<Metadata, FsError>;

    /// Open a file for reading, returning a boxed reader.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::NotAFile`] if the path is a directory
    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>, FsError>;

    /// Check if a path exists.
    ///
    /// A not-found stat is `false`, never an error.
    fn exists(&self, path: &Path) -> Result<bool, FsError> {
        match self.stat(path) {
            Ok(_) => Ok(true),
            Err(FsError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Read entire file contents as bytes.
    fn read(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        let mut reader = self.open_read(path)?;
        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .map_err(|e| FsError::io("read", path, e))?;
        Ok(buf)
    }
}
