//! Write operations for filesystem backends.

use std::io::Write;
use std::path::Path;

use crate::{FsError, OpenFlags, Permissions};

/// Write operations for a filesystem backend.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access; backends use interior mutability for their own state.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsWrite`.
pub trait FsWrite: Send + Sync {
    /// Open a file for writing, returning a boxed writer.
    ///
    /// `flags` control creation, truncation, and append positioning; `perm`
    /// is applied only when the file is created.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the file is absent and `flags.create` is
    ///   unset, or if the parent directory does not exist
    /// - [`FsError::NotAFile`] if the path is a directory
    fn open_write(
        &self,
        path: &Path,
        flags: OpenFlags,
        perm: Permissions,
    ) -> Result<Box<dyn Write + Send>, FsError>;

    /// Remove a file.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the file does not exist
    /// - [`FsError::NotAFile`] if the path is a directory
    fn remove_file(&self, path: &Path) -> Result<(), FsError>;

    /// Write data to a file, creating it if missing and truncating if present.
    fn write(&self, path: &Path, data: &[u8], perm: Permissions) -> Result<(), FsError> {
        let mut writer = self.open_write(path, OpenFlags::WRITE, perm)?;
        writer
            .write_all(data)
            .and_then(|()| writer.flush())
            .map_err(|e| FsError::io("write", path, e))
    }

    /// Append data to the end of an existing file.
    ///
    /// Append never creates: a missing file is [`FsError::NotFound`].
    fn append(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        let mut writer = self.open_write(path, OpenFlags::APPEND, Permissions::default_file())?;
        writer
            .write_all(data)
            .and_then(|()| writer.flush())
            .map_err(|e| FsError::io("append", path, e))
    }
}
