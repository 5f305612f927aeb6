//! Directory handle bound to a filesystem backend.

use std::fmt;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::backend::OsFs;
use crate::{File, Fs, FsError, OpenFlags, Permissions, ReadDirIter, path_resolver};

/// Name of the scoped probe file used by [`Dir::is_writable`].
const WRITE_PROBE: &str = ".fluentfs-writetest";

/// A directory identified by a canonical path plus a bound backend.
///
/// Child handles produced by [`file_at`](Dir::file_at) and
/// [`dir_at`](Dir::dir_at) share this directory's backend, so an entire
/// subtree of lookups can run against one in-memory fake.
///
/// # Examples
///
/// ```rust,no_run
/// use fluent_fs::{Dir, Permissions};
///
/// let scratch = Dir::at("/tmp/scratch");
/// scratch.ensure(Permissions::default_dir()).unwrap();
/// let notes = scratch.file_at("notes.txt").unwrap();
/// notes.set_string_content("hello").unwrap();
/// ```
pub struct Dir {
    path: PathBuf,
    fs: Arc<dyn Fs>,
}

impl Dir {
    /// Create a handle for a path on the real OS filesystem.
    ///
    /// # Panics
    ///
    /// Panics under the same environment failures as [`File::at`]: a `~`
    /// marker without a resolvable home directory, or a relative path
    /// without a readable working directory.
    pub fn at(raw: &str) -> Self {
        Self::with_backend(raw, Arc::new(OsFs::new()))
    }

    /// Create a handle for a path on a specific backend.
    pub fn with_backend(raw: &str, fs: Arc<dyn Fs>) -> Self {
        Self::from_resolved(path_resolver::resolve(raw), fs)
    }

    pub(crate) fn from_resolved(path: PathBuf, fs: Arc<dyn Fs>) -> Self {
        Dir { path, fs }
    }

    pub(crate) fn backend(&self) -> &Arc<dyn Fs> {
        &self.fs
    }

    /// The canonical absolute path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The last path segment, empty for the root.
    pub fn name(&self) -> String {
        path_resolver::last_segment(&self.path)
    }

    /// The parent directory, sharing this handle's backend.
    ///
    /// The root's parent is the root itself.
    pub fn parent(&self) -> Dir {
        Dir::from_resolved(path_resolver::parent_of(&self.path), Arc::clone(&self.fs))
    }

    /// This path relative to another directory.
    ///
    /// Falls back to the full path when this directory is not under `base`.
    pub fn relative_to(&self, base: &Dir) -> PathBuf {
        self.path
            .strip_prefix(&base.path)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| self.path.clone())
    }

    /// The path as a string with exactly one trailing separator.
    pub fn with_trailing_separator(&self) -> String {
        let raw = self.path.to_string_lossy();
        if raw.ends_with(MAIN_SEPARATOR) {
            raw.into_owned()
        } else {
            format!("{raw}{MAIN_SEPARATOR}")
        }
    }

    /// The path as a string with no trailing separator.
    pub fn without_trailing_separator(&self) -> String {
        // canonical paths are already stripped; the root keeps its separator
        self.path.to_string_lossy().into_owned()
    }

    // ========================================================================
    // Existence and probes
    // ========================================================================

    /// Whether the path exists and is a directory.
    ///
    /// Any stat failure, including not-found, yields `false`.
    pub fn exists(&self) -> bool {
        match self.fs.stat(&self.path) {
            Ok(meta) => meta.is_dir(),
            Err(_) => false,
        }
    }

    /// The negation of [`exists`](Dir::exists).
    pub fn not_exists(&self) -> bool {
        !self.exists()
    }

    /// Whether the directory can actually be listed.
    pub fn is_readable(&self) -> bool {
        self.fs.read_dir(&self.path).is_ok()
    }

    /// Whether a file can be created inside the directory.
    ///
    /// Probes with a scoped hidden file that is guaranteed removed again, so
    /// the probe leaves no artifact behind.
    ///
    /// # Panics
    ///
    /// Panics if a real file is already occupying the probe name, or if the
    /// probe file was created but cannot be removed.
    pub fn is_writable(&self) -> bool {
        let probe = path_resolver::join(&self.path, Path::new(WRITE_PROBE));
        if self.fs.exists(&probe).unwrap_or(false) {
            panic!("probe file {} already exists", probe.display());
        }
        let opened = self
            .fs
            .open_write(&probe, OpenFlags::TOUCH, Permissions::default_file());
        if opened.is_err() {
            return false;
        }
        drop(opened);

        if let Err(e) = self.fs.remove_file(&probe) {
            panic!("could not remove probe file {}: {e}", probe.display());
        }
        true
    }

    /// Whether the directory is absent or has zero entries.
    ///
    /// Absence is a degenerate empty state, not an error.
    ///
    /// # Panics
    ///
    /// Panics when the directory is present but cannot be listed, so
    /// "empty" is never conflated with "unreadable contents".
    pub fn is_empty(&self) -> bool {
        match self.fs.read_dir(&self.path) {
            Ok(entries) => entries.count() == 0,
            Err(FsError::NotFound { .. }) => true,
            Err(e) => panic!("could not list directory {}: {e}", self.path.display()),
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Create the directory and any missing parents.
    ///
    /// Idempotent when the directory already exists.
    pub fn create(&self, perm: Permissions) -> Result<(), FsError> {
        debug!(path = %self.path.display(), "create directory");
        self.fs.create_dir_all(&self.path, perm)
    }

    /// Create the directory tree if it is missing; no-op otherwise.
    pub fn ensure(&self, perm: Permissions) -> Result<(), FsError> {
        if self.exists() {
            return Ok(());
        }
        self.create(perm)
    }

    /// Guarantee an existing, empty directory.
    ///
    /// Absent: create. Present and non-empty: clear. Present and empty:
    /// no-op.
    pub fn ensure_empty(&self, perm: Permissions) -> Result<(), FsError> {
        if !self.exists() {
            return self.create(perm);
        }
        if !self.is_empty() {
            return self.clear();
        }
        Ok(())
    }

    /// Remove every direct child but not the directory itself.
    ///
    /// Aborts on the first child that cannot be removed; earlier removals
    /// are not undone, and the error names the failing child.
    pub fn clear(&self) -> Result<(), FsError> {
        debug!(path = %self.path.display(), "clear directory");
        for entry in self.fs.read_dir(&self.path)? {
            let entry = entry?;
            self.fs.remove_all(&entry.path)?;
        }
        Ok(())
    }

    /// Remove the directory recursively. A missing directory is a no-op.
    pub fn remove(&self) -> Result<(), FsError> {
        match self.fs.remove_all(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "removed directory");
                Ok(())
            }
            Err(FsError::NotFound { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    // ========================================================================
    // Children
    // ========================================================================

    /// List the directory's entries.
    pub fn read_dir(&self) -> Result<ReadDirIter, FsError> {
        self.fs.read_dir(&self.path)
    }

    /// A file handle for a relative child path, sharing this backend.
    ///
    /// # Errors
    ///
    /// [`FsError::PathNotRelative`] when the given path is absolute.
    pub fn file_at(&self, relative: &str) -> Result<File, FsError> {
        let relative = Path::new(relative);
        if relative.is_absolute() {
            return Err(FsError::PathNotRelative {
                path: relative.to_path_buf(),
            });
        }
        Ok(File::from_resolved(
            path_resolver::join(&self.path, relative),
            Permissions::default_file(),
            Arc::clone(&self.fs),
        ))
    }

    /// A directory handle for a relative child path, sharing this backend.
    ///
    /// # Errors
    ///
    /// [`FsError::PathNotRelative`] when the given path is absolute.
    pub fn dir_at(&self, relative: &str) -> Result<Dir, FsError> {
        let relative = Path::new(relative);
        if relative.is_absolute() {
            return Err(FsError::PathNotRelative {
                path: relative.to_path_buf(),
            });
        }
        Ok(Dir::from_resolved(
            path_resolver::join(&self.path, relative),
            Arc::clone(&self.fs),
        ))
    }

    /// Open the directory in the host's default file browser.
    ///
    /// A launcher failure is reported, never fatal.
    pub fn open_standard(&self) -> Result<(), FsError> {
        opener::open(&self.path).map_err(|e| FsError::Viewer {
            path: self.path.clone(),
            details: e.to_string(),
        })
    }

    // ========================================================================
    // Fatal tier
    // ========================================================================

    /// [`ensure`](Dir::ensure), promoting failure to a panic.
    pub fn must_ensure(&self, perm: Permissions) {
        self.ensure(perm).unwrap_or_else(|e| {
            panic!(
                "could not create directory {}: {e}",
                self.path.display()
            )
        });
    }

    /// [`clear`](Dir::clear), promoting failure to a panic.
    pub fn must_clear(&self) {
        self.clear()
            .unwrap_or_else(|e| panic!("could not clear directory {}: {e}", self.path.display()));
    }

    /// [`file_at`](Dir::file_at), promoting failure to a panic.
    pub fn must_file_at(&self, relative: &str) -> File {
        self.file_at(relative).unwrap_or_else(|e| {
            panic!(
                "could not resolve file {relative} under {}: {e}",
                self.path.display()
            )
        })
    }

    /// [`dir_at`](Dir::dir_at), promoting failure to a panic.
    pub fn must_dir_at(&self, relative: &str) -> Dir {
        self.dir_at(relative).unwrap_or_else(|e| {
            panic!(
                "could not resolve directory {relative} under {}: {e}",
                self.path.display()
            )
        })
    }

    /// Panic unless the directory exists. Returns the handle for chaining.
    pub fn assert_exists(self) -> Self {
        if !self.exists() {
            panic!("directory {} should have existed", self.path.display());
        }
        self
    }

    /// Panic if the directory exists. Returns the handle for chaining.
    pub fn assert_not_exists(self) -> Self {
        if self.exists() {
            panic!("directory {} should not have existed", self.path.display());
        }
        self
    }

    /// Panic unless the directory is absent or has zero entries.
    pub fn assert_empty(self) -> Self {
        if !self.is_empty() {
            panic!("directory {} should have been empty", self.path.display());
        }
        self
    }

    /// Panic unless the directory has at least one entry.
    pub fn assert_not_empty(self) -> Self {
        if self.is_empty() {
            panic!(
                "directory {} should not have been empty",
                self.path.display()
            );
        }
        self
    }

    /// Panic unless the directory can be listed.
    pub fn assert_readable(self) -> Self {
        if !self.is_readable() {
            panic!(
                "directory {} should have been readable",
                self.path.display()
            );
        }
        self
    }

    /// Panic unless a file can be created inside the directory.
    pub fn assert_writable(self) -> Self {
        if !self.is_writable() {
            panic!(
                "directory {} should have been writable",
                self.path.display()
            );
        }
        self
    }
}

impl Clone for Dir {
    fn clone(&self) -> Self {
        Dir {
            path: self.path.clone(),
            fs: Arc::clone(&self.fs),
        }
    }
}

impl fmt::Debug for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dir")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Equality is path equality only; the bound backend does not participate.
impl PartialEq for Dir {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Dir {}
