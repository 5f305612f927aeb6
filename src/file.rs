//! File handle bound to a filesystem backend.

use std::fmt;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::backend::OsFs;
use crate::renderer::Renderer;
use crate::{
    Dir, FileExtension, Fs, FsError, OpenFlags, Permissions, extension, path_resolver,
};

/// A file identified by a canonical path plus a bound backend.
///
/// Value semantics throughout: the path is resolved once at construction and
/// never changes, transforms like [`with_extension`](File::with_extension)
/// return new handles, and cloning shares only the backend. The handle does
/// not require the file to exist.
///
/// # Examples
///
/// ```rust,no_run
/// use fluent_fs::File;
///
/// let report = File::at("~/reports/summary.txt");
/// if report.exists() {
///     println!("{}", report.must_string_content());
/// }
/// ```
pub struct File {
    path: PathBuf,
    create_permissions: Permissions,
    fs: Arc<dyn Fs>,
}

impl File {
    /// Create a handle for a path on the real OS filesystem.
    ///
    /// The raw path is home-expanded, made absolute against the working
    /// directory, and stripped of trailing separators.
    ///
    /// # Panics
    ///
    /// Panics if the home directory is needed but cannot be determined, or if
    /// the path is relative and the working directory cannot be read.
    pub fn at(raw: &str) -> Self {
        Self::with_backend(raw, Arc::new(OsFs::new()))
    }

    /// Create a handle for a path on a specific backend.
    pub fn with_backend(raw: &str, fs: Arc<dyn Fs>) -> Self {
        Self::from_resolved(path_resolver::resolve(raw), Permissions::default_file(), fs)
    }

    pub(crate) fn from_resolved(
        path: PathBuf,
        create_permissions: Permissions,
        fs: Arc<dyn Fs>,
    ) -> Self {
        File {
            path,
            create_permissions,
            fs,
        }
    }

    /// Return a handle with a different creation permission mode.
    ///
    /// The mode applies when an operation creates the file; it does not
    /// change permissions of an existing file.
    pub fn with_create_permissions(mut self, perm: Permissions) -> Self {
        self.create_permissions = perm;
        self
    }

    /// The canonical absolute path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The filename portion of the path.
    pub fn filename(&self) -> String {
        path_resolver::last_segment(&self.path)
    }

    /// Whether the filename starts with a dot.
    pub fn is_hidden(&self) -> bool {
        self.filename().starts_with('.')
    }

    /// This path relative to a directory.
    ///
    /// Falls back to the full path when the file is not under the directory.
    pub fn relative_to(&self, dir: &Dir) -> PathBuf {
        self.path
            .strip_prefix(dir.path())
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| self.path.clone())
    }

    // ========================================================================
    // Existence and probes
    // ========================================================================

    /// Whether the path exists and is a file.
    ///
    /// Any stat failure, including not-found, yields `false`.
    pub fn exists(&self) -> bool {
        match self.fs.stat(&self.path) {
            Ok(meta) => !meta.is_dir(),
            Err(_) => false,
        }
    }

    /// The negation of [`exists`](File::exists).
    pub fn not_exists(&self) -> bool {
        !self.exists()
    }

    /// Whether the file can actually be opened for reading.
    ///
    /// Probes by opening and immediately releasing the reader.
    pub fn is_readable(&self) -> bool {
        self.fs.open_read(&self.path).is_ok()
    }

    /// Whether the file can actually be opened for writing.
    ///
    /// Probes by opening read-write-create without truncation and releasing
    /// the writer. A probe that created a previously-absent file removes it
    /// again so the probe leaves no artifact behind.
    ///
    /// # Panics
    ///
    /// Panics if the probe created the file but cannot remove it again.
    pub fn is_writable(&self) -> bool {
        let existed = self.exists();
        let opened = self
            .fs
            .open_write(&self.path, OpenFlags::TOUCH, self.create_permissions);
        let writable = opened.is_ok();
        drop(opened);

        if writable && !existed {
            if let Err(e) = self.fs.remove_file(&self.path) {
                panic!(
                    "could not remove probe file {}: {e}",
                    self.path.display()
                );
            }
        }
        writable
    }

    /// File size in bytes, 0 when the file is absent.
    ///
    /// # Panics
    ///
    /// Panics when the file is present but its size cannot be determined, so
    /// "empty" is never conflated with "inaccessible".
    pub fn filesize(&self) -> u64 {
        match self.fs.stat(&self.path) {
            Ok(meta) => meta.size,
            Err(FsError::NotFound { .. }) => 0,
            Err(e) => panic!(
                "could not determine size of file {}: {e}",
                self.path.display()
            ),
        }
    }

    /// File size formatted with binary units (`B`, `KiB`, `MiB`, ...).
    pub fn filesize_human(&self) -> String {
        const UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
        let size = self.filesize();
        if size < 1024 {
            return format!("{size} B");
        }
        let mut value = size as f64;
        let mut unit = 0;
        while value >= 1024.0 && unit < UNITS.len() - 1 {
            value /= 1024.0;
            unit += 1;
        }
        format!("{value:.1} {}", UNITS[unit])
    }

    /// Whether the file is absent or has zero length.
    pub fn is_empty(&self) -> bool {
        self.filesize() == 0
    }

    // ========================================================================
    // Content
    // ========================================================================

    /// Read the full content as bytes.
    ///
    /// No implicit existence check: a missing file is an error, not empty
    /// content.
    pub fn content(&self) -> Result<Vec<u8>, FsError> {
        self.fs.read(&self.path)
    }

    /// Read the full content as UTF-8 text.
    pub fn string_content(&self) -> Result<String, FsError> {
        String::from_utf8(self.content()?).map_err(|e| FsError::InvalidData {
            path: self.path.clone(),
            details: e.to_string(),
        })
    }

    /// Overwrite the file with the given bytes, creating it if absent.
    pub fn set_content(&self, data: &[u8]) -> Result<(), FsError> {
        debug!(path = %self.path.display(), bytes = data.len(), "set content");
        self.fs.write(&self.path, data, self.create_permissions)
    }

    /// Overwrite the file with the given text, creating it if absent.
    pub fn set_string_content(&self, text: &str) -> Result<(), FsError> {
        self.set_content(text.as_bytes())
    }

    /// Append bytes to the end of an existing file.
    ///
    /// Append never creates: a missing file is [`FsError::NotFound`].
    pub fn append(&self, data: &[u8]) -> Result<(), FsError> {
        self.fs.append(&self.path, data)
    }

    /// Append text to the end of an existing file.
    pub fn append_string(&self, text: &str) -> Result<(), FsError> {
        self.append(text.as_bytes())
    }

    /// Append text followed by a newline.
    pub fn append_line(&self, text: &str) -> Result<(), FsError> {
        self.append(format!("{text}\n").as_bytes())
    }

    /// Stream this file's content into another file.
    ///
    /// The destination is created (or truncated) with its own creation mode
    /// on its own backend. Failures identify the phase: opening the source,
    /// creating the destination, or copying. The source is never modified;
    /// destination state after a partial failure is backend-defined.
    pub fn copy_to(&self, target: &File) -> Result<(), FsError> {
        let mut reader = self
            .fs
            .open_read(&self.path)
            .map_err(|e| rephase(e, "open source file"))?;
        let mut writer = target
            .fs
            .open_write(&target.path, OpenFlags::WRITE, target.create_permissions)
            .map_err(|e| rephase(e, "create destination file"))?;

        io::copy(&mut reader, &mut writer)
            .and_then(|_| writer.flush())
            .map_err(|e| FsError::Io {
                operation: "copy file contents",
                path: target.path.clone(),
                source: e,
            })?;
        debug!(
            source = %self.path.display(),
            destination = %target.path.display(),
            "copied file"
        );
        Ok(())
    }

    /// Stream the full content through an MD5 digest, lowercase hex.
    pub fn md5_hash(&self) -> Result<String, FsError> {
        let mut reader = self.fs.open_read(&self.path)?;
        let mut context = md5::Context::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = reader
                .read(&mut buf)
                .map_err(|e| FsError::io("read", &self.path, e))?;
            if n == 0 {
                break;
            }
            context.consume(&buf[..n]);
        }
        Ok(format!("{:x}", context.compute()))
    }

    /// Remove the file. A missing file is a no-op, not an error.
    pub fn remove(&self) -> Result<(), FsError> {
        match self.fs.remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "removed file");
                Ok(())
            }
            Err(FsError::NotFound { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    // ========================================================================
    // Extensions
    // ========================================================================

    /// The file's extension, tar-aware.
    ///
    /// `my.tar.gz` has the single extension `tar.gz`; `music.mp3` has `mp3`;
    /// a name without a dot past its first character has none.
    pub fn extension(&self) -> Option<FileExtension> {
        let name = self.filename();
        extension::extension_suffix(&name).map(FileExtension::from)
    }

    /// Whether the filename has any extension at all.
    ///
    /// A leading hidden-file dot never counts.
    pub fn has_any_extension(&self) -> bool {
        extension::has_any_extension(&self.filename())
    }

    /// Whether the file's detected extension equals `ext`, byte-exact.
    ///
    /// A compound suffix must match whole: `archive.tar.gz` has extension
    /// `tar.gz` but not `gz`.
    pub fn has_extension(&self, ext: &FileExtension) -> bool {
        match self.extension() {
            Some(current) => current == *ext,
            None => false,
        }
    }

    /// A new handle with the extension replaced, tar-aware.
    ///
    /// With no current extension the new one is appended. Pure path
    /// transform; no I/O and no rename on disk.
    pub fn with_extension(&self, ext: &FileExtension) -> File {
        let name = self.filename();
        let new_name = match extension::extension_suffix(&name) {
            Some(suffix) => format!("{}{}", &name[..name.len() - suffix.len()], ext.with_dot()),
            None => format!("{name}{}", ext.with_dot()),
        };
        File::from_resolved(
            path_resolver::join(&path_resolver::parent_of(&self.path), Path::new(&new_name)),
            self.create_permissions,
            Arc::clone(&self.fs),
        )
    }

    /// A new handle with the tar-aware extension stripped.
    ///
    /// A name without an extension is returned unchanged.
    pub fn without_extension(&self) -> File {
        let name = self.filename();
        match extension::extension_suffix(&name) {
            Some(suffix) => {
                let new_name = &name[..name.len() - suffix.len()];
                File::from_resolved(
                    path_resolver::join(
                        &path_resolver::parent_of(&self.path),
                        Path::new(new_name),
                    ),
                    self.create_permissions,
                    Arc::clone(&self.fs),
                )
            }
            None => self.clone(),
        }
    }

    // ========================================================================
    // Navigation and environment
    // ========================================================================

    /// A sibling handle with a different filename, same directory.
    ///
    /// Pure path transform; no I/O and no rename on disk.
    pub fn with_filename(&self, name: &str) -> File {
        File::from_resolved(
            path_resolver::join(&path_resolver::parent_of(&self.path), Path::new(name)),
            self.create_permissions,
            Arc::clone(&self.fs),
        )
    }

    /// A handle with the same filename inside another directory.
    ///
    /// The new handle is bound to the target directory's backend, like a
    /// child produced by [`Dir::file_at`].
    pub fn in_dir(&self, dir: &Dir) -> File {
        File::from_resolved(
            path_resolver::join(dir.path(), Path::new(&self.filename())),
            self.create_permissions,
            Arc::clone(dir.backend()),
        )
    }

    /// The containing directory, sharing this handle's backend.
    pub fn dir(&self) -> Dir {
        Dir::from_resolved(path_resolver::parent_of(&self.path), Arc::clone(&self.fs))
    }

    /// Alias for [`dir`](File::dir).
    pub fn parent_dir(&self) -> Dir {
        self.dir()
    }

    /// Create the containing directory tree if it is missing.
    pub fn ensure_dir(&self, perm: Permissions) -> Result<(), FsError> {
        self.fs
            .create_dir_all(&path_resolver::parent_of(&self.path), perm)
    }

    /// Bind this file's current content as a template source.
    ///
    /// Fails when the content cannot be read or is not UTF-8.
    pub fn renderer(&self) -> Result<Renderer, FsError> {
        Renderer::from_file(self)
    }

    /// Open the file in the host's default application.
    ///
    /// A launcher failure is reported, never fatal.
    pub fn open_standard(&self) -> Result<(), FsError> {
        opener::open(&self.path).map_err(|e| FsError::Viewer {
            path: self.path.clone(),
            details: e.to_string(),
        })
    }

    pub(crate) fn backend(&self) -> &Arc<dyn Fs> {
        &self.fs
    }

    pub(crate) fn create_permissions(&self) -> Permissions {
        self.create_permissions
    }

    // ========================================================================
    // Fatal tier
    // ========================================================================

    /// [`content`](File::content), promoting failure to a panic.
    pub fn must_content(&self) -> Vec<u8> {
        self.content()
            .unwrap_or_else(|e| panic!("could not read file {}: {e}", self.path.display()))
    }

    /// [`string_content`](File::string_content), promoting failure to a panic.
    pub fn must_string_content(&self) -> String {
        self.string_content()
            .unwrap_or_else(|e| panic!("could not read file {}: {e}", self.path.display()))
    }

    /// [`remove`](File::remove), promoting failure to a panic.
    pub fn must_remove(&self) {
        self.remove()
            .unwrap_or_else(|e| panic!("could not remove file {}: {e}", self.path.display()));
    }

    /// [`md5_hash`](File::md5_hash), promoting failure to a panic.
    pub fn must_md5_hash(&self) -> String {
        self.md5_hash()
            .unwrap_or_else(|e| panic!("could not hash file {}: {e}", self.path.display()))
    }

    /// [`ensure_dir`](File::ensure_dir), promoting failure to a panic.
    pub fn must_ensure_dir(&self, perm: Permissions) {
        self.ensure_dir(perm).unwrap_or_else(|e| {
            panic!(
                "could not create directory for file {}: {e}",
                self.path.display()
            )
        });
    }

    /// [`renderer`](File::renderer), promoting failure to a panic.
    pub fn must_renderer(&self) -> Renderer {
        self.renderer().unwrap_or_else(|e| {
            panic!(
                "could not read template from file {}: {e}",
                self.path.display()
            )
        })
    }

    /// Panic unless the file exists. Returns the handle for chaining.
    pub fn assert_exists(self) -> Self {
        if !self.exists() {
            panic!("file {} should have existed", self.path.display());
        }
        self
    }

    /// Panic if the file exists. Returns the handle for chaining.
    pub fn assert_not_exists(self) -> Self {
        if self.exists() {
            panic!("file {} should not have existed", self.path.display());
        }
        self
    }

    /// Panic unless the file is absent or zero-length.
    pub fn assert_empty(self) -> Self {
        if !self.is_empty() {
            panic!("file {} should have been empty", self.path.display());
        }
        self
    }

    /// Panic unless the file has content.
    pub fn assert_not_empty(self) -> Self {
        if self.is_empty() {
            panic!("file {} should not have been empty", self.path.display());
        }
        self
    }

    /// Panic unless the file can be opened for reading.
    pub fn assert_readable(self) -> Self {
        if !self.is_readable() {
            panic!("file {} should have been readable", self.path.display());
        }
        self
    }

    /// Panic unless the file can be opened for writing.
    pub fn assert_writable(self) -> Self {
        if !self.is_writable() {
            panic!("file {} should have been writable", self.path.display());
        }
        self
    }

    /// Panic unless the file has exactly the given extension.
    pub fn assert_extension(self, ext: &FileExtension) -> Self {
        if !self.has_extension(ext) {
            panic!(
                "file {} should have had extension {}",
                self.path.display(),
                ext.with_dot()
            );
        }
        self
    }

    /// Panic unless the file's MD5 digest matches `expected`.
    pub fn assert_md5_hash(self, expected: &str) -> Self {
        let actual = self.must_md5_hash();
        if actual != expected {
            panic!(
                "file {} should have had MD5 hash {expected}, got {actual}",
                self.path.display()
            );
        }
        self
    }
}

fn rephase(err: FsError, operation: &'static str) -> FsError {
    match err {
        FsError::Io { path, source, .. } => FsError::Io {
            operation,
            path,
            source,
        },
        other => other,
    }
}

impl Clone for File {
    fn clone(&self) -> Self {
        File {
            path: self.path.clone(),
            create_permissions: self.create_permissions,
            fs: Arc::clone(&self.fs),
        }
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("path", &self.path)
            .field("create_permissions", &self.create_permissions)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Equality is path equality only; the bound backend does not participate.
impl PartialEq for File {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for File {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FsDir;
    use crate::backend::MemoryFs;

    fn memory() -> Arc<dyn Fs> {
        let fs = MemoryFs::new();
        fs.create_dir_all(Path::new("/data"), Permissions::default_dir())
            .unwrap();
        Arc::new(fs)
    }

    fn file(fs: &Arc<dyn Fs>, path: &str) -> File {
        File::with_backend(path, Arc::clone(fs))
    }

    #[test]
    fn exists_is_false_for_missing_and_for_directories() {
        let fs = memory();
        assert!(!file(&fs, "/data/ghost").exists());
        assert!(file(&fs, "/data").not_exists());
    }

    #[test]
    fn set_then_get_content_roundtrip() {
        let fs = memory();
        let f = file(&fs, "/data/notes.txt");
        f.set_string_content("hello world").unwrap();
        assert_eq!(f.string_content().unwrap(), "hello world");
        assert_eq!(f.content().unwrap(), b"hello world");
    }

    #[test]
    fn empty_content_roundtrip() {
        let fs = memory();
        let f = file(&fs, "/data/empty");
        f.set_content(b"").unwrap();
        assert!(f.exists());
        assert!(f.is_empty());
        assert_eq!(f.content().unwrap(), b"");
    }

    #[test]
    fn content_of_missing_file_is_an_error_not_empty() {
        let fs = memory();
        assert!(file(&fs, "/data/ghost").content().unwrap_err().is_not_found());
    }

    #[test]
    fn append_then_read() {
        let fs = memory();
        let f = file(&fs, "/data/log");
        f.set_string_content("a\n").unwrap();
        f.append_string("b").unwrap();
        assert_eq!(f.string_content().unwrap(), "a\nb");
    }

    #[test]
    fn append_never_creates() {
        let fs = memory();
        let f = file(&fs, "/data/ghost");
        assert!(f.append(b"x").unwrap_err().is_not_found());
        assert!(f.not_exists());
    }

    #[test]
    fn append_line_adds_newline() {
        let fs = memory();
        let f = file(&fs, "/data/log");
        f.set_string_content("").unwrap();
        f.append_line("first").unwrap();
        f.append_line("second").unwrap();
        assert_eq!(f.string_content().unwrap(), "first\nsecond\n");
    }

    #[test]
    fn copy_to_preserves_content_and_hash() {
        let fs = memory();
        let src = file(&fs, "/data/src.txt");
        let dst = file(&fs, "/data/dst.txt");
        src.set_string_content("payload").unwrap();

        src.copy_to(&dst).unwrap();
        assert_eq!(dst.string_content().unwrap(), "payload");
        assert_eq!(src.md5_hash().unwrap(), dst.md5_hash().unwrap());
        // source untouched
        assert_eq!(src.string_content().unwrap(), "payload");
    }

    #[test]
    fn copy_to_missing_source_fails() {
        let fs = memory();
        let src = file(&fs, "/data/ghost");
        let dst = file(&fs, "/data/dst");
        assert!(src.copy_to(&dst).unwrap_err().is_not_found());
    }

    #[test]
    fn md5_of_known_content() {
        let fs = memory();
        let f = file(&fs, "/data/hashed");
        f.set_string_content("content").unwrap();
        assert_eq!(
            f.md5_hash().unwrap(),
            "9a0364b9e99bb480dd25e1f0284c8555"
        );

        f.set_string_content("hello world").unwrap();
        assert_eq!(
            f.md5_hash().unwrap(),
            "5eb63bbbe01eeed093cb22bb8f5acdc3"
        );
    }

    #[test]
    fn filesize_zero_when_absent() {
        let fs = memory();
        let f = file(&fs, "/data/ghost");
        assert_eq!(f.filesize(), 0);
        assert!(f.is_empty());
    }

    #[test]
    fn filesize_human_units() {
        let fs = memory();
        let f = file(&fs, "/data/small");
        f.set_content(&[0u8; 512]).unwrap();
        assert_eq!(f.filesize_human(), "512 B");

        f.set_content(&[0u8; 2048]).unwrap();
        assert_eq!(f.filesize_human(), "2.0 KiB");
    }

    #[test]
    fn remove_is_idempotent() {
        let fs = memory();
        let f = file(&fs, "/data/gone");
        f.set_content(b"x").unwrap();
        f.remove().unwrap();
        assert!(f.not_exists());
        f.remove().unwrap();
    }

    #[test]
    fn writable_probe_leaves_no_artifact() {
        let fs = memory();
        let f = file(&fs, "/data/probe");
        assert!(f.is_writable());
        assert!(f.not_exists());

        f.set_string_content("keep me").unwrap();
        assert!(f.is_writable());
        assert_eq!(f.string_content().unwrap(), "keep me");
    }

    #[test]
    fn readable_probe() {
        let fs = memory();
        let f = file(&fs, "/data/readme");
        assert!(!f.is_readable());
        f.set_content(b"x").unwrap();
        assert!(f.is_readable());
    }

    #[test]
    fn extension_of_compound_and_simple_names() {
        let fs = memory();
        assert_eq!(
            file(&fs, "/data/my.tar.gz").extension().unwrap().without_dot(),
            "tar.gz"
        );
        assert_eq!(
            file(&fs, "/data/music.mp3").extension().unwrap().without_dot(),
            "mp3"
        );
        assert!(file(&fs, "/data/my-binary").extension().is_none());
    }

    #[test]
    fn has_extension_requires_whole_compound_suffix() {
        let fs = memory();
        let f = file(&fs, "/data/archive.tar.gz");
        assert!(f.has_extension(&FileExtension::from("tar.gz")));
        assert!(!f.has_extension(&FileExtension::from("gz")));
    }

    #[test]
    fn with_extension_replaces_whole_suffix() {
        let fs = memory();
        assert_eq!(
            file(&fs, "/data/whatever.jpg")
                .with_extension(&FileExtension::from("png"))
                .filename(),
            "whatever.png"
        );
        assert_eq!(
            file(&fs, "/data/whatever.tar.gz")
                .with_extension(&FileExtension::from("zip"))
                .filename(),
            "whatever.zip"
        );
    }

    #[test]
    fn with_extension_appends_when_none() {
        let fs = memory();
        assert_eq!(
            file(&fs, "/data/plain")
                .with_extension(&FileExtension::from("log"))
                .filename(),
            "plain.log"
        );
    }

    #[test]
    fn without_extension_strips_tar_aware_suffix() {
        let fs = memory();
        assert_eq!(
            file(&fs, "/data/bundle.tar.gz").without_extension().filename(),
            "bundle"
        );
        assert_eq!(
            file(&fs, "/data/plain").without_extension().filename(),
            "plain"
        );
    }

    #[test]
    fn hidden_file_detection() {
        let fs = memory();
        assert!(file(&fs, "/data/.gitignore").is_hidden());
        assert!(!file(&fs, "/data/visible").is_hidden());
    }

    #[test]
    fn dir_shares_backend() {
        let fs = memory();
        let f = file(&fs, "/data/sub/leaf.txt");
        f.ensure_dir(Permissions::default_dir()).unwrap();
        f.set_content(b"x").unwrap();

        let parent = f.dir();
        assert_eq!(parent.path(), Path::new("/data/sub"));
        assert!(!parent.is_empty());
    }

    #[test]
    fn with_filename_is_a_sibling_transform() {
        let fs = memory();
        let f = file(&fs, "/data/report.txt");
        let sibling = f.with_filename("out.pdf");
        assert_eq!(sibling.path(), Path::new("/data/out.pdf"));
        // transform only, nothing touched on the backend
        assert!(sibling.not_exists());
    }

    #[test]
    fn in_dir_keeps_the_name_and_takes_the_target_backend() {
        let fs = memory();
        let f = file(&fs, "/data/report.txt");
        let run = crate::Dir::with_backend("/run/", Arc::clone(&fs));
        let moved = f.in_dir(&run);
        assert_eq!(moved.path(), Path::new("/run/report.txt"));

        let other: Arc<dyn Fs> = Arc::new(MemoryFs::new());
        let elsewhere = crate::Dir::with_backend("/elsewhere", Arc::clone(&other));
        elsewhere.must_ensure(Permissions::default_dir());
        f.set_content(b"payload").unwrap();
        let ported = f.in_dir(&elsewhere);
        // bound to the target's tree, so the source content is not visible
        assert!(ported.not_exists());
    }

    #[test]
    fn relative_to_containing_dir() {
        let fs = memory();
        let f = file(&fs, "/data/sub/leaf.txt");
        let d = crate::Dir::with_backend("/data", Arc::clone(&fs));
        assert_eq!(f.relative_to(&d), PathBuf::from("sub/leaf.txt"));

        let elsewhere = crate::Dir::with_backend("/other", Arc::clone(&fs));
        assert_eq!(f.relative_to(&elsewhere), PathBuf::from("/data/sub/leaf.txt"));
    }

    #[test]
    fn equality_is_path_only() {
        let a = file(&memory(), "/data/same");
        let b = file(&memory(), "/data/same");
        assert_eq!(a, b);
        assert_ne!(a, file(&memory(), "/data/other"));
    }

    #[test]
    fn assert_family_chains() {
        let fs = memory();
        let f = file(&fs, "/data/chained.txt");
        f.set_string_content("content").unwrap();

        f.clone()
            .assert_exists()
            .assert_not_empty()
            .assert_readable()
            .assert_md5_hash("9a0364b9e99bb480dd25e1f0284c8555");
    }

    #[test]
    #[should_panic(expected = "should have existed")]
    fn assert_exists_panics_for_missing() {
        let fs = memory();
        file(&fs, "/data/ghost").assert_exists();
    }

    #[test]
    #[should_panic(expected = "should have had MD5 hash")]
    fn assert_md5_hash_panics_on_mismatch() {
        let fs = memory();
        let f = file(&fs, "/data/hashed");
        f.set_string_content("content").unwrap();
        f.assert_md5_hash("deadbeef");
    }

    #[test]
    #[should_panic(expected = "should have had extension")]
    fn assert_extension_panics_on_mismatch() {
        let fs = memory();
        file(&fs, "/data/photo.png").assert_extension(&FileExtension::from("jpg"));
    }
}
