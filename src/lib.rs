//! # fluent-fs
//!
//! Fluent, assertion-friendly file and directory handles over pluggable
//! filesystem backends.
//!
//! Every operation runs identically against the real OS filesystem or an
//! in-memory fake, selected when a handle is constructed. Paths are resolved
//! once at construction: home-expanded, made absolute, trailing separators
//! stripped.
//!
//! ## Handles
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`File`] | One file: content I/O, copy, MD5, extension transforms |
//! | [`Dir`] | One directory: creation, clearing, child lookups |
//! | [`Renderer`] | Template source + data + helper functions |
//!
//! ## Backends
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`OsFs`] | The real filesystem via `std::fs` |
//! | [`MemoryFs`] | A shared in-memory tree for tests |
//!
//! Backends implement the [`FsRead`] + [`FsWrite`] + [`FsDir`] component
//! traits and get the [`Fs`] composite through a blanket impl. A [`Dir`]'s
//! children share its backend, so a whole subtree of lookups can run against
//! one `MemoryFs`.
//!
//! ## Error tiers
//!
//! Recoverable failures are [`FsError`] values. The `assert_*` family
//! promotes boolean checks to panics for fail-fast test and setup code, and
//! `must_*` wrappers promote recoverable errors the same way; both carry a
//! message naming the handle and the violated expectation.
//!
//! ## Example
//!
//! ```rust
//! use fluent_fs::{Dir, Fs, MemoryFs, Permissions};
//! use std::sync::Arc;
//!
//! let backend: Arc<dyn Fs> = Arc::new(MemoryFs::new());
//! let testdir = Dir::with_backend("/tmp/testdir", backend);
//!
//! testdir.must_ensure(Permissions::default_dir());
//! let testfile = testdir.must_file_at("testfile");
//! testfile.set_string_content("content").unwrap();
//!
//! testdir.assert_not_empty();
//! testfile
//!     .assert_exists()
//!     .assert_readable()
//!     .assert_not_empty()
//!     .assert_md5_hash("9a0364b9e99bb480dd25e1f0284c8555");
//! ```

mod backend;
mod dir;
mod error;
mod extension;
mod file;
mod path_resolver;
mod renderer;
mod traits;
mod types;

pub use backend::{MemoryFs, OsFs};
pub use dir::Dir;
pub use error::FsError;
pub use extension::{EXT_JPG, EXT_LOG, EXT_PDF, EXT_PNG, EXT_ZIP, FileExtension};
pub use file::File;
pub use renderer::Renderer;
pub use traits::{Fs, FsDir, FsRead, FsWrite, ReadDirIter};
pub use types::{DirEntry, FileType, Metadata, OpenFlags, Permissions};
