//! # Filesystem Traits
//!
//! The capability boundary every backend implements.
//!
//! ## Component Traits
//!
//! | Trait | Methods |
//! |-------|---------|
//! | [`FsRead`] | `stat`, `open_read` (+ default `exists`, `read`) |
//! | [`FsWrite`] | `open_write`, `remove_file` (+ default `write`, `append`) |
//! | [`FsDir`] | `read_dir`, `create_dir_all`, `remove_all` |
//!
//! ## Blanket Implementation
//!
//! [`Fs`] has a blanket implementation: implement the three component traits
//! and you get the composite for free. [`File`](crate::File) and
//! [`Dir`](crate::Dir) handles are polymorphic over `Arc<dyn Fs>` and never
//! branch on which backend is bound — that is what lets an entire subtree of
//! lookups run against one in-memory fake.
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` and take `&self`; backends use interior
//! mutability for thread-safe state management.

mod fs_dir;
mod fs_read;
mod fs_write;

pub use fs_dir::{FsDir, ReadDirIter};
pub use fs_read::FsRead;
pub use fs_write::FsWrite;

/// The complete filesystem capability a handle needs.
///
/// Combines reading ([`FsRead`]), writing ([`FsWrite`]), and directory
/// operations ([`FsDir`]). Any backend satisfying it is interchangeable at
/// runtime with no code change to the handles.
///
/// # Blanket Implementation
///
/// Automatically implemented for any type that implements all three component
/// traits. You never implement `Fs` directly.
///
/// # Example
///
/// ```rust
/// use fluent_fs::{Fs, FsError, Permissions};
/// use std::path::Path;
///
/// fn touch<B: Fs>(backend: &B, path: &Path) -> Result<(), FsError> {
///     backend.write(path, b"", Permissions::default_file())
/// }
/// ```
pub trait Fs: FsRead + FsWrite + FsDir {}

// Blanket implementation - any type implementing all three gets Fs for free
impl<T: FsRead + FsWrite + FsDir> Fs for T {}
