//! File extension value type and tar-aware suffix parsing.
//!
//! An extension is stored in its "bare" form without a leading dot (`png`,
//! `tar.gz`). Compound `.tar.*` suffixes are treated as one atomic unit
//! during detection, extraction, and replacement: `my.tar.gz` has the single
//! extension `tar.gz`, not a chain of two.

use std::fmt;
use std::sync::LazyLock;

/// A file extension in bare form (no leading dot).
///
/// Construction strips at most one leading dot, so `"png"` and `".png"` are
/// the same value and `".tar.gz"` keeps its internal dot:
///
/// ```rust
/// use fluent_fs::FileExtension;
///
/// assert_eq!(FileExtension::from("jpg"), FileExtension::from(".jpg"));
/// assert_eq!(FileExtension::from(".tar.gz").with_dot(), ".tar.gz");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileExtension {
    extension: String,
}

impl FileExtension {
    /// The dotted form, always with exactly one leading dot.
    pub fn with_dot(&self) -> String {
        format!(".{}", self.extension)
    }

    /// The bare form with no leading dot.
    pub fn without_dot(&self) -> &str {
        &self.extension
    }
}

impl From<&str> for FileExtension {
    fn from(extension: &str) -> Self {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        FileExtension {
            extension: extension.to_string(),
        }
    }
}

impl From<String> for FileExtension {
    fn from(extension: String) -> Self {
        FileExtension::from(extension.as_str())
    }
}

impl fmt::Display for FileExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension)
    }
}

/// `pdf`
pub static EXT_PDF: LazyLock<FileExtension> = LazyLock::new(|| FileExtension::from("pdf"));
/// `jpg`
pub static EXT_JPG: LazyLock<FileExtension> = LazyLock::new(|| FileExtension::from("jpg"));
/// `png`
pub static EXT_PNG: LazyLock<FileExtension> = LazyLock::new(|| FileExtension::from("png"));
/// `log`
pub static EXT_LOG: LazyLock<FileExtension> = LazyLock::new(|| FileExtension::from("log"));
/// `zip`
pub static EXT_ZIP: LazyLock<FileExtension> = LazyLock::new(|| FileExtension::from("zip"));

/// Whether a filename has any extension at all.
///
/// The first character is excluded before looking for a dot, so a
/// leading-dot hidden-file marker never counts as an extension marker:
/// `.gitignore` has no extension, `.tar.gz` does. Empty and single-character
/// filenames have no extension.
pub(crate) fn has_any_extension(filename: &str) -> bool {
    filename.chars().skip(1).any(|c| c == '.')
}

/// The dotted extension suffix of a filename, tar-aware.
///
/// Matches "optionally `.tar` immediately followed by one final dot-segment"
/// at the end of the name: `my.tar.gz` yields `.tar.gz`, `music.mp3` yields
/// `.mp3`. Returns `None` when the filename has no extension or when the
/// final segment is empty (`file.`).
pub(crate) fn extension_suffix(filename: &str) -> Option<&str> {
    if !has_any_extension(filename) {
        return None;
    }
    // skip the first character so a hidden-file dot is never the match
    let first_len = filename.chars().next().map(char::len_utf8).unwrap_or(0);
    let last_dot = filename[first_len..].rfind('.')? + first_len;
    if last_dot + 1 == filename.len() {
        // trailing dot, empty final segment
        return None;
    }

    let stem = &filename[..last_dot];
    if stem.ends_with(".tar") {
        Some(&filename[last_dot - 4..])
    } else {
        Some(&filename[last_dot..])
    }
}
