//! Raw path strings to canonical absolute paths.
//!
//! Every handle runs its input through [`resolve`] exactly once at
//! construction time. The canonical form is: home-expanded, absolute
//! (joined onto the process working directory when needed), with all
//! trailing separators stripped. No `.`/`..` collapsing happens here —
//! callers are responsible for passing sane relative fragments.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Resolve a raw path string into its canonical absolute form.
///
/// Resolution is deterministic: the same input against the same working
/// directory and home directory always yields the same output.
///
/// # Panics
///
/// Panics when the input carries a `~` marker but the home directory cannot
/// be determined, or when the input is relative and the working directory
/// cannot be read. Both are unrecoverable environment failures; handles are
/// infallible values by construction.
pub(crate) fn resolve(raw: &str) -> PathBuf {
    let expanded = expand_home(raw);

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = std::env::current_dir()
            .unwrap_or_else(|e| panic!("could not determine working directory: {e}"));
        cwd.join(expanded)
    };

    strip_trailing_separators(absolute)
}

/// Join a relative fragment onto an already-canonical base path.
///
/// The base is trusted (it came out of [`resolve`]); only the trailing
/// separators of the joined result need normalizing.
pub(crate) fn join(base: &Path, relative: &Path) -> PathBuf {
    strip_trailing_separators(base.join(relative))
}

/// Expand a leading `~` or `~/...` marker to the process home directory.
///
/// A lone `~` collapses to the home directory itself. Markers naming another
/// user (`~bob/...`) are left verbatim.
fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        return home_dir();
    }
    if let Some(rest) = raw.strip_prefix('~') {
        if let Some(rest) = rest.strip_prefix(MAIN_SEPARATOR) {
            return home_dir().join(rest);
        }
    }
    PathBuf::from(raw)
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| panic!("could not determine home directory to expand '~'"))
}

/// Strip every trailing path separator, keeping a bare root intact.
fn strip_trailing_separators(path: PathBuf) -> PathBuf {
    let raw = path.to_string_lossy();
    let trimmed = raw.trim_end_matches(MAIN_SEPARATOR);
    if trimmed.is_empty() {
        // the path was the root (or a run of separators)
        return PathBuf::from(MAIN_SEPARATOR.to_string());
    }
    if trimmed.len() == raw.len() {
        path
    } else {
        PathBuf::from(trimmed)
    }
}

/// The last path segment as a displayable string, empty for the root.
pub(crate) fn last_segment(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The parent of a canonical path; the root is its own parent.
pub(crate) fn parent_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if p.components().next().is_some() => p.to_path_buf(),
        Some(_) | None => PathBuf::from(MAIN_SEPARATOR.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_input_is_never_prefixed_with_cwd() {
        assert_eq!(resolve("/var/log"), PathBuf::from("/var/log"));
    }

    #[test]
    fn relative_input_joins_onto_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve("notes.txt"), cwd.join("notes.txt"));
    }

    #[test]
    fn trailing_separators_are_stripped() {
        assert_eq!(resolve("/tmp/"), PathBuf::from("/tmp"));
        assert_eq!(resolve("/tmp///"), PathBuf::from("/tmp"));
    }

    #[test]
    fn root_survives_stripping() {
        assert_eq!(resolve("/"), PathBuf::from("/"));
    }

    #[test]
    fn resolution_is_idempotent() {
        let first = resolve("some/relative/path");
        let second = resolve("some/relative/path");
        assert_eq!(first, second);
    }

    #[test]
    fn lone_tilde_collapses_to_home_without_trailing_separator() {
        if let Some(home) = dirs::home_dir() {
            let resolved = resolve("~");
            assert_eq!(resolved, strip_trailing_separators(home));
            assert!(!resolved.to_string_lossy().ends_with(MAIN_SEPARATOR));
        }
    }

    #[test]
    fn tilde_prefix_expands_under_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(resolve("~/projects"), home.join("projects"));
        }
    }

    #[test]
    fn tilde_naming_another_user_is_left_verbatim() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve("~bob/data"), cwd.join("~bob/data"));
    }

    #[test]
    fn join_strips_trailing_separators_of_fragment() {
        assert_eq!(
            join(Path::new("/base"), Path::new("child/")),
            PathBuf::from("/base/child")
        );
    }

    #[test]
    fn parent_of_root_is_root() {
        assert_eq!(parent_of(Path::new("/")), PathBuf::from("/"));
        assert_eq!(parent_of(Path::new("/tmp")), PathBuf::from("/"));
        assert_eq!(parent_of(Path::new("/a/b")), PathBuf::from("/a"));
    }

    #[test]
    fn last_segment_of_paths() {
        assert_eq!(last_segment(Path::new("/a/b/c.txt")), "c.txt");
        assert_eq!(last_segment(Path::new("/")), "");
    }
}
