//! In-memory filesystem backend for tests and fixtures.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use crate::{
    DirEntry, FileType, FsDir, FsError, FsRead, FsWrite, Metadata, OpenFlags, Permissions,
    ReadDirIter,
};

#[derive(Debug, Clone)]
struct FileNode {
    data: Vec<u8>,
    permissions: Permissions,
    modified: SystemTime,
}

#[derive(Debug)]
struct State {
    files: BTreeMap<PathBuf, FileNode>,
    dirs: BTreeSet<PathBuf>,
}

impl State {
    fn new() -> Self {
        let mut dirs = BTreeSet::new();
        dirs.insert(PathBuf::from("/"));
        State {
            files: BTreeMap::new(),
            dirs,
        }
    }
}

/// An in-memory filesystem.
///
/// Backs the whole tree with a map behind an `RwLock`, so handles bound to a
/// clone of the same `MemoryFs` see one shared tree. Intended for tests: an
/// entire subtree of lookups can run against it without touching the disk.
///
/// The root directory `/` always exists.
#[derive(Debug, Clone)]
pub struct MemoryFs {
    state: Arc<RwLock<State>>,
}

impl MemoryFs {
    /// Create an empty in-memory filesystem containing only the root.
    pub fn new() -> Self {
        MemoryFs {
            state: Arc::new(RwLock::new(State::new())),
        }
    }
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_poisoned(path: &Path) -> FsError {
    FsError::io(
        "lock",
        path,
        io::Error::other("filesystem state lock poisoned"),
    )
}

impl FsRead for MemoryFs {
    fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        let state = self.state.read().map_err(|_| lock_poisoned(path))?;
        if state.dirs.contains(path) {
            return Ok(Metadata {
                file_type: FileType::Directory,
                size: 0,
                permissions: Permissions::default_dir(),
                modified: SystemTime::UNIX_EPOCH,
            });
        }
        match state.files.get(path) {
            Some(node) => Ok(Metadata {
                file_type: FileType::File,
                size: node.data.len() as u64,
                permissions: node.permissions,
                modified: node.modified,
            }),
            None => Err(FsError::NotFound {
                path: path.to_path_buf(),
            }),
        }
    }

    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>, FsError> {
        let state = self.state.read().map_err(|_| lock_poisoned(path))?;
        if state.dirs.contains(path) {
            return Err(FsError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        match state.files.get(path) {
            Some(node) => Ok(Box::new(io::Cursor::new(node.data.clone()))),
            None => Err(FsError::NotFound {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Writer that commits into the shared tree as bytes arrive.
///
/// Holds no buffer of its own, so content written through it is visible to
/// concurrent readers immediately, matching how the OS backend behaves.
struct MemWriter {
    state: Arc<RwLock<State>>,
    path: PathBuf,
    append: bool,
    pos: usize,
}

impl Write for MemWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .state
            .write()
            .map_err(|_| io::Error::other("filesystem state lock poisoned"))?;
        let node = state.files.get_mut(&self.path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} was removed while open", self.path.display()),
            )
        })?;
        if self.append {
            node.data.extend_from_slice(buf);
        } else {
            let end = self.pos + buf.len();
            if node.data.len() < end {
                node.data.resize(end, 0);
            }
            node.data[self.pos..end].copy_from_slice(buf);
            self.pos = end;
        }
        node.modified = SystemTime::now();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl FsWrite for MemoryFs {
    fn open_write(
        &self,
        path: &Path,
        flags: OpenFlags,
        perm: Permissions,
    ) -> Result<Box<dyn Write + Send>, FsError> {
        let mut state = self.state.write().map_err(|_| lock_poisoned(path))?;
        if state.dirs.contains(path) {
            return Err(FsError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        if !state.files.contains_key(path) {
            if !flags.create {
                return Err(FsError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            let parent = path.parent().ok_or_else(|| FsError::NotFound {
                path: path.to_path_buf(),
            })?;
            if !state.dirs.contains(parent) {
                return Err(FsError::NotFound {
                    path: parent.to_path_buf(),
                });
            }
            state.files.insert(
                path.to_path_buf(),
                FileNode {
                    data: Vec::new(),
                    permissions: perm,
                    modified: SystemTime::now(),
                },
            );
        } else if flags.truncate {
            // contains_key above guarantees the entry exists
            if let Some(node) = state.files.get_mut(path) {
                node.data.clear();
                node.modified = SystemTime::now();
            }
        }
        drop(state);

        Ok(Box::new(MemWriter {
            state: Arc::clone(&self.state),
            path: path.to_path_buf(),
            append: flags.append,
            pos: 0,
        }))
    }

    fn remove_file(&self, path: &Path) -> Result<(), FsError> {
        let mut state = self.state.write().map_err(|_| lock_poisoned(path))?;
        if state.dirs.contains(path) {
            return Err(FsError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        match state.files.remove(path) {
            Some(_) => Ok(()),
            None => Err(FsError::NotFound {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl FsDir for MemoryFs {
    fn read_dir(&self, path: &Path) -> Result<ReadDirIter, FsError> {
        let state = self.state.read().map_err(|_| lock_poisoned(path))?;
        if state.files.contains_key(path) {
            return Err(FsError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        if !state.dirs.contains(path) {
            return Err(FsError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let mut entries: Vec<DirEntry> = Vec::new();
        for (file_path, node) in &state.files {
            if file_path.parent() == Some(path) {
                entries.push(DirEntry {
                    name: file_path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    path: file_path.clone(),
                    file_type: FileType::File,
                    size: node.data.len() as u64,
                });
            }
        }
        for dir_path in &state.dirs {
            if dir_path.parent() == Some(path) {
                entries.push(DirEntry {
                    name: dir_path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    path: dir_path.clone(),
                    file_type: FileType::Directory,
                    size: 0,
                });
            }
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(ReadDirIter::from_vec(entries.into_iter().map(Ok).collect()))
    }

    fn create_dir_all(&self, path: &Path, _perm: Permissions) -> Result<(), FsError> {
        let mut state = self.state.write().map_err(|_| lock_poisoned(path))?;
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if state.files.contains_key(&current) {
                return Err(FsError::NotADirectory {
                    path: current.clone(),
                });
            }
            state.dirs.insert(current.clone());
        }
        Ok(())
    }

    fn remove_all(&self, path: &Path) -> Result<(), FsError> {
        let mut state = self.state.write().map_err(|_| lock_poisoned(path))?;
        let existed = state.dirs.contains(path) || state.files.contains_key(path);
        if !existed {
            return Err(FsError::NotFound {
                path: path.to_path_buf(),
            });
        }
        // starts_with also matches the path itself
        state.files.retain(|p, _| !p.starts_with(path));
        state.dirs.retain(|p| !p.starts_with(path));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fs_with_root(dir: &str) -> MemoryFs {
        let fs = MemoryFs::new();
        fs.create_dir_all(Path::new(dir), Permissions::default_dir())
            .unwrap();
        fs
    }

    #[test]
    fn root_always_exists() {
        let fs = MemoryFs::new();
        assert!(fs.stat(Path::new("/")).unwrap().is_dir());
    }

    #[test]
    fn write_then_read_roundtrip() {
        let fs = fs_with_root("/data");
        fs.write(
            Path::new("/data/file.txt"),
            b"hello",
            Permissions::default_file(),
        )
        .unwrap();
        assert_eq!(fs.read(Path::new("/data/file.txt")).unwrap(), b"hello");
    }

    #[test]
    fn write_requires_existing_parent() {
        let fs = MemoryFs::new();
        let err = fs
            .write(
                Path::new("/missing/file.txt"),
                b"x",
                Permissions::default_file(),
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn clones_share_one_tree() {
        let fs = fs_with_root("/shared");
        let other = fs.clone();
        fs.write(
            Path::new("/shared/a"),
            b"seen",
            Permissions::default_file(),
        )
        .unwrap();
        assert_eq!(other.read(Path::new("/shared/a")).unwrap(), b"seen");
    }

    #[test]
    fn append_never_creates() {
        let fs = fs_with_root("/logs");
        assert!(
            fs.append(Path::new("/logs/app.log"), b"line")
                .unwrap_err()
                .is_not_found()
        );

        fs.write(
            Path::new("/logs/app.log"),
            b"first\n",
            Permissions::default_file(),
        )
        .unwrap();
        fs.append(Path::new("/logs/app.log"), b"second").unwrap();
        assert_eq!(
            fs.read(Path::new("/logs/app.log")).unwrap(),
            b"first\nsecond"
        );
    }

    #[test]
    fn truncating_write_replaces_content() {
        let fs = fs_with_root("/data");
        let path = Path::new("/data/f");
        fs.write(path, b"a longer original", Permissions::default_file())
            .unwrap();
        fs.write(path, b"short", Permissions::default_file())
            .unwrap();
        assert_eq!(fs.read(path).unwrap(), b"short");
    }

    #[test]
    fn touch_open_preserves_existing_content() {
        let fs = fs_with_root("/data");
        let path = Path::new("/data/keep");
        fs.write(path, b"precious", Permissions::default_file())
            .unwrap();
        let writer = fs
            .open_write(path, OpenFlags::TOUCH, Permissions::default_file())
            .unwrap();
        drop(writer);
        assert_eq!(fs.read(path).unwrap(), b"precious");
    }

    #[test]
    fn read_dir_sorted_and_direct_children_only() {
        let fs = fs_with_root("/top/nested");
        fs.write(Path::new("/top/b.txt"), b"", Permissions::default_file())
            .unwrap();
        fs.write(Path::new("/top/a.txt"), b"", Permissions::default_file())
            .unwrap();
        fs.write(
            Path::new("/top/nested/deep.txt"),
            b"",
            Permissions::default_file(),
        )
        .unwrap();

        let entries = fs
            .read_dir(Path::new("/top"))
            .unwrap()
            .collect_all()
            .unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a.txt", "b.txt", "nested"]);
    }

    #[test]
    fn read_dir_on_file_is_not_a_directory() {
        let fs = fs_with_root("/data");
        fs.write(Path::new("/data/f"), b"", Permissions::default_file())
            .unwrap();
        assert!(matches!(
            fs.read_dir(Path::new("/data/f")),
            Err(FsError::NotADirectory { .. })
        ));
    }

    #[test]
    fn create_dir_all_conflicting_file_fails() {
        let fs = fs_with_root("/data");
        fs.write(Path::new("/data/f"), b"", Permissions::default_file())
            .unwrap();
        assert!(matches!(
            fs.create_dir_all(Path::new("/data/f/sub"), Permissions::default_dir()),
            Err(FsError::NotADirectory { .. })
        ));
    }

    #[test]
    fn remove_all_removes_subtree() {
        let fs = fs_with_root("/top/nested");
        fs.write(Path::new("/top/f"), b"", Permissions::default_file())
            .unwrap();
        fs.write(
            Path::new("/top/nested/g"),
            b"",
            Permissions::default_file(),
        )
        .unwrap();

        fs.remove_all(Path::new("/top")).unwrap();
        assert!(!fs.exists(Path::new("/top")).unwrap());
        assert!(!fs.exists(Path::new("/top/nested/g")).unwrap());
        // root untouched
        assert!(fs.exists(Path::new("/")).unwrap());
    }

    #[test]
    fn remove_all_missing_is_not_found() {
        let fs = MemoryFs::new();
        assert!(
            fs.remove_all(Path::new("/ghost"))
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn remove_file_rejects_directory() {
        let fs = fs_with_root("/data");
        assert!(matches!(
            fs.remove_file(Path::new("/data")),
            Err(FsError::NotAFile { .. })
        ));
    }

    #[test]
    fn stat_reports_size() {
        let fs = fs_with_root("/data");
        fs.write(
            Path::new("/data/sized"),
            b"12345",
            Permissions::default_file(),
        )
        .unwrap();
        assert_eq!(fs.stat(Path::new("/data/sized")).unwrap().size, 5);
    }
}
