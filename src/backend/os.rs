//! Backend adapter over the real OS filesystem (`std::fs`).

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::{
    DirEntry, FileType, FsDir, FsError, FsRead, FsWrite, Metadata, OpenFlags, Permissions,
    ReadDirIter,
};

/// The real OS filesystem.
///
/// A zero-sized adapter: all state lives in the operating system. Cheap to
/// construct per handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl OsFs {
    /// Create a new OS filesystem backend.
    pub fn new() -> Self {
        OsFs
    }
}

fn convert_metadata(meta: &fs::Metadata) -> Metadata {
    let file_type = if meta.is_dir() {
        FileType::Directory
    } else if meta.is_symlink() {
        FileType::Symlink
    } else {
        FileType::File
    };

    Metadata {
        file_type,
        size: meta.len(),
        permissions: convert_permissions(meta),
        modified: meta.modified().unwrap_or(std::time::SystemTime::UNIX_EPOCH),
    }
}

#[cfg(unix)]
fn convert_permissions(meta: &fs::Metadata) -> Permissions {
    use std::os::unix::fs::PermissionsExt;
    Permissions::from_mode(meta.permissions().mode())
}

#[cfg(not(unix))]
fn convert_permissions(meta: &fs::Metadata) -> Permissions {
    if meta.permissions().readonly() {
        Permissions::from_mode(0o444)
    } else {
        Permissions::default_file()
    }
}

impl FsRead for OsFs {
    fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        let meta = fs::metadata(path).map_err(|e| FsError::io("stat", path, e))?;
        Ok(convert_metadata(&meta))
    }

    fn open_read(&self, path: &Path) -> Result<Box<dyn Read + Send>, FsError> {
        let file = fs::File::open(path).map_err(|e| FsError::io("open", path, e))?;
        if file
            .metadata()
            .map_err(|e| FsError::io("stat", path, e))?
            .is_dir()
        {
            return Err(FsError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(Box::new(file))
    }
}

impl FsWrite for OsFs {
    fn open_write(
        &self,
        path: &Path,
        flags: OpenFlags,
        perm: Permissions,
    ) -> Result<Box<dyn Write + Send>, FsError> {
        let mut options = fs::OpenOptions::new();
        options
            .write(flags.write)
            .create(flags.create)
            .truncate(flags.truncate)
            .append(flags.append);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(perm.mode());
        }
        #[cfg(not(unix))]
        let _ = perm;

        let file = options
            .open(path)
            .map_err(|e| FsError::io("open for writing", path, e))?;
        Ok(Box::new(file))
    }

    fn remove_file(&self, path: &Path) -> Result<(), FsError> {
        fs::remove_file(path).map_err(|e| FsError::io("remove", path, e))
    }
}

impl FsDir for OsFs {
    fn read_dir(&self, path: &Path) -> Result<ReadDirIter, FsError> {
        let reader = fs::read_dir(path).map_err(|e| FsError::io("read_dir", path, e))?;

        let owned_path = path.to_path_buf();
        Ok(ReadDirIter::new(reader.map(move |entry| {
            let entry = entry.map_err(|e| FsError::io("read_dir entry", &owned_path, e))?;
            let file_type = match entry.file_type() {
                Ok(ft) if ft.is_dir() => FileType::Directory,
                Ok(ft) if ft.is_symlink() => FileType::Symlink,
                _ => FileType::File,
            };
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            Ok(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                file_type,
                size,
            })
        })))
    }

    fn create_dir_all(&self, path: &Path, perm: Permissions) -> Result<(), FsError> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(perm.mode());
        }
        #[cfg(not(unix))]
        let _ = perm;

        builder
            .create(path)
            .map_err(|e| FsError::io("create directory", path, e))
    }

    fn remove_all(&self, path: &Path) -> Result<(), FsError> {
        let meta = fs::metadata(path).map_err(|e| FsError::io("stat", path, e))?;
        if meta.is_dir() {
            fs::remove_dir_all(path).map_err(|e| FsError::io("remove recursively", path, e))
        } else {
            fs::remove_file(path).map_err(|e| FsError::io("remove", path, e))
        }
    }
}
