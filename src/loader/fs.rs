use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};

/// Read-only access to configuration directories.
///
/// The loader only needs to list a directory and read whole files, so tests
/// can swap the disk for [`MemoryFileSystem`].
pub trait FileSystem {
    /// Paths of the regular files directly inside `dir`.
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                paths.push(entry.path());
            }
        }
        Ok(paths)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// In-memory file tree for tests.
///
/// Directories exist implicitly as ancestors of the stored files.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.files.keys().any(|path| path.starts_with(dir)) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", dir.display()),
            ));
        }
        Ok(self
            .files
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_read_dir() {
        let fs = MemoryFileSystem::new()
            .with_file("mod/main.tf", "a = 1")
            .with_file("mod/nested/other.tf", "b = 2")
            .with_file("elsewhere/x.tf", "");

        let paths = fs.read_dir(Path::new("mod")).unwrap();
        assert_eq!(paths, vec![PathBuf::from("mod/main.tf")]);

        let paths = fs.read_dir(Path::new("mod/nested")).unwrap();
        assert_eq!(paths, vec![PathBuf::from("mod/nested/other.tf")]);

        let err = fs.read_dir(Path::new("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_memory_read_file() {
        let fs = MemoryFileSystem::new().with_file("mod/main.tf", "a = 1");
        assert_eq!(fs.read_file(Path::new("mod/main.tf")).unwrap(), b"a = 1");
        assert!(fs.read_file(Path::new("mod/other.tf")).is_err());
    }

    #[test]
    fn test_os_read_dir_lists_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.tf"), "a = 1").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let paths = OsFileSystem.read_dir(dir.path()).unwrap();
        assert_eq!(paths, vec![dir.path().join("main.tf")]);
        assert_eq!(
            OsFileSystem.read_file(&paths[0]).unwrap(),
            b"a = 1".to_vec()
        );
    }
}
