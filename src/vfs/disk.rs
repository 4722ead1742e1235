//! On-disk backend.
//!
//! Directory listing goes through `walkdir` at depth one with name ordering,
//! which gives stable output across platforms. Symlinks are not followed when
//! classifying entries; they show up as [`EntryKind::Other`].

use super::backend::{DirEntry, EntryKind, FsBackend, FsError};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Default, Clone, Copy)]
pub struct DiskBackend;

impl DiskBackend {
    pub fn new() -> Self {
        Self
    }
}

impl FsBackend for DiskBackend {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>, FsError> {
        if !path.is_dir() {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                let entry = entry.map_err(|e| FsError::io(path, e.into()))?;
                let file_type = entry.file_type();
                let kind = if file_type.is_dir() {
                    EntryKind::Dir
                } else if file_type.is_file() {
                    EntryKind::File
                } else {
                    EntryKind::Other
                };
                Ok(DirEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    path: entry.into_path(),
                    kind,
                })
            })
            .collect()
    }

    fn read_to_string(&self, path: &Path) -> Result<String, FsError> {
        let bytes = fs::read(path).map_err(|e| FsError::io(path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        fs::copy(from, to).map(|_| ()).map_err(|e| FsError::io(from, e))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), FsError> {
        fs::write(path, contents).map_err(|e| FsError::io(path, e))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        fs::create_dir_all(path).map_err(|e| FsError::io(path, e))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), FsError> {
        fs::remove_dir_all(path).map_err(|e| FsError::io(path, e))
    }
}
