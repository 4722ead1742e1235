//! Filesystem backend trait and shared types.
//!
//! The [`FsBackend`] trait is the only way the pipeline touches files. It
//! exposes directory listing with a minimal entry model (name, path, kind)
//! plus the handful of read/write operations the build needs.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),
}

impl FsError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        FsError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// What a directory entry is, without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    /// Symlinks, sockets and anything else that is neither.
    Other,
}

/// An immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Filesystem operations used by the build pipeline.
///
/// `read_dir` must return entries ordered by name so builds are reproducible
/// regardless of the underlying directory order.
pub trait FsBackend {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// List the immediate entries of a directory (non-recursive).
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>, FsError>;

    /// Read a file as text. Invalid UTF-8 sequences become U+FFFD.
    fn read_to_string(&self, path: &Path) -> Result<String, FsError>;

    /// Byte-for-byte copy. The destination's parent must already exist.
    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), FsError>;

    /// Write a UTF-8 file. The parent directory must already exist.
    fn write(&self, path: &Path, contents: &str) -> Result<(), FsError>;

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError>;

    fn remove_dir_all(&self, path: &Path) -> Result<(), FsError>;
}

/// Wraps a backend so that every read goes through and every mutation is
/// silently dropped.
///
/// Running the pipeline against a `ReadOnly` backend performs every lookup and
/// render (so missing partials still fail) without deleting or writing output.
pub struct ReadOnly<B> {
    inner: B,
}

impl<B> ReadOnly<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }
}

impl<B: FsBackend> FsBackend for ReadOnly<B> {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>, FsError> {
        self.inner.read_dir(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, FsError> {
        self.inner.read_to_string(path)
    }

    fn copy_file(&self, _from: &Path, _to: &Path) -> Result<(), FsError> {
        Ok(())
    }

    fn write(&self, _path: &Path, _contents: &str) -> Result<(), FsError> {
        Ok(())
    }

    fn create_dir_all(&self, _path: &Path) -> Result<(), FsError> {
        Ok(())
    }

    fn remove_dir_all(&self, _path: &Path) -> Result<(), FsError> {
        Ok(())
    }
}
