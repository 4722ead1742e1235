//! Filesystem access for the build pipeline.
//!
//! | Backend | Use |
//! |---|---|
//! | [`DiskBackend`] | Production: real files, entries sorted by name |
//! | [`ReadOnly`] | `check` command: reads pass through, writes are dropped |
//! | `MemoryBackend` | Tests only: an in-memory tree |
//!
//! The pipeline only ever talks to [`FsBackend`], so walking, rendering and
//! output mapping can be exercised without touching the disk.

pub mod backend;
pub mod disk;

pub use backend::{DirEntry, EntryKind, FsBackend, FsError, ReadOnly};
pub use disk::DiskBackend;
