//! Named HTML partials with per-language overlay.
//!
//! Partials live as flat files in a `partials/` directory. A partial's name is
//! its file name with the `.html` extension stripped:
//!
//! ```text
//! src/
//! ├── shared/partials/
//! │   ├── head.html       → "head"
//! │   └── header.html     → "header"
//! └── en/partials/
//!     ├── header.html     → "header" (wins over shared)
//!     └── sidebar.html    → "sidebar"
//! ```
//!
//! Only immediate files are loaded; subdirectories and files with any other
//! extension are ignored. The merged store for a language is the shared store
//! with the language's entries laid on top (see [`merge`]).

use crate::vfs::{FsBackend, FsError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extension partial files must carry.
pub const PARTIAL_EXTENSION: &str = ".html";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Shared partials folder not found: {}", .0.display())]
    MissingShared(PathBuf),
    #[error("Missing partials folder for lang=\"{lang}\". Expected: {}", .path.display())]
    MissingLanguage { lang: String, path: PathBuf },
    #[error(transparent)]
    Fs(#[from] FsError),
}

/// Partial name → partial HTML, immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialStore {
    partials: BTreeMap<String, String>,
}

impl PartialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.partials.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.partials.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.partials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partials.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PartialStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            partials: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Load the shared partials. A missing directory is fatal.
pub fn load_shared(fs: &impl FsBackend, dir: &Path) -> Result<PartialStore, StoreError> {
    if !fs.is_dir(dir) {
        return Err(StoreError::MissingShared(dir.to_path_buf()));
    }
    load_dir(fs, dir)
}

/// Load only the partials defined for `lang`. A missing directory is fatal.
pub fn load_for_language(
    fs: &impl FsBackend,
    dir: &Path,
    lang: &str,
) -> Result<PartialStore, StoreError> {
    if !fs.is_dir(dir) {
        return Err(StoreError::MissingLanguage {
            lang: lang.to_string(),
            path: dir.to_path_buf(),
        });
    }
    load_dir(fs, dir)
}

/// Overlay `language` on top of `shared`; language entries win on collision.
pub fn merge(shared: &PartialStore, language: &PartialStore) -> PartialStore {
    let mut merged = shared.clone();
    for (name, html) in &language.partials {
        merged.partials.insert(name.clone(), html.clone());
    }
    merged
}

fn load_dir(fs: &impl FsBackend, dir: &Path) -> Result<PartialStore, StoreError> {
    let mut store = PartialStore::new();
    for entry in fs.read_dir(dir)? {
        if !entry.is_file() {
            continue;
        }
        let Some(name) = partial_name(&entry.name) else {
            continue;
        };
        let html = fs.read_to_string(&entry.path)?;
        store.partials.insert(name.to_string(), html);
    }
    Ok(store)
}

/// `"header.html"` → `Some("header")`; anything without the extension → `None`.
fn partial_name(file_name: &str) -> Option<&str> {
    file_name.strip_suffix(PARTIAL_EXTENSION)
}
