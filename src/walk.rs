//! Per-language tree walk and emission.
//!
//! Every entry under `<source>/<lang>/` is mirrored into the output root at the
//! same path relative to the source root, so `src/en/series/part-1.html`
//! becomes `dist/en/series/part-1.html`:
//!
//! - directories recurse
//! - `.html` files are classified, rendered against the merged partial store,
//!   and wrapped when they are fragments
//! - any other regular file is copied as opaque bytes
//!
//! The language's `partials/` directory is part of its subtree and is emitted
//! like everything else.

use crate::classify::{PageKind, classify};
use crate::partials::{self, PartialStore};
use crate::pipeline::{BuildError, BuildOptions};
use crate::render::{RenderError, render};
use crate::types::{Disposition, EmittedEntry, LanguageReport};
use crate::vfs::{FsBackend, FsError};
use crate::wrap::wrap;
use std::path::Path;

/// Extension that routes a file through render/wrap instead of a copy.
pub const PAGE_EXTENSION: &str = ".html";

/// Render a source page's raw text into its final document.
pub fn render_page(
    raw: &str,
    lang: &str,
    title: &str,
    store: &PartialStore,
) -> Result<(String, PageKind), RenderError> {
    let kind = classify(raw);
    let rendered = render(raw, store)?;
    let html = match kind {
        PageKind::FullDocument => rendered,
        PageKind::Fragment => wrap(lang, title, &rendered, store)?,
    };
    Ok((html, kind))
}

/// Build one language subtree.
///
/// Returns `Ok(None)` when the language has no source directory; that is not
/// an error. A language directory without a `partials/` directory is.
pub fn build_language(
    fs: &impl FsBackend,
    options: &BuildOptions,
    lang: &str,
    shared: &PartialStore,
) -> Result<Option<LanguageReport>, BuildError> {
    let lang_dir = options.language_dir(lang);
    if !fs.is_dir(&lang_dir) {
        return Ok(None);
    }

    let lang_partials =
        partials::load_for_language(fs, &options.language_partials_dir(lang), lang)?;
    let store = partials::merge(shared, &lang_partials);

    let mut report = LanguageReport {
        code: lang.to_string(),
        partials: store.len(),
        entries: Vec::new(),
    };
    let emitter = Emitter {
        fs,
        options,
        lang,
        store: &store,
    };
    emitter.walk(&lang_dir, &mut report.entries)?;
    Ok(Some(report))
}

struct Emitter<'a, B> {
    fs: &'a B,
    options: &'a BuildOptions,
    lang: &'a str,
    store: &'a PartialStore,
}

impl<B: FsBackend> Emitter<'_, B> {
    fn walk(&self, dir: &Path, entries: &mut Vec<EmittedEntry>) -> Result<(), BuildError> {
        for entry in self.fs.read_dir(dir)? {
            if entry.is_dir() {
                self.walk(&entry.path, entries)?;
                continue;
            }
            if !entry.is_file() {
                continue;
            }
            entries.push(self.emit(&entry.path, &entry.name)?);
        }
        Ok(())
    }

    fn emit(&self, source: &Path, name: &str) -> Result<EmittedEntry, BuildError> {
        let relative = self.options.relative_to_source(source)?;
        let output = self.options.output_root.join(&relative);
        if let Some(parent) = output.parent() {
            self.fs.create_dir_all(parent)?;
        }

        let disposition = if name.ends_with(PAGE_EXTENSION) {
            let raw = self.fs.read_to_string(source)?;
            let (html, kind) = render_page(&raw, self.lang, &self.options.title, self.store)
                .map_err(|source_err| BuildError::Render {
                    path: source.to_path_buf(),
                    source: source_err,
                })?;
            self.fs.write(&output, &html)?;
            match kind {
                PageKind::FullDocument => Disposition::Rendered,
                PageKind::Fragment => Disposition::Wrapped,
            }
        } else {
            self.fs.copy_file(source, &output)?;
            Disposition::Copied
        };

        Ok(EmittedEntry {
            source: relative,
            output,
            disposition,
        })
    }
}

/// Copy a directory tree verbatim. Returns the number of files copied, or
/// `None` if `src` does not exist.
pub fn copy_dir(fs: &impl FsBackend, src: &Path, dst: &Path) -> Result<Option<usize>, FsError> {
    if !fs.exists(src) {
        return Ok(None);
    }
    copy_dir_recursive(fs, src, dst).map(Some)
}

fn copy_dir_recursive(fs: &impl FsBackend, src: &Path, dst: &Path) -> Result<usize, FsError> {
    fs.create_dir_all(dst)?;
    let mut copied = 0;
    for entry in fs.read_dir(src)? {
        let dst_path = dst.join(&entry.name);
        if entry.is_dir() {
            copied += copy_dir_recursive(fs, &entry.path, &dst_path)?;
        } else {
            fs.copy_file(&entry.path, &dst_path)?;
            copied += 1;
        }
    }
    Ok(copied)
}
