//! Build report types shared between the pipeline and CLI output.

use std::path::PathBuf;

/// What happened to a single source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Full document, partials substituted in place.
    Rendered,
    /// Fragment, rendered and wrapped in the page skeleton.
    Wrapped,
    /// Non-HTML file, copied byte for byte.
    Copied,
}

/// One file written under a language subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedEntry {
    /// Path relative to the source root, language segment included
    /// (`en/series/part-1.html`). The output path mirrors it.
    pub source: PathBuf,
    pub output: PathBuf,
    pub disposition: Disposition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageReport {
    pub code: String,
    /// Size of the merged (shared + language) partial store.
    pub partials: usize,
    pub entries: Vec<EmittedEntry>,
}

impl LanguageReport {
    pub fn page_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.disposition != Disposition::Copied)
            .count()
    }

    pub fn copied_count(&self) -> usize {
        self.entries.len() - self.page_count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectReport {
    pub path: PathBuf,
    /// Literal target, e.g. `/en/`.
    pub target: String,
}

/// Everything a completed build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub output_root: PathBuf,
    pub languages: Vec<LanguageReport>,
    /// Configured languages with no source subtree.
    pub skipped_languages: Vec<String>,
    /// Number of shared assets copied, `None` when there was no assets directory.
    pub assets_copied: Option<usize>,
    pub redirect: RedirectReport,
}

impl BuildReport {
    pub fn page_count(&self) -> usize {
        self.languages.iter().map(LanguageReport::page_count).sum()
    }

    pub fn copied_count(&self) -> usize {
        self.languages.iter().map(LanguageReport::copied_count).sum()
    }
}
