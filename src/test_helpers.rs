//! Shared test utilities.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let options = fixture_options(tmp.path());
//! let report = pipeline::build(&options).unwrap();
//!
//! let en = find_language(&report, "en");
//! assert_eq!(find_entry(en, "en/index.html").disposition, Disposition::Wrapped);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::pipeline::BuildOptions;
use crate::types::{BuildReport, EmittedEntry, LanguageReport};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

/// Default options pointed at a fixture copy: `<root>/src` → `<root>/dist`.
pub fn fixture_options(root: &Path) -> BuildOptions {
    BuildOptions {
        source_root: root.join("src"),
        output_root: root.join("dist"),
        languages: vec!["en".to_string(), "pt".to_string()],
        default_language: "en".to_string(),
        title: "Discrete Maths for Engineers".to_string(),
    }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Report lookups (panic with a clear message on miss)
// =========================================================================

/// Find a language report by code. Panics if not found.
pub fn find_language<'a>(report: &'a BuildReport, code: &str) -> &'a LanguageReport {
    report
        .languages
        .iter()
        .find(|l| l.code == code)
        .unwrap_or_else(|| {
            let codes: Vec<&str> = report.languages.iter().map(|l| l.code.as_str()).collect();
            panic!("language '{code}' not built. Available: {codes:?}")
        })
}

/// Find an emitted entry by its source-relative path. Panics if not found.
pub fn find_entry<'a>(language: &'a LanguageReport, source: &str) -> &'a EmittedEntry {
    language
        .entries
        .iter()
        .find(|e| e.source == Path::new(source))
        .unwrap_or_else(|| {
            let sources: Vec<String> = language
                .entries
                .iter()
                .map(|e| e.source.display().to_string())
                .collect();
            panic!(
                "entry '{source}' not emitted for '{}'. Available: {sources:?}",
                language.code
            )
        })
}

/// Read a file under the output root as text. Panics if missing.
pub fn read_output(options: &BuildOptions, relative: &str) -> String {
    let path = options.output_root.join(relative);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}
