//! Build orchestration.
//!
//! A build is a fixed sequence where every step is fatal on error:
//!
//! ```text
//! 1. Reset     dist/                 (delete, recreate)
//! 2. Load      src/shared/partials/  → shared store
//! 3. Walk      src/<lang>/           → dist/<lang>/   (per configured language)
//! 4. Copy      src/shared/assets/    → dist/assets/
//! 5. Redirect                        → dist/index.html
//! ```
//!
//! There is no partial-success mode. Because the output root is wiped first,
//! a failed build never leaves stale artifacts from an earlier run mixed in
//! with its own.

use crate::config::SiteConfig;
use crate::partials::{self, StoreError};
use crate::redirect;
use crate::render::RenderError;
use crate::types::BuildReport;
use crate::vfs::{DiskBackend, FsBackend, FsError, ReadOnly};
use crate::walk;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory under the source root holding shared partials and assets.
pub const SHARED_DIR: &str = "shared";
/// Partials directory name, both under `shared/` and under each language.
pub const PARTIALS_DIR: &str = "partials";
/// Shared assets directory name, in the source and in the output.
pub const ASSETS_DIR: &str = "assets";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{}: {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
    #[error(transparent)]
    Fs(#[from] FsError),
    #[error("Path is outside the source root: {}", .0.display())]
    OutsideSource(PathBuf),
}

/// Everything a build needs to know, resolved up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub source_root: PathBuf,
    pub output_root: PathBuf,
    /// Languages in build order.
    pub languages: Vec<String>,
    pub default_language: String,
    /// `<title>` of wrapped fragment pages.
    pub title: String,
}

impl BuildOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            source_root: PathBuf::from(&config.source),
            output_root: PathBuf::from(&config.output),
            languages: config.languages.codes.clone(),
            default_language: config.languages.default.clone(),
            title: config.title.clone(),
        }
    }

    pub fn shared_partials_dir(&self) -> PathBuf {
        self.source_root.join(SHARED_DIR).join(PARTIALS_DIR)
    }

    pub fn shared_assets_dir(&self) -> PathBuf {
        self.source_root.join(SHARED_DIR).join(ASSETS_DIR)
    }

    pub fn language_dir(&self, lang: &str) -> PathBuf {
        self.source_root.join(lang)
    }

    pub fn language_partials_dir(&self, lang: &str) -> PathBuf {
        self.language_dir(lang).join(PARTIALS_DIR)
    }

    /// Path of `path` relative to the source root.
    pub fn relative_to_source(&self, path: &Path) -> Result<PathBuf, BuildError> {
        path.strip_prefix(&self.source_root)
            .map(Path::to_path_buf)
            .map_err(|_| BuildError::OutsideSource(path.to_path_buf()))
    }
}

/// Build the site on disk.
pub fn build(options: &BuildOptions) -> Result<BuildReport, BuildError> {
    build_with_backend(&DiskBackend::new(), options)
}

/// Run every build step against the real source tree without deleting or
/// writing anything. Fails exactly where [`build`] would.
pub fn check(options: &BuildOptions) -> Result<BuildReport, BuildError> {
    build_with_backend(&ReadOnly::new(DiskBackend::new()), options)
}

/// Run a complete build against any filesystem backend.
pub fn build_with_backend(
    fs: &impl FsBackend,
    options: &BuildOptions,
) -> Result<BuildReport, BuildError> {
    reset_output(fs, &options.output_root)?;

    let shared = partials::load_shared(fs, &options.shared_partials_dir())?;

    let mut languages = Vec::new();
    let mut skipped_languages = Vec::new();
    for lang in &options.languages {
        match walk::build_language(fs, options, lang, &shared)? {
            Some(report) => languages.push(report),
            None => skipped_languages.push(lang.clone()),
        }
    }

    let assets_copied = walk::copy_dir(
        fs,
        &options.shared_assets_dir(),
        &options.output_root.join(ASSETS_DIR),
    )?;

    let redirect = redirect::write_root_redirect(
        fs,
        &options.output_root,
        &options.default_language,
        &options.languages,
    )?;

    Ok(BuildReport {
        output_root: options.output_root.clone(),
        languages,
        skipped_languages,
        assets_copied,
        redirect,
    })
}

/// Delete the output root if present, then recreate it empty.
fn reset_output(fs: &impl FsBackend, output_root: &Path) -> Result<(), FsError> {
    if fs.exists(output_root) {
        fs.remove_dir_all(output_root)?;
    }
    fs.create_dir_all(output_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Disposition;
    use crate::vfs::backend::tests::{MemoryBackend, RecordedOp};

    fn options() -> BuildOptions {
        BuildOptions {
            source_root: PathBuf::from("/site/src"),
            output_root: PathBuf::from("/site/dist"),
            languages: vec!["en".to_string(), "pt".to_string()],
            default_language: "en".to_string(),
            title: "Discrete Maths for Engineers".to_string(),
        }
    }

    fn site() -> MemoryBackend {
        MemoryBackend::new()
            .with_file("/site/src/shared/partials/head.html", "<meta a>")
            .with_file("/site/src/shared/partials/header.html", "<header>")
            .with_file("/site/src/shared/partials/sidebar.html", "<nav>")
            .with_file("/site/src/shared/assets/css/site.css", "body{}")
            .with_file("/site/src/en/partials/head.html", "<meta b>")
            .with_file("/site/src/en/index.html", "<main>{{> head}}</main>")
            .with_file("/site/src/pt/partials/sidebar.html", "<nav pt>")
            .with_file("/site/src/pt/index.html", "<main>{{> head}}</main>")
    }

    #[test]
    fn options_paths() {
        let o = options();
        assert_eq!(o.shared_partials_dir(), Path::new("/site/src/shared/partials"));
        assert_eq!(o.shared_assets_dir(), Path::new("/site/src/shared/assets"));
        assert_eq!(o.language_dir("pt"), Path::new("/site/src/pt"));
        assert_eq!(o.language_partials_dir("en"), Path::new("/site/src/en/partials"));
    }

    #[test]
    fn relative_to_source_keeps_language_segment() {
        let o = options();
        assert_eq!(
            o.relative_to_source(Path::new("/site/src/en/a/b.html")).unwrap(),
            Path::new("en/a/b.html")
        );
        assert!(matches!(
            o.relative_to_source(Path::new("/elsewhere/x.html")),
            Err(BuildError::OutsideSource(_))
        ));
    }

    #[test]
    fn overlay_precedence_per_language() {
        let fs = site();
        build_with_backend(&fs, &options()).unwrap();

        let en = fs.file("/site/dist/en/index.html").unwrap();
        let pt = fs.file("/site/dist/pt/index.html").unwrap();
        assert!(en.contains("<main><meta b></main>"));
        assert!(pt.contains("<main><meta a></main>"));
        assert!(pt.contains("<nav pt>"));
        assert!(en.contains("<html lang=\"en\">"));
        assert!(pt.contains("<html lang=\"pt-BR\">"));
    }

    #[test]
    fn full_build_produces_expected_layout() {
        let fs = site();
        let report = build_with_backend(&fs, &options()).unwrap();

        assert_eq!(
            fs.files_under("/site/dist"),
            vec![
                PathBuf::from("/site/dist/assets/css/site.css"),
                PathBuf::from("/site/dist/en/index.html"),
                PathBuf::from("/site/dist/en/partials/head.html"),
                PathBuf::from("/site/dist/index.html"),
                PathBuf::from("/site/dist/pt/index.html"),
                PathBuf::from("/site/dist/pt/partials/sidebar.html"),
            ]
        );
        assert_eq!(report.languages.len(), 2);
        assert!(report.skipped_languages.is_empty());
        assert_eq!(report.assets_copied, Some(1));
        assert_eq!(report.redirect.target, "/en/");
        assert_eq!(report.page_count(), 4);
        assert_eq!(report.copied_count(), 0);
        assert!(
            report.languages[0]
                .entries
                .iter()
                .all(|e| e.disposition == Disposition::Wrapped)
        );
    }

    #[test]
    fn language_without_source_tree_is_skipped() {
        let fs = MemoryBackend::new()
            .with_file("/site/src/shared/partials/head.html", "<meta a>")
            .with_file("/site/src/shared/partials/header.html", "<header>")
            .with_file("/site/src/shared/partials/sidebar.html", "<nav>")
            .with_file("/site/src/en/partials/x.html", "<p>x</p>");

        let report = build_with_backend(&fs, &options()).unwrap();

        assert_eq!(report.skipped_languages, vec!["pt".to_string()]);
        assert_eq!(report.assets_copied, None);
        assert!(!fs.exists(Path::new("/site/dist/pt")));
        assert!(!fs.exists(Path::new("/site/dist/assets")));
        assert!(fs.file("/site/dist/index.html").is_some());
    }

    #[test]
    fn output_root_is_wiped_first() {
        let fs = site().with_file("/site/dist/stale.html", "old");

        build_with_backend(&fs, &options()).unwrap();

        assert!(fs.file("/site/dist/stale.html").is_none());
        let ops = fs.get_operations();
        assert_eq!(ops[0], RecordedOp::RemoveDir(PathBuf::from("/site/dist")));
        assert_eq!(ops[1], RecordedOp::CreateDir(PathBuf::from("/site/dist")));
    }

    #[test]
    fn missing_shared_partials_aborts_after_reset() {
        let fs = MemoryBackend::new()
            .with_file("/site/src/en/partials/head.html", "<meta b>")
            .with_file("/site/dist/old.html", "old");

        let err = build_with_backend(&fs, &options()).unwrap_err();

        assert!(matches!(err, BuildError::Store(StoreError::MissingShared(_))));
        assert!(fs.file("/site/dist/old.html").is_none());
        assert!(fs.files_under("/site/dist").is_empty());
    }

    #[test]
    fn unresolved_partial_aborts_whole_build() {
        let fs = site().with_file("/site/src/en/zz.html", "{{> nowhere}}");

        let err = build_with_backend(&fs, &options()).unwrap_err();

        assert_eq!(
            err.to_string(),
            "/site/src/en/zz.html: Partial not found: nowhere"
        );
        // en aborted mid-walk: pt, assets and the redirect never ran
        assert!(fs.file("/site/dist/pt/index.html").is_none());
        assert!(fs.file("/site/dist/index.html").is_none());
        assert!(!fs.exists(Path::new("/site/dist/assets")));
    }

    #[test]
    fn empty_partial_aborts_build() {
        let fs = site().with_file("/site/src/en/partials/sidebar.html", "");

        let err = build_with_backend(&fs, &options()).unwrap_err();

        assert_eq!(
            err.to_string(),
            "/site/src/en/index.html: Partial not found: sidebar"
        );
        assert!(fs.file("/site/dist/index.html").is_none());
    }

    #[test]
    fn read_only_build_reports_without_writing() {
        let inner = site().with_file("/site/dist/keep.html", "keep");
        let fs = ReadOnly::new(inner);

        let report = build_with_backend(&fs, &options()).unwrap();

        assert_eq!(report.page_count(), 4);
        assert_eq!(report.assets_copied, Some(1));
        assert_eq!(fs.inner().file("/site/dist/keep.html").as_deref(), Some("keep"));
        assert!(fs.inner().get_operations().is_empty());
    }

    #[test]
    fn read_only_build_still_fails_on_missing_partial() {
        let fs = ReadOnly::new(site().with_file("/site/src/pt/bad.html", "{{> ghost}}"));
        let err = build_with_backend(&fs, &options()).unwrap_err();
        assert!(err.to_string().contains("Partial not found: ghost"));
    }

    #[test]
    fn from_config_uses_config_values() {
        let config = SiteConfig::default();
        let o = BuildOptions::from_config(&config);
        assert_eq!(o.source_root, Path::new("src"));
        assert_eq!(o.output_root, Path::new("dist"));
        assert_eq!(o.languages, vec!["en", "pt"]);
        assert_eq!(o.default_language, "en");
        assert_eq!(o.title, "Discrete Maths for Engineers");
    }

    // =========================================================================
    // On-disk builds of fixtures/site
    // =========================================================================

    mod on_disk {
        use super::super::*;
        use crate::test_helpers::*;
        use crate::types::Disposition;

        #[test]
        fn fixture_site_builds() {
            let tmp = setup_fixtures();
            let options = fixture_options(tmp.path());

            let report = build(&options).unwrap();

            let en = find_language(&report, "en");
            assert_eq!(en.partials, 4);
            assert_eq!(find_entry(en, "en/index.html").disposition, Disposition::Wrapped);
            assert_eq!(find_entry(en, "en/print.html").disposition, Disposition::Rendered);
            assert_eq!(find_entry(en, "en/img/venn.svg").disposition, Disposition::Copied);
            assert_eq!(
                find_entry(en, "en/partials/sidebar.html").disposition,
                Disposition::Wrapped
            );

            let pt = find_language(&report, "pt");
            assert_eq!(pt.partials, 4);
            assert_eq!(report.assets_copied, Some(2));
            assert!(report.skipped_languages.is_empty());
            assert_eq!(report.page_count(), 8);
            assert_eq!(report.copied_count(), 1);
        }

        #[test]
        fn language_footer_overrides_shared() {
            let tmp = setup_fixtures();
            let options = fixture_options(tmp.path());
            build(&options).unwrap();

            let en = read_output(&options, "en/index.html");
            let pt = read_output(&options, "pt/index.html");
            assert!(en.contains("Discrete Maths for Engineers (English edition)</footer>"));
            assert!(pt.contains("<footer class=\"site-footer\">Discrete Maths for Engineers</footer>"));
            assert!(pt.contains("<html lang=\"pt-BR\">"));
            assert!(pt.contains("Parte 1: Conjuntos"));
        }

        #[test]
        fn full_document_is_not_wrapped() {
            let tmp = setup_fixtures();
            let options = fixture_options(tmp.path());
            build(&options).unwrap();

            let print = read_output(&options, "en/print.html");
            assert!(print.starts_with("<!doctype html>\n<html lang=\"en\">"));
            assert!(print.contains("<title>Printable notes</title>"));
            assert!(!print.contains("class=\"app\""));
            assert!(!print.contains("{{"));
        }

        #[test]
        fn assets_and_binary_files_are_copied_verbatim() {
            let tmp = setup_fixtures();
            let options = fixture_options(tmp.path());
            build(&options).unwrap();

            for (src, out) in [
                ("shared/assets/css/site.css", "assets/css/site.css"),
                ("shared/assets/js/app.js", "assets/js/app.js"),
                ("en/img/venn.svg", "en/img/venn.svg"),
            ] {
                assert_eq!(
                    std::fs::read(options.source_root.join(src)).unwrap(),
                    std::fs::read(options.output_root.join(out)).unwrap(),
                    "{src}"
                );
            }
        }

        #[test]
        fn rebuild_removes_stale_output() {
            let tmp = setup_fixtures();
            let options = fixture_options(tmp.path());
            std::fs::create_dir_all(options.output_root.join("old")).unwrap();
            std::fs::write(options.output_root.join("old/page.html"), "stale").unwrap();

            build(&options).unwrap();

            assert!(!options.output_root.join("old").exists());
            assert!(read_output(&options, "index.html").contains("url=/en/"));
        }

        #[test]
        fn check_leaves_disk_untouched() {
            let tmp = setup_fixtures();
            let options = fixture_options(tmp.path());

            let report = check(&options).unwrap();

            assert_eq!(report.page_count(), 8);
            assert_eq!(report.assets_copied, Some(2));
            assert!(!options.output_root.exists());
        }

        #[test]
        fn missing_language_partials_dir_fails() {
            let tmp = setup_fixtures();
            let options = fixture_options(tmp.path());
            std::fs::remove_dir_all(options.language_partials_dir("pt")).unwrap();

            let err = build(&options).unwrap_err();

            assert!(matches!(
                err,
                BuildError::Store(StoreError::MissingLanguage { ref lang, .. }) if lang == "pt"
            ));
        }
    }
}
