//! CLI output formatting.
//!
//! Each entry is shown by positional index and its path relative to the
//! source root, which is also its path relative to the output root:
//!
//! ```text
//! en (4 partials)
//!     001 en/img/diagram.svg (copied)
//!     002 en/index.html (wrapped)
//!     003 en/standalone.html (rendered)
//! pt (skipped: no source directory)
//!
//! Assets
//!     3 files → assets/
//!
//! Redirect
//!     index.html → /en/
//!
//! Built 1 language: 2 pages, 1 copied file
//! ```
//!
//! [`format_build_output`] is pure and returns lines; [`print_build_output`]
//! writes them to stdout.

use crate::types::{BuildReport, Disposition, LanguageReport};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

fn disposition_label(disposition: Disposition) -> &'static str {
    match disposition {
        Disposition::Rendered => "rendered",
        Disposition::Wrapped => "wrapped",
        Disposition::Copied => "copied",
    }
}

fn format_language(report: &LanguageReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({})",
        report.code,
        plural(report.partials, "partial", "partials")
    )];
    for (i, entry) in report.entries.iter().enumerate() {
        lines.push(format!(
            "{}{} {} ({})",
            indent(1),
            format_index(i + 1),
            entry.source.display(),
            disposition_label(entry.disposition)
        ));
    }
    lines
}

/// Format the outcome of a build.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();

    for language in &report.languages {
        lines.extend(format_language(language));
    }
    for code in &report.skipped_languages {
        lines.push(format!("{code} (skipped: no source directory)"));
    }

    lines.push(String::new());
    lines.push("Assets".to_string());
    match report.assets_copied {
        Some(n) => lines.push(format!(
            "{}{} \u{2192} assets/",
            indent(1),
            plural(n, "file", "files")
        )),
        None => lines.push(format!("{}(none)", indent(1))),
    }

    lines.push(String::new());
    lines.push("Redirect".to_string());
    let redirect_name = report
        .redirect
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    lines.push(format!(
        "{}{} \u{2192} {}",
        indent(1),
        redirect_name,
        report.redirect.target
    ));

    lines.push(String::new());
    lines.push(format!(
        "Built {}: {}, {}",
        plural(report.languages.len(), "language", "languages"),
        plural(report.page_count(), "page", "pages"),
        plural(report.copied_count(), "copied file", "copied files"),
    ));

    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}
