//! Full-document vs. fragment detection.
//!
//! This is a prefix check, not an HTML parse: the content is trimmed,
//! lowercased, and tested for a leading `<!doctype html` or `<html`. A file
//! that opens with a comment is therefore a fragment, even if a doctype
//! follows the comment.

/// How a source page will be emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Already a complete document; rendered in place.
    FullDocument,
    /// Bare content; rendered, then wrapped in the page skeleton.
    Fragment,
}

pub fn is_full_document(raw: &str) -> bool {
    let s = raw.trim().to_lowercase();
    s.starts_with("<!doctype html") || s.starts_with("<html")
}

pub fn classify(raw: &str) -> PageKind {
    if is_full_document(raw) {
        PageKind::FullDocument
    } else {
        PageKind::Fragment
    }
}
