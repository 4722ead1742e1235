//! Partial inclusion.
//!
//! The only template construct is `{{> name}}`, where `name` is
//! `[A-Za-z0-9_-]+` and whitespace around it is ignored. Each token is
//! replaced by the partial's content, verbatim and unescaped.
//!
//! An empty partial file is treated the same as a missing one.
//!
//! Substitution is a single pass over the input: text inserted from a partial
//! is not scanned again, so a token inside a partial stays literal in the
//! output of that pass.

use crate::partials::PartialStore;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{>\s*([A-Za-z0-9_-]+)\s*\}\}").expect("token pattern is valid")
});

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("Partial not found: {0}")]
    PartialNotFound(String),
}

/// Replace every inclusion token in `html` with its partial from `store`.
///
/// Fails on the first token whose name is not in the store, or whose partial
/// is empty. No partially substituted output is ever returned.
pub fn render(html: &str, store: &PartialStore) -> Result<String, RenderError> {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for caps in TOKEN.captures_iter(html) {
        let whole = caps.get(0).expect("group 0 always matches");
        let name = &caps[1];
        let partial = store
            .get(name)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| RenderError::PartialNotFound(name.to_string()))?;
        out.push_str(&html[last..whole.start()]);
        out.push_str(partial);
        last = whole.end();
    }
    out.push_str(&html[last..]);
    Ok(out)
}
