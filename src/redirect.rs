//! Root redirect page.
//!
//! `dist/index.html` sends visitors to the default language subtree. It is a
//! literal document, never rendered through the partial store:
//!
//! - `noindex`, so crawlers index the language pages instead
//! - canonical link and zero-delay meta refresh to `/<default>/`
//! - a script that redirects with the current query string and hash kept,
//!   and does nothing when the path already has a language segment
//!   (`/en/`, `/pt/`), so a misrouted root page cannot bounce forever
//!
//! [`resolve_redirect`] is the same decision written in Rust.

use crate::types::RedirectReport;
use crate::vfs::{FsBackend, FsError};
use crate::wrap::html_lang;
use maud::{DOCTYPE, PreEscaped, html};
use std::path::Path;

pub const REDIRECT_FILE: &str = "index.html";

/// `/en/` for `en`.
pub fn redirect_target(default_lang: &str) -> String {
    format!("/{default_lang}/")
}

/// Regex source matching any path that contains a `/<lang>/` segment.
///
/// Language codes are restricted to `[A-Za-z0-9_-]`, so they need no escaping.
pub fn guard_pattern(languages: &[String]) -> String {
    format!("/({})/", languages.join("|"))
}

/// Where the script sends a visitor at `pathname`, or `None` if it stays put.
pub fn resolve_redirect(
    pathname: &str,
    search: &str,
    hash: &str,
    default_lang: &str,
    languages: &[String],
) -> Option<String> {
    let under_language = languages
        .iter()
        .any(|lang| pathname.contains(&format!("/{lang}/")));
    if under_language {
        return None;
    }
    Some(format!("{}{search}{hash}", redirect_target(default_lang)))
}

fn redirect_script(target: &str, languages: &[String]) -> String {
    let guard = guard_pattern(languages).replace('/', "\\/");
    let target = serde_json::Value::String(target.to_string());
    format!(
        r#"(function () {{
  if (/{guard}/.test(window.location.pathname)) return;
  window.location.replace({target} + window.location.search + window.location.hash);
}})();"#
    )
}

pub fn redirect_document(default_lang: &str, languages: &[String]) -> String {
    let target = redirect_target(default_lang);
    let script = redirect_script(&target, languages);
    html! {
        (DOCTYPE)
        html lang=(html_lang(default_lang)) {
            head {
                meta charset="utf-8";
                meta name="robots" content="noindex";
                title { "Redirecting" }
                link rel="canonical" href=(target);
                script { (PreEscaped(script)) }
                meta http-equiv="refresh" content={ "0; url=" (target) };
            }
            body {
                p {
                    "Redirecting to "
                    a href=(target) { (target) }
                }
            }
        }
    }
    .into_string()
}

/// Write the redirect document at the root of the output tree.
pub fn write_root_redirect(
    fs: &impl FsBackend,
    output_root: &Path,
    default_lang: &str,
    languages: &[String],
) -> Result<RedirectReport, FsError> {
    let path = output_root.join(REDIRECT_FILE);
    fs.write(&path, &redirect_document(default_lang, languages))?;
    Ok(RedirectReport {
        path,
        target: redirect_target(default_lang),
    })
}
