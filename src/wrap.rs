//! Page skeleton for fragments.
//!
//! A fragment is dropped into a fixed document:
//!
//! ```text
//! <!doctype html>
//! <html lang="{tag}">
//! <head>
//!   <title>{title}</title>
//!   {{> head}}
//! </head>
//! <body>
//!   {{> header}}
//!   <div class="app">
//!     {{> sidebar}}
//!     {fragment}
//!   </div>
//! </body>
//! </html>
//! ```
//!
//! The filled skeleton goes back through [`render`], so `head`, `header` and
//! `sidebar` must exist in the store. Because the fragment is part of that
//! second pass, a token the fragment's own render pass left behind (one that
//! came in through a partial) is resolved here.

use crate::partials::PartialStore;
use crate::render::{RenderError, render};
use maud::html;

/// HTML `lang` attribute for a language code: `pt` is Brazilian Portuguese,
/// everything else is English.
pub fn html_lang(lang: &str) -> &'static str {
    match lang {
        "pt" => "pt-BR",
        _ => "en",
    }
}

/// Wrap an already-rendered fragment into a full document for `lang`.
pub fn wrap(
    lang: &str,
    title: &str,
    body: &str,
    store: &PartialStore,
) -> Result<String, RenderError> {
    let base = format!(
        r#"<!doctype html>
<html lang="{html_lang}">
<head>
  <title>{title}</title>
  {{{{> head}}}}
</head>
<body>
  {{{{> header}}}}
  <div class="app">
    {{{{> sidebar}}}}
    {body}
  </div>
</body>
</html>"#,
        html_lang = html_lang(lang),
        title = html! { (title) }.into_string(),
    );
    render(&base, store)
}
