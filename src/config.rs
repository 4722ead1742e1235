//! Build configuration.
//!
//! Loaded once per run from an optional `config.toml` (by default in the
//! working directory). User values are merged over the stock defaults, so a
//! config file only needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source = "src"     # Source root: shared/ plus one directory per language
//! output = "dist"    # Output root, deleted and recreated on every build
//! title = "Discrete Maths for Engineers"   # <title> of wrapped pages
//!
//! [languages]
//! codes = ["en", "pt"]   # Build order
//! default = "en"         # Target of the root redirect
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::pipeline::{ASSETS_DIR, SHARED_DIR};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Source root directory.
    pub source: String,
    /// Output root directory.
    pub output: String,
    /// Title used in the skeleton of wrapped fragment pages.
    pub title: String,
    /// Supported languages.
    pub languages: LanguagesConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source: "src".to_string(),
            output: "dist".to_string(),
            title: "Discrete Maths for Engineers".to_string(),
            languages: LanguagesConfig::default(),
        }
    }
}

/// Language list and redirect default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LanguagesConfig {
    /// Language codes, each naming a directory under the source root.
    pub codes: Vec<String>,
    /// Language the root page redirects to. Must be one of `codes`.
    pub default: String,
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self {
            codes: vec!["en".to_string(), "pt".to_string()],
            default: "en".to_string(),
        }
    }
}

impl SiteConfig {
    /// Validate config values before anything touches the filesystem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let codes = &self.languages.codes;
        if codes.is_empty() {
            return Err(ConfigError::Validation(
                "languages.codes must not be empty".into(),
            ));
        }
        let mut seen = HashSet::new();
        for code in codes {
            if !is_valid_code(code) {
                return Err(ConfigError::Validation(format!(
                    "language code {code:?} must match [A-Za-z0-9_-]+"
                )));
            }
            if code == SHARED_DIR || code == ASSETS_DIR {
                return Err(ConfigError::Validation(format!(
                    "language code {code:?} collides with a reserved directory"
                )));
            }
            if !seen.insert(code.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "language code {code:?} is listed twice"
                )));
            }
        }
        if !codes.contains(&self.languages.default) {
            return Err(ConfigError::Validation(format!(
                "languages.default {:?} is not in languages.codes",
                self.languages.default
            )));
        }
        validate_roots(Path::new(&self.source), Path::new(&self.output))
    }
}

fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// The output root is deleted on every build, so it must name a real
/// directory and must not be the source root or one of its ancestors.
///
/// Both roots are compared after [`resolve_root`], so `./src`, `dist/../src`
/// and an absolute spelling of `src` all count as the same directory.
pub fn validate_roots(source: &Path, output: &Path) -> Result<(), ConfigError> {
    if source.as_os_str().is_empty() {
        return Err(ConfigError::Validation("source must not be empty".into()));
    }
    if !output
        .components()
        .any(|c| matches!(c, Component::Normal(_)))
    {
        return Err(ConfigError::Validation(format!(
            "output {:?} must name a directory",
            output.display().to_string()
        )));
    }
    let resolved_source = resolve_root(source)?;
    let resolved_output = resolve_root(output)?;
    if resolved_source.starts_with(&resolved_output) {
        return Err(ConfigError::Validation(format!(
            "output {:?} would delete the source root {:?}",
            output.display().to_string(),
            source.display().to_string()
        )));
    }
    Ok(())
}

/// Absolute form of `path` for comparing roots.
///
/// `.` and `..` are folded lexically, then the longest existing ancestor is
/// canonicalized (resolving symlinks) and the missing tail re-appended, so
/// roots that do not exist yet still compare correctly.
pub fn resolve_root(path: &Path) -> Result<PathBuf, ConfigError> {
    let absolute = std::path::absolute(path)?;

    let mut folded = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                folded.pop();
            }
            other => folded.push(other),
        }
    }

    for ancestor in folded.ancestors() {
        if let Ok(canonical) = fs::canonicalize(ancestor) {
            let tail = folded.strip_prefix(ancestor).unwrap_or(Path::new(""));
            return Ok(canonical.join(tail));
        }
    }
    Ok(folded)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it is absent.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Langpress Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Source root. Expected layout:
#   src/shared/partials/*.html   partials available to every language
#   src/shared/assets/**         copied verbatim to dist/assets/
#   src/<lang>/partials/*.html   per-language partials (override shared ones)
#   src/<lang>/**                pages and files, mirrored to dist/<lang>/
source = "src"

# Output root. Deleted and recreated on every build.
output = "dist"

# <title> written into the skeleton of fragment pages.
title = "Discrete Maths for Engineers"

# ---------------------------------------------------------------------------
# Languages
# ---------------------------------------------------------------------------
[languages]
# Language codes, in build order. Languages without a source directory are
# skipped. "pt" pages get lang="pt-BR"; every other code gets lang="en".
codes = ["en", "pt"]

# Where the root index.html redirects to.
default = "en"
"##
}
