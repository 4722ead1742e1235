//! # Langpress
//!
//! A static-site builder for a small multilingual course site. Pages are
//! plain HTML with `{{> name}}` include tokens; the filesystem layout decides
//! everything else.
//!
//! ```text
//! src/
//! ├── shared/
//! │   ├── partials/*.html      # available to every language
//! │   └── assets/**            # copied to dist/assets/
//! ├── en/
//! │   ├── partials/*.html      # overrides shared partials of the same name
//! │   └── **                   # mirrored to dist/en/
//! └── pt/
//!     └── ...
//! ```
//!
//! # Pipeline
//!
//! ```text
//! 1. Reset     dist/                 (delete, recreate)
//! 2. Load      shared partials       → shared store
//! 3. Walk      src/<lang>/           → dist/<lang>/    (merged store per language)
//! 4. Copy      src/shared/assets/    → dist/assets/
//! 5. Redirect                        → dist/index.html
//! ```
//!
//! Every `.html` file is rendered once against the merged store. A page that
//! already starts with `<!doctype html` or `<html` is written as-is; anything
//! else is a fragment and is wrapped into the standard skeleton (head, header,
//! sidebar) before it is written. Other files are copied byte for byte.
//!
//! Any error aborts the whole build. There is no partial output mode.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`vfs`] | Filesystem seam: [`vfs::FsBackend`] trait, disk backend, read-only wrapper |
//! | [`partials`] | Partial store: shared and per-language loading, overlay merge |
//! | [`render`] | Single-pass `{{> name}}` substitution |
//! | [`classify`] | Full document vs. fragment decision |
//! | [`wrap`] | Page skeleton for fragments |
//! | [`walk`] | Per-language tree walk, page emission, verbatim directory copy |
//! | [`redirect`] | Root redirect document |
//! | [`pipeline`] | Build orchestration and [`pipeline::BuildOptions`] |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`types`] | Build report types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Render Pass
//!
//! Partial bodies are inserted verbatim and never rescanned, so a partial that
//! mentions itself cannot loop. A fragment still gets a second chance: the
//! skeleton it is wrapped in goes back through the renderer, which resolves
//! any token a partial brought in. Full documents get exactly one pass.
//!
//! ## The Output Root Is Disposable
//!
//! `dist/` is deleted at the start of every build, so a failed build can never
//! leave yesterday's pages mixed with today's. [`config`] refuses output roots
//! that would take the source tree with them.
//!
//! ## A Swappable Filesystem
//!
//! All pipeline code talks to [`vfs::FsBackend`]. The CLI uses the disk;
//! `check` wraps the disk in [`vfs::ReadOnly`]; unit tests use an in-memory
//! backend that records every mutation.

pub mod classify;
pub mod config;
pub mod output;
pub mod partials;
pub mod pipeline;
pub mod redirect;
pub mod render;
pub mod types;
pub mod vfs;
pub mod walk;
pub mod wrap;

#[cfg(test)]
pub(crate) mod test_helpers;
