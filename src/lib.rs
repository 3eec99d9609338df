//! # vx-config-generator
//!
//! Generates the installability and sharing metadata of a web app from one
//! site configuration file: a PWA `manifest.json`, a Windows tile
//! `browserconfig.xml`, and the `<head>` meta-tag block.
//!
//! # Architecture: One-Way Pipeline
//!
//! ```text
//! 1. Load      site.json  →  SiteConfig        (config)
//! 2. Validate  SiteConfig →  ValidationResult  (validate)
//! 3. Generate  SiteConfig →  manifest / xml    (generate)
//! 4. Write     artifacts  →  public/           (writer)
//! ```
//!
//! Loading and validation failures stop the pipeline before anything is
//! written. Write failures are per artifact: if `browserconfig.xml` can't be
//! written, `manifest.json` is still attempted and reported.
//!
//! Two drivers run the pipeline: the `vx-config-generator` binary, and
//! [`plugin::ConfigGenerator`] for build tools that regenerate when the
//! config file changes during a dev session.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `SiteConfig` schema and `.json`/`.toml` loading |
//! | [`validate`] | Required-field and URL-shape checks |
//! | [`generate`] | Manifest, browserconfig and meta-tag generators |
//! | [`writer`] | Writes artifacts to the output directory |
//! | [`types`] | `ValidationResult` and `GenerationResult` |
//! | [`plugin`] | Build-tool hooks and the file watch loop |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Declarative Configs Only
//!
//! Configs are data: JSON or TOML. Script modules (`.js`, `.ts`) are
//! rejected instead of evaluated, so pointing the tool at a config path
//! never executes code.
//!
//! ## Fixed Manifest Colours
//!
//! The manifest's `theme_color`/`background_color` are always
//! `#000000`/`#ffffff`. Per-scheme colours go into the meta tags, where
//! `media="(prefers-color-scheme: …)"` can select between them.

pub mod config;
pub mod generate;
pub mod output;
pub mod plugin;
pub mod types;
pub mod validate;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_helpers;
