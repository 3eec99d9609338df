//! Site configuration module.
//!
//! Defines the [`SiteConfig`] schema and loads it from disk. A site config is
//! the single input of the generator: everything written to `manifest.json`,
//! `browserconfig.xml` and the meta-tag block is derived from it.
//!
//! ## Supported Formats
//!
//! | Extension | Handling |
//! |-----------|----------|
//! | `.json` | Parsed as strict JSON |
//! | `.toml` | Parsed as TOML (same key names) |
//! | `.js`, `.mjs`, `.ts` | Rejected: script modules are never evaluated |
//! | anything else | Rejected as unsupported |
//!
//! ## Example
//!
//! ```json
//! {
//!   "site": {
//!     "name": "Basic App",
//!     "shortName": "BasicApp",
//!     "description": "A simple and clean progressive web application",
//!     "version": "1.0.0"
//!   },
//!   "pwa": { "startUrl": "/", "display": "standalone" },
//!   "icons": {
//!     "manifest": [
//!       { "src": "/icons/icon-192x192.png", "sizes": "192x192", "type": "image/png" }
//!     ]
//!   }
//! }
//! ```
//!
//! ## Partial Configuration
//!
//! Every key is optional on input. Missing values deserialize to empty
//! strings, empty lists or `false`, so an incomplete record still loads and
//! the validator can report exactly which required fields are absent.
//! Keys are camelCase, matching the JSON the web tooling already produces.

use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Unsupported configuration file format: {extension}")]
    UnsupportedFormat { path: PathBuf, extension: String },
    #[error(
        "Refusing to evaluate script module {}: export the configuration as .json or .toml",
        .0.display()
    )]
    ScriptModule(PathBuf),
    /// Any failure after the format is known: unreadable file, invalid
    /// UTF-8, or malformed content.
    #[error("Failed to load configuration: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Deserialize an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Site configuration: identity, SEO, PWA, icons, browser tiles, splash
/// screens and shortcuts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub site: SiteInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub seo: SeoConfig,
    #[serde(deserialize_with = "null_as_default")]
    pub pwa: PwaConfig,
    #[serde(deserialize_with = "null_as_default")]
    pub icons: IconsConfig,
    #[serde(deserialize_with = "null_as_default")]
    pub browser: BrowserConfig,
    #[serde(deserialize_with = "null_as_default")]
    pub splash_screens: SplashScreens,
    #[serde(deserialize_with = "null_as_default")]
    pub shortcuts: Vec<Shortcut>,
}

/// Basic site identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteInfo {
    pub name: String,
    pub short_name: String,
    /// Document `<title>`.
    pub title: String,
    pub description: String,
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    /// Canonical URL of the deployed site.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Release version; appended to asset URLs as `?vx=<version>`.
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub open_graph: OpenGraph,
    #[serde(deserialize_with = "null_as_default")]
    pub twitter: TwitterCard,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpenGraph {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TwitterCard {
    pub card: String,
    pub site: String,
    pub creator: String,
    pub title: String,
    pub description: String,
    pub image: String,
}

/// A value with a light and a dark variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPair {
    pub light: String,
    pub dark: String,
}

/// Installability settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PwaConfig {
    /// Browser chrome colour per colour scheme (meta tags only).
    #[serde(deserialize_with = "null_as_default")]
    pub theme_color: ColorPair,
    #[serde(deserialize_with = "null_as_default")]
    pub background_color: ColorPair,
    pub display: String,
    pub orientation: String,
    pub start_url: String,
    pub scope: String,
    #[serde(deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IconsConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub favicon: ColorPair,
    pub apple_touch_icon: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mask_icon: MaskIcon,
    /// Icons listed in the manifest. At least one is required.
    #[serde(deserialize_with = "null_as_default")]
    pub manifest: Vec<ManifestIcon>,
}

/// Safari pinned-tab icon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskIcon {
    pub light: String,
    pub dark: String,
    #[serde(deserialize_with = "null_as_default")]
    pub color: ColorPair,
}

/// An icon descriptor. The key names are identical in the site config and
/// in the generated manifest, so the same type serves both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrowserConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub ms_application: MsApplication,
    #[serde(deserialize_with = "null_as_default")]
    pub apple: AppleWebApp,
}

/// Windows start-menu tile settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MsApplication {
    pub name: String,
    pub start_url: String,
    pub tile_color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppleWebApp {
    pub mobile_web_app_title: String,
    pub mobile_web_app_capable: bool,
    pub mobile_web_app_status_bar_style: String,
}

/// Launch images per colour scheme, emitted in list order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashScreens {
    #[serde(deserialize_with = "null_as_default")]
    pub light: Vec<SplashScreen>,
    #[serde(deserialize_with = "null_as_default")]
    pub dark: Vec<SplashScreen>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashScreen {
    /// CSS media query selecting the device.
    pub media: String,
    pub href: String,
}

/// App shortcut shown in the launcher's context menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Shortcut {
    pub name: String,
    pub short_name: String,
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icons: Vec<ManifestIcon>,
}

// =============================================================================
// Loading
// =============================================================================

/// Load a site config from a `.json` or `.toml` file.
///
/// The extension decides the parser (case-insensitive). Script modules
/// (`.js`, `.mjs`, `.ts`) are rejected without being read.
pub fn load_config_from_file(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    debug!(path = %path.display(), %extension, "loading site config");

    match extension.as_str() {
        "json" => {
            let content = read_source(path)?;
            serde_json::from_str(&content).map_err(|e| parse_error(path, e))
        }
        "toml" => {
            let content = read_source(path)?;
            toml::from_str(&content).map_err(|e| parse_error(path, e))
        }
        "js" | "mjs" | "ts" => Err(ConfigError::ScriptModule(path.to_path_buf())),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }),
    }
}

fn read_source(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| parse_error(path, e))
}

fn parse_error(path: &Path, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
