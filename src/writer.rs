//! Writes generated artifacts to disk.
//!
//! [`write_config_files`] revalidates, creates the output directory, then
//! writes `manifest.json` and `browserconfig.xml` independently. A failed
//! artifact is recorded and the other is still attempted; nothing already
//! written is rolled back.
//!
//! ```text
//! public/
//! ├── manifest.json        # generate_manifest, pretty JSON
//! └── browserconfig.xml    # generate_browser_config
//! ```

use crate::config::SiteConfig;
use crate::generate::{GeneratorOptions, generate_browser_config, generate_manifest};
use crate::types::GenerationResult;
use crate::validate::validate;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// Generate and write both artifacts.
///
/// The version override in `options` is applied before validation.
pub fn write_config_files(config: &SiteConfig, options: &GeneratorOptions) -> GenerationResult {
    let config = options.apply(config);

    let validation = validate(&config);
    if !validation.is_valid() {
        return GenerationResult::failed(validation.errors);
    }

    if let Err(e) = ensure_dir(&options.output_dir) {
        return GenerationResult::failed(vec![format!("Failed to write config files: {e}")]);
    }

    let mut result = GenerationResult::default();

    let manifest_path = options.manifest_path();
    match write_manifest(&config, options, &manifest_path) {
        Ok(()) => result.files.push(manifest_path),
        Err(e) => {
            warn!(path = %manifest_path.display(), error = %e, "manifest write failed");
            result
                .errors
                .push(format!("Failed to generate manifest: {e}"));
        }
    }

    let browser_config_path = options.browser_config_path();
    match write_browser_config(&config, options, &browser_config_path) {
        Ok(()) => result.files.push(browser_config_path),
        Err(e) => {
            warn!(path = %browser_config_path.display(), error = %e, "browserconfig write failed");
            result
                .errors
                .push(format!("Failed to generate browserconfig: {e}"));
        }
    }

    result
}

fn write_manifest(
    config: &SiteConfig,
    options: &GeneratorOptions,
    path: &Path,
) -> Result<(), WriteError> {
    let manifest = generate_manifest(config, options);
    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), "wrote manifest");
    Ok(())
}

fn write_browser_config(
    config: &SiteConfig,
    options: &GeneratorOptions,
    path: &Path,
) -> Result<(), WriteError> {
    fs::write(path, generate_browser_config(config, options))?;
    debug!(path = %path.display(), "wrote browserconfig");
    Ok(())
}

/// Create `path` and its parents. An existing directory is fine.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    match fs::create_dir_all(path) {
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        other => other,
    }
}

/// Size of a file on disk in human units, `0 Bytes` if it can't be read.
pub fn file_size(path: &Path) -> String {
    fs::metadata(path)
        .map(|m| format_file_size(m.len()))
        .unwrap_or_else(|_| format_file_size(0))
}

/// Format a byte count with two-decimal precision: `1536` → `"1.5 KB"`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}
