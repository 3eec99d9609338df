//! Shared test utilities.
//!
//! Fixtures live in `fixtures/` at the crate root:
//!
//! - `site.json`: full config with splash screens, shortcuts and CDN URLs
//! - `basic.json` / `basic.toml`: the same small config in both formats
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let result = write_config_files(&sample_config(), &options_in(tmp.path()));
//! assert!(result.is_success());
//! ```

use std::path::{Path, PathBuf};

use crate::config::{SiteConfig, load_config_from_file};
use crate::generate::GeneratorOptions;

/// Absolute path of a file under `fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

/// The full, valid `fixtures/site.json` config.
pub fn sample_config() -> SiteConfig {
    load_config_from_file(&fixture_path("site.json"))
        .unwrap_or_else(|e| panic!("fixture site.json failed to load: {e}"))
}

/// Default generator options writing into `dir`.
pub fn options_in(dir: &Path) -> GeneratorOptions {
    GeneratorOptions {
        output_dir: dir.to_path_buf(),
        ..Default::default()
    }
}

/// Copy a fixture into `dir`, returning the new path.
pub fn copy_fixture(name: &str, dir: &Path) -> PathBuf {
    let dest = dir.join(name);
    std::fs::copy(fixture_path(name), &dest)
        .unwrap_or_else(|e| panic!("copying fixture {name} failed: {e}"));
    dest
}
