//! Result values shared between the library stages and the drivers.
//!
//! Both are transient: built by one call, read by the caller, dropped.

use std::path::PathBuf;

/// Outcome of [`crate::validate::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Human-readable messages, in check order.
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of [`crate::writer::write_config_files`].
///
/// `files` lists only paths that were actually written, so a partial
/// failure still reports the artifacts that landed on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    pub files: Vec<PathBuf>,
    pub errors: Vec<String>,
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// A failed result that wrote nothing.
    pub fn failed(errors: Vec<String>) -> Self {
        Self {
            files: Vec::new(),
            errors,
        }
    }
}
