//! Config validation.
//!
//! [`validate`] never fails: every problem becomes one message in the
//! returned [`ValidationResult`]. Drivers that prefer `?` convert it with
//! [`ValidationResult::into_result`].

use crate::config::SiteConfig;
use crate::types::ValidationResult;
use thiserror::Error;
use url::Url;

/// One or more required fields are missing or malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration validation failed: {}", .errors.join("; "))]
pub struct ValidationError {
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

/// Check required fields and the shape of URL-bearing fields.
pub fn validate(config: &SiteConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.site.name.is_empty() {
        errors.push("site.name is required".to_string());
    }
    if config.site.description.is_empty() {
        errors.push("site.description is required".to_string());
    }
    if config.site.version.is_empty() {
        errors.push("site.version is required".to_string());
    }
    if config.pwa.start_url.is_empty() {
        errors.push("pwa.startUrl is required".to_string());
    }
    if config.icons.manifest.is_empty() {
        errors.push("icons.manifest array is required".to_string());
    }

    // Indices are part of the message format; keep this order stable.
    let url_fields = [
        ("icons.favicon.light", &config.icons.favicon.light),
        ("icons.favicon.dark", &config.icons.favicon.dark),
        ("icons.appleTouchIcon", &config.icons.apple_touch_icon),
        ("seo.openGraph.image", &config.seo.open_graph.image),
        ("seo.twitter.image", &config.seo.twitter.image),
    ];

    for (index, (field, value)) in url_fields.iter().enumerate() {
        if !value.is_empty() && !is_valid_url(value) {
            errors.push(format!(
                "Invalid URL format in configuration field {index} ({field})"
            ));
        }
    }

    ValidationResult { errors }
}

/// Absolute URLs and root/dot-relative paths are accepted.
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
        || value.starts_with('/')
        || value.starts_with("./")
        || value.starts_with("../")
}
