//! CLI output formatting.
//!
//! Each display has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes it out. Format functions
//! are pure: no I/O, no side effects. Anything that needs the filesystem,
//! like file sizes, is passed in.
//!
//! # Output Format
//!
//! ```text
//! ==> Loading configuration
//! ==> Generating configuration files
//! Generated files:
//!     public/manifest.json (1.72 KB)
//!     public/browserconfig.xml (631 Bytes)
//! ```
//!
//! Failures are a header followed by one bullet per error:
//!
//! ```text
//! Configuration validation failed:
//!     • site.name is required
//!     • icons.manifest array is required
//! ```

use crate::generate::GeneratorOptions;
use crate::plugin::PipelineError;
use crate::types::GenerationResult;
use crate::writer;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Header line followed by one indented bullet per error.
pub fn format_errors(header: &str, errors: &[String]) -> Vec<String> {
    let mut lines = vec![header.to_string()];
    lines.extend(errors.iter().map(|e| format!("{}\u{2022} {}", indent(1), e)));
    lines
}

/// Print an error list to stderr.
pub fn print_errors(header: &str, errors: &[String]) {
    for line in format_errors(header, errors) {
        eprintln!("{}", line);
    }
}

/// A failed regeneration in watch mode.
pub fn format_pipeline_error(err: &PipelineError) -> Vec<String> {
    match err {
        PipelineError::Generation(errors) => {
            format_errors("Failed to generate configuration files:", errors)
        }
        PipelineError::Config(e) => format_errors("Error:", &[e.to_string()]),
    }
}

pub fn print_pipeline_error(err: &PipelineError) {
    for line in format_pipeline_error(err) {
        eprintln!("{}", line);
    }
}

/// Resolved settings, shown with `--verbose`.
pub fn format_settings(config_path: &Path, options: &GeneratorOptions) -> Vec<String> {
    let mut lines = vec![
        format!("Config file: {}", config_path.display()),
        format!("Output directory: {}", options.output_dir.display()),
        format!("Manifest name: {}", options.manifest_file_name),
        format!("Browser config name: {}", options.browser_config_file_name),
    ];
    if !options.cdn_base.is_empty() {
        lines.push(format!("CDN base: {}", options.cdn_base));
    }
    if let Some(version) = &options.version {
        lines.push(format!("Version override: {}", version));
    }
    lines
}

pub fn print_settings(config_path: &Path, options: &GeneratorOptions) {
    for line in format_settings(config_path, options) {
        println!("{}", line);
    }
}

/// The two files a real run would write.
pub fn format_dry_run(options: &GeneratorOptions) -> Vec<String> {
    vec![
        "Dry run: no files will be written".to_string(),
        String::new(),
        "Would generate:".to_string(),
        format!("{}{}", indent(1), options.manifest_path().display()),
        format!("{}{}", indent(1), options.browser_config_path().display()),
    ]
}

pub fn print_dry_run(options: &GeneratorOptions) {
    for line in format_dry_run(options) {
        println!("{}", line);
    }
}

/// Written files with their sizes, or the error list on failure.
pub fn format_generation_result<F>(result: &GenerationResult, size_of: F) -> Vec<String>
where
    F: Fn(&Path) -> String,
{
    if !result.is_success() {
        return format_errors("Failed to generate configuration files:", &result.errors);
    }

    let mut lines = vec!["Generated files:".to_string()];
    for file in &result.files {
        lines.push(format!(
            "{}{} ({})",
            indent(1),
            file.display(),
            size_of(file)
        ));
    }
    lines
}

pub fn print_generation_result(result: &GenerationResult) {
    let lines = format_generation_result(result, writer::file_size);
    if result.is_success() {
        for line in lines {
            println!("{}", line);
        }
    } else {
        for line in lines {
            eprintln!("{}", line);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
