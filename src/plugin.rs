//! Build-tool integration.
//!
//! A [`ConfigGenerator`] is the host-agnostic half of a bundler plugin: the
//! host calls [`ConfigGenerator::build_start`] once when a build or dev
//! session starts and [`ConfigGenerator::handle_change`] for every changed
//! file. Each call runs the full load → validate → generate → write
//! pipeline from scratch; nothing is cached between runs.
//!
//! ```text
//! host                      ConfigGenerator
//! ────                      ───────────────
//! config resolved   ──────▶ config_resolved(root)
//! build start       ──────▶ build_start(Serve)   → writes files, returns watch path
//! file changed      ──────▶ handle_change(path)  → rewrites files, Regenerated
//! ```
//!
//! Without a host, [`watch`] drives the same hooks from filesystem events.

use crate::config::{ConfigError, SiteConfig, load_config_from_file};
use crate::generate::GeneratorOptions;
use crate::types::GenerationResult;
use crate::writer::write_config_files;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::borrow::Cow;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Path the dev server exposes for on-demand regeneration.
pub const DEV_ENDPOINT: &str = "/__generate-config";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to generate configuration files: {}", .0.join("; "))]
    Generation(Vec<String>),
}

/// Where the site config comes from.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// A `.json`/`.toml` file, relative paths resolved against the host root.
    File(PathBuf),
    /// A config already in memory. Nothing to watch.
    Inline(Box<SiteConfig>),
}

/// What the host is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// One-shot production build.
    Build,
    /// Interactive dev session.
    Serve,
}

/// Notification for the host after a regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotUpdate {
    /// Reload the page so the new manifest and browserconfig are fetched.
    FullReload,
}

/// Outcome of [`ConfigGenerator::handle_change`].
#[derive(Debug)]
pub struct Regenerated {
    pub update: HotUpdate,
    pub result: Result<GenerationResult, PipelineError>,
}

#[derive(Debug, Clone)]
pub struct PluginOptions {
    pub source: ConfigSource,
    /// Expose [`DEV_ENDPOINT`] in dev sessions.
    pub dev: bool,
    /// Regenerate when the config file changes during a dev session.
    pub watch: bool,
    /// Log each generation at info level.
    pub verbose: bool,
    pub generator: GeneratorOptions,
}

impl PluginOptions {
    pub fn new(source: ConfigSource) -> Self {
        Self {
            source,
            dev: false,
            watch: true,
            verbose: true,
            generator: GeneratorOptions::default(),
        }
    }
}

/// Result of [`ConfigGenerator::build_start`].
#[derive(Debug)]
pub struct BuildStart {
    pub result: Result<GenerationResult, PipelineError>,
    /// Config file the host should add to its watch list.
    pub watch_file: Option<PathBuf>,
}

#[derive(Debug)]
pub struct ConfigGenerator {
    options: PluginOptions,
    config_path: Option<PathBuf>,
}

impl ConfigGenerator {
    pub fn new(options: PluginOptions) -> Self {
        let config_path = match &options.source {
            ConfigSource::File(path) => Some(path.clone()),
            ConfigSource::Inline(_) => None,
        };
        Self {
            options,
            config_path,
        }
    }

    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    /// Resolve a relative config path against the host's project root.
    pub fn config_resolved(&mut self, root: &Path) {
        if let ConfigSource::File(path) = &self.options.source {
            self.config_path = Some(root.join(path));
        }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Whether config changes should trigger regeneration.
    pub fn watches(&self) -> bool {
        self.options.watch && self.config_path.is_some()
    }

    /// Run the full pipeline once. Failures are logged and returned.
    pub fn generate_files(&self) -> Result<GenerationResult, PipelineError> {
        if self.options.verbose {
            info!("generating configuration files");
        }

        let result = self.run_pipeline();
        match &result {
            Ok(generated) if self.options.verbose => {
                for file in &generated.files {
                    info!(file = %file.display(), "generated");
                }
            }
            Ok(_) => {}
            Err(PipelineError::Generation(errors)) => {
                for e in errors {
                    error!("{e}");
                }
            }
            Err(e) => error!("{e}"),
        }
        result
    }

    fn run_pipeline(&self) -> Result<GenerationResult, PipelineError> {
        let config = match &self.options.source {
            ConfigSource::Inline(config) => Cow::Borrowed(&**config),
            ConfigSource::File(path) => {
                let path = self.config_path.as_deref().unwrap_or(path.as_path());
                Cow::Owned(load_config_from_file(path)?)
            }
        };

        let result = write_config_files(&config, &self.options.generator);
        if result.is_success() {
            Ok(result)
        } else {
            Err(PipelineError::Generation(result.errors))
        }
    }

    /// Generate once at session start.
    pub fn build_start(&self, command: HostCommand) -> BuildStart {
        let result = self.generate_files();
        let watch_file = match command {
            HostCommand::Serve if self.watches() => self.config_path.clone(),
            _ => None,
        };
        BuildStart { result, watch_file }
    }

    /// Regenerate if `changed` is the watched config file.
    ///
    /// A reload is requested even when regeneration fails; the failure is
    /// carried in [`Regenerated::result`].
    pub fn handle_change(&self, changed: &Path) -> Option<Regenerated> {
        if !self.watches() || !self.is_config_file(changed) {
            return None;
        }
        if self.options.verbose {
            info!(file = %changed.display(), "config file changed, regenerating");
        }
        Some(Regenerated {
            update: HotUpdate::FullReload,
            result: self.generate_files(),
        })
    }

    fn is_config_file(&self, candidate: &Path) -> bool {
        let Some(config_path) = &self.config_path else {
            return false;
        };
        if candidate == config_path {
            return true;
        }
        match (candidate.canonicalize(), config_path.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// The on-demand endpoint, when `dev` is enabled.
    pub fn dev_endpoint(&self) -> Option<&'static str> {
        self.options.dev.then_some(DEV_ENDPOINT)
    }

    /// Handle a request to [`DEV_ENDPOINT`]: regenerate and describe the outcome.
    pub fn serve_generate_request(&self) -> serde_json::Value {
        match self.generate_files() {
            Ok(_) => serde_json::json!({
                "success": true,
                "message": "Configuration files generated",
            }),
            Err(e) => serde_json::json!({
                "success": false,
                "message": e.to_string(),
            }),
        }
    }
}

/// Block on filesystem events for the config file, calling `on_update`
/// after every regeneration until it returns [`ControlFlow::Break`].
///
/// Returns immediately when the generator has nothing to watch. Events are
/// handled one at a time, so runs never overlap.
pub fn watch<F>(generator: &ConfigGenerator, mut on_update: F) -> Result<(), notify::Error>
where
    F: FnMut(Regenerated) -> ControlFlow<()>,
{
    let Some(config_path) = generator.config_path().filter(|_| generator.watches()) else {
        return Ok(());
    };

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx)?;

    // Watch the directory: editors often replace the file instead of writing it.
    let dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    info!(file = %config_path.display(), "watching for changes");

    for res in rx {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "watch error");
                continue;
            }
        };
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            continue;
        }
        let Some(regenerated) = event.paths.iter().find_map(|p| generator.handle_change(p)) else {
            continue;
        };
        if on_update(regenerated).is_break() {
            break;
        }
    }

    Ok(())
}
