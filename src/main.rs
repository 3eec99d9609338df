use clap::Parser;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::process::ExitCode;
use vx_config_generator::generate::{self, GeneratorOptions};
use vx_config_generator::plugin::{self, ConfigGenerator, ConfigSource, PluginOptions};
use vx_config_generator::{config, output, validate, writer};

#[derive(Parser)]
#[command(name = "vx-config-generator")]
#[command(about = "Generate manifest.json and browserconfig.xml from a site config")]
#[command(long_about = "\
Generate manifest.json and browserconfig.xml from a site config

The site config is a .json or .toml file describing the app: name, version,
PWA settings, icons, tile colour, splash screens and shortcuts. It is
validated first; nothing is written if a required field is missing.

Output:

  public/
  ├── manifest.json        # PWA manifest (snake_case keys)
  └── browserconfig.xml    # Windows tile icons + colour

Examples:

  vx-config-generator -c ./site.json
  vx-config-generator -c ./site.toml -o ./dist --cdn-base https://cdn.example.com")]
#[command(disable_version_flag = true)]
struct Cli {
    /// Path to the site configuration file (.json or .toml)
    #[arg(short, long)]
    config: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "./public")]
    output: PathBuf,

    /// Manifest file name
    #[arg(long, default_value = "manifest.json")]
    manifest_name: String,

    /// Browser config file name
    #[arg(long, default_value = "browserconfig.xml")]
    browserconfig_name: String,

    /// CDN base URL for generated asset URLs
    #[arg(long)]
    cdn_base: Option<String>,

    /// Override site.version from the config
    #[arg(long)]
    version: Option<String>,

    /// Show resolved settings and debug logs
    #[arg(short, long)]
    verbose: bool,

    /// Show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    /// Print the HTML meta-tag block after generating
    #[arg(long)]
    print_meta: bool,

    /// Keep running and regenerate whenever the config file changes
    #[arg(long)]
    watch: bool,
}

impl Cli {
    fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            output_dir: self.output.clone(),
            manifest_file_name: self.manifest_name.clone(),
            browser_config_file_name: self.browserconfig_name.clone(),
            cdn_base: self.cdn_base.clone().unwrap_or_default(),
            version: self.version.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            output::print_errors("Error:", &[e.to_string()]);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let options = cli.generator_options();
    if cli.verbose {
        output::print_settings(&cli.config, &options);
        println!();
    }

    println!("==> Loading configuration");
    let loaded = config::load_config_from_file(&cli.config)?;
    let config = options.apply(&loaded);
    if cli.verbose {
        println!(
            "Loaded config for: {} v{}",
            config.site.name, config.site.version
        );
    }

    let validation = validate::validate(&config);
    if !validation.is_valid() {
        output::print_errors("Configuration validation failed:", &validation.errors);
        return Ok(ExitCode::FAILURE);
    }

    if cli.dry_run {
        output::print_dry_run(&options);
        return Ok(ExitCode::SUCCESS);
    }

    println!("==> Generating configuration files");
    let result = writer::write_config_files(&config, &options);
    output::print_generation_result(&result);
    if !result.is_success() {
        return Ok(ExitCode::FAILURE);
    }

    if cli.print_meta {
        println!();
        println!("{}", generate::generate_meta_tags(&config, &options));
    }

    if cli.watch {
        watch_config(cli, options)?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Hand the config file to the plugin watch loop. Blocks until interrupted.
fn watch_config(cli: &Cli, options: GeneratorOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut plugin_options = PluginOptions::new(ConfigSource::File(cli.config.clone()));
    plugin_options.verbose = cli.verbose;
    plugin_options.generator = options;

    let mut generator = ConfigGenerator::new(plugin_options);
    generator.config_resolved(&std::env::current_dir()?);

    println!(
        "==> Watching {} for changes (Ctrl-C to stop)",
        cli.config.display()
    );
    plugin::watch(&generator, |regenerated| {
        match &regenerated.result {
            Ok(result) => {
                println!("==> Regenerated configuration files");
                output::print_generation_result(result);
            }
            Err(e) => output::print_pipeline_error(e),
        }
        ControlFlow::Continue(())
    })?;
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the `--verbose` default.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let default = if verbose {
        "vx_config_generator=debug"
    } else {
        "warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
