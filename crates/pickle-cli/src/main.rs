//! Pickle - PHP extension fetcher
//!
//! Usage:
//!   pickle download apcu redis@6.0.2      # PECL packages
//!   pickle download https://github.com/xdebug/xdebug#3.3.1
//!   pickle info apcu-beta                 # Resolve without downloading
//!   pickle config init                    # Write a default pickle.toml

mod report;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pickle_core::config::ConfigStore;
use pickle_core::error::PickleError;
use pickle_core::package::{PackageDescriptor, read_configure_options};
use pickle_core::resolver::PackageResolver;

#[derive(Parser)]
#[command(name = "pickle")]
#[command(about = "PHP extension package fetcher", long_about = None)]
struct Cli {
    /// Path to pickle.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download one or more packages
    ///
    /// Each specifier is either a PECL name (`apcu`, `pecl/apcu-beta`,
    /// `apcu@5.1.23`) or a repository URL with an optional `#reference`.
    /// Packages land in `<dest>/<package name>`.
    Download {
        /// Package specifiers
        #[arg(required = true)]
        specifiers: Vec<String>,

        /// Directory that package directories are created in
        #[arg(long, short, default_value = ".")]
        dest: PathBuf,

        /// Show configure options of each downloaded package
        #[arg(long)]
        show_options: bool,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Resolve a specifier and show its descriptor without downloading
    Info {
        /// Package specifier
        specifier: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Manage pickle.toml
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write a config file with the default settings
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config file location and effective settings
    Show,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
    /// Only report failures
    Quiet,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "pickle=debug,info"
    } else {
        "pickle=info,warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let store = match &cli.config {
        Some(path) => ConfigStore::from_path(path),
        None => ConfigStore::from_default_location()?,
    };
    // Config commands must work even when the current file does not parse.
    if let Commands::Config(command) = &cli.command {
        return run_config(&store, command);
    }

    let config = store.load()?;
    tracing::debug!(path = %store.config_path().display(), "configuration loaded");
    let resolver = PackageResolver::from_config(&config);

    let failures = match cli.command {
        Commands::Download {
            specifiers,
            dest,
            show_options,
            format,
        } => run_download(&resolver, &specifiers, &dest, show_options, format)?,
        Commands::Info { specifier, format } => run_info(&resolver, &specifier, format)?,
        Commands::Config(_) => 0,
    };

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Returns the number of specifiers that failed.
fn run_download(
    resolver: &PackageResolver,
    specifiers: &[String],
    dest: &Path,
    show_options: bool,
    format: OutputFormat,
) -> Result<usize> {
    let mut failures = 0;
    let mut downloaded = Vec::new();

    for specifier in specifiers {
        match resolver.download(specifier, dest) {
            Ok(result) => {
                if let OutputFormat::Table = format {
                    println!(
                        "✓ Downloaded '{}' into {}",
                        result.descriptor.name(),
                        result.path.display()
                    );
                    println!("{}", report::render_info(&result.descriptor));
                    if show_options {
                        print_options(&result.path);
                    }
                }
                downloaded.push(result);
            }
            Err(err) => {
                failures += 1;
                report_failure(&err);
            }
        }
    }

    if let OutputFormat::Json = format {
        let output: Vec<_> = downloaded
            .iter()
            .map(|d| {
                serde_json::json!({
                    "package": d.descriptor,
                    "path": d.path,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(failures)
}

fn run_info(resolver: &PackageResolver, specifier: &str, format: OutputFormat) -> Result<usize> {
    let resolution = match resolver.resolve(specifier) {
        Ok(resolution) => resolution,
        Err(err) => {
            report_failure(&PickleError::from(err));
            return Ok(1);
        }
    };

    match format {
        OutputFormat::Table => print_descriptor(&resolution.descriptor),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&resolution.descriptor)?);
        }
        OutputFormat::Quiet => {}
    }
    Ok(0)
}

fn run_config(store: &ConfigStore, command: &ConfigCommand) -> Result<()> {
    let path = store.config_path().display();
    match command {
        ConfigCommand::Init { force } => {
            if store.init(*force)? {
                println!("✓ Wrote default configuration to {path}");
            } else {
                println!("Config file {path} already exists; use --force to replace it");
            }
        }
        ConfigCommand::Show => {
            let config = store.load()?;
            println!("# {path}");
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}

fn print_descriptor(descriptor: &PackageDescriptor) {
    println!("{}", report::render_info(descriptor));
    if let Some(url) = descriptor.dist_url() {
        println!("  Distribution: {}", url);
    }
    if let (Some(url), Some(reference)) = (descriptor.source_url(), descriptor.source_reference()) {
        println!("  Source: {} ({})", url, reference);
    }
}

/// A manifest that cannot be read does not fail the download it belongs to.
fn print_options(package_dir: &Path) {
    match read_configure_options(package_dir) {
        Ok(options) if options.is_empty() => println!("  No configure options"),
        Ok(options) => println!("{}", report::render_options(&options)),
        Err(err) => {
            tracing::warn!(
                path = %package_dir.display(),
                error = format!("{err:#}"),
                "could not read configure options"
            );
        }
    }
}

fn report_failure(err: &PickleError) {
    match err {
        PickleError::Resolve(err) => eprintln!("✗ {}", err),
        PickleError::Download(err) => {
            eprintln!("✗ {}", err);
            eprintln!("  cause: {}", err.retrieval_error());
            eprintln!(
                "  Retry manually once the cause is fixed; {} may hold a partial download.",
                err.destination().display()
            );
        }
    }
}
