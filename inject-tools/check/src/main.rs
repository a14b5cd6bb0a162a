//! Injection Configuration Checker Binary
//!
//! Run with: `inject-check [OPTIONS] --registry <FILE> <CONFIG>`

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use inject_check::{check, load_container, Config, OutputFormat};
use inject_config::LoadSession;

#[derive(Parser)]
#[command(name = "inject-check")]
#[command(about = "Resolves the constructor and method members of a container configuration")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Container configuration (XML)
    #[arg(value_name = "CONFIG")]
    file: Option<PathBuf>,

    /// Type registry file (.toml or .json); may be repeated
    #[arg(short, long = "registry", value_name = "FILE")]
    registries: Vec<PathBuf>,

    /// Checker configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Stop at the first registration that fails
    #[arg(long)]
    fail_fast: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    if let Some(Commands::Config) = &cli.command {
        print!("{}", Config::default().to_toml()?);
        return Ok(());
    }

    let Some(path) = &cli.file else {
        bail!("no container configuration given");
    };

    let config = build_config(&cli)?;
    let container = load_container(&config)?;
    let session = LoadSession::with_aliases(config.type_resolver());
    let document = session
        .load_config_file(path)
        .with_context(|| format!("Failed to load configuration: {}", path.display()))?;

    let report = check(&config, &container, &document);
    match config.output {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.render_json()?),
    }

    if !report.is_success() {
        error!("{} registration(s) could not be applied", report.failures());
        std::process::exit(1);
    }
    info!("all {} registration(s) resolved", report.registrations.len());

    Ok(())
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // Override with CLI options
    config.registries.extend(cli.registries.iter().cloned());
    if let Some(format) = cli.format {
        config.output = format;
    }
    config.fail_fast |= cli.fail_fast;

    Ok(config)
}
