//! readme-translate - README Translation Workflow
//!
//! This is the main entry point. It loads the configuration, applies command
//! line overrides and runs the requested command.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::{Level, info};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use readme_translate::cli::{Args, Commands};
use readme_translate::config::{Backend, Config, DEFAULT_CONFIG_FILE};
use readme_translate::error::ReadmeError;
use readme_translate::language::parse_language_list;
use readme_translate::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    // Load configuration
    let mut config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if Path::new(DEFAULT_CONFIG_FILE).exists() {
                info!("Found {} in current directory, loading...", DEFAULT_CONFIG_FILE);
                Config::from_file(DEFAULT_CONFIG_FILE)?
            } else {
                Config::default()
            }
        }
    };

    match args.command {
        Commands::Run { input, output_dir, backend, languages, terms } => {
            if let Some(input) = input {
                config.document.input = input;
            }
            if output_dir.is_some() {
                config.document.output_dir = output_dir;
            }
            if let Some(backend) = backend {
                config.backend = parse_backend(&backend)?;
            }
            if let Some(languages) = languages {
                config.languages = parse_language_list(&languages)?;
            }
            if let Some(terms) = terms {
                extend_terms(&mut config, &terms);
            }
            config.validate()?;

            info!("Translating {} into {} language(s)",
                  config.document.input.display(), config.languages.len());

            let workflow = Workflow::new(config)?;
            let report = workflow.run().await?;

            println!("\n{} succeeded, {} failed", report.succeeded(), report.failed());
        }
        Commands::Mask { input, terms } => {
            if let Some(input) = input {
                config.document.input = input;
            }
            if let Some(terms) = terms {
                extend_terms(&mut config, &terms);
            }

            let input = config.document.input.clone();
            if !input.exists() {
                return Err(ReadmeError::FileNotFound(input.display().to_string()).into());
            }
            let document = tokio::fs::read_to_string(&input).await?;

            let workflow = Workflow::new(config)?;
            print!("{}", workflow.mask_document(&document));
        }
        Commands::Languages => {
            let output_dir = config.output_dir();

            println!("\nTarget Languages ({:?} backend):", config.backend);
            println!("{:<10} {:<25} {:<40}", "Code", "Name", "Output File");
            println!("{}", "-".repeat(75));

            for target in &config.languages {
                let output = output_dir.join(config.output_file_name(&target.code));
                let note = if target.matches_code(&config.document.source_language) {
                    " (source, copied)"
                } else {
                    ""
                };
                println!("{:<10} {:<25} {}{}",
                    target.code, target.name, output.display(), note);
            }
        }
        Commands::Init { output, force } => {
            if output.exists() && !force {
                return Err(ReadmeError::Config(format!(
                    "{} already exists. Use --force to overwrite",
                    output.display()
                )).into());
            }
            Config::default().save_to_file(&output)?;
            println!("Wrote default configuration to {}", output.display());
        }
    }

    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".readme-translate").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "readme-translate.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - console: {}, file: {}",
          log_level, log_dir.join("readme-translate.log").display());

    Ok(())
}

/// Parse translation backend from string
fn parse_backend(backend: &str) -> Result<Backend> {
    match backend.to_lowercase().as_str() {
        "library" => Ok(Backend::Library),
        "api" => Ok(Backend::Api),
        _ => Err(ReadmeError::Config(format!(
            "Invalid backend '{}'. Valid backends: library, api",
            backend
        )).into()),
    }
}

/// Append comma-separated terms to the configured protected terms
fn extend_terms(config: &mut Config, terms: &str) {
    config.protected_terms.extend(
        terms
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
    );
}
