//! Treecompare CLI Binary
//!
//! Command-line interface for comparing two directory trees.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use std::process;
use tracing::{error, info};
use treecompare::cli::{exit_code, map_error, Cli, RunContext};
use treecompare::config::{ConfigLoader, TreeCompareConfig};
use treecompare::logging::{init_logging, LoggingConfig};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(1);
        }
    };

    // Initialize logging early
    let logging_config = build_logging_config(&cli, &config.logging);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Treecompare CLI starting");

    let Some(mode) = cli.mode() else {
        println!("specify either --unique, --duplicate or --purge\n");
        let _ = Cli::command().print_help();
        return;
    };

    let context = match RunContext::new(&cli, config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Invalid arguments: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(exit_code(&e));
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match context.execute(mode, &mut out) {
        Ok(count) => {
            info!(results = count, "Command completed successfully");
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(exit_code(&e));
        }
    }
}

/// Load the optional config file named on the command line
fn load_config(cli: &Cli) -> anyhow::Result<TreeCompareConfig> {
    let path = cli.config.as_deref();
    ConfigLoader::load(path).with_context(|| match path {
        Some(path) => format!("Failed to load config file {}", path.display()),
        None => "Failed to build default configuration".to_string(),
    })
}

/// Build logging configuration from CLI args and the config file.
/// Logging stays off unless --verbose or --log-level asks for it.
fn build_logging_config(cli: &Cli, base: &LoggingConfig) -> LoggingConfig {
    let mut config = base.clone();

    if !cli.verbose && cli.log_level.is_none() {
        config.level = "off".to_string();
        return config;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
