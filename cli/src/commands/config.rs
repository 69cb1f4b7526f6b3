// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use codementor_core::domain::server_config::{ServerConfig, CONFIG_PATH_ENV};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,

        /// Print the effective configuration as YAML
        #[arg(long)]
        yaml: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration (demo seed included)
    Generate {
        /// Output path (default: ./codementor.yaml)
        #[arg(short, long, default_value = "./codementor.yaml")]
        output: PathBuf,
    },
}

pub async fn handle_command(
    command: ConfigCommand,
    config_override: Option<PathBuf>,
) -> Result<()> {
    match command {
        ConfigCommand::Show { paths, yaml } => show(config_override, paths, yaml).await,
        ConfigCommand::Validate { file } => validate(file.or(config_override)).await,
        ConfigCommand::Generate { output } => generate(output).await,
    }
}

async fn show(config_override: Option<PathBuf>, show_paths: bool, as_yaml: bool) -> Result<()> {
    let config = ServerConfig::load_or_default(config_override.clone())
        .context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!(
            "  2. {}: {}",
            CONFIG_PATH_ENV,
            std::env::var(CONFIG_PATH_ENV)
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. ./codementor.yaml");
        println!("  4. ~/.codementor/config.yaml");
        println!("  5. /etc/codementor/config.yaml");
        println!();
    }

    if as_yaml {
        let rendered = serde_yaml::to_string(&config).context("Failed to render configuration")?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("{}", "Current configuration:".bold());
    println!();

    let server = &config.spec.server;
    println!("{}", "HTTP Server:".bold());
    println!("  Bind: {}:{}", server.host, server.port);
    match &server.static_dir {
        Some(dir) => println!("  Static files: {}", dir.display()),
        None => println!("  Static files: {}", "(disabled)".dimmed()),
    }
    println!();

    let analysis = &config.spec.analysis;
    println!("{}", "Code Analysis:".bold());
    println!("  Endpoint: {}", analysis.endpoint);
    println!("  Model: {}", analysis.model);
    println!("  Timeout: {}s", analysis.timeout_secs);
    println!();

    println!("{}", "Question Routing:".bold());
    match config.spec.routing.fallback_instructor {
        Some(id) => println!("  Fallback instructor: {}", id),
        None => println!("  Fallback instructor: {}", "(none)".dimmed()),
    }
    println!();

    let seed = &config.spec.seed;
    println!("{}", "Seed:".bold());
    println!("  Accounts: {}", seed.accounts.len());
    for account in &seed.accounts {
        println!("    - {} #{} ({:?})", account.name.bold(), account.id, account.role);
    }
    println!("  Rosters: {}", seed.rosters.len());
    for roster in &seed.rosters {
        println!(
            "    - {} #{} → owner {}, {} members",
            roster.name.bold(),
            roster.id,
            roster.owner,
            roster.members.len()
        );
    }
    println!();

    Ok(())
}

async fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = ServerConfig::load_or_default(config_path)
        .context("Failed to load configuration")?;

    config
        .validate()
        .context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

async fn generate(output: PathBuf) -> Result<()> {
    ServerConfig::default()
        .to_yaml_file(&output)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    println!(
        "{}",
        format!("✓ Configuration generated: {}", output.display()).green()
    );

    Ok(())
}
