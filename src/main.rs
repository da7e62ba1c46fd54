//! archviz - Architecture diagram renderer and deployment kit generator
//!
//! Run with no arguments to render the built-in architecture diagram.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use archviz::Config;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command.unwrap_or_default() {
        Commands::Render {
            input,
            output,
            scale,
        } => cli::cmd_render(&config, input, output, scale),
        Commands::Inspect { input } => cli::cmd_inspect(&config, input),
        Commands::Scaffold {
            out_dir,
            app_name,
            domain,
        } => cli::cmd_scaffold(&config, out_dir, app_name, domain),
        Commands::Config { key, value } => cli::cmd_config(config, cli.config, key, value),
    }
}
