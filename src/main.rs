//! Linden - a static site generator that tracks backlinks between pages.

mod build;
mod cli;
mod compiler;
mod config;
mod logger;
mod utils;

use anyhow::Result;
use build::{build_site, log_build_result};
use clap::Parser;
use cli::Cli;
use config::SiteConfig;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let report = build_site(&config)?;
    log_build_result(&report);
    Ok(())
}

/// Load and validate configuration from CLI arguments.
///
/// A missing config file is not an error: defaults apply.
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        log!("config"; "{} not found, using defaults", config_path.display());
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}
