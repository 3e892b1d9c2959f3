//! CLI command implementations.

mod check;
mod manifest;

use std::path::PathBuf;

use clap::Args;
use comb_config::{CliSettings, Config};
use comb_nav::LinkPolicy;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use manifest::ManifestArgs;

/// Options shared by every command that builds a site.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover comb.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Sidebars declaration file (overrides config).
    #[arg(long)]
    sidebars: Option<PathBuf>,

    /// Severity of references to missing documents: throw, warn or ignore.
    #[arg(long, env = "COMB_ON_BROKEN_LINKS")]
    on_broken_links: Option<LinkPolicy>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl SiteArgs {
    fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            sidebars_path: self.sidebars.clone(),
            on_broken_links: self.on_broken_links,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}
