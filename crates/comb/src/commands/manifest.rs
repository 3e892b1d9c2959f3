//! `comb manifest` command implementation.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;
use comb_site::{SiteBuilder, SiteManifest};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the manifest command.
#[derive(Args)]
pub(crate) struct ManifestArgs {
    #[command(flatten)]
    pub(crate) site: SiteArgs,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ManifestArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load_config()?;
        let manifest = SiteBuilder::new(&config).build()?;

        for entry in &manifest.diagnostics {
            output.warning(&format!("{}: {}", entry.tree, entry.diagnostic));
        }
        for diagnostic in &manifest.link_diagnostics {
            output.warning(&diagnostic.to_string());
        }

        if let Some(path) = &self.output {
            write_manifest(BufWriter::new(File::create(path)?), &manifest)?;
            output.success(&format!("Manifest written to {}", path.display()));
        } else {
            write_manifest(io::stdout().lock(), &manifest)?;
        }
        Ok(())
    }
}

fn write_manifest<W: Write>(mut writer: W, manifest: &SiteManifest) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut writer, manifest)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
