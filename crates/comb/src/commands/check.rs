//! `comb check` command implementation.

use clap::Args;
use comb_site::SiteBuilder;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub(crate) site: SiteArgs,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load_config()?;

        output.detail(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.detail(&format!(
            "Sidebars: {}",
            config.docs_resolved.sidebars_path.display()
        ));

        let manifest = SiteBuilder::new(&config).build()?;

        for tree in &manifest.trees {
            output.info(&format!(
                "{}: {} documents, {} categories",
                tree.id,
                tree.documents().len(),
                tree.categories().len()
            ));
        }
        for entry in &manifest.diagnostics {
            output.warning(&format!("{}: {}", entry.tree, entry.diagnostic));
        }
        for diagnostic in &manifest.link_diagnostics {
            output.warning(&diagnostic.to_string());
        }

        output.success(&format!(
            "Navigation OK: {} sidebars, {} generated pages",
            manifest.trees.len(),
            manifest.generated_pages.len()
        ));
        Ok(())
    }
}
