//! Site navigation assembly for comb.
//!
//! This crate provides:
//! - [`SiteBuilder`]: builds every sidebar of a site against its content
//! - [`SiteManifest`]: the serializable handoff to the renderer
//! - [`load_sidebars`]: reading the sidebars declaration file
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use comb_config::Config;
//! use comb_site::SiteBuilder;
//!
//! let config = Config::load(None, None)?;
//! let manifest = SiteBuilder::new(&config).build()?;
//!
//! for page in &manifest.generated_pages {
//!     println!("{} -> {}", page.page.title, page.permalink);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod links;
mod manifest;
mod sidebars;
mod site;

pub use error::SiteError;
pub use links::LinkDiagnostic;
pub use manifest::{DocumentSummary, ManifestPage, SiteManifest, TreeDiagnostic};
pub use sidebars::{SidebarDecl, load_sidebars};
pub use site::SiteBuilder;
