//! Site assembly errors.

use std::path::PathBuf;

use comb_content::ContentError;
use comb_nav::BuildError;

/// Error returned when assembling site navigation.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Content store could not be built.
    #[error("{0}")]
    Content(#[from] ContentError),
    /// Sidebars file could not be read.
    #[error("Cannot read sidebars file {}: {source}", path.display())]
    SidebarsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Sidebars file is not a valid declaration.
    #[error("Invalid sidebars file {}: {message}", path.display())]
    SidebarsParse { path: PathBuf, message: String },
    /// Two trees share an id.
    #[error("Sidebar id \"{0}\" is declared more than once")]
    DuplicateTreeId(String),
    /// A tree failed validation.
    #[error("Sidebar \"{tree}\": {source}")]
    Build {
        tree: String,
        #[source]
        source: BuildError,
    },
    /// Two trees generate a landing page at the same address.
    #[error(
        "Generated index slug \"{slug}\" is used by both sidebar \"{first_tree}\" and sidebar \"{second_tree}\""
    )]
    DuplicateGeneratedSlug {
        slug: String,
        first_tree: String,
        second_tree: String,
    },
    /// A navbar or footer link points at a page the site does not build.
    #[error("Link \"{label}\" at {location} points at missing page \"{target}\"")]
    BrokenLink {
        location: String,
        label: String,
        target: String,
    },
}
