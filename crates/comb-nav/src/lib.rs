//! Navigation tree builder for comb.
//!
//! This crate provides:
//! - [`ItemDecl`]: the declarative sidebar description, deserializable from YAML or JSON
//! - [`build`]: validation of a declaration into an ordered [`NavigationTree`]
//! - [`resolve_generated_index`]: landing page descriptors for categories
//!
//! The builder is pure: document existence is supplied by the caller as a
//! set of known slugs, so nothing here touches the filesystem.
//!
//! # Quick Start
//!
//! ```
//! use std::collections::HashSet;
//! use comb_nav::{CategoryDecl, ItemDecl, LinkPolicy, build};
//!
//! let declaration = vec![
//!     ItemDecl::doc("intro"),
//!     ItemDecl::Category(
//!         CategoryDecl::new("Tutorials", vec![ItemDecl::doc("tutorials/first")])
//!             .with_generated_index(),
//!     ),
//! ];
//! let known: HashSet<String> = ["intro", "tutorials/first"]
//!     .into_iter()
//!     .map(str::to_owned)
//!     .collect();
//!
//! let outcome = build("docs", &declaration, &known, LinkPolicy::Throw).unwrap();
//!
//! assert_eq!(outcome.tree.items.len(), 2);
//! assert_eq!(outcome.tree.generated_pages()[0].slug, "/category/tutorials");
//! ```

mod builder;
mod declaration;
mod error;
mod generated;
mod tree;

pub use builder::{BuildOutcome, Diagnostic, LinkPolicy, UnknownPolicy, build};
pub use declaration::{
    CategoryDecl, CategoryKind, CategoryLinkDecl, DocDecl, DocKind, ItemDecl, slugify,
};
pub use error::{BuildError, NavPath};
pub use generated::{
    GeneratedPage, ListingEntry, resolve_generated_index, resolve_generated_index_with, route_key,
};
pub use tree::{
    Breadcrumb, Category, CategoryLink, DocumentRef, GeneratedIndex, NavNode, NavigationTree,
    Pagination,
};
