//! Declaration validation and tree construction.
//!
//! [`build`] lowers the declaration into [`NavNode`]s (applying link defaults
//! and assigning positions) and then runs four passes over the whole tree,
//! stopping at the first error:
//!
//! 1. every category has at least one child
//! 2. sibling labels are pairwise distinct
//! 3. document slugs resolve, with severity set by [`LinkPolicy`]
//! 4. generated index slugs are non-empty and unique across the tree

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::declaration::{CategoryLinkDecl, ItemDecl, slugify};
use crate::error::{BuildError, NavPath};
use crate::generated::route_key;
use crate::tree::{Category, CategoryLink, DocumentRef, GeneratedIndex, NavNode, NavigationTree};

/// Severity of references to documents that do not exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    /// Abort the build.
    #[default]
    Throw,
    /// Keep the reference and report a [`Diagnostic`].
    Warn,
    /// Keep the reference silently.
    Ignore,
}

impl fmt::Display for LinkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Throw => "throw",
            Self::Warn => "warn",
            Self::Ignore => "ignore",
        })
    }
}

/// Error returned when parsing an unrecognized [`LinkPolicy`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown link policy \"{0}\" (expected throw, warn or ignore)")]
pub struct UnknownPolicy(String);

impl FromStr for LinkPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "throw" => Ok(Self::Throw),
            "warn" => Ok(Self::Warn),
            "ignore" => Ok(Self::Ignore),
            other => Err(UnknownPolicy(other.to_owned())),
        }
    }
}

/// Missing document kept in the tree under [`LinkPolicy::Warn`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub slug: String,
    pub path: NavPath,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Document \"{}\" referenced at {} does not exist",
            self.slug, self.path
        )
    }
}

/// Successful build result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BuildOutcome {
    pub tree: NavigationTree,
    /// Empty unless the policy is [`LinkPolicy::Warn`].
    pub diagnostics: Vec<Diagnostic>,
}

/// Build a validated navigation tree from a declaration.
///
/// # Arguments
///
/// * `tree_id` - Identifier of the resulting tree
/// * `declaration` - Top-level entries in display order
/// * `known_slugs` - Ids of every document in the content store
/// * `policy` - Severity of references missing from `known_slugs`
///
/// # Errors
///
/// Returns the first [`BuildError`] found. No tree is returned on error.
pub fn build(
    tree_id: &str,
    declaration: &[ItemDecl],
    known_slugs: &HashSet<String>,
    policy: LinkPolicy,
) -> Result<BuildOutcome, BuildError> {
    debug!(
        tree = tree_id,
        items = declaration.len(),
        %policy,
        "Building navigation tree"
    );

    let items = lower(declaration);
    let root = NavPath::root();

    check_structure(&items, &root)?;
    check_labels(&items, &root)?;

    let mut resolver = Resolver {
        known_slugs,
        policy,
        diagnostics: Vec::new(),
    };
    resolver.resolve(&items, &root)?;

    check_generated_slugs(&items, &root, &mut HashMap::new())?;

    debug!(
        tree = tree_id,
        diagnostics = resolver.diagnostics.len(),
        "Navigation tree built"
    );

    Ok(BuildOutcome {
        tree: NavigationTree {
            id: tree_id.to_owned(),
            items,
        },
        diagnostics: resolver.diagnostics,
    })
}

fn lower(declaration: &[ItemDecl]) -> Vec<NavNode> {
    declaration
        .iter()
        .enumerate()
        .map(|(position, item)| lower_item(item, position))
        .collect()
}

fn lower_item(item: &ItemDecl, position: usize) -> NavNode {
    match item {
        ItemDecl::Slug(slug) => NavNode::Document(DocumentRef {
            slug: slug.clone(),
            label: None,
            position,
        }),
        ItemDecl::Doc(doc) => NavNode::Document(DocumentRef {
            slug: doc.id.clone(),
            label: doc.label.clone(),
            position,
        }),
        ItemDecl::Category(decl) => NavNode::Category(Category {
            label: decl.label.clone(),
            position,
            children: lower(&decl.items),
            link: decl
                .link
                .as_ref()
                .map(|link| lower_link(link, &decl.label)),
            collapsible: decl.collapsible.unwrap_or(true),
            collapsed: decl.collapsed.unwrap_or(true),
        }),
    }
}

fn lower_link(link: &CategoryLinkDecl, label: &str) -> CategoryLink {
    match link {
        CategoryLinkDecl::GeneratedIndex {
            title,
            description,
            slug,
        } => CategoryLink::GeneratedIndex(GeneratedIndex {
            title: title.clone().unwrap_or_else(|| label.to_owned()),
            description: description.clone(),
            slug: slug.clone().unwrap_or_else(|| default_generated_slug(label)),
        }),
        CategoryLinkDecl::Doc { id } => CategoryLink::Doc { slug: id.clone() },
    }
}

/// `/category/<slug>`, or empty when the label has no letters or digits.
fn default_generated_slug(label: &str) -> String {
    let slug = slugify(label);
    if slug.is_empty() {
        return slug;
    }
    format!("/category/{slug}")
}

fn check_structure(nodes: &[NavNode], parent: &NavPath) -> Result<(), BuildError> {
    for node in nodes {
        if let NavNode::Category(category) = node {
            let path = parent.child(&category.label);
            if category.children.is_empty() {
                return Err(BuildError::EmptyCategory { path });
            }
            check_structure(&category.children, &path)?;
        }
    }
    Ok(())
}

/// Siblings are checked before descending, so the shallowest collision wins.
fn check_labels(nodes: &[NavNode], parent: &NavPath) -> Result<(), BuildError> {
    let mut seen = HashSet::new();
    for label in nodes.iter().filter_map(NavNode::label) {
        if !seen.insert(label) {
            return Err(BuildError::DuplicateLabel {
                label: label.to_owned(),
                parent: parent.clone(),
            });
        }
    }

    for node in nodes {
        if let NavNode::Category(category) = node {
            check_labels(&category.children, &parent.child(&category.label))?;
        }
    }
    Ok(())
}

struct Resolver<'a> {
    known_slugs: &'a HashSet<String>,
    policy: LinkPolicy,
    diagnostics: Vec<Diagnostic>,
}

impl Resolver<'_> {
    fn resolve(&mut self, nodes: &[NavNode], parent: &NavPath) -> Result<(), BuildError> {
        for node in nodes {
            match node {
                NavNode::Document(doc) => self.check(&doc.slug, parent)?,
                NavNode::Category(category) => {
                    let path = parent.child(&category.label);
                    if let Some(CategoryLink::Doc { slug }) = &category.link {
                        self.check(slug, &path)?;
                    }
                    self.resolve(&category.children, &path)?;
                }
            }
        }
        Ok(())
    }

    fn check(&mut self, slug: &str, parent: &NavPath) -> Result<(), BuildError> {
        if self.known_slugs.contains(slug) {
            return Ok(());
        }

        let path = parent.child(slug);
        match self.policy {
            LinkPolicy::Throw => {
                return Err(BuildError::DanglingReference {
                    slug: slug.to_owned(),
                    path,
                });
            }
            LinkPolicy::Warn => {
                debug!(slug, path = %path, "Keeping reference to a missing document");
                self.diagnostics.push(Diagnostic {
                    slug: slug.to_owned(),
                    path,
                });
            }
            LinkPolicy::Ignore => {}
        }
        Ok(())
    }
}

fn check_generated_slugs(
    nodes: &[NavNode],
    parent: &NavPath,
    seen: &mut HashMap<String, NavPath>,
) -> Result<(), BuildError> {
    for node in nodes {
        let NavNode::Category(category) = node else {
            continue;
        };
        let path = parent.child(&category.label);

        if let Some(index) = category.generated_index() {
            if route_key(&index.slug).is_empty() {
                return Err(BuildError::EmptyGeneratedSlug { path });
            }
            match seen.entry(route_key(&index.slug).to_owned()) {
                Entry::Occupied(first) => {
                    return Err(BuildError::DuplicateGeneratedSlug {
                        slug: index.slug.clone(),
                        path,
                        first: first.get().clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(path.clone());
                }
            }
        }

        check_generated_slugs(&category.children, &path, seen)?;
    }
    Ok(())
}
