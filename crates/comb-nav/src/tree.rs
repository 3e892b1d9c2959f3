//! Validated navigation tree.
//!
//! Produced by [`build`](crate::build) and immutable afterwards. Children are
//! kept in declaration order at every level; `position` mirrors the index in
//! the parent so serialized consumers do not depend on array order.

use serde::Serialize;

use crate::generated::{GeneratedPage, resolve_generated_index, resolve_generated_index_with};

/// A named navigation tree (one sidebar).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavigationTree {
    /// Tree identifier, unique within a site.
    pub id: String,
    /// Top-level nodes in display order.
    pub items: Vec<NavNode>,
}

/// Navigation node: a document leaf or a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavNode {
    Document(DocumentRef),
    Category(Category),
}

/// Leaf referencing a document by slug.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentRef {
    pub slug: String,
    /// Explicit sidebar label, if the declaration gave one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Index within the parent.
    pub position: usize,
}

/// Interior node grouping children under a label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Category {
    pub label: String,
    /// Index within the parent.
    pub position: usize,
    pub children: Vec<NavNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<CategoryLink>,
    pub collapsible: bool,
    pub collapsed: bool,
}

/// Resolved landing target of a category header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CategoryLink {
    GeneratedIndex(GeneratedIndex),
    Doc { slug: String },
}

/// Generated index with defaults applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedIndex {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub slug: String,
}

/// Ancestor category of a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    /// Landing target, when the category declares a link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Neighbouring documents in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl NavNode {
    pub fn position(&self) -> usize {
        match self {
            Self::Document(doc) => doc.position,
            Self::Category(category) => category.position,
        }
    }

    /// Label participating in sibling uniqueness, if any.
    ///
    /// Documents only carry one when the declaration sets it explicitly.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Document(doc) => doc.label.as_deref(),
            Self::Category(category) => Some(&category.label),
        }
    }

    /// Page the node links to when clicked.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Document(doc) => Some(&doc.slug),
            Self::Category(category) => category.landing_slug(),
        }
    }

    pub fn is_category(&self) -> bool {
        matches!(self, Self::Category(_))
    }
}

impl Category {
    pub fn generated_index(&self) -> Option<&GeneratedIndex> {
        match &self.link {
            Some(CategoryLink::GeneratedIndex(index)) => Some(index),
            _ => None,
        }
    }

    /// Slug of the declared link, ignoring the first-document fallback.
    pub fn link_slug(&self) -> Option<&str> {
        match &self.link {
            Some(CategoryLink::GeneratedIndex(index)) => Some(&index.slug),
            Some(CategoryLink::Doc { slug }) => Some(slug),
            None => None,
        }
    }

    /// Where the category header points: its declared link, otherwise the
    /// target of its first child.
    pub fn landing_slug(&self) -> Option<&str> {
        self.link_slug()
            .or_else(|| self.children.iter().find_map(NavNode::target))
    }
}

impl NavigationTree {
    /// Landing pages for every category with a generated index, in pre-order.
    pub fn generated_pages(&self) -> Vec<GeneratedPage> {
        self.categories()
            .into_iter()
            .filter_map(resolve_generated_index)
            .collect()
    }

    /// [`generated_pages`](Self::generated_pages) with listing labels for
    /// unlabelled documents taken from `document_label`.
    pub fn generated_pages_with(
        &self,
        document_label: impl Fn(&str) -> Option<String>,
    ) -> Vec<GeneratedPage> {
        self.categories()
            .into_iter()
            .filter_map(|category| resolve_generated_index_with(category, &document_label))
            .collect()
    }

    /// All categories in pre-order.
    pub fn categories(&self) -> Vec<&Category> {
        let mut categories = Vec::new();
        walk(&self.items, &mut |node| {
            if let NavNode::Category(category) = node {
                categories.push(category);
            }
        });
        categories
    }

    /// Document slugs in display order. A slug listed twice appears twice.
    pub fn documents(&self) -> Vec<&str> {
        let mut slugs = Vec::new();
        walk(&self.items, &mut |node| {
            if let NavNode::Document(doc) = node {
                slugs.push(doc.slug.as_str());
            }
        });
        slugs
    }

    /// Categories enclosing the first occurrence of `slug`, outermost first.
    ///
    /// Returns an empty list for top-level and unknown documents.
    pub fn breadcrumbs(&self, slug: &str) -> Vec<Breadcrumb> {
        let mut trail = Vec::new();
        if find_trail(&self.items, slug, &mut trail) {
            trail
                .into_iter()
                .map(|category| Breadcrumb {
                    label: category.label.clone(),
                    slug: category.link_slug().map(ToOwned::to_owned),
                })
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Previous and next documents around the first occurrence of `slug`.
    pub fn pagination(&self, slug: &str) -> Pagination {
        let documents = self.documents();
        let Some(idx) = documents.iter().position(|&doc| doc == slug) else {
            return Pagination::default();
        };

        Pagination {
            previous: idx
                .checked_sub(1)
                .and_then(|prev| documents.get(prev))
                .map(|&doc| doc.to_owned()),
            next: documents.get(idx + 1).map(|&doc| doc.to_owned()),
        }
    }
}

/// Pre-order traversal.
fn walk<'a>(nodes: &'a [NavNode], visit: &mut impl FnMut(&'a NavNode)) {
    for node in nodes {
        visit(node);
        if let NavNode::Category(category) = node {
            walk(&category.children, visit);
        }
    }
}

fn find_trail<'a>(nodes: &'a [NavNode], slug: &str, trail: &mut Vec<&'a Category>) -> bool {
    for node in nodes {
        match node {
            NavNode::Document(doc) if doc.slug == slug => return true,
            NavNode::Document(_) => {}
            NavNode::Category(category) => {
                trail.push(category);
                if find_trail(&category.children, slug, trail) {
                    return true;
                }
                trail.pop();
            }
        }
    }
    false
}
