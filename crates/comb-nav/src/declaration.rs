//! Declarative sidebar description.
//!
//! Entries mix bare strings and objects:
//!
//! ```yaml
//! - intro
//! - type: doc
//!   id: reference/cli
//!   label: CLI
//! - label: Tutorials
//!   link:
//!     type: generated-index
//!     description: Guided lessons.
//!   items:
//!     - tutorials/your-first-apiary
//! ```
//!
//! Shape detection happens once, at deserialization. Everything downstream
//! dispatches on [`ItemDecl`] variants.

use serde::{Deserialize, Serialize};

/// A single sidebar entry as written by the author.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemDecl {
    /// Bare document id.
    Slug(String),
    /// Document reference in object form.
    Doc(DocDecl),
    /// Category grouping further entries.
    Category(CategoryDecl),
}

impl ItemDecl {
    /// Shorthand for a bare document reference.
    pub fn doc(slug: impl Into<String>) -> Self {
        Self::Slug(slug.into())
    }
}

/// Marker for the `type: doc` discriminator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    #[default]
    Doc,
}

/// Marker for the optional `type: category` discriminator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    #[default]
    Category,
}

/// Document reference with an explicit sidebar label.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocDecl {
    #[serde(rename = "type", default)]
    pub kind: DocKind,
    /// Document id.
    pub id: String,
    /// Sidebar label overriding the document title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Category entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryDecl {
    #[serde(rename = "type", default)]
    pub kind: CategoryKind,
    /// Display label, unique among siblings.
    pub label: String,
    /// Child entries in display order.
    pub items: Vec<ItemDecl>,
    /// Optional landing target for the category header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<CategoryLinkDecl>,
    /// Whether the renderer lets the reader collapse this category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,
    /// Whether the category starts collapsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

impl CategoryDecl {
    /// Create a category without a landing link.
    pub fn new(label: impl Into<String>, items: Vec<ItemDecl>) -> Self {
        Self {
            label: label.into(),
            items,
            ..Self::default()
        }
    }

    /// Attach a generated index with all fields defaulted.
    #[must_use]
    pub fn with_generated_index(mut self) -> Self {
        self.link = Some(CategoryLinkDecl::GeneratedIndex {
            title: None,
            description: None,
            slug: None,
        });
        self
    }

    /// Attach a generated index at an explicit slug.
    #[must_use]
    pub fn with_generated_slug(mut self, slug: impl Into<String>) -> Self {
        self.link = Some(CategoryLinkDecl::GeneratedIndex {
            title: None,
            description: None,
            slug: Some(slug.into()),
        });
        self
    }

    /// Link the category header to an existing document.
    #[must_use]
    pub fn with_doc_link(mut self, id: impl Into<String>) -> Self {
        self.link = Some(CategoryLinkDecl::Doc { id: id.into() });
        self
    }
}

/// Category landing target as declared.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CategoryLinkDecl {
    /// Synthesized landing page listing the immediate children.
    ///
    /// `title` defaults to the category label and `slug` to
    /// `/category/<slugified label>`.
    GeneratedIndex {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slug: Option<String>,
    },
    /// Existing document used as the landing page.
    Doc { id: String },
}

/// Convert a label into a URL-safe kebab-case segment.
///
/// Letters and digits of any script are kept and lowercased. Runs of other
/// characters collapse into a single `-`; leading and trailing dashes are
/// dropped.
///
/// ```
/// assert_eq!(comb_nav::slugify("How-to Guides"), "how-to-guides");
/// assert_eq!(comb_nav::slugify("  API / Reference "), "api-reference");
/// assert_eq!(comb_nav::slugify("Référence"), "référence");
/// ```
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_dash = false;
    for c in label.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
