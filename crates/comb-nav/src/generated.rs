//! Generated category landing pages.

use serde::Serialize;

use crate::tree::{Category, NavNode};

/// Landing page descriptor handed to the renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedPage {
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Immediate children of the category, in display order.
    pub items: Vec<ListingEntry>,
}

/// One row of a generated listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    pub label: String,
    /// Document slug, or the landing target of a child category.
    pub slug: String,
    pub is_category: bool,
}

/// Synthesize the landing page of a category.
///
/// Returns `None` when the category has no generated index. The listing
/// covers immediate children only; nested categories appear as a single
/// entry pointing at their own landing target.
pub fn resolve_generated_index(category: &Category) -> Option<GeneratedPage> {
    resolve_generated_index_with(category, |_| None)
}

/// Like [`resolve_generated_index`], labelling documents without an explicit
/// sidebar label through `document_label` before falling back to the slug.
pub fn resolve_generated_index_with(
    category: &Category,
    document_label: impl Fn(&str) -> Option<String>,
) -> Option<GeneratedPage> {
    let index = category.generated_index()?;

    let items = category
        .children
        .iter()
        .map(|node| listing_entry(node, &document_label))
        .collect();

    Some(GeneratedPage {
        slug: index.slug.clone(),
        title: index.title.clone(),
        description: index.description.clone(),
        items,
    })
}

/// Comparison key for page addresses: `/category/x/` and `category/x` match.
pub fn route_key(slug: &str) -> &str {
    slug.trim_matches('/')
}

fn listing_entry(
    node: &NavNode,
    document_label: &impl Fn(&str) -> Option<String>,
) -> ListingEntry {
    let label = match node {
        NavNode::Document(doc) => doc
            .label
            .clone()
            .or_else(|| document_label(&doc.slug))
            .unwrap_or_else(|| doc.slug.clone()),
        NavNode::Category(category) => category.label.clone(),
    };

    ListingEntry {
        label,
        slug: node.target().map(ToOwned::to_owned).unwrap_or_default(),
        is_category: node.is_category(),
    }
}
