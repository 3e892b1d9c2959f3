//! Navigation manifest handed to the renderer.

use std::collections::BTreeMap;
use std::path::PathBuf;

use comb_config::{FooterConfig, NavbarConfig};
use comb_nav::{Breadcrumb, Diagnostic, GeneratedPage, NavigationTree, Pagination};
use serde::Serialize;

use crate::links::LinkDiagnostic;

/// Everything the renderer needs to lay out navigation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteManifest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    pub url: String,
    pub base_url: String,
    pub default_locale: String,
    pub locales: Vec<String>,
    /// Trees in declaration order.
    pub trees: Vec<NavigationTree>,
    /// Landing pages of every tree, in tree order then pre-order.
    pub generated_pages: Vec<ManifestPage>,
    /// Documents from the content store, by id.
    pub documents: BTreeMap<String, DocumentSummary>,
    /// Missing documents kept under the `warn` policy.
    pub diagnostics: Vec<TreeDiagnostic>,
    pub navbar: NavbarConfig,
    pub footer: FooterConfig,
    /// Broken navbar and footer links kept under the `warn` policy.
    pub link_diagnostics: Vec<LinkDiagnostic>,
    /// Presentation options from the site config.
    pub theme: toml::Table,
}

/// Generated page with its address.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ManifestPage {
    /// Tree the category belongs to.
    pub tree: String,
    pub permalink: String,
    #[serde(flatten)]
    pub page: GeneratedPage,
}

/// Document fields the renderer needs for navigation labels and links.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_label: Option<String>,
    pub permalink: String,
    pub source_path: PathBuf,
    /// First tree listing the document; breadcrumbs and pagination come from it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<String>,
    /// Enclosing categories, outermost first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Neighbouring document ids in the sidebar.
    pub pagination: Pagination,
}

/// Diagnostic tagged with its tree.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct TreeDiagnostic {
    pub tree: String,
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
}

impl SiteManifest {
    /// Look up a tree by id.
    pub fn tree(&self, id: &str) -> Option<&NavigationTree> {
        self.trees.iter().find(|tree| tree.id == id)
    }

    /// Number of document references across all trees.
    pub fn reference_count(&self) -> usize {
        self.trees.iter().map(|tree| tree.documents().len()).sum()
    }
}
