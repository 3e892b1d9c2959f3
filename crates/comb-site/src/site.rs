//! Site navigation assembly.
//!
//! [`SiteBuilder`] wires the collaborators together:
//! - the [`ContentStore`] supplies known document ids
//! - the sidebars file supplies one declaration per tree
//! - [`comb_nav::build`] validates each tree under the configured link policy
//!
//! Navbar and footer links are checked last, against the finished trees and
//! page permalinks.
//!
//! Any fatal error aborts the whole assembly; no partial manifest is produced.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};

use comb_config::Config;
use comb_content::{ContentStore, Document};
use comb_nav::{NavigationTree, route_key};
use tracing::{debug, info};

use crate::error::SiteError;
use crate::links::check_site_links;
use crate::manifest::{DocumentSummary, ManifestPage, SiteManifest, TreeDiagnostic};
use crate::sidebars::{SidebarDecl, check_unique_ids, load_sidebars};

/// Builds a [`SiteManifest`] from a loaded [`Config`].
pub struct SiteBuilder<'a> {
    config: &'a Config,
}

impl<'a> SiteBuilder<'a> {
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Scan content, load sidebars and build every tree.
    ///
    /// # Errors
    ///
    /// Returns the first content, sidebars or navigation error.
    pub fn build(&self) -> Result<SiteManifest, SiteError> {
        let docs = &self.config.docs_resolved;
        let store = ContentStore::scan(&docs.source_dir)?;
        let sidebars = load_sidebars(&docs.sidebars_path)?;
        debug!(
            sidebars = sidebars.len(),
            path = %docs.sidebars_path.display(),
            "Loaded sidebars"
        );
        self.assemble(&store, &sidebars)
    }

    /// Build every tree against an already-loaded content store.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate tree ids, a failed tree build, a
    /// generated index address shared by two trees, or (under the `throw`
    /// policy) a broken navbar or footer link.
    pub fn assemble(
        &self,
        store: &ContentStore,
        sidebars: &[SidebarDecl],
    ) -> Result<SiteManifest, SiteError> {
        check_unique_ids(sidebars)?;

        let known = store.known_slugs();
        let policy = self.config.on_broken_links;

        let mut trees = Vec::with_capacity(sidebars.len());
        let mut generated_pages = Vec::new();
        let mut diagnostics = Vec::new();
        let mut routes: HashMap<String, String> = HashMap::new();

        for sidebar in sidebars {
            let outcome =
                comb_nav::build(&sidebar.id, &sidebar.items, &known, policy).map_err(|source| {
                    SiteError::Build {
                        tree: sidebar.id.clone(),
                        source,
                    }
                })?;

            // Collisions inside one tree are already rejected by the builder.
            let label_of = |slug: &str| store.get(slug).and_then(listing_label);
            for page in outcome.tree.generated_pages_with(label_of) {
                match routes.entry(route_key(&page.slug).to_owned()) {
                    Entry::Occupied(first) => {
                        return Err(SiteError::DuplicateGeneratedSlug {
                            slug: page.slug,
                            first_tree: first.get().clone(),
                            second_tree: sidebar.id.clone(),
                        });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(sidebar.id.clone());
                    }
                }
                generated_pages.push(ManifestPage {
                    tree: sidebar.id.clone(),
                    permalink: self.config.permalink(&page.slug),
                    page,
                });
            }

            diagnostics.extend(outcome.diagnostics.into_iter().map(|diagnostic| {
                TreeDiagnostic {
                    tree: sidebar.id.clone(),
                    diagnostic,
                }
            }));
            trees.push(outcome.tree);
        }

        // A document listed by several trees takes its position from the first.
        let mut home: HashMap<&str, &NavigationTree> = HashMap::new();
        for tree in &trees {
            for slug in tree.documents() {
                home.entry(slug).or_insert(tree);
            }
        }

        let documents: BTreeMap<String, DocumentSummary> = store
            .documents()
            .iter()
            .map(|doc| {
                let tree = home.get(doc.id.as_str()).copied();
                (
                    doc.id.clone(),
                    DocumentSummary {
                        title: doc.title.clone(),
                        sidebar_label: doc.sidebar_label.clone(),
                        permalink: self.config.permalink(&doc.id),
                        source_path: doc.source_path.clone(),
                        sidebar: tree.map(|tree| tree.id.clone()),
                        breadcrumbs: tree
                            .map(|tree| tree.breadcrumbs(&doc.id))
                            .unwrap_or_default(),
                        pagination: tree
                            .map(|tree| tree.pagination(&doc.id))
                            .unwrap_or_default(),
                    },
                )
            })
            .collect();

        let pages: HashSet<String> = documents
            .values()
            .map(|doc| doc.permalink.clone())
            .chain(generated_pages.iter().map(|page| page.permalink.clone()))
            .collect();
        let link_diagnostics = check_site_links(self.config, &trees, &pages)?;

        info!(
            trees = trees.len(),
            documents = store.len(),
            generated_pages = generated_pages.len(),
            diagnostics = diagnostics.len() + link_diagnostics.len(),
            "Site navigation built"
        );

        Ok(SiteManifest {
            title: self.config.title.clone(),
            tagline: self.config.tagline.clone(),
            url: self.config.url.clone(),
            base_url: self.config.base_url.clone(),
            default_locale: self.config.i18n.default_locale.clone(),
            locales: self.config.i18n.locales.clone(),
            trees,
            generated_pages,
            documents,
            diagnostics,
            navbar: self.config.navbar.clone(),
            footer: self.config.footer.clone(),
            link_diagnostics,
            theme: self.config.theme.clone(),
        })
    }
}

/// Listing label of a document without an explicit sidebar label.
fn listing_label(doc: &Document) -> Option<String> {
    doc.sidebar_label.clone().or_else(|| doc.title.clone())
}
