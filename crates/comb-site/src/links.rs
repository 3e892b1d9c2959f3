//! Navbar and footer link checks.
//!
//! Internal links under the docs route must land on a document or a generated
//! index, and sidebar links must name a built tree. Links elsewhere on the
//! site and external links are not checked.

use std::collections::HashSet;
use std::fmt;

use comb_config::{Config, LinkTarget};
use comb_nav::{LinkPolicy, NavigationTree, route_key};
use serde::Serialize;
use tracing::debug;

use crate::error::SiteError;

/// Broken site link kept under [`LinkPolicy::Warn`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LinkDiagnostic {
    /// Config path of the link, e.g. `navbar.items[1]`.
    pub location: String,
    pub label: String,
    /// Unresolved `to` path or sidebar id.
    pub target: String,
}

impl fmt::Display for LinkDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Link \"{}\" at {} points at missing page \"{}\"",
            self.label, self.location, self.target
        )
    }
}

/// Check every navbar and footer link against the built site.
///
/// `pages` holds the permalinks of all documents and generated indexes.
pub(crate) fn check_site_links(
    config: &Config,
    trees: &[NavigationTree],
    pages: &HashSet<String>,
) -> Result<Vec<LinkDiagnostic>, SiteError> {
    let page_keys: HashSet<&str> = pages.iter().map(|page| route_key(page)).collect();
    let docs_root = config.permalink("");
    let docs_key = route_key(&docs_root);

    let mut diagnostics = Vec::new();
    for site_link in config.links() {
        let link = site_link.link;
        let target = match link.target() {
            Some(LinkTarget::Sidebar(id)) => {
                if trees.iter().any(|tree| tree.id == id) {
                    continue;
                }
                id
            }
            Some(LinkTarget::Internal(to)) => {
                let resolved = resolve_internal(&config.base_url, to);
                let key = route_key(&resolved);
                if !is_under(key, docs_key) {
                    debug!(
                        location = %site_link.location,
                        to,
                        "Skipping link outside the docs route"
                    );
                    continue;
                }
                if page_keys.contains(key) {
                    continue;
                }
                to
            }
            Some(LinkTarget::External(_)) | None => continue,
        };

        match config.on_broken_links {
            LinkPolicy::Throw => {
                return Err(SiteError::BrokenLink {
                    location: site_link.location,
                    label: link.label.clone(),
                    target: target.to_owned(),
                });
            }
            LinkPolicy::Warn => {
                debug!(location = %site_link.location, target, "Keeping broken site link");
                diagnostics.push(LinkDiagnostic {
                    location: site_link.location,
                    label: link.label.clone(),
                    target: target.to_owned(),
                });
            }
            LinkPolicy::Ignore => {}
        }
    }
    Ok(diagnostics)
}

/// Absolute path of a `to` link: `base_url` joined with the path, without
/// query or fragment.
fn resolve_internal(base_url: &str, to: &str) -> String {
    let path = to.split(['#', '?']).next().unwrap_or_default();
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn is_under(key: &str, root: &str) -> bool {
    root.is_empty()
        || key == root
        || key
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'))
}
