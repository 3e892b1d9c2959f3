//! Navbar and footer links.
//!
//! Every link sets exactly one target:
//! - `to`: a path on this site, relative to `base_url`
//! - `href`: an external URL, never checked
//! - `sidebar_id`: a sidebar, linking to its first document

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Top navigation bar.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NavbarConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub items: Vec<LinkConfig>,
}

/// Page footer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FooterConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Link columns in display order.
    pub links: Vec<FooterColumn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// Titled column of footer links.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FooterColumn {
    pub title: String,
    #[serde(default)]
    pub items: Vec<LinkConfig>,
}

/// Single navbar or footer link.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct LinkConfig {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<LinkPosition>,
}

/// Side of the navbar a link is placed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPosition {
    Left,
    Right,
}

/// What a link points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// Path on this site, relative to `base_url`.
    Internal(&'a str),
    External(&'a str),
    /// Sidebar id.
    Sidebar(&'a str),
}

/// A configured link with its location in the config file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteLink<'a> {
    /// Config path of the link, e.g. `footer.links[0].items[2]`.
    pub location: String,
    pub link: &'a LinkConfig,
}

impl LinkConfig {
    /// Declared target, or `None` if the link sets zero or several.
    pub fn target(&self) -> Option<LinkTarget<'_>> {
        match (&self.to, &self.href, &self.sidebar_id) {
            (Some(to), None, None) => Some(LinkTarget::Internal(to)),
            (None, Some(href), None) => Some(LinkTarget::External(href)),
            (None, None, Some(id)) => Some(LinkTarget::Sidebar(id)),
            _ => None,
        }
    }

    pub(crate) fn validate(&self, location: &str) -> Result<(), ConfigError> {
        if self.label.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{location}.label cannot be empty"
            )));
        }
        match self.target() {
            None => Err(ConfigError::Validation(format!(
                "{location} must set exactly one of to, href or sidebar_id"
            ))),
            Some(LinkTarget::Internal(to)) if !to.starts_with('/') => Err(
                ConfigError::Validation(format!("{location}.to must start with /")),
            ),
            Some(_) => Ok(()),
        }
    }
}

/// Navbar links first, then footer columns in order.
pub(crate) fn collect_links<'a>(
    navbar: &'a NavbarConfig,
    footer: &'a FooterConfig,
) -> Vec<SiteLink<'a>> {
    let navbar_links = navbar.items.iter().enumerate().map(|(i, link)| SiteLink {
        location: format!("navbar.items[{i}]"),
        link,
    });
    let footer_links = footer.links.iter().enumerate().flat_map(|(col, column)| {
        column.items.iter().enumerate().map(move |(i, link)| SiteLink {
            location: format!("footer.links[{col}].items[{i}]"),
            link,
        })
    });
    navbar_links.chain(footer_links).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn link(toml: &str) -> LinkConfig {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_link_targets() {
        assert_eq!(
            link("label = \"Docs\"\nsidebar_id = \"docsSidebar\"").target(),
            Some(LinkTarget::Sidebar("docsSidebar"))
        );
        assert_eq!(
            link("label = \"Ref\"\nto = \"/docs/category/reference\"").target(),
            Some(LinkTarget::Internal("/docs/category/reference"))
        );
        assert_eq!(
            link("label = \"GitHub\"\nhref = \"https://github.com/ApiaryData/apiary\"").target(),
            Some(LinkTarget::External("https://github.com/ApiaryData/apiary"))
        );
    }

    #[test]
    fn test_link_with_two_targets_is_invalid() {
        let both = link("label = \"Docs\"\nto = \"/docs\"\nhref = \"https://example.com\"");

        assert_eq!(both.target(), None);
        let err = both.validate("navbar.items[0]").unwrap_err();
        assert!(err.to_string().contains("navbar.items[0] must set exactly one"));
    }

    #[test]
    fn test_link_without_target_is_invalid() {
        assert!(link("label = \"Nowhere\"").validate("navbar.items[3]").is_err());
    }

    #[test]
    fn test_relative_to_is_invalid() {
        let err = link("label = \"Ref\"\nto = \"docs/intro\"")
            .validate("footer.links[0].items[0]")
            .unwrap_err();

        assert!(err.to_string().contains("footer.links[0].items[0].to"));
    }

    #[test]
    fn test_unknown_link_field_rejected() {
        let result: Result<LinkConfig, _> =
            toml::from_str("label = \"Docs\"\ntype = \"docSidebar\"");

        assert!(result.is_err());
    }

    #[test]
    fn test_link_serializes_camel_case() {
        let json = serde_json::to_value(link(
            "label = \"Docs\"\nsidebar_id = \"docsSidebar\"\nposition = \"left\"",
        ))
        .unwrap();

        assert_eq!(json["sidebarId"], "docsSidebar");
        assert_eq!(json["position"], "left");
        assert!(json.get("to").is_none());
    }

    #[test]
    fn test_collect_links_locations() {
        let navbar: NavbarConfig =
            toml::from_str("[[items]]\nlabel = \"Docs\"\nsidebar_id = \"docs\"\n").unwrap();
        let footer: FooterConfig = toml::from_str(
            r#"
[[links]]
title = "Docs"
items = [{ label = "A", to = "/docs/a" }, { label = "B", to = "/docs/b" }]

[[links]]
title = "More"
items = [{ label = "GitHub", href = "https://github.com" }]
"#,
        )
        .unwrap();

        let locations: Vec<_> = collect_links(&navbar, &footer)
            .into_iter()
            .map(|site_link| site_link.location)
            .collect();

        assert_eq!(
            locations,
            vec![
                "navbar.items[0]",
                "footer.links[0].items[0]",
                "footer.links[0].items[1]",
                "footer.links[1].items[0]",
            ]
        );
    }
}
