//! Site configuration for comb.
//!
//! Parses `comb.toml` with serde and provides auto-discovery of the config
//! file in parent directories. The loaded [`Config`] is validated once and
//! then passed around read-only.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `title`
//! - `url`
//! - `base_url`
//!
//! ## Example
//!
//! ```toml
//! title = "Apiary"
//! url = "https://apiaryio.com"
//! base_url = "/"
//! on_broken_links = "throw"
//!
//! [i18n]
//! default_locale = "en"
//! locales = ["en"]
//!
//! [docs]
//! source_dir = "docs"
//! sidebars_path = "sidebars.yaml"
//!
//! [navbar]
//! title = "Apiary"
//! items = [
//!     { label = "Docs", sidebar_id = "docsSidebar", position = "left" },
//!     { label = "API Reference", to = "/docs/category/reference", position = "left" },
//! ]
//!
//! [theme.color_mode]
//! default_mode = "light"
//! ```

mod expand;
mod links;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use comb_nav::LinkPolicy;
use serde::Deserialize;

pub use links::{
    FooterColumn, FooterConfig, LinkConfig, LinkPosition, LinkTarget, NavbarConfig, SiteLink,
};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override sidebars file.
    pub sidebars_path: Option<PathBuf>,
    /// Override broken link policy.
    pub on_broken_links: Option<LinkPolicy>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "comb.toml";

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site title.
    pub title: String,
    /// Short tagline shown under the title.
    pub tagline: Option<String>,
    /// Public origin of the site (scheme and host).
    pub url: String,
    /// Path prefix under `url`. Starts and ends with `/`.
    pub base_url: String,
    /// Severity of sidebar entries and site links pointing at missing pages.
    pub on_broken_links: LinkPolicy,
    /// Locale settings.
    pub i18n: I18nConfig,
    /// Documentation paths (relative strings from TOML).
    docs: DocsConfigRaw,
    /// Top navigation bar.
    pub navbar: NavbarConfig,
    /// Page footer.
    pub footer: FooterConfig,
    /// Presentation options, handed to the renderer untouched.
    pub theme: toml::Table,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Locale configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale used when none is requested. Must appear in `locales`.
    pub default_locale: String,
    /// All locales the site is built for.
    pub locales: Vec<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_owned(),
            locales: vec!["en".to_owned()],
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    sidebars_path: Option<String>,
    route_base_path: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory holding the markdown documents.
    pub source_dir: PathBuf,
    /// Sidebars declaration file.
    pub sidebars_path: PathBuf,
    /// URL segment documents are served under, without slashes (e.g., "docs").
    pub route_base_path: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `comb.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the loaded values are invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Absolute URL of a document or generated page.
    ///
    /// Generated index slugs start with `/` and live under the docs route like
    /// documents do.
    ///
    /// ```
    /// let config = comb_config::Config::default();
    /// assert_eq!(config.permalink("intro"), "/docs/intro");
    /// assert_eq!(config.permalink("/category/tutorials"), "/docs/category/tutorials");
    /// ```
    #[must_use]
    pub fn permalink(&self, slug: &str) -> String {
        let mut url = self.base_url.trim_end_matches('/').to_owned();
        for segment in [self.docs_resolved.route_base_path.as_str(), slug] {
            let segment = segment.trim_matches('/');
            if !segment.is_empty() {
                url.push('/');
                url.push_str(segment);
            }
        }
        if url.is_empty() {
            url.push('/');
        }
        url
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(sidebars_path) = &settings.sidebars_path {
            self.docs_resolved.sidebars_path.clone_from(sidebars_path);
        }
        if let Some(policy) = settings.on_broken_links {
            self.on_broken_links = policy;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            title: "Documentation".to_owned(),
            tagline: None,
            url: "http://localhost".to_owned(),
            base_url: "/".to_owned(),
            on_broken_links: LinkPolicy::default(),
            i18n: I18nConfig::default(),
            docs: DocsConfigRaw::default(),
            navbar: NavbarConfig::default(),
            footer: FooterConfig::default(),
            theme: toml::Table::new(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                sidebars_path: base.join("sidebars.yaml"),
                route_base_path: "docs".to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before validation
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.title, "title")?;
        require_non_empty(&self.url, "url")?;
        require_http_url(&self.url, "url")?;

        if !self.base_url.starts_with('/') || !self.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "base_url must start and end with /".to_owned(),
            ));
        }

        self.validate_i18n()?;

        for site_link in self.links() {
            site_link.link.validate(&site_link.location)?;
        }
        Ok(())
    }

    /// Navbar and footer links with their config locations.
    pub fn links(&self) -> Vec<SiteLink<'_>> {
        links::collect_links(&self.navbar, &self.footer)
    }

    /// Validate locale configuration.
    fn validate_i18n(&self) -> Result<(), ConfigError> {
        let i18n = &self.i18n;
        if i18n.locales.is_empty() {
            return Err(ConfigError::Validation(
                "i18n.locales must list at least one locale".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        for locale in &i18n.locales {
            require_non_empty(locale, "i18n.locales entry")?;
            if !seen.insert(locale.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "i18n.locales lists \"{locale}\" more than once"
                )));
            }
        }

        if !seen.contains(i18n.default_locale.as_str()) {
            return Err(ConfigError::Validation(format!(
                "i18n.default_locale \"{}\" is not in i18n.locales",
                i18n.default_locale
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.title = expand::expand_env(&self.title, "title")?;
        self.url = expand::expand_env(&self.url, "url")?;
        self.base_url = expand::expand_env(&self.base_url, "base_url")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            sidebars_path: resolve(self.docs.sidebars_path.as_deref(), "sidebars.yaml"),
            route_base_path: self
                .docs
                .route_base_path
                .as_deref()
                .unwrap_or("docs")
                .trim_matches('/')
                .to_owned(),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(toml: &str) -> Config {
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.title, "Documentation");
        assert_eq!(config.base_url, "/");
        assert_eq!(config.on_broken_links, LinkPolicy::Throw);
        assert_eq!(config.i18n.default_locale, "en");
        assert_eq!(config.i18n.locales, vec!["en".to_owned()]);
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(
            config.docs_resolved.sidebars_path,
            PathBuf::from("/test/sidebars.yaml")
        );
        assert_eq!(config.docs_resolved.route_base_path, "docs");
        assert!(config.theme.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.title, "Documentation");
        assert_eq!(config.on_broken_links, LinkPolicy::Throw);
    }

    #[test]
    fn test_parse_site_config() {
        let config = parse(
            r#"
title = "Apiary"
tagline = "A distributed data processing framework"
url = "https://apiaryio.com"
base_url = "/"
on_broken_links = "warn"

[i18n]
default_locale = "en"
locales = ["en", "fr"]
"#,
        );

        assert_eq!(config.title, "Apiary");
        assert_eq!(
            config.tagline.as_deref(),
            Some("A distributed data processing framework")
        );
        assert_eq!(config.url, "https://apiaryio.com");
        assert_eq!(config.on_broken_links, LinkPolicy::Warn);
        assert_eq!(config.i18n.locales, vec!["en".to_owned(), "fr".to_owned()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_link_policy_is_parse_error() {
        let result: Result<Config, _> = toml::from_str(r#"on_broken_links = "explode""#);

        assert!(result.is_err());
    }

    #[test]
    fn test_theme_is_kept_opaque() {
        let config = parse(
            r#"
[theme.prism]
additional_languages = ["rust", "sql"]

[theme.color_mode]
default_mode = "light"
"#,
        );

        let prism = config.theme["prism"].as_table().unwrap();
        assert_eq!(prism["additional_languages"].as_array().unwrap().len(), 2);
        assert!(config.theme.contains_key("color_mode"));
    }

    #[test]
    fn test_parse_navbar_and_footer() {
        let config = parse(
            r#"
[navbar]
title = "Apiary"
items = [
    { label = "Docs", sidebar_id = "docsSidebar", position = "left" },
    { label = "GitHub", href = "https://github.com/ApiaryData/apiary", position = "right" },
]

[footer]
style = "dark"

[[footer.links]]
title = "Docs"
items = [{ label = "Tutorials", to = "/docs/category/tutorials" }]
"#,
        );

        assert_eq!(config.navbar.title.as_deref(), Some("Apiary"));
        assert_eq!(config.navbar.items[1].position, Some(LinkPosition::Right));
        assert_eq!(config.footer.links[0].title, "Docs");
        let locations: Vec<_> = config.links().into_iter().map(|l| l.location).collect();
        assert_eq!(
            locations,
            vec!["navbar.items[0]", "navbar.items[1]", "footer.links[0].items[0]"]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_link_without_target() {
        let config = parse("[[navbar.items]]\nlabel = \"Docs\"\n");

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("navbar.items[0]"));
    }

    #[test]
    fn test_resolve_paths() {
        let config = parse(
            r#"
[docs]
source_dir = "content"
sidebars_path = "nav/sidebars.yaml"
route_base_path = "/guide/"
"#,
        );

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/content")
        );
        assert_eq!(
            config.docs_resolved.sidebars_path,
            PathBuf::from("/project/nav/sidebars.yaml")
        );
        assert_eq!(config.docs_resolved.route_base_path, "guide");
    }

    #[test]
    fn test_validate_rejects_empty_locales() {
        let config = parse("[i18n]\ndefault_locale = \"en\"\nlocales = []\n");

        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("at least one locale"));
    }

    #[test]
    fn test_validate_rejects_default_locale_outside_list() {
        let config = parse("[i18n]\ndefault_locale = \"de\"\nlocales = [\"en\"]\n");

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("\"de\""));
    }

    #[test]
    fn test_validate_rejects_duplicate_locales() {
        let config = parse("[i18n]\ndefault_locale = \"en\"\nlocales = [\"en\", \"en\"]\n");

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let config = parse("url = \"ftp://apiaryio.com\"\n");

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("url must start with http"));
    }

    #[test]
    fn test_validate_rejects_base_url_without_slashes() {
        let config = parse("base_url = \"docs\"\n");

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_permalink() {
        let mut config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.permalink("intro"), "/docs/intro");

        config.base_url = "/apiary/".to_owned();
        assert_eq!(
            config.permalink("/category/reference"),
            "/apiary/docs/category/reference"
        );

        config.docs_resolved.route_base_path = String::new();
        assert_eq!(config.permalink("intro"), "/apiary/intro");
        assert_eq!(config.permalink(""), "/apiary");

        config.base_url = "/".to_owned();
        assert_eq!(config.permalink(""), "/");
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            on_broken_links: Some(LinkPolicy::Ignore),
            ..CliSettings::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/docs")
        );
        assert_eq!(
            config.docs_resolved.sidebars_path,
            PathBuf::from("/test/sidebars.yaml")
        ); // Unchanged
        assert_eq!(config.on_broken_links, LinkPolicy::Ignore);
    }

    #[test]
    fn test_apply_cli_settings_sidebars_path() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            sidebars_path: Some(PathBuf::from("/elsewhere/nav.yaml")),
            ..CliSettings::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.sidebars_path,
            PathBuf::from("/elsewhere/nav.yaml")
        );
        assert_eq!(config.on_broken_links, LinkPolicy::Throw); // Unchanged
    }

    #[test]
    fn test_load_from_file_resolves_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "title = \"Apiary\"\nurl = \"https://apiaryio.com\"\n[docs]\nsource_dir = \"content\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.title, "Apiary");
        assert_eq!(config.docs_resolved.source_dir, dir.path().join("content"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_invalid_file_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "title = \"\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/comb.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
