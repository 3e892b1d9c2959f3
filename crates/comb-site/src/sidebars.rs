//! Sidebars file loading.
//!
//! The file is a YAML (or JSON) list of named trees:
//!
//! ```yaml
//! - id: docsSidebar
//!   items:
//!     - intro
//!     - label: Tutorials
//!       link: { type: generated-index }
//!       items: [tutorials/your-first-apiary]
//! ```

use std::collections::HashSet;
use std::path::Path;

use comb_nav::ItemDecl;
use serde::Deserialize;

use crate::error::SiteError;

/// One named navigation tree as declared.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarDecl {
    pub id: String,
    pub items: Vec<ItemDecl>,
}

/// Read and parse a sidebars file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or declares the
/// same tree id twice.
pub fn load_sidebars(path: &Path) -> Result<Vec<SidebarDecl>, SiteError> {
    let content = std::fs::read_to_string(path).map_err(|source| SiteError::SidebarsIo {
        path: path.to_path_buf(),
        source,
    })?;
    parse_sidebars(&content, path)
}

/// Parse sidebars from YAML or JSON text read from `path`.
pub(crate) fn parse_sidebars(content: &str, path: &Path) -> Result<Vec<SidebarDecl>, SiteError> {
    let sidebars: Vec<SidebarDecl> =
        serde_yaml::from_str(content).map_err(|e| SiteError::SidebarsParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    check_unique_ids(&sidebars)?;
    Ok(sidebars)
}

pub(crate) fn check_unique_ids(sidebars: &[SidebarDecl]) -> Result<(), SiteError> {
    let mut seen = HashSet::new();
    for sidebar in sidebars {
        if !seen.insert(sidebar.id.as_str()) {
            return Err(SiteError::DuplicateTreeId(sidebar.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_sidebars() {
        let yaml = r"
- id: docsSidebar
  items:
    - intro
    - label: Tutorials
      items: [tutorials/first]
- id: apiSidebar
  items: [reference/cli]
";
        let sidebars = parse_sidebars(yaml, Path::new("sidebars.yaml")).unwrap();

        assert_eq!(sidebars.len(), 2);
        assert_eq!(sidebars[0].id, "docsSidebar");
        assert_eq!(sidebars[0].items.len(), 2);
        assert_eq!(sidebars[1].items, vec![ItemDecl::doc("reference/cli")]);
    }

    #[test]
    fn test_parse_json_sidebars() {
        let json = r#"[{"id": "docs", "items": ["intro", {"type": "doc", "id": "faq"}]}]"#;

        let sidebars = parse_sidebars(json, Path::new("sidebars.json")).unwrap();

        assert_eq!(sidebars[0].items.len(), 2);
    }

    #[test]
    fn test_duplicate_tree_id_rejected() {
        let yaml = "- id: docs\n  items: [a]\n- id: docs\n  items: [b]\n";

        let err = parse_sidebars(yaml, Path::new("sidebars.yaml")).unwrap_err();

        assert!(matches!(err, SiteError::DuplicateTreeId(ref id) if id == "docs"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "- id: docs\n  itemz: [a]\n";

        assert!(matches!(
            parse_sidebars(yaml, Path::new("sidebars.yaml")),
            Err(SiteError::SidebarsParse { .. })
        ));
    }

    #[test]
    fn test_load_sidebars_reports_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("sidebars.yaml");
        std::fs::write(&path, "not: [a list").unwrap();

        let err = load_sidebars(&path).unwrap_err();

        let SiteError::SidebarsParse { path: reported, .. } = err else {
            panic!("expected parse error, got {err:?}");
        };
        assert_eq!(reported, path);
    }

    #[test]
    fn test_load_sidebars_missing_file() {
        let err = load_sidebars(Path::new("/nonexistent/sidebars.yaml")).unwrap_err();

        assert!(matches!(err, SiteError::SidebarsIo { .. }));
    }
}
