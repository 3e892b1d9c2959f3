//! YAML front matter parsing.
//!
//! Front matter is a YAML block fenced by `---` lines at the very top of a
//! document. Only the fields comb needs are read; everything else is ignored.

use serde::Deserialize;

/// Fields read from a document's front matter.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct FrontMatter {
    /// Replaces the file name part of the document id.
    pub id: Option<String>,
    pub title: Option<String>,
    pub sidebar_label: Option<String>,
}

/// Split a document into its front matter block and body.
///
/// Returns `(None, content)` when the document has no front matter fence.
/// An opening fence without a closing one is treated as no front matter.
pub(crate) fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let content = content.trim_start_matches('\u{feff}');
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }
    (None, content)
}

/// Parse front matter YAML.
///
/// Empty blocks yield a default instance.
///
/// # Errors
///
/// Returns the YAML error message if the block is malformed or `id`
/// contains a path separator.
pub(crate) fn parse_front_matter(block: &str) -> Result<FrontMatter, String> {
    let trimmed = block.trim();
    if trimmed.is_empty() {
        return Ok(FrontMatter::default());
    }

    let front_matter: FrontMatter =
        serde_yaml::from_str(trimmed).map_err(|e| format!("Invalid YAML: {e}"))?;

    if let Some(id) = &front_matter.id
        && (id.is_empty() || id.contains('/'))
    {
        return Err(format!("id \"{id}\" must be a non-empty name without '/'"));
    }

    Ok(front_matter)
}

/// Text of the first `# ` heading in a markdown body.
pub(crate) fn first_heading(body: &str) -> Option<&str> {
    body.lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .filter(|title| !title.is_empty())
}
