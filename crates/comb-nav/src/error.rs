//! Build errors and node locations.

use std::fmt;

use serde::Serialize;

/// Location of a node: labels and slugs from the root down.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NavPath(Vec<String>);

impl NavPath {
    /// Path of the tree root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend the path by one segment.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_owned());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for NavPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for NavPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        f.write_str(&self.0.join(" > "))
    }
}

/// Structural defect in a navigation declaration.
///
/// Every variant is fatal: no tree is produced. [`BuildError::DanglingReference`]
/// is only returned under [`LinkPolicy::Throw`](crate::LinkPolicy::Throw).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// A category declares no items.
    #[error("Category {path} has no items")]
    EmptyCategory { path: NavPath },
    /// Two siblings share a label.
    #[error("Duplicate label \"{label}\" under {parent}")]
    DuplicateLabel { label: String, parent: NavPath },
    /// A document slug has no matching document.
    #[error("Document \"{slug}\" referenced at {path} does not exist")]
    DanglingReference { slug: String, path: NavPath },
    /// Two generated indexes resolve to the same page.
    #[error("Generated index slug \"{slug}\" at {path} is already used at {first}")]
    DuplicateGeneratedSlug {
        slug: String,
        path: NavPath,
        /// Category that claimed the slug first.
        first: NavPath,
    },
    /// A generated index has no usable slug, typically because its label
    /// contains no letters or digits and no slug was declared.
    #[error("Generated index at {path} has an empty slug; declare one explicitly")]
    EmptyGeneratedSlug { path: NavPath },
}

impl BuildError {
    /// Location of the offending node.
    ///
    /// For [`BuildError::DuplicateLabel`] this is the parent of the colliding siblings.
    pub fn path(&self) -> &NavPath {
        match self {
            Self::EmptyCategory { path }
            | Self::DanglingReference { path, .. }
            | Self::DuplicateGeneratedSlug { path, .. }
            | Self::EmptyGeneratedSlug { path } => path,
            Self::DuplicateLabel { parent, .. } => parent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_display() {
        assert_eq!(NavPath::root().to_string(), "<root>");
        assert!(NavPath::root().is_root());
    }

    #[test]
    fn test_child_path_display() {
        let path = NavPath::root().child("Reference").child("reference/cli");

        assert_eq!(path.to_string(), "Reference > reference/cli");
        assert_eq!(path.segments().len(), 2);
    }

    #[test]
    fn test_child_leaves_parent_untouched() {
        let parent = NavPath::root().child("A");
        let _child = parent.child("B");

        assert_eq!(parent.segments(), ["A".to_owned()]);
    }

    #[test]
    fn test_error_messages_include_path() {
        let err = BuildError::DanglingReference {
            slug: "missing-doc".to_owned(),
            path: ["Tutorials", "missing-doc"].into_iter().collect(),
        };

        let message = err.to_string();
        assert!(message.contains("missing-doc"));
        assert!(message.contains("Tutorials > missing-doc"));
    }

    #[test]
    fn test_duplicate_label_path_is_parent() {
        let parent: NavPath = ["Guides"].into_iter().collect();
        let err = BuildError::DuplicateLabel {
            label: "Deploy".to_owned(),
            parent: parent.clone(),
        };

        assert_eq!(err.path(), &parent);
    }

    #[test]
    fn test_path_serializes_as_array() {
        let path: NavPath = ["A", "b"].into_iter().collect();

        let json = serde_json::to_value(&path).unwrap();

        assert_eq!(json, serde_json::json!(["A", "b"]));
    }
}
