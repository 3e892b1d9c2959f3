//! Document discovery for comb.
//!
//! [`ContentStore`] scans a docs directory and indexes every document by id.
//! Ids follow the file layout (`how-to/deploy-docker.md` is
//! `how-to/deploy-docker`) unless front matter sets `id`, which replaces the
//! last segment.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), comb_content::ContentError> {
//! use std::path::Path;
//! use comb_content::ContentStore;
//!
//! let store = ContentStore::scan(Path::new("docs"))?;
//! let known = store.known_slugs();
//! assert!(known.contains("intro"));
//! # Ok(())
//! # }
//! ```

mod front_matter;
mod scanner;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use front_matter::{first_heading, parse_front_matter, split_front_matter};
use scanner::Scanner;

/// A document known to the content store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Document id used by navigation declarations.
    pub id: String,
    /// Title from front matter, or the first H1 heading.
    pub title: Option<String>,
    /// Sidebar label from front matter.
    pub sidebar_label: Option<String>,
    /// Source file relative to the docs directory.
    pub source_path: PathBuf,
}

/// Error returned when building the content store.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Docs directory does not exist.
    #[error("Docs directory not found: {}", .0.display())]
    SourceDirNotFound(PathBuf),
    /// I/O error while scanning or reading.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Malformed front matter.
    #[error("Invalid front matter in {}: {message}", path.display())]
    FrontMatter { path: PathBuf, message: String },
    /// Two files resolve to the same id.
    #[error("Document id \"{id}\" is used by both {} and {}", first.display(), second.display())]
    DuplicateId {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Index of documents by id.
#[derive(Debug, Default)]
pub struct ContentStore {
    documents: Vec<Document>,
    index: HashMap<String, usize>,
}

impl ContentStore {
    /// Scan a docs directory.
    ///
    /// Documents are ordered by path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is missing or unreadable, a front
    /// matter block is malformed, or two files resolve to the same id.
    pub fn scan(source_dir: &Path) -> Result<Self, ContentError> {
        let files = Scanner::new(source_dir.to_path_buf()).scan()?;

        let documents = files
            .into_iter()
            .map(|file| {
                let full_path = source_dir.join(&file.relative_path);
                let content =
                    std::fs::read_to_string(&full_path).map_err(|source| ContentError::Io {
                        path: full_path.clone(),
                        source,
                    })?;
                load_document(file.path_id, file.relative_path, &content)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let store = Self::from_documents(documents)?;
        debug!(
            source_dir = %source_dir.display(),
            documents = store.len(),
            "Scanned content"
        );
        Ok(store)
    }

    /// Build a store from already-loaded documents.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::DuplicateId`] if two documents share an id.
    pub fn from_documents(documents: Vec<Document>) -> Result<Self, ContentError> {
        let mut index = HashMap::with_capacity(documents.len());
        for (i, doc) in documents.iter().enumerate() {
            if let Some(&first) = index.get(&doc.id) {
                let first: &Document = &documents[first];
                return Err(ContentError::DuplicateId {
                    id: doc.id.clone(),
                    first: first.source_path.clone(),
                    second: doc.source_path.clone(),
                });
            }
            index.insert(doc.id.clone(), i);
        }
        Ok(Self { documents, index })
    }

    /// Get document by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.index.get(id).map(|&i| &self.documents[i])
    }

    /// Ids of all documents, for navigation slug resolution.
    #[must_use]
    pub fn known_slugs(&self) -> HashSet<String> {
        self.index.keys().cloned().collect()
    }

    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Build a [`Document`] from its path-derived id and file content.
fn load_document(
    path_id: String,
    source_path: PathBuf,
    content: &str,
) -> Result<Document, ContentError> {
    let (block, body) = split_front_matter(content);
    let front_matter = match block {
        Some(block) => parse_front_matter(block).map_err(|message| ContentError::FrontMatter {
            path: source_path.clone(),
            message,
        })?,
        None => front_matter::FrontMatter::default(),
    };

    let id = match front_matter.id {
        Some(name) => match path_id.rsplit_once('/') {
            Some((dir, _)) => format!("{dir}/{name}"),
            None => name,
        },
        None => path_id,
    };

    let title = front_matter
        .title
        .or_else(|| first_heading(body).map(ToOwned::to_owned));

    Ok(Document {
        id,
        title,
        sidebar_label: front_matter.sidebar_label,
        source_path,
    })
}
