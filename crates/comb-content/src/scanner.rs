//! Document discovery by filesystem walking.
//!
//! The scanner only locates candidate files and derives their path-based id.
//! Reading and front matter handling happen in [`ContentStore`](crate::ContentStore).

use std::fs;
use std::path::{Path, PathBuf};

use crate::ContentError;

/// Extensions treated as documents.
const DOCUMENT_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// A document file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceFile {
    /// Id derived from the path (e.g., "tutorials/your-first-apiary").
    pub path_id: String,
    /// Path relative to the source directory.
    pub relative_path: PathBuf,
}

/// Walks the source directory in sorted order.
pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Collect all document files under the source directory.
    ///
    /// Hidden entries and `_`-prefixed partials are skipped.
    pub fn scan(&self) -> Result<Vec<SourceFile>, ContentError> {
        if !self.source_dir.is_dir() {
            return Err(ContentError::SourceDirNotFound(self.source_dir.clone()));
        }
        let mut files = Vec::new();
        self.scan_directory(&self.source_dir, Path::new(""), &mut files)?;
        Ok(files)
    }

    fn scan_directory(
        &self,
        dir_path: &Path,
        relative: &Path,
        files: &mut Vec<SourceFile>,
    ) -> Result<(), ContentError> {
        let io_err = |source| ContentError::Io {
            path: dir_path.to_path_buf(),
            source,
        };

        let mut entries = fs::read_dir(dir_path)
            .map_err(io_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(io_err)?;
        entries.sort_by_key(fs::DirEntry::file_name);

        for entry in entries {
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if name_str.starts_with('.') || name_str.starts_with('_') {
                continue;
            }

            let relative_path = relative.join(&name);
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());

            if is_dir {
                self.scan_directory(&entry.path(), &relative_path, files)?;
            } else if is_document(&relative_path) {
                files.push(SourceFile {
                    path_id: path_to_id(&relative_path),
                    relative_path,
                });
            }
        }
        Ok(())
    }
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext))
}

/// Convert a relative file path to a document id.
///
/// Examples:
/// - `intro.md` -> `"intro"`
/// - `how-to/deploy-docker.mdx` -> `"how-to/deploy-docker"`
/// - `guides/index.md` -> `"guides/index"`
pub(crate) fn path_to_id(relative_path: &Path) -> String {
    relative_path
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
