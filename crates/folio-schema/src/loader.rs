//! # Content Loader
//!
//! Walks a content directory laid out as one subdirectory per collection:
//!
//! ```text
//! <content_dir>/
//!   blog/
//!     hello-world.md
//!     2024/recap.mdx
//!   projects/
//!     folio.yaml
//! ```
//!
//! Each file is one entry. Its id is the path relative to the collection
//! directory, without extension, with `/` separators (`2024/recap`).
//! Files and directories whose names start with `_` or `.` are skipped, as
//! are symlinks to directories. Two files that map to the same id
//! (`post.md` and `post.mdx`) are a conflict: the first by path wins and
//! the other is reported as a failure. Every entry is read and validated
//! independently; one bad entry never stops the others from being checked.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use folio_core::{CollectionName, ConfigurationError, ValidEntry, ValidationError};
use serde::Serialize;
use thiserror::Error;

use crate::registry;
use crate::source::{self, SourceError};

/// Loader-level failure: nothing could be scanned.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The content directory does not exist or is not a directory.
    #[error("content directory not found: {}", path.display())]
    ContentDirMissing { path: PathBuf },

    /// A requested collection is not registered.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A directory could not be listed.
    #[error("cannot list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single entry was rejected.
#[derive(Error, Debug)]
pub enum EntryError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another file of the same collection already claimed this id.
    #[error(
        "duplicate entry id {id:?}, first defined by {}",
        first.display()
    )]
    DuplicateId { id: String, first: PathBuf },
}

/// A validated entry together with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub id: String,
    pub collection: CollectionName,
    #[serde(skip)]
    pub path: PathBuf,
    pub data: ValidEntry,
    /// Markdown body for content collections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// An entry that could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    pub id: String,
    pub path: PathBuf,
    pub error: EntryError,
}

/// Outcome of loading one collection.
#[derive(Debug)]
pub struct CollectionReport {
    pub collection: CollectionName,
    /// Valid entries, ordered by path.
    pub entries: Vec<Entry>,
    /// Rejected entries, ordered by path.
    pub failures: Vec<LoadFailure>,
}

impl CollectionReport {
    fn empty(collection: CollectionName) -> Self {
        Self {
            collection,
            entries: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.entries.len() + self.failures.len()
    }

    pub fn passed(&self) -> usize {
        self.entries.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Outcome of loading several collections.
#[derive(Debug)]
pub struct LoadReport {
    pub collections: Vec<CollectionReport>,
}

impl LoadReport {
    pub fn has_failures(&self) -> bool {
        self.collections.iter().any(|c| c.failed() > 0)
    }

    pub fn total(&self) -> usize {
        self.collections.iter().map(CollectionReport::total).sum()
    }

    pub fn failed(&self) -> usize {
        self.collections.iter().map(CollectionReport::failed).sum()
    }

    /// All valid entries across collections.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.collections.iter().flat_map(|c| c.entries.iter())
    }
}

/// Loads and validates entries from a content directory.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    content_dir: PathBuf,
}

impl ContentLoader {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Load every registered collection.
    ///
    /// Subdirectories that are not registered collections are reported in
    /// the log and skipped. A registered collection without a directory
    /// yields an empty report.
    pub fn load_all(&self) -> Result<LoadReport, LoadError> {
        self.ensure_content_dir()?;
        self.warn_unregistered_dirs()?;

        let collections = CollectionName::ALL
            .into_iter()
            .map(|name| self.load(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LoadReport { collections })
    }

    /// Load a single collection by name.
    ///
    /// # Errors
    ///
    /// `LoadError::Configuration` if `name` is not registered.
    pub fn load_collection(&self, name: &str) -> Result<CollectionReport, LoadError> {
        let collection = name.parse::<CollectionName>()?;
        self.ensure_content_dir()?;
        self.load(collection)
    }

    /// Read and validate one file as an entry of `collection`.
    pub fn load_entry(
        &self,
        collection: CollectionName,
        path: &Path,
    ) -> Result<Entry, EntryError> {
        let dir = self.content_dir.join(collection.as_str());
        let id = entry_id(&dir, path);
        let raw = source::read_entry(path, collection.kind())?;
        let data = registry::validate_collection(collection, &raw.record)
            .map_err(|e| e.with_entry(id.clone()))?;
        Ok(Entry {
            id,
            collection,
            path: path.to_path_buf(),
            data,
            body: raw.body,
        })
    }

    fn load(&self, collection: CollectionName) -> Result<CollectionReport, LoadError> {
        let dir = self.content_dir.join(collection.as_str());
        let mut report = CollectionReport::empty(collection);
        if !dir.is_dir() {
            tracing::debug!(
                collection = %collection,
                dir = %dir.display(),
                "collection directory absent"
            );
            return Ok(report);
        }

        let mut files = Vec::new();
        collect_files(&dir, collection, &mut files)?;
        files.sort();

        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        for path in files {
            let id = entry_id(&dir, &path);
            if let Some(first) = seen.get(&id) {
                tracing::warn!(
                    collection = %collection,
                    id = %id,
                    file = %path.display(),
                    "duplicate entry id"
                );
                let error = EntryError::DuplicateId {
                    id: id.clone(),
                    first: first.clone(),
                };
                report.failures.push(LoadFailure { id, path, error });
                continue;
            }
            seen.insert(id, path.clone());

            match self.load_entry(collection, &path) {
                Ok(entry) => {
                    tracing::trace!(collection = %collection, id = %entry.id, "entry valid");
                    report.entries.push(entry);
                }
                Err(error) => {
                    let id = entry_id(&dir, &path);
                    tracing::debug!(collection = %collection, id = %id, "entry rejected");
                    report.failures.push(LoadFailure { id, path, error });
                }
            }
        }

        tracing::info!(
            collection = %collection,
            passed = report.passed(),
            failed = report.failed(),
            "collection loaded"
        );
        Ok(report)
    }

    fn ensure_content_dir(&self) -> Result<(), LoadError> {
        if self.content_dir.is_dir() {
            Ok(())
        } else {
            Err(LoadError::ContentDirMissing {
                path: self.content_dir.clone(),
            })
        }
    }

    fn warn_unregistered_dirs(&self) -> Result<(), LoadError> {
        for path in list_dir(&self.content_dir)? {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if path.is_dir() && !is_hidden(name) && name.parse::<CollectionName>().is_err() {
                tracing::warn!(
                    dir = %path.display(),
                    "skipping directory for unregistered collection {name:?}"
                );
            }
        }
        Ok(())
    }
}

fn collect_files(
    dir: &Path,
    collection: CollectionName,
    out: &mut Vec<PathBuf>,
) -> Result<(), LoadError> {
    for path in list_dir(dir)? {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if is_hidden(name) {
            continue;
        }
        let file_type = std::fs::symlink_metadata(&path)
            .map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?
            .file_type();
        if file_type.is_dir() {
            collect_files(&path, collection, out)?;
            continue;
        }
        if file_type.is_symlink() && path.is_dir() {
            tracing::warn!(
                collection = %collection,
                dir = %path.display(),
                "skipping symlinked directory"
            );
            continue;
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if collection.kind().accepts_extension(ext) {
            out.push(path);
        } else {
            tracing::warn!(
                collection = %collection,
                file = %path.display(),
                "skipping file that is not a {} entry",
                collection.kind()
            );
        }
    }
    Ok(())
}

fn list_dir(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        paths.push(entry.map_err(io_err)?.path());
    }
    Ok(paths)
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('.')
}

/// Entry id: path under the collection directory, extension removed.
fn entry_id(collection_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(collection_dir).unwrap_or(path);
    let relative = relative.with_extension("");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_strips_dir_and_extension() {
        let dir = Path::new("/site/src/content/blog");
        assert_eq!(entry_id(dir, &dir.join("hello.md")), "hello");
        let nested = dir.join("2024").join("recap.mdx");
        assert_eq!(entry_id(dir, &nested), "2024/recap");
    }

    #[test]
    fn test_entry_id_keeps_inner_dots() {
        let dir = Path::new("projects");
        assert_eq!(entry_id(dir, &dir.join("v1.2.yaml")), "v1.2");
    }

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden("_draft.md"));
        assert!(is_hidden(".DS_Store"));
        assert!(!is_hidden("post.md"));
    }

    #[test]
    fn test_missing_content_dir() {
        let loader = ContentLoader::new("/nonexistent/folio/content");
        assert!(matches!(
            loader.load_all().unwrap_err(),
            LoadError::ContentDirMissing { .. }
        ));
    }

    #[test]
    fn test_unknown_collection_checked_before_disk() {
        let loader = ContentLoader::new("/nonexistent/folio/content");
        assert!(matches!(
            loader.load_collection("notes").unwrap_err(),
            LoadError::Configuration(_)
        ));
    }
}
