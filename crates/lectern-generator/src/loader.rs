//! Content providers.
//!
//! A provider lists the raw entries of a collection. [`GlobLoader`] reads
//! `**/*.{md,mdx}` under each collection directory; [`MemoryProvider`] serves
//! fixed entries.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use lectern_core::{
    CollectionKind, CoreError, EntryId, RawRecord, RawValue, ValidationError, config::Config,
    content::is_content_file, frontmatter::parse_frontmatter,
};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Collection loading errors.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error while reading a content file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal error.
    #[error("failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Frontmatter could not be parsed.
    #[error(transparent)]
    Frontmatter(#[from] CoreError),

    /// No identifier could be derived for a file.
    #[error("cannot derive an entry id from {0}")]
    InvalidPath(PathBuf),

    /// An entry failed schema validation.
    #[error("{path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoadError>;

/// One content file before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    /// Entry identifier.
    pub id: EntryId,

    /// Source file path.
    pub path: PathBuf,

    /// Frontmatter fields.
    pub data: RawRecord,

    /// Content after the frontmatter.
    pub body: String,
}

impl RawEntry {
    /// Build an entry from file content.
    ///
    /// `relative` is the path inside the collection directory and determines
    /// the id unless the frontmatter sets a string `slug`.
    pub fn from_source(relative: &Path, path: &Path, content: &str) -> Result<Self> {
        let (data, body) = parse_frontmatter(content, path)?;

        let id = match data.get("slug") {
            Some(RawValue::String(slug)) => EntryId::from_slug(slug),
            _ => None,
        }
        .or_else(|| EntryId::from_relative_path(relative))
        .ok_or_else(|| LoadError::InvalidPath(path.to_path_buf()))?;

        Ok(Self {
            id,
            path: path.to_path_buf(),
            data,
            body,
        })
    }
}

/// Source of raw collection entries.
pub trait ContentProvider: Send + Sync {
    /// List every entry of a collection, in a stable order.
    fn list_entries(&self, kind: CollectionKind) -> Result<Vec<RawEntry>>;

    /// Whether the provider has a source for this collection at all.
    fn has_collection(&self, kind: CollectionKind) -> bool {
        let _ = kind;
        true
    }
}

/// Loads collections from directories on disk.
#[derive(Debug, Clone, Default)]
pub struct GlobLoader {
    dirs: HashMap<CollectionKind, PathBuf>,
}

impl GlobLoader {
    /// Create a loader with no collections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader for every collection directory in the configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        CollectionKind::ALL
            .into_iter()
            .fold(Self::new(), |loader, kind| {
                loader.with_collection(kind, config.content.collection_dir(kind))
            })
    }

    /// Set the base directory of a collection.
    #[must_use]
    pub fn with_collection(mut self, kind: CollectionKind, dir: impl Into<PathBuf>) -> Self {
        self.dirs.insert(kind, dir.into());
        self
    }

    /// Base directory of a collection, if configured.
    pub fn collection_dir(&self, kind: CollectionKind) -> Option<&Path> {
        self.dirs.get(&kind).map(PathBuf::as_path)
    }

    /// Find all content files under `dir`, sorted by path.
    fn find_content_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.path()));

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() && is_content_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Read and parse a single content file.
    fn parse_file(base: &Path, path: &Path) -> Result<RawEntry> {
        debug!(path = %path.display(), "parsing file");

        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let relative = path.strip_prefix(base).unwrap_or(path);
        RawEntry::from_source(relative, path, &content)
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

impl ContentProvider for GlobLoader {
    fn list_entries(&self, kind: CollectionKind) -> Result<Vec<RawEntry>> {
        let Some(dir) = self.collection_dir(kind) else {
            warn!(collection = %kind, "no directory configured for collection");
            return Ok(Vec::new());
        };

        if !dir.is_dir() {
            warn!(collection = %kind, dir = %dir.display(), "collection directory does not exist");
            return Ok(Vec::new());
        }

        info!(collection = %kind, dir = %dir.display(), "loading collection");

        let files = Self::find_content_files(dir)?;
        debug!(collection = %kind, count = files.len(), "found content files");

        // Parse in parallel; collecting keeps the sorted file order.
        files
            .par_iter()
            .map(|path| Self::parse_file(dir, path))
            .collect()
    }

    fn has_collection(&self, kind: CollectionKind) -> bool {
        self.collection_dir(kind).is_some_and(Path::is_dir)
    }
}

/// Serves entries held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    entries: HashMap<CollectionKind, Vec<RawEntry>>,
}

impl MemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to a collection.
    pub fn insert(&mut self, kind: CollectionKind, entry: RawEntry) {
        self.entries.entry(kind).or_default().push(entry);
    }

    /// Append an entry parsed from file content at a collection-relative path.
    pub fn insert_source(
        &mut self,
        kind: CollectionKind,
        relative: impl AsRef<Path>,
        content: &str,
    ) -> Result<()> {
        let relative = relative.as_ref();
        let entry = RawEntry::from_source(relative, relative, content)?;
        self.insert(kind, entry);
        Ok(())
    }
}

impl ContentProvider for MemoryProvider {
    fn list_entries(&self, kind: CollectionKind) -> Result<Vec<RawEntry>> {
        Ok(self.entries.get(&kind).cloned().unwrap_or_default())
    }

    fn has_collection(&self, kind: CollectionKind) -> bool {
        self.entries.contains_key(&kind)
    }
}
