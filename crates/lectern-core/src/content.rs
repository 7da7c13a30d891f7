//! Collections, entry identifiers and loaded entries.

use std::{
    fmt,
    path::{Component, Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// The content kinds a site is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// Blog posts.
    Post,
    /// Short timestamped notes.
    Note,
    /// Papers and other publications.
    Publication,
}

impl CollectionKind {
    /// All collections, in declaration order.
    pub const ALL: [Self; 3] = [Self::Post, Self::Note, Self::Publication];

    /// Collection name as used in directories and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Note => "note",
            Self::Publication => "publication",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "post" | "posts" => Ok(Self::Post),
            "note" | "notes" => Ok(Self::Note),
            "publication" | "publications" => Ok(Self::Publication),
            other => Err(format!(
                "unknown collection '{other}' (expected post, note or publication)"
            )),
        }
    }
}

/// File extensions matched by the collection glob `**/*.{md,mdx}`.
pub const CONTENT_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Whether a path has a collection content extension.
pub fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext))
}

/// Stable entry identifier derived from a file's location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(String);

impl EntryId {
    /// Derive the identifier from a path relative to the collection base.
    ///
    /// - `2024/My First Paper.md` → `2024/my-first-paper`
    /// - `talks/index.mdx` → `talks`
    /// - `index.md` → `index`
    ///
    /// Returns `None` for paths with no usable segments.
    pub fn from_relative_path(path: &Path) -> Option<Self> {
        let without_ext = path.with_extension("");

        let mut segments: Vec<String> = without_ext
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(slugify(&part.to_string_lossy())),
                _ => None,
            })
            .filter(|segment| !segment.is_empty())
            .collect();

        if segments.len() > 1 && segments.last().is_some_and(|last| last == "index") {
            segments.pop();
        }

        let id = segments.join("/");
        if id.is_empty() { None } else { Some(Self(id)) }
    }

    /// Use a `slug` given explicitly in the frontmatter.
    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim().trim_matches('/');
        if slug.is_empty() {
            None
        } else {
            Some(Self(slug.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Slugify one path segment: lowercase, spaces to `-`, punctuation dropped.
pub fn slugify(segment: &str) -> String {
    segment
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}

/// A validated content entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    /// Identifier used to build links.
    pub id: EntryId,

    /// Collection the entry belongs to.
    pub collection: CollectionKind,

    /// Source file path.
    pub path: PathBuf,

    /// Content after the frontmatter, unrendered.
    pub body: String,

    /// Normalized frontmatter.
    pub data: T,
}
