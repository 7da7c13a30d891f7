//! Blog post schema.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::{Schema, fields::FieldReader};
use crate::{
    content::CollectionKind, date, error::ValidationError, tags::normalize_tags,
    value::RawRecord,
};

/// Reference to an image as written in frontmatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(src: impl Into<String>) -> Self {
        Self(src.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the reference points next to the entry file (`./`, `../`).
    pub fn is_relative(&self) -> bool {
        self.0.starts_with("./") || self.0.starts_with("../")
    }

    /// Resolve a relative reference against the entry's source file.
    ///
    /// Absolute paths and URLs are returned unchanged.
    pub fn resolve(&self, entry_path: &Path) -> PathBuf {
        if self.is_relative() {
            entry_path
                .parent()
                .unwrap_or(Path::new(""))
                .join(&self.0)
        } else {
            PathBuf::from(&self.0)
        }
    }
}

/// Cover image with its alt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    pub alt: String,
    pub src: ImageRef,
}

/// A blog post.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub title: String,
    pub description: String,
    pub cover_image: Option<CoverImage>,
    /// Defaults to `false`.
    pub draft: bool,
    pub og_image: Option<String>,
    /// Lowercase and free of duplicates.
    pub tags: Vec<String>,
    pub publish_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
}

impl Schema for Post {
    const KIND: CollectionKind = CollectionKind::Post;

    fn validate(record: &RawRecord) -> Result<Self, ValidationError> {
        let mut fields = FieldReader::new(record);

        let title = fields.required_string("title");
        let description = fields.required_string("description");
        let cover_image = fields.optional_object("coverImage", |image| {
            let alt = image.required_string("alt");
            let src = image.required_string("src");
            Some(CoverImage {
                alt: alt?,
                src: ImageRef::new(src?),
            })
        });
        let draft = fields.bool_or("draft", false);
        let og_image = fields.optional_string("ogImage");
        let tags = fields
            .optional_string_list("tags")
            .map(normalize_tags)
            .unwrap_or_default();
        let publish_date = fields.required_date(
            "publishDate",
            true,
            date::LOOSE_DATE_FORMAT,
            date::parse_loose,
        );
        let updated_date =
            fields.optional_date("updatedDate", date::LOOSE_DATE_FORMAT, date::parse_loose);

        fields.finish(Self::KIND)?;

        Ok(Self {
            title: title.unwrap_or_default(),
            description: description.unwrap_or_default(),
            cover_image,
            draft,
            og_image,
            tags,
            publish_date: publish_date.unwrap_or_default(),
            updated_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::{error::IssueKind, frontmatter::parse_frontmatter};

    fn validate(source: &str) -> Result<Post, ValidationError> {
        let (record, _) = parse_frontmatter(source, Path::new("post.md")).expect("frontmatter");
        Post::validate(&record)
    }

    #[test]
    fn test_minimal_post_uses_defaults() {
        let post = validate(
            "---\ntitle: Hello\ndescription: First post\npublishDate: 2024-01-01\n---\n",
        )
        .expect("valid");

        assert_eq!(post.title, "Hello");
        assert!(post.tags.is_empty());
        assert!(!post.draft);
        assert!(post.cover_image.is_none());
        assert!(post.og_image.is_none());
        assert!(post.updated_date.is_none());
        assert_eq!(
            post.publish_date,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_missing_description_fails() {
        let err = validate("---\ntitle: Hello\npublishDate: 2024-01-01\n---\n")
            .expect_err("description is required");

        let issue = err.field("description").expect("description issue");
        assert_eq!(issue.kind, IssueKind::Missing);
        assert_eq!(err.collection, CollectionKind::Post);
    }

    #[test]
    fn test_full_post() {
        let post = validate(
            r#"---
title: Full
description: Everything set
coverImage:
  alt: A cat
  src: ./cat.png
draft: true
ogImage: /og/full.png
tags: [Rust, rust, Astro, WEB]
publishDate: "2024-05-01T12:00:00+02:00"
updatedDate: "2024-06-01"
---
body"#,
        )
        .expect("valid");

        let cover = post.cover_image.expect("cover image");
        assert_eq!(cover.alt, "A cat");
        assert_eq!(
            cover.src.resolve(Path::new("src/content/post/full.md")),
            PathBuf::from("src/content/post/./cat.png")
        );
        assert!(post.draft);
        assert_eq!(post.og_image.as_deref(), Some("/og/full.png"));
        assert_eq!(post.tags, vec!["rust", "astro", "web"]);
        assert_eq!(
            post.publish_date,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
        );
        assert_eq!(
            post.updated_date,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_native_toml_publish_date() {
        let post = validate(
            "+++\ntitle = \"T\"\ndescription = \"D\"\npublishDate = 2024-02-03T04:05:06Z\n+++\n",
        )
        .expect("valid");
        assert_eq!(
            post.publish_date,
            Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap()
        );
    }

    #[test]
    fn test_updated_date_must_be_string() {
        let err = validate(
            "+++\ntitle = \"T\"\ndescription = \"D\"\npublishDate = 2024-02-03\nupdatedDate = 2024-02-04\n+++\n",
        )
        .expect_err("native updatedDate");
        assert!(matches!(
            err.field("updatedDate").map(|issue| &issue.kind),
            Some(IssueKind::TypeMismatch { found: "date", .. })
        ));
    }

    #[test]
    fn test_empty_updated_date_is_absent() {
        let post = validate(
            "---\ntitle: T\ndescription: D\npublishDate: 2024-01-01\nupdatedDate: \"\"\n---\n",
        )
        .expect("valid");
        assert!(post.updated_date.is_none());
    }

    #[test]
    fn test_unparseable_publish_date_fails() {
        let err = validate("---\ntitle: T\ndescription: D\npublishDate: someday\n---\n")
            .expect_err("bad date");
        assert!(err.field("publishDate").is_some_and(|issue| issue.is_date_format()));
    }

    #[test]
    fn test_reports_every_issue() {
        let err = validate(
            "---\ntitle: 3\ndraft: \"yes\"\ntags: rust\ncoverImage:\n  src: ./a.png\n---\n",
        )
        .expect_err("many issues");

        let fields: Vec<_> = err.issues.iter().map(|issue| issue.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "title",
                "description",
                "coverImage.alt",
                "draft",
                "tags",
                "publishDate"
            ]
        );
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let post = validate(
            "---\ntitle: T\ndescription: D\npublishDate: 2024-01-01\nlayout: wide\nslug: custom\n---\n",
        )
        .expect("valid");
        assert_eq!(post.title, "T");
    }

    #[test]
    fn test_image_ref_absolute() {
        let image = ImageRef::new("https://example.com/a.png");
        assert!(!image.is_relative());
        assert_eq!(
            image.resolve(Path::new("post/a.md")),
            PathBuf::from("https://example.com/a.png")
        );
    }
}
