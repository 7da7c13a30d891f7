//! Publication schema.

use chrono::{DateTime, Utc};

use super::{Schema, fields::FieldReader};
use crate::{content::CollectionKind, date, error::ValidationError, value::RawRecord};

/// A paper, talk or other publication.
#[derive(Debug, Clone, PartialEq)]
pub struct Publication {
    pub title: String,
    pub description: Option<String>,
    /// Midnight UTC of the `YYYY-MM-DD` publish date.
    pub publish_date: DateTime<Utc>,
    /// Ordering hint for selected-publication listings. Defaults to `0`.
    pub selection_priority: f64,
    pub authors: Option<String>,
    pub more_authors: Option<String>,
    pub last_authors: Option<String>,
    pub corresponding_authors: Option<Vec<String>>,
    /// Venue, read from the `pub` key.
    pub venue: Option<String>,
    pub img: Option<String>,
    pub img_alt: Option<String>,
    pub data_url: Option<String>,
    pub paper_url: Option<String>,
    pub code_url: Option<String>,
    pub web_url: Option<String>,
}

impl Schema for Publication {
    const KIND: CollectionKind = CollectionKind::Publication;

    fn validate(record: &RawRecord) -> Result<Self, ValidationError> {
        let mut fields = FieldReader::new(record);

        let title = fields.required_string("title");
        let description = fields.optional_string("description");
        let publish_date = fields.required_date(
            "publishDate",
            false,
            date::CALENDAR_DATE_FORMAT,
            date::parse_calendar_date,
        );
        let selection_priority = fields.number_or("selectionPriority", 0.0);
        let authors = fields.optional_string("authors");
        let more_authors = fields.optional_string("moreAuthors");
        let last_authors = fields.optional_string("lastAuthors");
        let corresponding_authors = fields.optional_string_list("correspondingAuthors");
        let venue = fields.optional_string("pub");
        let img = fields.optional_string("img");
        let img_alt = fields.optional_string("imgAlt");
        let data_url = fields.optional_string("dataURL");
        let paper_url = fields.optional_string("paperURL");
        let code_url = fields.optional_string("codeURL");
        let web_url = fields.optional_string("webURL");

        fields.finish(Self::KIND)?;

        Ok(Self {
            title: title.unwrap_or_default(),
            description,
            publish_date: publish_date.unwrap_or_default(),
            selection_priority,
            authors,
            more_authors,
            last_authors,
            corresponding_authors,
            venue,
            img,
            img_alt,
            data_url,
            paper_url,
            code_url,
            web_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::Datelike;

    use super::*;
    use crate::{error::IssueKind, frontmatter::parse_frontmatter};

    fn validate(source: &str) -> Result<Publication, ValidationError> {
        let (record, _) =
            parse_frontmatter(source, Path::new("publication.md")).expect("frontmatter");
        Publication::validate(&record)
    }

    #[test]
    fn test_minimal_publication() {
        let publication =
            validate("---\ntitle: Paper\npublishDate: \"2023-09-14\"\n---\n").expect("valid");

        assert_eq!(publication.title, "Paper");
        assert_eq!(publication.selection_priority, 0.0);
        assert!(publication.authors.is_none());
        assert!(publication.corresponding_authors.is_none());
        assert_eq!(
            (
                publication.publish_date.year(),
                publication.publish_date.month(),
                publication.publish_date.day()
            ),
            (2023, 9, 14)
        );
    }

    #[test]
    fn test_full_publication() {
        let publication = validate(
            r#"---
title: A Study
description: Findings
publishDate: 2022-03-01
selectionPriority: 2.5
authors: A. Author
moreAuthors: B. Author
lastAuthors: Z. Author
correspondingAuthors: [A. Author, Z. Author]
pub: Journal of Things
img: /img/study.png
imgAlt: Figure 1
dataURL: https://data.example.com
paperURL: https://paper.example.com
codeURL: https://code.example.com
webURL: https://web.example.com
---
"#,
        )
        .expect("valid");

        assert_eq!(publication.selection_priority, 2.5);
        assert_eq!(publication.venue.as_deref(), Some("Journal of Things"));
        assert_eq!(
            publication.corresponding_authors,
            Some(vec!["A. Author".to_string(), "Z. Author".to_string()])
        );
        assert_eq!(publication.img_alt.as_deref(), Some("Figure 1"));
        assert_eq!(
            publication.code_url.as_deref(),
            Some("https://code.example.com")
        );
        assert_eq!(publication.more_authors.as_deref(), Some("B. Author"));
    }

    #[test]
    fn test_integer_priority() {
        let publication =
            validate("---\ntitle: P\npublishDate: 2022-03-01\nselectionPriority: 3\n---\n")
                .expect("valid");
        assert_eq!(publication.selection_priority, 3.0);
    }

    #[test]
    fn test_time_component_fails() {
        let err = validate("---\ntitle: P\npublishDate: 2022-03-01T10:00:00Z\n---\n")
            .expect_err("calendar date only");
        let issue = err.field("publishDate").expect("publishDate issue");
        assert_eq!(
            issue.kind,
            IssueKind::Format {
                expected: date::CALENDAR_DATE_FORMAT,
                found: "2022-03-01T10:00:00Z".to_string(),
            }
        );
    }

    #[test]
    fn test_string_priority_fails() {
        let err = validate("---\ntitle: P\npublishDate: 2022-03-01\nselectionPriority: high\n---\n")
            .expect_err("number required");
        assert!(err.field("selectionPriority").is_some());
    }

    #[test]
    fn test_missing_publish_date_fails() {
        let err = validate("---\ntitle: P\n---\n").expect_err("publishDate required");
        assert_eq!(
            err.field("publishDate").map(|issue| &issue.kind),
            Some(&IssueKind::Missing)
        );
    }
}
