//! Note schema.

use chrono::{DateTime, Utc};

use super::{Schema, fields::FieldReader};
use crate::{content::CollectionKind, date, error::ValidationError, value::RawRecord};

/// A short timestamped note.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub title: String,
    pub description: Option<String>,
    /// Parsed from an ISO 8601 date-time with `Z` or a numeric offset.
    pub publish_date: DateTime<Utc>,
}

impl Schema for Note {
    const KIND: CollectionKind = CollectionKind::Note;

    fn validate(record: &RawRecord) -> Result<Self, ValidationError> {
        let mut fields = FieldReader::new(record);

        let title = fields.required_string("title");
        let description = fields.optional_string("description");
        let publish_date = fields.required_date(
            "publishDate",
            false,
            date::OFFSET_DATETIME_FORMAT,
            date::parse_offset_datetime,
        );

        fields.finish(Self::KIND)?;

        Ok(Self {
            title: title.unwrap_or_default(),
            description,
            publish_date: publish_date.unwrap_or_default(),
        })
    }
}
