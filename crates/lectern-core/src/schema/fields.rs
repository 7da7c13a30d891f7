//! Field-by-field access to a raw record that collects issues as it goes.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::{
    content::CollectionKind,
    error::{FieldIssue, IssueKind, ValidationError},
    value::{RawRecord, RawValue},
};

/// Keys every collection accepts without declaring them.
const RESERVED_KEYS: [&str; 1] = ["slug"];

/// Reads typed fields out of a [`RawRecord`].
///
/// Getters never fail; they record a [`FieldIssue`] and return `None` or the
/// default, and [`FieldReader::finish`] turns the collected issues into a
/// single [`ValidationError`].
pub(crate) struct FieldReader<'a> {
    record: &'a RawRecord,
    prefix: String,
    seen: BTreeSet<&'a str>,
    issues: Vec<FieldIssue>,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(record: &'a RawRecord) -> Self {
        Self::with_prefix(record, String::new())
    }

    fn with_prefix(record: &'a RawRecord, prefix: String) -> Self {
        Self {
            record,
            prefix,
            seen: BTreeSet::new(),
            issues: Vec::new(),
        }
    }

    fn path(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }

    fn issue(&mut self, key: &str, kind: IssueKind) {
        let field = self.path(key);
        self.issues.push(FieldIssue::new(field, kind));
    }

    fn mismatch(&mut self, key: &str, expected: &'static str, found: &RawValue) {
        self.issue(
            key,
            IssueKind::TypeMismatch {
                expected,
                found: found.kind_name(),
            },
        );
    }

    /// Look a key up, treating `null` as absent.
    fn get(&mut self, key: &'a str) -> Option<&'a RawValue> {
        self.seen.insert(key);
        self.record.get(key).filter(|value| !value.is_null())
    }

    pub(crate) fn required_string(&mut self, key: &'a str) -> Option<String> {
        match self.get(key) {
            Some(RawValue::String(s)) => Some(s.clone()),
            Some(other) => {
                self.mismatch(key, "string", other);
                None
            }
            None => {
                self.issue(key, IssueKind::Missing);
                None
            }
        }
    }

    pub(crate) fn optional_string(&mut self, key: &'a str) -> Option<String> {
        match self.get(key)? {
            RawValue::String(s) => Some(s.clone()),
            other => {
                self.mismatch(key, "string", other);
                None
            }
        }
    }

    pub(crate) fn bool_or(&mut self, key: &'a str, default: bool) -> bool {
        match self.get(key) {
            Some(RawValue::Bool(b)) => *b,
            Some(other) => {
                self.mismatch(key, "boolean", other);
                default
            }
            None => default,
        }
    }

    pub(crate) fn number_or(&mut self, key: &'a str, default: f64) -> f64 {
        match self.get(key) {
            Some(RawValue::Integer(i)) => *i as f64,
            Some(RawValue::Float(f)) if f.is_nan() => {
                self.issue(
                    key,
                    IssueKind::TypeMismatch {
                        expected: "number",
                        found: "nan",
                    },
                );
                default
            }
            Some(RawValue::Float(f)) => *f,
            Some(other) => {
                self.mismatch(key, "number", other);
                default
            }
            None => default,
        }
    }

    /// A list of strings; every non-string element is reported by index.
    pub(crate) fn optional_string_list(&mut self, key: &'a str) -> Option<Vec<String>> {
        let items = match self.get(key)? {
            RawValue::List(items) => items,
            other => {
                self.mismatch(key, "array", other);
                return None;
            }
        };

        let mut strings = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                RawValue::String(s) => strings.push(s.clone()),
                other => self.mismatch(&format!("{key}[{index}]"), "string", other),
            }
        }
        Some(strings)
    }

    /// A required date given as a string, run through `parse`.
    ///
    /// With `accept_native`, dates the frontmatter format already parsed
    /// are taken as they are.
    pub(crate) fn required_date(
        &mut self,
        key: &'a str,
        accept_native: bool,
        expected: &'static str,
        parse: fn(&str) -> Option<DateTime<Utc>>,
    ) -> Option<DateTime<Utc>> {
        match self.get(key) {
            Some(RawValue::Date(date)) if accept_native => Some(*date),
            Some(value) => self.parse_date_value(key, value, expected, parse),
            None => {
                self.issue(key, IssueKind::Missing);
                None
            }
        }
    }

    /// An optional date string. An empty string counts as absent.
    pub(crate) fn optional_date(
        &mut self,
        key: &'a str,
        expected: &'static str,
        parse: fn(&str) -> Option<DateTime<Utc>>,
    ) -> Option<DateTime<Utc>> {
        match self.get(key)? {
            RawValue::String(s) if s.is_empty() => None,
            value => self.parse_date_value(key, value, expected, parse),
        }
    }

    fn parse_date_value(
        &mut self,
        key: &str,
        value: &RawValue,
        expected: &'static str,
        parse: fn(&str) -> Option<DateTime<Utc>>,
    ) -> Option<DateTime<Utc>> {
        let RawValue::String(s) = value else {
            self.mismatch(key, "string", value);
            return None;
        };

        let parsed = parse(s);
        if parsed.is_none() {
            self.issue(
                key,
                IssueKind::Format {
                    expected,
                    found: s.clone(),
                },
            );
        }
        parsed
    }

    /// Read an optional nested object with a scoped reader.
    ///
    /// Issues raised inside `read` are reported under `key.`.
    pub(crate) fn optional_object<T>(
        &mut self,
        key: &'a str,
        read: impl FnOnce(&mut FieldReader<'a>) -> Option<T>,
    ) -> Option<T> {
        let map = match self.get(key)? {
            RawValue::Map(map) => map,
            other => {
                self.mismatch(key, "object", other);
                return None;
            }
        };

        let mut nested = FieldReader::with_prefix(map, format!("{}.", self.path(key)));
        let value = read(&mut nested);
        nested.log_unknown_keys();
        self.issues.append(&mut nested.issues);
        value
    }

    fn log_unknown_keys(&self) {
        for key in self.record.keys() {
            if !self.seen.contains(key.as_str()) && !RESERVED_KEYS.contains(&key.as_str()) {
                tracing::trace!(field = %self.path(key), "ignoring unknown frontmatter field");
            }
        }
    }

    /// Fail with every collected issue, if there are any.
    pub(crate) fn finish(self, collection: CollectionKind) -> Result<(), ValidationError> {
        self.log_unknown_keys();
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(collection, self.issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date;

    fn record(pairs: &[(&str, RawValue)]) -> RawRecord {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_null_counts_as_absent() {
        let raw = record(&[("title", RawValue::Null), ("draft", RawValue::Null)]);
        let mut fields = FieldReader::new(&raw);

        assert_eq!(fields.required_string("title"), None);
        assert!(!fields.bool_or("draft", false));

        let err = fields.finish(CollectionKind::Post).expect_err("title missing");
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].kind, IssueKind::Missing);
    }

    #[test]
    fn test_list_elements_reported_by_index() {
        let raw = record(&[(
            "tags",
            RawValue::List(vec![RawValue::from("ok"), RawValue::Integer(3)]),
        )]);
        let mut fields = FieldReader::new(&raw);

        assert_eq!(fields.optional_string_list("tags"), Some(vec!["ok".to_string()]));
        let err = fields.finish(CollectionKind::Post).expect_err("bad element");
        assert_eq!(err.issues[0].field, "tags[1]");
    }

    #[test]
    fn test_nested_issue_paths() {
        let mut inner = RawRecord::new();
        inner.insert("src".to_string(), RawValue::from("./a.png"));
        let raw = record(&[("coverImage", RawValue::Map(inner))]);
        let mut fields = FieldReader::new(&raw);

        let alt = fields.optional_object("coverImage", |nested| nested.required_string("alt"));
        assert!(alt.is_none());

        let err = fields.finish(CollectionKind::Post).expect_err("alt missing");
        assert_eq!(err.issues[0].field, "coverImage.alt");
    }

    #[test]
    fn test_nan_is_not_a_number() {
        let raw = record(&[("selectionPriority", RawValue::Float(f64::NAN))]);
        let mut fields = FieldReader::new(&raw);

        assert_eq!(fields.number_or("selectionPriority", 0.0), 0.0);
        assert!(fields.finish(CollectionKind::Publication).is_err());
    }

    #[test]
    fn test_optional_date_empty_string() {
        let raw = record(&[("updatedDate", RawValue::from(""))]);
        let mut fields = FieldReader::new(&raw);

        assert!(
            fields
                .optional_date("updatedDate", date::LOOSE_DATE_FORMAT, date::parse_loose)
                .is_none()
        );
        assert!(fields.finish(CollectionKind::Post).is_ok());
    }
}
