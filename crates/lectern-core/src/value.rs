//! Untyped frontmatter values.
//!
//! YAML and TOML frontmatter both deserialize into [`RawValue`] so the schemas
//! can report type mismatches themselves instead of relying on serde errors.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::date;

/// Frontmatter fields keyed by name.
pub type RawRecord = BTreeMap<String, RawValue>;

/// A loosely typed frontmatter value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// A date the source format already parsed (TOML date-times).
    Date(DateTime<Utc>),
    List(Vec<RawValue>),
    Map(RawRecord),
}

impl RawValue {
    /// Human-readable name of this value's shape, used in validation messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) | Self::Float(_) => "number",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::List(_) => "array",
            Self::Map(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<serde_yaml::Value> for RawValue {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::String(s),
            Value::Sequence(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Mapping(mapping) => Self::Map(
                mapping
                    .into_iter()
                    .filter_map(|(key, value)| Some((yaml_key(key)?, Self::from(value))))
                    .collect(),
            ),
            Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

/// Scalar YAML keys become field names; anything else is dropped.
fn yaml_key(key: serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => {
            tracing::trace!(?other, "ignoring non-scalar frontmatter key");
            None
        }
    }
}

impl From<toml::Value> for RawValue {
    fn from(value: toml::Value) -> Self {
        use toml::Value;

        match value {
            Value::String(s) => Self::String(s),
            Value::Integer(i) => Self::Integer(i),
            Value::Float(f) => Self::Float(f),
            Value::Boolean(b) => Self::Bool(b),
            Value::Datetime(datetime) => {
                let text = datetime.to_string();
                // A bare local time carries no date and stays a string.
                match datetime.date.and_then(|_| date::parse_loose(&text)) {
                    Some(parsed) => Self::Date(parsed),
                    None => Self::String(text),
                }
            }
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Table(table) => Self::Map(
                table
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_yaml_scalars() {
        let value: serde_yaml::Value =
            serde_yaml::from_str("a: 1\nb: 1.5\nc: true\nd: ~\ne: text\nf: 2024-01-01")
                .expect("yaml");
        let RawValue::Map(map) = RawValue::from(value) else {
            panic!("expected map");
        };

        assert_eq!(map["a"], RawValue::Integer(1));
        assert_eq!(map["b"], RawValue::Float(1.5));
        assert_eq!(map["c"], RawValue::Bool(true));
        assert_eq!(map["d"], RawValue::Null);
        assert_eq!(map["e"], RawValue::from("text"));
        // YAML has no native date type here; dates stay strings.
        assert_eq!(map["f"], RawValue::from("2024-01-01"));
    }

    #[test]
    fn test_yaml_numeric_keys_are_stringified() {
        let value: serde_yaml::Value = serde_yaml::from_str("2024: ok").expect("yaml");
        let RawValue::Map(map) = RawValue::from(value) else {
            panic!("expected map");
        };
        assert_eq!(map["2024"], RawValue::from("ok"));
    }

    #[test]
    fn test_toml_datetimes_become_dates() {
        let table: toml::Table = toml::from_str(
            "offset = 2024-01-01T10:00:00+02:00\nlocal = 2024-01-01\ntime = 07:32:00",
        )
        .expect("toml");
        let RawValue::Map(map) = RawValue::from(toml::Value::Table(table)) else {
            panic!("expected map");
        };

        assert_eq!(
            map["offset"],
            RawValue::Date(Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap())
        );
        assert_eq!(
            map["local"],
            RawValue::Date(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(map["time"].kind_name(), "string");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(RawValue::Integer(3).kind_name(), "number");
        assert_eq!(RawValue::List(vec![]).kind_name(), "array");
        assert_eq!(RawValue::Map(RawRecord::new()).kind_name(), "object");
    }
}
