//! Frontmatter extraction for content files.

use std::path::Path;

use crate::{
    error::{CoreError, Result},
    value::{RawRecord, RawValue},
};

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
///
/// Delimiters must sit on their own line.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start_matches('\u{feff}').trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();
    let after_first = content[delimiter.len()..].strip_prefix(['\r', '\n'].as_slice())?;
    let after_first = after_first.strip_prefix('\n').unwrap_or(after_first);

    let (fm_end, body_start) = find_closing(after_first, delimiter)?;

    let frontmatter = after_first[..fm_end].trim();
    let body = after_first[body_start..].trim_start();

    Some((format, frontmatter, body))
}

/// Locate the closing delimiter line, returning where the frontmatter ends
/// and where the body starts.
fn find_closing(rest: &str, delimiter: &str) -> Option<(usize, usize)> {
    if is_delimiter_line(rest, delimiter) {
        return Some((0, delimiter.len()));
    }

    let needle = format!("\n{delimiter}");
    let mut offset = 0;
    while let Some(pos) = rest[offset..].find(&needle) {
        let start = offset + pos;
        if is_delimiter_line(&rest[start + 1..], delimiter) {
            return Some((start, start + 1 + delimiter.len()));
        }
        offset = start + 1;
    }

    None
}

/// Whether `line` starts with `delimiter` followed by a line break or the end.
fn is_delimiter_line(line: &str, delimiter: &str) -> bool {
    line.strip_prefix(delimiter)
        .is_some_and(|tail| tail.is_empty() || tail.starts_with('\n') || tail.starts_with("\r\n"))
}

/// Parse the frontmatter of a content file into a raw record.
///
/// Files without frontmatter yield an empty record and the full content as
/// body; the schemas then report the missing fields.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(RawRecord, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Ok((RawRecord::new(), content.to_string()));
    };

    let value = match format {
        FrontmatterFormat::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_str(fm_str)
                .map_err(|e| CoreError::frontmatter(path, e.to_string()))?;
            RawValue::from(value)
        }
        FrontmatterFormat::Toml => {
            let table: toml::Table =
                toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;
            RawValue::from(toml::Value::Table(table))
        }
    };

    let record = match value {
        RawValue::Map(record) => record,
        RawValue::Null => RawRecord::new(),
        other => {
            return Err(CoreError::frontmatter(
                path,
                format!("expected a mapping, found {}", other.kind_name()),
            ));
        }
    };

    Ok((record, body.to_string()))
}
