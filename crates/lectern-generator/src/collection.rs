//! Typed collection loading.
//!
//! Raw entries from a [`ContentProvider`] are validated against a [`Schema`].
//! Loading fails as a whole on the first invalid entry; [`check_collection`]
//! instead gathers every failure for reporting.

use std::{collections::HashMap, path::PathBuf};

use lectern_core::{Entry, Schema, ValidationError};
use tracing::{info, warn};

use crate::loader::{ContentProvider, LoadError, RawEntry, Result};

/// Load and validate every entry of the collection `T` belongs to.
///
/// Entries keep the provider's order.
pub fn get_collection<T, P>(provider: &P) -> Result<Vec<Entry<T>>>
where
    T: Schema,
    P: ContentProvider + ?Sized,
{
    let raw = dedupe(provider.list_entries(T::KIND)?);

    let entries = raw
        .into_iter()
        .map(|entry| {
            let data = T::validate(&entry.data).map_err(|source| LoadError::Invalid {
                path: entry.path.clone(),
                source,
            })?;
            Ok(into_entry(entry, data))
        })
        .collect::<Result<Vec<_>>>()?;

    info!(collection = %T::KIND, count = entries.len(), "collection loaded");
    Ok(entries)
}

/// Load a collection and keep the entries matching `filter`.
pub fn get_collection_filtered<T, P, F>(provider: &P, filter: F) -> Result<Vec<Entry<T>>>
where
    T: Schema,
    P: ContentProvider + ?Sized,
    F: Fn(&Entry<T>) -> bool,
{
    Ok(get_collection::<T, P>(provider)?
        .into_iter()
        .filter(|entry| filter(entry))
        .collect())
}

/// Outcome of validating a whole collection without stopping at failures.
#[derive(Debug)]
pub struct CheckReport<T> {
    /// Entries that validated.
    pub valid: Vec<Entry<T>>,

    /// Files that failed, with all of their field issues.
    pub failures: Vec<(PathBuf, ValidationError)>,
}

impl<T> CheckReport<T> {
    /// Number of entries checked.
    pub fn checked(&self) -> usize {
        self.valid.len() + self.failures.len()
    }

    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Validate every entry and collect all failures.
///
/// Load errors (unreadable files, broken frontmatter) still abort.
pub fn check_collection<T, P>(provider: &P) -> Result<CheckReport<T>>
where
    T: Schema,
    P: ContentProvider + ?Sized,
{
    let mut report = CheckReport {
        valid: Vec::new(),
        failures: Vec::new(),
    };

    for entry in dedupe(provider.list_entries(T::KIND)?) {
        match T::validate(&entry.data) {
            Ok(data) => report.valid.push(into_entry(entry, data)),
            Err(error) => report.failures.push((entry.path, error)),
        }
    }

    Ok(report)
}

fn into_entry<T: Schema>(raw: RawEntry, data: T) -> Entry<T> {
    Entry {
        id: raw.id,
        collection: T::KIND,
        path: raw.path,
        body: raw.body,
        data,
    }
}

/// Keep one entry per id.
///
/// A later duplicate replaces the earlier entry in the earlier entry's slot.
fn dedupe(entries: Vec<RawEntry>) -> Vec<RawEntry> {
    let mut positions: HashMap<_, usize> = HashMap::new();
    let mut unique: Vec<RawEntry> = Vec::with_capacity(entries.len());

    for entry in entries {
        match positions.get(&entry.id) {
            Some(&index) => {
                warn!(
                    id = %entry.id,
                    first = %unique[index].path.display(),
                    second = %entry.path.display(),
                    "duplicate entry id, later file wins"
                );
                unique[index] = entry;
            }
            None => {
                positions.insert(entry.id.clone(), unique.len());
                unique.push(entry);
            }
        }
    }

    unique
}
