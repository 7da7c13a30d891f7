//! Tag normalization.

use std::collections::HashSet;

/// Lowercase every tag and drop duplicates.
///
/// The first occurrence of each tag keeps its position, so output order
/// follows the source but callers should treat the result as a set.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|tag| tag.as_ref().to_lowercase())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}
