use std::cmp::Ordering;
use std::collections::HashSet;

use crate::domain::content::ContentItem;

/// Number of leading title characters that identify a story across sources.
pub const DEFAULT_KEY_LEN: usize = 20;

/// Dedupe key of an item: the first `key_len` characters of its title.
///
/// No whitespace or punctuation folding is applied; titles that differ only
/// in those characters produce different keys.
pub fn dedupe_key(item: &ContentItem, key_len: usize) -> String {
    item.title.chars().take(key_len).collect()
}

/// Newest first; unknown timestamps after every known one.
fn by_recency(a: &ContentItem, b: &ContentItem) -> Ordering {
    match (&a.published_at, &b.published_at) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Combines per-source lists into one deduplicated, time-ordered list.
///
/// Lists are consumed in the supplied order, so on a key collision the item
/// from the earlier source is kept. The final ordering is a stable sort by
/// descending timestamp.
pub fn merge_dedupe(sources: Vec<Vec<ContentItem>>, key_len: usize) -> Vec<ContentItem> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for item in sources.into_iter().flatten() {
        let key = dedupe_key(&item, key_len);
        if key.trim().is_empty() {
            continue;
        }
        if seen.insert(key) {
            merged.push(item);
        }
    }

    merged.sort_by(by_recency);
    merged
}
