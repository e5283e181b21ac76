//! Sort translator

use bson::Document;

use super::field::{map_field, PRIMARY_KEY_FIELD};
use crate::Lookup;

/// Leading character of a descending sort key
pub const DESCENDING_MARKER: char = '-';

/// Translate the sort keys of a lookup into document paths.
///
/// Falls back to primary-key order when the lookup has no sort keys.
pub fn translate_sort<L: Lookup + ?Sized>(lookup: &L) -> Vec<String> {
    translate_sort_keys(lookup.sort())
}

pub fn translate_sort_keys(keys: &[String]) -> Vec<String> {
    if keys.is_empty() {
        return vec![map_field(PRIMARY_KEY_FIELD)];
    }

    keys.iter()
        .map(|key| match key.strip_prefix(DESCENDING_MARKER) {
            Some(field) => format!("{}{}", DESCENDING_MARKER, map_field(field)),
            None => map_field(key),
        })
        .collect()
}

/// Turn a translated sort list into `{path: 1 | -1}` form, in order.
pub fn sort_document(sort: &[String]) -> Document {
    let mut document = Document::new();
    for key in sort {
        match key.strip_prefix(DESCENDING_MARKER) {
            Some(path) => document.insert(path, -1),
            None => document.insert(key.as_str(), 1),
        };
    }
    document
}
