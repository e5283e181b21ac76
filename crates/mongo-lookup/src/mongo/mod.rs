//! MongoDB lowering
//!
//! Translates lookups into the filter document and sort specification
//! consumed by a MongoDB `find`.

mod field;
mod sort;
mod translator;
mod values;

use bson::Document;

use crate::Lookup;

pub use field::{map_field, PAYLOAD_PREFIX, PRIMARY_KEY_FIELD, PRIMARY_KEY_PATH};
pub use sort::{sort_document, translate_sort, translate_sort_keys, DESCENDING_MARKER};
pub use translator::{translate_lookup, translate_query, TranslateError};
pub use values::{project_value, project_values};

/// Both halves of a translated lookup, ready for the executor
#[derive(Debug, Clone, PartialEq)]
pub struct MongoLookup {
    pub filter: Document,
    pub sort: Vec<String>,
}

impl MongoLookup {
    pub fn from_lookup<L: Lookup + ?Sized>(lookup: &L) -> Result<Self, TranslateError> {
        Ok(Self {
            filter: translate_lookup(lookup)?,
            sort: translate_sort(lookup),
        })
    }

    /// Sort as a `{path: 1 | -1}` document
    pub fn sort_document(&self) -> Document {
        sort_document(&self.sort)
    }
}
