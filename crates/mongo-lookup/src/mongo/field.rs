//! Logical field name to document path

/// Prefix of every entity field: the payload lives in a sub-document
pub const PAYLOAD_PREFIX: &str = "_payload.";

/// Logical name of the primary key
pub const PRIMARY_KEY_FIELD: &str = "id";

/// Document path of the primary key, never prefixed
pub const PRIMARY_KEY_PATH: &str = "_id";

/// Map a logical field name to its path inside stored documents.
///
/// `id` maps to `_id`; anything else is looked up under `_payload.`.
pub fn map_field(field: &str) -> String {
    if field == PRIMARY_KEY_FIELD {
        return PRIMARY_KEY_PATH.to_string();
    }
    format!("{}{}", PAYLOAD_PREFIX, field)
}
