//! Value projection into BSON

use bson::Bson;

use crate::Value;

/// Convert a single value to BSON without interpreting it.
///
/// Dates are truncated to millisecond precision, the resolution of a BSON
/// datetime.
pub fn project_value(value: &Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),
        Value::Int(i) => Bson::Int64(*i),
        Value::Float(f) => Bson::Double(*f),
        Value::String(s) => Bson::String(s.clone()),
        Value::Date(date) => Bson::DateTime(bson::DateTime::from_millis(date.timestamp_millis())),
    }
}

/// Convert values to BSON, keeping order and duplicates.
pub fn project_values(values: &[Value]) -> Vec<Bson> {
    values.iter().map(project_value).collect()
}
