//! Filter translator

use bson::{doc, Bson, Document};
use tracing::{debug, trace};

use super::field::map_field;
use super::values::{project_value, project_values};
use crate::{Expression, Lookup, Value};

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

/// Translate the filter of a lookup.
pub fn translate_lookup<L: Lookup + ?Sized>(lookup: &L) -> Result<Document, TranslateError> {
    translate_query(lookup.filter())
}

/// Translate a list of implicitly conjoined expressions into a MongoDB
/// filter document.
///
/// Each expression becomes one key of the document. When two top-level
/// expressions produce the same key (two constraints on one field, or two
/// `And`s) the later one replaces the earlier; wrap them in an `And` to
/// keep both. An empty query yields an empty document, which matches
/// everything.
pub fn translate_query(query: &[Expression]) -> Result<Document, TranslateError> {
    let mut document = Document::new();

    for expr in query {
        let (key, value) = translate_expression(expr)?;
        trace!(op = expr.op_name(), key = %key, "translated expression");
        document.insert(key, value);
    }

    Ok(document)
}

fn translate_expression(expr: &Expression) -> Result<(String, Bson), TranslateError> {
    let entry = match expr {
        Expression::And { children } => ("$and".to_string(), translate_children(children)?),
        Expression::Or { children } => ("$or".to_string(), translate_children(children)?),
        Expression::In { field, values } => (
            map_field(field),
            Bson::Document(doc! { "$in": project_values(values) }),
        ),
        Expression::NotIn { field, values } => (
            map_field(field),
            Bson::Document(doc! { "$nin": project_values(values) }),
        ),
        // Implicit equality: no operator wrapper
        Expression::Equal { field, value } => (map_field(field), project_value(value)),
        Expression::NotEqual { field, value } => compare(field, "$ne", value),
        Expression::GreaterThan { field, value } => compare(field, "$gt", value),
        Expression::GreaterOrEqual { field, value } => compare(field, "$gte", value),
        Expression::LowerThan { field, value } => compare(field, "$lt", value),
        Expression::LowerOrEqual { field, value } => compare(field, "$lte", value),
        Expression::Not { .. }
        | Expression::Exists { .. }
        | Expression::NotExists { .. }
        | Expression::Regex { .. } => {
            debug!(op = expr.op_name(), "no MongoDB translation for operation");
            return Err(TranslateError::UnsupportedOperation(expr.op_name().to_string()));
        }
    };

    Ok(entry)
}

/// Each child is translated as a query of its own, so nested combinators
/// produce nested documents.
fn translate_children(children: &[Expression]) -> Result<Bson, TranslateError> {
    children
        .iter()
        .map(|child| translate_query(std::slice::from_ref(child)).map(Bson::Document))
        .collect::<Result<Vec<_>, _>>()
        .map(Bson::Array)
}

fn compare(field: &str, op: &str, value: &Value) -> (String, Bson) {
    (map_field(field), Bson::Document(doc! { op: project_value(value) }))
}
