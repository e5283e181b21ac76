//! Storage-agnostic lookups and their MongoDB lowering
//!
//! A lookup is a filter (an implicitly conjoined list of [`Expression`]s)
//! plus an ordered list of sort keys. The [`mongo`] module turns one into the
//! filter document and sort list a MongoDB `find` expects, with entity fields
//! stored under a `_payload` sub-document and the primary key at `_id`.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

pub mod mongo;
mod value;

pub use mongo::{
    map_field, project_value, project_values, sort_document, translate_lookup, translate_query,
    translate_sort, translate_sort_keys, MongoLookup, TranslateError, PAYLOAD_PREFIX,
    PRIMARY_KEY_FIELD, PRIMARY_KEY_PATH,
};
pub use value::Value;

/// Logical filter expression
///
/// The MongoDB translator covers the boolean combinators and the comparison
/// operators. `Not`, `Exists`, `NotExists` and `Regex` are part of the
/// logical model but have no lowering and are rejected with
/// [`TranslateError::UnsupportedOperation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum Expression {
    And {
        children: Vec<Expression>,
    },
    Or {
        children: Vec<Expression>,
    },
    In {
        field: String,
        values: Vec<Value>,
    },
    NotIn {
        field: String,
        values: Vec<Value>,
    },
    Equal {
        field: String,
        value: Value,
    },
    NotEqual {
        field: String,
        value: Value,
    },
    GreaterThan {
        field: String,
        value: Value,
    },
    GreaterOrEqual {
        field: String,
        value: Value,
    },
    LowerThan {
        field: String,
        value: Value,
    },
    LowerOrEqual {
        field: String,
        value: Value,
    },
    Not {
        expr: Box<Expression>,
    },
    Exists {
        field: String,
    },
    NotExists {
        field: String,
    },
    Regex {
        field: String,
        pattern: String,
    },
}

impl Expression {
    pub fn and(children: impl IntoIterator<Item = Expression>) -> Self {
        Expression::And {
            children: children.into_iter().collect(),
        }
    }

    pub fn or(children: impl IntoIterator<Item = Expression>) -> Self {
        Expression::Or {
            children: children.into_iter().collect(),
        }
    }

    pub fn is_in<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Expression::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn not_in<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Expression::NotIn {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Expression::Equal {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn not_equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Expression::NotEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn greater_than(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Expression::GreaterThan {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn greater_or_equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Expression::GreaterOrEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn lower_than(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Expression::LowerThan {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn lower_or_equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Expression::LowerOrEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Operation name, as it appears in the `op` tag of the JSON form
    pub fn op_name(&self) -> &'static str {
        match self {
            Expression::And { .. } => "And",
            Expression::Or { .. } => "Or",
            Expression::In { .. } => "In",
            Expression::NotIn { .. } => "NotIn",
            Expression::Equal { .. } => "Equal",
            Expression::NotEqual { .. } => "NotEqual",
            Expression::GreaterThan { .. } => "GreaterThan",
            Expression::GreaterOrEqual { .. } => "GreaterOrEqual",
            Expression::LowerThan { .. } => "LowerThan",
            Expression::LowerOrEqual { .. } => "LowerOrEqual",
            Expression::Not { .. } => "Not",
            Expression::Exists { .. } => "Exists",
            Expression::NotExists { .. } => "NotExists",
            Expression::Regex { .. } => "Regex",
        }
    }
}

/// Top-level filter: every expression must hold
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(pub Vec<Expression>);

impl Deref for Query {
    type Target = [Expression];

    fn deref(&self) -> &[Expression] {
        &self.0
    }
}

impl From<Vec<Expression>> for Query {
    fn from(exprs: Vec<Expression>) -> Self {
        Query(exprs)
    }
}

impl FromIterator<Expression> for Query {
    fn from_iter<T: IntoIterator<Item = Expression>>(iter: T) -> Self {
        Query(iter.into_iter().collect())
    }
}

/// Input of a translation: a filter and its sort keys
///
/// Sort keys are logical field names, descending when prefixed with `-`.
pub trait Lookup {
    fn filter(&self) -> &Query;

    fn sort(&self) -> &[String];
}

/// Plain lookup, deserializable from `{"filter": [...], "sort": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupSpec {
    #[serde(default)]
    pub filter: Query,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<String>,
}

impl LookupSpec {
    pub fn new(filter: impl Into<Query>) -> Self {
        Self {
            filter: filter.into(),
            sort: Vec::new(),
        }
    }

    pub fn with_sort<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.sort = keys.into_iter().map(Into::into).collect();
        self
    }
}

impl Lookup for LookupSpec {
    fn filter(&self) -> &Query {
        &self.filter
    }

    fn sort(&self) -> &[String] {
        &self.sort
    }
}
