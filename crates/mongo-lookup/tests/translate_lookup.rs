//! End-to-end lookup translation: JSON lookup → MongoDB filter + sort

use bson::{doc, Bson};
use chrono::{TimeZone, Utc};
use mongo_lookup::{
    translate_lookup, translate_query, translate_sort, Expression, LookupSpec, MongoLookup,
    TranslateError, Value,
};
use serde_json::json;

#[test]
fn test_in_operator() {
    let query = [Expression::is_in("tag", ["a", "b"])];
    assert_eq!(
        translate_query(&query).unwrap(),
        doc! { "_payload.tag": { "$in": ["a", "b"] } }
    );
}

#[test]
fn test_not_in_operator() {
    let query = [Expression::not_in("tag", [1, 2, 2])];
    assert_eq!(
        translate_query(&query).unwrap(),
        doc! { "_payload.tag": { "$nin": [1_i64, 2_i64, 2_i64] } }
    );
}

#[test]
fn test_and_of_comparisons() {
    let query = [Expression::and([
        Expression::equal("status", "open"),
        Expression::greater_than("age", 18),
    ])];
    assert_eq!(
        translate_query(&query).unwrap(),
        doc! {
            "$and": [
                { "_payload.status": "open" },
                { "_payload.age": { "$gt": 18_i64 } },
            ]
        }
    );
}

#[test]
fn test_nested_combinators() {
    let query = [
        Expression::or([
            Expression::and([
                Expression::greater_or_equal("age", 18),
                Expression::lower_or_equal("age", 65),
            ]),
            Expression::equal("id", "admin"),
        ]),
        Expression::not_equal("status", "deleted"),
    ];
    assert_eq!(
        translate_query(&query).unwrap(),
        doc! {
            "$or": [
                {
                    "$and": [
                        { "_payload.age": { "$gte": 18_i64 } },
                        { "_payload.age": { "$lte": 65_i64 } },
                    ]
                },
                { "_id": "admin" },
            ],
            "_payload.status": { "$ne": "deleted" },
        }
    );
}

#[test]
fn test_unsupported_nested_in_and() {
    let query = [Expression::and([
        Expression::equal("status", "open"),
        Expression::or([Expression::Exists {
            field: "email".to_string(),
        }]),
    ])];
    let err = translate_query(&query).unwrap_err();
    assert!(matches!(err, TranslateError::UnsupportedOperation(ref op) if op == "Exists"));
}

#[test]
fn test_every_unsupported_variant_fails() {
    let unsupported = [
        Expression::Not {
            expr: Box::new(Expression::equal("a", 1)),
        },
        Expression::Exists {
            field: "a".to_string(),
        },
        Expression::NotExists {
            field: "a".to_string(),
        },
        Expression::Regex {
            field: "a".to_string(),
            pattern: ".*".to_string(),
        },
    ];

    for expr in unsupported {
        let op = expr.op_name();
        let query = [Expression::or([expr])];
        assert!(
            matches!(translate_query(&query), Err(TranslateError::UnsupportedOperation(_))),
            "{} should be rejected",
            op
        );
    }
}

#[test]
fn test_translation_is_repeatable() {
    let query = [
        Expression::is_in("tag", ["x", "y"]),
        Expression::or([
            Expression::lower_than("score", 0.5),
            Expression::equal("flag", true),
        ]),
    ];
    let first = translate_query(&query).unwrap();
    let second = translate_query(&query).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_values_pass_through() {
    let date = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap();
    let query = [
        Expression::equal("deleted", Value::Null),
        Expression::greater_than("created", date),
        Expression::lower_than("ratio", 0.25),
    ];
    assert_eq!(
        translate_query(&query).unwrap(),
        doc! {
            "_payload.deleted": Bson::Null,
            "_payload.created": { "$gt": bson::DateTime::from_millis(date.timestamp_millis()) },
            "_payload.ratio": { "$lt": 0.25 },
        }
    );
}

#[test]
fn test_lookup_from_json() {
    let lookup: LookupSpec = serde_json::from_value(json!({
        "filter": [
            { "op": "Equal", "field": "status", "value": "open" },
            { "op": "In", "field": "id", "values": ["a", "b"] },
            { "op": "GreaterThan", "field": "created", "value": { "$date": "2024-01-01T00:00:00Z" } }
        ],
        "sort": ["-created", "name"]
    }))
    .unwrap();

    let translated = MongoLookup::from_lookup(&lookup).unwrap();
    let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(
        translated.filter,
        doc! {
            "_payload.status": "open",
            "_id": { "$in": ["a", "b"] },
            "_payload.created": { "$gt": bson::DateTime::from_millis(since.timestamp_millis()) },
        }
    );
    assert_eq!(translated.sort, vec!["-_payload.created", "_payload.name"]);
    assert_eq!(
        translated.sort_document(),
        doc! { "_payload.created": -1, "_payload.name": 1 }
    );
}

#[test]
fn test_lookup_halves_are_independent() {
    let lookup = LookupSpec::new(vec![Expression::NotExists {
        field: "owner".to_string(),
    }])
    .with_sort(["-name"]);

    // Sort translation never fails, even when the filter cannot be translated
    assert_eq!(translate_sort(&lookup), vec!["-_payload.name"]);
    assert!(translate_lookup(&lookup).is_err());
    assert!(MongoLookup::from_lookup(&lookup).is_err());
}

#[test]
fn test_empty_lookup() {
    let translated = MongoLookup::from_lookup(&LookupSpec::default()).unwrap();
    assert!(translated.filter.is_empty());
    assert_eq!(translated.sort, vec!["_id"]);
}
