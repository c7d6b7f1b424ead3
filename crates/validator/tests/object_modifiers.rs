//! Object modifiers: pick, omit, partial, deep partial, extend, merge.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use sieve_validator::prelude::*;

fn user() -> ObjectSchema {
    object()
        .field("username", string())
        .field("age", number())
        .field(
            "address",
            object()
                .field("city", string())
                .field("zip", string().length(5)),
        )
}

fn keys(schema: &ObjectSchema) -> Vec<&str> {
    schema.keys().collect()
}

#[rstest]
#[case::pick(user().pick(["username", "missing"]), vec!["username"])]
#[case::omit(user().omit(["age"]), vec!["username", "address"])]
#[case::extend(user().extend([("name", string())]), vec!["username", "age", "address", "name"])]
#[case::merge(
    user().merge(&object().field("age", string()).field("email", string().email())),
    vec!["username", "age", "address", "email"]
)]
fn modifiers_reshape_fields(#[case] schema: ObjectSchema, #[case] expected: Vec<&str>) {
    assert_eq!(keys(&schema), expected);
}

#[test]
fn modifiers_return_new_schemas() {
    let base = user();
    let _ = base.omit(["age"]).partial().extend([("extra", boolean())]);
    assert_eq!(keys(&base), ["username", "age", "address"]);
}

#[test]
fn partial_makes_top_level_fields_optional() {
    let partial = user().partial();
    assert!(partial.safe_parse(&json!({})).is_success());

    // Nested objects keep their required fields.
    let result = partial.safe_parse(&json!({ "address": {} }));
    assert_eq!(result.issues().map(Issues::len), Some(2));
}

#[test]
fn deep_partial_reaches_nested_objects() {
    let deep = user().deep_partial();
    assert!(deep.safe_parse(&json!({ "address": {} })).is_success());

    // Present values are still validated.
    let issues = deep
        .safe_parse(&json!({ "address": { "zip": "123" } }))
        .issues()
        .cloned()
        .unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.as_slice()[0].path.dotted(), "address.zip");
}

#[test]
fn deep_partial_reaches_objects_inside_arrays() {
    let schema = object()
        .field("items", array(object().field("sku", string())))
        .deep_partial();
    assert!(schema.safe_parse(&json!({ "items": [{}] })).is_success());
}

#[test]
fn required_undoes_partial() {
    let schema = user().partial().required();
    let result = schema.safe_parse(&json!({}));
    assert_eq!(result.issues().map(Issues::len), Some(3));
}

#[test]
fn extend_replaces_existing_fields() {
    let schema = user().extend([("age", string())]);
    assert!(
        schema
            .safe_parse(&json!({
                "username": "john",
                "age": "thirty",
                "address": { "city": "Oslo", "zip": "01234" }
            }))
            .is_success()
    );
}

#[test]
fn merge_takes_the_other_unknown_key_policy() {
    let merged = user().merge(&object().field("email", string()).strict());
    assert_eq!(merged.unknown_keys(), Some(UnknownKeys::Strict));
}

#[test]
fn keyof_lists_declared_fields() {
    let keys = user().keyof();
    assert!(keys.safe_parse(&json!("age")).is_success());

    let issues = keys.safe_parse(&json!("email")).issues().cloned().unwrap();
    assert_eq!(
        issues.as_slice()[0].message,
        "Invalid enum value. Expected 'username' | 'age' | 'address', received 'email'"
    );
}

#[test]
fn issues_follow_field_declaration_order() {
    let issues = user()
        .safe_parse(&json!({ "address": { "zip": 1 }, "age": "x" }))
        .issues()
        .cloned()
        .unwrap();
    let paths: Vec<String> = issues.iter().map(|issue| issue.path.dotted()).collect();
    assert_eq!(paths, ["username", "age", "address.city", "address.zip"]);
}
