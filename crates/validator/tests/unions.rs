//! Union and discriminated union behavior.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use sieve_validator::foundation::SchemaError;
use sieve_validator::prelude::*;

fn id() -> Schema {
    string().uuid().or(number().int().positive())
}

#[rstest]
#[case(json!(7))]
#[case(json!("123e4567-e89b-12d3-a456-426614174000"))]
fn union_accepts_either_member(#[case] input: Value) {
    assert_eq!(id().parse(&input).unwrap(), input);
}

#[test]
fn chained_or_extends_one_union() {
    let schema = string().or(number()).or(boolean());
    match schema.kind() {
        SchemaKind::Union(union) => assert_eq!(union.members().len(), 3),
        other => panic!("expected a union, got {other:?}"),
    }
}

#[test]
fn closest_member_issues_are_reported() {
    // The string member fails twice, the object member once.
    let schema = union([
        Schema::from(string().min(10).email()),
        object().field("email", string()).into(),
    ]);
    let issues = schema.safe_parse(&json!("abc")).issues().cloned().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.as_slice()[0].message, "Expected object, received string");

    let schema = union([
        Schema::from(object().field("email", string()).field("name", string())),
        string().into(),
    ]);
    let issues = schema
        .safe_parse(&json!({ "email": 3 }))
        .issues()
        .cloned()
        .unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.as_slice()[0].message, "Expected string, received object");
}

#[test]
fn ties_go_to_the_first_member() {
    let schema = union([Schema::from(string()), number().into()]);
    let issues = schema.safe_parse(&json!(true)).issues().cloned().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.as_slice()[0].message, "Expected string, received boolean");
}

#[test]
fn failed_members_leave_no_issues_behind() {
    let schema = object().field("value", union([Schema::from(number()), string().into()]));
    assert!(schema.safe_parse(&json!({ "value": "text" })).is_success());
}

#[test]
fn empty_union_rejects_everything() {
    let schema = union(Vec::new());
    let issues = schema.safe_parse(&json!(null)).issues().cloned().unwrap();
    assert_eq!(issues.as_slice()[0].message, "Invalid input");
}

fn response() -> Result<DiscriminatedUnionSchema, SchemaError> {
    discriminated_union(
        "status",
        [
            object().field("status", literal("success")).field("data", string()),
            object()
                .field("status", literal("failed"))
                .field("error", object().field("message", string())),
        ],
    )
}

#[test]
fn discriminated_union_validates_selected_member_only() {
    let schema = response().unwrap();
    let issues = schema
        .safe_parse(&json!({ "status": "failed", "data": "oops" }))
        .issues()
        .cloned()
        .unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.as_slice()[0].path.dotted(), "error");
    assert_eq!(issues.as_slice()[0].kind, IssueKind::MissingRequired);
}

#[rstest]
#[case::unknown(json!({ "status": "pending" }))]
#[case::missing(json!({ "data": "x" }))]
#[case::wrong_type(json!({ "status": 1 }))]
fn discriminant_mismatch_reports_once(#[case] input: Value) {
    let issues = response()
        .unwrap()
        .safe_parse(&input)
        .issues()
        .cloned()
        .unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.as_slice()[0].kind, IssueKind::DiscriminantMismatch);
    assert_eq!(issues.as_slice()[0].path.dotted(), "status");
    assert_eq!(issues.as_slice()[0].param("discriminator"), Some("status"));
}

#[test]
fn member_lookup_by_value() {
    let schema = response().unwrap();
    assert!(schema.member_for(&json!("failed")).is_some());
    assert!(schema.member_for(&json!("pending")).is_none());
    assert_eq!(schema.discriminant(), "status");
}

fn versioned() -> Result<DiscriminatedUnionSchema, SchemaError> {
    discriminated_union(
        "version",
        [
            object().field("version", literal(1)).field("name", string()),
            object().field("version", literal(2)).field("title", string()),
        ],
    )
}

#[rstest]
#[case::integer(json!({ "version": 2, "title": "x" }))]
#[case::integral_float(json!({ "version": 2.0, "title": "x" }))]
fn numeric_discriminants_match_by_value(#[case] input: Value) {
    let schema = versioned().unwrap();
    assert!(schema.member_for(&input["version"]).is_some());
    assert!(schema.safe_parse(&input).is_success());
}

#[test]
fn numerically_equal_discriminants_are_duplicates() {
    let err = discriminated_union(
        "version",
        [
            object().field("version", literal(1)),
            object().field("version", literal(1.0)),
        ],
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateDiscriminant { first: 0, second: 1, .. }));
}
