//! End-to-end parsing of realistic JSON documents.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use sieve_validator::foundation::SchemaError;
use sieve_validator::prelude::*;

fn paths(result: &SafeParse) -> Vec<String> {
    result
        .issues()
        .map(|issues| issues.iter().map(|issue| issue.path.to_string()).collect())
        .unwrap_or_default()
}

fn hobbies() -> EnumSchema {
    enumeration(["Programmer", "Musician", "Footballer"])
}

fn profile() -> ObjectSchema {
    object()
        .field("username", string().min(3).max(10))
        .field("age", number().gt(0.0))
        .field("price", number().with_default(0.5))
        .field("birthday", date().optional())
        .field("isProgrammer", boolean().with_default(true))
        .field("isRobot", boolean().nullable())
        .field("isHuman", boolean().nullish())
        .field("isAnimal", literal(true))
        .field("email", string().email())
        .field("url", string().url())
        .field("hobby", hobbies())
        .field("hobby2", hobbies())
        .field(
            "hobby3",
            EnumSchema::from_values([json!(0), json!(1), json!(2)]).unwrap(),
        )
}

fn complete_profile() -> Value {
    json!({
        "username": "John",
        "age": 20,
        "birthday": "2001-04-12",
        "isRobot": false,
        "isAnimal": true,
        "email": "john@gmail.com",
        "url": "https://example.com/docs",
        "hobby": "Programmer",
        "hobby2": "Programmer",
        "hobby3": 2
    })
}

// ============================================================================
// BASIC TYPES
// ============================================================================

#[test]
fn picked_schema_accepts_and_rejects() {
    let user = object()
        .field("username", string())
        .field("age", number())
        .pick(["username"]);

    assert_eq!(
        user.parse(&json!({ "username": "John" })).unwrap(),
        json!({ "username": "John" })
    );

    let result = user.safe_parse(&json!({ "username": 1 }));
    let issues = result.issues().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.as_slice()[0].kind, IssueKind::TypeMismatch);
    assert_eq!(issues.as_slice()[0].message, "Expected string, received number");
    assert_eq!(paths(&result), ["username"]);
}

#[test]
fn missing_fields_report_required_each() {
    let result = profile().safe_parse(&json!({ "username": "John" }));
    let issues = result.issues().unwrap();

    assert_eq!(
        paths(&result),
        ["age", "isRobot", "isAnimal", "email", "url", "hobby", "hobby2", "hobby3"]
    );
    assert!(issues.iter().all(|issue| issue.kind == IssueKind::MissingRequired));
    assert!(issues.iter().all(|issue| issue.message == "Required"));
}

#[test]
fn complete_profile_applies_defaults() {
    let parsed = profile().parse(&complete_profile()).unwrap();

    assert_eq!(parsed["price"], json!(0.5));
    assert_eq!(parsed["isProgrammer"], json!(true));
    assert_eq!(parsed["birthday"], json!("2001-04-12T00:00:00Z"));
    assert_eq!(parsed["hobby3"], json!(2));
    assert!(parsed.get("isHuman").is_none());
}

#[test]
fn shape_exposes_field_schemas() {
    let schema = profile();
    assert_eq!(schema.shape().len(), 13);
    assert_eq!(schema.get("age").map(Schema::type_name), Some("number"));
    assert!(schema.get("birthday").is_some_and(Schema::is_optional));
}

#[test]
fn partial_profile_accepts_sparse_input() {
    assert!(
        profile()
            .partial()
            .safe_parse(&json!({ "username": "John" }))
            .is_success()
    );
}

// ============================================================================
// UNKNOWN KEYS
// ============================================================================

#[test]
fn unknown_key_policies() {
    let user = object().field("username", string());
    let input = json!({ "username": "John", "age": 10 });

    assert_eq!(user.parse(&input).unwrap(), json!({ "username": "John" }));
    assert_eq!(user.clone().passthrough().parse(&input).unwrap(), input);

    let result = user.strict().safe_parse(&input);
    let issues = result.issues().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.as_slice()[0].kind, IssueKind::UnrecognizedKey);
    assert_eq!(
        issues.as_slice()[0].message,
        "Unrecognized key(s) in object: 'age'"
    );
}

#[test]
fn parse_options_set_default_policy() {
    let user = object().field("username", string());
    let input = json!({ "username": "John", "age": 10 });
    let strict = ParseOptions::default().with_unknown_keys(UnknownKeys::Strict);

    assert!(user.safe_parse_with(&input, &strict).is_failure());
    // An explicit policy on the schema wins over the options.
    assert!(user.strip().safe_parse_with(&input, &strict).is_success());
}

// ============================================================================
// ARRAYS AND TUPLES
// ============================================================================

fn travel_log() -> ObjectSchema {
    object()
        .field("username", string())
        .field("friends", array(string()).nonempty().min(1).max(10))
        .field(
            "coords",
            tuple([Schema::from(number()), string().into(), number().into()]),
        )
        .field(
            "coords2",
            tuple([Schema::from(string()), date().into()]).rest(number()),
        )
}

#[test]
fn arrays_and_tuples_accept_valid_input() {
    let parsed = travel_log()
        .parse(&json!({
            "username": "John",
            "friends": ["Kyle", "Julie"],
            "coords": [1, "test", 3],
            "coords2": ["test", "2024-05-01T10:00:00Z", 3, 4, 5, 6, 7, 8, 9]
        }))
        .unwrap();

    assert_eq!(parsed["coords2"].as_array().map(Vec::len), Some(9));
    assert_eq!(
        travel_log()
            .get("friends")
            .map(Schema::kind)
            .and_then(|kind| match kind {
                SchemaKind::Array(array) => Some(array.element().type_name()),
                _ => None,
            }),
        Some("string")
    );
}

#[test]
fn empty_array_violates_length_bound() {
    let result = array(string()).min(1).safe_parse(&json!([]));
    let issues = result.issues().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.as_slice()[0].kind, IssueKind::OutOfRange);
    assert_eq!(
        issues.as_slice()[0].message,
        "Array must contain at least 1 element(s)"
    );
}

#[test]
fn tuple_rest_elements_are_validated() {
    let result = travel_log().safe_parse(&json!({
        "username": "John",
        "friends": ["Kyle"],
        "coords": [1, "test", 3],
        "coords2": ["test", "2024-05-01", 3, "four"]
    }));
    assert_eq!(paths(&result), ["coords2[3]"]);
}

// ============================================================================
// UNIONS
// ============================================================================

fn identified() -> Result<ObjectSchema, SchemaError> {
    Ok(object()
        .field("id", union([Schema::from(string()), number().into()]))
        .field("id2", string().or(number()))
        .field(
            "id3",
            discriminated_union(
                "status",
                [
                    object().field("status", literal("success")).field("data", string()),
                    object()
                        .field("status", literal("failed"))
                        .field("data", object().field("message", string())),
                ],
            )?,
        )
        .strict())
}

#[test]
fn unions_accept_any_member() {
    let schema = identified().unwrap();
    let input = json!({
        "id": 1,
        "id2": "uuid123",
        "id3": { "status": "success", "data": "This is success" }
    });
    assert_eq!(schema.parse(&input).unwrap(), input);
}

#[test]
fn discriminant_mismatch_is_single_issue() {
    let result = identified().unwrap().safe_parse(&json!({
        "id": 1,
        "id2": 2,
        "id3": { "status": "pending", "data": 3 }
    }));
    let issues = result.issues().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.as_slice()[0].kind, IssueKind::DiscriminantMismatch);
    assert_eq!(paths(&result), ["id3.status"]);
}

// ============================================================================
// RECORD, MAP, SET
// ============================================================================

#[test]
fn record_checks_every_value() {
    let words = record(string());
    assert!(
        words
            .safe_parse(&json!({ "sdfghj": "Hello", "ertzuipmnbv": "World" }))
            .is_success()
    );

    let result = words.safe_parse(&json!({ "sdfghj": "Hello", "ertzuipmnbv": 8 }));
    assert_eq!(paths(&result), ["ertzuipmnbv"]);
}

#[test]
fn map_entries_are_validated_pairwise() {
    let people = map(string(), object().field("name", string()));
    let input = json!([["id-john", { "name": "John" }], ["id-kyle", { "name": "Kyle" }]]);
    assert_eq!(people.parse(&input).unwrap(), input);

    let result = people.safe_parse(&json!([["id-john", { "name": 1 }]]));
    assert_eq!(paths(&result), ["[0].value.name"]);
}

#[test]
fn set_output_is_deduplicated() {
    assert_eq!(
        set(number()).parse(&json!([1, 1, 1, 2])).unwrap(),
        json!([1, 2])
    );
}

// ============================================================================
// REFINEMENT AND ERROR REPORTING
// ============================================================================

#[test]
fn refinement_runs_after_format_check() {
    let brand_email = string().email().refine(
        |v| v.as_str().is_some_and(|s| s.ends_with("@gmail.com")),
        "Email must end with @gmail.com",
    );

    assert!(brand_email.safe_parse(&json!("john@gmail.com")).is_success());

    let issues = brand_email
        .safe_parse(&json!("john@hotmail.com"))
        .issues()
        .cloned()
        .unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.as_slice()[0].kind, IssueKind::RefinementFailed);

    let issues = brand_email
        .safe_parse(&json!("not an email"))
        .issues()
        .cloned()
        .unwrap();
    assert_eq!(issues.as_slice()[0].kind, IssueKind::PatternMismatch);
}

#[test]
fn custom_messages_reach_the_summary() {
    let schema = object()
        .field(
            "username",
            string()
                .min(3)
                .with_message("Username must have minimum of 3 characters."),
        )
        .field(
            "coords2",
            tuple([Schema::from(string()), date().into()]).rest(number()),
        )
        .strict();

    let err = schema
        .parse(&json!({
            "username": "Jo",
            "coords2": ["test", "2024-05-01", 3, 4, 5, 6, 7, 8, 9]
        }))
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        r#"Validation error: Username must have minimum of 3 characters. at "username""#
    );
}

#[test]
fn max_issues_caps_report() {
    let options = ParseOptions::default().with_max_issues(2);
    let result = profile().safe_parse_with(&json!({}), &options);
    assert_eq!(result.issues().map(Issues::len), Some(2));
}

#[test]
fn safe_parse_result_serializes_tagged() {
    let result = object()
        .field("username", string())
        .safe_parse(&json!({ "username": 1 }));
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["success"], json!(false));
    assert_eq!(json["issues"][0]["path"], json!(["username"]));
    assert_eq!(json["issues"][0]["kind"], json!("type_mismatch"));
}
