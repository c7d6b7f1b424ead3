//! Property-based tests for sieve-validator.

use proptest::prelude::*;
use serde_json::{Value, json};
use sieve_validator::prelude::*;

fn profile() -> ObjectSchema {
    object()
        .field("username", string().trim().min(3).max(10))
        .field("age", number().int().nonnegative())
        .field("tags", set(string().trim()).max(5))
        .field("joined", date().optional())
        .field("role", enumeration(["admin", "member"]).with_default("member"))
}

fn profile_input() -> impl Strategy<Value = Value> {
    (
        "[ a-z]{0,14}",
        -5i64..200,
        prop::collection::vec("[ a-c]{1,3}", 0..8),
        prop::option::of((1990i32..2030, 1u32..13, 1u32..29)),
        prop::option::of(prop::sample::select(vec!["admin", "member", "guest"])),
    )
        .prop_map(|(username, age, tags, joined, role)| {
            let mut input = json!({ "username": username, "age": age, "tags": tags });
            if let Some((y, m, d)) = joined {
                input["joined"] = json!(format!("{y:04}-{m:02}-{d:02}"));
            }
            if let Some(role) = role {
                input["role"] = json!(role);
            }
            input
        })
}

// ============================================================================
// IDEMPOTENCE: parse(parse(x)) == parse(x)
// ============================================================================

proptest! {
    #[test]
    fn parsing_is_idempotent(input in profile_input()) {
        let schema = profile();
        if let SafeParse::Success(parsed) = schema.safe_parse(&input) {
            let again = schema.safe_parse(&parsed);
            prop_assert_eq!(again.value(), Some(&parsed));
        }
    }

    #[test]
    fn parsing_is_deterministic(input in profile_input()) {
        let schema = profile();
        let first = serde_json::to_value(schema.safe_parse(&input)).unwrap();
        let second = serde_json::to_value(schema.safe_parse(&input)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn trimmed_strings_stay_trimmed(s in "[ a-z]{0,20}") {
        if let SafeParse::Success(parsed) = string().trim().safe_parse(&json!(s)) {
            prop_assert_eq!(parsed, json!(s.trim()));
        }
    }
}

// ============================================================================
// COMBINATOR LAWS
// ============================================================================

proptest! {
    #[test]
    fn union_succeeds_iff_a_member_succeeds(n in -50i64..50) {
        let a = number().int().positive();
        let b = number().lt(-10.0);
        let either = a.clone().or(b.clone());

        let a_ok = a.safe_parse(&json!(n)).is_success();
        let b_ok = b.safe_parse(&json!(n)).is_success();
        prop_assert_eq!(either.safe_parse(&json!(n)).is_success(), a_ok || b_ok);
    }

    #[test]
    fn refine_fails_iff_base_or_predicate_fails(s in "[a-z@.]{0,12}") {
        let base = string().min(3);
        let refined = base.clone().refine(|v| v.as_str().is_some_and(|s| s.contains('@')), "needs @");

        let expected = base.safe_parse(&json!(s)).is_success() && s.contains('@');
        prop_assert_eq!(refined.safe_parse(&json!(s)).is_success(), expected);
    }

    #[test]
    fn optional_accepts_absence_and_keeps_inner_rules(n in prop::option::of(-10i64..10)) {
        let schema = object().field("n", number().nonnegative().optional());
        let input = n.map_or_else(|| json!({}), |n| json!({ "n": n }));
        prop_assert_eq!(schema.safe_parse(&input).is_success(), n.is_none_or(|n| n >= 0));
    }

    #[test]
    fn every_failure_has_an_issue(input in profile_input()) {
        if let SafeParse::Failure(issues) = profile().strict().safe_parse(&input) {
            prop_assert!(!issues.is_empty());
        }
    }
}
