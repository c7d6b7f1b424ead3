//! A tour of sieve-validator: every schema kind against sample data.
//!
//! Run with `RUST_LOG=sieve_validator=debug` to see rejection logs.

use serde::Deserialize;
use serde_json::{Value, json};
use sieve_validator::foundation::SchemaError;
use sieve_validator::prelude::*;
use tracing_subscriber::EnvFilter;

fn show(label: &str, result: &SafeParse) {
    match result {
        SafeParse::Success(value) => println!("✓ {label}: {value}"),
        SafeParse::Failure(issues) => {
            println!("✗ {label}: {}", format_issues(issues, &FormatOptions::default()));
        }
    }
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct User {
    username: String,
}

fn basic_types() {
    let user_schema = object()
        .field("username", string())
        .field("age", number())
        .pick(["username"]);

    let user = json!({ "username": "John" });
    match user_schema.clone().typed::<User>().parse(&user) {
        Ok(parsed) => println!("✓ parse: {parsed:?}"),
        Err(err) => println!("✗ parse: {err}"),
    }
    show("safe_parse", &user_schema.safe_parse(&user));
    show("safe_parse", &user_schema.safe_parse(&json!({ "username": 1 })));

    let hobbies = enumeration(["Programmer", "Musician", "Footballer"]);
    let profile = object()
        .field("username", string().min(3).max(10))
        .field("age", number().gt(0.0))
        .field("price", number().with_default(0.42))
        .field("birthday", date().optional())
        .field("isProgrammer", boolean().with_default(true))
        .field("isRobot", boolean().nullable())
        .field("isHuman", boolean().nullish())
        .field("isAnimal", literal(true))
        .field("email", string().email())
        .field("url", string().url())
        .field("hobby", hobbies.clone())
        .field("hobby2", hobbies.exclude(["Footballer"]));

    show("missing fields", &profile.safe_parse(&user));
    show(
        "complete profile",
        &profile.safe_parse(&json!({
            "username": "John",
            "age": 20,
            "birthday": "2001-04-12",
            "isRobot": false,
            "isAnimal": true,
            "email": "john@gmail.com",
            "url": "https://example.com/docs",
            "hobby": "Programmer",
            "hobby2": "Musician"
        })),
    );
    println!("  shape: {:?}", profile.keys().collect::<Vec<_>>());
    println!("  age: {:?}", profile.get("age"));
    show("partial", &profile.partial().safe_parse(&user));
}

fn unknown_keys() {
    let schema = object().field("username", string());
    let input = json!({ "username": "John", "age": 10 });

    show("strip", &schema.safe_parse(&input));
    show("passthrough", &schema.clone().passthrough().safe_parse(&input));
    show("strict", &schema.strict().safe_parse(&input));
}

fn collections() {
    let schema = object()
        .field("username", string())
        .field("friends", array(string()).nonempty().max(10))
        .field(
            "coords",
            tuple([Schema::from(number()), string().into(), number().into()]),
        )
        .field(
            "coords2",
            tuple([Schema::from(string()), date().into()]).rest(number()),
        );

    show(
        "arrays and tuples",
        &schema.safe_parse(&json!({
            "username": "John",
            "friends": ["Kyle", "Julie"],
            "coords": [1, "test", 3],
            "coords2": ["test", "2024-05-01T10:00:00Z", 3, 4, 5, 6, 7, 8, 9]
        })),
    );

    let words = record(string());
    show("record", &words.safe_parse(&json!({ "sdfghj": "Hello", "ertzuipmnbv": "World" })));
    show("record", &words.safe_parse(&json!({ "sdfghj": "Hello", "ertzuipmnbv": 8 })));

    let people = map(string(), object().field("name", string()));
    show(
        "map",
        &people.safe_parse(&json!([["id-john", { "name": "John" }], ["id-kyle", { "name": "Kyle" }]])),
    );

    show("set", &set(number()).safe_parse(&json!([1, 1, 1, 2])));
}

fn unions() -> Result<(), SchemaError> {
    let schema = object()
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
        .strict();

    let input: Value = json!({
        "id": 1,
        "id2": "uuid123",
        "id3": { "status": "success", "data": "This is success" }
    });
    show("unions", &schema.safe_parse(&input));
    show(
        "discriminant",
        &schema.safe_parse(&json!({ "id": 1, "id2": 2, "id3": { "status": "pending" } })),
    );
    Ok(())
}

fn refinements() {
    let brand_email = string().email().refine(
        |v| v.as_str().is_some_and(|s| s.ends_with("@gmail.com")),
        "Email must end with @gmail.com",
    );
    show("refine", &brand_email.safe_parse(&json!("john@gmail.com")));
    show("refine", &brand_email.safe_parse(&json!("john@hotmail.com")));

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
    if let Err(err) = schema.parse(&json!({
        "username": "Jo",
        "coords2": ["test", "2024-05-01", 3, 4, 5, 6, 7, 8, 9]
    })) {
        println!("✗ error handling: {err}");
    }
}

fn main() -> Result<(), SchemaError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    basic_types();
    unknown_keys();
    collections();
    unions()?;
    refinements();
    Ok(())
}
