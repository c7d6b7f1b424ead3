//! Macros for declaring schemas with minimal boilerplate.
//!
//! - [`object!`] builds an object schema from `"key" => schema` pairs
//! - [`any_of!`] builds a union from a list of schemas

/// Builds an [`ObjectSchema`](crate::validators::ObjectSchema) from
/// `"key" => schema` pairs, in declaration order.
///
/// ```
/// use sieve_validator::prelude::*;
/// use sieve_validator::object;
/// use serde_json::json;
///
/// let point = object! {
///     "x" => number(),
///     "y" => number(),
///     "label" => string().optional(),
/// };
///
/// assert!(point.safe_parse(&json!({ "x": 1, "y": 2 })).is_success());
/// assert_eq!(point.keys().collect::<Vec<_>>(), ["x", "y", "label"]);
/// ```
#[macro_export]
macro_rules! object {
    () => {
        $crate::validators::ObjectSchema::new()
    };
    ($($key:expr => $schema:expr),+ $(,)?) => {
        $crate::validators::ObjectSchema::new()$(.field($key, $schema))+
    };
}

/// Builds a union; the first matching schema wins.
///
/// ```
/// use sieve_validator::prelude::*;
/// use sieve_validator::any_of;
/// use serde_json::json;
///
/// let flag = any_of![boolean(), literal("yes"), literal("no")];
///
/// assert!(flag.safe_parse(&json!("yes")).is_success());
/// assert!(flag.safe_parse(&json!("maybe")).is_failure());
/// ```
#[macro_export]
macro_rules! any_of {
    ($first:expr $(,)?) => {
        $crate::schema::Schema::from($first)
    };
    ($first:expr, $($rest:expr),+ $(,)?) => {
        $crate::combinators::union([
            $crate::schema::Schema::from($first),
            $($crate::schema::Schema::from($rest)),+
        ])
    };
}
