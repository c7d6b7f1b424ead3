//! The type-erased schema value
//!
//! Every builder (`StringSchema`, `ObjectSchema`, ...) converts into a
//! [`Schema`], which is what containers and combinators store. A `Schema` is an
//! `Arc` around a [`SchemaKind`], so cloning it is cheap and a schema tree can
//! be shared freely between threads.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::combinators::{
    DiscriminatedUnionSchema, NullableSchema, OptionalSchema, RefinedSchema, TransformSchema,
    UnionSchema, WithDefaultSchema,
};
use crate::foundation::{Outcome, ParseContext, Validate};
use crate::validators::{
    AnySchema, ArraySchema, BooleanSchema, DateSchema, EnumSchema, LiteralSchema, MapSchema,
    NeverSchema, NullSchema, NumberSchema, ObjectSchema, RecordSchema, SetSchema, StringSchema,
    TupleSchema,
};

// ============================================================================
// SCHEMA KIND
// ============================================================================

/// Every shape the engine understands.
#[derive(Debug, Clone)]
pub enum SchemaKind {
    /// A string with optional constraints.
    String(StringSchema),
    /// A finite number with optional constraints.
    Number(NumberSchema),
    /// `true` or `false`.
    Boolean(BooleanSchema),
    /// A calendar date or timestamp.
    Date(DateSchema),
    /// One exact value.
    Literal(LiteralSchema),
    /// One of a fixed set of strings or numbers.
    Enum(EnumSchema),
    /// Exactly `null`.
    Null(NullSchema),
    /// Anything, including absence (`any` and `unknown`).
    Any(AnySchema),
    /// Nothing.
    Never(NeverSchema),
    /// Named fields.
    Object(ObjectSchema),
    /// A homogeneous sequence.
    Array(ArraySchema),
    /// A fixed-length sequence with an optional rest element.
    Tuple(TupleSchema),
    /// String keys mapped to values of one schema.
    Record(RecordSchema),
    /// `[key, value]` pairs.
    Map(MapSchema),
    /// Unique members.
    Set(SetSchema),
    /// First matching member wins.
    Union(UnionSchema),
    /// Member selected by a literal field.
    DiscriminatedUnion(DiscriminatedUnionSchema),
    /// Base schema plus a predicate.
    Refined(RefinedSchema),
    /// Base schema plus an output mapping.
    Transform(TransformSchema),
    /// Accepts absence.
    Optional(OptionalSchema),
    /// Accepts `null`.
    Nullable(NullableSchema),
    /// Replaces absence with a default.
    Default(WithDefaultSchema),
}

// ============================================================================
// SCHEMA
// ============================================================================

/// An immutable, cheaply clonable schema.
///
/// # Examples
///
/// ```
/// use sieve_validator::prelude::*;
/// use serde_json::json;
///
/// let tags: Schema = array(string()).min(1).into();
/// let shared = tags.clone();
///
/// assert!(shared.safe_parse(&json!(["a"])).is_success());
/// assert!(tags.safe_parse(&json!([])).is_failure());
/// ```
#[derive(Clone)]
pub struct Schema(Arc<SchemaKind>);

impl Schema {
    /// Wraps a schema kind.
    #[must_use]
    pub fn new(kind: SchemaKind) -> Self {
        Self(Arc::new(kind))
    }

    /// The underlying kind.
    #[must_use]
    pub fn kind(&self) -> &SchemaKind {
        &self.0
    }

    /// Short name of the outermost shape, used in issue params and logs.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self.kind() {
            SchemaKind::String(_) => "string",
            SchemaKind::Number(_) => "number",
            SchemaKind::Boolean(_) => "boolean",
            SchemaKind::Date(_) => "date",
            SchemaKind::Literal(_) => "literal",
            SchemaKind::Enum(_) => "enum",
            SchemaKind::Null(_) => "null",
            SchemaKind::Any(any) => any.label(),
            SchemaKind::Never(_) => "never",
            SchemaKind::Object(_) => "object",
            SchemaKind::Array(_) => "array",
            SchemaKind::Tuple(_) => "tuple",
            SchemaKind::Record(_) => "record",
            SchemaKind::Map(_) => "map",
            SchemaKind::Set(_) => "set",
            SchemaKind::Union(_) => "union",
            SchemaKind::DiscriminatedUnion(_) => "discriminated_union",
            SchemaKind::Refined(refined) => refined.base().type_name(),
            SchemaKind::Transform(transform) => transform.base().type_name(),
            SchemaKind::Optional(_) => "optional",
            SchemaKind::Nullable(_) => "nullable",
            SchemaKind::Default(_) => "default",
        }
    }

    /// Returns `true` when an absent value is accepted.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        match self.kind() {
            SchemaKind::Optional(_) | SchemaKind::Default(_) | SchemaKind::Any(_) => true,
            SchemaKind::Nullable(inner) => inner.inner().is_optional(),
            SchemaKind::Refined(refined) => refined.base().is_optional(),
            _ => false,
        }
    }

    /// The object schema, if this is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self.kind() {
            SchemaKind::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Removes every outer `optional` wrapper.
    #[must_use]
    pub fn unwrap_optional(&self) -> Schema {
        let mut current = self;
        while let SchemaKind::Optional(optional) = current.kind() {
            current = optional.inner();
        }
        current.clone()
    }

    /// Makes every nested object field optional.
    ///
    /// Descends into objects, arrays, tuples and the `optional`/`nullable`
    /// wrappers; every other schema is returned unchanged.
    #[must_use]
    pub fn deep_partial(&self) -> Schema {
        match self.kind() {
            SchemaKind::Object(object) => object.deep_partial().into(),
            SchemaKind::Array(array) => array.map_element(Schema::deep_partial).into(),
            SchemaKind::Tuple(tuple) => tuple.map_items(Schema::deep_partial).into(),
            SchemaKind::Optional(optional) => {
                OptionalSchema::new(optional.inner().deep_partial()).into()
            }
            SchemaKind::Nullable(nullable) => {
                NullableSchema::new(nullable.inner().deep_partial()).into()
            }
            _ => self.clone(),
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.kind(), f)
    }
}

impl Validate for Schema {
    fn validate(&self, input: Option<&Value>, ctx: &mut ParseContext<'_>) -> Outcome {
        match self.kind() {
            SchemaKind::String(s) => s.validate(input, ctx),
            SchemaKind::Number(s) => s.validate(input, ctx),
            SchemaKind::Boolean(s) => s.validate(input, ctx),
            SchemaKind::Date(s) => s.validate(input, ctx),
            SchemaKind::Literal(s) => s.validate(input, ctx),
            SchemaKind::Enum(s) => s.validate(input, ctx),
            SchemaKind::Null(s) => s.validate(input, ctx),
            SchemaKind::Any(s) => s.validate(input, ctx),
            SchemaKind::Never(s) => s.validate(input, ctx),
            SchemaKind::Object(s) => s.validate(input, ctx),
            SchemaKind::Array(s) => s.validate(input, ctx),
            SchemaKind::Tuple(s) => s.validate(input, ctx),
            SchemaKind::Record(s) => s.validate(input, ctx),
            SchemaKind::Map(s) => s.validate(input, ctx),
            SchemaKind::Set(s) => s.validate(input, ctx),
            SchemaKind::Union(s) => s.validate(input, ctx),
            SchemaKind::DiscriminatedUnion(s) => s.validate(input, ctx),
            SchemaKind::Refined(s) => s.validate(input, ctx),
            SchemaKind::Transform(s) => s.validate(input, ctx),
            SchemaKind::Optional(s) => s.validate(input, ctx),
            SchemaKind::Nullable(s) => s.validate(input, ctx),
            SchemaKind::Default(s) => s.validate(input, ctx),
        }
    }

    fn name(&self) -> &str {
        self.type_name()
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

macro_rules! into_schema {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Schema {
                fn from(schema: $ty) -> Self {
                    Schema::new(SchemaKind::$variant(schema))
                }
            }
        )*
    };
}

into_schema! {
    StringSchema => String,
    NumberSchema => Number,
    BooleanSchema => Boolean,
    DateSchema => Date,
    LiteralSchema => Literal,
    EnumSchema => Enum,
    NullSchema => Null,
    AnySchema => Any,
    NeverSchema => Never,
    ObjectSchema => Object,
    ArraySchema => Array,
    TupleSchema => Tuple,
    RecordSchema => Record,
    MapSchema => Map,
    SetSchema => Set,
    UnionSchema => Union,
    DiscriminatedUnionSchema => DiscriminatedUnion,
    RefinedSchema => Refined,
    TransformSchema => Transform,
    OptionalSchema => Optional,
    NullableSchema => Nullable,
    WithDefaultSchema => Default,
}

impl From<&Schema> for Schema {
    fn from(schema: &Schema) -> Self {
        schema.clone()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::SchemaExt;
    use crate::validators::{array, number, object, string};
    use serde_json::json;

    #[test]
    fn test_schema_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Schema>();
    }

    #[test]
    fn test_type_name_sees_through_refinement() {
        let schema = string().refine(|_| true, "never");
        assert_eq!(schema.type_name(), "string");
    }

    #[test]
    fn test_unwrap_optional() {
        let schema = string().optional().optional();
        assert!(schema.is_optional());
        assert!(!schema.unwrap_optional().is_optional());
    }

    #[test]
    fn test_deep_partial_descends_into_arrays() {
        let schema: Schema = array(object().field("name", string())).into();
        let relaxed = schema.deep_partial();
        assert!(relaxed.safe_parse(&json!([{}])).is_success());
        assert!(schema.safe_parse(&json!([{}])).is_failure());
    }

    #[test]
    fn test_deep_partial_leaves_primitives_alone() {
        let schema: Schema = number().into();
        assert!(schema.deep_partial().safe_parse(&json!("x")).is_failure());
    }
}
