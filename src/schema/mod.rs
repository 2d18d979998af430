mod builder;
pub use builder::SchemaBuilder;

use serde_json::Value;

/// Schema is a representation of a JSON Schema that describes the structure
/// the LLM must return.
///
/// The same value is used twice per analysis: it is sent to the API as the
/// response schema constraint, and it documents the shape the reply is
/// deserialized against.
#[derive(Debug, Clone)]
pub struct Schema {
    pub schema: Value,
}

impl Schema {
    pub fn new(schema: Value) -> Self {
        Self { schema }
    }

    pub fn to_json(&self) -> &Value {
        &self.schema
    }

    /// Create a schema builder for an object type
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::object()
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.schema)
    }
}

/// SchemaType trait defines a type that can be converted to a JSON Schema
pub trait SchemaType {
    /// Generate a JSON Schema representation of this type
    fn schema() -> Schema;

    /// Optional name for the schema
    fn schema_name() -> Option<String> {
        None
    }
}
