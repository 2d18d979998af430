use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};

use super::Schema;

/// SchemaBuilder helps construct JSON Schema object definitions incrementally.
///
/// Only object schemas are supported; nested objects are supplied as
/// already-built property values.
#[derive(Default)]
pub struct SchemaBuilder {
    title: Option<String>,
    description: Option<String>,
    properties: HashMap<String, Value>,
    required: HashSet<String>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object() -> Self {
        Self::new()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn property(
        mut self,
        name: impl Into<String>,
        property_schema: Value,
        required: bool,
    ) -> Self {
        let name = name.into();
        self.properties.insert(name.clone(), property_schema);
        if required {
            self.required.insert(name);
        }
        self
    }

    pub fn build(self) -> Schema {
        let mut schema = json!({
            "type": "object"
        });

        if let Some(title) = self.title {
            schema["title"] = json!(title);
        }

        if let Some(description) = self.description {
            schema["description"] = json!(description);
        }

        if !self.properties.is_empty() {
            schema["properties"] = json!(self.properties);

            if !self.required.is_empty() {
                // Sorted so the emitted schema is deterministic
                let mut required: Vec<&String> = self.required.iter().collect();
                required.sort();
                schema["required"] = json!(required);
            }
        }

        Schema::new(schema)
    }
}
