use schemars::{schema::RootSchema, JsonSchema};
use serde_json::{json, Value};
use std::{any::type_name, sync::Arc};

/// Cached JSON schema for a parameter type.
#[derive(Clone, Debug)]
pub struct SchemaHandle {
    schema_name: &'static str,
    type_name: &'static str,
    schema_json: Arc<Value>,
}

impl SchemaHandle {
    /// Generate the schema for `T` with schemars.
    pub fn for_type<T: JsonSchema>(schema_name: &'static str) -> Self {
        Self::from_root_schema::<T>(schema_name, schemars::schema_for!(T))
    }

    pub fn from_root_schema<T>(schema_name: &'static str, root: RootSchema) -> Self {
        // Falls back to an open object schema; a RootSchema always serializes in practice.
        let schema_json = serde_json::to_value(root).unwrap_or_else(|_| json!({ "type": "object" }));

        Self {
            schema_name,
            type_name: type_name::<T>(),
            schema_json: Arc::new(schema_json),
        }
    }

    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn schema_json(&self) -> &Value {
        self.schema_json.as_ref()
    }
}
