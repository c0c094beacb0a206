use crate::{schemas::SchemaHandle, Result, TravelError};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::validation::validate_payload;

/// Validation strategies for tool parameters
#[derive(Debug, Clone)]
pub enum Validator {
    /// Fast validation using serde
    SerdeFirst,
    /// JSON Schema check first, then serde
    Strict(SchemaHandle),
}

impl Validator {
    /// Strict validator for the schema schemars derives for `T`
    pub fn strict_for<T: JsonSchema>(schema_name: &'static str) -> Self {
        Validator::Strict(SchemaHandle::for_type::<T>(schema_name))
    }

    /// Validate and deserialize parameters into type T
    pub fn validate<T: DeserializeOwned>(&self, params: Value) -> Result<T> {
        match self {
            Validator::SerdeFirst => serde_first_validate(params),
            Validator::Strict(schema) => {
                validate_payload(schema, &params)?;
                serde_first_validate(params)
            }
        }
    }
}

/// Fast serde-first validator
fn serde_first_validate<T: DeserializeOwned>(params: Value) -> Result<T> {
    serde_path_to_error::deserialize(params).map_err(|e| {
        TravelError::Validation(format!(
            "Parameter validation failed at {}: {}",
            e.path(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::PackingList;
    use serde_json::json;

    #[test]
    fn test_serde_first_reports_field_path() {
        let err = Validator::SerdeFirst
            .validate::<PackingList>(json!({ "items": [{ "name": "Hat" }] }))
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("items[0]"));
    }

    #[test]
    fn test_strict_accepts_valid_params() {
        let validator = Validator::strict_for::<PackingList>("PackingList");
        let list: PackingList = validator
            .validate(json!({ "items": [], "allowance_grams": 7000 }))
            .unwrap();
        assert_eq!(list.allowance_grams, Some(7000));
    }

    #[test]
    fn test_strict_rejects_wrong_type() {
        let validator = Validator::strict_for::<PackingList>("PackingList");
        let err = validator
            .validate::<PackingList>(json!({ "items": "none" }))
            .unwrap_err();
        assert!(err.to_string().contains("does not match `PackingList` schema"));
    }
}
