use super::Tool;
use crate::{
    engine::{AllocationCache, BudgetEngine, CachedEngine},
    schemas::Validator,
    types::{Priority, TripRequest},
    Result,
};
use serde_json::Value;
use std::pin::Pin;

/// Prices a trip and grades it against the stated budget
#[derive(Debug)]
pub struct BudgetTool {
    engine: CachedEngine,
    validator: Validator,
}

impl Default for BudgetTool {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetTool {
    pub fn new() -> Self {
        Self {
            engine: CachedEngine::default(),
            validator: Validator::strict_for::<TripRequest>("TripRequest"),
        }
    }

    pub fn with_cache(mut self, cache: AllocationCache) -> Self {
        self.engine = CachedEngine::new(BudgetEngine::new(), cache);
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }
}

/// Parse `priority` case-insensitively so unknown values fail as `InvalidPriority`
/// rather than as a generic schema mismatch.
fn normalize_priority(mut parameters: Value) -> Result<Value> {
    let parsed = match parameters.get("priority") {
        Some(Value::String(raw)) => Some(raw.parse::<Priority>()?),
        _ => None,
    };

    if let Some(priority) = parsed {
        parameters["priority"] = Value::String(priority.as_str().to_string());
    }
    Ok(parameters)
}

impl Tool for BudgetTool {
    fn name(&self) -> &'static str {
        "budget_allocation"
    }

    fn description(&self) -> &'static str {
        "Estimate flight, accommodation and experience costs for a trip and check them against the traveler's budget"
    }

    fn parameters_schema(&self) -> Value {
        match &self.validator {
            Validator::Strict(schema) => schema.schema_json().clone(),
            Validator::SerdeFirst => {
                serde_json::to_value(schemars::schema_for!(TripRequest)).unwrap_or_default()
            }
        }
    }

    fn execute(
        &self,
        parameters: Value,
    ) -> Pin<
        Box<
            dyn std::future::Future<Output = std::result::Result<Value, crate::TravelError>>
                + Send
                + '_,
        >,
    > {
        Box::pin(async move {
            let parameters = normalize_priority(parameters)?;
            let request: TripRequest = self.validator.validate(parameters)?;
            let result = self.engine.allocate(&request)?;
            Ok(serde_json::to_value(result)?)
        })
    }
}
