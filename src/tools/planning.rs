//! Countdown and packing formulas exposed as tools

use chrono::NaiveDate;
use kinu_macros::tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::pin::Pin;

use super::Tool;
use crate::{
    planning::{
        countdown_on, summarize, Clock, PackingList, SystemClock, DEFAULT_ALLOWANCE_GRAMS,
    },
    schemas::Validator,
    TravelError,
};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CountdownParams {
    /// First day of the trip (YYYY-MM-DD)
    pub departure: NaiveDate,
    /// Last day of the trip (YYYY-MM-DD)
    pub return_date: NaiveDate,
    /// Date to count from; defaults to the local date
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

tool!(
    name = "trip_countdown",
    description = "Days until departure and the current phase of a trip",
    params = CountdownParams,
    |params: CountdownParams| async move {
        let today = params.today.unwrap_or_else(|| SystemClock.today());
        let countdown = countdown_on(params.departure, params.return_date, today)?;
        serde_json::to_value(countdown).map_err(TravelError::from)
    }
);

/// Totals a packing list; lists without an allowance use the configured one
#[derive(Debug, Clone, Copy)]
pub struct PackingWeight {
    default_allowance_grams: u64,
}

impl Default for PackingWeight {
    fn default() -> Self {
        Self::new()
    }
}

impl PackingWeight {
    pub fn new() -> Self {
        Self {
            default_allowance_grams: DEFAULT_ALLOWANCE_GRAMS,
        }
    }

    pub fn with_default_allowance(mut self, grams: u64) -> Self {
        self.default_allowance_grams = grams;
        self
    }
}

impl Tool for PackingWeight {
    fn name(&self) -> &'static str {
        "packing_weight"
    }

    fn description(&self) -> &'static str {
        "Total packed weight against a luggage allowance"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(PackingList)).unwrap_or_default()
    }

    fn execute(
        &self,
        parameters: Value,
    ) -> Pin<
        Box<dyn std::future::Future<Output = std::result::Result<Value, TravelError>> + Send + '_>,
    > {
        Box::pin(async move {
            let list: PackingList = Validator::SerdeFirst.validate(parameters)?;
            let summary = summarize(&list, self.default_allowance_grams)?;
            Ok(serde_json::to_value(summary)?)
        })
    }
}
