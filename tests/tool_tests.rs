use kinu_travel::{
    tools::{BudgetTool, PackingWeight, TripCountdown},
    AllocationCache, AppConfig, FunctionFactory, Tool, TravelError, Validator,
};
use serde_json::json;
use std::time::Duration;

fn trip_params() -> serde_json::Value {
    json!({
        "destination": "Atlantis",
        "departure_date": "2025-01-01",
        "return_date": "2025-01-05",
        "travelers": [{ "kind": "adult" }, { "kind": "adult" }],
        "budget": { "total": 20000.0, "currency": "USD" },
        "priority": "accommodation"
    })
}

#[tokio::test]
async fn test_budget_tool() {
    let tool = BudgetTool::new();
    let result = tool.execute(trip_params()).await.unwrap();

    assert_eq!(result["allocated_budget"], 21456);
    assert_eq!(result["status"], "over_budget");
    assert_eq!(result["breakdown"]["buffer"]["amount"], 1951);
    assert_eq!(result["insight"]["severity"], "warning");
}

#[tokio::test]
async fn test_budget_tool_accepts_capitalized_priority() {
    let mut params = trip_params();
    params["priority"] = json!("Accommodation");

    let result = BudgetTool::new().execute(params).await.unwrap();
    assert_eq!(result["allocated_budget"], 21456);
}

#[tokio::test]
async fn test_budget_tool_rejects_unknown_priority() {
    let mut params = trip_params();
    params["priority"] = json!("shopping");

    let err = BudgetTool::new().execute(params).await.unwrap_err();
    assert!(matches!(err, TravelError::InvalidPriority(_)));
}

#[tokio::test]
async fn test_budget_tool_schema_violation() {
    let mut params = trip_params();
    params.as_object_mut().unwrap().remove("budget");

    let err = BudgetTool::new().execute(params).await.unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
    assert!(err.to_string().contains("TripRequest"));
}

#[tokio::test]
async fn test_budget_tool_serde_first_validator() {
    let tool = BudgetTool::new()
        .with_validator(Validator::SerdeFirst)
        .with_cache(AllocationCache::new(Duration::from_secs(60), 4));

    let mut params = trip_params();
    params["travelers"] = json!([{ "kind": "pilot" }]);
    let err = tool.execute(params).await.unwrap_err();
    assert!(err.to_string().contains("travelers[0]"));

    let ok = tool.execute(trip_params()).await.unwrap();
    assert_eq!(ok["trip"]["days"], 5);
}

#[tokio::test]
async fn test_budget_tool_engine_errors_pass_through() {
    let mut params = trip_params();
    params["return_date"] = json!("2024-12-31");

    let err = BudgetTool::new().execute(params).await.unwrap_err();
    assert_eq!(err.error_code(), "INVALID_DATE_RANGE");
}

#[tokio::test]
async fn test_countdown_tool() {
    let result = TripCountdown
        .execute(json!({
            "departure": "2025-06-10",
            "return_date": "2025-06-14",
            "today": "2025-06-12"
        }))
        .await
        .unwrap();

    assert_eq!(result["phase"], "in_progress");
    assert_eq!(result["trip_day"], 3);
    assert_eq!(result["days_until"], -2);
}

#[tokio::test]
async fn test_countdown_tool_reports_bad_dates() {
    let err = TripCountdown
        .execute(json!({
            "departure": "2025-06-10",
            "return_date": "2025-06-01",
            "today": "2025-06-01"
        }))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_DATE_RANGE");
    assert!(err.to_string().contains("Invalid date range"));
}

#[tokio::test]
async fn test_packing_tool() {
    let result = PackingWeight::new()
        .execute(json!({
            "items": [
                { "name": "Laptop", "weight_grams": 1500 },
                { "name": "Socks", "weight_grams": 50, "quantity": 6 }
            ],
            "allowance_grams": 7000
        }))
        .await
        .unwrap();

    assert_eq!(result["total_grams"], 1800);
    assert_eq!(result["item_count"], 7);
    assert_eq!(result["over_allowance"], false);
    assert_eq!(result["heaviest"], "Laptop");
}

#[tokio::test]
async fn test_packing_tool_keeps_error_codes() {
    let tool = PackingWeight::new();

    let err = tool
        .execute(json!({ "items": [], "allowance_grams": 0 }))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_ALLOWANCE");

    let err = tool
        .execute(json!({
            "items": [
                { "name": "Crate", "weight_grams": u64::MAX },
                { "name": "Crate", "weight_grams": u64::MAX }
            ]
        }))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_PACKING_LIST");
}

#[tokio::test]
async fn test_packing_tool_handles_huge_weights() {
    let result = PackingWeight::new()
        .execute(json!({
            "items": [{ "name": "Crate", "weight_grams": 100_000_000_000_000_000u64 }],
            "allowance_grams": 23000
        }))
        .await
        .unwrap();

    assert_eq!(result["over_allowance"], true);
    assert_eq!(result["usage_percent"], u32::MAX);
    assert_eq!(result["remaining_grams"], 23_000i64 - 100_000_000_000_000_000i64);
}

#[tokio::test]
async fn test_function_factory() {
    let factory = FunctionFactory::with_default_tools();

    assert!(factory.has_function("budget_allocation"));
    assert!(factory.has_function("trip_countdown"));
    assert!(factory.has_function("packing_weight"));
    assert!(!factory.has_function("weather"));
    assert_eq!(
        factory.tool_names(),
        vec!["budget_allocation", "packing_weight", "trip_countdown"]
    );

    let result = factory
        .execute_function("budget_allocation", trip_params())
        .await
        .unwrap();
    assert_eq!(result["allocated_budget"], 21456);

    let missing = factory.execute_function("weather", json!({})).await;
    assert!(matches!(missing, Err(TravelError::ToolNotFound(_))));
}

#[tokio::test]
async fn test_failed_call_becomes_error_payload() {
    let factory = FunctionFactory::with_default_tools();
    let mut params = trip_params();
    params["budget"]["total"] = json!(0.0);

    let payload = factory
        .execute_to_payload("budget_allocation", params)
        .await;
    assert_eq!(payload["error"]["code"], "INVALID_BUDGET");
    assert_eq!(payload["error"]["retryable"], false);
}

#[test]
fn test_tool_definitions() {
    let factory = FunctionFactory::with_default_tools();
    let definitions = factory.tool_definitions();
    assert_eq!(definitions.len(), 3);

    for definition in &definitions {
        assert_eq!(definition["type"], "function");
        assert!(definition["function"]["name"].is_string());
        assert!(definition["function"]["parameters"].is_object());
        assert!(definition["function"]["parameters"]
            .get("properties")
            .is_some());
    }
}

#[test]
fn test_error_handling() {
    let error = TravelError::ToolExecution("Test error".to_string());
    assert_eq!(error.error_code(), "TOOL_EXECUTION_ERROR");
    assert!(error.to_string().contains("Test error"));

    let payload = error.to_error_payload();
    assert_eq!(payload["error"]["code"], "TOOL_EXECUTION_ERROR");
    assert_eq!(payload["error"]["retryable"], false);
}

#[test]
fn test_blocking_call_outside_runtime() {
    let factory = FunctionFactory::with_default_tools();
    let result = tokio_test::block_on(factory.execute_function(
        "packing_weight",
        json!({ "items": [{ "name": "Tent", "weight_grams": 2400 }] }),
    ))
    .unwrap();

    assert_eq!(result["allowance_grams"], 23000);
    assert_eq!(result["remaining_grams"], 20600);
}

#[tokio::test]
async fn test_factory_from_config_applies_allowance() {
    let config = AppConfig {
        luggage_allowance_grams: 7_000,
        ..AppConfig::default()
    };
    let factory = FunctionFactory::from_config(&config);

    let result = factory
        .execute_function(
            "packing_weight",
            json!({ "items": [{ "name": "Tent", "weight_grams": 2400 }] }),
        )
        .await
        .unwrap();
    assert_eq!(result["allowance_grams"], 7000);
    assert_eq!(result["remaining_grams"], 4600);

    let payload = factory
        .execute_to_payload(
            "trip_countdown",
            json!({
                "departure": "2025-06-10",
                "return_date": "2025-06-01",
                "today": "2025-06-01"
            }),
        )
        .await;
    assert_eq!(payload["error"]["code"], "INVALID_DATE_RANGE");
}
