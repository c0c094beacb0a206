use super::{tool::ToolRegistry, BudgetTool, PackingWeight, Tool, TripCountdown};
use crate::{engine::AllocationCache, AppConfig, Result, TravelError};
use serde_json::Value;
use tracing::{debug, warn};

/// Dispatches named tool calls to the registered tools
#[derive(Debug)]
pub struct FunctionFactory {
    registry: ToolRegistry,
}

impl FunctionFactory {
    /// Create a new function factory
    pub fn new() -> Self {
        Self {
            registry: ToolRegistry::new(),
        }
    }

    /// Factory with the budget, countdown and packing tools registered
    pub fn with_default_tools() -> Self {
        let mut factory = Self::new();
        factory.register_tool(BudgetTool::new());
        factory.register_tool(TripCountdown);
        factory.register_tool(PackingWeight::new());
        factory
    }

    /// Default tools, with the budget cache and luggage allowance taken from `config`
    pub fn from_config(config: &AppConfig) -> Self {
        let mut factory = Self::new();
        factory.register_tool(BudgetTool::new().with_cache(AllocationCache::from_config(config)));
        factory.register_tool(TripCountdown);
        factory.register_tool(
            PackingWeight::new().with_default_allowance(config.luggage_allowance_grams),
        );
        factory
    }

    /// Register a tool with the factory
    pub fn register_tool<T: Tool + 'static>(&mut self, tool: T) {
        self.registry.register(tool);
    }

    /// Execute a function call by name
    pub async fn execute_function(&self, function_name: &str, parameters: Value) -> Result<Value> {
        let tool = self
            .registry
            .get(function_name)
            .ok_or_else(|| TravelError::ToolNotFound(function_name.to_string()))?;

        debug!(tool = function_name, "executing tool");
        tool.execute(parameters).await
    }

    /// Execute a function call, folding any failure into a structured error payload
    pub async fn execute_to_payload(&self, function_name: &str, parameters: Value) -> Value {
        match self.execute_function(function_name, parameters).await {
            Ok(value) => value,
            Err(err) => {
                warn!(tool = function_name, error = %err, "tool call failed");
                err.to_error_payload()
            }
        }
    }

    /// Get all available tools as function-calling definitions
    pub fn tool_definitions(&self) -> Vec<Value> {
        self.registry.to_tool_definitions()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    /// Check if a function exists
    pub fn has_function(&self, name: &str) -> bool {
        self.registry.get(name).is_some()
    }
}

impl Default for FunctionFactory {
    fn default() -> Self {
        Self::new()
    }
}
