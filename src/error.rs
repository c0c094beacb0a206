use thiserror::Error;

/// Main error type for the travel planning core
#[derive(Error, Debug)]
pub enum TravelError {
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Invalid budget: {0}")]
    InvalidBudget(String),

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    #[error("Trip has no travelers")]
    NoTravelers,

    #[error("Invalid category distribution: {0}")]
    InvalidDistribution(String),

    #[error("Invalid luggage allowance: {0}")]
    InvalidAllowance(String),

    #[error("Invalid packing list: {0}")]
    InvalidPackingList(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TravelError>;

/// Plain-text failures from tool handlers
impl From<String> for TravelError {
    fn from(message: String) -> Self {
        TravelError::ToolExecution(message)
    }
}

impl TravelError {
    /// True for failures caused by malformed trip or packing input.
    ///
    /// None of the variants are transient; callers surface these to the user
    /// instead of retrying.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TravelError::InvalidDateRange(_)
                | TravelError::InvalidBudget(_)
                | TravelError::InvalidPriority(_)
                | TravelError::NoTravelers
                | TravelError::InvalidDistribution(_)
                | TravelError::InvalidAllowance(_)
                | TravelError::InvalidPackingList(_)
                | TravelError::Validation(_)
        )
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            TravelError::InvalidDateRange(_) => "INVALID_DATE_RANGE",
            TravelError::InvalidBudget(_) => "INVALID_BUDGET",
            TravelError::InvalidPriority(_) => "INVALID_PRIORITY",
            TravelError::NoTravelers => "NO_TRAVELERS",
            TravelError::InvalidDistribution(_) => "INVALID_DISTRIBUTION",
            TravelError::InvalidAllowance(_) => "INVALID_ALLOWANCE",
            TravelError::InvalidPackingList(_) => "INVALID_PACKING_LIST",
            TravelError::Config(_) => "CONFIG_ERROR",
            TravelError::Serialization(_) => "SERIALIZATION_ERROR",
            TravelError::Validation(_) => "VALIDATION_ERROR",
            TravelError::ToolExecution(_) => "TOOL_EXECUTION_ERROR",
            TravelError::ToolNotFound(_) => "TOOL_NOT_FOUND",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": false
            }
        })
    }
}
