use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the allocated total lands relative to the trust zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    WithinTrustZone,
    UnderBudget,
    OverBudget,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::WithinTrustZone => "within trust zone",
            BudgetStatus::UnderBudget => "under budget",
            BudgetStatus::OverBudget => "over budget",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// Human-readable advice attached to an out-of-zone allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Insight {
    pub title: String,
    pub message: String,
    pub suggestion: String,
    pub severity: Severity,
}

/// Estimated spend for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryEstimate {
    /// Amount in whole currency units
    pub amount: u64,
    /// Share of the allocated total, rounded to a whole percent
    pub percent: u32,
    /// Amount the requested distribution would assign to this category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryBreakdown {
    pub flight: CategoryEstimate,
    pub accommodation: CategoryEstimate,
    pub experiences: CategoryEstimate,
    pub buffer: CategoryEstimate,
}

impl CategoryBreakdown {
    /// Sum of the three spend categories, before the buffer
    pub fn subtotal(&self) -> u64 {
        self.flight.amount + self.accommodation.amount + self.experiences.amount
    }

    /// Category percentages in display order. These need not add up to 100.
    pub fn percentages(&self) -> [u32; 4] {
        [
            self.flight.percent,
            self.accommodation.percent,
            self.experiences.percent,
            self.buffer.percent,
        ]
    }
}

/// Absolute bounds of the acceptable spend band for a stated budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrustZone {
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TripLength {
    pub days: u32,
    pub nights: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TravelerCounts {
    /// Travelers whose flight is billed
    pub paying_flyers: u32,
    /// Everyone in the party, infants included
    pub total_travelers: u32,
}

/// Output of a single budget allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AllocationResult {
    pub status: BudgetStatus,
    /// Subtotal plus buffer, in whole currency units
    pub allocated_budget: u64,
    /// Allocated total divided by the stated budget (1.0 = exactly on budget)
    pub usage_percent: f64,
    pub trust_zone: TrustZone,
    pub breakdown: CategoryBreakdown,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight: Option<Insight>,
    pub trip: TripLength,
    pub travelers: TravelerCounts,
    pub currency: String,
}

impl AllocationResult {
    pub fn is_within_trust_zone(&self) -> bool {
        self.status == BudgetStatus::WithinTrustZone
    }

    pub fn subtotal(&self) -> u64 {
        self.breakdown.subtotal()
    }
}
