pub mod allocation;
pub mod trip;

pub use allocation::{
    AllocationResult, BudgetStatus, CategoryBreakdown, CategoryEstimate, Insight, Severity,
    TravelerCounts, TripLength, TrustZone,
};
pub use trip::{Budget, CategoryDistribution, Priority, Traveler, TravelerKind, TripRequest};
