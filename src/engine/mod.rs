//! Trip budget allocation: cost model, traveler counting, priority weighting
//! and trust-zone classification.

pub mod allocation;
pub mod cache;
pub mod cost_model;
pub mod priority;
pub mod travelers;

pub use allocation::{
    classify_usage, trip_length, trust_zone, usage_ratio, BaseCosts, BudgetEngine,
    BUFFER_PERCENT, TRUST_ZONE_LOWER, TRUST_ZONE_UPPER,
};
pub use cache::{request_key, AllocationCache, CachedEngine};
pub use cost_model::{cost_profile, known_destinations, CostProfile};
pub use priority::{multipliers, Multipliers};
pub use travelers::{aggregate, pays_for_flight};
