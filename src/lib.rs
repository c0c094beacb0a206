//! kinu-travel: deterministic planning formulas for the KINU travel planner
//!
//! The core is a rule-based budget engine that prices a trip from its
//! destination, dates, travel party and priority, then grades the total
//! against a fixed "trust zone" of 80–100% of the stated budget. Trip
//! countdown and packing-weight formulas ride alongside, and all three are
//! exposed as JSON tools for an external assistant.
//!
//! # Quick Start
//!
//! ```rust
//! use kinu_travel::{Budget, BudgetEngine, BudgetStatus, Priority, Traveler, TripRequest};
//!
//! # fn main() -> kinu_travel::Result<()> {
//! let request = TripRequest::new(
//!     "Lisbon",
//!     "2025-01-01".parse().unwrap(),
//!     "2025-01-05".parse().unwrap(),
//!     Budget::new(20000.0, "USD"),
//!     Priority::Accommodation,
//! )
//! .with_travelers([Traveler::adult(), Traveler::adult()]);
//!
//! let result = BudgetEngine::new().allocate(&request)?;
//! assert_eq!(result.allocated_budget, 21456);
//! assert_eq!(result.status, BudgetStatus::OverBudget);
//! # Ok(())
//! # }
//! ```

extern crate self as kinu_travel;

pub mod config;
pub mod engine;
pub mod error;
pub mod planning;
pub mod schemas;
pub mod tools;
pub mod types;

pub use config::AppConfig;
pub use engine::{AllocationCache, BudgetEngine, CachedEngine, CostProfile};
pub use error::{Result, TravelError};
pub use kinu_macros::tool;
pub use schemas::{SchemaHandle, Validator};
pub use tools::{FunctionFactory, Tool};
pub use types::{
    AllocationResult, Budget, BudgetStatus, CategoryDistribution, CategoryEstimate, Insight,
    Priority, Severity, Traveler, TravelerKind, TripRequest,
};

#[cfg(feature = "cli")]
pub mod cli;
