//! Tools module containing the tool abstraction and the built-in travel tools

pub mod budget;
pub mod function_factory;
pub mod planning;
pub mod tool;

pub use budget::BudgetTool;
pub use function_factory::FunctionFactory;
pub use planning::{CountdownParams, PackingWeight, TripCountdown};
pub use tool::{Tool, ToolRegistry};
