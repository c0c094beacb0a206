//! JSON Schemas for tool parameters and the validators built on them

pub mod schema;
pub(crate) mod validation;
pub mod validator;

pub use schema::SchemaHandle;
pub use validator::Validator;
