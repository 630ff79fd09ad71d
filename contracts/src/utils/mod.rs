//! Common utilities shared by the contract components.
pub mod introspection;
pub mod math;
pub mod revert;
