//! Contract introspection.
pub mod erc165;
