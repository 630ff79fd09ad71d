//! Primitives for financial systems.
pub mod priced_mint;
