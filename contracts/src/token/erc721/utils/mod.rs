//! Utilities for the ERC-721 standard.
pub mod holder;
pub use holder::Erc721Holder;
