//! Proxy patterns for deploying many contract instances that share a single
//! implementation.
pub mod clones;
