//! Math helpers.
pub mod storage;
