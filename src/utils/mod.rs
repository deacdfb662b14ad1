//! Utilities module
//!
//! Contains error handling, logging, identifier and JSON helpers

pub mod error;
pub mod ids;
pub mod json;
pub mod logging;
