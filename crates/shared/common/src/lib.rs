//! Common utilities shared across the account service and the gateway.
//!
//! This crate provides:
//! - Unified error handling with HTTP response mapping
//! - Configuration structures read from the environment

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
