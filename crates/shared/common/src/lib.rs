//! Common utilities shared across the service crates.
//!
//! This crate provides:
//! - Error type rendered at the HTTP edge
//! - Configuration structures loaded from the environment

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult};
