//! # Core Library
//!
//! Configuration, error handling and market data models for the dashboard.

pub mod config;
pub mod error;
pub mod dto;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
