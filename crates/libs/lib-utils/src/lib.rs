//! # Utilities Library
//!
//! Shared utility functions for environment variables and display formatting.

pub mod envs;
pub mod format;

// Re-export commonly used functions
pub use envs::{get_env, get_env_or, get_env_parse, get_env_parse_or};
pub use format::{format_currency, format_number, format_percentage, format_usd};
