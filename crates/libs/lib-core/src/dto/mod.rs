//! # Data Transfer Objects (DTOs)
//!
//! Records received from the market-data API and the shapes the dashboard
//! serves back from its JSON endpoints.

pub mod market;

pub use market::*;
