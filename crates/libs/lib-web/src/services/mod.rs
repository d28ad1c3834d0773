//! # Services Layer
//!
//! Business logic between HTTP handlers and the CoinGecko client:
//!
//! ```text
//! Handlers (HTTP) → Services (Business Logic) → CoinGeckoClient
//! ```
//!
//! - [`market`] - Market data for every page and JSON endpoint
//!
//! Services return `Result<T, AppError>`. Page handlers turn failures into
//! skeleton sections; JSON handlers return them as error responses.

pub mod market;

pub use market::{CoinOverview, MarketService};
