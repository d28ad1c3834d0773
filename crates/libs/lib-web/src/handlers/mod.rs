//! # HTTP Request Handlers
//!
//! Axum handlers grouped by what they return. Handlers delegate data access to
//! [`crate::services`] and markup to [`crate::views`].
//!
//! ## Handler Modules
//!
//! - **[`pages`]**: Server-rendered HTML
//!   - `GET /` - Home page
//!   - `GET /coins` - All coins, paged
//!   - `GET /coins/{id}` - Coin detail with chart
//!   - `GET /health` - Liveness probe
//!
//! - **[`market`]**: JSON API
//!   - `GET /api/coins/{id}/ohlc` - Chart candles
//!   - `GET /api/coins` - Paged coin listing
//!
//! ## Error Handling
//!
//! JSON handlers return `Result<Json<T>, AppError>` and let
//! [`AppError`](lib_core::AppError)'s `IntoResponse` pick the status. Page
//! handlers absorb fetch errors into skeleton sections and only fail when a
//! template cannot render.

pub mod market;
pub mod pages;

#[cfg(test)]
mod tests;
