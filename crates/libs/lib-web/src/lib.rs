//! # Web Library
//!
//! HTTP handlers, middleware, views and services for the coin dashboard.
//!
//! - [`table`] - Generic table renderer
//! - [`views`] - Dashboard tables, sections, pagination and templates
//! - [`services`] - Market data access
//! - [`handlers`] - HTML pages and JSON API
//! - [`middleware`] - Request stamping and logging
//! - [`server`] - Router, state and startup

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;
pub mod table;
pub mod views;

pub use server::{create_router, start_server, AppState, ServerConfig};
