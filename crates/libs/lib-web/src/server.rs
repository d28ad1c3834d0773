//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! [`start_server`] loads [`Config`], builds the CoinGecko client and the
//! market service, and serves [`create_router`] on the configured address.
//! Configuration problems stop startup before the listener is bound.

// region: --- Imports
use axum::{routing::get, Router};
use lib_coingecko::CoinGeckoClient;
use lib_core::{AppError, Config};
use lib_utils::get_env_or;
use crate::handlers;
use crate::middleware::{log_requests, stamp_req, RequestStamp};
use crate::services::MarketService;
use std::sync::Arc;
use tracing::info;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub market: Arc<MarketService>,
}

impl AppState {
    /// Build the client and services for `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when `config` does not validate.
    pub fn new(config: &Config) -> lib_core::Result<Self> {
        let client = Arc::new(CoinGeckoClient::new(config)?);

        Ok(Self {
            market: Arc::new(MarketService::new(client)),
        })
    }
}

impl axum::extract::FromRef<AppState> for Arc<MarketService> {
    fn from_ref(state: &AppState) -> Self {
        state.market.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Address used when `BIND_ADDRESS` is not set.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3000")
    pub bind_address: String,
}

impl ServerConfig {
    /// Read `BIND_ADDRESS`, falling back to [`DEFAULT_BIND_ADDRESS`].
    pub fn from_env() -> Self {
        Self {
            bind_address: get_env_or("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Install the global tracing subscriber, filtered by `LOG_LEVEL`.
fn init_tracing() -> anyhow::Result<String> {
    let log_level = get_env_or("LOG_LEVEL", "info").to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => tracing_subscriber::EnvFilter::new(&log_level),
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    Ok(log_level)
}

/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - The tracing subscriber cannot be installed
/// - `COINGECKO_BASE_URL` or `COINGECKO_API_KEY` is missing or invalid
/// - `COINGECKO_REVALIDATE_SECS` is not a number
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let log_level = init_tracing()?;

    info!(" COIN DASHBOARD STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    info!("CoinGecko base URL: {}", app_config.coingecko_base_url);
    info!("Revalidation window: {}s", app_config.revalidate_secs);

    let state = AppState::new(&app_config).map_err(|e| anyhow::anyhow!(e))?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState) -> Router {
    info!("[ROUTE SETUP] Registering HTTP routes...");

    Router::new()
        .route("/", get(handlers::pages::home))
        .route("/coins", get(handlers::pages::coins))
        .route("/coins/{id}", get(handlers::pages::coin))
        .route("/api/coins", get(handlers::market::get_coins))
        .route("/api/coins/{id}/ohlc", get(handlers::market::get_coin_ohlc))
        .route("/health", get(handlers::pages::health))
        .fallback(|uri: axum::http::Uri| async move {
            info!("[404 HANDLER] Unmatched route - returning 404");
            AppError::NotFound(format!("No route for {}", uri.path()))
        })
        .with_state(state)
        // Layers wrap what is above them: the last one added runs first.
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_failure(|error: tower_http::classify::ServerErrorsFailureClass, latency: std::time::Duration, _span: &tracing::Span| {
                    tracing::error!(
                        error = ?error,
                        latency_ms = latency.as_millis(),
                        "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                        error,
                        latency.as_millis()
                    );
                }),
        )
        .layer(axum::middleware::from_fn(log_requests))
        .layer(axum::middleware::from_fn(stamp_req))
}

/// Log server information
fn log_server_info() {
    info!(" PAGES:");
    info!("   • GET  /");
    info!("   • GET  /coins?page={{n}}");
    info!("   • GET  /coins/{{id}}?days={{1|7|14|30|90|180|365|max}}");
    info!(" API:");
    info!("   • GET  /api/coins?page={{n}}");
    info!("   • GET  /api/coins/{{id}}/ohlc?days={{1|7|14|30|90|180|365|max}}");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
