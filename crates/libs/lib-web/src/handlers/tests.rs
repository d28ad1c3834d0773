//! # Handler Tests
//!
//! Drives the full router with `oneshot` against a mock CoinGecko served by
//! axum on an ephemeral port.

use crate::server::{create_router, AppState};
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use lib_core::dto::{CoinsPageResponse, OHLC};
use lib_core::Config;
use serde_json::{json, Value};
use std::collections::HashMap;
use tower::ServiceExt;

// region:    --- Mock Upstream

/// Behaviour of the mock CoinGecko.
#[derive(Clone, Copy)]
struct Upstream {
    /// Rows returned per markets page, capped at `per_page`
    market_rows: usize,
    categories_fail: bool,
}

impl Default for Upstream {
    fn default() -> Self {
        Self {
            market_rows: 10,
            categories_fail: false,
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "coin not found"}))).into_response()
}

async fn markets(State(upstream): State<Upstream>, Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let per_page: usize = params.get("per_page").and_then(|p| p.parse().ok()).unwrap_or(100);

    let coins = (0..upstream.market_rows.min(per_page))
        .map(|i| {
            let rank = (page - 1) * per_page + i + 1;
            json!({
                "id": format!("coin-{}", rank),
                "symbol": "cn",
                "name": format!("Coin {}", rank),
                "image": "https://img/coin.png",
                "current_price": 1234.5,
                "market_cap": 1_000_000_000.0,
                "market_cap_rank": rank,
                "total_volume": null,
                "price_change_percentage_24h": 2.345
            })
        })
        .collect();

    Json(Value::Array(coins))
}

async fn categories(State(upstream): State<Upstream>) -> Response {
    if upstream.categories_fail {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "categories down"}))).into_response();
    }

    let rows: Vec<Value> = (0..12)
        .map(|i| {
            json!({
                "id": format!("category-{}", i),
                "name": format!("Category {}", i),
                "market_cap": 5_000_000.0,
                "market_cap_change_24h": -1.5,
                "volume_24h": 250_000.0,
                "top_3_coins": ["https://img/a.png", "https://img/b.png", "https://img/c.png"]
            })
        })
        .collect();

    Json(Value::Array(rows)).into_response()
}

async fn trending() -> Json<Value> {
    let coins: Vec<Value> = (0..8)
        .map(|i| {
            json!({"item": {
                "id": format!("trend-{}", i),
                "name": format!("Trend {}", i),
                "symbol": "TRD",
                "market_cap_rank": 100 + i,
                "thumb": "https://img/t.png",
                "large": "https://img/l.png",
                "data": {"price": 0.25, "price_change_percentage_24h": {"usd": 12.5}}
            }})
        })
        .collect();

    Json(json!({"coins": coins, "nfts": []}))
}

async fn details(Path(id): Path<String>) -> Response {
    if id != "bitcoin" {
        return not_found();
    }

    Json(json!({
        "id": "bitcoin",
        "symbol": "btc",
        "name": "Bitcoin",
        "image": {"thumb": "t", "small": "s", "large": "https://img/btc.png"},
        "market_data": {"current_price": {"usd": 67250.5}}
    }))
    .into_response()
}

async fn ohlc(Path(id): Path<String>) -> Response {
    if id != "bitcoin" {
        return not_found();
    }

    Json(json!([
        [1_704_067_200_000i64, 42100.5, 42300.2, 41980.0, 42250.9],
        [1_704_069_000_000i64, 42250.9, 42400.0, 42200.0, 42380.1]
    ]))
    .into_response()
}

async fn spawn_upstream(upstream: Upstream) -> String {
    let app = Router::new()
        .route("/api/v3/coins/markets", get(markets))
        .route("/api/v3/coins/categories", get(categories))
        .route("/api/v3/search/trending", get(trending))
        .route("/api/v3/coins/{id}", get(details))
        .route("/api/v3/coins/{id}/ohlc", get(ohlc))
        .with_state(upstream);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Mock upstream should bind");
    let addr = listener.local_addr().expect("Mock upstream should have an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock upstream should serve");
    });

    format!("http://{}/api/v3", addr)
}

// endregion: --- Mock Upstream

/// Dashboard router wired to a fresh mock upstream.
async fn test_app(upstream: Upstream) -> Router {
    let base_url = spawn_upstream(upstream).await;
    let state = AppState::new(&Config::new(base_url, "test-key")).expect("State should build");
    create_router(state)
}

async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, String::from_utf8(body.to_vec()).unwrap())
}

// region:    --- Pages

#[tokio::test]
async fn test_health() {
    let app = test_app(Upstream::default()).await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = test_app(Upstream::default()).await;

    let (status, body) = get_page(app, "/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["code"], "NotFound");
    assert_eq!(error["error"], "No route for /nope");
}

#[tokio::test]
async fn test_home_renders_all_sections() {
    // Arrange
    let app = test_app(Upstream::default()).await;

    // Act
    let (status, html) = get_page(app, "/").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"id="coin-overview""#));
    assert!(html.contains("Bitcoin / BTC"));
    assert!(html.contains("$67,250.50"));
    assert!(html.contains("1704067200"));

    assert!(html.contains(r#"id="trending-coins""#));
    assert_eq!(html.matches(r#"data-key="trend-"#).count(), 6);
    assert!(html.contains("12.5%"));

    assert!(html.contains(r#"id="categories""#));
    assert_eq!(html.matches(r#"data-key="skeleton-"#).count(), 0);
    assert!(html.contains("Category 9"));
    assert!(!html.contains("Category 10"));
    assert_eq!(html.matches(r#"aria-label="trending down""#).count(), 10);
}

#[tokio::test]
async fn test_home_with_failing_categories_keeps_other_sections() {
    // Arrange
    let app = test_app(Upstream {
        categories_fail: true,
        ..Upstream::default()
    })
    .await;

    // Act
    let (status, html) = get_page(app, "/").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"id="categories-fallback""#));
    assert!(!html.contains("Category 0"));
    assert_eq!(html.matches(r#"data-key="skeleton-"#).count(), 10);

    assert!(html.contains(r#"id="trending-coins""#));
    assert!(html.contains(r#"id="coin-overview""#));
}

#[tokio::test]
async fn test_coins_page_offers_next_when_full() {
    let app = test_app(Upstream::default()).await;

    let (status, html) = get_page(app, "/coins?page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches(r#"data-key="coin-"#).count(), 10);
    assert!(html.contains(r#"data-key="coin-11""#));
    assert!(html.contains("<p>Coin 11 (CN)</p>"));
    assert!(html.contains("$1,234.50"));
    assert!(html.contains("+2.3%"));
    assert!(html.contains(r#"rel="prev" href="/coins?page=1""#));
    assert!(html.contains(r#"rel="next" href="/coins?page=3""#));
}

#[tokio::test]
async fn test_coins_page_without_more_has_no_next() {
    let app = test_app(Upstream {
        market_rows: 4,
        ..Upstream::default()
    })
    .await;

    let (status, html) = get_page(app, "/coins?page=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches(r#"data-key="coin-"#).count(), 4);
    assert!(!html.contains(r#"rel="next""#));
}

#[tokio::test]
async fn test_coins_page_invalid_page_is_first() {
    let app = test_app(Upstream::default()).await;

    let (status, html) = get_page(app, "/coins?page=abc").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"data-key="coin-1""#));
    assert!(!html.contains(r#"rel="prev""#));
}

#[tokio::test]
async fn test_coins_page_at_max_page_renders() {
    let app = test_app(Upstream::default()).await;

    let (status, html) = get_page(app, "/coins?page=4294967295").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"data-total-pages="4294967295""#));
}

#[tokio::test]
async fn test_coin_page_marks_selected_period() {
    let app = test_app(Upstream::default()).await;

    let (status, html) = get_page(app, "/coins/bitcoin?days=7").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Bitcoin | Coin Dashboard</title>"));
    assert!(html.contains(r#"data-days="7" class="period active">1W</a>"#));
    assert!(html.contains(r#"data-days="1" class="period">1D</a>"#));
}

#[tokio::test]
async fn test_unknown_coin_page_renders_skeleton() {
    let app = test_app(Upstream::default()).await;

    let (status, html) = get_page(app, "/coins/dogecoin-classic").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("coin-overview-fallback"));
    assert!(!html.contains("candlestick-chart"));
}

// endregion: --- Pages

// region:    --- JSON API

#[tokio::test]
async fn test_api_ohlc_returns_candles_in_seconds() {
    let app = test_app(Upstream::default()).await;

    let (status, body) = get_page(app, "/api/coins/bitcoin/ohlc?days=1").await;

    assert_eq!(status, StatusCode::OK);
    let candles: Vec<OHLC> = serde_json::from_str(&body).unwrap();
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].timestamp, 1_704_067_200);
    assert!(candles[1].is_bullish());
}

#[tokio::test]
async fn test_api_ohlc_rejects_unknown_days() {
    let app = test_app(Upstream::default()).await;

    let (status, body) = get_page(app, "/api/coins/bitcoin/ohlc?days=3").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert!(error["error"].as_str().unwrap_or_default().contains("Invalid days"));
}

#[tokio::test]
async fn test_api_ohlc_unknown_coin_is_404() {
    let app = test_app(Upstream::default()).await;

    let (status, _) = get_page(app, "/api/coins/not-a-coin/ohlc").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_coins_page_metadata() {
    let app = test_app(Upstream::default()).await;

    let (status, body) = get_page(app, "/api/coins?page=2").await;

    assert_eq!(status, StatusCode::OK);
    let page: CoinsPageResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(page.page, 2);
    assert_eq!(page.per_page, 10);
    assert!(page.has_more);
    assert_eq!(page.estimated_total_pages, 100);
    assert_eq!(page.coins.len(), 10);
    assert_eq!(page.coins[0].id, "coin-11");
}

#[tokio::test]
async fn test_api_coins_short_page_has_no_more() {
    let app = test_app(Upstream {
        market_rows: 3,
        ..Upstream::default()
    })
    .await;

    let (status, body) = get_page(app, "/api/coins?page=150").await;

    assert_eq!(status, StatusCode::OK);
    let page: CoinsPageResponse = serde_json::from_str(&body).unwrap();
    assert!(!page.has_more);
    assert_eq!(page.estimated_total_pages, 300);
    assert_eq!(page.coins.len(), 3);
}

#[tokio::test]
async fn test_api_coins_max_page_estimate_saturates() {
    let app = test_app(Upstream::default()).await;

    let (status, body) = get_page(app, "/api/coins?page=4294967295").await;

    assert_eq!(status, StatusCode::OK);
    let page: CoinsPageResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(page.page, u32::MAX);
    assert_eq!(page.estimated_total_pages, u32::MAX);
}

// endregion: --- JSON API
