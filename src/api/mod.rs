pub mod server;

use crate::core::endpoints;
use crate::domain::model::{
    HoldersQuery, MarketsQuery, NewListingQuery, PriceHistoryQuery, PriceQuery, ServiceInfo,
    TokenListQuery, TrendingQuery, UpstreamRequest,
};
use crate::domain::ports::MarketDataSource;
use crate::utils::error::{GatewayError, Result};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn MarketDataSource>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self {
            source,
            started_at: Instant::now(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/token/overview/{address}", get(token_overview))
        .route("/token/list", get(token_list))
        .route("/token/security/{address}", get(token_security))
        .route("/token/creation/{address}", get(token_creation_info))
        .route("/tokens/new", get(new_listings))
        .route("/markets", get(markets))
        .route("/token/price/{address}", get(token_price))
        .route("/token/history/{address}", get(price_history))
        .route("/token/holders/{address}", get(token_holders))
        .route("/tokens/trending", get(trending_tokens))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

async fn relay(state: &AppState, request: UpstreamRequest) -> Result<Json<Value>> {
    let body = state.source.fetch(&request).await?;
    Ok(Json(body))
}

async fn not_found() -> GatewayError {
    GatewayError::NotFound
}

async fn method_not_allowed() -> GatewayError {
    GatewayError::MethodNotAllowed
}

async fn home() -> Json<ServiceInfo> {
    Json(ServiceInfo::current())
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "uptime_seconds": state.started_at.elapsed().as_secs(),
    }))
}

async fn token_overview(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Value>> {
    relay(&state, endpoints::token_overview(&address)).await
}

async fn token_list(
    State(state): State<AppState>,
    query: std::result::Result<Query<TokenListQuery>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(query) = query?;
    relay(&state, endpoints::token_list(&query)).await
}

async fn token_security(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Value>> {
    relay(&state, endpoints::token_security(&address)).await
}

async fn token_creation_info(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Value>> {
    relay(&state, endpoints::token_creation_info(&address)).await
}

async fn new_listings(
    State(state): State<AppState>,
    query: std::result::Result<Query<NewListingQuery>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(query) = query?;
    relay(&state, endpoints::new_listings(&query)).await
}

async fn markets(
    State(state): State<AppState>,
    query: std::result::Result<Query<MarketsQuery>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(query) = query?;
    relay(&state, endpoints::markets(&query)).await
}

async fn token_price(
    State(state): State<AppState>,
    Path(address): Path<String>,
    query: std::result::Result<Query<PriceQuery>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(query) = query?;
    relay(&state, endpoints::token_price(&address, &query)).await
}

async fn price_history(
    State(state): State<AppState>,
    Path(address): Path<String>,
    query: std::result::Result<Query<PriceHistoryQuery>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(query) = query?;
    relay(&state, endpoints::price_history(&address, &query)).await
}

async fn token_holders(
    State(state): State<AppState>,
    Path(address): Path<String>,
    query: std::result::Result<Query<HoldersQuery>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(query) = query?;
    relay(&state, endpoints::token_holders(&address, &query)).await
}

async fn trending_tokens(
    State(state): State<AppState>,
    query: std::result::Result<Query<TrendingQuery>, QueryRejection>,
) -> Result<Json<Value>> {
    let Query(query) = query?;
    relay(&state, endpoints::trending_tokens(&query)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// 記錄收到的上游請求並回傳固定內容
    #[derive(Default)]
    struct RecordingSource {
        requests: Mutex<Vec<UpstreamRequest>>,
        fail_with_unauthorized: bool,
    }

    impl RecordingSource {
        fn last(&self) -> UpstreamRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl MarketDataSource for RecordingSource {
        async fn fetch(&self, request: &UpstreamRequest) -> Result<Value> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail_with_unauthorized {
                return Err(GatewayError::UpstreamUnauthorized);
            }
            Ok(serde_json::json!({"success": true, "path": request.path}))
        }
    }

    async fn send(
        source: Arc<RecordingSource>,
        method: Method,
        uri: &str,
    ) -> (StatusCode, Option<String>, Value) {
        let app = router(AppState::new(source));
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, serde_json::from_slice(&bytes).unwrap())
    }

    async fn call(source: Arc<RecordingSource>, uri: &str) -> (StatusCode, Value) {
        let (status, _, body) = send(source, Method::GET, uri).await;
        (status, body)
    }

    #[tokio::test]
    async fn test_home() {
        let (status, body) = call(Arc::new(RecordingSource::default()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "✅ Birdeye API is running!");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(Arc::new(RecordingSource::default()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["uptime_seconds"].is_u64());
    }

    #[tokio::test]
    async fn test_token_overview_relays_body() {
        let source = Arc::new(RecordingSource::default());
        let (status, body) = call(source.clone(), "/token/overview/So111").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["path"], "/defi/token_overview");
        assert_eq!(source.last(), endpoints::token_overview("So111"));
    }

    #[tokio::test]
    async fn test_token_list_uses_query_and_clamps() {
        let source = Arc::new(RecordingSource::default());
        let (status, _) = call(
            source.clone(),
            "/token/list?sort_by=v24hUSD&sort_type=a&offset=50&limit=1000",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let request = source.last();
        assert_eq!(request.path, "/defi/tokenlist");
        assert_eq!(request.get_param("sort_by"), Some("v24hUSD"));
        assert_eq!(request.get_param("sort_type"), Some("a"));
        assert_eq!(request.get_param("offset"), Some("50"));
        assert_eq!(request.get_param("limit"), Some("100"));
        assert_eq!(request.get_param("chain_id"), Some("solana"));
    }

    #[tokio::test]
    async fn test_history_type_parameter() {
        let source = Arc::new(RecordingSource::default());
        let (status, _) = call(source.clone(), "/token/history/So111?type=1W").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(source.last().get_param("type"), Some("1W"));
    }

    #[tokio::test]
    async fn test_negative_limit_is_unprocessable() {
        let source = Arc::new(RecordingSource::default());
        let (status, body) = call(source.clone(), "/token/holders/So111?limit=-5").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("Invalid request parameters"));
        assert!(source.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_numeric_count_is_unprocessable() {
        let source = Arc::new(RecordingSource::default());
        let (status, _) = call(source, "/tokens/trending?count=many").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_upstream_error_is_rendered_as_detail() {
        let source = Arc::new(RecordingSource {
            fail_with_unauthorized: true,
            ..RecordingSource::default()
        });
        let (status, body) = call(source, "/markets").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body["detail"],
            "❌ Unauthorized: API key is invalid or missing"
        );
    }

    #[tokio::test]
    async fn test_unknown_path_is_json_not_found() {
        for uri in ["/nope", "/token/overview/"] {
            let source = Arc::new(RecordingSource::default());
            let (status, content_type, body) = send(source.clone(), Method::GET, uri).await;

            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(content_type.as_deref(), Some("application/json"));
            assert_eq!(body["detail"], "Not Found");
            assert!(source.requests.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_wrong_method_is_json_method_not_allowed() {
        let source = Arc::new(RecordingSource::default());
        let (status, content_type, body) = send(source.clone(), Method::POST, "/markets").await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body["detail"], "Method Not Allowed");
        assert!(source.requests.lock().unwrap().is_empty());
    }
}
