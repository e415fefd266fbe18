use crate::config::UpstreamConfig;
use crate::domain::model::UpstreamRequest;
use crate::domain::ports::MarketDataSource;
use crate::utils::error::{preview, GatewayError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Birdeye 公開 API 的 HTTP 客戶端
pub struct BirdeyeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl BirdeyeClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| GatewayError::MissingConfigError {
                field: "upstream.api_key".to_string(),
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("birdeye-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// 將非 200 的上游回應轉為閘道錯誤
pub fn classify_failure(status: StatusCode, body: String) -> GatewayError {
    match status {
        StatusCode::BAD_REQUEST => {
            tracing::error!("❌ Bad Request: {}", body);
            GatewayError::UpstreamBadRequest { body }
        }
        StatusCode::UNAUTHORIZED => {
            tracing::error!("❌ Unauthorized: API key is invalid or missing");
            GatewayError::UpstreamUnauthorized
        }
        StatusCode::TOO_MANY_REQUESTS => {
            tracing::error!("❌ Too Many Requests: {}", body);
            GatewayError::UpstreamRateLimited { body }
        }
        other => {
            tracing::error!("⚠ Unexpected Error ({}): {}", other.as_u16(), preview(&body));
            GatewayError::UpstreamUnexpected {
                status: other.as_u16(),
                body,
            }
        }
    }
}

#[async_trait]
impl MarketDataSource for BirdeyeClient {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<serde_json::Value> {
        let url = self.endpoint_url(&request.path);

        tracing::info!("🔍 Sending request to: {}", url);
        tracing::info!("🔍 With params: {:?}", request.query);

        let response = self
            .client
            .get(&url)
            .query(&request.query)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("❌ Request error: {}", e);
                GatewayError::ConnectionError(e)
            })?;

        let status = response.status();
        tracing::info!("✅ Response status: {}", status.as_u16());

        let body = response.text().await.map_err(|e| {
            tracing::error!("❌ Failed to read response body: {}", e);
            GatewayError::ConnectionError(e)
        })?;

        if status != StatusCode::OK {
            return Err(classify_failure(status, body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("❌ Invalid JSON from upstream: {}", e);
            GatewayError::InvalidUpstreamBody(e)
        })
    }
}
