use crate::domain::model::UpstreamRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 市場數據來源，路由層只依賴此介面
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<serde_json::Value>;
}
