use serde::{Deserialize, Serialize};

pub const DEFAULT_CHAIN_ID: &str = "solana";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SORT_TYPE: &str = "d";
pub const DEFAULT_TOKEN_SORT_BY: &str = "mc";
pub const DEFAULT_MARKET_SORT_BY: &str = "v24hUSD";
pub const DEFAULT_HISTORY_INTERVAL: &str = "1D";

fn default_chain_id() -> String {
    DEFAULT_CHAIN_ID.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_sort_type() -> String {
    DEFAULT_SORT_TYPE.to_string()
}

fn default_token_sort_by() -> String {
    DEFAULT_TOKEN_SORT_BY.to_string()
}

fn default_market_sort_by() -> String {
    DEFAULT_MARKET_SORT_BY.to_string()
}

fn default_history_interval() -> String {
    DEFAULT_HISTORY_INTERVAL.to_string()
}

/// 轉發到上游的請求：路徑與有序的查詢參數
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl UpstreamRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
}

impl ServiceInfo {
    pub fn current() -> Self {
        Self {
            message: "✅ Birdeye API is running!".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenListQuery {
    #[serde(default = "default_token_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_type")]
    pub sort_type: String,
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "default_page_size")]
    pub limit: u32,
    #[serde(default = "default_chain_id")]
    pub chain_id: String,
}

impl Default for TokenListQuery {
    fn default() -> Self {
        Self {
            sort_by: default_token_sort_by(),
            sort_type: default_sort_type(),
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
            chain_id: default_chain_id(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewListingQuery {
    #[serde(default = "default_page_size")]
    pub count: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "default_chain_id")]
    pub chain_id: String,
}

impl Default for NewListingQuery {
    fn default() -> Self {
        Self {
            count: DEFAULT_PAGE_SIZE,
            offset: 0,
            chain_id: default_chain_id(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketsQuery {
    #[serde(default = "default_page_size")]
    pub count: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "default_market_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_type")]
    pub sort_type: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: String,
}

impl Default for MarketsQuery {
    fn default() -> Self {
        Self {
            count: DEFAULT_PAGE_SIZE,
            offset: 0,
            sort_by: default_market_sort_by(),
            sort_type: default_sort_type(),
            chain_id: default_chain_id(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceQuery {
    #[serde(default = "default_chain_id")]
    pub chain_id: String,
}

impl Default for PriceQuery {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
        }
    }
}

/// `type` 為時間區間：1H, 1D, 1W, 1M, 1Y
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceHistoryQuery {
    #[serde(rename = "type", default = "default_history_interval")]
    pub interval: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: String,
}

impl Default for PriceHistoryQuery {
    fn default() -> Self {
        Self {
            interval: default_history_interval(),
            chain_id: default_chain_id(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HoldersQuery {
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "default_page_size")]
    pub limit: u32,
    #[serde(default = "default_chain_id")]
    pub chain_id: String,
}

impl Default for HoldersQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
            chain_id: default_chain_id(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendingQuery {
    #[serde(default = "default_page_size")]
    pub count: u32,
    #[serde(default = "default_chain_id")]
    pub chain_id: String,
}

impl Default for TrendingQuery {
    fn default() -> Self {
        Self {
            count: DEFAULT_PAGE_SIZE,
            chain_id: default_chain_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_request_keeps_param_order() {
        let request = UpstreamRequest::new("/defi/price")
            .param("address", "So111")
            .param("chain_id", "solana");

        assert_eq!(request.path, "/defi/price");
        assert_eq!(request.query[0].0, "address");
        assert_eq!(request.query[1].0, "chain_id");
        assert_eq!(request.get_param("chain_id"), Some("solana"));
        assert_eq!(request.get_param("limit"), None);
    }

    #[test]
    fn test_query_defaults_from_empty_object() {
        let query: TokenListQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(query, TokenListQuery::default());

        let query: MarketsQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(query.sort_by, "v24hUSD");
        assert_eq!(query.count, 10);
    }

    #[test]
    fn test_history_interval_uses_type_key() {
        let query: PriceHistoryQuery =
            serde_json::from_value(serde_json::json!({"type": "1W"})).unwrap();
        assert_eq!(query.interval, "1W");
        assert_eq!(query.chain_id, "solana");
    }

    #[test]
    fn test_service_info_version() {
        let info = ServiceInfo::current();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.message.contains("running"));
    }
}
