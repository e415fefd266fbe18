//! 閘道路由到 Birdeye 上游端點的對應

use crate::domain::model::{
    HoldersQuery, MarketsQuery, NewListingQuery, PriceHistoryQuery, PriceQuery, TokenListQuery,
    TrendingQuery, UpstreamRequest,
};

/// 上游單頁最多筆數
pub const MAX_PAGE_SIZE: u32 = 100;

pub fn clamp_page_size(value: u32) -> u32 {
    value.min(MAX_PAGE_SIZE)
}

pub fn token_overview(address: &str) -> UpstreamRequest {
    UpstreamRequest::new("/defi/token_overview").param("address", address)
}

pub fn token_list(query: &TokenListQuery) -> UpstreamRequest {
    UpstreamRequest::new("/defi/tokenlist")
        .param("sort_by", &query.sort_by)
        .param("sort_type", &query.sort_type)
        .param("offset", query.offset)
        .param("limit", clamp_page_size(query.limit))
        .param("chain_id", &query.chain_id)
}

pub fn token_security(address: &str) -> UpstreamRequest {
    UpstreamRequest::new("/defi/token_security").param("address", address)
}

pub fn token_creation_info(address: &str) -> UpstreamRequest {
    UpstreamRequest::new("/defi/token_creation_info").param("address", address)
}

pub fn new_listings(query: &NewListingQuery) -> UpstreamRequest {
    UpstreamRequest::new("/defi/v2/tokens/new_listing")
        .param("count", clamp_page_size(query.count))
        .param("offset", query.offset)
        .param("chain_id", &query.chain_id)
}

pub fn markets(query: &MarketsQuery) -> UpstreamRequest {
    UpstreamRequest::new("/defi/v2/markets")
        .param("count", clamp_page_size(query.count))
        .param("offset", query.offset)
        .param("sort_by", &query.sort_by)
        .param("sort_type", &query.sort_type)
        .param("chain_id", &query.chain_id)
}

pub fn token_price(address: &str, query: &PriceQuery) -> UpstreamRequest {
    UpstreamRequest::new("/defi/price")
        .param("address", address)
        .param("chain_id", &query.chain_id)
}

pub fn price_history(address: &str, query: &PriceHistoryQuery) -> UpstreamRequest {
    UpstreamRequest::new("/defi/price_history")
        .param("address", address)
        .param("type", &query.interval)
        .param("chain_id", &query.chain_id)
}

pub fn token_holders(address: &str, query: &HoldersQuery) -> UpstreamRequest {
    UpstreamRequest::new("/defi/token_holders")
        .param("address", address)
        .param("offset", query.offset)
        .param("limit", clamp_page_size(query.limit))
        .param("chain_id", &query.chain_id)
}

pub fn trending_tokens(query: &TrendingQuery) -> UpstreamRequest {
    UpstreamRequest::new("/defi/trending_tokens")
        .param("count", clamp_page_size(query.count))
        .param("chain_id", &query.chain_id)
}
