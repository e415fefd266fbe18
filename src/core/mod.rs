pub mod client;
pub mod endpoints;

pub use crate::domain::model::UpstreamRequest;
pub use crate::domain::ports::MarketDataSource;
pub use crate::utils::error::Result;
