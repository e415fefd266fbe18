pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use api::{router, server::serve, AppState};
pub use config::GatewayConfig;
pub use core::client::BirdeyeClient;
pub use domain::ports::MarketDataSource;
pub use utils::error::{GatewayError, Result};
