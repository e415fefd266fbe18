use crate::config::GatewayConfig;
use crate::utils::error::{GatewayError, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

/// 載入 .env；檔案不存在時回傳 Ok(None)，格式錯誤時回傳錯誤
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(GatewayError::ConfigError {
            message: format!("Failed to load .env file: {}", e),
        }),
    }
}

/// 命令列參數，優先於設定檔
#[derive(Debug, Clone, Parser)]
#[command(name = "birdeye-gateway")]
#[command(version, about = "HTTP gateway for retrieving Solana DeFi data from Birdeye")]
pub struct CliArgs {
    #[arg(long, env = "BIRDEYE_GATEWAY_CONFIG", help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "BIRDEYE_GATEWAY_HOST")]
    pub host: Option<String>,

    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    #[arg(long, env = "BIRDEYE_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(long, env = "BIRDEYE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, help = "Upstream request timeout in seconds")]
    pub timeout_secs: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliArgs {
    pub fn into_config(self) -> Result<GatewayConfig> {
        let mut config = match &self.config {
            Some(path) => GatewayConfig::from_file(path)?,
            None => GatewayConfig::default(),
        };

        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(base_url) = self.base_url {
            config.upstream.base_url = base_url;
        }
        if let Some(api_key) = self.api_key {
            config.upstream.api_key = Some(api_key);
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.upstream.timeout_secs = timeout_secs;
        }
        config.logging.verbose |= self.verbose;
        config.logging.json |= self.json_logs;

        Ok(config)
    }
}
