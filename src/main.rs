use birdeye_gateway::config::cli::load_env_file;
use birdeye_gateway::utils::{logger, validation::Validate};
use birdeye_gateway::CliArgs;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日誌尚未初始化，結果稍後再記錄
    let env_file = load_env_file(None);

    let args = CliArgs::parse();
    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_logger(&config.logging);

    match env_file {
        Ok(Some(path)) => tracing::debug!("Loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(e) => tracing::warn!("⚠ {}", e),
    }

    tracing::info!("Starting birdeye-gateway v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Gateway config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if let Err(e) = birdeye_gateway::serve(config).await {
        tracing::error!("❌ Server failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        let exit_code = if e.is_config_error() { 1 } else { 3 };
        std::process::exit(exit_code);
    }

    Ok(())
}
