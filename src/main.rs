use anyhow::Context;
use clap::Parser;
use receipt_points::app;
use receipt_points::domain::ports::ConfigProvider;
use receipt_points::utils::logger;
use receipt_points::utils::validation::validate_socket_addr;
use receipt_points::{CliConfig, ReceiptProcessor};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 解析並驗證配置
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(config.log_format(), config.verbose(), config.log_level());

    tracing::info!("Starting receipt-points server");
    tracing::debug!("Resolved config: {:?}", config);

    let addr = validate_socket_addr("server.bind", config.bind_addr())
        .context("bind address should have been validated")?;
    let processor = Arc::new(ReceiptProcessor::in_memory());

    app::serve(processor, addr, app::shutdown_signal())
        .await
        .with_context(|| format!("server on {} failed", addr))?;

    Ok(())
}
