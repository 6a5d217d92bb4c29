use crate::domain::ports::LogFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    let directive = match level {
        Some(level) => format!("receipt_points={},info", level),
        None if verbose => "receipt_points=debug,info".to_string(),
        None => "receipt_points=info".to_string(),
    };

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(), // 方便集中式日誌系統解析
        )
        .init();
}

pub fn init_logger(format: LogFormat, verbose: bool, level: Option<&str>) {
    match format {
        LogFormat::Compact => init_cli_logger(verbose, level),
        LogFormat::Json => init_json_logger(verbose, level),
    }
}
