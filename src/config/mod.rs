pub mod toml_config;

use crate::domain::ports::{ConfigProvider, LogFormat};
use crate::utils::error::{ReceiptError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_socket_addr, Validate};
use std::net::SocketAddr;
use self::toml_config::{TomlConfig, LOG_FORMATS};

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// 解析完成、可直接啟動服務的設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    pub log_format: LogFormat,
    pub log_level: Option<String>,
    pub verbose: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            log_format: LogFormat::Compact,
            log_level: None,
            verbose: false,
        }
    }
}

pub fn parse_log_format(value: &str) -> Result<LogFormat> {
    match value {
        "compact" => Ok(LogFormat::Compact),
        "json" => Ok(LogFormat::Json),
        other => Err(ReceiptError::InvalidConfigValueError {
            field: "logging.format".to_string(),
            value: other.to_string(),
            reason: format!("Unsupported format. Valid formats: {}", LOG_FORMATS.join(", ")),
        }),
    }
}

impl ServerConfig {
    /// 以 TOML 檔的值覆蓋預設值
    pub fn from_toml(file: &TomlConfig) -> Result<Self> {
        file.validate()?;

        let mut config = Self::default();
        if let Some(bind) = file.bind() {
            config.bind = bind.to_string();
        }
        if let Some(format) = file.log_format() {
            config.log_format = parse_log_format(format)?;
        }
        config.log_level = file.log_level().map(str::to_string);
        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        validate_socket_addr("server.bind", &self.bind)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        if let Some(level) = &self.log_level {
            validate_non_empty_string("logging.level", level)?;
        }
        Ok(())
    }
}

impl ConfigProvider for ServerConfig {
    fn bind_addr(&self) -> &str {
        &self.bind
    }

    fn log_format(&self) -> LogFormat {
        self.log_format
    }

    fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }

    fn verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "receipt-points")]
#[command(about = "Scores purchase receipts and serves the points over HTTP")]
pub struct CliConfig {
    /// Address to listen on (default 0.0.0.0:8080)
    #[arg(long)]
    pub bind: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level for this crate, e.g. "debug"
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入設定檔 (若有) 後套用命令列覆蓋
    pub fn resolve(&self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_toml(&TomlConfig::from_file(path)?)?,
            None => ServerConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = Some(level.clone());
        }
        if self.json_logs {
            config.log_format = LogFormat::Json;
        }
        config.verbose = self.verbose;

        config.validate()?;
        Ok(config)
    }
}
