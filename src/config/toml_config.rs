use crate::utils::error::{ReceiptError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_socket_addr, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env placeholder pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReceiptError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ReceiptError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RECEIPT_BIND})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn bind(&self) -> Option<&str> {
        self.server.as_ref().and_then(|s| s.bind.as_deref())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn log_format(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.format.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(bind) = self.bind() {
            validate_socket_addr("server.bind", bind)?;
        }

        if let Some(level) = self.log_level() {
            validate_non_empty_string("logging.level", level)?;
        }

        if let Some(format) = self.log_format() {
            validate_one_of("logging.format", format, &LOG_FORMATS)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
bind = "127.0.0.1:9000"

[logging]
level = "debug"
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.bind(), Some("127.0.0.1:9000"));
        assert_eq!(config.log_level(), Some("debug"));
        assert_eq!(config.log_format(), Some("json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sections_are_optional() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.bind(), None);
        assert_eq!(config.log_format(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RECEIPT_POINTS_TEST_BIND", "127.0.0.1:7070");

        let toml_content = r#"
[server]
bind = "${RECEIPT_POINTS_TEST_BIND}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.bind(), Some("127.0.0.1:7070"));

        std::env::remove_var("RECEIPT_POINTS_TEST_BIND");
    }

    #[test]
    fn test_unset_env_var_is_left_in_place() {
        let toml_content = r#"
[server]
bind = "${RECEIPT_POINTS_SURELY_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.bind(), Some("${RECEIPT_POINTS_SURELY_UNSET_VAR}"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let bad_format = TomlConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap();
        assert!(bad_format.validate().is_err());

        let bad_bind = TomlConfig::from_toml_str("[server]\nbind = \"nowhere\"\n").unwrap();
        assert!(bad_bind.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[server\nbind = 1").unwrap_err();
        assert!(matches!(err, ReceiptError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nbind = \"0.0.0.0:8081\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.bind(), Some("0.0.0.0:8081"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/definitely/not/here/receipt-points.toml").unwrap_err();
        assert!(matches!(err, ReceiptError::IoError(_)));
    }
}
