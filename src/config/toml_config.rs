use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub content: ContentConfig,
    pub contact: ContactConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub name: String,
    pub base_url: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: "IE Global".to_string(),
            base_url: "https://ie-global.example".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub services_path: Option<String>,
    pub case_studies_path: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    #[default]
    Log,
    Webhook,
    Outbox,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub notifier: NotifierKind,
    pub delay_ms: u64,
    pub webhook_url: Option<String>,
    pub timeout_seconds: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub outbox_path: Option<String>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            notifier: NotifierKind::Log,
            delay_ms: 1000,
            webhook_url: None,
            timeout_seconds: 10,
            retry_attempts: 0,
            retry_delay_ms: 500,
            outbox_path: None,
        }
    }
}

impl ContactConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${WEBHOOK_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("site.name", &self.site.name)?;
        validation::validate_url("site.base_url", &self.site.base_url)?;

        let content_files: Vec<&str> = [
            self.content.services_path.as_deref(),
            self.content.case_studies_path.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();
        for path in &content_files {
            validation::validate_path("content", path)?;
        }
        validation::validate_file_extensions("content", &content_files, &["toml"])?;

        match self.contact.notifier {
            NotifierKind::Log => {}
            NotifierKind::Webhook => {
                let url =
                    validation::validate_required_field("contact.webhook_url", &self.contact.webhook_url)?;
                validation::validate_url("contact.webhook_url", url)?;
                validation::validate_range("contact.timeout_seconds", self.contact.timeout_seconds, 1, 300)?;
                validation::validate_range("contact.retry_attempts", self.contact.retry_attempts, 0, 10)?;
            }
            NotifierKind::Outbox => {
                let path =
                    validation::validate_required_field("contact.outbox_path", &self.contact.outbox_path)?;
                validation::validate_path("contact.outbox_path", path)?;
            }
        }

        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_range("server.port", self.server.port, 1, u16::MAX)?;

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(SiteError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: format!("Valid levels: {}", valid_levels.join(", ")),
            });
        }

        Ok(())
    }

    pub fn services_path(&self) -> Option<PathBuf> {
        self.content.services_path.as_ref().map(PathBuf::from)
    }

    pub fn case_studies_path(&self) -> Option<PathBuf> {
        self.content.case_studies_path.as_ref().map(PathBuf::from)
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SiteConfig::from_toml_str("").unwrap();

        assert_eq!(config.contact.notifier, NotifierKind::Log);
        assert_eq!(config.contact.delay(), Duration::from_millis(1000));
        assert_eq!(config.server.bind_address(), "0.0.0.0:3000");
        assert!(config.services_path().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_webhook_config() {
        let toml_content = r#"
[site]
name = "IE Global"
base_url = "https://ie-global.example"

[contact]
notifier = "webhook"
webhook_url = "https://hooks.example.com/contact"
timeout_seconds = 5
retry_attempts = 2

[server]
port = 8080
"#;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.contact.notifier, NotifierKind::Webhook);
        assert_eq!(config.contact.retry_attempts, 2);
        assert_eq!(config.contact.timeout(), Duration::from_secs(5));
        assert_eq!(config.server.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("AGENCY_SITE_TEST_HOOK", "https://hooks.test.example");

        let toml_content = r#"
[contact]
notifier = "webhook"
webhook_url = "${AGENCY_SITE_TEST_HOOK}/contact"
"#;

        let config = SiteConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.contact.webhook_url.as_deref(),
            Some("https://hooks.test.example/contact")
        );

        std::env::remove_var("AGENCY_SITE_TEST_HOOK");
    }

    #[test]
    fn test_webhook_without_url_is_invalid() {
        let config = SiteConfig::from_toml_str("[contact]\nnotifier = \"webhook\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SiteError::MissingConfigError { .. }));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = SiteConfig::from_toml_str("[server]\nport = 0\n").unwrap();
        assert!(config.validate().is_err());

        let config = SiteConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(config.validate().is_err());

        let config =
            SiteConfig::from_toml_str("[content]\nservices_path = \"services.json\"\n").unwrap();
        assert!(config.validate().is_err());

        assert!(SiteConfig::from_toml_str("[contact]\nnotifier = \"pigeon\"\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[contact]
notifier = "outbox"
outbox_path = "./data/contacts.csv"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = SiteConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.contact.notifier, NotifierKind::Outbox);
        assert!(config.validate().is_ok());
    }
}
