use crate::domain::model::Thresholds;
use crate::utils::error::{FuelError, Result};
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = "./fuel-data";
const DEFAULT_GEOCODER_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_USER_AGENT: &str = concat!("fuel-compare/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub storage: Option<StorageConfig>,
    pub thresholds: Option<ThresholdConfig>,
    pub geocoder: Option<GeocoderConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub default_percent: Option<f64>,
    pub strict_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FuelError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FuelError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FUEL_DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FuelError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(storage) = &self.storage {
            validate_path("storage.data_dir", &storage.data_dir)?;
        }

        let thresholds = self.thresholds();
        validate_range(
            "thresholds.default_percent",
            thresholds.default_percent,
            f64::MIN_POSITIVE,
            1000.0,
        )?;
        validate_range(
            "thresholds.strict_percent",
            thresholds.strict_percent,
            f64::MIN_POSITIVE,
            1000.0,
        )?;

        if let Some(geocoder) = &self.geocoder {
            validate_url("geocoder.endpoint", &geocoder.endpoint)?;
            if geocoder.timeout_seconds == Some(0) {
                return Err(FuelError::InvalidConfigValueError {
                    field: "geocoder.timeout_seconds".to_string(),
                    value: "0".to_string(),
                    reason: "Timeout must be at least 1 second".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn data_dir(&self) -> &str {
        self.storage
            .as_ref()
            .map(|s| s.data_dir.as_str())
            .unwrap_or(DEFAULT_DATA_DIR)
    }

    pub fn thresholds(&self) -> Thresholds {
        let defaults = Thresholds::default();
        match &self.thresholds {
            Some(t) => Thresholds {
                default_percent: t.default_percent.unwrap_or(defaults.default_percent),
                strict_percent: t.strict_percent.unwrap_or(defaults.strict_percent),
            },
            None => defaults,
        }
    }

    /// 沒設定 endpoint 就不做反向地理編碼
    pub fn geocoder_endpoint(&self) -> Option<&str> {
        self.geocoder.as_ref().map(|g| g.endpoint.as_str())
    }

    pub fn geocoder_timeout(&self) -> Duration {
        let seconds = self
            .geocoder
            .as_ref()
            .and_then(|g| g.timeout_seconds)
            .unwrap_or(DEFAULT_GEOCODER_TIMEOUT_SECONDS);
        Duration::from_secs(seconds)
    }

    pub fn geocoder_user_agent(&self) -> &str {
        self.geocoder
            .as_ref()
            .and_then(|g| g.user_agent.as_deref())
            .unwrap_or(DEFAULT_USER_AGENT)
    }
}

impl Validate for TomlConfig {
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
    fn test_parse_full_config() {
        let toml_content = r#"
[storage]
data_dir = "/tmp/fuel"

[thresholds]
default_percent = 70
strict_percent = 73.5

[geocoder]
endpoint = "https://geo.example.com/reverse"
timeout_seconds = 3
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data_dir(), "/tmp/fuel");
        assert_eq!(config.thresholds().strict_percent, 73.5);
        assert_eq!(config.thresholds().default_percent, 70.0);
        assert_eq!(config.geocoder_endpoint(), Some("https://geo.example.com/reverse"));
        assert_eq!(config.geocoder_timeout(), Duration::from_secs(3));
        assert!(config.geocoder_user_agent().starts_with("fuel-compare/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.data_dir(), DEFAULT_DATA_DIR);
        assert_eq!(config.thresholds(), Thresholds::default());
        assert_eq!(config.geocoder_endpoint(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FUEL_COMPARE_TEST_DIR", "/var/lib/fuel");

        let config = TomlConfig::from_toml_str(
            r#"
[storage]
data_dir = "${FUEL_COMPARE_TEST_DIR}"
"#,
        )
        .unwrap();
        assert_eq!(config.data_dir(), "/var/lib/fuel");

        std::env::remove_var("FUEL_COMPARE_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let bad_endpoint = TomlConfig::from_toml_str(
            r#"
[geocoder]
endpoint = "not-a-url"
"#,
        )
        .unwrap();
        assert!(bad_endpoint.validate().is_err());

        let bad_threshold = TomlConfig::from_toml_str(
            r#"
[thresholds]
strict_percent = -5
"#,
        )
        .unwrap();
        assert!(bad_threshold.validate().is_err());
    }

    #[test]
    fn test_nan_threshold_fails_validation() {
        let config = TomlConfig::from_toml_str("[thresholds]\ndefault_percent = nan\n").unwrap();
        assert!(config.thresholds().default_percent.is_nan());
        assert!(matches!(
            config.validate(),
            Err(FuelError::InvalidConfigValueError { ref field, .. })
                if field == "thresholds.default_percent"
        ));

        let config = TomlConfig::from_toml_str("[thresholds]\nstrict_percent = inf\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\ndata_dir = \"./from-file\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.data_dir(), "./from-file");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[storage\n").unwrap_err();
        assert!(matches!(err, FuelError::ConfigValidationError { .. }));
    }
}
