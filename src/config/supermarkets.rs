use crate::core::firestore;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_PROJECT_ID: &str = "propertymap-ccd4c";
pub const DEFAULT_DOCUMENT_PATH: &str = "map_layers/Supermarkets";
pub const DEFAULT_ARRAY_FIELD: &str = "all_supermarkets";
pub const DEFAULT_OUTPUT_PATH: &str = "supermarkets.geojson";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("geojson-etl/", env!("CARGO_PKG_VERSION"));

/// 超市圖層匯出設定；所有欄位皆有預設值，不帶參數即可執行
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupermarketsConfig {
    pub source: SourceConfig,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub project_id: String,
    /// collection/document
    pub document_path: String,
    /// Document field expected to hold the array of locations.
    pub array_field: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            project_id: DEFAULT_PROJECT_ID.to_string(),
            document_path: DEFAULT_DOCUMENT_PATH.to_string(),
            array_field: DEFAULT_ARRAY_FIELD.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: String,
    pub pretty: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            pretty: true,
        }
    }
}

impl SupermarketsConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，缺少的欄位使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FIRESTORE_PROJECT})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn document_url(&self) -> String {
        firestore::document_url(
            &self.source.base_url,
            &self.source.project_id,
            &self.source.document_path,
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds)
    }

    pub fn output_path(&self) -> &str {
        &self.load.output_path
    }
}

impl Validate for SupermarketsConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.base_url", &self.source.base_url)?;
        validation::validate_non_empty_string("source.project_id", &self.source.project_id)?;
        validation::validate_document_path("source.document_path", &self.source.document_path)?;
        validation::validate_non_empty_string("source.array_field", &self.source.array_field)?;
        validation::validate_range("source.timeout_seconds", self.source.timeout_seconds, 1, 600)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        Ok(())
    }
}
