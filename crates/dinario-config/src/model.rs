use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Directory name used under the platform data directory.
pub const APP_DIR_NAME: &str = "Dinario";

/// Stores user-configurable display and storage preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "AppConfig::default_currency")]
    pub currency: String,
    #[serde(default = "AppConfig::default_locale")]
    pub locale: String,
    /// Amounts render as whole units unless enabled.
    #[serde(default)]
    pub show_cents: bool,
    #[serde(default = "AppConfig::default_log_filter")]
    pub log_filter: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the finance documents.
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            locale: Self::default_locale(),
            show_cents: false,
            log_filter: Self::default_log_filter(),
            data_dir: None,
        }
    }
}

impl AppConfig {
    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn default_log_filter() -> String {
        "dinario=info".into()
    }

    /// Directory holding the application files when nothing else is configured.
    pub fn default_app_dir() -> PathBuf {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
    }

    /// Where the finance documents live: the configured `data_dir`, or `data`
    /// under the default application directory.
    pub fn resolve_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => Self::default_app_dir().join("data"),
        }
    }
}
