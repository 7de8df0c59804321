use std::{
    ffi::OsString,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{AppConfig, ConfigError};

const CONFIG_DIR_NAME: &str = "config";
const CONFIG_FILE_NAME: &str = "config.json";
const STAGING_SUFFIX: &str = ".tmp";

/// Loads and stores [`AppConfig`] as a single JSON file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Manager for `<base>/config/config.json`, creating the directory when needed.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join(CONFIG_DIR_NAME);
        fs::create_dir_all(&config_dir).map_err(ConfigError::io(&config_dir))?;
        Ok(Self::new(config_dir.join(CONFIG_FILE_NAME)))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads the preferences, or returns defaults when no file exists yet.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let path = &self.config_path;
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let data = fs::read_to_string(path).map_err(ConfigError::io(path))?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Invalid {
            path: path.clone(),
            source,
        })
    }

    /// Replaces the preferences file; readers never observe a partial write.
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let path = &self.config_path;
        let json = serde_json::to_string_pretty(config).map_err(|source| ConfigError::Invalid {
            path: path.clone(),
            source,
        })?;

        let staging = staging_path(path);
        if let Some(parent) = staging.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::io(parent))?;
        }
        let mut file = File::create(&staging).map_err(ConfigError::io(&staging))?;
        file.write_all(json.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(ConfigError::io(&staging))?;
        fs::rename(&staging, path).map_err(ConfigError::io(path))
    }
}

/// `config.json` stages as `config.json.tmp` next to it.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(CONFIG_FILE_NAME));
    name.push(STAGING_SUFFIX);
    path.with_file_name(name)
}
