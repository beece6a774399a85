use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const MAX_PAGE_SIZE: usize = 1000;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Variant TSV file, optionally gzipped. Relative paths resolve against the config file.
    pub path: PathBuf,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        PaginationConfig {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct VardbConfig {
    pub store: StoreConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl PaginationConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_page_size < 1 {
            return Err(ConfigError::Invalid(
                "pagination.default_page_size must be at least 1".to_string(),
            ));
        }
        if self.max_page_size < self.default_page_size {
            return Err(ConfigError::Invalid(format!(
                "pagination.max_page_size ({}) is smaller than default_page_size ({})",
                self.max_page_size, self.default_page_size
            )));
        }
        Ok(())
    }
}

impl VardbConfig {
    ///
    /// Parse a config from a TOML string. Relative store paths are left as written.
    ///
    pub fn from_toml(toml_str: &str) -> ConfigResult<Self> {
        let config: VardbConfig = toml::from_str(toml_str)?;
        config.pagination.validate()?;
        Ok(config)
    }
}

impl TryFrom<&Path> for VardbConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> ConfigResult<Self> {
        let toml_str = read_to_string(path)?;
        let mut config = VardbConfig::from_toml(&toml_str)?;

        if config.store.path.is_relative() {
            if let Some(dir) = path.parent() {
                config.store.path = dir.join(&config.store.path);
            }
        }

        Ok(config)
    }
}
