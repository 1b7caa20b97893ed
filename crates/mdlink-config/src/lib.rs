use mdlink_engine::{Browser, IdBrackets, LinkOptions, ParseSettingError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown setting '{key}' (expected one of: {})", Config::KEYS.join(", "))]
    UnknownKey { key: String },

    #[error("Invalid value for {key}: {source}")]
    InvalidValue {
        key: String,
        source: ParseSettingError,
    },

    #[error("Invalid value '{value}' for {key}: expected 'true' or 'false'")]
    InvalidFlag { key: String, value: String },
}

/// Settings chosen by the user, persisted as TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub include_text_fragment: bool,
    pub id_brackets: IdBrackets,
    pub browser: Browser,
}

impl Default for Config {
    fn default() -> Self {
        let options = LinkOptions::default();
        Self {
            include_text_fragment: options.include_text_fragment,
            id_brackets: options.id_brackets,
            browser: options.browser,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 3] = ["include_text_fragment", "id_brackets", "browser"];

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    /// Load settings, falling back to defaults when no file exists yet
    pub fn load_or_default<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        Ok(Self::load_from_path(config_path)?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/mdlink");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn link_options(&self) -> LinkOptions {
        LinkOptions {
            include_text_fragment: self.include_text_fragment,
            id_brackets: self.id_brackets,
            browser: self.browser,
        }
    }

    /// Current value of a setting, formatted the way [`Config::set_value`] accepts it
    pub fn get_value(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "include_text_fragment" => Ok(self.include_text_fragment.to_string()),
            "id_brackets" => Ok(self.id_brackets.to_string()),
            "browser" => Ok(self.browser.to_string()),
            _ => Err(ConfigError::UnknownKey {
                key: key.to_string(),
            }),
        }
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |source| ConfigError::InvalidValue {
            key: key.to_string(),
            source,
        };

        match key {
            "include_text_fragment" => {
                self.include_text_fragment =
                    value.parse().map_err(|_| ConfigError::InvalidFlag {
                        key: key.to_string(),
                        value: value.to_string(),
                    })?;
            }
            "id_brackets" => self.id_brackets = value.parse().map_err(invalid)?,
            "browser" => self.browser = value.parse().map_err(invalid)?,
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }
}
