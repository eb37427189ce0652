use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_FORM_CLOSE_DELAY_MS, DEFAULT_TOKEN_STORAGE_KEY,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub token_storage_key: String,
    pub form_close_delay_ms: u32,
    pub environment: String,
    pub enable_logging: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_storage_key: DEFAULT_TOKEN_STORAGE_KEY.to_string(),
            form_close_delay_ms: DEFAULT_FORM_CLOSE_DELAY_MS,
            environment: "development".to_string(),
            enable_logging: true,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads configuration baked in at compile time (see build.rs)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| match key {
            "API_BASE_URL" => option_env!("API_BASE_URL"),
            "TOKEN_STORAGE_KEY" => option_env!("TOKEN_STORAGE_KEY"),
            "FORM_CLOSE_DELAY_MS" => option_env!("FORM_CLOSE_DELAY_MS"),
            "ENVIRONMENT" => option_env!("ENVIRONMENT"),
            "ENABLE_LOGGING" => option_env!("ENABLE_LOGGING"),
            "LOG_LEVEL" => option_env!("LOG_LEVEL"),
            _ => None,
        })
    }

    /// Builds a config from any key lookup; missing or unparsable values fall back to defaults.
    pub fn from_lookup<'a, F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let defaults = Self::default();
        Self {
            api_base_url: lookup("API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_base_url),
            token_storage_key: lookup("TOKEN_STORAGE_KEY")
                .filter(|key| !key.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.token_storage_key),
            form_close_delay_ms: lookup("FORM_CLOSE_DELAY_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.form_close_delay_ms),
            environment: lookup("ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: lookup("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            log_level: lookup("LOG_LEVEL")
                .map(str::to_string)
                .unwrap_or(defaults.log_level),
        }
    }

    /// Effective log level. With logging disabled only warnings and errors get through.
    pub fn log_level(&self) -> log::Level {
        if !self.enable_logging {
            return log::Level::Warn;
        }
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
