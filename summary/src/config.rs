use crate::error::ConfigError;
use crate::models::Lang;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

pub const API_URL_VAR: &str = "SUMMARY_API_URL";
pub const TIMEOUT_VAR: &str = "SUMMARY_API_TIMEOUT_SECS";
pub const LANG_VAR: &str = "SUMMARY_LANG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL without trailing slash; requests go to `{api_url}/api/summary`.
    pub api_url: String,
    pub timeout: Duration,
    pub lang: Lang,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            lang: Lang::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any variable source. Unset or blank variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(api_url) = get(API_URL_VAR) {
            config = config.with_api_url(&api_url);
        }

        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                name: TIMEOUT_VAR,
                value: raw.clone(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = get(LANG_VAR) {
            config.lang = raw.parse()?;
        }

        log::debug!(
            "Loaded config: api_url={}, timeout={:?}, lang={}",
            config.api_url,
            config.timeout,
            config.lang
        );
        Ok(config)
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn summary_endpoint(&self) -> String {
        format!("{}/api/summary", self.api_url)
    }
}
