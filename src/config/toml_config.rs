use crate::core::ConfigProvider;
use crate::domain::model::Credentials;
use crate::utils::error::{ParkingError, Result};
use crate::utils::validation::{
    validate_base_url, validate_non_empty_string, validate_positive_number, validate_range,
    Validate,
};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub credentials: Credentials,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_max_connections_per_host")]
    pub max_connections_per_host: usize,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_backoff_unit_ms")]
    pub backoff_unit_ms: u64,
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_connections_per_host() -> usize {
    10
}

fn default_max_retries() -> u32 {
    5
}

fn default_backoff_unit_ms() -> u64 {
    1000
}

impl ClientConfig {
    /// Config with default limits for `base_url`.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                timeout_seconds: default_timeout_seconds(),
                max_connections_per_host: default_max_connections_per_host(),
                max_retries: default_max_retries(),
                backoff_unit_ms: default_backoff_unit_ms(),
            },
            credentials,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ParkingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
        let re = PLACEHOLDER
            .get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder regex is valid"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl ConfigProvider for ClientConfig {
    fn base_url(&self) -> &str {
        &self.api.base_url
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }

    fn max_connections_per_host(&self) -> usize {
        self.api.max_connections_per_host
    }

    fn max_retries(&self) -> u32 {
        self.api.max_retries
    }

    fn backoff_unit(&self) -> Duration {
        Duration::from_millis(self.api.backoff_unit_ms)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_base_url("api.base_url", &self.api.base_url)?;
        validate_range("api.timeout_seconds", self.api.timeout_seconds, 1, 600)?;
        validate_positive_number(
            "api.max_connections_per_host",
            self.api.max_connections_per_host,
            1,
        )?;
        validate_range("api.max_retries", self.api.max_retries, 1, 20)?;
        validate_non_empty_string("credentials.username", &self.credentials.username)?;

        if self.credentials.password.is_empty() || self.credentials.password.starts_with("${") {
            return Err(ParkingError::MissingConfigError {
                field: "credentials.password".to_string(),
            });
        }

        Ok(())
    }
}
