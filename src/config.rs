//! Startup configuration.
//!
//! Every value is read from the environment once in [`Config::from_env`] and parsed by a pure
//! `*_from_env_value` helper, so parsing rules are testable without touching process state.

use anyhow::{Context, bail};
use api_shared::ApiKeys;
use std::time::Duration;
use tracing_subscriber::filter::LevelFilter;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ODS_FHIR_API_SERVER_URL: &str = "https://uat.directory.spineservices.nhs.uk/STU3";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "http://localhost:*";
pub const DEFAULT_APP_ENV: &str = "production";

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub api_keys: ApiKeys,
    pub ods_fhir_api_server_url: String,
    pub request_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
    pub app_env: String,
    pub log_level: LevelFilter,
}

impl Config {
    /// # Errors
    ///
    /// Returns an error naming the variable if any value is present but invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let var = |name: &str| std::env::var(name).ok();

        Ok(Self {
            port: port_from_env_value(var("PORT"))?,
            api_keys: api_keys_from_env_values(var("API_KEY"), var("API_KEYS_ALLOWED")),
            ods_fhir_api_server_url: non_empty(var("ODS_FHIR_API_SERVER_URL"))
                .unwrap_or_else(|| DEFAULT_ODS_FHIR_API_SERVER_URL.into()),
            request_timeout: request_timeout_from_env_value(var("REQUEST_TIMEOUT_SECS"))?,
            cors_allowed_origins: cors_origins_from_env_value(var("CORS_ALLOWED_ORIGINS")),
            app_env: non_empty(var("APP_ENV")).unwrap_or_else(|| DEFAULT_APP_ENV.into()),
            log_level: log_level_from_env_value(var("LOG_LEVEL"))?,
        })
    }

    /// Local development gets human-readable logs.
    pub fn is_local(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("local")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn port_from_env_value(value: Option<String>) -> anyhow::Result<u16> {
    non_empty(value)
        .map(|v| v.parse::<u16>().with_context(|| format!("PORT must be a port number, got '{v}'")))
        .transpose()
        .map(|port| port.unwrap_or(DEFAULT_PORT))
}

/// The primary key plus any comma-separated extras; blanks are ignored.
pub fn api_keys_from_env_values(primary: Option<String>, allowed: Option<String>) -> ApiKeys {
    let extras = allowed.unwrap_or_default();
    ApiKeys::new(
        primary
            .into_iter()
            .chain(extras.split(',').map(str::to_string)),
    )
}

pub fn request_timeout_from_env_value(value: Option<String>) -> anyhow::Result<Duration> {
    let Some(value) = non_empty(value) else {
        return Ok(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
    };

    let secs = value
        .parse::<u64>()
        .with_context(|| format!("REQUEST_TIMEOUT_SECS must be a whole number, got '{value}'"))?;
    if secs == 0 {
        bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
    }

    Ok(Duration::from_secs(secs))
}

pub fn cors_origins_from_env_value(value: Option<String>) -> Vec<String> {
    let value = non_empty(value).unwrap_or_else(|| DEFAULT_CORS_ALLOWED_ORIGINS.into());
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// If `value` is `None` or empty/whitespace, returns `INFO`.
pub fn log_level_from_env_value(value: Option<String>) -> anyhow::Result<LevelFilter> {
    let Some(value) = non_empty(value) else {
        return Ok(LevelFilter::INFO);
    };

    match value.to_ascii_uppercase().as_str() {
        "DEBUG" => Ok(LevelFilter::DEBUG),
        "INFO" => Ok(LevelFilter::INFO),
        "WARN" => Ok(LevelFilter::WARN),
        "ERROR" => Ok(LevelFilter::ERROR),
        _ => bail!("LOG_LEVEL must be one of DEBUG, INFO, WARN, ERROR, got '{value}'"),
    }
}
