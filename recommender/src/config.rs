use std::env;

use crate::error::{RecommenderError, Result};

const DEFAULT_ENV: &str = "dev";
const DEFAULT_REGION: &str = "us-east-1";

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Read a variable, treating empty or whitespace-only values as unset.
fn env_non_empty(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

/// Normalize a deployment name: trimmed, lowercase, `dev` when blank.
pub fn normalize_env_name(raw: Option<&str>) -> String {
    raw.map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_ENV.to_string())
}

/// The deployment name becomes a route segment, so only `[a-z0-9_-]` is
/// accepted.
pub fn validate_env_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');

    if valid {
        Ok(())
    } else {
        Err(RecommenderError::Config(format!(
            "APP_ENV '{name}' is not a valid route segment (allowed: a-z, 0-9, '_', '-')"
        )))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Deployment name. Doubles as the route prefix (`/{env}/recommendation`).
    pub env: String,
    /// Key expected in the `X-API-Key` header. Requests are refused while unset.
    pub api_key: Option<String>,
    pub max_body_bytes: usize,
}

/// LLM backend configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub model_id: Option<String>,
    pub region: String,
    /// Overrides the runtime endpoint derived from `region`.
    pub endpoint: Option<String>,
    /// Bearer key for the managed runtime.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Read separately so logging can be set up before the rest of the
    /// configuration, whose parsing may itself log warnings.
    pub fn from_env() -> Self {
        let format = match env::var("LOG_FORMAT") {
            Ok(val) if val.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        Self { format }
    }
}

impl ServerConfig {
    pub fn is_local(&self) -> bool {
        self.env == "local"
    }
}

impl LlmConfig {
    pub fn runtime_base_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model_id: None,
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
            api_key: None,
            timeout_secs: 60,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("PORT", 3000),
                env: normalize_env_name(env::var("APP_ENV").ok().as_deref()),
                api_key: env_non_empty("API_KEY"),
                max_body_bytes: parse_env_or("MAX_BODY_BYTES", 1024 * 1024),
            },
            llm: LlmConfig {
                model_id: env_non_empty("BEDROCK_MODEL_ID"),
                region: env_non_empty("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
                endpoint: env_non_empty("AWS_ENDPOINT"),
                api_key: env_non_empty("LLM_API_KEY"),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 60),
            },
            logging: LoggingConfig::from_env(),
        }
    }
}

impl Config {
    /// Read the environment and reject values the router cannot be built
    /// from.
    pub fn from_env() -> Result<Self> {
        let config = Self::default();
        validate_env_name(&config.server.env)?;
        Ok(config)
    }
}
