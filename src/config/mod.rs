//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `JANLENS_*` environment
//! variables (`OPENAI_API_KEY` keeps its conventional name).

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

/// Default OpenAI chat-completions endpoint.
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default JANCODE LOOKUP endpoint.
pub const DEFAULT_LOOKUP_URL: &str = "https://api.jancodelookup.com/";

/// Candidate-resolution limits injected into the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Max search keywords taken from the vision model. Default: `5`.
    pub max_keywords: usize,

    /// Max lookup results kept per keyword. Default: `3`.
    pub max_results_per_keyword: usize,

    /// Backfill target: the response carries at least this many candidates
    /// when enough distinct codes exist. Default: `3`.
    pub min_candidates: usize,

    /// Hard cap on the candidate list. Default: `5`.
    pub max_candidates: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_keywords: 5,
            max_results_per_keyword: 3,
            min_candidates: 3,
            max_candidates: 5,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `JANLENS_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// OpenAI API key (`OPENAI_API_KEY`). Empty means vision calls will be
    /// rejected by the provider; startup only warns.
    pub openai_api_key: String,

    /// Chat-completions endpoint URL.
    pub openai_url: String,

    /// Model name used for all vision calls. Default: `gpt-4o-mini`.
    pub openai_model: String,

    /// JANCODE LOOKUP endpoint URL.
    pub lookup_url: String,

    /// JANCODE LOOKUP application id.
    pub lookup_app_id: String,

    /// Timeout for a single vision-model call. Default: `30s`.
    pub model_timeout: Duration,

    /// Timeout for a single keyword/code search. Default: `10s`.
    pub search_timeout: Duration,

    /// Pipeline limits.
    pub limits: Limits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            openai_api_key: String::new(),
            openai_url: DEFAULT_OPENAI_URL.to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            lookup_app_id: String::new(),
            model_timeout: Duration::from_secs(30),
            search_timeout: Duration::from_secs(10),
            limits: Limits::default(),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "JANLENS_PORT";
    const ENV_BIND_ADDR: &'static str = "JANLENS_BIND_ADDR";
    const ENV_OPENAI_API_KEY: &'static str = "OPENAI_API_KEY";
    const ENV_OPENAI_URL: &'static str = "JANLENS_OPENAI_URL";
    const ENV_OPENAI_MODEL: &'static str = "JANLENS_OPENAI_MODEL";
    const ENV_LOOKUP_URL: &'static str = "JANLENS_LOOKUP_URL";
    const ENV_LOOKUP_APP_ID: &'static str = "JANLENS_LOOKUP_APP_ID";
    const ENV_MODEL_TIMEOUT: &'static str = "JANLENS_MODEL_TIMEOUT_SECS";
    const ENV_SEARCH_TIMEOUT: &'static str = "JANLENS_SEARCH_TIMEOUT_SECS";
    const ENV_MAX_KEYWORDS: &'static str = "JANLENS_MAX_KEYWORDS";
    const ENV_MAX_RESULTS_PER_KEYWORD: &'static str = "JANLENS_MAX_RESULTS_PER_KEYWORD";
    const ENV_MIN_CANDIDATES: &'static str = "JANLENS_MIN_CANDIDATES";
    const ENV_MAX_CANDIDATES: &'static str = "JANLENS_MAX_CANDIDATES";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let default_limits = defaults.limits;

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;

        let limits = Limits {
            max_keywords: Self::parse_usize_from_env(
                Self::ENV_MAX_KEYWORDS,
                default_limits.max_keywords,
            ),
            max_results_per_keyword: Self::parse_usize_from_env(
                Self::ENV_MAX_RESULTS_PER_KEYWORD,
                default_limits.max_results_per_keyword,
            ),
            min_candidates: Self::parse_usize_from_env(
                Self::ENV_MIN_CANDIDATES,
                default_limits.min_candidates,
            ),
            max_candidates: Self::parse_usize_from_env(
                Self::ENV_MAX_CANDIDATES,
                default_limits.max_candidates,
            ),
        };

        Ok(Self {
            port,
            bind_addr,
            openai_api_key: Self::parse_string_from_env(
                Self::ENV_OPENAI_API_KEY,
                defaults.openai_api_key,
            ),
            openai_url: Self::parse_string_from_env(Self::ENV_OPENAI_URL, defaults.openai_url),
            openai_model: Self::parse_string_from_env(
                Self::ENV_OPENAI_MODEL,
                defaults.openai_model,
            ),
            lookup_url: Self::parse_string_from_env(Self::ENV_LOOKUP_URL, defaults.lookup_url),
            lookup_app_id: Self::parse_string_from_env(
                Self::ENV_LOOKUP_APP_ID,
                defaults.lookup_app_id,
            ),
            model_timeout: Self::parse_secs_from_env(
                Self::ENV_MODEL_TIMEOUT,
                defaults.model_timeout,
            ),
            search_timeout: Self::parse_secs_from_env(
                Self::ENV_SEARCH_TIMEOUT,
                defaults.search_timeout,
            ),
            limits,
        })
    }

    /// Validates basic invariants (does not call out to either provider).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_keywords == 0 {
            return Err(ConfigError::InvalidLimit {
                name: "max_keywords",
                value: 0,
                reason: "must be at least 1",
            });
        }

        if self.limits.max_results_per_keyword == 0 {
            return Err(ConfigError::InvalidLimit {
                name: "max_results_per_keyword",
                value: 0,
                reason: "must be at least 1",
            });
        }

        if self.limits.min_candidates > self.limits.max_candidates {
            return Err(ConfigError::InvalidLimit {
                name: "min_candidates",
                value: self.limits.min_candidates,
                reason: "must not exceed max_candidates",
            });
        }

        if self.model_timeout.is_zero() || self.search_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_secs_from_env(var_name: &str, default: Duration) -> Duration {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(default)
    }
}
