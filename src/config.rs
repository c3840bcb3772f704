//! Startup configuration
//!
//! Built once in the binary and passed down explicitly. Nothing in the
//! library reads or mutates the process environment.

use crate::error::OrchestrationError;
use crate::Result;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_EXIT_TOKEN: &str = "exit";

/// Settings for the Gemini completion provider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: i32,
    pub max_output_tokens: i32,
    pub request_timeout: Duration,
    /// Generations tried before a constrained call is reported as upstream failure
    pub label_attempts: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.3,
            top_p: 0.9,
            top_k: 40,
            max_output_tokens: 1024,
            request_timeout: Duration::from_secs(30),
            label_attempts: 2,
        }
    }
}

impl ProviderConfig {
    pub fn has_api_key(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != "your_gemini_api_key_here"
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    /// Exact input that ends an interactive session
    pub exit_token: String,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            exit_token: DEFAULT_EXIT_TOKEN.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load `.env` (if present) and read configuration from the environment
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let provider_defaults = defaults.provider;

        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = ProviderConfig {
            api_key: get("GEMINI_API_KEY").unwrap_or_default(),
            model: get("GEMINI_MODEL").unwrap_or(provider_defaults.model),
            base_url: get("GEMINI_BASE_URL").unwrap_or(provider_defaults.base_url),
            temperature: parse_or(
                get("GEMINI_TEMPERATURE"),
                "GEMINI_TEMPERATURE",
                provider_defaults.temperature,
            )?,
            top_p: provider_defaults.top_p,
            top_k: provider_defaults.top_k,
            max_output_tokens: parse_or(
                get("GEMINI_MAX_OUTPUT_TOKENS"),
                "GEMINI_MAX_OUTPUT_TOKENS",
                provider_defaults.max_output_tokens,
            )?,
            request_timeout: Duration::from_secs(parse_or(
                get("GEMINI_TIMEOUT_SECS"),
                "GEMINI_TIMEOUT_SECS",
                provider_defaults.request_timeout.as_secs(),
            )?),
            label_attempts: parse_or(
                get("CLASSIFIER_LABEL_ATTEMPTS"),
                "CLASSIFIER_LABEL_ATTEMPTS",
                provider_defaults.label_attempts,
            )?,
        };

        if provider.label_attempts == 0 {
            return Err(OrchestrationError::Configuration(
                "CLASSIFIER_LABEL_ATTEMPTS must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            provider,
            exit_token: get("DISPATCHER_EXIT_TOKEN").unwrap_or(defaults.exit_token),
            log_filter: get("DISPATCHER_LOG").unwrap_or(defaults.log_filter),
        })
    }
}

fn parse_or<T: FromStr>(value: Option<String>, key: &str, default: T) -> Result<T> {
    match value {
        Some(raw) => raw.trim().parse().map_err(|_| {
            OrchestrationError::Configuration(format!("{} has invalid value '{}'", key, raw))
        }),
        None => Ok(default),
    }
}
