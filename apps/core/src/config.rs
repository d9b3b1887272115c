//! Environment-driven configuration for the provider clients.
//!
//! Credentials and endpoints come from the process environment (optionally
//! seeded from a `.env` file by the binary). A variable set to an empty
//! string counts as unset.

use std::env;
use std::time::Duration;
use tracing::warn;
use url::Url;

use crate::error::AppError;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai";
pub const DEFAULT_APP_URL: &str = "http://localhost:3000";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_CHATGPT_MODEL: &str = "meta-llama/llama-3.3-70b-instruct:free";
pub const DEFAULT_PERPLEXITY_MODEL: &str = "deepseek/deepseek-chat-v3-0324:free";

/// Per-provider call timeout when `PROVIDER_TIMEOUT_SECS` is unset.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);

/// Everything the concrete provider clients need to reach their backends.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub gemini_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub gemini_base_url: Url,
    pub openrouter_base_url: Url,
    /// Sent as `HTTP-Referer` to OpenRouter
    pub app_url: String,
    pub gemini_model: String,
    pub chatgpt_model: String,
    pub perplexity_model: String,
    pub provider_timeout: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            openrouter_api_key: None,
            gemini_base_url: Url::parse(DEFAULT_GEMINI_BASE_URL).expect("valid default URL"),
            openrouter_base_url: Url::parse(DEFAULT_OPENROUTER_BASE_URL)
                .expect("valid default URL"),
            app_url: DEFAULT_APP_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            chatgpt_model: DEFAULT_CHATGPT_MODEL.to_string(),
            perplexity_model: DEFAULT_PERPLEXITY_MODEL.to_string(),
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }
}

/// Appends a trailing `/` to the path so `Url::join` keeps every segment of a
/// prefixed base such as `https://host/proxy`.
pub fn as_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ProviderSettings {
    /// Reads settings from the environment.
    ///
    /// Fails only when a base URL is present but malformed.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let gemini_base_url = match non_empty_var("GEMINI_BASE_URL") {
            Some(raw) => as_base_url(Url::parse(&raw)?),
            None => defaults.gemini_base_url,
        };
        let openrouter_base_url = match non_empty_var("OPENROUTER_BASE_URL") {
            Some(raw) => as_base_url(Url::parse(&raw)?),
            None => defaults.openrouter_base_url,
        };

        let provider_timeout = match non_empty_var("PROVIDER_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(value = %raw, "Ignoring invalid PROVIDER_TIMEOUT_SECS");
                    defaults.provider_timeout
                }
            },
            None => defaults.provider_timeout,
        };

        Ok(Self {
            gemini_api_key: non_empty_var("GOOGLE_AI_API_KEY").or_else(|| non_empty_var("GEMINI_API_KEY")),
            openrouter_api_key: non_empty_var("OPENROUTER_API_KEY"),
            gemini_base_url,
            openrouter_base_url,
            app_url: non_empty_var("APP_URL").unwrap_or(defaults.app_url),
            gemini_model: non_empty_var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            chatgpt_model: non_empty_var("OPENROUTER_CHATGPT_MODEL").unwrap_or(defaults.chatgpt_model),
            perplexity_model: non_empty_var("OPENROUTER_PERPLEXITY_MODEL")
                .unwrap_or(defaults.perplexity_model),
            provider_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: &[&str] = &[
        "GOOGLE_AI_API_KEY",
        "GEMINI_API_KEY",
        "OPENROUTER_API_KEY",
        "GEMINI_BASE_URL",
        "OPENROUTER_BASE_URL",
        "APP_URL",
        "GEMINI_MODEL",
        "OPENROUTER_CHATGPT_MODEL",
        "OPENROUTER_PERPLEXITY_MODEL",
        "PROVIDER_TIMEOUT_SECS",
    ];

    /// Every known variable, unset unless listed in `overrides`.
    fn vars_with(overrides: &[(&'static str, &'static str)]) -> Vec<(&'static str, Option<&'static str>)> {
        ALL_VARS
            .iter()
            .map(|name| {
                let value = overrides.iter().find(|(k, _)| k == name).map(|(_, v)| *v);
                (*name, value)
            })
            .collect()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        temp_env::with_vars(vars_with(&[]), || {
            let settings = ProviderSettings::from_env().unwrap();
            assert!(settings.gemini_api_key.is_none());
            assert!(settings.openrouter_api_key.is_none());
            assert_eq!(settings.provider_timeout, DEFAULT_PROVIDER_TIMEOUT);
            assert_eq!(settings.gemini_model, DEFAULT_GEMINI_MODEL);
        });
    }

    #[test]
    fn test_gemini_key_fallback() {
        let vars = vars_with(&[("GEMINI_API_KEY", "fallback-key")]);
        temp_env::with_vars(vars, || {
            let settings = ProviderSettings::from_env().unwrap();
            assert_eq!(settings.gemini_api_key.as_deref(), Some("fallback-key"));
        });
    }

    #[test]
    fn test_primary_gemini_key_wins() {
        let vars = vars_with(&[("GOOGLE_AI_API_KEY", "primary"), ("GEMINI_API_KEY", "secondary")]);
        temp_env::with_vars(vars, || {
            let settings = ProviderSettings::from_env().unwrap();
            assert_eq!(settings.gemini_api_key.as_deref(), Some("primary"));
        });
    }

    #[test]
    fn test_empty_key_counts_as_unset() {
        let vars = vars_with(&[("OPENROUTER_API_KEY", "   ")]);
        temp_env::with_vars(vars, || {
            let settings = ProviderSettings::from_env().unwrap();
            assert!(settings.openrouter_api_key.is_none());
        });
    }

    #[test]
    fn test_malformed_base_url_is_config_error() {
        let vars = vars_with(&[("OPENROUTER_BASE_URL", "not a url")]);
        temp_env::with_vars(vars, || {
            let err = ProviderSettings::from_env().unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
        });
    }

    #[test]
    fn test_base_url_prefix_gets_trailing_slash() {
        let vars = vars_with(&[
            ("GEMINI_BASE_URL", "https://gateway.example.com/proxy"),
            ("OPENROUTER_BASE_URL", "https://gateway.example.com/or/"),
        ]);
        temp_env::with_vars(vars, || {
            let settings = ProviderSettings::from_env().unwrap();
            assert_eq!(settings.gemini_base_url.path(), "/proxy/");
            assert_eq!(settings.openrouter_base_url.path(), "/or/");
            let joined = settings.gemini_base_url.join("v1beta/models/m:generateContent").unwrap();
            assert_eq!(joined.path(), "/proxy/v1beta/models/m:generateContent");
        });
    }

    #[test]
    fn test_as_base_url_leaves_root_alone() {
        let url = as_base_url(Url::parse("https://openrouter.ai").unwrap());
        assert_eq!(url.as_str(), "https://openrouter.ai/");
    }

    #[test]
    fn test_timeout_override_and_invalid_value() {
        let vars = vars_with(&[("PROVIDER_TIMEOUT_SECS", "15")]);
        temp_env::with_vars(vars, || {
            let settings = ProviderSettings::from_env().unwrap();
            assert_eq!(settings.provider_timeout, Duration::from_secs(15));
        });

        let vars = vars_with(&[("PROVIDER_TIMEOUT_SECS", "zero")]);
        temp_env::with_vars(vars, || {
            let settings = ProviderSettings::from_env().unwrap();
            assert_eq!(settings.provider_timeout, DEFAULT_PROVIDER_TIMEOUT);
        });
    }
}
