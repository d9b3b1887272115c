//! OpenRouter-backed providers.
//!
//! OpenRouter exposes an OpenAI-compatible chat completion endpoint for many
//! hosted models. Two providers use it with different models and system
//! prompts; both own an [`OpenRouterClient`] that performs the HTTP call.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{debug, instrument};
use url::Url;

use super::traits::{into_outcome, ProviderClient};
use super::types::{ProviderId, ProviderIdentity, ProviderQueryOutcome, TokenUsage};
use crate::config::{as_base_url, ProviderSettings};
use crate::error::AppError;

const COMPLETIONS_PATH: &str = "api/v1/chat/completions";
const APP_TITLE: &str = "Brandlens";
const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f64 = 0.7;

const CHATGPT_SYSTEM_PROMPT: &str = "You are a helpful AI search assistant similar to ChatGPT. \
Provide comprehensive, accurate answers with relevant details. If you mention specific brands, \
companies, or products, be factual and objective.";

const PERPLEXITY_SYSTEM_PROMPT: &str = "You are a helpful AI search assistant similar to Perplexity. \
Provide comprehensive, research-oriented answers. Mention specific brands, companies, and products \
when relevant. Be factual and cite sources when possible.";

/// Shared HTTP helper for OpenRouter chat completions.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
    referer: String,
}

impl OpenRouterClient {
    pub fn new(http: Client, base_url: Url, api_key: Option<String>, referer: String) -> Self {
        Self {
            http,
            base_url: as_base_url(base_url),
            api_key,
            referer,
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Runs one chat completion and returns the message text and token usage.
    pub async fn complete(
        &self,
        model: &str,
        system_prompt: &str,
        prompt: &str,
    ) -> Result<(String, Option<TokenUsage>), AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("OPENROUTER_API_KEY is not set".to_string()))?;

        let payload = json!({
            "model": model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": prompt }
            ],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE
        });

        let endpoint = self.base_url.join(COMPLETIONS_PATH)?;
        let res = self
            .http
            .post(endpoint)
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", APP_TITLE)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "OpenRouter API error: {} — {}",
                status.as_u16(),
                body
            )));
        }

        let json: Value = res
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("Malformed OpenRouter payload: {}", e)))?;

        Ok(parse_completion(&json))
    }
}

/// Extracts `choices[0].message.content` and `usage` from a completion body.
pub(crate) fn parse_completion(json: &Value) -> (String, Option<TokenUsage>) {
    let text = json["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or("")
        .to_string();

    let usage = json.get("usage").map(|u| TokenUsage {
        prompt_tokens: u["prompt_tokens"].as_u64(),
        completion_tokens: u["completion_tokens"].as_u64(),
        total_tokens: u["total_tokens"].as_u64(),
    });

    (text, usage)
}

/// Stands in for ChatGPT using a Llama model served by OpenRouter.
pub struct OpenRouterChatGptProvider {
    identity: ProviderIdentity,
    client: OpenRouterClient,
    model: String,
}

impl OpenRouterChatGptProvider {
    pub fn new(client: OpenRouterClient, model: impl Into<String>) -> Self {
        Self {
            identity: ProviderIdentity::new(ProviderId::OpenRouterChatGpt, "ChatGPT (via OpenRouter)"),
            client,
            model: model.into(),
        }
    }

    pub fn from_settings(http: Client, settings: &ProviderSettings) -> Self {
        Self::new(
            OpenRouterClient::new(
                http,
                settings.openrouter_base_url.clone(),
                settings.openrouter_api_key.clone(),
                settings.app_url.clone(),
            ),
            settings.chatgpt_model.clone(),
        )
    }
}

#[async_trait]
impl ProviderClient for OpenRouterChatGptProvider {
    fn identity(&self) -> &ProviderIdentity {
        &self.identity
    }

    fn is_configured(&self) -> bool {
        self.client.has_credentials()
    }

    #[instrument(skip(self, prompt), fields(provider = %self.identity.id, model = %self.model))]
    async fn query(&self, prompt: String) -> ProviderQueryOutcome {
        let started = Instant::now();
        let result = self
            .client
            .complete(&self.model, CHATGPT_SYSTEM_PROMPT, &prompt)
            .await;
        debug!(ok = result.is_ok(), "OpenRouter call finished");
        into_outcome(&self.identity, started, result)
    }
}

/// Stands in for Perplexity using a DeepSeek model served by OpenRouter.
pub struct OpenRouterPerplexityProvider {
    identity: ProviderIdentity,
    client: OpenRouterClient,
    model: String,
}

impl OpenRouterPerplexityProvider {
    pub fn new(client: OpenRouterClient, model: impl Into<String>) -> Self {
        Self {
            identity: ProviderIdentity::new(
                ProviderId::OpenRouterPerplexity,
                "Perplexity (via OpenRouter)",
            ),
            client,
            model: model.into(),
        }
    }

    pub fn from_settings(http: Client, settings: &ProviderSettings) -> Self {
        Self::new(
            OpenRouterClient::new(
                http,
                settings.openrouter_base_url.clone(),
                settings.openrouter_api_key.clone(),
                settings.app_url.clone(),
            ),
            settings.perplexity_model.clone(),
        )
    }
}

#[async_trait]
impl ProviderClient for OpenRouterPerplexityProvider {
    fn identity(&self) -> &ProviderIdentity {
        &self.identity
    }

    fn is_configured(&self) -> bool {
        self.client.has_credentials()
    }

    #[instrument(skip(self, prompt), fields(provider = %self.identity.id, model = %self.model))]
    async fn query(&self, prompt: String) -> ProviderQueryOutcome {
        let started = Instant::now();
        let result = self
            .client
            .complete(&self.model, PERPLEXITY_SYSTEM_PROMPT, &prompt)
            .await;
        debug!(ok = result.is_ok(), "OpenRouter call finished");
        into_outcome(&self.identity, started, result)
    }
}
