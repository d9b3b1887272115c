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

/// Google Gemini through the Generative Language REST API.
pub struct GeminiProvider {
    identity: ProviderIdentity,
    http: Client,
    base_url: Url,
    api_key: Option<String>,
    model: String,
}

impl GeminiProvider {
    pub fn new(http: Client, base_url: Url, api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            identity: ProviderIdentity::new(ProviderId::GoogleGemini, "Google Gemini"),
            http,
            base_url: as_base_url(base_url),
            api_key,
            model: model.into(),
        }
    }

    pub fn from_settings(http: Client, settings: &ProviderSettings) -> Self {
        Self::new(
            http,
            settings.gemini_base_url.clone(),
            settings.gemini_api_key.clone(),
            settings.gemini_model.clone(),
        )
    }

    async fn generate(&self, prompt: &str) -> Result<(String, Option<TokenUsage>), AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("GOOGLE_AI_API_KEY is not set".to_string()))?;

        let endpoint = self
            .base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))?;

        let payload = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
        });

        let res = self
            .http
            .post(endpoint)
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "Gemini API error: {} — {}",
                status.as_u16(),
                body
            )));
        }

        let json: Value = res
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("Malformed Gemini payload: {}", e)))?;

        Ok(parse_generation(&json))
    }
}

/// Joins the text parts of the first candidate and reads `usageMetadata`.
fn parse_generation(json: &Value) -> (String, Option<TokenUsage>) {
    let text = json["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p["text"].as_str())
                .collect::<String>()
        })
        .unwrap_or_default();

    let usage = json.get("usageMetadata").map(|u| TokenUsage {
        prompt_tokens: u["promptTokenCount"].as_u64(),
        completion_tokens: u["candidatesTokenCount"].as_u64(),
        total_tokens: u["totalTokenCount"].as_u64(),
    });

    (text, usage)
}

#[async_trait]
impl ProviderClient for GeminiProvider {
    fn identity(&self) -> &ProviderIdentity {
        &self.identity
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    #[instrument(skip(self, prompt), fields(provider = %self.identity.id, model = %self.model))]
    async fn query(&self, prompt: String) -> ProviderQueryOutcome {
        let started = Instant::now();
        let result = self.generate(&prompt).await;
        debug!(ok = result.is_ok(), "Gemini call finished");
        into_outcome(&self.identity, started, result)
    }
}
