use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Stable identifier of a provider backend.
///
/// Serialized as its string form (`"google-gemini"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderId {
    GoogleGemini,
    OpenRouterChatGpt,
    OpenRouterPerplexity,
    /// Used only on synthetic outcomes produced by the coordinator itself.
    Coordinator,
    /// Any other backend (local models, test stubs).
    Custom(String),
}

impl ProviderId {
    pub fn as_str(&self) -> &str {
        match self {
            ProviderId::GoogleGemini => "google-gemini",
            ProviderId::OpenRouterChatGpt => "openrouter-chatgpt",
            ProviderId::OpenRouterPerplexity => "openrouter-perplexity",
            ProviderId::Coordinator => "coordinator",
            ProviderId::Custom(name) => name,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ProviderId {
    fn from(value: String) -> Self {
        match value.as_str() {
            "google-gemini" => ProviderId::GoogleGemini,
            "openrouter-chatgpt" => ProviderId::OpenRouterChatGpt,
            "openrouter-perplexity" => ProviderId::OpenRouterPerplexity,
            "coordinator" => ProviderId::Coordinator,
            _ => ProviderId::Custom(value),
        }
    }
}

impl From<&str> for ProviderId {
    fn from(value: &str) -> Self {
        ProviderId::from(value.to_string())
    }
}

impl From<ProviderId> for String {
    fn from(value: ProviderId) -> Self {
        value.as_str().to_string()
    }
}

/// Immutable identity of a provider client, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderIdentity {
    pub id: ProviderId,
    /// Human-readable label (e.g. "ChatGPT (via OpenRouter)")
    pub label: String,
}

impl ProviderIdentity {
    pub fn new(id: ProviderId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Token accounting reported by a backend, when it reports any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

/// Result of one provider call.
///
/// A present `error` marks a failure; otherwise the call succeeded, possibly
/// with empty text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderQueryOutcome {
    pub provider: ProviderId,
    pub text: String,
    #[serde(rename = "response_time_ms", with = "duration_ms")]
    pub elapsed: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_usage: Option<TokenUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProviderQueryOutcome {
    pub fn success(
        provider: ProviderId,
        text: impl Into<String>,
        elapsed: Duration,
        token_usage: Option<TokenUsage>,
    ) -> Self {
        Self {
            provider,
            text: text.into(),
            elapsed,
            token_usage,
            error: None,
        }
    }

    pub fn failure(provider: ProviderId, error: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            provider,
            text: String::new(),
            elapsed,
            token_usage: None,
            error: Some(error.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Non-empty text and no error: what the fallback chain accepts.
    pub fn is_usable(&self) -> bool {
        !self.is_failure() && !self.text.is_empty()
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id_string_forms() {
        for id in [
            ProviderId::GoogleGemini,
            ProviderId::OpenRouterChatGpt,
            ProviderId::OpenRouterPerplexity,
            ProviderId::Coordinator,
            ProviderId::Custom("local-llama".to_string()),
        ] {
            assert_eq!(ProviderId::from(id.as_str()), id);
        }
    }

    #[test]
    fn test_outcome_serializes_elapsed_as_millis() {
        let outcome = ProviderQueryOutcome::success(
            ProviderId::GoogleGemini,
            "hi",
            Duration::from_millis(1500),
            None,
        );
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["provider"], "google-gemini");
        assert_eq!(json["response_time_ms"], 1500);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_has_empty_text() {
        let outcome = ProviderQueryOutcome::failure(ProviderId::Coordinator, "nope", Duration::ZERO);
        assert!(outcome.is_failure());
        assert!(!outcome.is_usable());
        assert!(outcome.text.is_empty());
    }

    #[test]
    fn test_empty_success_is_not_usable() {
        let outcome = ProviderQueryOutcome::success(ProviderId::GoogleGemini, "", Duration::ZERO, None);
        assert!(!outcome.is_failure());
        assert!(!outcome.is_usable());
    }
}
