//! Concurrent fan-out over the provider registry.
//!
//! The coordinator owns an immutable, ordered list of provider clients. A
//! fan-out spawns one task per usable provider and joins them all; every
//! failure a task can produce (error outcome, panic, elapsed timeout) ends up
//! as a [`ProviderQueryOutcome`] in the slot of the provider that caused it.

use futures::future::join_all;
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

use super::gemini::GeminiProvider;
use super::openrouter::{OpenRouterChatGptProvider, OpenRouterPerplexityProvider};
use super::traits::ProviderClient;
use super::types::{ProviderId, ProviderIdentity, ProviderQueryOutcome};
use crate::config::ProviderSettings;
use crate::error::AppError;

pub const NO_PROVIDERS_MESSAGE: &str =
    "No providers configured. Set GOOGLE_AI_API_KEY or OPENROUTER_API_KEY.";

/// Builds the standard registry in fallback priority order:
/// Gemini, then ChatGPT and Perplexity through OpenRouter.
pub fn default_registry(settings: &ProviderSettings) -> Vec<Arc<dyn ProviderClient>> {
    let http = Client::new();
    vec![
        Arc::new(GeminiProvider::from_settings(http.clone(), settings)),
        Arc::new(OpenRouterChatGptProvider::from_settings(http.clone(), settings)),
        Arc::new(OpenRouterPerplexityProvider::from_settings(http, settings)),
    ]
}

pub struct ProviderCoordinator {
    providers: Vec<Arc<dyn ProviderClient>>,
    call_timeout: Duration,
}

impl ProviderCoordinator {
    /// `providers` order is both the dispatch order and the fallback priority.
    pub fn new(providers: Vec<Arc<dyn ProviderClient>>, call_timeout: Duration) -> Self {
        Self {
            providers,
            call_timeout,
        }
    }

    pub fn from_settings(settings: &ProviderSettings) -> Self {
        Self::new(default_registry(settings), settings.provider_timeout)
    }

    /// Identities of every registered provider whose credentials are present.
    pub fn available(&self) -> Vec<ProviderIdentity> {
        self.providers
            .iter()
            .filter(|p| p.is_configured())
            .map(|p| p.identity().clone())
            .collect()
    }

    fn usable(&self, requested: Option<&[ProviderId]>) -> Vec<Arc<dyn ProviderClient>> {
        self.providers
            .iter()
            .filter(|p| p.is_configured())
            .filter(|p| requested.map_or(true, |ids| ids.contains(&p.identity().id)))
            .cloned()
            .collect()
    }

    /// Spawns the provider call immediately and returns a future resolving to
    /// its outcome. Panics and timeouts are converted here.
    fn dispatch(
        &self,
        provider: Arc<dyn ProviderClient>,
        prompt: &str,
    ) -> impl Future<Output = ProviderQueryOutcome> {
        let id = provider.identity().id.clone();
        let limit = self.call_timeout;
        let prompt = prompt.to_string();
        let started = Instant::now();

        let handle =
            tokio::spawn(async move { tokio::time::timeout(limit, provider.query(prompt)).await });

        async move {
            match handle.await {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(_elapsed)) => {
                    warn!(provider = %id, timeout = ?limit, "Provider call timed out");
                    let err = AppError::Timeout(format!("no response within {:?}", limit));
                    ProviderQueryOutcome::failure(id, err.to_string(), started.elapsed())
                }
                Err(join_err) => {
                    warn!(provider = %id, error = %join_err, "Provider task aborted");
                    let err = AppError::Internal(format!("provider task aborted: {}", join_err));
                    ProviderQueryOutcome::failure(id, err.to_string(), started.elapsed())
                }
            }
        }
    }

    /// Queries every usable provider concurrently.
    ///
    /// `requested` narrows the registry to the given ids; unknown ids are
    /// ignored. The result has one outcome per dispatched provider in
    /// registry order, or a single synthetic failure when none is usable.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn query_all(
        &self,
        prompt: &str,
        requested: Option<&[ProviderId]>,
    ) -> Vec<ProviderQueryOutcome> {
        let targets = self.usable(requested);
        if targets.is_empty() {
            warn!("Fan-out requested with no usable providers");
            return vec![ProviderQueryOutcome::failure(
                ProviderId::Coordinator,
                NO_PROVIDERS_MESSAGE,
                Duration::ZERO,
            )];
        }

        info!(count = targets.len(), "Dispatching prompt to providers");
        let tasks: Vec<_> = targets
            .into_iter()
            .map(|provider| self.dispatch(provider, prompt))
            .collect();

        // join_all keeps input order, so slot i belongs to provider i
        let outcomes = join_all(tasks).await;

        for outcome in &outcomes {
            match &outcome.error {
                Some(err) => warn!(provider = %outcome.provider, error = %err, "Provider failed"),
                None => info!(
                    provider = %outcome.provider,
                    elapsed_ms = outcome.elapsed.as_millis() as u64,
                    "Provider responded"
                ),
            }
        }
        outcomes
    }

    /// Tries configured providers one at a time in registry order and
    /// returns the first outcome with text and no error.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn query_with_fallback(&self, prompt: &str) -> ProviderQueryOutcome {
        let started = Instant::now();
        let mut failures: Vec<String> = Vec::new();

        for provider in self.usable(None) {
            let id = provider.identity().id.clone();
            info!(provider = %id, "Trying provider");
            let outcome = self.dispatch(provider, prompt).await;

            if outcome.is_usable() {
                info!(provider = %id, elapsed_ms = outcome.elapsed.as_millis() as u64, "Fallback chain succeeded");
                return outcome;
            }

            let reason = outcome.error.as_deref().unwrap_or("empty response");
            warn!(provider = %id, error = %reason, "Provider failed, falling back");
            failures.push(format!("{}: {}", id, reason));
        }

        let message = if failures.is_empty() {
            NO_PROVIDERS_MESSAGE.to_string()
        } else {
            format!("All providers failed: {}", failures.join("; "))
        };
        ProviderQueryOutcome::failure(ProviderId::Coordinator, message, started.elapsed())
    }
}
