use async_trait::async_trait;
use std::time::Instant;

use super::types::{ProviderIdentity, ProviderQueryOutcome, TokenUsage};
use crate::error::AppError;

/// Defines the capability set of a text-generation backend.
///
/// The coordinator depends only on this trait, so a provider may be backed by
/// an HTTP API, a local model or a stub in tests. Implementations must not
/// let errors escape `query`: transport, status and payload failures are
/// reported through [`ProviderQueryOutcome::failure`].
#[async_trait]
pub trait ProviderClient: Send + Sync + 'static {
    /// Identity assigned at construction; never changes.
    fn identity(&self) -> &ProviderIdentity;

    /// Whether the provider is usable with the credentials available.
    fn is_configured(&self) -> bool;

    /// Sends `prompt` to the backend and reports what came back.
    async fn query(&self, prompt: String) -> ProviderQueryOutcome;
}

/// Converts a client's internal result into an outcome stamped with the
/// time elapsed since `started`.
pub(crate) fn into_outcome(
    identity: &ProviderIdentity,
    started: Instant,
    result: Result<(String, Option<TokenUsage>), AppError>,
) -> ProviderQueryOutcome {
    let elapsed = started.elapsed();
    match result {
        Ok((text, usage)) => ProviderQueryOutcome::success(identity.id.clone(), text, elapsed, usage),
        Err(e) => ProviderQueryOutcome::failure(identity.id.clone(), e.to_string(), elapsed),
    }
}
