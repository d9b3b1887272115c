//! Provider capability, outcome records, concrete HTTP clients and the
//! fan-out coordinator.

pub mod coordinator;
pub mod gemini;
pub mod openrouter;
pub mod traits;
pub mod types;

pub use coordinator::{default_registry, ProviderCoordinator};
pub use traits::ProviderClient;
pub use types::{ProviderId, ProviderIdentity, ProviderQueryOutcome, TokenUsage};
