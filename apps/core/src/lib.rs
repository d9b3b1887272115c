//! Brandlens Core: measures how visible a brand is in AI provider answers.
//!
//! A [`VisibilityEngine`] sends one prompt to every configured provider
//! concurrently, analyzes each answer for the subject brand and its
//! competitors, and aggregates the analyses into 0-100 visibility scores.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod providers;

pub use config::ProviderSettings;
pub use engine::VisibilityEngine;
pub use error::AppError;
pub use models::{AnalysisRequest, Market, QueryReport};
pub use providers::{ProviderClient, ProviderCoordinator};

#[cfg(test)]
mod tests;
