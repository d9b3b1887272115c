//! Deterministic text analysis of provider responses.
//!
//! Everything in this module is synchronous and pure. The pipeline for one
//! (response, brand) pair lives in [`analyzer`]; [`visibility`] aggregates
//! across providers and [`recommendations`] turns the result into advice.

pub mod analyzer;
pub mod context;
pub mod excerpts;
pub mod lexicon;
pub mod mentions;
pub mod position;
pub mod recommendations;
pub mod sentiment;
pub mod visibility;

pub use analyzer::{analyze_mention, analyze_text, MentionAnalysis};
pub use context::MentionContext;
pub use recommendations::{generate_recommendations, Recommendation};
pub use sentiment::Sentiment;
pub use visibility::visibility_score;
