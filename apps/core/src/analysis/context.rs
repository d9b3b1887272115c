//! Mention context classification.
//!
//! Labels how a brand shows up in a response by looking for recommendation
//! and comparison phrases near its first occurrence. Recommendation phrases
//! win over comparison phrases when both are present.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::lexicon::{any_hit, COMPARISON_PHRASES, RECOMMENDATION_PHRASES};
use super::mentions::first_occurrence;
use super::sentiment::window_around;

/// Characters taken on each side of the brand span.
pub const CONTEXT_WINDOW_RADIUS: usize = 100;

/// How a brand appears in a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MentionContext {
    Recommended,
    Compared,
    Mentioned,
    #[default]
    Absent,
}

impl fmt::Display for MentionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MentionContext::Recommended => "recommended",
            MentionContext::Compared => "compared",
            MentionContext::Mentioned => "mentioned",
            MentionContext::Absent => "absent",
        };
        write!(f, "{}", label)
    }
}

/// Classify the context of `brand` in `text`.
pub fn classify_context(text: &str, brand: &str) -> MentionContext {
    let Some(span) = first_occurrence(text, brand) else {
        return MentionContext::Absent;
    };

    let window = window_around(text, span.start, span.len(), CONTEXT_WINDOW_RADIUS).to_lowercase();

    if any_hit(&window, RECOMMENDATION_PHRASES) {
        MentionContext::Recommended
    } else if any_hit(&window, COMPARISON_PHRASES) {
        MentionContext::Compared
    } else {
        MentionContext::Mentioned
    }
}
