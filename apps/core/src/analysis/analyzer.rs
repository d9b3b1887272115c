//! Brand Mention Analyzer - orchestrator for the analysis module.
//!
//! Composes mention counting, position ranking, sentiment scoring, context
//! classification and excerpt extraction into one [`MentionAnalysis`] per
//! (provider response, brand) pair.
//!
//! Every function here is pure: identical inputs give identical outputs and
//! nothing is shared between calls except the static lexicon tables.

use serde::{Deserialize, Serialize};

use super::context::{classify_context, MentionContext};
use super::excerpts::extract_excerpts;
use super::mentions::count_mentions;
use super::position::rank_of;
use super::sentiment::{analyze_sentiment, Sentiment};
use crate::providers::types::ProviderQueryOutcome;

/// Structured facts about one brand in one provider response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionAnalysis {
    /// Brand name as supplied by the caller
    pub brand_name: String,
    pub mentioned: bool,
    /// Word-bounded, case-insensitive occurrences
    pub mention_count: usize,
    /// 1-based order of first occurrence among tracked brands
    pub rank: Option<u32>,
    pub sentiment: Sentiment,
    /// Normalized sentiment in [-1.0, 1.0]
    pub sentiment_score: f64,
    /// Up to three sentences mentioning the brand
    pub excerpts: Vec<String>,
    pub context: MentionContext,
}

impl MentionAnalysis {
    /// The canonical analysis of a brand that does not appear.
    pub fn absent(brand_name: &str) -> Self {
        Self {
            brand_name: brand_name.to_string(),
            mentioned: false,
            mention_count: 0,
            rank: None,
            sentiment: Sentiment::Neutral,
            sentiment_score: 0.0,
            excerpts: vec![],
            context: MentionContext::Absent,
        }
    }
}

/// Analyze a provider outcome for `brand_name`.
///
/// `tracked_names` is the full set of brands (subject and competitors) used
/// for ranking; it may contain duplicates and the brand itself. Failed or
/// empty outcomes short-circuit to [`MentionAnalysis::absent`].
pub fn analyze_mention(
    outcome: &ProviderQueryOutcome,
    brand_name: &str,
    tracked_names: &[String],
) -> MentionAnalysis {
    if outcome.is_failure() || outcome.text.is_empty() {
        return MentionAnalysis::absent(brand_name);
    }
    analyze_text(&outcome.text, brand_name, tracked_names)
}

/// Analyze raw response text for `brand_name`.
pub fn analyze_text(text: &str, brand_name: &str, tracked_names: &[String]) -> MentionAnalysis {
    let mention_count = count_mentions(text, brand_name);
    if mention_count == 0 {
        return MentionAnalysis::absent(brand_name);
    }

    let sentiment = analyze_sentiment(text, brand_name);

    MentionAnalysis {
        brand_name: brand_name.to_string(),
        mentioned: true,
        mention_count,
        rank: rank_of(text, brand_name, tracked_names),
        sentiment: sentiment.sentiment,
        sentiment_score: sentiment.score,
        excerpts: extract_excerpts(text, brand_name),
        context: classify_context(text, brand_name),
    }
}
