//! Lexicon-based sentiment scoring.
//!
//! The score looks only at a window of text around the brand's first
//! occurrence: every positive term present adds one, every negative term
//! subtracts one, and the net count is damped and clamped into [-1, 1].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::lexicon::{count_hits, NEGATIVE_TERMS, POSITIVE_TERMS};
use super::mentions::first_occurrence;

/// Characters taken on each side of the brand span.
pub const SENTIMENT_WINDOW_RADIUS: usize = 250;

/// Divisor applied to the net lexicon count before clamping.
const DAMPING_DIVISOR: f64 = 4.0;

/// Scores above this are positive, below its negation negative.
const POLARITY_THRESHOLD: f64 = 0.2;

/// Overall polarity of a mention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        };
        write!(f, "{}", label)
    }
}

/// Polarity plus the normalized score it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    /// Normalized score in [-1.0, 1.0]
    pub score: f64,
}

impl SentimentResult {
    pub fn neutral() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            score: 0.0,
        }
    }
}

/// Slice of `text` spanning `radius` characters before the match at
/// `start..start + len` and `radius` characters after it.
///
/// Offsets are byte positions on a char boundary; the radius is counted in
/// chars so multi-byte text never splits a code point.
pub fn window_around(text: &str, start: usize, len: usize, radius: usize) -> &str {
    let end = (start + len).min(text.len());

    let from = text[..start]
        .char_indices()
        .rev()
        .nth(radius.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let from = if radius == 0 { start } else { from };

    let to = text[end..]
        .char_indices()
        .nth(radius)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());

    &text[from..to]
}

/// Score the sentiment around the first occurrence of `brand` in `text`.
pub fn analyze_sentiment(text: &str, brand: &str) -> SentimentResult {
    let Some(span) = first_occurrence(text, brand) else {
        return SentimentResult::neutral();
    };

    let window = window_around(text, span.start, span.len(), SENTIMENT_WINDOW_RADIUS);
    score_window(&window.to_lowercase())
}

/// Score an already extracted, lower-cased window.
pub fn score_window(window: &str) -> SentimentResult {
    let positive = count_hits(window, POSITIVE_TERMS) as f64;
    let negative = count_hits(window, NEGATIVE_TERMS) as f64;

    let score = ((positive - negative) / DAMPING_DIVISOR).clamp(-1.0, 1.0);
    let sentiment = if score > POLARITY_THRESHOLD {
        Sentiment::Positive
    } else if score < -POLARITY_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    SentimentResult { sentiment, score }
}
