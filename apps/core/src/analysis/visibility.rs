//! Visibility Score aggregation.
//!
//! Combines the analyses of one brand across providers into a single 0-100
//! score. The weights are the engine's scoring policy and must stay fixed
//! for scores to be comparable between runs:
//!
//! | component            | contribution                                  |
//! |----------------------|-----------------------------------------------|
//! | mention rate         | rate x 40                                     |
//! | mention density      | min(avg count / 3, 1) x 15                    |
//! | sentiment            | (avg score + 1) x 10                          |
//! | position bonus (avg) | 15 rank 1, 8 rank 2-3, 3 rank > 3, 0 absent   |
//! | context bonus (avg)  | 15 recommended, 5 compared, 2 mentioned       |

use super::analyzer::MentionAnalysis;
use super::context::MentionContext;

const MENTION_RATE_WEIGHT: f64 = 40.0;
const DENSITY_WEIGHT: f64 = 15.0;
const DENSITY_CAP: f64 = 3.0;
const SENTIMENT_WEIGHT: f64 = 10.0;

fn position_bonus(rank: Option<u32>) -> f64 {
    match rank {
        None => 0.0,
        Some(1) => 15.0,
        Some(2) | Some(3) => 8.0,
        Some(_) => 3.0,
    }
}

fn context_bonus(context: MentionContext) -> f64 {
    match context {
        MentionContext::Recommended => 15.0,
        MentionContext::Compared => 5.0,
        MentionContext::Mentioned => 2.0,
        MentionContext::Absent => 0.0,
    }
}

fn mean(analyses: &[MentionAnalysis], f: impl Fn(&MentionAnalysis) -> f64) -> f64 {
    analyses.iter().map(f).sum::<f64>() / analyses.len() as f64
}

/// Score a brand's analyses across providers. An empty slice scores 0.
pub fn visibility_score(analyses: &[MentionAnalysis]) -> u8 {
    if analyses.is_empty() {
        return 0;
    }

    let mention_rate = mean(analyses, |a| if a.mentioned { 1.0 } else { 0.0 });
    let density = (mean(analyses, |a| a.mention_count as f64) / DENSITY_CAP).min(1.0);
    let sentiment = mean(analyses, |a| a.sentiment_score);
    let positions = mean(analyses, |a| position_bonus(a.rank));
    let contexts = mean(analyses, |a| context_bonus(a.context));

    let raw = mention_rate * MENTION_RATE_WEIGHT
        + density * DENSITY_WEIGHT
        + (sentiment + 1.0) * SENTIMENT_WEIGHT
        + positions
        + contexts;

    raw.clamp(0.0, 100.0).round() as u8
}
