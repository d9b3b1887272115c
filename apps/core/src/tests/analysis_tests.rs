//! Analysis Pipeline Tests
//!
//! Properties of the mention analyzer and the visibility score that hold
//! across modules.

use std::time::Duration;

use crate::analysis::analyzer::{analyze_mention, analyze_text, MentionAnalysis};
use crate::analysis::context::MentionContext;
use crate::analysis::excerpts::MAX_EXCERPTS;
use crate::analysis::sentiment::Sentiment;
use crate::analysis::visibility::visibility_score;
use crate::providers::types::{ProviderId, ProviderQueryOutcome};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn answer(text: &str) -> ProviderQueryOutcome {
    ProviderQueryOutcome::success(ProviderId::GoogleGemini, text, Duration::from_millis(10), None)
}

fn assert_absent(analysis: &MentionAnalysis) {
    assert!(!analysis.mentioned);
    assert_eq!(analysis.mention_count, 0);
    assert_eq!(analysis.rank, None);
    assert_eq!(analysis.context, MentionContext::Absent);
    assert_eq!(analysis.sentiment, Sentiment::Neutral);
    assert_eq!(analysis.sentiment_score, 0.0);
    assert!(analysis.excerpts.is_empty());
}

// ============================================================================
// Mention Analyzer
// ============================================================================

#[test]
fn test_absent_brand_yields_canonical_absent_analysis() {
    let tracked = names(&["Acme", "Globex"]);
    for text in [
        "Globex is the best choice on the market.",
        "Acmeville is a lovely town, highly recommended.",
        "",
        "Nothing relevant here at all!",
    ] {
        assert_absent(&analyze_text(text, "Acme", &tracked));
    }
}

#[test]
fn test_failed_outcome_short_circuits() {
    let tracked = names(&["Acme"]);
    let failed = ProviderQueryOutcome::failure(ProviderId::GoogleGemini, "500", Duration::ZERO);
    assert_absent(&analyze_mention(&failed, "Acme", &tracked));

    let empty = answer("");
    assert_absent(&analyze_mention(&empty, "Acme", &tracked));
}

#[test]
fn test_mention_count_is_exact() {
    let analysis = analyze_text("Acme is great. Acme leads the market.", "Acme", &names(&["Acme"]));
    assert!(analysis.mentioned);
    assert_eq!(analysis.mention_count, 2);
    assert_eq!(analysis.rank, Some(1));
    assert_eq!(
        analysis.excerpts,
        vec!["Acme is great".to_string(), "Acme leads the market".to_string()]
    );
}

#[test]
fn test_mentioned_brand_has_consistent_facts() {
    let text = "For most teams we recommend Acme. Globex is an alternative.";
    let analysis = analyze_text(text, "Acme", &names(&["Acme", "Globex"]));
    assert!(analysis.mentioned);
    assert!(analysis.mention_count > 0);
    assert!(analysis.rank.is_some());
    assert_ne!(analysis.context, MentionContext::Absent);
    assert!(!analysis.excerpts.is_empty());
    assert!((-1.0..=1.0).contains(&analysis.sentiment_score));
}

#[test]
fn test_mentioned_implies_rank_and_context() {
    let tracked = names(&["Bosch", "C++", "Yahoo!", "Acme", "Globex"]);
    let cases = [
        ("Bo\u{17f}ch is great.", "Bosch"),
        ("BO\u{17f}CH and Globex", "Bosch"),
        ("C++ is the best language. I recommend C++ for speed.", "C++"),
        ("Yahoo! is popular.", "Yahoo!"),
        ("Acmeville hosts Acme.", "Acme"),
        ("ACME leads, acme follows.", "Acme"),
    ];

    for (text, brand) in cases {
        let analysis = analyze_text(text, brand, &tracked);
        assert!(analysis.mentioned, "{:?} not found in {:?}", brand, text);
        assert!(analysis.rank.is_some(), "{:?} has no rank in {:?}", brand, text);
        assert_ne!(analysis.context, MentionContext::Absent, "{:?} in {:?}", brand, text);
        assert!(!analysis.excerpts.is_empty());
    }
}

#[test]
fn test_case_folded_spelling_is_fully_analyzed() {
    let analysis = analyze_text("Bo\u{17f}ch is great.", "Bosch", &names(&["Bosch"]));
    assert!(analysis.mentioned);
    assert_eq!(analysis.mention_count, 1);
    assert_eq!(analysis.rank, Some(1));
    assert_eq!(analysis.context, MentionContext::Mentioned);
    assert_eq!(analysis.sentiment, Sentiment::Positive);
}

#[test]
fn test_names_ending_in_punctuation_are_counted() {
    let tracked = names(&["C++", "Rust"]);
    let text = "C++ is the best language. I recommend C++ for speed. Rust is newer.";
    let analysis = analyze_text(text, "C++", &tracked);
    assert_eq!(analysis.mention_count, 2);
    assert_eq!(analysis.rank, Some(1));
    assert_eq!(analysis.context, MentionContext::Recommended);

    let analysis = analyze_text("Yahoo! is popular.", "Yahoo!", &names(&["Yahoo!"]));
    assert_eq!(analysis.mention_count, 1);
    assert_eq!(analysis.excerpts, vec!["Yahoo! is popular".to_string()]);
}

#[test]
fn test_earliest_brand_ranks_first() {
    let text = "Initech dominates, Globex follows and Acme trails behind.";
    let tracked = names(&["Acme", "Globex", "Initech", "Umbrella"]);

    let rank = |brand: &str| analyze_text(text, brand, &tracked).rank;
    assert_eq!(rank("Initech"), Some(1));
    assert_eq!(rank("Globex"), Some(2));
    assert_eq!(rank("Acme"), Some(3));
    assert_eq!(rank("Umbrella"), None);
}

#[test]
fn test_duplicate_and_self_tracked_names_keep_ranks_contiguous() {
    let text = "Globex first, then Acme.";
    let tracked = names(&["Acme", "Globex", "acme", "Globex"]);
    assert_eq!(analyze_text(text, "Acme", &tracked).rank, Some(2));
    assert_eq!(analyze_text(text, "Globex", &tracked).rank, Some(1));
}

#[test]
fn test_recommendation_beats_comparison() {
    let text = "Compared to Globex, we recommend Acme.";
    let analysis = analyze_text(text, "Acme", &names(&["Acme", "Globex"]));
    assert_eq!(analysis.context, MentionContext::Recommended);
}

#[test]
fn test_swedish_answer_is_understood() {
    let text = "Vi rekommenderar Acme, en pålitlig och ledande leverantör.";
    let analysis = analyze_text(text, "Acme", &names(&["Acme"]));
    assert_eq!(analysis.context, MentionContext::Recommended);
    assert_eq!(analysis.sentiment, Sentiment::Positive);
}

#[test]
fn test_excerpts_are_capped() {
    let text = "Acme one. Acme two! Acme three? Acme four. Acme five.";
    let analysis = analyze_text(text, "Acme", &names(&["Acme"]));
    assert_eq!(analysis.mention_count, 5);
    assert_eq!(analysis.excerpts.len(), MAX_EXCERPTS);
    assert_eq!(analysis.excerpts[2], "Acme three");
}

#[test]
fn test_analysis_is_deterministic() {
    let outcome = answer("Acme is reliable, though Globex is cheaper. Many recommend Acme.");
    let tracked = names(&["Acme", "Globex"]);
    let first = analyze_mention(&outcome, "Acme", &tracked);
    let second = analyze_mention(&outcome, "Acme", &tracked);
    assert_eq!(first, second);
    assert_eq!(first.sentiment_score.to_bits(), second.sentiment_score.to_bits());
}

// ============================================================================
// Visibility Score
// ============================================================================

#[test]
fn test_score_of_empty_list_is_zero() {
    assert_eq!(visibility_score(&[]), 0);
}

#[test]
fn test_score_grows_with_mention_rate() {
    let tracked = names(&["Acme"]);
    let hit = analyze_text("Acme is an option.", "Acme", &tracked);
    let miss = MentionAnalysis::absent("Acme");

    let mut previous = 0;
    for mentioned in 0..=4 {
        let analyses: Vec<MentionAnalysis> = (0..4)
            .map(|i| if i < mentioned { hit.clone() } else { miss.clone() })
            .collect();
        let score = visibility_score(&analyses);
        assert!(score >= previous, "score dropped at {} mentions", mentioned);
        assert!(score <= 100);
        previous = score;
    }
}

#[test]
fn test_score_stays_in_range_for_extreme_inputs() {
    let tracked = names(&["Acme"]);
    let glowing = analyze_text(
        "Acme: best, top, excellent, great, trusted, popular, innovative. We recommend Acme. Acme! Acme!",
        "Acme",
        &tracked,
    );
    let scathing = analyze_text(
        "Acme: worst, bad, poor, avoid, issues, complaint, overpriced, scandal.",
        "Acme",
        &tracked,
    );

    assert_eq!(visibility_score(&[glowing.clone(), glowing]), 100);
    // 40 + 5 + 0 + 15 + 2: the sentiment term bottoms out at zero
    assert_eq!(visibility_score(&[scathing]), 62);
}
