//! Lexicon & heuristic tables.
//!
//! English and Swedish terms are merged into single vocabularies: provider
//! responses may mix languages, so no per-locale switching happens at
//! lookup time. All entries are lower-case and matched by substring
//! containment against lower-cased text.

/// Terms that pull the sentiment score up by one each.
pub const POSITIVE_TERMS: &[&str] = &[
    // English
    "best",
    "top",
    "excellent",
    "great",
    "recommended",
    "leading",
    "trusted",
    "popular",
    "innovative",
    "reliable",
    "outstanding",
    "premier",
    "superior",
    "favorite",
    "preferred",
    "award",
    "renowned",
    "impressive",
    "highly rated",
    "well-known",
    "reputable",
    // Swedish
    "bäst",
    "utmärkt",
    "pålitlig",
    "populär",
    "innovativ",
    "ledande",
    "betrodd",
];

/// Terms that pull the sentiment score down by one each.
pub const NEGATIVE_TERMS: &[&str] = &[
    // English
    "worst",
    "bad",
    "poor",
    "avoid",
    "issues",
    "problems",
    "complaint",
    "disappointing",
    "unreliable",
    "overpriced",
    "mediocre",
    "inferior",
    "controversial",
    "criticized",
    "scandal",
    // Swedish
    "dålig",
    "undvik",
    "problem",
    "opålitlig",
    "dyr",
    "kritiserad",
];

/// Phrases that mark a mention as a recommendation.
pub const RECOMMENDATION_PHRASES: &[&str] = &[
    "recommend",
    "best",
    "top pick",
    "suggest",
    "ideal",
    "perfect for",
    "rekommenderar",
    "bäst",
];

/// Phrases that mark a mention as part of a comparison.
pub const COMPARISON_PHRASES: &[&str] = &[
    "compared",
    "versus",
    "alternative",
    "competitor",
    "unlike",
    "similar to",
    "jämfört",
    "alternativ",
];

/// Count how many terms of `lexicon` appear in `window` (each term counts once).
pub fn count_hits(window: &str, lexicon: &[&str]) -> usize {
    lexicon.iter().filter(|term| window.contains(*term)).count()
}

/// Whether any term of `lexicon` appears in `window`.
pub fn any_hit(window: &str, lexicon: &[&str]) -> bool {
    lexicon.iter().any(|term| window.contains(term))
}
