//! Content recommendations derived from a brand's analyses.
//!
//! Rules are evaluated in a fixed order and each contributes at most one
//! recommendation; the local-search advice is always emitted last.

use serde::{Deserialize, Serialize};

use super::analyzer::MentionAnalysis;
use crate::models::Market;

const LOW_MENTION_RATE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Content,
    Pr,
    Seo,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub action_items: Vec<String>,
}

impl Recommendation {
    fn new(
        kind: RecommendationKind,
        priority: Priority,
        title: &str,
        description: String,
        action_items: &[&str],
    ) -> Self {
        Self {
            kind,
            priority,
            title: title.to_string(),
            description,
            action_items: action_items.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn localized<T>(market: Market, en: T, se: T) -> T {
    match market {
        Market::En => en,
        Market::Se => se,
    }
}

pub fn generate_recommendations(
    brand_name: &str,
    analyses: &[MentionAnalysis],
    competitors: &[String],
    market: Market,
) -> Vec<Recommendation> {
    let total = analyses.len().max(1) as f64;
    let mentioned = analyses.iter().filter(|a| a.mentioned).count();
    let mention_rate = mentioned as f64 / total;
    let avg_sentiment = analyses.iter().map(|a| a.sentiment_score).sum::<f64>() / total;
    let absent = analyses.len() - mentioned;

    let mut recs = Vec::new();

    if mention_rate < LOW_MENTION_RATE {
        let pct = (mention_rate * 100.0).round() as u32;
        recs.push(Recommendation::new(
            RecommendationKind::Content,
            Priority::High,
            localized(market, "Increase AI response visibility", "Öka synligheten i AI-svar"),
            localized(
                market,
                format!(
                    "{} is only mentioned in {}% of AI responses. Create more authoritative content.",
                    brand_name, pct
                ),
                format!(
                    "{} nämns bara i {}% av AI-svaren. Skapa mer auktoritativt innehåll.",
                    brand_name, pct
                ),
            ),
            localized(
                market,
                &[
                    "Publish comparison articles with competitors",
                    "Create FAQ pages AI models can reference",
                    "Build backlinks from industry authority sites",
                ],
                &[
                    "Publicera jämförelseartiklar med konkurrenter",
                    "Skapa FAQ-sidor som AI kan citera",
                    "Bygg upp backlinks från branschsidor",
                ],
            ),
        ));
    }

    if avg_sentiment < 0.0 {
        recs.push(Recommendation::new(
            RecommendationKind::Pr,
            Priority::High,
            localized(market, "Improve brand sentiment", "Förbättra sentimentet"),
            localized(
                market,
                format!(
                    "Negative sentiment detected around {}. Focus on reputation management.",
                    brand_name
                ),
                format!(
                    "Negativ ton detekterad kring {}. Arbeta med rykteshantering.",
                    brand_name
                ),
            ),
            localized(
                market,
                &[
                    "Address negative reviews professionally",
                    "Publish customer success stories and case studies",
                    "Reach out to industry media for positive coverage",
                ],
                &[
                    "Svara på negativa omdömen professionellt",
                    "Publicera kundcase och framgångshistorier",
                    "Kontakta branschmedia för positiv press",
                ],
            ),
        ));
    }

    if absent > 0 {
        recs.push(Recommendation::new(
            RecommendationKind::Seo,
            Priority::Medium,
            localized(market, "Cover all AI platforms", "Täck alla AI-plattformar"),
            localized(
                market,
                format!(
                    "{} is missing from {} AI platform(s). Optimize structured data.",
                    brand_name, absent
                ),
                format!(
                    "{} saknas i {} AI-plattform(ar). Optimera strukturerad data.",
                    brand_name, absent
                ),
            ),
            localized(
                market,
                &[
                    "Implement Schema.org markup on key pages",
                    "Optimize meta descriptions for AI readability",
                    "Ensure Wikipedia/Wikidata entries are accurate",
                ],
                &[
                    "Implementera Schema.org markup",
                    "Optimera meta-beskrivningar för AI-läsbarhet",
                    "Säkerställ att Wikipedia/Wikidata har korrekt info",
                ],
            ),
        ));
    }

    if !competitors.is_empty() {
        let named = competitors
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        recs.push(Recommendation::new(
            RecommendationKind::Content,
            Priority::Medium,
            localized(market, "Competitive gap analysis", "Konkurrensanalys-gap"),
            localized(
                market,
                format!(
                    "Analyze how competitors like {} are positioned in AI responses.",
                    named
                ),
                format!(
                    "Analysera hur konkurrenter som {} positioneras i AI-svar.",
                    named
                ),
            ),
            localized(
                market,
                &[
                    "Create \"X vs Y\" comparison content",
                    "Publish \"best alternatives\" guides",
                    "Position yourself in listicle-format content",
                ],
                &[
                    "Skapa \"X vs Y\" jämförelseinnehåll",
                    "Publicera \"bästa alternativ\"-guider",
                    "Positionera er i listicle-format",
                ],
            ),
        ));
    }

    recs.push(Recommendation::new(
        RecommendationKind::Local,
        localized(market, Priority::Low, Priority::High),
        localized(market, "Local SEO for AI visibility", "Lokal SEO för AI-synlighet"),
        localized(
            market,
            "Optimize for local AI search results and regional queries.".to_string(),
            "Optimera för svenska AI-sökningar och lokala resultat.".to_string(),
        ),
        localized(
            market,
            &[
                "Optimize Google Business Profile",
                "Create localized content with regional keywords",
                "Register on local business directories",
            ],
            &[
                "Optimera Google Business Profile",
                "Skapa svenskspråkigt innehåll med lokala nyckelord",
                "Registrera er på svenska branschkataloger",
            ],
        ),
    ));

    recs
}
