use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::analysis::analyzer::MentionAnalysis;
use crate::analysis::recommendations::Recommendation;
use crate::providers::types::{ProviderId, ProviderQueryOutcome};

/// Market the query targets; selects the prompt language and the
/// recommendation texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    #[default]
    En,
    Se,
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Market::En => write!(f, "en"),
            Market::Se => write!(f, "se"),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn default_include_competitors() -> bool {
    true
}

/// A visibility query as submitted by a caller.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalysisRequest {
    /// The question sent to every provider.
    #[validate(length(min = 1, max = 500), custom(function = "not_blank"))]
    pub query: String,
    /// The subject brand.
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub brand_name: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub competitors: Vec<String>,
    #[serde(default)]
    pub market: Market,
    /// Restricts the fan-out to these providers when present.
    #[serde(default)]
    pub providers: Option<Vec<ProviderId>>,
    #[serde(default = "default_include_competitors")]
    pub include_competitors: bool,
}

impl AnalysisRequest {
    pub fn new(query: impl Into<String>, brand_name: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            brand_name: brand_name.into(),
            competitors: Vec::new(),
            market: Market::default(),
            providers: None,
            include_competitors: true,
        }
    }

    pub fn with_competitors<I, S>(mut self, competitors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.competitors = competitors.into_iter().map(Into::into).collect();
        self
    }

    /// Trims the brand and competitor names and drops blank competitors.
    pub fn normalized(mut self) -> Self {
        self.brand_name = self.brand_name.trim().to_string();
        self.competitors = self
            .competitors
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        self
    }
}

/// One provider outcome together with the analyses derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAnalysisResult {
    #[serde(flatten)]
    pub outcome: ProviderQueryOutcome,
    pub brand_analysis: MentionAnalysis,
    /// One entry per competitor, in request order.
    pub competitor_analyses: Vec<MentionAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorScore {
    pub name: String,
    pub score: u8,
}

/// Everything produced for one [`AnalysisRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryReport {
    pub id: Uuid,
    pub query: String,
    pub brand_name: String,
    pub market: Market,
    pub provider_results: Vec<ProviderAnalysisResult>,
    pub visibility_score: u8,
    pub competitor_scores: Vec<CompetitorScore>,
    pub total_mentions: usize,
    pub brand_mentioned: bool,
    pub providers_queried: usize,
    pub recommendations: Vec<Recommendation>,
    pub timestamp: DateTime<Utc>,
}
