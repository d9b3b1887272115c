//! Request-level orchestration: validate, fan out, analyze, score.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::analysis::analyzer::{analyze_mention, MentionAnalysis};
use crate::analysis::recommendations::generate_recommendations;
use crate::analysis::visibility::visibility_score;
use crate::error::AppError;
use crate::models::{
    AnalysisRequest, CompetitorScore, Market, ProviderAnalysisResult, QueryReport,
};
use crate::providers::coordinator::ProviderCoordinator;

const BRAND_INSTRUCTION: &str = "Provide a comprehensive answer. Mention specific brands, \
companies, and products by name when relevant. Be factual and include comparisons if applicable.";

/// Wraps the user's query with the market instruction and the request to
/// name brands explicitly.
pub fn build_prompt(query: &str, market: Market) -> String {
    let market_context = match market {
        Market::En => "Answer in English. Focus on the international market.",
        Market::Se => "Svara på svenska. Fokusera på den svenska marknaden.",
    };
    format!("{}\n\n{}\n\n{}", query.trim(), market_context, BRAND_INSTRUCTION)
}

pub struct VisibilityEngine {
    coordinator: Arc<ProviderCoordinator>,
}

impl VisibilityEngine {
    pub fn new(coordinator: Arc<ProviderCoordinator>) -> Self {
        Self { coordinator }
    }

    pub fn coordinator(&self) -> &ProviderCoordinator {
        &self.coordinator
    }

    /// Runs one visibility query end to end.
    ///
    /// Fails with [`AppError::Validation`] on malformed input and with
    /// [`AppError::ServiceUnavailable`] when no provider is configured.
    /// Provider failures never fail the run; they show up in the report.
    #[instrument(skip(self, request), fields(brand = %request.brand_name, market = %request.market))]
    pub async fn run(&self, request: AnalysisRequest) -> Result<QueryReport, AppError> {
        request.validate()?;
        let request = request.normalized();

        if self.coordinator.available().is_empty() {
            warn!("Rejecting query: no providers configured");
            return Err(AppError::ServiceUnavailable(
                "No AI providers configured".to_string(),
            ));
        }

        let prompt = build_prompt(&request.query, request.market);
        let outcomes = self
            .coordinator
            .query_all(&prompt, request.providers.as_deref())
            .await;

        let mut tracked_names = Vec::with_capacity(request.competitors.len() + 1);
        tracked_names.push(request.brand_name.clone());
        tracked_names.extend(request.competitors.iter().cloned());

        let provider_results: Vec<ProviderAnalysisResult> = outcomes
            .into_iter()
            .map(|outcome| {
                let brand_analysis = analyze_mention(&outcome, &request.brand_name, &tracked_names);
                let competitor_analyses = if request.include_competitors {
                    request
                        .competitors
                        .iter()
                        .map(|c| analyze_mention(&outcome, c, &tracked_names))
                        .collect()
                } else {
                    Vec::new()
                };
                ProviderAnalysisResult {
                    outcome,
                    brand_analysis,
                    competitor_analyses,
                }
            })
            .collect();

        let brand_analyses: Vec<MentionAnalysis> = provider_results
            .iter()
            .map(|r| r.brand_analysis.clone())
            .collect();
        let visibility = visibility_score(&brand_analyses);

        let competitor_scores = if request.include_competitors {
            request
                .competitors
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let analyses: Vec<MentionAnalysis> = provider_results
                        .iter()
                        .filter_map(|r| r.competitor_analyses.get(i).cloned())
                        .collect();
                    CompetitorScore {
                        name: name.clone(),
                        score: visibility_score(&analyses),
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        let recommendations = generate_recommendations(
            &request.brand_name,
            &brand_analyses,
            &request.competitors,
            request.market,
        );

        let total_mentions = brand_analyses.iter().map(|a| a.mention_count).sum();
        let brand_mentioned = brand_analyses.iter().any(|a| a.mentioned);
        let providers_queried = provider_results.len();

        info!(
            visibility_score = visibility,
            total_mentions,
            providers_queried,
            "Visibility query complete"
        );

        Ok(QueryReport {
            id: Uuid::new_v4(),
            query: request.query,
            brand_name: request.brand_name,
            market: request.market,
            provider_results,
            visibility_score: visibility,
            competitor_scores,
            total_mentions,
            brand_mentioned,
            providers_queried,
            recommendations,
            timestamp: Utc::now(),
        })
    }
}
