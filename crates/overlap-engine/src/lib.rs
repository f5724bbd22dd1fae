//! Portfolio overlap & diversification analysis.
//!
//! Given a selection of 2-5 funds, fetches their details concurrently and
//! computes cross-fund holding overlap, sector concentration, a
//! diversification score and a qualitative recommendation. Everything after
//! the fetch is pure, synchronous computation; the engine holds no state
//! between invocations.

use std::sync::Arc;

use fund_core::{
    AnalysisError, ExactNormalizer, FundDataProvider, FundDetails, HoldingKeyNormalizer,
    OverlapResult,
};
use fund_data_client::FundDataClient;
use futures_util::future::join_all;

pub mod aggregator;
pub mod metrics;
pub mod recommendation;
pub mod similarity;

/// Bounds on the analyzed selection, enforced at the entry point.
pub const MIN_FUNDS: usize = 2;
pub const MAX_FUNDS: usize = 5;

pub struct OverlapAnalyzer {
    provider: Arc<dyn FundDataProvider>,
    normalizer: Box<dyn HoldingKeyNormalizer>,
}

impl OverlapAnalyzer {
    pub fn new(provider: Arc<dyn FundDataProvider>) -> Self {
        Self {
            provider,
            normalizer: Box::new(ExactNormalizer),
        }
    }

    /// Analyzer backed by the HTTP fund data provider at `base_url`.
    pub fn from_base_url(base_url: impl Into<String>) -> Self {
        Self::new(Arc::new(FundDataClient::new(base_url)))
    }

    /// Swap in a different holding-name normalizer (the default matches
    /// names by lowercased, trimmed equality only).
    pub fn with_normalizer(mut self, normalizer: Box<dyn HoldingKeyNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Analyze a selection of fund ids.
    ///
    /// All fund details are fetched concurrently and joined all-or-nothing:
    /// if any fetch fails, the analysis fails with a single error naming
    /// every fund id that could not be retrieved. No partial reports.
    pub async fn analyze(&self, fund_ids: &[String]) -> Result<OverlapResult, AnalysisError> {
        if fund_ids.len() < MIN_FUNDS || fund_ids.len() > MAX_FUNDS {
            return Err(AnalysisError::InvalidInput(format!(
                "expected between {} and {} funds, got {}",
                MIN_FUNDS,
                MAX_FUNDS,
                fund_ids.len()
            )));
        }

        tracing::info!("Starting overlap analysis for {} funds", fund_ids.len());

        let fetches = fund_ids.iter().map(|id| self.provider.fund_details(id));
        let results = join_all(fetches).await;

        let mut funds = Vec::with_capacity(fund_ids.len());
        let mut failed_ids = Vec::new();
        let mut failures = Vec::new();
        for (id, result) in fund_ids.iter().zip(results) {
            match result {
                Ok(fund) => funds.push(fund),
                Err(e) => {
                    tracing::warn!("Failed to fetch fund {}: {}", id, e);
                    failed_ids.push(id.clone());
                    failures.push(e.to_string());
                }
            }
        }

        if !failed_ids.is_empty() {
            return Err(AnalysisError::FetchFailure {
                fund_ids: failed_ids,
                message: failures.join("; "),
            });
        }

        Ok(self.build_report(funds))
    }

    /// Assemble the report from already-fetched fund details.
    ///
    /// Pure and deterministic: identical inputs produce an identical report.
    pub fn build_report(&self, funds: Vec<FundDetails>) -> OverlapResult {
        let index = aggregator::index_holdings(&funds, self.normalizer.as_ref());
        let common_holdings = aggregator::filter_common_holdings(index);
        let sector_overlap = aggregator::aggregate_sectors(&funds);

        let (overlap_percentage, diversification_score) =
            metrics::overlap_metrics(&funds, common_holdings.len());

        let similarities = similarity::detect_similarities(&funds);

        let recommendation = recommendation::compose(
            &funds,
            &common_holdings,
            overlap_percentage,
            diversification_score,
        );

        tracing::debug!(
            "Overlap analysis done: {} common holdings, {}% overlap, score {}",
            common_holdings.len(),
            overlap_percentage,
            diversification_score
        );

        OverlapResult {
            overlap_percentage,
            common_holdings: aggregator::top_for_display(common_holdings),
            sector_overlap,
            diversification_score,
            recommendation,
            similarities,
            funds,
        }
    }
}
