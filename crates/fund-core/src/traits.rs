use crate::{AnalysisError, FundDetails};
use async_trait::async_trait;

/// Source of per-fund detail records.
///
/// Production uses the HTTP fund data client; tests inject an in-memory
/// provider.
#[async_trait]
pub trait FundDataProvider: Send + Sync {
    async fn fund_details(&self, fund_id: &str) -> Result<FundDetails, AnalysisError>;
}

/// Maps a holding's company name to its cross-fund aggregation key.
///
/// Holdings are matched by exact key equality, so the normalizer decides
/// which name variants collapse into one holding.
pub trait HoldingKeyNormalizer: Send + Sync {
    fn key(&self, name: &str) -> String;
}

/// Default normalizer: lowercase and trim, nothing else.
///
/// Names that differ in punctuation or abbreviation across providers will
/// not match; the recommendation logic assumes exactly this behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactNormalizer;

impl HoldingKeyNormalizer for ExactNormalizer {
    fn key(&self, name: &str) -> String {
        name.to_lowercase().trim().to_string()
    }
}
