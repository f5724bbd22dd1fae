//! Maps raw provider records onto the canonical [`FundDetails`] shape.
//!
//! Provider records nest analytics under `returns`, `ratings` and
//! `riskMetrics`; everything optional is tolerated. Only the identity
//! fields (`id`, `name`) are required.

use fund_core::{AnalysisError, FundDetails, FundHolding, ManagerRef, SectorAllocation};
use serde::Deserialize;

/// Response body for `GET /funds/{id}`: either `{ "data": <fund> }` or the
/// fund record at the top level.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FundResponse {
    Wrapped { data: RawFundRecord },
    Direct(RawFundRecord),
}

impl FundResponse {
    pub fn into_record(self) -> RawFundRecord {
        match self {
            FundResponse::Wrapped { data } => data,
            FundResponse::Direct(record) => record,
        }
    }
}

/// A fund record as the provider reports it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFundRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub fund_house: Option<String>,
    pub aum: Option<f64>,
    #[serde(default)]
    pub returns: Option<RawReturns>,
    #[serde(default)]
    pub ratings: Option<RawRatings>,
    #[serde(default)]
    pub risk_metrics: Option<RawRiskMetrics>,
    pub risk_level: Option<String>,
    pub expense_ratio: Option<f64>,
    pub min_investment: Option<f64>,
    #[serde(rename = "minSIP")]
    pub min_sip: Option<f64>,
    pub exit_load: Option<String>,
    #[serde(default)]
    pub fund_manager: ManagerRef,
    pub portfolio_turnover: Option<f64>,
    #[serde(default)]
    pub top_holdings: Option<Vec<FundHolding>>,
    #[serde(default)]
    pub holdings: Option<Vec<FundHolding>>,
    #[serde(default)]
    pub sector_allocation: Vec<SectorAllocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReturns {
    pub one_year: Option<f64>,
    pub three_year: Option<f64>,
    pub five_year: Option<f64>,
    pub since_inception: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRatings {
    pub morningstar: Option<f64>,
    pub crisil: Option<f64>,
    pub value_research: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRiskMetrics {
    pub volatility: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
}

/// Normalize a raw record into [`FundDetails`].
///
/// Holdings fall back from `topHoldings` to `holdings` to empty; a fund
/// with no holdings is valid. Fails only on missing identity fields.
pub fn normalize(raw: RawFundRecord) -> Result<FundDetails, AnalysisError> {
    let id = raw
        .id
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AnalysisError::MalformedRecord("missing fund id".to_string()))?;
    let name = raw
        .name
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AnalysisError::MalformedRecord(format!("fund {}: missing name", id)))?;

    let returns = raw.returns.unwrap_or_default();
    let ratings = raw.ratings.unwrap_or_default();
    let risk = raw.risk_metrics.unwrap_or_default();

    let top_holdings = raw.top_holdings.or(raw.holdings).unwrap_or_default();

    Ok(FundDetails {
        id,
        name,
        category: raw.category,
        fund_house: raw.fund_house,
        rating: ratings
            .morningstar
            .or(ratings.crisil)
            .or(ratings.value_research),
        aum: raw.aum,
        returns_1y: returns.one_year,
        returns_3y: returns.three_year,
        returns_5y: returns.five_year,
        returns_since_inception: returns.since_inception,
        risk_level: raw.risk_level,
        volatility: risk.volatility,
        sharpe_ratio: risk.sharpe_ratio,
        alpha: risk.alpha,
        beta: risk.beta,
        expense_ratio: raw.expense_ratio,
        min_investment: raw.min_investment,
        min_sip: raw.min_sip,
        exit_load: raw.exit_load,
        fund_manager: raw.fund_manager,
        portfolio_turnover: raw.portfolio_turnover,
        top_holdings,
        sector_allocation: raw.sector_allocation,
    })
}
