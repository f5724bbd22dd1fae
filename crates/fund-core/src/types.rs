use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single portfolio position reported by a fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundHolding {
    pub name: String,
    #[serde(default)]
    pub ticker: Option<String>,
    pub percentage: f64,
    #[serde(default)]
    pub sector: Option<String>,
}

/// One sector slice of a fund's portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAllocation {
    pub sector: String,
    pub percentage: f64,
}

/// Fund manager reference.
///
/// The provider reports this field as a plain string, a `{"name": …}`
/// object, or not at all. This is the single place that union is resolved;
/// everything downstream reads [`ManagerRef::name`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ManagerRef {
    #[default]
    Unknown,
    Named(String),
}

impl ManagerRef {
    pub fn name(&self) -> Option<&str> {
        match self {
            ManagerRef::Named(name) => Some(name),
            ManagerRef::Unknown => None,
        }
    }
}

impl Serialize for ManagerRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ManagerRef::Named(name) => serializer.serialize_str(name),
            ManagerRef::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for ManagerRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Plain(String),
            Object { name: String },
        }

        Ok(match Option::<Repr>::deserialize(deserializer)? {
            Some(Repr::Plain(name)) | Some(Repr::Object { name }) if !name.trim().is_empty() => {
                ManagerRef::Named(name)
            }
            _ => ManagerRef::Unknown,
        })
    }
}

/// Canonical view of one fund for analysis purposes.
///
/// Built fresh per analysis request from the provider response, immutable
/// afterwards. Empty `top_holdings` is a valid state (commodity and gold
/// funds hold no equities), never an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundDetails {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub fund_house: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub aum: Option<f64>,
    #[serde(default, rename = "returns1Y")]
    pub returns_1y: Option<f64>,
    #[serde(default, rename = "returns3Y")]
    pub returns_3y: Option<f64>,
    #[serde(default, rename = "returns5Y")]
    pub returns_5y: Option<f64>,
    #[serde(default)]
    pub returns_since_inception: Option<f64>,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub volatility: Option<f64>,
    #[serde(default)]
    pub sharpe_ratio: Option<f64>,
    #[serde(default)]
    pub alpha: Option<f64>,
    #[serde(default)]
    pub beta: Option<f64>,
    #[serde(default)]
    pub expense_ratio: Option<f64>,
    #[serde(default)]
    pub min_investment: Option<f64>,
    #[serde(default, rename = "minSIP")]
    pub min_sip: Option<f64>,
    #[serde(default)]
    pub exit_load: Option<String>,
    #[serde(default)]
    pub fund_manager: ManagerRef,
    #[serde(default)]
    pub portfolio_turnover: Option<f64>,
    #[serde(default)]
    pub top_holdings: Vec<FundHolding>,
    #[serde(default)]
    pub sector_allocation: Vec<SectorAllocation>,
}

/// A holding shared by at least two of the analyzed funds.
///
/// `ticker` and `sector` come from whichever fund's holding was indexed
/// first; they are not re-validated across funds. `avg_weight` is the
/// arithmetic mean of `fund_weights`, computed after the two-fund filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonHolding {
    pub name: String,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    /// Fund id -> weight percentage, only for funds that hold this name.
    pub fund_weights: BTreeMap<String, f64>,
    pub avg_weight: f64,
}

/// A sector present in at least two funds' allocations. Same shape and
/// invariant as [`CommonHolding`], keyed by the literal sector string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorOverlap {
    pub sector: String,
    /// Fund id -> allocation percentage.
    pub fund_allocations: BTreeMap<String, f64>,
    pub avg_allocation: f64,
}

/// Advisory shared-characteristic messages; never feed the overlap score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSimilarities {
    pub same_fund_manager: Vec<String>,
    pub similar_risk_level: Vec<String>,
    pub similar_category: Vec<String>,
}

/// The overlap analysis report, consumed as-is by the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapResult {
    /// Every fund that went into the analysis.
    pub funds: Vec<FundDetails>,
    /// Ratio of shared holdings to average per-fund holding count, as a
    /// rounded percentage. Deliberately not clamped; can exceed 100.
    pub overlap_percentage: u32,
    /// Shared holdings sorted by average weight descending, truncated to
    /// the display limit.
    pub common_holdings: Vec<CommonHolding>,
    /// Shared sectors sorted by average allocation descending.
    pub sector_overlap: Vec<SectorOverlap>,
    /// `100 - overlap_percentage`, floored at 0.
    pub diversification_score: u32,
    pub recommendation: String,
    pub similarities: FundSimilarities,
}
