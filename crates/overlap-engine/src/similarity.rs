//! Shared-characteristic detection across a fund selection.
//!
//! Purely advisory: the groupings surface warnings in the report but never
//! feed the overlap score.

use std::collections::BTreeMap;

use fund_core::{FundDetails, FundSimilarities};

const UNKNOWN_RISK: &str = "Unknown";

/// Group funds by manager, risk level and category; emit a message for
/// every group of two or more.
pub fn detect_similarities(funds: &[FundDetails]) -> FundSimilarities {
    let mut by_manager: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    let mut by_risk: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    let mut by_category: BTreeMap<String, Vec<&str>> = BTreeMap::new();

    for fund in funds {
        if let Some(manager) = fund.fund_manager.name() {
            by_manager
                .entry(manager.to_string())
                .or_default()
                .push(&fund.name);
        }
        let risk = fund.risk_level.as_deref().unwrap_or(UNKNOWN_RISK);
        by_risk.entry(risk.to_string()).or_default().push(&fund.name);
        if let Some(category) = &fund.category {
            by_category
                .entry(category.clone())
                .or_default()
                .push(&fund.name);
        }
    }

    FundSimilarities {
        same_fund_manager: by_manager
            .into_iter()
            .filter(|(_, names)| names.len() >= 2)
            .map(|(manager, names)| format!("{} manages: {}", manager, names.join(", ")))
            .collect(),
        similar_risk_level: by_risk
            .into_iter()
            .filter(|(risk, names)| risk != UNKNOWN_RISK && names.len() >= 2)
            .map(|(risk, names)| format!("{} risk: {}", risk, names.join(", ")))
            .collect(),
        similar_category: by_category
            .into_iter()
            .filter(|(_, names)| names.len() >= 2)
            .map(|(category, names)| format!("{}: {}", category, names.join(", ")))
            .collect(),
    }
}
