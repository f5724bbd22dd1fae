//! Rule-based recommendation composer.
//!
//! Turns the computed metrics plus data-quality flags into one verdict
//! string. First matching branch wins; the tiered messages always carry
//! fund count, overlap percentage, common-holdings count and
//! diversification score.

use fund_core::{CommonHolding, FundDetails};

const COMMODITY_MARKERS: [&str; 3] = ["commodity", "gold", "silver"];

/// Compose the report's verdict string.
pub fn compose(
    funds: &[FundDetails],
    common_holdings: &[CommonHolding],
    overlap_percentage: u32,
    diversification_score: u32,
) -> String {
    let has_commodity = funds.iter().any(is_commodity_fund);
    let has_placeholder = funds.iter().any(has_placeholder_holdings);

    if has_commodity && common_holdings.is_empty() {
        return format!(
            "Your selection includes commodity or gold funds, which invest in \
             physical assets rather than listed equities, so a 0% holdings \
             overlap is expected here. For a meaningful overlap analysis, \
             compare the {} equity funds in your selection against each other \
             instead.",
            funds.len()
        );
    }

    if has_placeholder && common_holdings.is_empty() {
        return "The data provider returned placeholder holdings for at least one \
                selected fund, so holdings overlap cannot be computed \
                meaningfully. Re-run the analysis once real portfolio data is \
                available for every fund."
            .to_string();
    }

    let mut verdict = tier_message(
        funds.len(),
        overlap_percentage,
        common_holdings.len(),
        diversification_score,
    );

    if has_placeholder {
        verdict.push_str(
            " Note: at least one fund reports placeholder holdings data, so \
             treat the overlap figures with caution.",
        );
    }

    verdict
}

fn tier_message(
    fund_count: usize,
    overlap: u32,
    common_count: usize,
    diversification: u32,
) -> String {
    if overlap < 20 {
        format!(
            "Excellent diversification! Your {} funds share only {} common \
             holdings with {}% overlap. Diversification score: {}/100.",
            fund_count, common_count, overlap, diversification
        )
    } else if overlap < 35 {
        format!(
            "Good diversification. Your {} funds share {} common holdings with \
             {}% overlap. Diversification score: {}/100.",
            fund_count, common_count, overlap, diversification
        )
    } else if overlap < 50 {
        format!(
            "Moderate overlap detected: your {} funds share {} common holdings \
             with {}% overlap (diversification score {}/100). Consider \
             replacing one of the overlapping funds to reduce redundancy.",
            fund_count, common_count, overlap, diversification
        )
    } else {
        format!(
            "High overlap alert! Your {} funds share {} common holdings with \
             {}% overlap (diversification score {}/100). This concentration \
             adds risk; consider keeping 2-3 funds with distinct investment \
             styles.",
            fund_count, common_count, overlap, diversification
        )
    }
}

fn is_commodity_fund(fund: &FundDetails) -> bool {
    let name = fund.name.to_lowercase();
    let category = fund
        .category
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();
    COMMODITY_MARKERS
        .iter()
        .any(|marker| name.contains(marker) || category.contains(marker))
}

/// Placeholder holdings from the upstream provider look like
/// `name: "Stock 1"` with `ticker: "STOCK1"`.
fn has_placeholder_holdings(fund: &FundDetails) -> bool {
    fund.top_holdings.iter().any(|h| {
        let name_matches = h.name.to_lowercase().starts_with("stock ");
        let ticker_matches = h
            .ticker
            .as_deref()
            .and_then(|t| t.strip_prefix("STOCK"))
            .map(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
            .unwrap_or(false);
        name_matches && ticker_matches
    })
}
