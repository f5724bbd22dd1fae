//! Overlap percentage and diversification score.

use fund_core::FundDetails;

/// Compute `(overlap_percentage, diversification_score)` for a selection.
///
/// Overlap is the ratio of shared holdings to the average per-fund holding
/// count, rounded to a whole percentage. A zero-holdings fund still counts
/// toward the average, which inflates the ratio for the rest; that matches
/// the product's defined behavior. The value is not clamped and can exceed
/// 100 when funds hold very short lists.
///
/// If every fund reports zero holdings the overlap is 0, never a division
/// by zero.
pub fn overlap_metrics(funds: &[FundDetails], common_count: usize) -> (u32, u32) {
    let total_holdings: usize = funds.iter().map(|f| f.top_holdings.len()).sum();

    if funds.is_empty() || total_holdings == 0 {
        return (0, 100);
    }

    let avg_per_fund = total_holdings as f64 / funds.len() as f64;
    let overlap = (common_count as f64 / avg_per_fund * 100.0).round() as u32;
    let diversification = 100u32.saturating_sub(overlap);

    (overlap, diversification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fund_core::FundHolding;

    fn fund_with_holdings(id: &str, count: usize) -> FundDetails {
        FundDetails {
            id: id.to_string(),
            name: format!("{} Fund", id),
            top_holdings: (0..count)
                .map(|i| FundHolding {
                    name: format!("{}-{}", id, i),
                    ticker: None,
                    percentage: 1.0,
                    sector: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn full_overlap_is_one_hundred() {
        // Two funds, two holdings each, both shared.
        let funds = vec![fund_with_holdings("A", 2), fund_with_holdings("B", 2)];
        let (overlap, score) = overlap_metrics(&funds, 2);

        assert_eq!(overlap, 100);
        assert_eq!(score, 0);
    }

    #[test]
    fn disjoint_selection_scores_full_marks() {
        let funds = vec![fund_with_holdings("A", 3), fund_with_holdings("B", 3)];
        let (overlap, score) = overlap_metrics(&funds, 0);

        assert_eq!(overlap, 0);
        assert_eq!(score, 100);
    }

    #[test]
    fn zero_holdings_everywhere_is_not_an_error() {
        let funds = vec![fund_with_holdings("A", 0), fund_with_holdings("B", 0)];
        let (overlap, score) = overlap_metrics(&funds, 0);

        assert_eq!(overlap, 0);
        assert_eq!(score, 100);
    }

    #[test]
    fn zero_holdings_fund_inflates_the_ratio() {
        // Two funds share two holdings; a third fund reports none. The empty
        // fund drags the average down to 4/3, pushing overlap past 100.
        let funds = vec![
            fund_with_holdings("A", 2),
            fund_with_holdings("B", 2),
            fund_with_holdings("C", 0),
        ];
        let (overlap, score) = overlap_metrics(&funds, 2);

        assert_eq!(overlap, 150);
        assert_eq!(score, 0);
    }

    #[test]
    fn overlap_and_score_are_complements_up_to_one_hundred() {
        for common in 0..=4usize {
            let funds = vec![fund_with_holdings("A", 4), fund_with_holdings("B", 4)];
            let (overlap, score) = overlap_metrics(&funds, common);
            if overlap <= 100 {
                assert_eq!(overlap + score, 100);
            } else {
                assert_eq!(score, 0);
            }
        }
    }

    #[test]
    fn rounds_to_nearest_whole_percent() {
        // 1 common / (7/2 avg) = 28.57… -> 29
        let funds = vec![fund_with_holdings("A", 3), fund_with_holdings("B", 4)];
        let (overlap, _) = overlap_metrics(&funds, 1);
        assert_eq!(overlap, 29);
    }
}
