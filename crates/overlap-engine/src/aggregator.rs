//! Cross-fund aggregation of holdings and sector allocations.

use std::collections::BTreeMap;

use fund_core::{CommonHolding, FundDetails, HoldingKeyNormalizer, SectorOverlap};

/// Display cut for the common-holdings list. The overlap metric always uses
/// the full filtered count, not the truncated one.
pub const DISPLAY_LIMIT: usize = 20;

/// Index every holding across the selection, keyed by normalized name.
///
/// The first fund to report a name supplies `ticker` and `sector`; later
/// funds only contribute their weight. A fund listing the same name twice
/// overwrites its own weight (last write wins).
pub fn index_holdings(
    funds: &[FundDetails],
    normalizer: &dyn HoldingKeyNormalizer,
) -> BTreeMap<String, CommonHolding> {
    let mut index: BTreeMap<String, CommonHolding> = BTreeMap::new();

    for fund in funds {
        for holding in &fund.top_holdings {
            let key = normalizer.key(&holding.name);
            let entry = index.entry(key).or_insert_with(|| CommonHolding {
                name: holding.name.clone(),
                ticker: holding.ticker.clone(),
                sector: holding.sector.clone(),
                fund_weights: BTreeMap::new(),
                avg_weight: 0.0,
            });
            entry
                .fund_weights
                .insert(fund.id.clone(), holding.percentage);
        }
    }

    index
}

/// Keep holdings held by at least two funds, fill in the average weight and
/// sort heaviest first.
pub fn filter_common_holdings(index: BTreeMap<String, CommonHolding>) -> Vec<CommonHolding> {
    let mut common: Vec<CommonHolding> = index
        .into_values()
        .filter(|h| h.fund_weights.len() >= 2)
        .map(|mut h| {
            h.avg_weight = mean(h.fund_weights.values());
            h
        })
        .collect();

    common.sort_by(|a, b| {
        b.avg_weight
            .partial_cmp(&a.avg_weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    common
}

/// Sector aggregation over `sector_allocation`, same ≥2-funds invariant.
///
/// Keys are the literal sector strings: case-sensitive, no trimming.
pub fn aggregate_sectors(funds: &[FundDetails]) -> Vec<SectorOverlap> {
    let mut index: BTreeMap<String, SectorOverlap> = BTreeMap::new();

    for fund in funds {
        for alloc in &fund.sector_allocation {
            let entry = index
                .entry(alloc.sector.clone())
                .or_insert_with(|| SectorOverlap {
                    sector: alloc.sector.clone(),
                    fund_allocations: BTreeMap::new(),
                    avg_allocation: 0.0,
                });
            entry
                .fund_allocations
                .insert(fund.id.clone(), alloc.percentage);
        }
    }

    let mut overlap: Vec<SectorOverlap> = index
        .into_values()
        .filter(|s| s.fund_allocations.len() >= 2)
        .map(|mut s| {
            s.avg_allocation = mean(s.fund_allocations.values());
            s
        })
        .collect();

    overlap.sort_by(|a, b| {
        b.avg_allocation
            .partial_cmp(&a.avg_allocation)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.sector.cmp(&b.sector))
    });
    overlap
}

/// Truncate the common-holdings list for display.
pub fn top_for_display(mut common: Vec<CommonHolding>) -> Vec<CommonHolding> {
    common.truncate(DISPLAY_LIMIT);
    common
}

fn mean<'a>(values: impl Iterator<Item = &'a f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fund_core::{ExactNormalizer, FundHolding, SectorAllocation};

    fn fund(id: &str, holdings: &[(&str, f64)]) -> FundDetails {
        FundDetails {
            id: id.to_string(),
            name: format!("{} Fund", id),
            top_holdings: holdings
                .iter()
                .map(|(name, pct)| FundHolding {
                    name: name.to_string(),
                    ticker: None,
                    percentage: *pct,
                    sector: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    fn common_for(funds: &[FundDetails]) -> Vec<CommonHolding> {
        filter_common_holdings(index_holdings(funds, &ExactNormalizer))
    }

    #[test]
    fn holding_in_one_fund_never_surfaces() {
        let funds = vec![
            fund("A", &[("HDFC Bank", 8.0), ("Lonely Corp", 2.0)]),
            fund("B", &[("HDFC Bank", 5.0)]),
        ];

        let common = common_for(&funds);
        assert_eq!(common.len(), 1);
        assert_eq!(common[0].name, "HDFC Bank");
    }

    #[test]
    fn case_insensitive_name_match_and_exact_mean() {
        let funds = vec![
            fund("A", &[("HDFC Bank", 8.0)]),
            fund("B", &[("hdfc bank", 5.0)]),
        ];

        let common = common_for(&funds);
        assert_eq!(common.len(), 1);
        assert_eq!(common[0].fund_weights.len(), 2);
        assert_relative_eq!(common[0].avg_weight, 6.5);
    }

    #[test]
    fn mean_is_order_independent() {
        let forward = common_for(&[
            fund("A", &[("Infosys", 3.0)]),
            fund("B", &[("Infosys", 5.0)]),
            fund("C", &[("Infosys", 10.0)]),
        ]);
        let reversed = common_for(&[
            fund("C", &[("Infosys", 10.0)]),
            fund("B", &[("Infosys", 5.0)]),
            fund("A", &[("Infosys", 3.0)]),
        ]);

        assert_relative_eq!(forward[0].avg_weight, 6.0);
        assert_relative_eq!(forward[0].avg_weight, reversed[0].avg_weight);
    }

    #[test]
    fn duplicate_name_within_a_fund_overwrites() {
        let funds = vec![
            fund("A", &[("TCS", 2.0), ("TCS", 4.0)]),
            fund("B", &[("TCS", 6.0)]),
        ];

        let common = common_for(&funds);
        assert_eq!(common[0].fund_weights["A"], 4.0);
        assert_relative_eq!(common[0].avg_weight, 5.0);
    }

    #[test]
    fn sorted_by_avg_weight_descending() {
        let funds = vec![
            fund("A", &[("Small", 1.0), ("Big", 9.0), ("Mid", 5.0)]),
            fund("B", &[("Small", 1.0), ("Big", 9.0), ("Mid", 5.0)]),
        ];

        let names: Vec<_> = common_for(&funds).into_iter().map(|h| h.name).collect();
        assert_eq!(names, vec!["Big", "Mid", "Small"]);
    }

    #[test]
    fn display_truncates_to_twenty() {
        let holdings: Vec<(String, f64)> = (0..25)
            .map(|i| (format!("Company {:02}", i), 1.0 + i as f64))
            .collect();
        let refs: Vec<(&str, f64)> = holdings.iter().map(|(n, p)| (n.as_str(), *p)).collect();

        let funds = vec![fund("A", &refs), fund("B", &refs)];
        let common = common_for(&funds);

        assert_eq!(common.len(), 25);
        assert_eq!(top_for_display(common).len(), DISPLAY_LIMIT);
    }

    #[test]
    fn sector_match_is_case_sensitive() {
        let mut a = fund("A", &[]);
        a.sector_allocation = vec![SectorAllocation {
            sector: "Financials".to_string(),
            percentage: 30.0,
        }];
        let mut b = fund("B", &[]);
        b.sector_allocation = vec![SectorAllocation {
            sector: "financials".to_string(),
            percentage: 25.0,
        }];

        assert!(aggregate_sectors(&[a, b]).is_empty());
    }

    #[test]
    fn shared_sectors_average_and_sort() {
        let mut a = fund("A", &[]);
        a.sector_allocation = vec![
            SectorAllocation {
                sector: "IT".to_string(),
                percentage: 20.0,
            },
            SectorAllocation {
                sector: "Financials".to_string(),
                percentage: 40.0,
            },
        ];
        let mut b = fund("B", &[]);
        b.sector_allocation = vec![
            SectorAllocation {
                sector: "IT".to_string(),
                percentage: 10.0,
            },
            SectorAllocation {
                sector: "Financials".to_string(),
                percentage: 30.0,
            },
        ];

        let sectors = aggregate_sectors(&[a, b]);
        assert_eq!(sectors.len(), 2);
        assert_eq!(sectors[0].sector, "Financials");
        assert_relative_eq!(sectors[0].avg_allocation, 35.0);
        assert_relative_eq!(sectors[1].avg_allocation, 15.0);
    }
}
