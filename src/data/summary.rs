//! Aggregate metrics over the fund list

use super::fund::FundProduct;

/// Sum of assets under management
pub fn total_aum(funds: &[FundProduct]) -> f64 {
    // Start from +0.0 so an empty list renders as ¥0
    funds.iter().fold(0.0, |total, f| total + f.aum)
}

/// Arithmetic mean of Sharpe ratios, `None` for an empty list
pub fn average_sharpe(funds: &[FundProduct]) -> Option<f64> {
    if funds.is_empty() {
        return None;
    }
    let sum: f64 = funds.iter().map(|f| f.sharpe).sum();
    Some(sum / funds.len() as f64)
}

/// Fund with the highest YTD return. Ties keep the earlier record.
pub fn best_ytd_fund(funds: &[FundProduct]) -> Option<&FundProduct> {
    funds.iter().fold(None, |best: Option<&FundProduct>, current| match best {
        Some(prev) if prev.ytd_return >= current.ytd_return => Some(prev),
        _ => Some(current),
    })
}

/// Header statistics, recomputed from the dataset on each build
#[derive(Debug, Clone, PartialEq)]
pub struct FundSummary {
    pub total_aum: f64,
    pub product_count: usize,
    pub average_sharpe: Option<f64>,
    pub best_fund_name: Option<String>,
    pub best_fund_ytd: Option<f64>,
}

impl FundSummary {
    pub fn from_funds(funds: &[FundProduct]) -> Self {
        let best = best_ytd_fund(funds);
        Self {
            total_aum: total_aum(funds),
            product_count: funds.len(),
            average_sharpe: average_sharpe(funds),
            best_fund_name: best.map(|f| f.fund_name.clone()),
            best_fund_ytd: best.map(|f| f.ytd_return),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mock_funds::mock_funds;

    #[test]
    fn test_total_aum_matches_literal_sum() {
        let funds = mock_funds();
        let expected = 1_280_000_000.0
            + 860_000_000.0
            + 2_150_000_000.0
            + 1_560_000_000.0
            + 640_000_000.0
            + 1_020_000_000.0
            + 930_000_000.0
            + 480_000_000.0;
        assert_eq!(total_aum(&funds), expected);
    }

    #[test]
    fn test_average_sharpe() {
        let funds = mock_funds();
        let expected = (1.42 + 1.87 + 2.05 + 0.93 + 1.21 + 2.31 + 0.88 + 1.64) / 8.0;
        let avg = average_sharpe(&funds).unwrap();
        assert!((avg - expected).abs() < 1e-12);
    }

    #[test]
    fn test_best_fund() {
        let funds = mock_funds();
        let best = best_ytd_fund(&funds).unwrap();
        assert_eq!(best.id, "FND-004");
        assert!(funds.iter().all(|f| f.ytd_return <= best.ytd_return));
    }

    #[test]
    fn test_best_fund_tie_keeps_first() {
        let mut funds = mock_funds();
        funds[6].ytd_return = funds[3].ytd_return;
        let best = best_ytd_fund(&funds).unwrap();
        assert_eq!(best.id, "FND-004");

        funds.swap(3, 6);
        let best = best_ytd_fund(&funds).unwrap();
        assert_eq!(best.id, "FND-007");
    }

    #[test]
    fn test_empty_dataset() {
        assert_eq!(total_aum(&[]), 0.0);
        assert!(total_aum(&[]).is_sign_positive());
        assert_eq!(average_sharpe(&[]), None);
        assert!(best_ytd_fund(&[]).is_none());

        let summary = FundSummary::from_funds(&[]);
        assert_eq!(summary.product_count, 0);
        assert!(summary.best_fund_name.is_none());
    }

    #[test]
    fn test_summary_from_mock() {
        let summary = FundSummary::from_funds(&mock_funds());
        assert_eq!(summary.product_count, 8);
        assert_eq!(summary.best_fund_name.as_deref(), Some("沪深300指数增强"));
        assert_eq!(summary.best_fund_ytd, Some(0.1326));
    }
}
