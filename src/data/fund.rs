//! Fund record type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Strategy tag - closed set of four
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "多资产")]
    MultiAsset,
    #[serde(rename = "量化对冲")]
    QuantHedge,
    #[serde(rename = "固收+")]
    FixedIncomePlus,
    #[serde(rename = "指数增强")]
    IndexEnhanced,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::MultiAsset,
        Strategy::QuantHedge,
        Strategy::FixedIncomePlus,
        Strategy::IndexEnhanced,
    ];

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Self::MultiAsset => "多资产",
            Self::QuantHedge => "量化对冲",
            Self::FixedIncomePlus => "固收+",
            Self::IndexEnhanced => "指数增强",
        }
    }
}

/// One fund product row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundProduct {
    pub id: String,
    pub fund_name: String,
    pub ticker: String,
    pub manager: String,
    pub strategy: Strategy,
    pub inception_date: NaiveDate,
    pub nav_start: f64,
    pub nav_end: f64,
    /// Percent, 0-100
    pub stock_exposure_start: f64,
    pub stock_exposure_end: f64,
    pub futures_exposure_start: f64,
    pub futures_exposure_end: f64,
    /// CNY
    pub aum: f64,
    pub sharpe: f64,
    /// Fraction, 0.1 = 10%
    pub ytd_return: f64,
}

impl FundProduct {
    /// Return over the displayed period: navEnd / navStart - 1
    pub fn period_return(&self) -> f64 {
        self.nav_end / self.nav_start - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mock_funds::mock_funds;

    #[test]
    fn test_period_return() {
        let fund = &mock_funds()[0];
        let expected = fund.nav_end / fund.nav_start - 1.0;
        assert!((fund.period_return() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_strategy_serializes_to_label() {
        for strategy in Strategy::ALL {
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{}\"", strategy.label()));
        }
    }

    #[test]
    fn test_camel_case_shape() {
        let json = serde_json::to_value(&mock_funds()[0]).unwrap();
        assert!(json.get("fundName").is_some());
        assert!(json.get("navStart").is_some());
        assert!(json.get("futuresExposureEnd").is_some());
        assert_eq!(json["inceptionDate"].as_str().map(|s| s.len()), Some(10));
    }
}
