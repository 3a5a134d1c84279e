//! Built-in fund dataset

use chrono::NaiveDate;

use super::fund::{FundProduct, Strategy};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn fund(
    id: &str,
    fund_name: &str,
    ticker: &str,
    manager: &str,
    strategy: Strategy,
    inception_date: NaiveDate,
    nav: (f64, f64),
    stock_exposure: (f64, f64),
    futures_exposure: (f64, f64),
    aum: f64,
    sharpe: f64,
    ytd_return: f64,
) -> FundProduct {
    FundProduct {
        id: id.to_string(),
        fund_name: fund_name.to_string(),
        ticker: ticker.to_string(),
        manager: manager.to_string(),
        strategy,
        inception_date,
        nav_start: nav.0,
        nav_end: nav.1,
        stock_exposure_start: stock_exposure.0,
        stock_exposure_end: stock_exposure.1,
        futures_exposure_start: futures_exposure.0,
        futures_exposure_end: futures_exposure.1,
        aum,
        sharpe,
        ytd_return,
    }
}

/// The eight mock products shown when no data file is configured
pub fn mock_funds() -> Vec<FundProduct> {
    vec![
        fund(
            "FND-001",
            "稳健多资产配置一号",
            "SF0001",
            "王晓东",
            Strategy::MultiAsset,
            date(2018, 3, 15),
            (1.482, 1.563),
            (45.0, 52.0),
            (8.0, 6.0),
            1_280_000_000.0,
            1.42,
            0.0815,
        ),
        fund(
            "FND-002",
            "量化对冲精选",
            "QH0102",
            "李明哲",
            Strategy::QuantHedge,
            date(2019, 7, 1),
            (1.215, 1.274),
            (62.0, 58.0),
            (-55.0, -52.0),
            860_000_000.0,
            1.87,
            0.0642,
        ),
        fund(
            "FND-003",
            "固收增强稳利",
            "FI2031",
            "陈静怡",
            Strategy::FixedIncomePlus,
            date(2017, 11, 20),
            (1.103, 1.128),
            (12.0, 15.0),
            (0.0, 0.0),
            2_150_000_000.0,
            2.05,
            0.0387,
        ),
        fund(
            "FND-004",
            "沪深300指数增强",
            "IE3000",
            "张海涛",
            Strategy::IndexEnhanced,
            date(2020, 1, 8),
            (0.986, 1.094),
            (92.0, 95.0),
            (5.0, 3.0),
            1_560_000_000.0,
            0.93,
            0.1326,
        ),
        fund(
            "FND-005",
            "多策略全天候",
            "SF0005",
            "赵若琳",
            Strategy::MultiAsset,
            date(2021, 5, 12),
            (1.052, 1.087),
            (38.0, 41.0),
            (12.0, 15.0),
            640_000_000.0,
            1.21,
            0.0574,
        ),
        fund(
            "FND-006",
            "市场中性阿尔法",
            "QH0218",
            "孙浩然",
            Strategy::QuantHedge,
            date(2019, 10, 25),
            (1.337, 1.362),
            (75.0, 78.0),
            (-74.0, -77.0),
            1_020_000_000.0,
            2.31,
            0.0452,
        ),
        fund(
            "FND-007",
            "中证500指数增强",
            "IE5000",
            "周文博",
            Strategy::IndexEnhanced,
            date(2020, 9, 16),
            (1.148, 1.271),
            (94.0, 96.0),
            (4.0, 2.0),
            930_000_000.0,
            0.88,
            0.1178,
        ),
        fund(
            "FND-008",
            "可转债固收+",
            "FI2088",
            "吴佳琪",
            Strategy::FixedIncomePlus,
            date(2022, 2, 28),
            (1.018, 1.049),
            (18.0, 22.0),
            (0.0, 2.0),
            480_000_000.0,
            1.64,
            0.0296,
        ),
    ]
}
