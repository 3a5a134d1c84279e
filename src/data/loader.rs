//! Optional fund data file (JSON or YAML)

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

use super::fund::FundProduct;
use super::mock_funds::mock_funds;

/// Load the dataset: the given file if any, otherwise the built-in records
pub fn load_dataset(path: Option<&Path>) -> Result<Vec<FundProduct>> {
    match path {
        Some(path) => {
            let funds = load_funds(path)?;
            info!("Loaded {} funds from {}", funds.len(), path.display());
            Ok(funds)
        }
        None => Ok(mock_funds()),
    }
}

/// Read and validate a fund file. `.yaml`/`.yml` parse as YAML, anything else as JSON.
pub fn load_funds(path: &Path) -> Result<Vec<FundProduct>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read fund data {}", path.display()))?;

    let is_yaml = path
        .extension()
        .map_or(false, |ext| ext == "yaml" || ext == "yml");

    let funds: Vec<FundProduct> = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML fund data in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON fund data in {}", path.display()))?
    };

    validate(&funds)?;
    Ok(funds)
}

/// Reject records the dashboard cannot display meaningfully
pub fn validate(funds: &[FundProduct]) -> Result<()> {
    let mut ids = HashSet::new();
    for fund in funds {
        if !ids.insert(fund.id.as_str()) {
            bail!("Duplicate fund id {}", fund.id);
        }
        let numbers = [
            fund.nav_start,
            fund.nav_end,
            fund.stock_exposure_start,
            fund.stock_exposure_end,
            fund.futures_exposure_start,
            fund.futures_exposure_end,
            fund.aum,
            fund.sharpe,
            fund.ytd_return,
        ];
        if numbers.iter().any(|n| !n.is_finite()) {
            bail!("Fund {} has a non-finite value", fund.id);
        }
        if fund.nav_start <= 0.0 {
            bail!("Fund {} has non-positive navStart {}", fund.id, fund.nav_start);
        }
    }
    Ok(())
}
