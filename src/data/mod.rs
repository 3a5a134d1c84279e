//! Fund dataset, record types and aggregate metrics

pub mod fund;
pub mod loader;
pub mod mock_funds;
pub mod summary;

pub use fund::{FundProduct, Strategy};
pub use summary::FundSummary;
