//! Point-in-time capture of the inputs one valuation needs.

use crate::domain::{CurrencyId, Market, Portfolio, PortfolioAsset};
use crate::error::ValuationError;
use serde::{Deserialize, Serialize};

/// Markets and portfolio of one account in one currency at one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub currency_id: CurrencyId,
    /// Block timestamp the snapshot was taken at, in seconds.
    pub block_time: u64,
    /// Active markets, ascending by maturity.
    pub markets: Vec<Market>,
    pub assets: Vec<PortfolioAsset>,
}

impl PortfolioSnapshot {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Portfolio assets of this snapshot's currency, split by asset type.
    pub fn portfolio(&self) -> Result<Portfolio, ValuationError> {
        let assets: Vec<PortfolioAsset> = self
            .assets
            .iter()
            .filter(|a| a.currency_id == self.currency_id)
            .cloned()
            .collect();
        Portfolio::from_assets(&assets)
    }
}
