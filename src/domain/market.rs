//! Active market state as returned by the protocol's views.

use crate::domain::{CurrencyId, Maturity};
use serde::{Deserialize, Serialize};

/// One active fCash market for a currency.
///
/// Integer fields are serialized as strings since they routinely exceed the
/// range JSON numbers can carry losslessly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    pub currency_id: CurrencyId,
    pub maturity: Maturity,
    /// Total fCash held by the pool.
    #[serde(with = "crate::domain::amount")]
    pub total_fcash: i128,
    /// Total asset cash held by the pool.
    #[serde(with = "crate::domain::amount")]
    pub total_asset_cash: i128,
    /// Liquidity tokens outstanding against this pool.
    #[serde(with = "crate::domain::amount")]
    pub total_liquidity_tokens: i128,
    #[serde(default)]
    pub last_implied_rate: u32,
    #[serde(default)]
    pub oracle_rate: u32,
    #[serde(default)]
    pub previous_trade_time: u64,
}

impl Market {
    /// Market with the pool totals set and rate fields zeroed.
    pub fn new(
        currency_id: CurrencyId,
        maturity: Maturity,
        total_fcash: i128,
        total_asset_cash: i128,
        total_liquidity_tokens: i128,
    ) -> Self {
        Self {
            currency_id,
            maturity,
            total_fcash,
            total_asset_cash,
            total_liquidity_tokens,
            last_implied_rate: 0,
            oracle_rate: 0,
            previous_trade_time: 0,
        }
    }

    pub fn has_liquidity(&self) -> bool {
        self.total_liquidity_tokens != 0
    }
}
