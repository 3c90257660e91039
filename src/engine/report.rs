use crate::domain::{
    CurrencyId, CurrencyRegistry, Decimal, MarketIndex, Maturity, PortfolioSnapshot,
    INTERNAL_DECIMALS,
};
use crate::error::ValuationError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    lookup::min_market_index,
    net_position::{classify, idiosyncratic_maturities, maturity_exposures, net_fcash},
    MaturityExposure, NetPosition,
};

/// Everything the engine derives from one portfolio snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationReport {
    pub currency_id: CurrencyId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub block_time: u64,
    pub exposures: Vec<MaturityExposure>,
    #[serde(with = "crate::domain::amount")]
    pub net_fcash: i128,
    /// `net_fcash` in whole currency units. Absent past 96 bits of mantissa.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_fcash_units: Option<Decimal>,
    pub classification: NetPosition,
    pub idiosyncratic_maturities: Vec<Maturity>,
    /// First market far enough from maturity to trade into.
    pub min_market_index: Option<MarketIndex>,
}

impl ValuationReport {
    pub fn build(
        snapshot: &PortfolioSnapshot,
        registry: &CurrencyRegistry,
        min_time_to_maturity: u64,
    ) -> Result<Self, ValuationError> {
        let portfolio = snapshot.portfolio()?;
        let markets = &snapshot.markets;

        let net = net_fcash(&portfolio, markets)?;
        let net_fcash_units = Decimal::from_scaled(net, INTERNAL_DECIMALS);
        if net_fcash_units.is_none() {
            debug!(net_fcash = %net, "net fCash too wide for unit conversion");
        }

        Ok(Self {
            currency_id: snapshot.currency_id,
            symbol: registry
                .by_id(snapshot.currency_id)
                .map(|c| c.symbol.clone()),
            block_time: snapshot.block_time,
            exposures: maturity_exposures(&portfolio, markets)?,
            net_fcash: net,
            net_fcash_units,
            classification: classify(net),
            idiosyncratic_maturities: idiosyncratic_maturities(&portfolio, markets),
            min_market_index: min_market_index(markets, snapshot.block_time, min_time_to_maturity),
        })
    }

    pub fn is_idiosyncratic(&self) -> bool {
        !self.idiosyncratic_maturities.is_empty()
    }
}
