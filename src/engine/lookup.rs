use crate::domain::{FixedCashPosition, Market, MarketIndex, Maturity};

/// Signed fCash held outright at `maturity`, zero if there is none.
pub fn fcash_residual(fcash: &[FixedCashPosition], maturity: Maturity) -> i128 {
    fcash
        .iter()
        .find(|fc| fc.maturity == maturity)
        .map(|fc| fc.notional)
        .unwrap_or(0)
}

/// Index of the active market settling at `maturity`.
///
/// `None` means the market has matured and rolled since the position was
/// opened. `markets` must already be sorted by maturity. Only the first 7
/// entries are addressable; a match past that is also `None`.
pub fn market_index_for_maturity(markets: &[Market], maturity: Maturity) -> Option<MarketIndex> {
    markets
        .iter()
        .position(|m| m.maturity == maturity)
        .and_then(MarketIndex::from_offset)
}

/// First market with at least `min_time_to_maturity` seconds left at `now`.
pub fn min_market_index(
    markets: &[Market],
    now: u64,
    min_time_to_maturity: u64,
) -> Option<MarketIndex> {
    markets
        .iter()
        .position(|m| m.maturity.time_to_maturity(now) >= i128::from(min_time_to_maturity))
        .and_then(MarketIndex::from_offset)
}
