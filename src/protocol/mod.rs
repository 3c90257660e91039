//! Read-only view of the lending protocol.
//!
//! Present-value math lives behind this boundary: the engine never prices
//! fCash itself, it asks the protocol what a trade would pay.

use crate::domain::{CurrencyId, Market, MarketIndex, Portfolio};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod mock;

pub use mock::MockProtocolView;

/// Balances of a currency's nToken account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NTokenAccount {
    #[serde(with = "crate::domain::amount")]
    pub total_supply: i128,
    /// Asset cash held by the nToken outside of any market.
    #[serde(with = "crate::domain::amount")]
    pub cash_balance: i128,
}

/// Result of pricing an fCash trade against a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CashQuote {
    /// Signed cash the account receives (positive) or pays (negative).
    #[serde(with = "crate::domain::amount")]
    pub cash: i128,
    #[serde(with = "crate::domain::amount")]
    pub fees_paid: i128,
}

/// Protocol view calls the valuation layer depends on.
#[async_trait]
pub trait ProtocolView: Send + Sync + fmt::Debug {
    /// Active markets for a currency, ascending by maturity.
    async fn active_markets(&self, currency: CurrencyId) -> Result<Vec<Market>, ProtocolError>;

    /// Liquidity tokens and fCash held by the currency's nToken.
    async fn ntoken_portfolio(&self, currency: CurrencyId) -> Result<Portfolio, ProtocolError>;

    async fn ntoken_account(&self, currency: CurrencyId) -> Result<NTokenAccount, ProtocolError>;

    /// Cash exchanged for trading `fcash` in the given market at `block_time`.
    ///
    /// Negative `fcash` sells fCash (the account receives cash).
    async fn cash_amount_given_fcash_amount(
        &self,
        currency: CurrencyId,
        fcash: i128,
        market_index: MarketIndex,
        block_time: u64,
    ) -> Result<CashQuote, ProtocolError>;
}

/// Error type for protocol view calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The view could not be reached (node down, call reverted).
    Unavailable(String),
    /// Nothing is listed for the requested currency.
    NotFound(CurrencyId),
    Other(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Unavailable(msg) => write!(f, "Protocol unavailable: {}", msg),
            ProtocolError::NotFound(currency) => write!(f, "Currency {} not listed", currency),
            ProtocolError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for ProtocolError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_display() {
        let err = ProtocolError::Unavailable("call reverted".to_string());
        assert_eq!(err.to_string(), "Protocol unavailable: call reverted");

        let err = ProtocolError::NotFound(CurrencyId::new(9));
        assert_eq!(err.to_string(), "Currency 9 not listed");

        let err = ProtocolError::Other("boom".to_string());
        assert_eq!(err.to_string(), "Error: boom");
    }

    #[test]
    fn test_cash_quote_json() {
        let quote = CashQuote {
            cash: 1_234,
            fees_paid: 5,
        };
        let json = serde_json::to_value(quote).unwrap();
        assert_eq!(json, serde_json::json!({"cash": "1234", "fees_paid": "5"}));
    }
}
