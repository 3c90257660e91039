//! Mock protocol view for testing without a chain.

use super::{CashQuote, NTokenAccount, ProtocolError, ProtocolView};
use crate::domain::{CurrencyId, Market, MarketIndex, Portfolio};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

const BPS: i128 = 10_000;

/// One call to `cash_amount_given_fcash_amount`, as the mock saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteRequest {
    pub currency: CurrencyId,
    pub fcash: i128,
    pub market_index: MarketIndex,
    pub block_time: u64,
}

/// Mock protocol view serving predefined state.
///
/// fCash is priced at a flat discount: trading `fcash` exchanges
/// `-fcash * discount_bps / 10_000` cash, and charges `fee_bps` of the
/// notional as fees.
#[derive(Debug, Default)]
pub struct MockProtocolView {
    markets: HashMap<CurrencyId, Vec<Market>>,
    portfolios: HashMap<CurrencyId, Portfolio>,
    accounts: HashMap<CurrencyId, NTokenAccount>,
    discount_bps: HashMap<CurrencyId, i128>,
    fee_bps: i128,
    requests: Mutex<Vec<QuoteRequest>>,
}

impl MockProtocolView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_markets(mut self, currency: CurrencyId, markets: Vec<Market>) -> Self {
        self.markets.insert(currency, markets);
        self
    }

    pub fn with_ntoken_portfolio(mut self, currency: CurrencyId, portfolio: Portfolio) -> Self {
        self.portfolios.insert(currency, portfolio);
        self
    }

    pub fn with_ntoken_account(mut self, currency: CurrencyId, account: NTokenAccount) -> Self {
        self.accounts.insert(currency, account);
        self
    }

    /// Price fCash of `currency` at `discount_bps` of par (10_000 = par).
    pub fn with_discount_bps(mut self, currency: CurrencyId, discount_bps: i128) -> Self {
        self.discount_bps.insert(currency, discount_bps);
        self
    }

    pub fn with_fee_bps(mut self, fee_bps: i128) -> Self {
        self.fee_bps = fee_bps;
        self
    }

    /// Quote requests received so far, in call order.
    pub fn quote_requests(&self) -> Vec<QuoteRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ProtocolView for MockProtocolView {
    async fn active_markets(&self, currency: CurrencyId) -> Result<Vec<Market>, ProtocolError> {
        self.markets
            .get(&currency)
            .cloned()
            .ok_or(ProtocolError::NotFound(currency))
    }

    async fn ntoken_portfolio(&self, currency: CurrencyId) -> Result<Portfolio, ProtocolError> {
        self.portfolios
            .get(&currency)
            .cloned()
            .ok_or(ProtocolError::NotFound(currency))
    }

    async fn ntoken_account(&self, currency: CurrencyId) -> Result<NTokenAccount, ProtocolError> {
        self.accounts
            .get(&currency)
            .copied()
            .ok_or(ProtocolError::NotFound(currency))
    }

    async fn cash_amount_given_fcash_amount(
        &self,
        currency: CurrencyId,
        fcash: i128,
        market_index: MarketIndex,
        block_time: u64,
    ) -> Result<CashQuote, ProtocolError> {
        let markets = self
            .markets
            .get(&currency)
            .ok_or(ProtocolError::NotFound(currency))?;
        if market_index.offset() >= markets.len() {
            return Err(ProtocolError::Other(format!(
                "market index {} is not active",
                market_index
            )));
        }

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(QuoteRequest {
                currency,
                fcash,
                market_index,
                block_time,
            });
        }

        let discount_bps = self.discount_bps.get(&currency).copied().unwrap_or(BPS);
        let overflow = || ProtocolError::Other(format!("quote for {} fCash overflows", fcash));
        let cash = fcash
            .checked_neg()
            .and_then(|f| f.checked_mul(discount_bps))
            .ok_or_else(overflow)?
            / BPS;
        let fees_paid = fcash
            .checked_abs()
            .and_then(|f| f.checked_mul(self.fee_bps))
            .ok_or_else(overflow)?
            / BPS;

        Ok(CashQuote { cash, fees_paid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Maturity;

    fn dai() -> CurrencyId {
        CurrencyId::new(2)
    }

    fn markets() -> Vec<Market> {
        vec![
            Market::new(dai(), Maturity::new(100), 1, 1, 1),
            Market::new(dai(), Maturity::new(200), 1, 1, 1),
        ]
    }

    #[tokio::test]
    async fn test_mock_active_markets() {
        let mock = MockProtocolView::new().with_markets(dai(), markets());
        assert_eq!(mock.active_markets(dai()).await.unwrap().len(), 2);
        assert_eq!(
            mock.active_markets(CurrencyId::new(3)).await,
            Err(ProtocolError::NotFound(CurrencyId::new(3)))
        );
    }

    #[tokio::test]
    async fn test_mock_quote_discounts_and_records() {
        let mock = MockProtocolView::new()
            .with_markets(dai(), markets())
            .with_discount_bps(dai(), 9_500)
            .with_fee_bps(10);
        let index = MarketIndex::new(2).unwrap();

        let quote = mock
            .cash_amount_given_fcash_amount(dai(), -1_000_000, index, 50)
            .await
            .unwrap();
        assert_eq!(quote.cash, 950_000);
        assert_eq!(quote.fees_paid, 1_000);

        let requests = mock.quote_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].market_index, index);
        assert_eq!(requests[0].block_time, 50);
    }

    #[tokio::test]
    async fn test_mock_quote_rejects_inactive_market() {
        let mock = MockProtocolView::new().with_markets(dai(), markets());
        let result = mock
            .cash_amount_given_fcash_amount(dai(), 1, MarketIndex::new(3).unwrap(), 0)
            .await;
        assert!(matches!(result, Err(ProtocolError::Other(_))));
        assert!(mock.quote_requests().is_empty());
    }

    #[tokio::test]
    async fn test_mock_ntoken_state() {
        let account = NTokenAccount {
            total_supply: 1_000,
            cash_balance: 10,
        };
        let mock = MockProtocolView::new()
            .with_ntoken_account(dai(), account)
            .with_ntoken_portfolio(dai(), Portfolio::default());
        assert_eq!(mock.ntoken_account(dai()).await.unwrap(), account);
        assert!(mock.ntoken_portfolio(dai()).await.unwrap().is_empty());
    }
}
