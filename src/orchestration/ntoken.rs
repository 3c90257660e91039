use crate::domain::{CurrencyId, MarketIndex, Maturity};
use crate::engine::{self, mul_div_trunc, NetPosition};
use crate::error::ValuationError;
use crate::protocol::ProtocolView;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use super::OrchestrationError;

/// What redeeming an nToken share yields from one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRedemption {
    pub maturity: Maturity,
    pub market_index: MarketIndex,
    /// Share of the pool's net fCash that gets sold on redemption.
    #[serde(with = "crate::domain::amount")]
    pub net_fcash_share: i128,
    #[serde(with = "crate::domain::amount")]
    pub asset_cash_share: i128,
    /// Cash the protocol pays for selling `net_fcash_share`.
    #[serde(with = "crate::domain::amount")]
    pub fcash_sale_cash: i128,
}

/// Estimated asset cash for redeeming `n_tokens` nTokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionEstimate {
    pub currency_id: CurrencyId,
    #[serde(with = "crate::domain::amount")]
    pub n_tokens: i128,
    #[serde(with = "crate::domain::amount")]
    pub cash_balance_share: i128,
    pub markets: Vec<MarketRedemption>,
    #[serde(with = "crate::domain::amount")]
    pub total_asset_cash: i128,
}

/// Values a currency's nToken through the protocol's views.
#[derive(Debug, Clone)]
pub struct NTokenValuer {
    view: Arc<dyn ProtocolView>,
}

impl NTokenValuer {
    pub fn new(view: Arc<dyn ProtocolView>) -> Self {
        Self { view }
    }

    /// Whether the nToken is currently a net lender or borrower of fCash.
    pub async fn net_state(&self, currency: CurrencyId) -> Result<NetPosition, OrchestrationError> {
        let markets = self.view.active_markets(currency).await?;
        let portfolio = self.view.ntoken_portfolio(currency).await?;

        let net = engine::net_fcash(&portfolio, &markets)?;
        let state = engine::classify(net);
        info!(currency = %currency, net_fcash = %net, state = %state, "nToken net state");
        Ok(state)
    }

    /// Estimate the asset cash received for redeeming `n_tokens` at `block_time`.
    ///
    /// Each market contributes the holder's share of pool asset cash plus the
    /// proceeds of selling its share of the pool's net fCash back to that
    /// market. The holder's share of the nToken's idle cash balance is added
    /// on top.
    pub async fn redemption_value(
        &self,
        currency: CurrencyId,
        n_tokens: i128,
        block_time: u64,
    ) -> Result<RedemptionEstimate, OrchestrationError> {
        let account = self.view.ntoken_account(currency).await?;
        if account.total_supply == 0 {
            return Err(ValuationError::DivisionByZero(format!(
                "nToken for currency {} has no supply",
                currency
            ))
            .into());
        }
        let markets = self.view.active_markets(currency).await?;
        let portfolio = self.view.ntoken_portfolio(currency).await?;

        let share = |amount: i128| mul_div_trunc(n_tokens, amount, account.total_supply);
        let cash_balance_share = share(account.cash_balance)?;
        let mut total_asset_cash = cash_balance_share;
        let mut redemptions = Vec::new();

        for exposure in engine::maturity_exposures(&portfolio, &markets)? {
            let net_fcash_share = share(exposure.net_fcash)?;
            let asset_cash_share = share(exposure.asset_cash_claim)?;

            let fcash_sale_cash = if net_fcash_share != 0 {
                self.view
                    .cash_amount_given_fcash_amount(
                        currency,
                        -net_fcash_share,
                        exposure.market_index,
                        block_time,
                    )
                    .await?
                    .cash
            } else {
                0
            };
            debug!(
                maturity = %exposure.maturity,
                net_fcash_share = %net_fcash_share,
                fcash_sale_cash = %fcash_sale_cash,
                "market redemption"
            );

            total_asset_cash = total_asset_cash
                .checked_add(fcash_sale_cash)
                .and_then(|t| t.checked_add(asset_cash_share))
                .ok_or_else(|| {
                    ValuationError::Overflow(format!("redemption total at {}", exposure.maturity))
                })?;

            redemptions.push(MarketRedemption {
                maturity: exposure.maturity,
                market_index: exposure.market_index,
                net_fcash_share,
                asset_cash_share,
                fcash_sale_cash,
            });
        }

        info!(
            currency = %currency,
            n_tokens = %n_tokens,
            total_asset_cash = %total_asset_cash,
            "nToken redemption estimate"
        );

        Ok(RedemptionEstimate {
            currency_id: currency,
            n_tokens,
            cash_balance_share,
            markets: redemptions,
            total_asset_cash,
        })
    }
}
