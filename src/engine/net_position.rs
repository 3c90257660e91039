use crate::domain::{Market, Maturity, Portfolio};
use crate::error::ValuationError;
use std::collections::BTreeSet;
use tracing::debug;

use super::{
    liquidity::decompose,
    lookup::{fcash_residual, market_index_for_maturity},
    mul_div_floor, MaturityExposure, NetPosition,
};

/// Aggregate live fCash exposure of a portfolio.
///
/// Each fCash position with an active market contributes its notional plus
/// the floored pool share of the liquidity token held at the same maturity.
/// fCash whose market has rolled off is a residual and is left out.
pub fn net_fcash(portfolio: &Portfolio, markets: &[Market]) -> Result<i128, ValuationError> {
    let mut total: i128 = 0;

    for fc in &portfolio.fcash {
        let Some(index) = market_index_for_maturity(markets, fc.maturity) else {
            debug!(
                maturity = %fc.maturity,
                notional = %fc.notional,
                "skipping fCash without an active market"
            );
            continue;
        };
        let market = &markets[index.offset()];

        let pool_share = match portfolio.liquidity_token_at(fc.maturity) {
            Some(lt) => mul_div_floor(
                market.total_fcash,
                lt.notional,
                market.total_liquidity_tokens,
            )?,
            None => 0,
        };

        total = total
            .checked_add(fc.notional)
            .and_then(|t| t.checked_add(pool_share))
            .ok_or_else(|| {
                ValuationError::Overflow(format!("net fCash at {}", fc.maturity))
            })?;
    }

    Ok(total)
}

pub fn classify(net_fcash: i128) -> NetPosition {
    NetPosition::from_net_fcash(net_fcash)
}

/// Classify a portfolio as a net lender, net borrower or neutral.
pub fn net_position(portfolio: &Portfolio, markets: &[Market]) -> Result<NetPosition, ValuationError> {
    net_fcash(portfolio, markets).map(classify)
}

/// Net fCash per active market the portfolio provides liquidity to.
///
/// Liquidity tokens whose market has rolled off are skipped. Output follows
/// the order of `portfolio.liquidity_tokens`.
pub fn maturity_exposures(
    portfolio: &Portfolio,
    markets: &[Market],
) -> Result<Vec<MaturityExposure>, ValuationError> {
    let mut exposures = Vec::with_capacity(portfolio.liquidity_tokens.len());

    for lt in &portfolio.liquidity_tokens {
        let Some(index) = market_index_for_maturity(markets, lt.maturity) else {
            debug!(maturity = %lt.maturity, "skipping liquidity token without an active market");
            continue;
        };
        let claim = decompose(lt, &markets[index.offset()])?;
        let residual_fcash = fcash_residual(&portfolio.fcash, lt.maturity);
        let net_fcash = claim.fcash.checked_add(residual_fcash).ok_or_else(|| {
            ValuationError::Overflow(format!("net fCash at {}", lt.maturity))
        })?;

        exposures.push(MaturityExposure {
            maturity: lt.maturity,
            market_index: index,
            fcash_claim: claim.fcash,
            asset_cash_claim: claim.asset_cash,
            residual_fcash,
            net_fcash,
        });
    }

    Ok(exposures)
}

/// Maturities held in the portfolio that no active market settles at.
///
/// A non-empty result means the account sits in the idiosyncratic window
/// between a market maturing and the next markets being initialized.
pub fn idiosyncratic_maturities(portfolio: &Portfolio, markets: &[Market]) -> Vec<Maturity> {
    let held = portfolio
        .liquidity_tokens
        .iter()
        .map(|lt| lt.maturity)
        .chain(portfolio.fcash.iter().map(|fc| fc.maturity));

    held.filter(|maturity| market_index_for_maturity(markets, *maturity).is_none())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
