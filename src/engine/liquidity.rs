use crate::domain::{LiquidityTokenPosition, Market};
use crate::error::ValuationError;
use tracing::debug;

use super::{lookup::market_index_for_maturity, mul_div_trunc, LiquidityTokenClaim};

/// Split a liquidity token into the fCash and asset cash it redeems for.
///
/// Both claims are the position's pro-rata share of the pool, truncated
/// toward zero the same way the protocol computes them on chain.
///
/// # Errors
/// `MaturityMismatch` if the token does not belong to `market`,
/// `DivisionByZero` if the market has no liquidity tokens outstanding.
pub fn decompose(
    position: &LiquidityTokenPosition,
    market: &Market,
) -> Result<LiquidityTokenClaim, ValuationError> {
    if position.maturity != market.maturity {
        return Err(ValuationError::MaturityMismatch {
            position: position.maturity,
            market: market.maturity,
        });
    }
    if !market.has_liquidity() {
        return Err(ValuationError::DivisionByZero(format!(
            "market {} has no liquidity tokens",
            market.maturity
        )));
    }

    Ok(LiquidityTokenClaim {
        fcash: mul_div_trunc(
            market.total_fcash,
            position.notional,
            market.total_liquidity_tokens,
        )?,
        asset_cash: mul_div_trunc(
            market.total_asset_cash,
            position.notional,
            market.total_liquidity_tokens,
        )?,
    })
}

/// Decompose a liquidity token against whichever active market shares its
/// maturity. Returns `Ok(None)` once that market has rolled off.
pub fn value_liquidity_token(
    position: &LiquidityTokenPosition,
    markets: &[Market],
) -> Result<Option<LiquidityTokenClaim>, ValuationError> {
    let Some(index) = market_index_for_maturity(markets, position.maturity) else {
        debug!(maturity = %position.maturity, "liquidity token has no active market");
        return Ok(None);
    };
    decompose(position, &markets[index.offset()]).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CurrencyId, MarketIndex, Maturity};

    fn market(maturity: u64, fcash: i128, cash: i128, tokens: i128) -> Market {
        Market::new(CurrencyId::new(2), Maturity::new(maturity), fcash, cash, tokens)
    }

    fn lt(maturity: u64, notional: i128) -> LiquidityTokenPosition {
        LiquidityTokenPosition {
            currency_id: CurrencyId::new(2),
            maturity: Maturity::new(maturity),
            market_index: MarketIndex::new(1).unwrap(),
            notional,
        }
    }

    #[test]
    fn test_decompose_pro_rata() {
        let claim = decompose(&lt(100, 10_000), &market(100, 1_000_000, 500_000, 100_000)).unwrap();
        assert_eq!(
            claim,
            LiquidityTokenClaim {
                fcash: 100_000,
                asset_cash: 50_000
            }
        );
    }

    #[test]
    fn test_decompose_truncates() {
        // 10 * 1 / 3 = 3.33 and -10 * 1 / 3 = -3.33
        let claim = decompose(&lt(100, 1), &market(100, -10, 10, 3)).unwrap();
        assert_eq!(claim.fcash, -3);
        assert_eq!(claim.asset_cash, 3);
    }

    #[test]
    fn test_decompose_zero_supply() {
        let result = decompose(&lt(100, 1), &market(100, 10, 10, 0));
        assert!(matches!(result, Err(ValuationError::DivisionByZero(_))));
    }

    #[test]
    fn test_decompose_wrong_market() {
        let result = decompose(&lt(100, 1), &market(200, 10, 10, 10));
        assert_eq!(
            result,
            Err(ValuationError::MaturityMismatch {
                position: Maturity::new(100),
                market: Maturity::new(200),
            })
        );
    }

    #[test]
    fn test_value_liquidity_token_resolves_by_maturity() {
        let markets = vec![market(100, 10, 10, 10), market(200, 1_000, 400, 100)];
        let claim = value_liquidity_token(&lt(200, 10), &markets).unwrap();
        assert_eq!(
            claim,
            Some(LiquidityTokenClaim {
                fcash: 100,
                asset_cash: 40
            })
        );

        assert_eq!(value_liquidity_token(&lt(300, 10), &markets).unwrap(), None);
    }
}
