//! Portfolio positions: liquidity tokens and fCash.

use crate::domain::{AssetType, CurrencyId, MarketIndex, Maturity};
use crate::error::ValuationError;
use serde::{Deserialize, Serialize};

/// A claim on a proportional share of one market's pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityTokenPosition {
    pub currency_id: CurrencyId,
    pub maturity: Maturity,
    /// Market the token was minted in, taken from its asset type.
    pub market_index: MarketIndex,
    #[serde(with = "crate::domain::amount")]
    pub notional: i128,
}

/// A signed fixed-cash claim at one maturity.
///
/// Positive notional is lending (cash receivable), negative is borrowing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedCashPosition {
    pub currency_id: CurrencyId,
    pub maturity: Maturity,
    #[serde(with = "crate::domain::amount")]
    pub notional: i128,
}

/// A raw portfolio entry in the protocol's encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioAsset {
    pub currency_id: CurrencyId,
    pub maturity: Maturity,
    pub asset_type: u8,
    #[serde(with = "crate::domain::amount")]
    pub notional: i128,
}

impl PortfolioAsset {
    pub fn liquidity_token(position: &LiquidityTokenPosition) -> Self {
        Self {
            currency_id: position.currency_id,
            maturity: position.maturity,
            asset_type: AssetType::LiquidityToken(position.market_index).code(),
            notional: position.notional,
        }
    }

    pub fn fcash(position: &FixedCashPosition) -> Self {
        Self {
            currency_id: position.currency_id,
            maturity: position.maturity,
            asset_type: AssetType::FCASH_CODE,
            notional: position.notional,
        }
    }
}

/// Liquidity token and fCash holdings of one account in one currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub liquidity_tokens: Vec<LiquidityTokenPosition>,
    pub fcash: Vec<FixedCashPosition>,
}

impl Portfolio {
    pub fn new(
        liquidity_tokens: Vec<LiquidityTokenPosition>,
        fcash: Vec<FixedCashPosition>,
    ) -> Self {
        Self {
            liquidity_tokens,
            fcash,
        }
    }

    /// Split raw protocol assets by asset type, preserving their order.
    ///
    /// # Errors
    /// Returns `UnknownAssetType` for codes outside `1..=8`.
    pub fn from_assets(assets: &[PortfolioAsset]) -> Result<Self, ValuationError> {
        let mut portfolio = Portfolio::default();
        for asset in assets {
            match AssetType::from_code(asset.asset_type) {
                Some(AssetType::FCash) => portfolio.fcash.push(FixedCashPosition {
                    currency_id: asset.currency_id,
                    maturity: asset.maturity,
                    notional: asset.notional,
                }),
                Some(AssetType::LiquidityToken(market_index)) => {
                    portfolio.liquidity_tokens.push(LiquidityTokenPosition {
                        currency_id: asset.currency_id,
                        maturity: asset.maturity,
                        market_index,
                        notional: asset.notional,
                    })
                }
                None => return Err(ValuationError::UnknownAssetType(asset.asset_type)),
            }
        }
        Ok(portfolio)
    }

    /// Liquidity token held at a maturity, if any.
    pub fn liquidity_token_at(&self, maturity: Maturity) -> Option<&LiquidityTokenPosition> {
        self.liquidity_tokens
            .iter()
            .find(|lt| lt.maturity == maturity)
    }

    pub fn is_empty(&self) -> bool {
        self.liquidity_tokens.is_empty() && self.fcash.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(maturity: u64, asset_type: u8, notional: i128) -> PortfolioAsset {
        PortfolioAsset {
            currency_id: CurrencyId::new(2),
            maturity: Maturity::new(maturity),
            asset_type,
            notional,
        }
    }

    #[test]
    fn test_from_assets_splits_by_type() {
        let assets = vec![
            asset(100, 2, 5_000),
            asset(100, 1, -40),
            asset(200, 3, 7_000),
            asset(200, 1, 12),
        ];

        let portfolio = Portfolio::from_assets(&assets).unwrap();
        assert_eq!(portfolio.liquidity_tokens.len(), 2);
        assert_eq!(portfolio.fcash.len(), 2);
        assert_eq!(
            portfolio.liquidity_tokens[1].market_index,
            MarketIndex::new(2).unwrap()
        );
        assert_eq!(portfolio.fcash[0].notional, -40);
    }

    #[test]
    fn test_from_assets_rejects_unknown_type() {
        let assets = vec![asset(100, 9, 1)];
        assert_eq!(
            Portfolio::from_assets(&assets),
            Err(ValuationError::UnknownAssetType(9))
        );
    }

    #[test]
    fn test_liquidity_token_at() {
        let portfolio = Portfolio::from_assets(&[asset(100, 2, 5_000)]).unwrap();
        assert_eq!(
            portfolio
                .liquidity_token_at(Maturity::new(100))
                .map(|lt| lt.notional),
            Some(5_000)
        );
        assert!(portfolio.liquidity_token_at(Maturity::new(200)).is_none());
    }

    #[test]
    fn test_asset_encoding_roundtrip() {
        let lt = LiquidityTokenPosition {
            currency_id: CurrencyId::new(1),
            maturity: Maturity::new(300),
            market_index: MarketIndex::new(3).unwrap(),
            notional: 99,
        };
        let encoded = PortfolioAsset::liquidity_token(&lt);
        assert_eq!(encoded.asset_type, 4);

        let portfolio = Portfolio::from_assets(&[encoded]).unwrap();
        assert_eq!(portfolio.liquidity_tokens, vec![lt]);
    }
}
