//! Pure computation engine for portfolio valuation.

use crate::domain::{MarketIndex, Maturity};
use crate::error::ValuationError;
use serde::{Deserialize, Serialize};

pub mod liquidity;
pub mod lookup;
pub mod net_position;
pub mod report;

pub use liquidity::{decompose, value_liquidity_token};
pub use lookup::{fcash_residual, market_index_for_maturity, min_market_index};
pub use net_position::{
    classify, idiosyncratic_maturities, maturity_exposures, net_fcash, net_position,
};
pub use report::ValuationReport;

/// What a liquidity token redeems for right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LiquidityTokenClaim {
    #[serde(with = "crate::domain::amount")]
    pub fcash: i128,
    #[serde(with = "crate::domain::amount")]
    pub asset_cash: i128,
}

impl std::ops::Add for LiquidityTokenClaim {
    type Output = LiquidityTokenClaim;

    fn add(self, rhs: LiquidityTokenClaim) -> LiquidityTokenClaim {
        LiquidityTokenClaim {
            fcash: self.fcash + rhs.fcash,
            asset_cash: self.asset_cash + rhs.asset_cash,
        }
    }
}

/// Net fCash held at one active market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaturityExposure {
    pub maturity: Maturity,
    pub market_index: MarketIndex,
    #[serde(with = "crate::domain::amount")]
    pub fcash_claim: i128,
    #[serde(with = "crate::domain::amount")]
    pub asset_cash_claim: i128,
    /// fCash held outright at this maturity.
    #[serde(with = "crate::domain::amount")]
    pub residual_fcash: i128,
    /// `fcash_claim + residual_fcash`.
    #[serde(with = "crate::domain::amount")]
    pub net_fcash: i128,
}

/// Which side of a rate move an account's aggregate fCash benefits from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetPosition {
    /// Net long fCash.
    Lender,
    /// Net short fCash.
    Borrower,
    Neutral,
}

impl NetPosition {
    pub fn from_net_fcash(net_fcash: i128) -> Self {
        match net_fcash.signum() {
            1 => NetPosition::Lender,
            -1 => NetPosition::Borrower,
            _ => NetPosition::Neutral,
        }
    }
}

impl std::fmt::Display for NetPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetPosition::Lender => write!(f, "lender"),
            NetPosition::Borrower => write!(f, "borrower"),
            NetPosition::Neutral => write!(f, "neutral"),
        }
    }
}

/// `a * b / denominator`, truncating toward zero.
pub(crate) fn mul_div_trunc(a: i128, b: i128, denominator: i128) -> Result<i128, ValuationError> {
    let (quotient, _) = mul_div_rem(a, b, denominator)?;
    Ok(quotient)
}

/// `floor(a * b / denominator)` over exact integers.
pub(crate) fn mul_div_floor(a: i128, b: i128, denominator: i128) -> Result<i128, ValuationError> {
    let (quotient, remainder) = mul_div_rem(a, b, denominator)?;
    if remainder != 0 && ((remainder < 0) != (denominator < 0)) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

fn mul_div_rem(a: i128, b: i128, denominator: i128) -> Result<(i128, i128), ValuationError> {
    if denominator == 0 {
        return Err(ValuationError::DivisionByZero(format!("{} * {} / 0", a, b)));
    }
    let overflow = || ValuationError::Overflow(format!("{} * {} / {}", a, b, denominator));
    let product = a.checked_mul(b).ok_or_else(overflow)?;
    let quotient = product.checked_div(denominator).ok_or_else(overflow)?;
    let remainder = product.checked_rem(denominator).ok_or_else(overflow)?;
    Ok((quotient, remainder))
}
