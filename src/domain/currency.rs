//! Currency metadata and unit conversions.

use crate::domain::decimal::pow10;
use crate::domain::{CurrencyId, Decimal};
use crate::error::ValuationError;
use serde::{Deserialize, Serialize};

/// Decimals of the protocol's internal fixed-point representation.
pub const INTERNAL_DECIMALS: u32 = 8;

/// A token the protocol lists as a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub symbol: String,
    pub currency_id: CurrencyId,
    /// Token decimals (18 for DAI, 6 for USDC, 8 for WBTC).
    pub decimals: u32,
    /// Reference USD price used to size amounts.
    pub usd_price: Decimal,
}

impl Currency {
    /// Token base units to whole tokens.
    pub fn to_units(&self, amount: i128) -> Result<Decimal, ValuationError> {
        Decimal::from_scaled(amount, self.decimals).ok_or_else(|| {
            ValuationError::Overflow(format!("{} {} does not fit a decimal", amount, self.symbol))
        })
    }

    /// Whole tokens to token base units, truncating sub-unit dust.
    pub fn from_units(&self, units: Decimal) -> Result<i128, ValuationError> {
        units.to_scaled(self.decimals).ok_or_else(|| {
            ValuationError::Overflow(format!("{} {} in base units", units, self.symbol))
        })
    }

    /// Base-unit amount worth `usd`, rounded to whole tokens first.
    pub fn amount_for_usd(&self, usd: Decimal) -> Result<i128, ValuationError> {
        if !self.usd_price.is_positive() {
            return Err(ValuationError::DivisionByZero(format!(
                "{} has no usd price",
                self.symbol
            )));
        }
        let tokens = usd.checked_div(self.usd_price).ok_or_else(|| {
            ValuationError::Overflow(format!("{} usd in {}", usd, self.symbol))
        })?;
        self.from_units(tokens.round())
    }

    /// Rescale a base-unit amount to the protocol's 8-decimal precision.
    pub fn to_internal_precision(&self, amount: i128) -> Result<i128, ValuationError> {
        let overflow =
            || ValuationError::Overflow(format!("{} {} at internal precision", amount, self.symbol));
        if self.decimals >= INTERNAL_DECIMALS {
            let divisor = pow10(self.decimals - INTERNAL_DECIMALS).ok_or_else(overflow)?;
            Ok(amount / divisor)
        } else {
            let factor = pow10(INTERNAL_DECIMALS - self.decimals).ok_or_else(overflow)?;
            amount.checked_mul(factor).ok_or_else(overflow)
        }
    }
}

/// Lookup table of known currencies, loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyRegistry {
    currencies: Vec<Currency>,
}

impl CurrencyRegistry {
    pub fn new(currencies: Vec<Currency>) -> Self {
        Self { currencies }
    }

    pub fn by_symbol(&self, symbol: &str) -> Option<&Currency> {
        self.currencies
            .iter()
            .find(|c| c.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn by_id(&self, currency_id: CurrencyId) -> Option<&Currency> {
        self.currencies.iter().find(|c| c.currency_id == currency_id)
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn currency(symbol: &str, id: u16, decimals: u32, price: &str) -> Currency {
        Currency {
            symbol: symbol.to_string(),
            currency_id: CurrencyId::new(id),
            decimals,
            usd_price: d(price),
        }
    }

    #[test]
    fn test_units_conversion() {
        let usdc = currency("USDC", 3, 6, "1");
        assert_eq!(usdc.to_units(1_500_000).unwrap(), d("1.5"));
        assert_eq!(usdc.from_units(d("2.0000019")).unwrap(), 2_000_001);
    }

    #[test]
    fn test_million_in_token() {
        let wbtc = currency("WBTC", 4, 8, "35000");
        // 1e6 / 35000 = 28.57 -> 29 whole tokens
        assert_eq!(wbtc.amount_for_usd(d("1000000")).unwrap(), 29 * 100_000_000);

        let dai = currency("DAI", 2, 18, "1");
        assert_eq!(
            dai.amount_for_usd(d("1000000")).unwrap(),
            1_000_000 * 10i128.pow(18)
        );
    }

    #[test]
    fn test_amount_for_usd_without_price() {
        let broken = currency("ZERO", 9, 18, "0");
        assert!(matches!(
            broken.amount_for_usd(d("1")),
            Err(ValuationError::DivisionByZero(_))
        ));

        let negative = currency("NEG", 10, 18, "-2");
        assert!(matches!(
            negative.amount_for_usd(d("1")),
            Err(ValuationError::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_internal_precision() {
        let dai = currency("DAI", 2, 18, "1");
        assert_eq!(dai.to_internal_precision(10i128.pow(18)).unwrap(), 100_000_000);

        let usdc = currency("USDC", 3, 6, "1");
        assert_eq!(usdc.to_internal_precision(1_000_000).unwrap(), 100_000_000);

        let wbtc = currency("WBTC", 4, 8, "35000");
        assert_eq!(wbtc.to_internal_precision(123).unwrap(), 123);
    }

    #[test]
    fn test_registry_lookup() {
        let registry = CurrencyRegistry::new(vec![
            currency("WETH", 1, 18, "2000"),
            currency("DAI", 2, 18, "1"),
        ]);
        assert_eq!(registry.by_symbol("dai").unwrap().currency_id, CurrencyId::new(2));
        assert_eq!(registry.by_id(CurrencyId::new(1)).unwrap().symbol, "WETH");
        assert!(registry.by_symbol("USDC").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registry_json() {
        let json = r#"[{"symbol":"USDC","currency_id":3,"decimals":6,"usd_price":"1"}]"#;
        let registry: CurrencyRegistry = serde_json::from_str(json).unwrap();
        assert_eq!(registry.by_id(CurrencyId::new(3)).unwrap().decimals, 6);
    }
}
