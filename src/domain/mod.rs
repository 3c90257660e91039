//! Domain types for fCash portfolio valuation.
//!
//! This module provides:
//! - Protocol primitives: CurrencyId, Maturity, MarketIndex, AssetType
//! - Market and position records with named fields
//! - Currency metadata with token-unit conversions
//! - Lossless i128 amount serialization

pub mod amount;
pub mod currency;
pub mod decimal;
pub mod market;
pub mod position;
pub mod primitives;
pub mod snapshot;

pub use currency::{Currency, CurrencyRegistry, INTERNAL_DECIMALS};
pub use decimal::Decimal;
pub use market::Market;
pub use position::{FixedCashPosition, LiquidityTokenPosition, Portfolio, PortfolioAsset};
pub use primitives::{AssetType, CurrencyId, MarketIndex, Maturity};
pub use snapshot::PortfolioSnapshot;
