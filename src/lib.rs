pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;
pub mod protocol;

pub use config::Config;
pub use domain::{
    AssetType, Currency, CurrencyId, CurrencyRegistry, Decimal, FixedCashPosition,
    LiquidityTokenPosition, Market, MarketIndex, Maturity, Portfolio, PortfolioAsset,
    PortfolioSnapshot,
};
pub use engine::{LiquidityTokenClaim, MaturityExposure, NetPosition, ValuationReport};
pub use error::ValuationError;
pub use orchestration::{NTokenValuer, OrchestrationError};
pub use protocol::{CashQuote, MockProtocolView, NTokenAccount, ProtocolError, ProtocolView};
