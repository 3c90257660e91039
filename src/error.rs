use crate::domain::Maturity;
use thiserror::Error;

/// Errors raised by the valuation engine.
///
/// Every variant means the caller handed over a malformed snapshot; none of
/// them is retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValuationError {
    #[error("Division by zero: {0}")]
    DivisionByZero(String),
    #[error("Maturity mismatch: position matures at {position}, market at {market}")]
    MaturityMismatch { position: Maturity, market: Maturity },
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),
    #[error("Unknown asset type: {0}")]
    UnknownAssetType(u8),
}
