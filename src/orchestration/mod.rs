//! Fetch inputs through the protocol view, then run the engine.

use crate::error::ValuationError;
use crate::protocol::ProtocolError;
use thiserror::Error;

pub mod ntoken;

pub use ntoken::{MarketRedemption, NTokenValuer, RedemptionEstimate};

#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Valuation(#[from] ValuationError),
}
