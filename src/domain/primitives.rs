//! Domain primitives: CurrencyId, Maturity, MarketIndex, AssetType.

use serde::{Deserialize, Serialize};

/// Protocol currency identifier (e.g. 1 = ETH, 2 = DAI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyId(pub u16);

impl CurrencyId {
    pub fn new(id: u16) -> Self {
        CurrencyId(id)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for CurrencyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Settlement timestamp of a market, in seconds since Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Maturity(pub u64);

impl Maturity {
    pub fn new(secs: u64) -> Self {
        Maturity(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds left until this maturity, negative once it has passed.
    pub fn time_to_maturity(&self, now: u64) -> i128 {
        i128::from(self.0) - i128::from(now)
    }
}

impl std::fmt::Display for Maturity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let date = i64::try_from(self.0)
            .ok()
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0));
        match date {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d")),
            None => write!(f, "{}", self.0),
        }
    }
}

/// 1-based position of a market in the protocol's active market list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MarketIndex(u8);

impl MarketIndex {
    /// Highest market index the protocol supports (the 20 year market).
    pub const MAX: u8 = 7;

    pub fn new(index: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&index).then_some(MarketIndex(index))
    }

    /// Build the index of the market at a zero-based position in a list.
    pub fn from_offset(offset: usize) -> Option<Self> {
        u8::try_from(offset + 1).ok().and_then(Self::new)
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Zero-based position in the active market list.
    pub fn offset(&self) -> usize {
        usize::from(self.0) - 1
    }
}

impl TryFrom<u8> for MarketIndex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        MarketIndex::new(value).ok_or_else(|| format!("market index out of range: {}", value))
    }
}

impl From<MarketIndex> for u8 {
    fn from(value: MarketIndex) -> Self {
        value.0
    }
}

impl std::fmt::Display for MarketIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Portfolio asset type as encoded by the protocol.
///
/// `1` is plain fCash; `2..=8` are liquidity tokens, where the market index is
/// `asset_type - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetType {
    FCash,
    LiquidityToken(MarketIndex),
}

impl AssetType {
    pub const FCASH_CODE: u8 = 1;

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            Self::FCASH_CODE => Some(AssetType::FCash),
            other => other
                .checked_sub(1)
                .and_then(MarketIndex::new)
                .map(AssetType::LiquidityToken),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            AssetType::FCash => Self::FCASH_CODE,
            AssetType::LiquidityToken(index) => index.get() + 1,
        }
    }
}
