//! Market identification and top-of-book types.

use crate::error::CoreError;
use crate::Price;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A spot trading pair, e.g. `SOL-USDT`.
///
/// The base asset is quoted against the quote asset; balances are tracked
/// per asset symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradingPair {
    base: String,
    quote: String,
}

impl TradingPair {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.quote)
    }
}

impl FromStr for TradingPair {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((base, quote)) if !base.is_empty() && !quote.is_empty() => {
                Ok(Self::new(base, quote))
            }
            _ => Err(CoreError::InvalidPair(s.to_string())),
        }
    }
}

/// Validity of a top-of-book observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookState {
    /// Both sides present, bid < ask.
    Valid,
    /// Bid side missing.
    NoBid,
    /// Ask side missing.
    NoAsk,
    /// Both sides missing.
    Empty,
    /// Both sides present but crossed (bid >= ask).
    Crossed,
}

impl BookState {
    /// Whether a mid price can be derived from this state.
    pub fn has_mid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for BookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "VALID"),
            Self::NoBid => write!(f, "NO_BID"),
            Self::NoAsk => write!(f, "NO_ASK"),
            Self::Empty => write!(f, "EMPTY"),
            Self::Crossed => write!(f, "CROSSED"),
        }
    }
}

/// Top of the order book: best bid and best ask.
///
/// Either side may be absent (one-sided or empty book); quote clamping
/// skips a missing side rather than failing the proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookTop {
    pub bid: Option<Price>,
    pub ask: Option<Price>,
}

impl BookTop {
    pub fn new(bid: Option<Price>, ask: Option<Price>) -> Self {
        Self { bid, ask }
    }

    /// Book top with both sides present.
    pub fn two_sided(bid: Price, ask: Price) -> Self {
        Self::new(Some(bid), Some(ask))
    }

    pub fn state(&self) -> BookState {
        let bid = self.bid.filter(Price::is_positive);
        let ask = self.ask.filter(Price::is_positive);

        match (bid, ask) {
            (None, None) => BookState::Empty,
            (Some(_), None) => BookState::NoAsk,
            (None, Some(_)) => BookState::NoBid,
            (Some(b), Some(a)) => {
                if b < a {
                    BookState::Valid
                } else {
                    BookState::Crossed
                }
            }
        }
    }

    /// Mid price: (bid + ask) / 2. None unless the book is two-sided and uncrossed.
    pub fn mid_price(&self) -> Option<Price> {
        if !self.state().has_mid() {
            return None;
        }
        let (bid, ask) = (self.bid?, self.ask?);
        Some(Price::new(
            (bid.inner() + ask.inner()) / rust_decimal::Decimal::TWO,
        ))
    }

    /// Best bid, if present and positive.
    pub fn best_bid(&self) -> Option<Price> {
        self.bid.filter(Price::is_positive)
    }

    /// Best ask, if present and positive.
    pub fn best_ask(&self) -> Option<Price> {
        self.ask.filter(Price::is_positive)
    }
}
