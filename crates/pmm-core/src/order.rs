//! Order lifecycle types: candidates, resting orders, and fills.

use crate::market::TradingPair;
use crate::{Price, Size};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Order side: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Returns the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Resting limit order (the only type this strategy submits).
    Limit,
    /// Market order, accepted for completeness of the host interface.
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limit => write!(f, "limit"),
            Self::Market => write!(f, "market"),
        }
    }
}

/// Client order ID for idempotency.
///
/// Every submission gets a unique ID so cancels and fill reports can be
/// correlated with the order that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientOrderId(String);

impl ClientOrderId {
    /// Create a new unique client order ID.
    ///
    /// Format: `pmm_{timestamp_ms}_{uuid_short}`
    pub fn new() -> Self {
        let ts = Utc::now().timestamp_millis();
        let uuid_short = &Uuid::new_v4().to_string()[..8];
        Self(format!("pmm_{ts}_{uuid_short}"))
    }

    /// Create from an existing string (for parsing host responses).
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClientOrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A proposed order, not yet checked against the available budget.
///
/// The tick cycle builds candidates, passes them through the host's budget
/// adjustment, and submits whatever survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCandidate {
    pub pair: TradingPair,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub price: Price,
    pub amount: Size,
    /// Whether the order is expected to rest (add liquidity).
    pub is_maker: bool,
}

impl OrderCandidate {
    /// A maker limit order, the strategy's standard proposal shape.
    pub fn maker_limit(pair: TradingPair, side: OrderSide, price: Price, amount: Size) -> Self {
        Self {
            pair,
            side,
            order_type: OrderType::Limit,
            price,
            amount,
            is_maker: true,
        }
    }

    /// Notional value of the candidate in quote units.
    pub fn notional(&self) -> rust_decimal::Decimal {
        self.amount.notional(self.price)
    }
}

/// An order resting on the book, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveOrder {
    pub id: ClientOrderId,
    pub pair: TradingPair,
    pub side: OrderSide,
    pub price: Price,
    pub amount: Size,
    pub placed_at: DateTime<Utc>,
}

/// A fill reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillEvent {
    pub pair: TradingPair,
    pub side: OrderSide,
    pub price: Price,
    pub amount: Size,
    pub filled_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pair() -> TradingPair {
        TradingPair::new("SOL", "USDT")
    }

    #[test]
    fn test_order_side_opposite() {
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
        assert_eq!(OrderSide::Sell.opposite(), OrderSide::Buy);
    }

    #[test]
    fn test_client_order_id_unique() {
        let id1 = ClientOrderId::new();
        let id2 = ClientOrderId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_client_order_id_format() {
        let id = ClientOrderId::new();
        assert!(id.as_str().starts_with("pmm_"));
    }

    #[test]
    fn test_maker_limit_candidate() {
        let order = OrderCandidate::maker_limit(
            pair(),
            OrderSide::Buy,
            Price::new(dec!(149.5)),
            Size::new(dec!(2)),
        );

        assert!(order.is_maker);
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.notional(), dec!(299.0));
    }
}
