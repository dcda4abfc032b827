//! In-memory paper-trading connector.
//!
//! Implements `Connector` against simulated balances and a settable book
//! top. Fills happen when a simulated trade price crosses a resting order.
//! Used by the runtime tests and the paper-trading binary.

use std::collections::HashMap;

use chrono::Utc;
use pmm_core::{
    ActiveOrder, BookTop, ClientOrderId, FillEvent, OrderCandidate, OrderSide, Price, TradingPair,
};
use rust_decimal::Decimal;

use crate::connector::Connector;
use crate::error::{RuntimeError, RuntimeResult};

/// Paper-trading connector with simulated balances and fills.
#[derive(Debug, Default)]
pub struct PaperConnector {
    ready: bool,
    balances: HashMap<String, Decimal>,
    books: HashMap<TradingPair, BookTop>,
    orders: HashMap<TradingPair, Vec<ActiveOrder>>,
    placements: u64,
}

impl PaperConnector {
    pub fn new() -> Self {
        Self {
            ready: true,
            ..Default::default()
        }
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn set_balance(&mut self, asset: impl Into<String>, amount: Decimal) {
        self.balances.insert(asset.into(), amount);
    }

    pub fn set_book_top(&mut self, pair: TradingPair, book: BookTop) {
        self.books.insert(pair, book);
    }

    pub fn order_count(&self, pair: &TradingPair) -> usize {
        self.orders.get(pair).map(Vec::len).unwrap_or(0)
    }

    /// Total orders accepted over the connector's lifetime.
    pub fn placements(&self) -> u64 {
        self.placements
    }

    /// Simulate a trade printing at `price`.
    ///
    /// Resting buys at or above the trade price and resting sells at or
    /// below it fill completely at their limit price. Balances settle
    /// immediately; fill events are returned for the strategy to consume.
    pub fn trade_at(&mut self, pair: &TradingPair, price: Price) -> Vec<FillEvent> {
        let Some(resting) = self.orders.get_mut(pair) else {
            return Vec::new();
        };

        let mut fills = Vec::new();
        let mut keep = Vec::with_capacity(resting.len());

        for order in resting.drain(..) {
            let crossed = match order.side {
                OrderSide::Buy => price <= order.price,
                OrderSide::Sell => price >= order.price,
            };
            if crossed {
                fills.push(order);
            } else {
                keep.push(order);
            }
        }
        *resting = keep;

        fills
            .into_iter()
            .map(|order| {
                self.settle_fill(&order);
                FillEvent {
                    pair: order.pair,
                    side: order.side,
                    price: order.price,
                    amount: order.amount,
                    filled_at: Utc::now(),
                }
            })
            .collect()
    }

    fn settle_fill(&mut self, order: &ActiveOrder) {
        let notional = order.amount.notional(order.price);
        let base = order.pair.base().to_string();
        let quote = order.pair.quote().to_string();

        match order.side {
            OrderSide::Buy => {
                *self.balances.entry(base).or_default() += order.amount.inner();
                *self.balances.entry(quote).or_default() -= notional;
            }
            OrderSide::Sell => {
                *self.balances.entry(base).or_default() -= order.amount.inner();
                *self.balances.entry(quote).or_default() += notional;
            }
        }
    }
}

impl Connector for PaperConnector {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn mid_price(&self, pair: &TradingPair) -> Option<Price> {
        self.books.get(pair).and_then(BookTop::mid_price)
    }

    fn book_top(&self, pair: &TradingPair) -> Option<BookTop> {
        self.books.get(pair).copied()
    }

    fn balance(&self, asset: &str) -> Decimal {
        self.balances.get(asset).copied().unwrap_or_default()
    }

    fn active_orders(&self, pair: &TradingPair) -> Vec<ActiveOrder> {
        self.orders.get(pair).cloned().unwrap_or_default()
    }

    fn adjust_to_budget(
        &self,
        proposal: Vec<OrderCandidate>,
        all_or_none: bool,
    ) -> Vec<OrderCandidate> {
        let mut available = self.balances.clone();
        let mut accepted = Vec::with_capacity(proposal.len());
        let mut any_rejected = false;

        for order in proposal {
            let (asset, required) = match order.side {
                OrderSide::Buy => (order.pair.quote(), order.notional()),
                OrderSide::Sell => (order.pair.base(), order.amount.inner()),
            };

            let have = available.get(asset).copied().unwrap_or_default();
            if have >= required {
                available.insert(asset.to_string(), have - required);
                accepted.push(order);
            } else {
                any_rejected = true;
            }
        }

        if all_or_none && any_rejected {
            Vec::new()
        } else {
            accepted
        }
    }

    fn place_order(&mut self, order: &OrderCandidate) -> RuntimeResult<ClientOrderId> {
        if !order.price.is_positive() || !order.amount.is_positive() {
            return Err(RuntimeError::Connector(format!(
                "rejected order with non-positive price or amount: {} @ {}",
                order.amount, order.price
            )));
        }

        let id = ClientOrderId::new();
        self.placements += 1;
        self.orders
            .entry(order.pair.clone())
            .or_default()
            .push(ActiveOrder {
                id: id.clone(),
                pair: order.pair.clone(),
                side: order.side,
                price: order.price,
                amount: order.amount,
                placed_at: Utc::now(),
            });
        Ok(id)
    }

    fn cancel_order(&mut self, pair: &TradingPair, id: &ClientOrderId) -> RuntimeResult<()> {
        let orders = self
            .orders
            .get_mut(pair)
            .ok_or_else(|| RuntimeError::Connector(format!("no orders for pair {pair}")))?;

        let before = orders.len();
        orders.retain(|order| &order.id != id);

        if orders.len() == before {
            return Err(RuntimeError::Connector(format!("unknown order: {id}")));
        }
        Ok(())
    }
}
