//! Host capability traits.
//!
//! The strategy never talks to an exchange directly. Everything it needs
//! (prices, balances, order submission, budget checks) comes through
//! `Connector`, and everything it says to a human goes through `Notifier`.
//! Both are synchronous: the host guarantees serialized tick execution, so
//! accessor calls are plain method calls on host-owned state.

use pmm_core::{ActiveOrder, BookTop, ClientOrderId, OrderCandidate, Price, TradingPair};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::RuntimeResult;

/// Host-provided market and account access.
#[cfg_attr(test, mockall::automock)]
pub trait Connector {
    /// Whether the host considers the market connection ready to trade.
    fn is_ready(&self) -> bool;

    /// Current mid price for a pair, if a valid two-sided book exists.
    fn mid_price(&self, pair: &TradingPair) -> Option<Price>;

    /// Current top of book for a pair.
    fn book_top(&self, pair: &TradingPair) -> Option<BookTop>;

    /// Current balance for an asset symbol. Unknown assets report zero.
    fn balance(&self, asset: &str) -> Decimal;

    /// Orders currently resting on the book for a pair.
    fn active_orders(&self, pair: &TradingPair) -> Vec<ActiveOrder>;

    /// Trim a proposal to what the available budget can support.
    ///
    /// With `all_or_none`, a single infeasible candidate rejects the whole
    /// proposal; otherwise infeasible candidates are dropped individually.
    fn adjust_to_budget(
        &self,
        proposal: Vec<OrderCandidate>,
        all_or_none: bool,
    ) -> Vec<OrderCandidate>;

    /// Submit an order, returning the assigned client order ID.
    fn place_order(&mut self, order: &OrderCandidate) -> RuntimeResult<ClientOrderId>;

    /// Cancel a resting order.
    fn cancel_order(&mut self, pair: &TradingPair, id: &ClientOrderId) -> RuntimeResult<()>;
}

/// Host-provided notification sink for human-facing messages.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Notifier that forwards messages to the tracing pipeline.
///
/// The default sink when the host offers no dedicated notification channel.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        info!(notification = %message, "Strategy notification");
    }
}
