//! Quote construction: spreads + reference price -> order candidates.

use crate::spread::SpreadPair;
use pmm_core::{BookTop, OrderCandidate, OrderSide, Price, Size, TradingPair};

/// Build the two-sided maker proposal for one refresh cycle.
///
/// Prices are offset from the reference by the fractional spreads, then
/// clamped so neither side crosses the book: the buy never exceeds the best
/// bid and the sell never undercuts the best ask. A missing book side skips
/// its clamp; the quote stands at its computed offset.
///
/// Returns an empty proposal when the reference price or amount is
/// non-positive; there is nothing sane to quote.
pub fn build_proposal(
    pair: &TradingPair,
    reference: Price,
    spreads: &SpreadPair,
    book: &BookTop,
    amount: Size,
) -> Vec<OrderCandidate> {
    if !reference.is_positive() || !amount.is_positive() {
        return Vec::new();
    }

    let mut buy_price = reference.offset_down(spreads.bid);
    if let Some(best_bid) = book.best_bid() {
        buy_price = buy_price.min(best_bid);
    }

    let mut sell_price = reference.offset_up(spreads.ask);
    if let Some(best_ask) = book.best_ask() {
        sell_price = sell_price.max(best_ask);
    }

    vec![
        OrderCandidate::maker_limit(pair.clone(), OrderSide::Buy, buy_price, amount),
        OrderCandidate::maker_limit(pair.clone(), OrderSide::Sell, sell_price, amount),
    ]
}
