//! Human-readable strategy status report.

use chrono::DateTime;
use pmm_candles::Candle;
use pmm_core::{ActiveOrder, Price, TradingPair};
use pmm_strategy::{FallbackReason, SpreadPair};
use rust_decimal::Decimal;

const SEPARATOR: &str = "----------------------------------------------------------------------";

/// Snapshot of everything the status view displays.
///
/// Assembled by the maker from connector and candle state; rendering is a
/// pure function so the format is testable without a host.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub pair: TradingPair,
    pub base_balance: Decimal,
    pub quote_balance: Decimal,
    pub mid_price: Option<Price>,
    /// Percentage of portfolio value held in the base asset.
    pub inventory_pct: Option<Decimal>,
    pub spreads: SpreadPair,
    pub fallback: Option<FallbackReason>,
    pub active_orders: Vec<ActiveOrder>,
    pub candle_interval_secs: u64,
    pub lookback: usize,
    pub natr: Option<f64>,
    pub rsi: Option<f64>,
    /// Most recent candles, oldest first; rendered newest first.
    pub recent_candles: Vec<Candle>,
}

impl StatusReport {
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(String::new());
        lines.push("  Balances:".to_string());
        lines.push(format!("    {}: {:.4}", self.pair.base(), self.base_balance));
        lines.push(format!("    {}: {:.2}", self.pair.quote(), self.quote_balance));

        lines.push(String::new());
        if self.active_orders.is_empty() {
            lines.push("  No active maker orders.".to_string());
        } else {
            lines.push("  Orders:".to_string());
            for order in &self.active_orders {
                lines.push(format!(
                    "    {} {} @ {}",
                    order.side, order.amount, order.price
                ));
            }
        }

        lines.push(SEPARATOR.to_string());
        lines.push("  Strategy Metrics:".to_string());
        lines.push(format!(
            "  Current Inventory: {:.4} {}, {:.2} {}",
            self.base_balance,
            self.pair.base(),
            self.quote_balance,
            self.pair.quote()
        ));
        match self.mid_price {
            Some(mid) => lines.push(format!("  Current Price: {:.4}", mid.inner())),
            None => lines.push("  Current Price: unavailable".to_string()),
        }
        if let Some(pct) = self.inventory_pct {
            lines.push(format!(
                "  Inventory Ratio: {:.2}% in {}",
                pct,
                self.pair.base()
            ));
        }
        lines.push(format!(
            "  Bid Spread: {:.4}%, Ask Spread: {:.4}%",
            self.spreads.bid * Decimal::ONE_HUNDRED,
            self.spreads.ask * Decimal::ONE_HUNDRED
        ));
        if let Some(reason) = self.fallback {
            lines.push(format!("  Spreads from defaults: {reason}"));
        }

        lines.push(SEPARATOR.to_string());
        match (self.natr, self.rsi) {
            (Some(natr), Some(rsi)) => lines.push(format!(
                "  Candles ({}s) | NATR({}): {:.6} | RSI({}): {:.2}",
                self.candle_interval_secs, self.lookback, natr, self.lookback, rsi
            )),
            _ => lines.push(format!(
                "  Candles ({}s) | indicators warming up",
                self.candle_interval_secs
            )),
        }
        for candle in self.recent_candles.iter().rev() {
            lines.push(format!(
                "    {} | O {} H {} L {} C {} V {}",
                format_time(candle.time_close),
                candle.open,
                candle.high,
                candle.low,
                candle.close,
                candle.volume
            ));
        }

        lines.join("\n")
    }
}

fn format_time(ms: u64) -> String {
    DateTime::from_timestamp_millis(ms as i64)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| ms.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmm_core::Size;
    use rust_decimal_macros::dec;

    fn report() -> StatusReport {
        StatusReport {
            pair: TradingPair::new("SOL", "USDT"),
            base_balance: dec!(100),
            quote_balance: dec!(10000),
            mid_price: Some(Price::new(dec!(150))),
            inventory_pct: Some(dec!(60)),
            spreads: SpreadPair::new(dec!(0.009), dec!(0.011)),
            fallback: None,
            active_orders: Vec::new(),
            candle_interval_secs: 60,
            lookback: 30,
            natr: Some(0.002),
            rsi: Some(54.3),
            recent_candles: vec![Candle::new(
                0,
                60_000,
                Price::new(dec!(150)),
                Price::new(dec!(151)),
                Price::new(dec!(149)),
                Price::new(dec!(150)),
                Size::new(dec!(10)),
            )],
        }
    }

    #[test]
    fn test_render_contains_metrics() {
        let text = report().render();

        assert!(text.contains("Balances:"));
        assert!(text.contains("SOL: 100.0000"));
        assert!(text.contains("USDT: 10000.00"));
        assert!(text.contains("No active maker orders."));
        assert!(text.contains("Current Price: 150.0000"));
        assert!(text.contains("Inventory Ratio: 60.00% in SOL"));
        assert!(text.contains("Bid Spread: 0.9000%, Ask Spread: 1.1000%"));
        assert!(text.contains("NATR(30): 0.002000"));
    }

    #[test]
    fn test_render_lists_orders() {
        let mut r = report();
        r.active_orders.push(ActiveOrder {
            id: pmm_core::ClientOrderId::new(),
            pair: r.pair.clone(),
            side: pmm_core::OrderSide::Buy,
            price: Price::new(dec!(148.65)),
            amount: Size::new(dec!(1)),
            placed_at: chrono::Utc::now(),
        });

        let text = r.render();
        assert!(text.contains("Orders:"));
        assert!(text.contains("BUY 1 @ 148.65"));
        assert!(!text.contains("No active maker orders."));
    }

    #[test]
    fn test_render_fallback_note() {
        let mut r = report();
        r.fallback = Some(FallbackReason::NoCandles);

        let text = r.render();
        assert!(text.contains("Spreads from defaults: no candle data available yet"));
    }

    #[test]
    fn test_render_warming_up_without_indicators() {
        let mut r = report();
        r.natr = None;
        r.rsi = None;

        let text = r.render();
        assert!(text.contains("indicators warming up"));
    }
}
