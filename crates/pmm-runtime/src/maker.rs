//! The tick adapter: glue between host scheduling and the spread policy.
//!
//! One refresh cycle per deadline: cancel resting quotes, observe the market,
//! evaluate spreads (falling back to configured defaults on missing data),
//! build the proposal, budget-adjust all-or-none, submit. Each cycle is
//! idempotent given the same snapshot; the only state carried across ticks is
//! the candle window and the next refresh deadline.

use pmm_candles::{Candle, CandleBuffer, CandlesConfig};
use pmm_core::{BookTop, FillEvent, Price, Size, TradingPair};
use pmm_strategy::{
    build_proposal, FallbackReason, MarketObservation, SpreadCalculator, SpreadOutcome,
    StrategyConfig,
};
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::connector::{Connector, Notifier};
use crate::error::RuntimeResult;
use crate::status::StatusReport;

/// Adaptive market maker bound to one trading pair.
pub struct AdaptiveMarketMaker<C: Connector, N: Notifier> {
    pair: TradingPair,
    calculator: SpreadCalculator,
    candles_config: CandlesConfig,
    candles: CandleBuffer,
    /// Next time (Unix ms) a full refresh cycle may run.
    next_refresh_ms: u64,
    connector: C,
    notifier: N,
}

impl<C: Connector, N: Notifier> AdaptiveMarketMaker<C, N> {
    /// Create the maker, validating the strategy configuration.
    pub fn new(
        strategy: StrategyConfig,
        candles_config: CandlesConfig,
        connector: C,
        notifier: N,
    ) -> RuntimeResult<Self> {
        let pair: TradingPair = strategy.trading_pair.parse()?;
        let calculator = SpreadCalculator::new(strategy)?;
        let candles = CandleBuffer::new(candles_config.max_records);

        info!(pair = %pair, "Adaptive market maker initialized");
        notifier.notify("Adaptive market maker initialized");

        Ok(Self {
            pair,
            calculator,
            candles_config,
            candles,
            next_refresh_ms: 0,
            connector,
            notifier,
        })
    }

    pub fn pair(&self) -> &TradingPair {
        &self.pair
    }

    pub fn config(&self) -> &StrategyConfig {
        self.calculator.config()
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn connector_mut(&mut self) -> &mut C {
        &mut self.connector
    }

    /// Feed a candle from the host's data feed.
    pub fn on_candle(&mut self, candle: Candle) {
        self.candles.push(candle);
    }

    /// Host-driven tick. No-op until the refresh deadline has passed.
    pub fn on_tick(&mut self, now_ms: u64) {
        if now_ms < self.next_refresh_ms {
            return;
        }
        debug!(pair = %self.pair, "Tick - refreshing quotes");

        self.cancel_all_orders();

        let Some(mid) = self.connector.mid_price(&self.pair) else {
            // Deadline not advanced; the next tick retries.
            warn!(pair = %self.pair, "No mid price available, skipping refresh");
            return;
        };

        let outcome = self.evaluate_spreads(mid);
        if let Some(reason) = outcome.fallback_reason() {
            info!(pair = %self.pair, %reason, "Using default spreads");
        }
        let spreads = outcome.resolve(self.calculator.config());

        let book = self
            .connector
            .book_top(&self.pair)
            .unwrap_or(BookTop::new(None, None));
        let amount = Size::new(self.calculator.config().order_amount);
        let proposal = build_proposal(&self.pair, mid, &spreads, &book, amount);

        let proposed = proposal.len();
        let adjusted = self.connector.adjust_to_budget(proposal, true);
        if adjusted.len() != proposed {
            warn!(
                pair = %self.pair,
                proposed,
                accepted = adjusted.len(),
                "Order proposal adjusted to budget"
            );
        }

        for order in &adjusted {
            match self.connector.place_order(order) {
                Ok(id) => info!(
                    pair = %self.pair,
                    %id,
                    side = %order.side,
                    amount = %order.amount,
                    price = %order.price,
                    "Placed order"
                ),
                Err(e) => error!(pair = %self.pair, side = %order.side, error = %e, "Failed to place order"),
            }
        }

        self.next_refresh_ms = now_ms + self.calculator.config().order_refresh_secs * 1000;
    }

    /// Host fill report: log and notify.
    pub fn on_fill(&mut self, fill: &FillEvent) {
        let msg = format!(
            "{} {} {} at {}",
            fill.side,
            fill.amount.inner().round_dp(2),
            fill.pair,
            fill.price.inner().round_dp(2)
        );
        info!(
            pair = %fill.pair,
            side = %fill.side,
            amount = %fill.amount,
            price = %fill.price,
            "Order filled"
        );
        self.notifier.notify(&msg);
    }

    /// Shutdown hook.
    pub fn stop(&mut self) {
        info!(pair = %self.pair, "Strategy stopped");
        self.notifier.notify("Adaptive market maker stopped");
    }

    /// Evaluate spreads against the current candle window and balances.
    fn evaluate_spreads(&self, mid: Price) -> SpreadOutcome {
        if self.candles.is_empty() {
            return SpreadOutcome::Fallback(FallbackReason::NoCandles);
        }

        let observation = self.observe(mid);
        let outcome = self.calculator.evaluate(&observation);
        if let SpreadOutcome::Computed(spreads) = &outcome {
            info!(
                pair = %self.pair,
                bid = %spreads.bid,
                ask = %spreads.ask,
                volatility = ?observation.volatility,
                inventory_ratio = %observation.inventory_ratio(),
                "Calculated spreads"
            );
        }
        outcome
    }

    fn observe(&self, mid: Price) -> MarketObservation {
        let volatility = self
            .candles
            .natr(self.candles_config.lookback_length)
            .and_then(Decimal::from_f64_retain);
        let base_balance = self.connector.balance(self.pair.base());
        let quote_value = self.connector.balance(self.pair.quote()) * mid.inner();

        MarketObservation::new(volatility, base_balance, quote_value)
    }

    fn cancel_all_orders(&mut self) {
        let orders = self.connector.active_orders(&self.pair);
        if orders.is_empty() {
            return;
        }
        info!(pair = %self.pair, count = orders.len(), "Cancelling active orders");
        for order in orders {
            if let Err(e) = self.connector.cancel_order(&self.pair, &order.id) {
                warn!(pair = %self.pair, id = %order.id, error = %e, "Failed to cancel order");
            }
        }
    }

    /// Render the strategy status view.
    pub fn status(&self) -> String {
        if !self.connector.is_ready() {
            return "Market connector is not ready.".to_string();
        }

        let base_balance = self.connector.balance(self.pair.base());
        let quote_balance = self.connector.balance(self.pair.quote());
        let mid = self.connector.mid_price(&self.pair);

        let (spreads, fallback) = match mid {
            Some(m) => {
                let outcome = self.evaluate_spreads(m);
                (
                    outcome.resolve(self.calculator.config()),
                    outcome.fallback_reason(),
                )
            }
            None => (self.calculator.default_spreads(), None),
        };

        let inventory_pct = mid.and_then(|m| {
            let base_value = base_balance * m.inner();
            let total = quote_balance + base_value;
            if total <= Decimal::ZERO {
                None
            } else {
                Some(base_value / total * Decimal::ONE_HUNDRED)
            }
        });

        let lookback = self.candles_config.lookback_length;
        let report = StatusReport {
            pair: self.pair.clone(),
            base_balance,
            quote_balance,
            mid_price: mid,
            inventory_pct,
            spreads,
            fallback,
            active_orders: self.connector.active_orders(&self.pair),
            candle_interval_secs: self.candles_config.interval_secs,
            lookback,
            natr: self.candles.natr(lookback),
            rsi: self.candles.rsi(lookback),
            recent_candles: self.candles.tail(5).into_iter().cloned().collect(),
        };
        report.render()
    }
}
