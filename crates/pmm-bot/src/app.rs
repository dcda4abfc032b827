//! Main application loop: timer-driven paper trading session.

use std::time::Duration;

use chrono::Utc;
use pmm_core::{BookTop, Price, Size, TradingPair};
use pmm_runtime::{AdaptiveMarketMaker, PaperConnector, TracingNotifier};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::sim::{CandleAggregator, PriceSimulator};

/// Main application.
pub struct Application {
    config: AppConfig,
    pair: TradingPair,
    maker: AdaptiveMarketMaker<PaperConnector, TracingNotifier>,
    sim: PriceSimulator,
    aggregator: CandleAggregator,
    /// Book half-spread as a fraction of price.
    half_spread: Decimal,
    last_status_ms: u64,
}

impl Application {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let pair: TradingPair = config.strategy.trading_pair.parse()?;

        let mut connector = PaperConnector::new();
        connector.set_balance(pair.base(), config.paper.initial_base_balance);
        connector.set_balance(pair.quote(), config.paper.initial_quote_balance);

        let maker = AdaptiveMarketMaker::new(
            config.strategy.clone(),
            config.candles.clone(),
            connector,
            TracingNotifier,
        )?;

        let sim = PriceSimulator::new(
            config.paper.initial_price,
            config.paper.step_bps,
            config.paper.seed,
        );
        let aggregator = CandleAggregator::new(config.candles.interval_secs * 1000);
        let half_spread = config.paper.book_half_spread_bps / Decimal::new(10_000, 0);

        Ok(Self {
            config,
            pair,
            maker,
            sim,
            aggregator,
            half_spread,
            last_status_ms: 0,
        })
    }

    pub fn pair(&self) -> &TradingPair {
        &self.pair
    }

    pub fn maker(&self) -> &AdaptiveMarketMaker<PaperConnector, TracingNotifier> {
        &self.maker
    }

    /// One simulation step: advance the walk, settle fills, refresh the
    /// book and candles, then hand the tick to the strategy.
    pub fn step_once(&mut self, now_ms: u64) {
        let price = self.sim.step();
        if !price.is_positive() {
            warn!(pair = %self.pair, "Simulated price collapsed to zero, skipping step");
            return;
        }

        // The print settles against resting quotes first
        let fills = self.maker.connector_mut().trade_at(&self.pair, price);
        for fill in fills {
            self.maker.on_fill(&fill);
        }

        // Re-centre the simulated book around the print
        let half = price.inner() * self.half_spread;
        let book = BookTop::two_sided(
            Price::new(price.inner() - half),
            Price::new(price.inner() + half),
        );
        self.maker
            .connector_mut()
            .set_book_top(self.pair.clone(), book);

        // Candle feed: finished bar plus the bar still building
        if let Some(finished) = self.aggregator.record(now_ms, price, Size::ONE) {
            self.maker.on_candle(finished);
        }
        if let Some(current) = self.aggregator.current() {
            self.maker.on_candle(current.clone());
        }

        self.maker.on_tick(now_ms);

        if now_ms.saturating_sub(self.last_status_ms) >= self.config.status_interval_secs * 1000 {
            info!("{}", self.maker.status());
            self.last_status_ms = now_ms;
        }
    }

    /// Run the timer loop until a shutdown signal arrives.
    pub async fn run(&mut self) -> AppResult<()> {
        info!(
            pair = %self.pair,
            tick_interval_ms = self.config.tick_interval_ms,
            "Starting paper trading session"
        );

        let mut interval = tokio::time::interval(Duration::from_millis(self.config.tick_interval_ms));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let now_ms = Utc::now().timestamp_millis() as u64;
                    self.step_once(now_ms);
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        self.maker.stop();
        Ok(())
    }
}
