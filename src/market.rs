//! Market trend coin — the per-turn UP/DOWN oracle.
//!
//! The trend is an owned value held by the game and passed into interest
//! calculation, not a process-wide singleton. It must be tossed exactly once
//! per turn so that every asset evaluated in that turn reads the same value.

use rand::Rng;

/// Market direction for a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

/// Coin-flip oracle producing the trend. Unset until the first toss.
#[derive(Debug, Default)]
pub struct MarketTrend {
    trend: Option<Trend>,
}

impl MarketTrend {
    pub fn new() -> Self {
        Self { trend: None }
    }

    /// Re-toss the coin and return the new trend.
    pub fn toss(&mut self, rng: &mut impl Rng) -> Trend {
        let trend = if rng.gen_bool(0.5) {
            Trend::Up
        } else {
            Trend::Down
        };
        self.trend = Some(trend);
        trend
    }

    /// Trend of the current turn, or `None` before the first toss.
    pub fn current(&self) -> Option<Trend> {
        self.trend
    }
}
