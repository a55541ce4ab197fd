//! Canonical game constants.

/// Hard cap on the number of players in a single game.
pub const MAX_PLAYERS: usize = 5;

/// Capital every player starts with.
pub const INITIAL_CAPITAL: i64 = 1_000;

/// Turns to wait between strategy changes on the same asset.
pub const STRATEGY_CHANGE_INTERVAL: i64 = 3;

/// Capital a player must reach (with a diversified portfolio) to win.
pub const CAPITAL_THRESHOLD_TO_WIN: i64 = 10_000;

/// Distinct sectors a winning portfolio must span.
pub const MIN_DIFFERENT_SECTORS_TO_WIN: usize = 3;

/// Turn cap: once the counter passes this, the highest-capital player wins.
pub const MAX_TURNS: i64 = 20;
