//! Error taxonomy for the game engine.
//!
//! Every error is synchronous and recoverable by the immediate caller; the
//! game loop only catches (and logs) phase errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("{player} does not have enough capital to buy {asset} (price {price}, capital {capital})")]
    InsufficientCapital {
        player: String,
        asset: String,
        price: u64,
        capital: i64,
    },

    #[error("cannot disinvest {requested} from {asset}: only {invested} invested")]
    OverDisinvestment {
        asset: String,
        requested: u64,
        invested: u64,
    },

    #[error("you do not own {0}")]
    AssetNotOwned(String),

    #[error("{0} is already in the portfolio")]
    AssetAlreadyOwned(String),

    #[error("you must wait {remaining} more turn(s) before changing investment strategy on {asset}")]
    StrategyChangeTooSoon { asset: String, remaining: i64 },

    #[error("a game needs between 1 and {max} players, got {count}")]
    InvalidPlayerCount { count: usize, max: usize },

    #[error("unknown {kind}: {value:?}")]
    InvalidEnumValue { kind: &'static str, value: String },

    #[error("failed to read content file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse content file: {0}")]
    Json(#[from] serde_json::Error),
}
