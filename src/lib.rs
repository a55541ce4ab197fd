//! Turn-based investment game engine.
//!
//! Players buy tradable assets, pick long/short strategies, earn or lose
//! interest against a per-turn market trend, and race to a
//! capital-plus-diversification victory. This crate is the pure simulation
//! core: no rendering, no IO beyond the JSON content loaders.

pub mod asset;
pub mod error;
pub mod event;
pub mod game;
pub mod market;
pub mod phase;
pub mod player;
pub mod settings;

pub use asset::{Asset, AssetAction, AssetStatus, AssetType, InvestmentStrategy, Sector};
pub use error::GameError;
pub use event::{Event, EventDeck, EventType};
pub use game::{Game, GameOutcome, GameStatus};
pub use market::{MarketTrend, Trend};
pub use phase::{Phase, PhaseKind};
pub use player::{InvestmentStep, Player};
