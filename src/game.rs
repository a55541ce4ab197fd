//! Game turn loop — player ordering, turn advancement, and victory.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::GameError;
use crate::market::MarketTrend;
use crate::phase::Phase;
use crate::player::Player;
use crate::settings::{
    CAPITAL_THRESHOLD_TO_WIN, MAX_PLAYERS, MAX_TURNS, MIN_DIFFERENT_SECTORS_TO_WIN,
};

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    Running,
    Finished,
}

/// Result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: String,
    pub turns_played: i64,
}

/// The whole simulation: players, the fixed phase sequence, the market
/// trend coin, and the turn counter.
#[derive(Debug)]
pub struct Game {
    current_turn: i64,
    players: Vec<Player>,
    phases: Vec<Phase>,
    market: MarketTrend,
    winner: Option<String>,
    status: GameStatus,
}

impl Game {
    pub fn new(players: Vec<Player>, phases: Vec<Phase>) -> Result<Self, GameError> {
        if players.is_empty() || players.len() > MAX_PLAYERS {
            return Err(GameError::InvalidPlayerCount {
                count: players.len(),
                max: MAX_PLAYERS,
            });
        }
        Ok(Self {
            current_turn: 1,
            players,
            phases,
            market: MarketTrend::new(),
            winner: None,
            status: GameStatus::NotStarted,
        })
    }

    pub fn current_turn(&self) -> i64 {
        self.current_turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// Players in current turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Run the main loop to completion.
    ///
    /// Each iteration: toss the trend, resolve player order, run the
    /// phases, collect income, advance the turn, check victory. A phase
    /// error is logged and skipped rather than aborting the run. The turn
    /// cap guarantees termination.
    pub fn start(&mut self, rng: &mut impl Rng) -> GameOutcome {
        self.status = GameStatus::Running;
        info!(players = self.players.len(), "game started");

        let winner = loop {
            // Tossed once per turn; every asset evaluated this turn reads
            // the same trend.
            let trend = self.market.toss(rng);
            debug!(turn = self.current_turn, ?trend, "turn started");

            self.resolve_players_order(rng);

            for phase in &mut self.phases {
                if let Err(e) = phase.play(&mut self.players) {
                    warn!(
                        turn = self.current_turn,
                        kind = ?phase.kind(),
                        error = %e,
                        "phase failed, skipping"
                    );
                }
            }

            for player in &mut self.players {
                let income = player.collect_income(trend);
                debug!(player = %player.name(), income, "income collected");
            }

            self.advance_turn();

            if let Some(name) = self.find_winner() {
                break name;
            }
        };

        info!(winner = %winner, turn = self.current_turn, "game finished");
        self.winner = Some(winner.clone());
        self.status = GameStatus::Finished;
        GameOutcome {
            winner,
            turns_played: self.current_turn - 1,
        }
    }

    /// Turn 1 order is random; later turns sort descending by capital,
    /// then capital invested. The sort is stable so remaining ties keep
    /// the prior order.
    fn resolve_players_order(&mut self, rng: &mut impl Rng) {
        if self.current_turn == 1 {
            self.players.shuffle(rng);
        } else {
            self.players.sort_by(|a, b| {
                (b.capital(), b.capital_invested()).cmp(&(a.capital(), a.capital_invested()))
            });
        }
    }

    /// Reactivate assets whose one-turn suspension has passed, then move
    /// the counter forward.
    fn advance_turn(&mut self) {
        for player in &mut self.players {
            player.reactivate_suspended_assets(self.current_turn);
        }
        self.current_turn += 1;
    }

    /// The canonical victory rule: a player wins by reaching the capital
    /// threshold with a diversified portfolio (every asset type, the
    /// minimum sector spread) and no asset on hold. Once the turn counter
    /// passes the cap, the highest-capital player wins instead (first in
    /// current order on ties).
    fn find_winner(&self) -> Option<String> {
        for player in &self.players {
            if player.capital() >= CAPITAL_THRESHOLD_TO_WIN
                && player.num_sector_investments() >= MIN_DIFFERENT_SECTORS_TO_WIN
                && player.is_portfolio_diversified()
                && !player.has_asset_on_hold()
            {
                return Some(player.name().to_string());
            }
        }

        if self.current_turn > MAX_TURNS {
            let mut best: Option<&Player> = None;
            for player in &self.players {
                if best.map_or(true, |b| player.capital() > b.capital()) {
                    best = Some(player);
                }
            }
            return best.map(|p| p.name().to_string());
        }

        None
    }
}
