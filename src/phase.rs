//! Turn phases — the three sub-steps executed each turn.
//!
//! Phase bodies are collaborator-level: the concrete purchase, investment,
//! and event moves are driven from outside the core through the `Player`
//! API. `play()` is the contract the game loop calls once per turn per
//! phase; it mutates players as a side effect and reports errors instead of
//! panicking.

use tracing::debug;

use crate::asset::Asset;
use crate::error::GameError;
use crate::event::EventDeck;
use crate::player::Player;

/// Which sub-step of a turn this phase drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseKind {
    Purchase,
    Investment,
    Events,
}

/// A unit of a turn: the assets in play for the sub-step, plus the event
/// deck for the events phase.
#[derive(Clone, Debug)]
pub struct Phase {
    kind: PhaseKind,
    assets_in_game: Vec<Asset>,
    deck: EventDeck,
}

impl Phase {
    pub fn purchase(assets_in_game: Vec<Asset>) -> Self {
        Self {
            kind: PhaseKind::Purchase,
            assets_in_game,
            deck: EventDeck::default(),
        }
    }

    pub fn investment(assets_in_game: Vec<Asset>) -> Self {
        Self {
            kind: PhaseKind::Investment,
            assets_in_game,
            deck: EventDeck::default(),
        }
    }

    pub fn events(assets_in_game: Vec<Asset>, deck: EventDeck) -> Self {
        Self {
            kind: PhaseKind::Events,
            assets_in_game,
            deck,
        }
    }

    pub fn kind(&self) -> PhaseKind {
        self.kind
    }

    pub fn assets_in_game(&self) -> &[Asset] {
        &self.assets_in_game
    }

    pub fn event_deck(&self) -> &EventDeck {
        &self.deck
    }

    /// Run the phase for the current turn.
    ///
    /// The core carries no phase bodies yet; player moves arrive through
    /// the `Player` API and events through the deck.
    pub fn play(&mut self, _players: &mut [Player]) -> Result<(), GameError> {
        debug!(kind = ?self.kind, "phase played");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{AssetType, Sector};
    use crate::event::{Event, EventType};
    use std::collections::BTreeSet;

    #[test]
    fn phases_expose_their_assets_in_game() {
        let assets = vec![Asset::new("Acme", 10, 0.1, AssetType::Stock, Sector::Tech)];
        let phase = Phase::purchase(assets);
        assert_eq!(phase.kind(), PhaseKind::Purchase);
        assert_eq!(phase.assets_in_game().len(), 1);
    }

    #[test]
    fn events_phase_carries_the_partitioned_deck() {
        let deck = EventDeck::partition(vec![Event {
            name: "Halving".into(),
            description: String::new(),
            event_type: EventType::MicroEconomic,
            impacted_asset_types: BTreeSet::new(),
        }]);
        let phase = Phase::events(Vec::new(), deck);
        assert_eq!(phase.event_deck().micro_economic.len(), 1);
        assert!(phase.event_deck().macro_economic.is_empty());
    }

    #[test]
    fn play_is_safe_to_call_once_per_turn() {
        let mut phase = Phase::investment(Vec::new());
        let mut players = [Player::new("Ste")];
        assert!(phase.play(&mut players).is_ok());
        assert!(phase.play(&mut players).is_ok());
    }
}
