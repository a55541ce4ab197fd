//! In-game economic events and their JSON content loader.
//!
//! Content files map an event id to its descriptors:
//! `{"e1": {"name": ..., "description": ..., "type": "micro"|"macro",
//! "impacted_assets": ["crypto", ...]}, ...}`.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::asset::AssetType;
use crate::error::GameError;

/// Scope of an economic event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventType {
    MicroEconomic,
    MacroEconomic,
}

impl FromStr for EventType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("micro") {
            Ok(EventType::MicroEconomic)
        } else if s.eq_ignore_ascii_case("macro") {
            Ok(EventType::MacroEconomic)
        } else {
            Err(GameError::InvalidEnumValue {
                kind: "event type",
                value: s.to_string(),
            })
        }
    }
}

/// An economic event. Events only impact Active assets of the listed types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub description: String,
    pub event_type: EventType,
    pub impacted_asset_types: BTreeSet<AssetType>,
}

/// On-disk shape of one event record.
#[derive(Debug, Deserialize)]
struct EventRecord {
    name: String,
    description: String,
    #[serde(rename = "type")]
    event_type: String,
    impacted_assets: Vec<String>,
}

/// Load the event set from a JSON content file, keyed by event id.
pub fn load_events(path: impl AsRef<Path>) -> Result<Vec<Event>, GameError> {
    let raw = fs::read_to_string(path)?;
    parse_events(&raw)
}

fn parse_events(raw: &str) -> Result<Vec<Event>, GameError> {
    let records: BTreeMap<String, EventRecord> = serde_json::from_str(raw)?;
    records
        .into_values()
        .map(|r| {
            let impacted = r
                .impacted_assets
                .iter()
                .map(|t| t.parse())
                .collect::<Result<BTreeSet<AssetType>, _>>()?;
            Ok(Event {
                name: r.name,
                description: r.description,
                event_type: r.event_type.parse()?,
                impacted_asset_types: impacted,
            })
        })
        .collect()
}

/// Event pool for the events phase, partitioned by scope.
#[derive(Clone, Debug, Default)]
pub struct EventDeck {
    pub micro_economic: Vec<Event>,
    pub macro_economic: Vec<Event>,
}

impl EventDeck {
    pub fn partition(events: Vec<Event>) -> Self {
        let (micro, macr): (Vec<Event>, Vec<Event>) = events
            .into_iter()
            .partition(|e| e.event_type == EventType::MicroEconomic);
        Self {
            micro_economic: micro,
            macro_economic: macr,
        }
    }
}
