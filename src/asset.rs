//! Tradable assets — status/strategy state machines and interest math.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::GameError;
use crate::market::Trend;
use crate::settings::STRATEGY_CHANGE_INTERVAL;

// ── Enumerations ──────────────────────────────────────────────────────

/// Kind of tradable asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum AssetType {
    Bond,
    Stock,
    Crypto,
}

/// All asset types, in display order.
pub const ALL_ASSET_TYPES: [AssetType; 3] = [AssetType::Bond, AssetType::Stock, AssetType::Crypto];

impl FromStr for AssetType {
    type Err = GameError;

    /// Case-insensitive, matching the loose capitalization of content files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for kind in ALL_ASSET_TYPES {
            if s.eq_ignore_ascii_case(kind.as_str()) {
                return Ok(kind);
            }
        }
        Err(GameError::InvalidEnumValue {
            kind: "asset type",
            value: s.to_string(),
        })
    }
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Bond => "Bond",
            AssetType::Stock => "Stock",
            AssetType::Crypto => "Crypto",
        }
    }
}

/// Market sector an asset belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sector {
    Energy,
    Materials,
    Healthcare,
    Finance,
    Tech,
    Semiconductors,
    Communication,
    RealEstate,
    ConsumerGoods,
}

pub const ALL_SECTORS: [Sector; 9] = [
    Sector::Energy,
    Sector::Materials,
    Sector::Healthcare,
    Sector::Finance,
    Sector::Tech,
    Sector::Semiconductors,
    Sector::Communication,
    Sector::RealEstate,
    Sector::ConsumerGoods,
];

impl Sector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Energy => "Energy",
            Sector::Materials => "Materials",
            Sector::Healthcare => "Healthcare",
            Sector::Finance => "Finance",
            Sector::Tech => "Technology",
            Sector::Semiconductors => "Semiconductors",
            Sector::Communication => "CommunicationServices",
            Sector::RealEstate => "RealEstate",
            Sector::ConsumerGoods => "ConsumerGoods",
        }
    }
}

impl FromStr for Sector {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for sector in ALL_SECTORS {
            if s == sector.as_str() {
                return Ok(sector);
            }
        }
        Err(GameError::InvalidEnumValue {
            kind: "sector",
            value: s.to_string(),
        })
    }
}

/// Asset status. OnHold assets accrue no interest and block victory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetStatus {
    Active,
    OnHold,
}

impl AssetStatus {
    /// Toggle to the other status. No guard, no data carried.
    pub fn switch(self) -> Self {
        match self {
            AssetStatus::Active => AssetStatus::OnHold,
            AssetStatus::OnHold => AssetStatus::Active,
        }
    }
}

/// Long bets the trend goes up, Short bets it goes down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvestmentStrategy {
    Long,
    Short,
}

impl InvestmentStrategy {
    pub fn switch(self) -> Self {
        match self {
            InvestmentStrategy::Long => InvestmentStrategy::Short,
            InvestmentStrategy::Short => InvestmentStrategy::Long,
        }
    }
}

/// The closed set of per-asset investment operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetAction {
    Invest(u64),
    Disinvest(u64),
}

// ── Asset ─────────────────────────────────────────────────────────────

/// A tradable asset owned by exactly one player.
#[derive(Clone, Debug)]
pub struct Asset {
    name: String,
    price: u64,
    interest_rate: f64,
    kind: AssetType,
    sector: Sector,
    invested_amount: u64,
    status: AssetStatus,
    strategy: InvestmentStrategy,
    last_strategy_change_turn: i64,
}

impl Asset {
    pub fn new(name: &str, price: u64, interest_rate: f64, kind: AssetType, sector: Sector) -> Self {
        Self {
            name: name.to_string(),
            price,
            interest_rate,
            kind,
            sector,
            invested_amount: 0,
            status: AssetStatus::Active,
            strategy: InvestmentStrategy::Long,
            // A change is always legal on turn 1.
            last_strategy_change_turn: -STRATEGY_CHANGE_INTERVAL,
        }
    }

    /// Construct from raw content-file strings, rejecting unknown enum values.
    pub fn from_raw(
        name: &str,
        price: u64,
        interest_rate: f64,
        kind: &str,
        sector: &str,
    ) -> Result<Self, GameError> {
        Ok(Self::new(
            name,
            price,
            interest_rate,
            kind.parse()?,
            sector.parse()?,
        ))
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    pub fn kind(&self) -> AssetType {
        self.kind
    }

    pub fn sector(&self) -> Sector {
        self.sector
    }

    pub fn invested_amount(&self) -> u64 {
        self.invested_amount
    }

    pub fn status(&self) -> AssetStatus {
        self.status
    }

    pub fn strategy(&self) -> InvestmentStrategy {
        self.strategy
    }

    pub fn last_strategy_change_turn(&self) -> i64 {
        self.last_strategy_change_turn
    }

    pub fn is_active(&self) -> bool {
        self.status == AssetStatus::Active
    }

    // ── Operations ─────────────────────────────────────────────────────

    /// Dispatch one of the closed investment operations.
    pub fn apply(&mut self, action: AssetAction) -> Result<(), GameError> {
        match action {
            AssetAction::Invest(amount) => {
                self.invest(amount);
                Ok(())
            }
            AssetAction::Disinvest(amount) => self.disinvest(amount),
        }
    }

    pub fn invest(&mut self, amount: u64) {
        self.invested_amount += amount;
    }

    /// Fails (leaving the invested amount untouched) when asked for more
    /// than is invested.
    pub fn disinvest(&mut self, amount: u64) -> Result<(), GameError> {
        if amount > self.invested_amount {
            return Err(GameError::OverDisinvestment {
                asset: self.name.clone(),
                requested: amount,
                invested: self.invested_amount,
            });
        }
        self.invested_amount -= amount;
        Ok(())
    }

    /// Interest for the current turn.
    ///
    /// The unsigned magnitude `ceil(invested_amount * interest_rate)` is
    /// computed first, then signed: 0 while OnHold, -1 when an Active bet
    /// mismatches the trend (Long on a DOWN turn, Short on an UP turn),
    /// +1 otherwise.
    pub fn calculate_interest(&self, trend: Trend) -> i64 {
        let multiplier: i64 = if !self.is_active() {
            0
        } else if (trend == Trend::Down && self.strategy == InvestmentStrategy::Long)
            || (trend == Trend::Up && self.strategy == InvestmentStrategy::Short)
        {
            -1
        } else {
            1
        };
        let gross = (self.invested_amount as f64 * self.interest_rate).ceil() as i64;
        gross * multiplier
    }

    /// Error raised if a strategy change on this asset is still rate-limited.
    pub fn strategy_change_allowed(&self, current_turn: i64) -> Result<(), GameError> {
        if current_turn - self.last_strategy_change_turn < STRATEGY_CHANGE_INTERVAL {
            return Err(GameError::StrategyChangeTooSoon {
                asset: self.name.clone(),
                remaining: self.last_strategy_change_turn + STRATEGY_CHANGE_INTERVAL
                    - current_turn,
            });
        }
        Ok(())
    }

    /// Flip the investment strategy, subject to the rate limit.
    ///
    /// An Active asset additionally goes OnHold for one turn (no income
    /// while the new position settles).
    pub fn change_investment_strategy(&mut self, current_turn: i64) -> Result<(), GameError> {
        self.strategy_change_allowed(current_turn)?;
        self.strategy = self.strategy.switch();
        if self.is_active() {
            self.change_status();
        }
        self.last_strategy_change_turn = current_turn;
        Ok(())
    }

    pub fn change_status(&mut self) {
        self.status = self.status.switch();
    }

    /// Whether an event hitting the given asset types touches this asset.
    /// Events only impact Active assets; that check belongs to the caller.
    pub fn is_impacted_by(&self, impacted_types: &BTreeSet<AssetType>) -> bool {
        impacted_types.contains(&self.kind)
    }
}

// ── Catalog loading ───────────────────────────────────────────────────

/// On-disk shape of one catalog entry: asset-name → descriptors.
#[derive(Debug, Deserialize)]
struct AssetRecord {
    price: u64,
    interest_rate: f64,
    #[serde(rename = "type")]
    kind: String,
    sector: String,
}

/// Load the purchasable-asset catalog from a JSON content file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Asset>, GameError> {
    let raw = fs::read_to_string(path)?;
    parse_catalog(&raw)
}

fn parse_catalog(raw: &str) -> Result<Vec<Asset>, GameError> {
    let records: BTreeMap<String, AssetRecord> = serde_json::from_str(raw)?;
    records
        .into_iter()
        .map(|(name, r)| Asset::from_raw(&name, r.price, r.interest_rate, &r.kind, &r.sector))
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_asset_type() -> impl Strategy<Value = AssetType> {
        prop_oneof![
            Just(AssetType::Bond),
            Just(AssetType::Stock),
            Just(AssetType::Crypto),
        ]
    }

    proptest! {
        #[test]
        fn prop_invest_disinvest_round_trips(
            initial in 0u64..1_000_000,
            delta in 0u64..1_000_000,
        ) {
            let mut asset = Asset::new("A", 1, 0.1, AssetType::Stock, Sector::Energy);
            asset.invest(initial);
            asset.invest(delta);
            asset.disinvest(delta).unwrap();
            prop_assert_eq!(asset.invested_amount(), initial);
        }

        #[test]
        fn prop_over_disinvest_always_fails_unchanged(
            invested in 0u64..1_000_000,
            excess in 1u64..1_000_000,
        ) {
            let mut asset = Asset::new("A", 1, 0.1, AssetType::Stock, Sector::Energy);
            asset.invest(invested);
            let result = asset.disinvest(invested + excess);
            prop_assert!(
                matches!(result, Err(GameError::OverDisinvestment { .. })),
                "expected OverDisinvestment error"
            );
            prop_assert_eq!(asset.invested_amount(), invested);
        }

        #[test]
        fn prop_on_hold_interest_is_zero(
            kind in arb_asset_type(),
            invested in 0u64..1_000_000,
            rate in 0.0f64..10.0,
        ) {
            let mut asset = Asset::new("A", 1, rate, kind, Sector::Energy);
            asset.invest(invested);
            asset.change_status();
            prop_assert_eq!(asset.calculate_interest(Trend::Up), 0);
            prop_assert_eq!(asset.calculate_interest(Trend::Down), 0);
        }

        #[test]
        fn prop_interest_signs_mirror_across_trend(
            invested in 1u64..1_000_000,
            rate in 0.001f64..10.0,
        ) {
            let mut asset = Asset::new("A", 1, rate, AssetType::Crypto, Sector::Tech);
            asset.invest(invested);
            let up = asset.calculate_interest(Trend::Up);
            let down = asset.calculate_interest(Trend::Down);
            prop_assert_eq!(up, -down);
            prop_assert!(up >= 0);
        }

        #[test]
        fn prop_interest_magnitude_never_rounds_down(
            invested in 1u64..100_000,
            rate in 0.001f64..10.0,
        ) {
            let mut asset = Asset::new("A", 1, rate, AssetType::Crypto, Sector::Tech);
            asset.invest(invested);
            let up = asset.calculate_interest(Trend::Up) as f64;
            prop_assert!(up >= invested as f64 * rate);
        }
    }
}
