//! Player portfolio ledger — buy/sell/invest/strategy-change bookkeeping.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::asset::{Asset, AssetAction, AssetStatus, Sector, ALL_ASSET_TYPES};
use crate::error::GameError;
use crate::market::Trend;
use crate::settings::INITIAL_CAPITAL;

/// One step of an investment plan: an action applied to a named asset.
#[derive(Clone, Debug)]
pub struct InvestmentStep {
    pub asset: String,
    pub action: AssetAction,
}

/// A player: a capital balance plus a named portfolio of owned assets.
#[derive(Clone, Debug)]
pub struct Player {
    name: String,
    capital: i64,
    portfolio: BTreeMap<String, Asset>,
}

impl Player {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            capital: INITIAL_CAPITAL,
            portfolio: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capital(&self) -> i64 {
        self.capital
    }

    /// Overwrite the capital balance. Event effects and external
    /// collaborators adjust capital through this.
    pub fn set_capital(&mut self, capital: i64) {
        self.capital = capital;
    }

    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        self.portfolio.values()
    }

    pub fn asset(&self, name: &str) -> Option<&Asset> {
        self.portfolio.get(name)
    }

    // ── Trading ────────────────────────────────────────────────────────

    /// Debit the price and take ownership of the asset.
    ///
    /// Rejects a purchase the player cannot afford, and a duplicate name
    /// (an asset is owned by exactly one player; silently overwriting a
    /// portfolio entry would leak the old asset).
    pub fn buy(&mut self, asset: Asset) -> Result<(), GameError> {
        if self.capital < asset.price() as i64 {
            return Err(GameError::InsufficientCapital {
                player: self.name.clone(),
                asset: asset.name().to_string(),
                price: asset.price(),
                capital: self.capital,
            });
        }
        if self.portfolio.contains_key(asset.name()) {
            return Err(GameError::AssetAlreadyOwned(asset.name().to_string()));
        }
        self.capital -= asset.price() as i64;
        debug!(player = %self.name, asset = %asset.name(), "bought asset");
        self.portfolio.insert(asset.name().to_string(), asset);
        Ok(())
    }

    /// Credit back the invested amount plus the price, and drop the asset.
    pub fn sell(&mut self, asset_name: &str) -> Result<(), GameError> {
        let asset = self
            .portfolio
            .remove(asset_name)
            .ok_or_else(|| GameError::AssetNotOwned(asset_name.to_string()))?;
        self.capital += asset.invested_amount() as i64;
        self.capital += asset.price() as i64;
        debug!(player = %self.name, asset = asset_name, "sold asset");
        Ok(())
    }

    /// Execute an ordered investment plan.
    ///
    /// Fail-fast: the failing step aborts the remainder of the plan; steps
    /// already applied stand.
    pub fn invest(&mut self, plan: &[InvestmentStep]) -> Result<(), GameError> {
        for step in plan {
            let asset = self
                .portfolio
                .get_mut(&step.asset)
                .ok_or_else(|| GameError::AssetNotOwned(step.asset.clone()))?;
            asset.apply(step.action)?;
        }
        Ok(())
    }

    /// Flip the investment strategy on each named asset.
    ///
    /// All-or-nothing: ownership and the rate limit are validated for every
    /// asset before anything is applied, so a single bad name or cooldown
    /// leaves the whole batch untouched. Duplicate names are collapsed.
    pub fn change_strategy(
        &mut self,
        asset_names: &[String],
        current_turn: i64,
    ) -> Result<(), GameError> {
        let names: BTreeSet<&str> = asset_names.iter().map(String::as_str).collect();
        for name in &names {
            self.portfolio
                .get(*name)
                .ok_or_else(|| GameError::AssetNotOwned(name.to_string()))?
                .strategy_change_allowed(current_turn)?;
        }
        for name in &names {
            // Cannot fail: validated above, and each asset appears once.
            if let Some(asset) = self.portfolio.get_mut(*name) {
                asset.change_investment_strategy(current_turn)?;
            }
        }
        Ok(())
    }

    // ── Income ─────────────────────────────────────────────────────────

    /// Collect this turn's interest from every asset into capital.
    /// Runs once per turn per player; returns the net income.
    pub fn collect_income(&mut self, trend: Trend) -> i64 {
        let income: i64 = self
            .portfolio
            .values()
            .map(|a| a.calculate_interest(trend))
            .sum();
        self.capital += income;
        income
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// Bankruptcy: nothing left to sell and a negative balance.
    pub fn is_bankrupt(&self) -> bool {
        self.portfolio.is_empty() && self.capital < 0
    }

    pub fn capital_invested(&self) -> i64 {
        self.portfolio
            .values()
            .map(|a| a.invested_amount() as i64)
            .sum()
    }

    /// Number of distinct sectors the portfolio spans.
    pub fn num_sector_investments(&self) -> usize {
        let sectors: BTreeSet<Sector> = self.portfolio.values().map(|a| a.sector()).collect();
        sectors.len()
    }

    /// Diversified: at least one asset of every asset type.
    pub fn is_portfolio_diversified(&self) -> bool {
        ALL_ASSET_TYPES
            .iter()
            .all(|kind| self.portfolio.values().any(|a| a.kind() == *kind))
    }

    pub fn has_asset_on_hold(&self) -> bool {
        self.portfolio
            .values()
            .any(|a| a.status() == AssetStatus::OnHold)
    }

    /// Reactivate every OnHold asset whose suspension turn has fully passed.
    /// Called by the game loop when advancing the turn.
    pub(crate) fn reactivate_suspended_assets(&mut self, current_turn: i64) {
        for asset in self.portfolio.values_mut() {
            if !asset.is_active() && asset.last_strategy_change_turn() < current_turn {
                asset.change_status();
            }
        }
    }
}
