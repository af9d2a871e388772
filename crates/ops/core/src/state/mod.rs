//! Mutable session state owned by one operative.
//!
//! [`OpsState`] bundles the ledger, the cities and every action's progress.
//! Nothing here is global: each session (and each test) builds its own.
mod action;
mod bank;
mod city;
mod ledger;

use std::collections::{BTreeMap, BTreeSet};

pub use action::{ActionState, Remaining, next_level};
pub use bank::{OverflowBank, StoredCycles};
pub use city::{Cities, City, CityEvent, CityEventKind, CityName, Migration, MigrationRolls};
pub use ledger::{
    CurrentAction, OperativeLedger, OperativeMultipliers, OperativeStats, Personnel,
};

use crate::catalog::{ActionDefinition, ActionId, ActionType};
use crate::config::SimConfig;
use crate::rng::RngOracle;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpsState {
    pub ledger: OperativeLedger,
    pub cities: Cities,
    actions: BTreeMap<ActionId, ActionState>,
    completed_black_ops: BTreeSet<String>,
    pub overflow: OverflowBank,
    pub stored_cycles: StoredCycles,
    /// Seconds until the next random city event.
    pub event_countdown: f64,
}

impl OpsState {
    pub fn new(ledger: OperativeLedger, cities: Cities, event_countdown: f64) -> Self {
        Self {
            ledger,
            cities,
            actions: BTreeMap::new(),
            completed_black_ops: BTreeSet::new(),
            overflow: OverflowBank::default(),
            stored_cycles: StoredCycles::default(),
            event_countdown,
        }
    }

    /// Fresh session: generated cities, first event countdown armed.
    pub fn generate(
        config: &SimConfig,
        stats: OperativeStats,
        multipliers: OperativeMultipliers,
        rng: &mut impl RngOracle,
    ) -> Self {
        let cities = Cities::generate(rng);
        let countdown = next_event_countdown(rng);
        let ledger = OperativeLedger::new(stats, multipliers, config.starting_city);
        Self::new(ledger, cities, countdown)
    }

    /// Progress of `definition`, or its defaults if never touched.
    pub fn action(&self, definition: &ActionDefinition) -> ActionState {
        self.actions
            .get(&definition.id())
            .cloned()
            .unwrap_or_else(|| ActionState::new(definition))
    }

    /// Progress of `definition`, created on first access.
    pub fn action_mut(&mut self, definition: &ActionDefinition) -> &mut ActionState {
        self.actions
            .entry(definition.id())
            .or_insert_with(|| ActionState::new(definition))
    }

    pub fn tracked_actions(&self) -> impl Iterator<Item = (&ActionId, &ActionState)> {
        self.actions.iter()
    }

    pub fn is_black_op_completed(&self, name: &str) -> bool {
        self.completed_black_ops.contains(name)
    }

    pub fn completed_black_ops(&self) -> impl Iterator<Item = &str> {
        self.completed_black_ops.iter().map(String::as_str)
    }

    pub(crate) fn mark_black_op_completed(&mut self, definition: &ActionDefinition) {
        debug_assert_eq!(definition.kind, ActionType::BlackOp);
        self.completed_black_ops.insert(definition.name.clone());
    }

    pub fn current_city(&self) -> &City {
        self.cities.get(self.ledger.city)
    }
}

/// Seconds until the next random event, uniform in `[240, 600]`.
pub fn next_event_countdown(rng: &mut impl RngOracle) -> f64 {
    rng.range_i64(
        SimConfig::RANDOM_EVENT_MIN_SECONDS,
        SimConfig::RANDOM_EVENT_MAX_SECONDS,
    ) as f64
}
