//! Effects of simulated time that do not depend on the current action.

use strum::IntoEnumIterator;

use crate::config::SimConfig;
use crate::rng::RngOracle;
use crate::state::{CityEvent, CityName, next_event_countdown};

use super::Engine;
use super::timing::stamina_regeneration;

impl Engine<'_> {
    /// Regenerates stamina, grows pools, decays chaos and fires due random
    /// events. Returns the events fired.
    pub(super) fn apply_passive(&mut self, seconds: f64, rng: &mut impl RngOracle) -> Vec<CityEvent> {
        let regained = stamina_regeneration(&self.state.ledger, seconds);
        self.state.ledger.restore_stamina(regained);

        self.grow_pools(seconds);
        self.state.cities.decay_chaos(seconds);

        let mut events = Vec::new();
        if self.config.random_events {
            self.state.event_countdown -= seconds;
            if self.state.event_countdown <= 0.0 {
                events.push(self.state.cities.random_event(rng));
                self.state.event_countdown = next_event_countdown(rng);
            }
        }
        events
    }

    /// Adds `countGrowth * seconds / 480` to every contract and operation pool.
    pub(super) fn grow_pools(&mut self, seconds: f64) {
        let catalog = self.catalog;
        let pooled = catalog
            .actions
            .iter()
            .filter(|definition| definition.kind.has_pool() && definition.count_growth > 0.0);
        for definition in pooled {
            let growth = definition.count_growth * seconds / SimConfig::ACTION_COUNT_GROWTH_PERIOD;
            self.state.action_mut(definition).grow(growth);
        }
    }

    /// Incite Violence: every pool gains 180 seconds of growth and every
    /// city's chaos jumps by `10` then by `chaos / log10(chaos)`.
    pub(super) fn incite_violence(&mut self) {
        self.grow_pools(SimConfig::INCITE_VIOLENCE_GROWTH_SECONDS);
        for city in CityName::iter() {
            let target = self.state.cities.get_mut(city);
            target.change_chaos_by_count(SimConfig::INCITE_VIOLENCE_CHAOS);
            let chaos = target.chaos();
            target.change_chaos_by_count(chaos / chaos.log10());
        }
    }
}
