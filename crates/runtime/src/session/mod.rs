//! The session: one operative, one catalog, one random source.
//!
//! A [`Session`] is a plain owned value. Every engine call borrows its state
//! for the duration of that call, and every outcome is appended to the
//! session's [`EventLog`].

mod mutations;
mod queries;
mod telemetry;

pub use queries::ActionView;
pub use telemetry::Telemetry;

use ops_content::{ScenarioConfig, standard_catalog};
use ops_core::{
    ActionDefinition, ActionType, Catalog, Engine, OpsState, PcgRng, SimConfig, StopReason,
    TickReport,
};
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::event_log::{EventLog, SessionEvent};

pub struct Session {
    catalog: Catalog,
    config: SimConfig,
    state: OpsState,
    rng: PcgRng,
    events: EventLog,
}

impl Session {
    /// Create a new session builder
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Advances the simulation by `seconds` of game time.
    pub fn tick(&mut self, seconds: f64) -> TickReport {
        let report =
            Engine::new(&mut self.state, &self.catalog, &self.config).tick(seconds, &mut self.rng);
        self.record(&report);
        report
    }

    /// Banks engine cycles (five per second) for [`process`](Self::process).
    pub fn store_cycles(&mut self, cycles: u64) {
        Engine::new(&mut self.state, &self.catalog, &self.config).store_cycles(cycles);
    }

    /// Spends up to five seconds of stored cycles. `None` when the store is empty.
    pub fn process(&mut self) -> Option<TickReport> {
        let report =
            Engine::new(&mut self.state, &self.catalog, &self.config).process(&mut self.rng)?;
        self.record(&report);
        Some(report)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> &OpsState {
        &self.state
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    fn record(&mut self, report: &TickReport) {
        for completion in &report.completions {
            debug!(
                action = %completion.id,
                success = completion.success,
                chance = completion.chance,
                rank_change = completion.rank_change,
                "action completed"
            );
            self.events.push(SessionEvent::Completed(completion.clone()));
        }
        for event in &report.events {
            info!(city = %event.city, kind = %event.kind, "city event");
            self.events.push(SessionEvent::City(*event));
        }
        if let Some(stopped) = &report.stopped {
            let reason = match &stopped.reason {
                StopReason::BlackOpFinished => {
                    info!(action = %stopped.id, "black op finished");
                    "black op finished".to_string()
                }
                StopReason::Blocked(err) => {
                    warn!(action = %stopped.id, error = %err, "action stopped");
                    err.to_string()
                }
            };
            self.events.push(SessionEvent::ActionStopped {
                id: stopped.id.clone(),
                reason,
            });
        }
    }

    fn parse_kind(kind: &str) -> Result<ActionType> {
        ActionType::parse(kind).ok_or_else(|| RuntimeError::UnknownActionType {
            input: kind.to_string(),
        })
    }

    /// Resolves a script-supplied `(type, name)` pair, logging misses.
    fn lookup(&self, query: &'static str, kind: &str, name: &str) -> Option<&ActionDefinition> {
        let found = self.catalog.actions.resolve(kind, name);
        if found.is_none() {
            debug!(query, kind, name, "unknown action, returning sentinel");
        }
        found
    }
}

/// Builder for [`Session`].
pub struct SessionBuilder {
    config: RuntimeConfig,
    catalog: Option<Catalog>,
    scenario: Option<ScenarioConfig>,
    state: Option<OpsState>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
            scenario: None,
            state: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `catalog` instead of the embedded standard catalog.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Use `scenario` instead of the one the runtime configuration points at.
    pub fn scenario(mut self, scenario: ScenarioConfig) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Provide initial session state instead of generating one.
    pub fn initial_state(mut self, state: OpsState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn build(self) -> Result<Session> {
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => standard_catalog().map_err(RuntimeError::content)?,
        };
        let scenario = match self.scenario {
            Some(scenario) => scenario,
            None => self.config.scenario()?,
        };

        let mut rng = PcgRng::seed_from_u64(self.config.seed);
        let state = match self.state {
            Some(state) => state,
            None => OpsState::generate(
                &scenario.sim,
                scenario.operative,
                scenario.multipliers,
                &mut rng,
            ),
        };

        info!(
            seed = self.config.seed,
            actions = catalog.actions.len(),
            skills = catalog.skills.skill_names().len(),
            city = %state.ledger.city,
            "session created"
        );

        Ok(Session {
            catalog,
            config: scenario.sim,
            state,
            rng,
            events: EventLog::new(self.config.event_log_capacity),
        })
    }
}
