//! Action execution: start, tick, resolve and reset.
//!
//! The [`Engine`] is the only writer of [`OpsState`]. It borrows the state
//! mutably for the duration of one call together with the immutable catalog
//! and configuration, so every mutation flows through the same checks.
mod errors;
mod outcome;
mod passive;
pub mod success;
pub mod timing;

pub use errors::{EngineError, RankGate};
pub use outcome::{
    Completion, OutcomeRolls, contract_earnings, rank_penalty, rank_reward,
};
pub use success::{PopulationView, clamp_chance, estimated_success_chance, success_chance};
pub use timing::{action_duration, stamina_cost, stamina_regeneration};

use crate::catalog::{ActionDefinition, ActionId, ActionType, Catalog, GeneralKind, Multiplier};
use crate::config::SimConfig;
use crate::pricing;
use crate::rng::RngOracle;
use crate::state::{CityEvent, CityName, CurrentAction, OpsState};

use outcome::apply_city_effects;

/// Why an action stopped repeating.
#[derive(Clone, Debug, PartialEq)]
pub enum StopReason {
    /// Black ops run once.
    BlackOpFinished,
    /// The next repetition could not start.
    Blocked(EngineError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stopped {
    pub id: ActionId,
    pub reason: StopReason,
}

/// Everything one `tick` did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub seconds: f64,
    pub completions: Vec<Completion>,
    pub stopped: Option<Stopped>,
    pub events: Vec<CityEvent>,
}

pub struct Engine<'a> {
    state: &'a mut OpsState,
    catalog: &'a Catalog,
    config: &'a SimConfig,
}

impl<'a> Engine<'a> {
    pub fn new(state: &'a mut OpsState, catalog: &'a Catalog, config: &'a SimConfig) -> Self {
        Self {
            state,
            catalog,
            config,
        }
    }

    pub fn state(&self) -> &OpsState {
        self.state
    }

    fn definition(&self, kind: ActionType, name: &str) -> Result<&'a ActionDefinition, EngineError> {
        let catalog = self.catalog;
        catalog
            .actions
            .lookup(kind, name)
            .ok_or_else(|| EngineError::unknown_action(kind, name))
    }

    /// Starts `(kind, name)`, replacing whatever was running.
    ///
    /// The replaced action is dropped without reward or penalty. On error
    /// nothing changes, including the running action.
    pub fn start_action(&mut self, kind: ActionType, name: &str) -> Result<(), EngineError> {
        let definition = self.definition(kind, name)?;
        if definition.kind == ActionType::BlackOp {
            self.check_black_op(definition)?;
        }
        self.begin(definition)
    }

    fn check_black_op(&self, definition: &ActionDefinition) -> Result<(), EngineError> {
        let id = definition.id();
        if self.state.is_black_op_completed(&definition.name) {
            return Err(EngineError::AlreadyCompleted { id });
        }
        if let Some(preceding) = self.catalog.actions.preceding_black_op(&definition.name)
            && !self.state.is_black_op_completed(&preceding.name)
        {
            return Err(EngineError::InsufficientRank {
                id,
                gate: RankGate::PrecedingIncomplete {
                    preceding: preceding.name.clone(),
                },
            });
        }
        let rank = self.state.ledger.rank();
        if definition.required_rank > rank {
            return Err(EngineError::InsufficientRank {
                id,
                gate: RankGate::Below {
                    required: definition.required_rank,
                    current: rank,
                },
            });
        }
        Ok(())
    }

    /// Checks resources, pays stamina and installs `definition` as current.
    fn begin(&mut self, definition: &ActionDefinition) -> Result<(), EngineError> {
        let id = definition.id();
        let progress = self.state.action(definition);
        if definition.kind.has_pool() && !progress.remaining.has_one() {
            return Err(EngineError::ActionDepleted { id });
        }
        if definition.requires_community && self.state.current_city().communities() == 0 {
            return Err(EngineError::NoCommunities { id });
        }

        let ledger = &mut self.state.ledger;
        let total = action_duration(definition, progress.level, ledger);
        let cost = stamina_cost(definition, progress.level, total);
        if ledger.stamina() < cost {
            return Err(EngineError::InsufficientStamina {
                id,
                required: cost,
                available: ledger.stamina(),
            });
        }
        ledger.spend_stamina(cost);
        ledger.current = Some(CurrentAction {
            id,
            elapsed: 0.0,
            total,
            stamina_cost: cost,
        });
        self.state.overflow.clear();
        Ok(())
    }

    /// Cancels the running action, if any, and empties the overflow bank.
    pub fn reset_action(&mut self) {
        self.state.ledger.current = None;
        self.state.overflow.clear();
    }

    /// Advances the simulation by `seconds`.
    ///
    /// Passive effects apply first. Then the current action progresses; each
    /// time progress plus the overflow bank reaches the total duration one
    /// completion resolves and the action repeats. Excess time is banked up to
    /// one full duration, so a single tick resolves at most two completions.
    pub fn tick(&mut self, seconds: f64, rng: &mut impl RngOracle) -> TickReport {
        let mut report = TickReport {
            seconds,
            ..TickReport::default()
        };
        if !seconds.is_finite() || seconds <= 0.0 {
            return report;
        }

        report.events = self.apply_passive(seconds, rng);
        if let Some(current) = self.state.ledger.current.as_mut() {
            current.elapsed += seconds;
        }

        while let Some((id, excess)) = self.due_completion() {
            self.state.overflow.clear();
            let rolls = OutcomeRolls::draw(rng);
            match self.resolve_outcome(&id, &rolls) {
                Ok(completion) => report.completions.push(completion),
                Err(err) => {
                    self.reset_action();
                    report.stopped = Some(Stopped {
                        id,
                        reason: StopReason::Blocked(err),
                    });
                    break;
                }
            }
            match self.repeat(&id) {
                Ok(total) => self.state.overflow.deposit(excess, total),
                Err(reason) => {
                    self.reset_action();
                    report.stopped = Some(Stopped { id, reason });
                }
            }
        }
        report
    }

    /// The running action's id and excess progress, when it is due.
    fn due_completion(&self) -> Option<(ActionId, f64)> {
        let current = self.state.ledger.current.as_ref()?;
        let progress = current.elapsed + self.state.overflow.banked();
        (progress >= current.total).then(|| (current.id.clone(), progress - current.total))
    }

    /// Restarts `id` after a completion. Returns the new total duration.
    fn repeat(&mut self, id: &ActionId) -> Result<f64, StopReason> {
        let catalog = self.catalog;
        let definition = catalog
            .actions
            .get(id)
            .ok_or_else(|| StopReason::Blocked(EngineError::unknown_action(id.kind, &id.name)))?;
        if definition.kind == ActionType::BlackOp {
            return Err(StopReason::BlackOpFinished);
        }
        self.begin(definition).map_err(StopReason::Blocked)?;
        Ok(self
            .state
            .ledger
            .current
            .as_ref()
            .map_or(0.0, |current| current.total))
    }

    /// Banks `cycles` engine cycles for later [`process`](Self::process) calls.
    pub fn store_cycles(&mut self, cycles: u64) {
        self.state.stored_cycles.store(cycles);
    }

    /// Spends up to five seconds of stored cycles on one tick.
    pub fn process(&mut self, rng: &mut impl RngOracle) -> Option<TickReport> {
        let seconds = self.state.stored_cycles.consume();
        (seconds > 0).then(|| self.tick(seconds as f64, rng))
    }

    /// Resolves one completion of `id` from `rolls`.
    ///
    /// Success is rolled against the clamped chance: `rolls.chance < chance`.
    pub fn resolve_outcome(
        &mut self,
        id: &ActionId,
        rolls: &OutcomeRolls,
    ) -> Result<Completion, EngineError> {
        let catalog = self.catalog;
        let definition = catalog
            .actions
            .get(id)
            .ok_or_else(|| EngineError::unknown_action(id.kind, &id.name))?;
        let level = self.state.action(definition).level;
        let chance = success_chance(
            definition,
            level,
            &self.state.ledger,
            self.state.current_city(),
            PopulationView::Actual,
        );
        let success = rolls.chance < chance;
        let mut completion = Completion {
            id: definition.id(),
            level,
            chance,
            success,
            rank_change: 0.0,
            skill_points_gained: 0,
            personnel_lost: 0,
            migration: None,
        };

        let rank_before = self.state.ledger.rank();
        match definition.general {
            Some(kind) => self.resolve_general(definition, kind, success),
            None => self.resolve_combat(definition, level, rolls, &mut completion),
        }
        completion.rank_change = self.state.ledger.rank() - rank_before;
        Ok(completion)
    }

    fn resolve_combat(
        &mut self,
        definition: &ActionDefinition,
        level: u32,
        rolls: &OutcomeRolls,
        completion: &mut Completion,
    ) {
        let id = definition.id();
        let success = completion.success;
        if success {
            let reward = rank_reward(definition, level, self.config.rank_multiplier);
            completion.skill_points_gained = self.state.ledger.change_rank(reward);
            if definition.kind == ActionType::Contract {
                let money = self.state.ledger.skill_mult(Multiplier::Money);
                self.state.ledger.earnings += contract_earnings(definition, level, money);
            }
            self.state.action_mut(definition).record_success(definition.leveling);
            if definition.kind == ActionType::BlackOp {
                self.state.mark_black_op_completed(definition);
            }
        } else {
            self.state.ledger.change_rank(-rank_penalty(definition, level));
            self.state.action_mut(definition).record_failure();
            let paid = match &self.state.ledger.current {
                Some(current) if current.id == id => current.stamina_cost,
                _ => stamina_cost(
                    definition,
                    level,
                    action_duration(definition, level, &self.state.ledger),
                ),
            };
            self.state
                .ledger
                .spend_stamina(paid * SimConfig::FAILURE_STAMINA_FRACTION);
        }

        let effects = if success {
            &definition.on_success
        } else {
            &definition.on_failure
        };
        let estimate_mult = self.state.ledger.skill_mult(Multiplier::SuccessEstimate);
        let city = self.state.ledger.city;
        completion.migration =
            apply_city_effects(&mut self.state.cities, city, effects, rolls, estimate_mult);

        if definition.kind == ActionType::BlackOp {
            let team = self.state.ledger.personnel.team_size(&id);
            if team > 0 {
                let max_losses = if success { team.div_ceil(2) } else { team };
                let losses = rolls.pick(1, max_losses);
                completion.personnel_lost = self.state.ledger.personnel.lose(&id, losses);
            }
        }
    }

    fn resolve_general(&mut self, definition: &ActionDefinition, kind: GeneralKind, success: bool) {
        let city = self.state.ledger.city;
        match kind {
            GeneralKind::Training => {
                let bonus =
                    SimConfig::TRAINING_STAMINA_BONUS * self.state.ledger.multipliers().stamina_gain;
                self.state.ledger.add_stamina_bonus(bonus);
            }
            GeneralKind::FieldAnalysis => {
                let ledger = &self.state.ledger;
                let stats = ledger.stats();
                let effectiveness = (0.04 * stats.hacking.max(0.0).powf(0.3)
                    + 0.04 * stats.intelligence.max(0.0).powf(0.9)
                    + 0.02 * stats.charisma.max(0.0).powf(0.3))
                    * ledger.multipliers().analysis;
                let percent = effectiveness * ledger.skill_mult(Multiplier::SuccessEstimate);
                self.state.cities.get_mut(city).improve_estimate_by_percent(percent);
                self.state
                    .ledger
                    .change_rank(SimConfig::FIELD_ANALYSIS_RANK_GAIN * self.config.rank_multiplier);
            }
            GeneralKind::Recruitment => {
                if success {
                    self.state.ledger.personnel.recruit(1);
                }
            }
            GeneralKind::Diplomacy => {
                let charisma = self.state.ledger.stats().charisma.max(0.0);
                let reduction = charisma.powf(SimConfig::DIPLOMACY_CHARISMA_EXPONENT)
                    + charisma / SimConfig::DIPLOMACY_CHARISMA_LINEAR;
                let factor = ((100.0 - reduction) / 100.0).max(0.0);
                self.state.cities.get_mut(city).scale_chaos(factor);
            }
            GeneralKind::Regeneration => {
                let gain = self.state.ledger.max_stamina()
                    * SimConfig::REGENERATION_STAMINA_PERCENT
                    / 100.0;
                self.state.ledger.restore_stamina(gain);
            }
            GeneralKind::InciteViolence => self.incite_violence(),
        }

        let progress = self.state.action_mut(definition);
        if success {
            progress.record_success(definition.leveling);
        } else {
            progress.record_failure();
        }
    }

    /// Sets the level used from the next attempt on.
    pub fn set_level(&mut self, kind: ActionType, name: &str, level: i64) -> Result<(), EngineError> {
        let definition = self.definition(kind, name)?;
        let progress = self.state.action_mut(definition);
        if level < 1 || level > i64::from(progress.max_level) {
            return Err(EngineError::LevelOutOfRange {
                id: definition.id(),
                level,
                max_level: progress.max_level,
            });
        }
        progress.level = level as u32;
        Ok(())
    }

    /// Toggles auto-level. Enabling it jumps to the max level immediately.
    pub fn set_auto_level(
        &mut self,
        kind: ActionType,
        name: &str,
        enabled: bool,
    ) -> Result<(), EngineError> {
        let definition = self.definition(kind, name)?;
        let progress = self.state.action_mut(definition);
        progress.auto_level = enabled;
        if enabled {
            progress.level = progress.max_level;
        }
        Ok(())
    }

    /// Buys `count` levels of `name`. All-or-nothing; returns the points spent.
    pub fn upgrade_skill(&mut self, name: &str, count: u32) -> Result<u64, EngineError> {
        let skill = self
            .catalog
            .skills
            .skill(name)
            .ok_or_else(|| EngineError::UnknownSkill {
                name: name.to_string(),
            })?;
        let ledger = &mut self.state.ledger;
        let from_level = ledger.skill_level(&skill.name);
        let cost = pricing::skill_upgrade_cost(
            skill,
            from_level,
            count,
            self.config.skill_cost_multiplier,
        )?;
        pricing::ensure_affordable(cost, ledger.skill_points())?;
        ledger.apply_skill_purchase(&skill.name, count, cost, self.catalog.skills.iter());
        Ok(cost)
    }

    /// Assigns `size` personnel to `(kind, name)`. Returns the stored size.
    pub fn set_team_size(
        &mut self,
        kind: ActionType,
        name: &str,
        size: i64,
    ) -> Result<u64, EngineError> {
        let definition = self.definition(kind, name)?;
        let id = definition.id();
        let personnel = &mut self.state.ledger.personnel;
        let size = pricing::validate_team_size(
            kind,
            size,
            personnel.assigned_elsewhere(&id),
            personnel.recruited(),
        )?;
        personnel.assign(id, size);
        Ok(size)
    }

    /// Moves the operative. Touches nothing but the current city.
    pub fn switch_city(&mut self, city: CityName) {
        self.state.ledger.city = city;
    }
}
