//! Mutations: every one returns a structured [`RuntimeError`] on refusal and
//! leaves the session untouched in that case.

use ops_core::{CityName, Engine, EngineError};
use tracing::{debug, info};

use super::Session;
use crate::error::{Result, RuntimeError};
use crate::event_log::SessionEvent;

impl Session {
    /// Starts an action, replacing the running one.
    pub fn start_action(&mut self, kind: &str, name: &str) -> Result<()> {
        let kind = Self::parse_kind(kind)?;
        Engine::new(&mut self.state, &self.catalog, &self.config)
            .start_action(kind, name.trim())
            .inspect_err(|err| debug!(%kind, name, error = %err, "start refused"))?;

        if let Some(current) = &self.state.ledger.current {
            info!(action = %current.id, duration = current.total, "action started");
            self.events.push(SessionEvent::ActionStarted {
                id: current.id.clone(),
            });
        }
        Ok(())
    }

    /// Cancels the running action without reward or penalty. Returns whether
    /// anything was running.
    pub fn stop_action(&mut self) -> bool {
        let previous = self.state.ledger.current.as_ref().map(|current| current.id.clone());
        Engine::new(&mut self.state, &self.catalog, &self.config).reset_action();
        match previous {
            Some(id) => {
                info!(action = %id, "action reset");
                self.events.push(SessionEvent::ActionReset { id });
                true
            }
            None => false,
        }
    }

    pub fn set_action_level(&mut self, kind: &str, name: &str, level: i64) -> Result<()> {
        let kind = Self::parse_kind(kind)?;
        Engine::new(&mut self.state, &self.catalog, &self.config).set_level(kind, name.trim(), level)?;
        Ok(())
    }

    pub fn set_action_auto_level(&mut self, kind: &str, name: &str, enabled: bool) -> Result<()> {
        let kind = Self::parse_kind(kind)?;
        Engine::new(&mut self.state, &self.catalog, &self.config).set_auto_level(
            kind,
            name.trim(),
            enabled,
        )?;
        Ok(())
    }

    /// Buys `count` levels of a skill. Returns the skill points spent.
    pub fn upgrade_skill(&mut self, name: &str, count: u32) -> Result<u64> {
        let cost = Engine::new(&mut self.state, &self.catalog, &self.config)
            .upgrade_skill(name.trim(), count)?;
        let skill = self
            .catalog
            .skills
            .skill(name.trim())
            .map_or_else(|| name.to_string(), |skill| skill.name.clone());
        info!(%skill, levels = count, cost, "skill upgraded");
        self.events.push(SessionEvent::SkillUpgraded {
            skill,
            levels: count,
            cost,
        });
        Ok(cost)
    }

    /// Assigns personnel to an operation or black op. Returns the new size.
    pub fn set_team_size(&mut self, kind: &str, name: &str, size: i64) -> Result<u64> {
        let kind = Self::parse_kind(kind)?;
        let size = Engine::new(&mut self.state, &self.catalog, &self.config).set_team_size(
            kind,
            name.trim(),
            size,
        )?;
        if let Some(definition) = self.catalog.actions.lookup(kind, name.trim()) {
            self.events.push(SessionEvent::TeamAssigned {
                id: definition.id(),
                size,
            });
        }
        Ok(size)
    }

    pub fn switch_city(&mut self, name: &str) -> Result<()> {
        let city = CityName::parse(name).ok_or_else(|| {
            RuntimeError::from(EngineError::UnknownCity {
                name: name.to_string(),
            })
        })?;
        let from = self.state.ledger.city;
        Engine::new(&mut self.state, &self.catalog, &self.config).switch_city(city);
        if from != city {
            info!(%from, to = %city, "switched city");
            self.events.push(SessionEvent::CitySwitched { from, to: city });
        }
        Ok(())
    }
}
