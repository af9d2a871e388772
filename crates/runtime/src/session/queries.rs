//! Read-only queries addressed by script-supplied names.
//!
//! None of these fail: an unknown type or name yields the documented
//! sentinel (`-1`, `[-1, -1]` or `false`) and a debug log line.

use ops_core::engine::{action_duration, estimated_success_chance, rank_reward};
use ops_core::pricing;
use ops_core::ActionType;
use serde::Serialize;
use tracing::debug;

use super::Session;

/// Type and name of the running action; both `"Idle"` when nothing runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActionView {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

impl ActionView {
    pub const IDLE: &'static str = "Idle";

    pub fn idle() -> Self {
        Self {
            kind: Self::IDLE.to_string(),
            name: Self::IDLE.to_string(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.kind == Self::IDLE
    }
}

impl Session {
    pub fn contract_names(&self) -> Vec<String> {
        self.names(ActionType::Contract)
    }

    pub fn operation_names(&self) -> Vec<String> {
        self.names(ActionType::Operation)
    }

    /// Black operations in catalog order.
    pub fn black_op_names(&self) -> Vec<String> {
        self.names(ActionType::BlackOp)
    }

    pub fn general_action_names(&self) -> Vec<String> {
        self.names(ActionType::General)
    }

    pub fn skill_names(&self) -> Vec<String> {
        self.catalog
            .skills
            .skill_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn names(&self, kind: ActionType) -> Vec<String> {
        self.catalog
            .actions
            .list_names(kind)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Rank a black op requires; `-1` for unknown names.
    pub fn black_op_rank(&self, name: &str) -> f64 {
        self.lookup("black_op_rank", "blackops", name)
            .map_or(-1.0, |definition| definition.required_rank)
    }

    pub fn current_action(&self) -> ActionView {
        match &self.state.ledger.current {
            Some(current) => ActionView {
                kind: current.id.kind.to_string(),
                name: current.id.name.clone(),
            },
            None => ActionView::idle(),
        }
    }

    /// Duration of one attempt at the action's current level, in ms.
    pub fn action_time_ms(&self, kind: &str, name: &str) -> f64 {
        let Some(definition) = self.lookup("action_time", kind, name) else {
            return -1.0;
        };
        let level = self.state.action(definition).level;
        action_duration(definition, level, &self.state.ledger) * 1000.0
    }

    /// Progress of the running attempt in ms, including banked overflow;
    /// `0` when idle.
    pub fn action_current_time_ms(&self) -> f64 {
        self.state.ledger.current.as_ref().map_or(0.0, |current| {
            (current.elapsed + self.state.overflow.banked()).min(current.total) * 1000.0
        })
    }

    /// `[low, high]` the operative believes the success chance lies in.
    pub fn estimated_success_chance(&self, kind: &str, name: &str) -> [f64; 2] {
        let Some(definition) = self.lookup("estimated_success_chance", kind, name) else {
            return [-1.0, -1.0];
        };
        let level = self.state.action(definition).level;
        let (low, high) = estimated_success_chance(
            definition,
            level,
            &self.state.ledger,
            self.state.current_city(),
        );
        [low, high]
    }

    /// Rank a success at `level` (current level when `None`) would grant.
    pub fn rank_gain(&self, kind: &str, name: &str, level: Option<i64>) -> f64 {
        let Some(definition) = self.lookup("rank_gain", kind, name) else {
            return -1.0;
        };
        let level = match level {
            None => self.state.action(definition).level,
            Some(level) if level >= 1 => u32::try_from(level).unwrap_or(u32::MAX),
            Some(level) => {
                debug!(kind, name, level, "level below 1, returning sentinel");
                return -1.0;
            }
        };
        rank_reward(definition, level, self.config.rank_multiplier)
    }

    /// Whole units left in the action's pool.
    ///
    /// General actions never run out (`+inf`); black ops report `0` once
    /// completed and `1` before.
    pub fn action_count_remaining(&self, kind: &str, name: &str) -> f64 {
        let Some(definition) = self.lookup("action_count_remaining", kind, name) else {
            return -1.0;
        };
        if definition.kind == ActionType::BlackOp {
            return if self.state.is_black_op_completed(&definition.name) {
                0.0
            } else {
                1.0
            };
        }
        self.state.action(definition).remaining.floored()
    }

    pub fn action_max_level(&self, kind: &str, name: &str) -> i64 {
        self.lookup("action_max_level", kind, name)
            .map_or(-1, |definition| i64::from(self.state.action(definition).max_level))
    }

    pub fn action_current_level(&self, kind: &str, name: &str) -> i64 {
        self.lookup("action_current_level", kind, name)
            .map_or(-1, |definition| i64::from(self.state.action(definition).level))
    }

    /// Whether the action levels itself up; `false` for unknown actions.
    pub fn action_auto_level(&self, kind: &str, name: &str) -> bool {
        self.lookup("action_auto_level", kind, name)
            .is_some_and(|definition| self.state.action(definition).auto_level)
    }

    /// Personnel assigned to the action. An empty type and name together ask
    /// for the whole recruited pool.
    pub fn team_size(&self, kind: &str, name: &str) -> i64 {
        let personnel = &self.state.ledger.personnel;
        if kind.trim().is_empty() && name.trim().is_empty() {
            return to_i64(personnel.recruited());
        }
        self.lookup("team_size", kind, name)
            .map_or(-1, |definition| to_i64(personnel.team_size(&definition.id())))
    }

    pub fn skill_level(&self, name: &str) -> i64 {
        match self.catalog.skills.skill(name) {
            Some(skill) => i64::from(self.state.ledger.skill_level(&skill.name)),
            None => {
                debug!(skill = name, "unknown skill, returning sentinel");
                -1
            }
        }
    }

    /// Skill points `count` more levels of `name` would cost; `-1` for an
    /// unknown skill, a zero count or a purchase past the max level.
    pub fn skill_upgrade_cost(&self, name: &str, count: u32) -> i64 {
        let Some(skill) = self.catalog.skills.skill(name) else {
            debug!(skill = name, "unknown skill, returning sentinel");
            return -1;
        };
        let from_level = self.state.ledger.skill_level(&skill.name);
        match pricing::skill_upgrade_cost(skill, from_level, count, self.config.skill_cost_multiplier)
        {
            Ok(cost) => to_i64(cost),
            Err(err) => {
                debug!(skill = name, count, error = %err, "upgrade not priceable, returning sentinel");
                -1
            }
        }
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
