//! Operative and city read-outs.

use ops_core::{City, CityName, EngineError};
use serde::Serialize;

use super::{ActionView, Session};
use crate::error::{Result, RuntimeError};

/// Point-in-time summary of the operative.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Telemetry {
    pub rank: f64,
    pub skill_points: u64,
    pub stamina: f64,
    pub max_stamina: f64,
    pub city: CityName,
    pub current_action: ActionView,
    pub earnings: f64,
    pub recruited: u64,
    pub personnel_lost: u64,
    pub completed_black_ops: usize,
    pub bonus_time_ms: u64,
}

impl Session {
    pub fn rank(&self) -> f64 {
        self.state.ledger.rank()
    }

    pub fn skill_points(&self) -> u64 {
        self.state.ledger.skill_points()
    }

    /// `[current, max]`
    pub fn stamina(&self) -> [f64; 2] {
        let ledger = &self.state.ledger;
        [ledger.stamina(), ledger.max_stamina()]
    }

    pub fn city_estimated_population(&self, city: &str) -> Result<f64> {
        self.city(city).map(City::estimate)
    }

    pub fn city_communities(&self, city: &str) -> Result<u32> {
        self.city(city).map(City::communities)
    }

    pub fn city_chaos(&self, city: &str) -> Result<f64> {
        self.city(city).map(City::chaos)
    }

    pub fn current_city(&self) -> CityName {
        self.state.ledger.city
    }

    /// Stored cycles expressed as time: `round(cycles / 5) * 1000` ms.
    pub fn bonus_time_ms(&self) -> u64 {
        self.state.stored_cycles.bonus_time_ms()
    }

    pub fn telemetry(&self) -> Telemetry {
        let ledger = &self.state.ledger;
        Telemetry {
            rank: ledger.rank(),
            skill_points: ledger.skill_points(),
            stamina: ledger.stamina(),
            max_stamina: ledger.max_stamina(),
            city: ledger.city,
            current_action: self.current_action(),
            earnings: ledger.earnings,
            recruited: ledger.personnel.recruited(),
            personnel_lost: ledger.personnel.lost(),
            completed_black_ops: self.state.completed_black_ops().count(),
            bonus_time_ms: self.bonus_time_ms(),
        }
    }

    fn city(&self, name: &str) -> Result<&City> {
        let city = CityName::parse(name).ok_or_else(|| {
            RuntimeError::from(EngineError::UnknownCity {
                name: name.to_string(),
            })
        })?;
        Ok(self.state.cities.get(city))
    }
}
