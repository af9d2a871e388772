//! The six cities and their population, community and chaos dynamics.

use std::collections::BTreeMap;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::config::SimConfig;
use crate::rng::RngOracle;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CityName {
    Aevum,
    Chongqing,
    #[strum(to_string = "Sector-12", serialize = "Sector12")]
    #[cfg_attr(feature = "serde", serde(rename = "Sector-12", alias = "Sector12"))]
    Sector12,
    #[strum(to_string = "New Tokyo", serialize = "NewTokyo")]
    #[cfg_attr(feature = "serde", serde(rename = "New Tokyo", alias = "NewTokyo"))]
    NewTokyo,
    Ishima,
    Volhaven,
}

impl CityName {
    pub fn parse(input: &str) -> Option<Self> {
        input.trim().parse().ok()
    }

    /// The city at fraction `roll` of the cities other than `self`.
    pub fn other(self, roll: f64) -> Self {
        let others: Vec<Self> = Self::iter().filter(|city| *city != self).collect();
        let slot = ((roll.clamp(0.0, 1.0) * others.len() as f64) as usize).min(others.len() - 1);
        others[slot]
    }
}

/// One city. The true `population` is hidden from callers; they only see
/// the estimate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    population: f64,
    estimate: f64,
    communities: u32,
    chaos: f64,
}

impl City {
    pub fn new(population: f64, estimate: f64, communities: u32) -> Self {
        Self {
            population: population.max(0.0),
            estimate: estimate.max(0.0),
            communities,
            chaos: 0.0,
        }
    }

    /// Population in `[1e9, 1.5e9]`, estimate off by up to 50%, 5 to 150 communities.
    pub fn generate(rng: &mut impl RngOracle) -> Self {
        let population = rng.range_f64(1e9, 1.5e9);
        let estimate = population * rng.range_f64(0.5, 1.5);
        let communities = rng.range_i64(5, 150) as u32;
        Self::new(population, estimate, communities)
    }

    pub fn population(&self) -> f64 {
        self.population
    }

    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    pub fn communities(&self) -> u32 {
        self.communities
    }

    pub fn chaos(&self) -> f64 {
        self.chaos
    }

    pub fn with_chaos(mut self, chaos: f64) -> Self {
        self.set_chaos(chaos);
        self
    }

    /// Moves the estimate toward the population by `count`, never past it.
    pub fn improve_estimate_by_count(&mut self, count: f64) {
        if self.estimate < self.population {
            self.estimate = (self.estimate + count).min(self.population);
        } else if self.estimate > self.population {
            self.estimate = (self.estimate - count).max(self.population);
        }
    }

    /// Moves the estimate toward the population by `percent` of itself.
    /// Snaps to the population when the step would overshoot.
    pub fn improve_estimate_by_percent(&mut self, percent: f64) {
        let fraction = (percent / 100.0).clamp(0.0, 1.0);
        let gap = (self.estimate - self.population).abs();
        if gap <= fraction * self.estimate {
            self.estimate = self.population;
        } else if self.estimate < self.population {
            self.estimate += self.estimate * fraction;
        } else {
            self.estimate -= self.estimate * fraction;
        }
    }

    /// Changes the population by `count`; the estimate moves by the same amount.
    pub fn change_population_by_count(&mut self, count: f64) {
        self.population = (self.population + count).max(0.0);
        self.estimate = (self.estimate + count).max(0.0);
    }

    /// Changes the population by `percent` of itself, by at least one.
    /// Returns the applied change.
    pub fn change_population_by_percent(&mut self, percent: f64, estimate_follows: bool) -> f64 {
        if percent == 0.0 || !percent.is_finite() {
            return 0.0;
        }
        let mut change = (self.population * percent / 100.0).round();
        if change == 0.0 {
            change = percent.signum();
        }
        self.population = (self.population + change).max(0.0);
        if estimate_follows {
            self.estimate = (self.estimate + change).max(0.0);
        }
        change
    }

    /// Grows the population without touching the estimate.
    pub fn grow_population(&mut self, fraction: f64) -> f64 {
        let change = (self.population * fraction).round();
        self.population = (self.population + change).max(0.0);
        change
    }

    pub fn change_chaos_by_count(&mut self, count: f64) {
        self.set_chaos(self.chaos + count);
    }

    pub fn change_chaos_by_percent(&mut self, percent: f64) {
        self.set_chaos(self.chaos + self.chaos * percent / 100.0);
    }

    pub fn scale_chaos(&mut self, factor: f64) {
        self.set_chaos(self.chaos * factor);
    }

    pub fn add_community(&mut self) {
        self.communities += 1;
    }

    /// Returns false when there was no community to remove.
    pub fn remove_community(&mut self) -> bool {
        if self.communities == 0 {
            return false;
        }
        self.communities -= 1;
        true
    }

    fn set_chaos(&mut self, chaos: f64) {
        self.chaos = if chaos.is_finite() { chaos.max(0.0) } else { 0.0 };
    }

    pub(crate) fn remove_population(&mut self, count: f64) -> f64 {
        let count = count.clamp(0.0, self.population);
        self.population -= count;
        count
    }

    pub(crate) fn add_population(&mut self, count: f64) {
        self.population += count.max(0.0);
    }
}

/// Draws that fully determine one migration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MigrationRolls {
    /// Picks the destination among the other five cities.
    pub destination: f64,
    /// Picks the base percentage in `[3, 15]`.
    pub percent: f64,
    /// Below 0.05 a community moves too; also picks its `[2, 4]` multiplier.
    pub community: f64,
}

impl MigrationRolls {
    pub fn draw(rng: &mut impl RngOracle) -> Self {
        Self {
            destination: rng.next_f64(),
            percent: rng.next_f64(),
            community: rng.next_f64(),
        }
    }
}

/// Summary of a migration, for event reporting.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Migration {
    pub from: CityName,
    pub to: CityName,
    pub population: f64,
    pub community_moved: bool,
}

/// Random city event categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CityEventKind {
    NewCommunity,
    CommunityMigration,
    PopulationGrowth,
    Migration,
    Riots,
    PopulationLoss,
    Quiet,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CityEvent {
    pub city: CityName,
    pub kind: CityEventKind,
}

/// All six cities, keyed by name.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cities {
    cities: BTreeMap<CityName, City>,
}

impl Cities {
    pub fn generate(rng: &mut impl RngOracle) -> Self {
        Self {
            cities: CityName::iter().map(|name| (name, City::generate(rng))).collect(),
        }
    }

    /// Every city set to the same starting values.
    pub fn uniform(city: City) -> Self {
        Self {
            cities: CityName::iter().map(|name| (name, city.clone())).collect(),
        }
    }

    pub fn get(&self, name: CityName) -> &City {
        &self.cities[&name]
    }

    pub fn get_mut(&mut self, name: CityName) -> &mut City {
        self.cities
            .entry(name)
            .or_insert_with(|| City::new(0.0, 0.0, 0))
    }

    pub fn iter(&self) -> impl Iterator<Item = (CityName, &City)> {
        self.cities.iter().map(|(name, city)| (*name, city))
    }

    pub fn total_population(&self) -> f64 {
        self.cities.values().map(City::population).sum()
    }

    /// Moves 3-15% of `from`'s population to another city. With 5%
    /// probability (when `from` has any) a community moves along and the
    /// share is multiplied by 2-4.
    pub fn migrate(&mut self, from: CityName, rolls: MigrationRolls) -> Migration {
        let to = from.other(rolls.destination);
        let mut fraction = pick_int(3, 15, rolls.percent) / 100.0;
        let community_moved = rolls.community < 0.05 && self.get(from).communities() > 0;
        if community_moved {
            fraction *= pick_int(2, 4, rolls.community / 0.05);
            self.get_mut(from).remove_community();
            self.get_mut(to).add_community();
        }
        self.transfer(from, to, fraction, community_moved)
    }

    /// Fires one random event in a random city.
    pub fn random_event(&mut self, rng: &mut impl RngOracle) -> CityEvent {
        let roll = rng.next_f64();
        let cities: Vec<CityName> = CityName::iter().collect();
        let city = cities[rng.range_i64(0, cities.len() as i64 - 1) as usize];

        let kind = if roll <= 0.05 {
            self.new_community(city, rng);
            CityEventKind::NewCommunity
        } else if roll <= 0.10 {
            if self.get(city).communities() == 0 {
                self.new_community(city, rng);
                CityEventKind::NewCommunity
            } else {
                let to = city.other(rng.next_f64());
                let fraction = rng.range_i64(10, 20) as f64 / 100.0;
                self.get_mut(city).remove_community();
                self.get_mut(to).add_community();
                self.transfer(city, to, fraction, true);
                CityEventKind::CommunityMigration
            }
        } else if roll <= 0.30 {
            let fraction = rng.range_i64(8, 24) as f64 / 100.0;
            self.get_mut(city).grow_population(fraction);
            CityEventKind::PopulationGrowth
        } else if roll <= 0.50 {
            self.migrate(city, MigrationRolls::draw(rng));
            CityEventKind::Migration
        } else if roll <= 0.70 {
            let factor = 1.0 + rng.range_i64(5, 20) as f64 / 100.0;
            let target = self.get_mut(city);
            target.change_chaos_by_count(1.0);
            target.scale_chaos(factor);
            CityEventKind::Riots
        } else if roll <= 0.90 {
            let fraction = rng.range_i64(8, 20) as f64 / 100.0;
            self.get_mut(city).grow_population(-fraction);
            CityEventKind::PopulationLoss
        } else {
            CityEventKind::Quiet
        };
        CityEvent { city, kind }
    }

    /// Decays chaos everywhere, floored at zero.
    pub fn decay_chaos(&mut self, seconds: f64) {
        for city in self.cities.values_mut() {
            city.change_chaos_by_count(-SimConfig::CHAOS_DECAY_PER_SECOND * seconds);
        }
    }

    fn new_community(&mut self, city: CityName, rng: &mut impl RngOracle) {
        let fraction = rng.range_i64(10, 20) as f64 / 100.0;
        let target = self.get_mut(city);
        target.add_community();
        target.grow_population(fraction);
    }

    fn transfer(&mut self, from: CityName, to: CityName, fraction: f64, community_moved: bool) -> Migration {
        let count = (self.get(from).population() * fraction).round();
        let moved = self.get_mut(from).remove_population(count);
        self.get_mut(to).add_population(moved);
        Migration {
            from,
            to,
            population: moved,
            community_moved,
        }
    }
}

/// Integer in `[min, max]` at fraction `roll`.
fn pick_int(min: i64, max: i64, roll: f64) -> f64 {
    let span = (max - min + 1) as f64;
    let offset = (roll.clamp(0.0, 1.0) * span).floor().min(span - 1.0);
    min as f64 + offset
}
