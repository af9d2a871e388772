//! The operative's resources: rank, skills, stamina, personnel and the
//! action in progress.

use std::collections::BTreeMap;

use crate::catalog::{ActionId, Multiplier, SkillDefinition, SkillMultipliers, Stat};
use crate::config::SimConfig;

use super::city::CityName;

/// The seven attributes the success formulas read.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OperativeStats {
    pub hacking: f64,
    pub strength: f64,
    pub defense: f64,
    pub dexterity: f64,
    pub agility: f64,
    pub charisma: f64,
    pub intelligence: f64,
}

impl OperativeStats {
    pub const DEFAULT_LEVEL: f64 = 100.0;

    /// Every stat at `level`.
    pub const fn uniform(level: f64) -> Self {
        Self {
            hacking: level,
            strength: level,
            defense: level,
            dexterity: level,
            agility: level,
            charisma: level,
            intelligence: level,
        }
    }

    pub const fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Hacking => self.hacking,
            Stat::Strength => self.strength,
            Stat::Defense => self.defense,
            Stat::Dexterity => self.dexterity,
            Stat::Agility => self.agility,
            Stat::Charisma => self.charisma,
            Stat::Intelligence => self.intelligence,
        }
    }
}

impl Default for OperativeStats {
    fn default() -> Self {
        Self::uniform(Self::DEFAULT_LEVEL)
    }
}

/// Augmentation-style multipliers from outside the skill tree.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OperativeMultipliers {
    pub success_chance: f64,
    pub max_stamina: f64,
    pub stamina_gain: f64,
    pub analysis: f64,
}

impl Default for OperativeMultipliers {
    fn default() -> Self {
        Self {
            success_chance: 1.0,
            max_stamina: 1.0,
            stamina_gain: 1.0,
            analysis: 1.0,
        }
    }
}

/// The action in progress.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrentAction {
    pub id: ActionId,
    pub elapsed: f64,
    pub total: f64,
    /// Stamina paid at start; failures cost a fraction of it again.
    pub stamina_cost: f64,
}

/// Recruited personnel shared across team assignments.
///
/// Invariant: the sum of assignments never exceeds `recruited`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Personnel {
    recruited: u64,
    assignments: BTreeMap<ActionId, u64>,
    lost: u64,
}

impl Personnel {
    pub fn new(recruited: u64) -> Self {
        Self {
            recruited,
            ..Self::default()
        }
    }

    pub fn recruited(&self) -> u64 {
        self.recruited
    }

    pub fn lost(&self) -> u64 {
        self.lost
    }

    pub fn team_size(&self, id: &ActionId) -> u64 {
        self.assignments.get(id).copied().unwrap_or(0)
    }

    /// Sum of every assignment except `id`'s.
    pub fn assigned_elsewhere(&self, id: &ActionId) -> u64 {
        self.assignments
            .iter()
            .filter(|(key, _)| *key != id)
            .map(|(_, size)| *size)
            .sum()
    }

    pub fn total_assigned(&self) -> u64 {
        self.assignments.values().sum()
    }

    /// Overwrites `id`'s assignment. Callers validate against the pool first.
    pub fn assign(&mut self, id: ActionId, size: u64) {
        if size == 0 {
            self.assignments.remove(&id);
        } else {
            self.assignments.insert(id, size);
        }
    }

    pub fn recruit(&mut self, count: u64) {
        self.recruited += count;
    }

    /// Removes `count` members lost on `id`'s team from the pool and the team,
    /// then trims other assignments until they fit the smaller pool.
    /// Returns the number actually lost.
    pub fn lose(&mut self, id: &ActionId, count: u64) -> u64 {
        let count = count.min(self.recruited);
        self.recruited -= count;
        self.lost += count;

        let remaining_team = self.team_size(id).saturating_sub(count);
        self.assign(id.clone(), remaining_team);

        let mut excess = self.total_assigned().saturating_sub(self.recruited);
        for size in self.assignments.values_mut() {
            if excess == 0 {
                break;
            }
            let cut = excess.min(*size);
            *size -= cut;
            excess -= cut;
        }
        self.assignments.retain(|_, size| *size > 0);
        count
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperativeLedger {
    rank: f64,
    max_rank: f64,
    skill_points: u64,
    total_skill_points: u64,
    skill_levels: BTreeMap<String, u32>,
    skill_multipliers: SkillMultipliers,
    stamina: f64,
    max_stamina: f64,
    stamina_bonus: f64,
    pub city: CityName,
    pub current: Option<CurrentAction>,
    pub personnel: Personnel,
    /// Money earned from contracts.
    pub earnings: f64,
    stats: OperativeStats,
    multipliers: OperativeMultipliers,
}

impl OperativeLedger {
    pub fn new(stats: OperativeStats, multipliers: OperativeMultipliers, city: CityName) -> Self {
        let mut ledger = Self {
            rank: 0.0,
            max_rank: 0.0,
            skill_points: 0,
            total_skill_points: 0,
            skill_levels: BTreeMap::new(),
            skill_multipliers: SkillMultipliers::default(),
            stamina: 0.0,
            max_stamina: 0.0,
            stamina_bonus: 0.0,
            city,
            current: None,
            personnel: Personnel::default(),
            earnings: 0.0,
            stats,
            multipliers,
        };
        ledger.max_stamina = ledger.computed_max_stamina();
        ledger.stamina = ledger.max_stamina;
        ledger
    }

    pub fn rank(&self) -> f64 {
        self.rank
    }

    pub fn max_rank(&self) -> f64 {
        self.max_rank
    }

    pub fn skill_points(&self) -> u64 {
        self.skill_points
    }

    pub fn total_skill_points(&self) -> u64 {
        self.total_skill_points
    }

    pub fn skill_level(&self, name: &str) -> u32 {
        self.skill_levels.get(name).copied().unwrap_or(0)
    }

    pub fn skill_levels(&self) -> &BTreeMap<String, u32> {
        &self.skill_levels
    }

    pub fn skill_mult(&self, multiplier: Multiplier) -> f64 {
        self.skill_multipliers.get(multiplier)
    }

    pub fn stamina(&self) -> f64 {
        self.stamina
    }

    pub fn max_stamina(&self) -> f64 {
        self.max_stamina
    }

    pub fn stamina_bonus(&self) -> f64 {
        self.stamina_bonus
    }

    pub fn stats(&self) -> &OperativeStats {
        &self.stats
    }

    pub fn multipliers(&self) -> &OperativeMultipliers {
        &self.multipliers
    }

    /// Stat scaled by its skill efficiency multiplier, floored at 1.
    pub fn effective(&self, stat: Stat) -> f64 {
        (self.stats.get(stat) * self.skill_multipliers.efficiency(stat)).max(1.0)
    }

    /// Applies a rank change (floored at zero) and awards any skill points
    /// the new max rank unlocks. Returns the points gained.
    pub fn change_rank(&mut self, delta: f64) -> u64 {
        if delta.is_finite() {
            self.rank = (self.rank + delta).max(0.0);
        }
        self.max_rank = self.max_rank.max(self.rank);

        let needed = (self.total_skill_points + 1) as f64 * SimConfig::RANKS_PER_SKILL_POINT;
        if self.max_rank < needed {
            return 0;
        }
        let gained = ((self.max_rank - needed) / SimConfig::RANKS_PER_SKILL_POINT + 1.0).floor() as u64;
        self.skill_points += gained;
        self.total_skill_points += gained;
        gained
    }

    /// Grants skill points outside the rank curve (seeded scenarios, tests).
    pub fn grant_skill_points(&mut self, points: u64) {
        self.skill_points += points;
    }

    /// Spends `cost` points on `levels` more levels of `skill`, then refreshes
    /// every derived multiplier. Callers have already priced and validated
    /// the purchase.
    pub(crate) fn apply_skill_purchase<'a>(
        &mut self,
        skill: &str,
        levels: u32,
        cost: u64,
        catalog: impl IntoIterator<Item = &'a SkillDefinition>,
    ) {
        self.skill_points -= cost.min(self.skill_points);
        *self.skill_levels.entry(skill.to_string()).or_insert(0) += levels;
        self.skill_multipliers = SkillMultipliers::compute(catalog, &self.skill_levels);
        self.refresh_max_stamina();
    }

    /// Spends stamina, never below zero.
    pub fn spend_stamina(&mut self, amount: f64) {
        self.stamina = (self.stamina - amount.max(0.0)).max(0.0);
    }

    /// Restores stamina, never above max.
    pub fn restore_stamina(&mut self, amount: f64) {
        self.stamina = (self.stamina + amount.max(0.0)).min(self.max_stamina);
    }

    pub fn add_stamina_bonus(&mut self, bonus: f64) {
        self.stamina_bonus += bonus;
        self.refresh_max_stamina();
    }

    /// `(effAgi^0.8 + bonus) * staminaSkill * maxStaminaMult`
    fn computed_max_stamina(&self) -> f64 {
        let agility = self.effective(Stat::Agility);
        let max = (agility.powf(0.8) + self.stamina_bonus)
            * self.skill_mult(Multiplier::Stamina)
            * self.multipliers.max_stamina;
        if max.is_finite() && max > 0.0 { max } else { 1.0 }
    }

    /// Recomputes max stamina, rescaling current stamina proportionally.
    fn refresh_max_stamina(&mut self) {
        let max = self.computed_max_stamina();
        if max != self.max_stamina {
            let ratio = if self.max_stamina > 0.0 { self.stamina / self.max_stamina } else { 1.0 };
            self.max_stamina = max;
            self.stamina = (max * ratio).clamp(0.0, max);
        }
    }
}

impl Default for OperativeLedger {
    fn default() -> Self {
        Self::new(
            OperativeStats::default(),
            OperativeMultipliers::default(),
            CityName::Sector12,
        )
    }
}
