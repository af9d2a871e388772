//! Immutable registry of action and skill definitions.
//!
//! A [`Catalog`] is validated once at construction and read-only afterwards.
//! Lookups go through a closed [`ActionType`] plus a validated name, so the
//! rest of the crate never dispatches on raw strings.
mod action;
mod effect;
mod error;
mod skill;

use std::collections::BTreeMap;

pub use action::{
    ActionDefinition, ActionId, ActionType, GeneralKind, Leveling, Stat, StatWeight,
};
pub use effect::CityEffect;
pub(crate) use effect::lerp;
pub use error::CatalogError;
pub use skill::{Multiplier, SkillDefinition, SkillEffect, SkillMultipliers};

/// Action definitions indexed by `(type, name)`, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct ActionCatalog {
    definitions: Vec<ActionDefinition>,
    index: BTreeMap<ActionId, usize>,
    black_ops_by_rank: Vec<usize>,
}

impl ActionCatalog {
    pub fn new(definitions: Vec<ActionDefinition>) -> Result<Self, CatalogError> {
        let mut index = BTreeMap::new();
        for (position, definition) in definitions.iter().enumerate() {
            validate_action(definition)?;
            if index.insert(definition.id(), position).is_some() {
                return Err(CatalogError::DuplicateAction {
                    kind: definition.kind,
                    name: definition.name.clone(),
                });
            }
        }

        let mut black_ops_by_rank: Vec<usize> = definitions
            .iter()
            .enumerate()
            .filter(|(_, definition)| definition.kind == ActionType::BlackOp)
            .map(|(position, _)| position)
            .collect();
        black_ops_by_rank.sort_by(|a, b| {
            definitions[*a]
                .required_rank
                .total_cmp(&definitions[*b].required_rank)
        });
        for pair in black_ops_by_rank.windows(2) {
            let (first, second) = (&definitions[pair[0]], &definitions[pair[1]]);
            if first.required_rank == second.required_rank {
                return Err(CatalogError::DuplicateBlackOpRank {
                    first: first.name.clone(),
                    second: second.name.clone(),
                    rank: first.required_rank,
                });
            }
        }

        Ok(Self {
            definitions,
            index,
            black_ops_by_rank,
        })
    }

    /// Exact lookup; falls back to a case-insensitive name match.
    pub fn lookup(&self, kind: ActionType, name: &str) -> Option<&ActionDefinition> {
        let exact = self
            .index
            .get(&ActionId::new(kind, name))
            .map(|position| &self.definitions[*position]);
        exact.or_else(|| {
            self.definitions
                .iter()
                .find(|definition| definition.kind == kind && definition.name.eq_ignore_ascii_case(name))
        })
    }

    pub fn get(&self, id: &ActionId) -> Option<&ActionDefinition> {
        self.lookup(id.kind, &id.name)
    }

    /// Parses `kind` through the alias table, then looks up `name`.
    pub fn resolve(&self, kind: &str, name: &str) -> Option<&ActionDefinition> {
        ActionType::parse(kind).and_then(|kind| self.lookup(kind, name.trim()))
    }

    /// Names of `kind`, in insertion order.
    pub fn list_names(&self, kind: ActionType) -> Vec<&str> {
        self.of_kind(kind).map(|definition| definition.name.as_str()).collect()
    }

    pub fn of_kind(&self, kind: ActionType) -> impl Iterator<Item = &ActionDefinition> {
        self.definitions
            .iter()
            .filter(move |definition| definition.kind == kind)
    }

    /// Black ops in ascending required rank.
    pub fn black_ops_by_rank(&self) -> impl Iterator<Item = &ActionDefinition> {
        self.black_ops_by_rank
            .iter()
            .map(|position| &self.definitions[*position])
    }

    /// The black op that must be completed before `name`, if any.
    pub fn preceding_black_op(&self, name: &str) -> Option<&ActionDefinition> {
        let mut previous = None;
        for definition in self.black_ops_by_rank() {
            if definition.name == name {
                return previous;
            }
            previous = Some(definition);
        }
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Skill definitions indexed by name, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct SkillCatalog {
    skills: Vec<SkillDefinition>,
    index: BTreeMap<String, usize>,
}

impl SkillCatalog {
    pub fn new(skills: Vec<SkillDefinition>) -> Result<Self, CatalogError> {
        let mut index = BTreeMap::new();
        for (position, skill) in skills.iter().enumerate() {
            validate_skill(skill)?;
            if index.insert(skill.name.clone(), position).is_some() {
                return Err(CatalogError::DuplicateSkill {
                    name: skill.name.clone(),
                });
            }
        }
        Ok(Self { skills, index })
    }

    pub fn skill(&self, name: &str) -> Option<&SkillDefinition> {
        self.index
            .get(name)
            .map(|position| &self.skills[*position])
            .or_else(|| {
                self.skills
                    .iter()
                    .find(|skill| skill.name.eq_ignore_ascii_case(name))
            })
    }

    pub fn skill_names(&self) -> Vec<&str> {
        self.skills.iter().map(|skill| skill.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.skills.iter()
    }
}

/// Complete, validated content: actions plus skills.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub actions: ActionCatalog,
    pub skills: SkillCatalog,
}

impl Catalog {
    pub fn new(
        actions: Vec<ActionDefinition>,
        skills: Vec<SkillDefinition>,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            actions: ActionCatalog::new(actions)?,
            skills: SkillCatalog::new(skills)?,
        })
    }
}

fn validate_action(definition: &ActionDefinition) -> Result<(), CatalogError> {
    let invalid = |reason| CatalogError::InvalidAction {
        kind: definition.kind,
        name: definition.name.clone(),
        reason,
    };

    if definition.name.trim().is_empty() {
        return Err(CatalogError::EmptyName {
            kind: definition.kind,
        });
    }

    if definition.kind == ActionType::General {
        if definition.general.is_none() {
            return Err(CatalogError::MissingGeneralKind {
                name: definition.name.clone(),
            });
        }
    } else {
        if !(definition.base_difficulty > 0.0) {
            return Err(invalid("base difficulty must be positive"));
        }
        if !(definition.difficulty_factor > 0.0) || !(definition.reward_factor > 0.0) {
            return Err(invalid("difficulty and reward factors must be positive"));
        }
    }

    if definition.rank_gain < 0.0 || definition.rank_loss < 0.0 {
        return Err(invalid("rank gain and loss must be non-negative"));
    }
    if let Leveling::Successes { per_level } = definition.leveling
        && !(per_level > 0.0)
    {
        return Err(invalid("successes per level must be positive"));
    }
    if let Some(count) = definition.initial_count
        && !(count >= 0.0)
    {
        return Err(invalid("initial count must be non-negative"));
    }
    if definition.weights.iter().any(|w| w.weight < 0.0 || !w.decay.is_finite()) {
        return Err(invalid("stat weights must be non-negative with finite decay"));
    }
    for effect in definition.on_success.iter().chain(&definition.on_failure) {
        effect.validate().map_err(invalid)?;
    }
    Ok(())
}

fn validate_skill(skill: &SkillDefinition) -> Result<(), CatalogError> {
    if skill.name.trim().is_empty() {
        return Err(CatalogError::EmptySkillName);
    }
    let invalid = |reason| CatalogError::InvalidSkill {
        name: skill.name.clone(),
        reason,
    };
    if !(skill.cost_increase > 0.0) {
        return Err(invalid("cost increase must be positive"));
    }
    if !(skill.base_cost >= 0.0) {
        return Err(invalid("base cost must be non-negative"));
    }
    if skill.max_level == Some(0) {
        return Err(invalid("max level must be at least 1"));
    }
    Ok(())
}
