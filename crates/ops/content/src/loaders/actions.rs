//! Action table loader.
//!
//! Each table lists the actions of one type; the type itself comes from the
//! table, not the entries.

use std::path::Path;

use anyhow::Context;
use ops_core::{ActionDefinition, ActionType, CityEffect, GeneralKind, Stat, StatWeight};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

const CONTRACTS: &str = include_str!("../../data/actions/contracts.ron");
const OPERATIONS: &str = include_str!("../../data/actions/operations.ron");
const BLACK_OPS: &str = include_str!("../../data/actions/black_ops.ron");
const GENERAL: &str = include_str!("../../data/actions/general.ron");

/// A contract, operation or black operation as written in a RON table.
#[derive(Clone, Debug, Deserialize)]
pub struct ActionRecord {
    pub name: String,
    pub difficulty: f64,
    #[serde(default = "unit")]
    pub difficulty_factor: f64,
    #[serde(default = "unit")]
    pub reward_factor: f64,
    #[serde(default)]
    pub rank_gain: f64,
    #[serde(default)]
    pub rank_loss: f64,
    #[serde(default)]
    pub required_rank: f64,
    /// `(stat, weight, decay)` triples.
    #[serde(default)]
    pub weights: Vec<(Stat, f64, f64)>,
    #[serde(default)]
    pub stealth: bool,
    #[serde(default)]
    pub kill: bool,
    #[serde(default)]
    pub requires_community: bool,
    /// Starting pool size. Black operations ignore it.
    #[serde(default)]
    pub count: Option<f64>,
    /// Pool units gained per growth period.
    #[serde(default)]
    pub growth: f64,
    #[serde(default)]
    pub on_success: Vec<CityEffect>,
    #[serde(default)]
    pub on_failure: Vec<CityEffect>,
}

fn unit() -> f64 {
    1.0
}

impl ActionRecord {
    pub fn into_definition(self, kind: ActionType) -> ActionDefinition {
        let weights = self
            .weights
            .into_iter()
            .map(|(stat, weight, decay)| StatWeight::new(stat, weight, decay))
            .collect();

        let mut definition = ActionDefinition::new(kind, self.name, self.difficulty)
            .with_difficulty_factor(self.difficulty_factor)
            .with_rewards(self.rank_gain, self.rank_loss, self.reward_factor)
            .with_required_rank(self.required_rank)
            .with_weights(weights)
            .with_effects(self.on_success, self.on_failure);

        if kind.has_pool()
            && let Some(count) = self.count
        {
            definition = definition.with_pool(count, self.growth);
        }
        if self.stealth {
            definition = definition.stealth();
        }
        if self.kill {
            definition = definition.kill();
        }
        if self.requires_community {
            definition = definition.requiring_community();
        }
        definition
    }
}

/// A general action: a display name bound to its behaviour.
#[derive(Clone, Debug, Deserialize)]
pub struct GeneralRecord {
    pub name: String,
    pub kind: GeneralKind,
}

impl From<GeneralRecord> for ActionDefinition {
    fn from(record: GeneralRecord) -> Self {
        ActionDefinition::general(record.name, record.kind)
    }
}

/// Loader for the action tables.
pub struct ActionLoader;

impl ActionLoader {
    /// File names read by [`ActionLoader::load_dir`], in catalog order.
    pub const TABLES: [(&'static str, ActionType); 4] = [
        ("contracts.ron", ActionType::Contract),
        ("operations.ron", ActionType::Operation),
        ("black_ops.ron", ActionType::BlackOp),
        ("general.ron", ActionType::General),
    ];

    /// Parses one table of `kind` actions.
    pub fn parse(kind: ActionType, source: &str) -> LoadResult<Vec<ActionDefinition>> {
        if kind == ActionType::General {
            let records: Vec<GeneralRecord> = ron::from_str(source)
                .map_err(|e| anyhow::anyhow!("Failed to parse general actions RON: {}", e))?;
            return Ok(records.into_iter().map(ActionDefinition::from).collect());
        }

        let records: Vec<ActionRecord> = ron::from_str(source)
            .map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", kind, e))?;
        Ok(records
            .into_iter()
            .map(|record| record.into_definition(kind))
            .collect())
    }

    /// Every action of the standard catalog.
    pub fn embedded() -> LoadResult<Vec<ActionDefinition>> {
        let sources = [CONTRACTS, OPERATIONS, BLACK_OPS, GENERAL];
        let mut definitions = Vec::new();
        for ((file, kind), source) in Self::TABLES.into_iter().zip(sources) {
            let table = Self::parse(kind, source).with_context(|| format!("embedded {file}"))?;
            definitions.extend(table);
        }
        Ok(definitions)
    }

    /// Reads every table under `dir`. A missing table is an error.
    pub fn load_dir(dir: &Path) -> LoadResult<Vec<ActionDefinition>> {
        let mut definitions = Vec::new();
        for (file, kind) in Self::TABLES {
            let path = dir.join(file);
            let source = read_file(&path)?;
            let table =
                Self::parse(kind, &source).with_context(|| format!("in {}", path.display()))?;
            definitions.extend(table);
        }
        Ok(definitions)
    }
}
