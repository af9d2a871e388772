//! Action definitions: the immutable half of every action.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::effect::CityEffect;
use crate::config::SimConfig;

/// Closed set of action categories.
///
/// Parsing accepts the aliases scripts commonly use (`"ops"`, `"black op"`,
/// `"gen"`, ...), case-insensitively.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionType {
    #[strum(
        to_string = "Contracts",
        serialize = "contract",
        serialize = "contracts",
        serialize = "contr"
    )]
    Contract,
    #[strum(
        to_string = "Operations",
        serialize = "operation",
        serialize = "operations",
        serialize = "op",
        serialize = "ops"
    )]
    Operation,
    #[strum(
        to_string = "BlackOps",
        serialize = "blackop",
        serialize = "blackops",
        serialize = "black op",
        serialize = "black ops",
        serialize = "blackoperation",
        serialize = "blackoperations",
        serialize = "black operation",
        serialize = "black operations"
    )]
    BlackOp,
    #[strum(
        to_string = "General",
        serialize = "general",
        serialize = "general action",
        serialize = "general actions",
        serialize = "gen"
    )]
    General,
}

impl ActionType {
    /// Parses a script-supplied type string, ignoring surrounding whitespace.
    pub fn parse(input: &str) -> Option<Self> {
        input.trim().parse().ok()
    }

    /// Contracts and operations draw from a depletable pool.
    pub const fn has_pool(&self) -> bool {
        matches!(self, Self::Contract | Self::Operation)
    }

    /// Only operations and black ops take a team.
    pub const fn accepts_team(&self) -> bool {
        matches!(self, Self::Operation | Self::BlackOp)
    }

    /// Contracts, operations and black ops share the combat success/time formulas.
    pub const fn is_combat(&self) -> bool {
        !matches!(self, Self::General)
    }
}

/// Identity of an action: `(type, name)`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionId {
    pub kind: ActionType,
    pub name: String,
}

impl ActionId {
    pub fn new(kind: ActionType, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl core::fmt::Display for ActionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// Operative attributes the success formulas weigh.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stat {
    Hacking,
    Strength,
    Defense,
    Dexterity,
    Agility,
    Charisma,
    Intelligence,
}

/// One term of the competence sum: `weight * (eff * stat)^decay`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatWeight {
    pub stat: Stat,
    pub weight: f64,
    pub decay: f64,
}

impl StatWeight {
    pub const fn new(stat: Stat, weight: f64, decay: f64) -> Self {
        Self {
            stat,
            weight,
            decay,
        }
    }
}

/// How an action's maximum level evolves.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Leveling {
    /// Single level, never grows.
    Fixed,
    /// Max level grows as successes accumulate; unbounded.
    Successes { per_level: f64 },
}

impl Leveling {
    /// Successes required before `max_level` can grow past its current value.
    ///
    /// `ceil(0.5 * max * (2 * per_level + (max - 1)))`
    pub fn successes_needed(&self, max_level: u32) -> Option<u64> {
        match self {
            Self::Fixed => None,
            Self::Successes { per_level } => {
                let max = f64::from(max_level);
                Some((0.5 * max * (2.0 * per_level + (max - 1.0))).ceil() as u64)
            }
        }
    }

    pub fn contract() -> Self {
        Self::Successes {
            per_level: SimConfig::CONTRACT_SUCCESSES_PER_LEVEL,
        }
    }

    pub fn operation() -> Self {
        Self::Successes {
            per_level: SimConfig::OPERATION_SUCCESSES_PER_LEVEL,
        }
    }
}

/// Behaviour of the general (non-combat) actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeneralKind {
    /// Raises the stamina bonus.
    Training,
    /// Refines the current city's population estimate; small rank gain.
    FieldAnalysis,
    /// Chance to grow the personnel pool.
    Recruitment,
    /// Scales the current city's chaos down.
    Diplomacy,
    /// Restores a slice of max stamina.
    Regeneration,
    /// Raises chaos in every city.
    InciteViolence,
}

impl GeneralKind {
    /// Fixed duration in seconds; `None` for recruitment, which depends on charisma.
    pub const fn fixed_duration(&self) -> Option<f64> {
        match self {
            Self::Training | Self::FieldAnalysis => Some(30.0),
            Self::Diplomacy | Self::Regeneration | Self::InciteViolence => Some(60.0),
            Self::Recruitment => None,
        }
    }
}

/// Immutable definition of one action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDefinition {
    pub kind: ActionType,
    pub name: String,
    pub base_difficulty: f64,
    /// Difficulty grows by this factor per level above 1.
    pub difficulty_factor: f64,
    /// Reward grows by this factor per level above 1.
    pub reward_factor: f64,
    pub rank_gain: f64,
    pub rank_loss: f64,
    pub leveling: Leveling,
    /// Rank needed before a black op can start. Informational for other types.
    pub required_rank: f64,
    pub weights: Vec<StatWeight>,
    pub stealth: bool,
    pub kill: bool,
    /// Impossible (and unstartable) in a city with no communities.
    pub requires_community: bool,
    /// Population and chaos of the current city affect success.
    pub city_sensitive: bool,
    /// Starting size of the pool; `None` means unlimited.
    pub initial_count: Option<f64>,
    /// Pool units gained per growth period.
    pub count_growth: f64,
    pub on_success: Vec<CityEffect>,
    pub on_failure: Vec<CityEffect>,
    /// Set for general actions only.
    pub general: Option<GeneralKind>,
}

impl ActionDefinition {
    /// Creates a definition with neutral defaults for `kind`.
    ///
    /// Contracts and operations get a pool of 1 and success-driven leveling,
    /// black ops a single attempt, general actions an unlimited pool.
    pub fn new(kind: ActionType, name: impl Into<String>, base_difficulty: f64) -> Self {
        let (leveling, initial_count, city_sensitive) = match kind {
            ActionType::Contract => (Leveling::contract(), Some(1.0), true),
            ActionType::Operation => (Leveling::operation(), Some(1.0), true),
            ActionType::BlackOp => (Leveling::Fixed, Some(1.0), false),
            ActionType::General => (Leveling::Fixed, None, false),
        };
        Self {
            kind,
            name: name.into(),
            base_difficulty,
            difficulty_factor: 1.0,
            reward_factor: 1.0,
            rank_gain: 0.0,
            rank_loss: 0.0,
            leveling,
            required_rank: 0.0,
            weights: Vec::new(),
            stealth: false,
            kill: false,
            requires_community: false,
            city_sensitive,
            initial_count,
            count_growth: 0.0,
            on_success: Vec::new(),
            on_failure: Vec::new(),
            general: None,
        }
    }

    /// General action of the given kind.
    pub fn general(name: impl Into<String>, kind: GeneralKind) -> Self {
        let mut definition = Self::new(ActionType::General, name, 0.0);
        definition.general = Some(kind);
        definition
    }

    pub fn id(&self) -> ActionId {
        ActionId::new(self.kind, self.name.clone())
    }

    /// `base * factor^(level - 1)`
    pub fn difficulty(&self, level: u32) -> f64 {
        self.base_difficulty * self.difficulty_factor.powf(f64::from(level.saturating_sub(1)))
    }

    /// `reward_factor^(level - 1)`
    pub fn reward_multiplier(&self, level: u32) -> f64 {
        self.reward_factor.powf(f64::from(level.saturating_sub(1)))
    }

    pub fn with_rewards(mut self, rank_gain: f64, rank_loss: f64, reward_factor: f64) -> Self {
        self.rank_gain = rank_gain;
        self.rank_loss = rank_loss;
        self.reward_factor = reward_factor;
        self
    }

    pub fn with_difficulty_factor(mut self, difficulty_factor: f64) -> Self {
        self.difficulty_factor = difficulty_factor;
        self
    }

    pub fn with_required_rank(mut self, required_rank: f64) -> Self {
        self.required_rank = required_rank;
        self
    }

    pub fn with_weights(mut self, weights: Vec<StatWeight>) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_pool(mut self, initial_count: f64, count_growth: f64) -> Self {
        self.initial_count = Some(initial_count);
        self.count_growth = count_growth;
        self
    }

    pub fn with_effects(mut self, on_success: Vec<CityEffect>, on_failure: Vec<CityEffect>) -> Self {
        self.on_success = on_success;
        self.on_failure = on_failure;
        self
    }

    pub fn stealth(mut self) -> Self {
        self.stealth = true;
        self
    }

    pub fn kill(mut self) -> Self {
        self.kill = true;
        self
    }

    pub fn requiring_community(mut self) -> Self {
        self.requires_community = true;
        self
    }
}
