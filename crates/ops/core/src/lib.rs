//! Deterministic action-economy rules for a covert operations faction.
//!
//! `ops-core` defines the canonical rules (catalog, session state, engine,
//! pricing) and exposes pure APIs that the runtime and offline tools share.
//! All state mutation flows through [`engine::Engine`]; every random draw
//! comes from a caller-owned [`rng::RngOracle`].
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod pricing;
pub mod rng;
pub mod state;

pub use catalog::{
    ActionCatalog, ActionDefinition, ActionId, ActionType, Catalog, CatalogError, CityEffect,
    GeneralKind, Leveling, Multiplier, SkillCatalog, SkillDefinition, SkillEffect,
    SkillMultipliers, Stat, StatWeight,
};
pub use config::SimConfig;
pub use engine::{
    Completion, Engine, EngineError, OutcomeRolls, PopulationView, RankGate, StopReason, Stopped,
    TickReport,
};
pub use error::{ErrorKind, ErrorSeverity, SimError};
pub use pricing::PricingError;
pub use rng::{PcgRng, RngOracle};
pub use state::{
    ActionState, Cities, City, CityEvent, CityEventKind, CityName, CurrentAction, Migration,
    OperativeLedger, OperativeMultipliers, OperativeStats, OpsState, Personnel, Remaining,
};
