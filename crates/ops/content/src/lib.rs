//! Data-driven content for the operations simulation.
//!
//! This crate ships the standard catalog as embedded RON tables and provides
//! loaders for replacing it from disk:
//! - Contracts, operations, black operations and general actions (RON)
//! - Skills (RON)
//! - Simulation tuning and the operative profile (TOML)
//!
//! Content is consumed when a session is built and never appears in
//! session state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActionLoader, ActionRecord, ConfigLoader, ContentFactory, GeneralRecord, LoadResult,
    ScenarioConfig, SkillLoader, standard_catalog,
};
