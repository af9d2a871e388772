//! Session facade over the deterministic operations simulation.
//!
//! This crate wires the catalog, the session state, the random source and a
//! bounded event log into one owned [`Session`]. Scripts and drivers talk to
//! the simulation only through it.
//!
//! Modules are organized by responsibility:
//! - [`config`] reads runtime settings from the environment
//! - [`session`] hosts the session and its builder
//! - [`event_log`] keeps the recent history of what the session did
//! - [`error`] exposes the structured errors mutations return
pub mod config;
pub mod error;
pub mod event_log;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use event_log::{EventLog, SessionEvent};
pub use session::{ActionView, Session, SessionBuilder, Telemetry};
