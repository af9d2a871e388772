//! Headless driver for the operations simulation.
//!
//! The `opsim` binary plays the external scheduler: it builds a session from
//! the environment, runs a [`plan::Plan`] for a number of simulated seconds
//! and prints a JSON [`driver::Summary`].
pub mod config;
pub mod driver;
pub mod logging;
pub mod plan;

pub use config::ClientConfig;
pub use driver::{Driver, Summary};
pub use plan::{Plan, Step};
