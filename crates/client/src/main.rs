//! `opsim` entry point.
//!
//! ```bash
//! OPS_PLAN="general/Training@600; contracts/Tracking" OPS_SECONDS=3600 cargo run -p ops-client
//! ```
use anyhow::{Context, Result};
use ops_client::{ClientConfig, Driver, logging};
use ops_runtime::{RuntimeConfig, Session};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env().context("Failed to read OPS_PLAN")?;
    logging::setup_logging(config.log_dir.as_deref())?;

    let runtime_config = RuntimeConfig::from_env();
    tracing::info!(seed = runtime_config.seed, "Starting opsim");

    let session = Session::builder()
        .config(runtime_config)
        .build()
        .context("Failed to build the session")?;
    let mut driver = Driver::new(session, config);

    let interrupted = tokio::select! {
        _ = driver.run() => false,
        _ = tokio::signal::ctrl_c() => true,
    };
    if interrupted {
        tracing::warn!("Interrupted, printing partial summary");
    }

    let summary = driver.summary();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
