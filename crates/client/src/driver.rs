//! Plays a [`Plan`] against a session, one simulated second per tick.
use std::time::Duration;

use ops_runtime::{Session, SessionEvent, Telemetry};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::plan::{Plan, Step};

/// What the driver prints when the run ends.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub simulated_seconds: u64,
    pub steps_applied: usize,
    pub steps_failed: usize,
    pub telemetry: Telemetry,
    /// Newest first.
    pub recent_events: Vec<SessionEvent>,
    pub events_dropped: u64,
}

/// Drives a session with the external scheduler role: it owns the session
/// and is the only caller of `tick`.
pub struct Driver {
    session: Session,
    config: ClientConfig,
    elapsed: u64,
    applied: usize,
    failed: usize,
}

impl Driver {
    pub fn new(session: Session, config: ClientConfig) -> Self {
        Self {
            session,
            config,
            elapsed: 0,
            applied: 0,
            failed: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the plan until the configured number of seconds has elapsed.
    /// The last running action keeps going once the plan is exhausted.
    pub async fn run(&mut self) -> Summary {
        let plan = if self.config.plan.is_empty() {
            Plan::training()
        } else {
            self.config.plan.clone()
        };
        info!(
            steps = plan.steps().len(),
            seconds = self.config.seconds,
            realtime = self.config.realtime,
            "running plan"
        );

        for step in plan.steps() {
            if self.remaining() == 0 {
                debug!(%step, "out of time, skipping step");
                continue;
            }
            match self.apply(step) {
                Ok(()) => {
                    self.applied += 1;
                    info!(%step, "plan step applied");
                }
                Err(err) => {
                    self.failed += 1;
                    warn!(%step, error = %err, "plan step failed");
                }
            }
            let seconds = step
                .duration()
                .unwrap_or(u64::MAX)
                .min(self.remaining());
            self.advance(seconds).await;
        }
        let rest = self.remaining();
        self.advance(rest).await;

        info!(elapsed = self.elapsed, "plan finished");
        self.summary()
    }

    /// Snapshot of the run so far.
    pub fn summary(&self) -> Summary {
        let events = self.session.events();
        Summary {
            simulated_seconds: self.elapsed,
            steps_applied: self.applied,
            steps_failed: self.failed,
            telemetry: self.session.telemetry(),
            recent_events: events.recent(self.config.summary_events).cloned().collect(),
            events_dropped: events.dropped(),
        }
    }

    fn apply(&mut self, step: &Step) -> ops_runtime::Result<()> {
        let session = &mut self.session;
        match step {
            Step::Run { kind, name, .. } => session.start_action(kind, name),
            Step::Idle { .. } => {
                session.stop_action();
                Ok(())
            }
            Step::Upgrade { skill, levels } => session.upgrade_skill(skill, *levels).map(drop),
            Step::Team { kind, name, size } => session.set_team_size(kind, name, *size).map(drop),
            Step::City { name } => session.switch_city(name),
        }
    }

    async fn advance(&mut self, seconds: u64) {
        if seconds == 0 {
            return;
        }
        let mut pacer = self
            .config
            .realtime
            .then(|| tokio::time::interval(Duration::from_secs(1)));
        for _ in 0..seconds {
            match pacer.as_mut() {
                Some(pacer) => {
                    pacer.tick().await;
                }
                // fast-forward still lets ctrl-c and other tasks run
                None => tokio::task::yield_now().await,
            }
            self.session.tick(1.0);
            self.elapsed += 1;
        }
    }

    fn remaining(&self) -> u64 {
        self.config.seconds.saturating_sub(self.elapsed)
    }
}
