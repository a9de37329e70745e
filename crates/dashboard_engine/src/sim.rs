use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::events::{EventSink, RunEvent};

/// Emits [`RunEvent::SimTick`] on a fixed cadence until stopped.
///
/// The ticks only drive synthetic progress while the backend reports none;
/// how much a tick is worth is decided by the state layer. Real progress
/// overriding the bar does not stop the cadence — only run termination does.
pub struct ProgressSimulator {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ProgressSimulator {
    /// Spawn the tick task on the current runtime.
    ///
    /// The task also winds down when `parent` is cancelled, so a superseded
    /// run can never leave a ticking timer behind.
    pub fn start(
        interval: Duration,
        sink: Arc<dyn EventSink>,
        parent: &CancellationToken,
    ) -> Self {
        let token = parent.child_token();
        let tick_token = token.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first interval tick completes immediately; swallow it so
            // ticks start one full interval after the run begins.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = tick_token.cancelled() => break,
                    _ = ticker.tick() => sink.emit(RunEvent::SimTick),
                }
            }
        });
        Self {
            token,
            task: Some(task),
        }
    }

    /// Stop the cadence and wait for the task to wind down.
    ///
    /// Idempotent: stopping an already-stopped simulator is a no-op.
    pub async fn stop(&mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}
