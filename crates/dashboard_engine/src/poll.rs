use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use dashboard_core::{decode_payload, JobStatus};
use dashboard_logging::{dash_debug, dash_info, dash_warn};

use crate::api::{ApiError, JobApi};
use crate::events::{EventSink, RunEvent};
use crate::sim::ProgressSimulator;

/// Fallback when the backend reports failure without a message.
pub const GENERIC_FAILURE: &str = "Job failed";
/// Surfaced when the maximum poll attempts pass without a terminal status.
pub const TIMEOUT_MESSAGE: &str = "Polling timed out";

/// Tunable parameters for one polling run.
#[derive(Debug, Clone)]
pub struct PollSettings {
    /// The inter-poll delay grows by this much per attempt.
    pub backoff_step: Duration,
    /// Upper bound on the inter-poll delay.
    pub backoff_cap: Duration,
    /// Status polls before the run gives up.
    pub max_attempts: u32,
    /// Cadence of simulated-progress ticks.
    pub sim_interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            backoff_step: Duration::from_millis(500),
            backoff_cap: Duration::from_secs(5),
            max_attempts: 60,
            sim_interval: Duration::from_millis(500),
        }
    }
}

/// Delay before the poll that follows `attempt` (1-based): grows linearly,
/// clamped to the cap.
pub fn poll_delay(attempt: u32, settings: &PollSettings) -> Duration {
    settings
        .backoff_step
        .saturating_mul(attempt)
        .min(settings.backoff_cap)
}

/// How the poll loop ended, before the result payload is examined.
enum PollConclusion {
    Succeeded(Option<Value>),
    Failed(Option<String>),
    TimedOut,
    Fault(String),
    Aborted,
}

/// Drive one job from creation to a terminal outcome.
///
/// Emits progress and terminal events through `sink`. Cancelling `cancel`
/// ends the run silently; every other ending emits exactly one terminal
/// event. The simulator is stopped on all exit paths before the terminal
/// event is emitted.
pub async fn run_job(
    api: Arc<dyn JobApi>,
    settings: PollSettings,
    sink: Arc<dyn EventSink>,
    cancel: CancellationToken,
) {
    let mut sim = ProgressSimulator::start(settings.sim_interval, sink.clone(), &cancel);
    let conclusion = drive(api.as_ref(), &settings, sink.as_ref(), &cancel).await;
    sim.stop().await;

    match conclusion {
        PollConclusion::Succeeded(payload) => {
            let payload = payload.unwrap_or(Value::Null);
            match decode_payload(&payload) {
                Ok(result) => sink.emit(RunEvent::Succeeded { result }),
                Err(err) => {
                    dash_warn!("result payload rejected: {err}");
                    sink.emit(RunEvent::Faulted {
                        message: format!("Failed to parse result: {err}"),
                    });
                }
            }
        }
        PollConclusion::Failed(message) => sink.emit(RunEvent::Failed {
            message: message.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        }),
        PollConclusion::TimedOut => sink.emit(RunEvent::Faulted {
            message: TIMEOUT_MESSAGE.to_string(),
        }),
        PollConclusion::Fault(message) => sink.emit(RunEvent::Faulted { message }),
        PollConclusion::Aborted => dash_debug!("run aborted"),
    }
}

/// Create the job and poll it until something conclusive happens.
async fn drive(
    api: &dyn JobApi,
    settings: &PollSettings,
    sink: &dyn EventSink,
    cancel: &CancellationToken,
) -> PollConclusion {
    let created = match api.create_job(cancel).await {
        Ok(created) => created,
        Err(ApiError::Cancelled) => return PollConclusion::Aborted,
        Err(err) => return PollConclusion::Fault(err.to_string()),
    };
    dash_info!("job {} created", created.job_id);
    sink.emit(RunEvent::Created {
        job_id: created.job_id.clone(),
    });

    let mut attempt: u32 = 0;
    while attempt < settings.max_attempts {
        let response = match api.job_status(&created.job_id, cancel).await {
            Ok(response) => response,
            Err(ApiError::Cancelled) => return PollConclusion::Aborted,
            Err(err) => return PollConclusion::Fault(err.to_string()),
        };
        sink.emit(RunEvent::Status {
            status: response.status,
            progress: response.progress,
        });

        match response.status {
            JobStatus::Succeeded => return PollConclusion::Succeeded(response.result),
            JobStatus::Failed => return PollConclusion::Failed(response.error),
            JobStatus::Queued | JobStatus::Running => {}
        }

        attempt += 1;
        let delay = poll_delay(attempt, settings);
        dash_debug!(
            "job {} still {:?}; attempt {attempt}, next poll in {delay:?}",
            created.job_id,
            response.status
        );
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return PollConclusion::Aborted,
            _ = tokio::time::sleep(delay) => {}
        }
    }

    dash_warn!(
        "job {} not terminal after {} polls; giving up",
        created.job_id,
        settings.max_attempts
    );
    PollConclusion::TimedOut
}
