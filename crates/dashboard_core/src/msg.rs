use crate::result::AnalysisResult;
use crate::state::JobStatus;

/// Run lifecycle events fed into [`update`](crate::update).
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User (or startup) requested a run. Supersedes any run in flight.
    RunRequested,
    /// User or teardown requested cancellation of the run in flight.
    CancelRequested,
    /// The backend acknowledged job creation.
    JobCreated { job_id: String },
    /// One status poll completed.
    StatusPolled {
        status: JobStatus,
        progress: Option<f64>,
    },
    /// Simulated-progress cadence tick.
    SimProgressTick,
    /// Terminal: result payload decoded and validated.
    JobSucceeded { result: AnalysisResult },
    /// Terminal: the backend reported failure.
    JobFailed { message: String },
    /// Terminal: polling gave up, or a request/decode failed.
    RunFaulted { message: String },
    /// Fallback for placeholder wiring.
    NoOp,
}
