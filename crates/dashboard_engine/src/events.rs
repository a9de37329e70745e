use dashboard_core::{AnalysisResult, JobStatus};

/// Everything a run reports back to its consumer.
///
/// Cancellation is deliberately absent: a superseded or torn-down run ends
/// silently.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// The backend accepted the job.
    Created { job_id: String },
    /// One status poll completed.
    Status {
        status: JobStatus,
        progress: Option<f64>,
    },
    /// Simulated-progress cadence tick.
    SimTick,
    /// Terminal: result payload decoded and validated.
    Succeeded { result: AnalysisResult },
    /// Terminal: the backend reported failure.
    Failed { message: String },
    /// Terminal: polling gave up, or a request/decode failed.
    Faulted { message: String },
}

/// Consumer seam for run events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: RunEvent);
}

/// Sink that forwards events over a standard mpsc channel.
pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<RunEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<RunEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: RunEvent) {
        let _ = self.tx.send(event);
    }
}
