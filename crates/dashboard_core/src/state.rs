use serde::Deserialize;

use crate::chart::{build_chart1, build_chart2, CategorySeries, GroupedSeries};
use crate::result::AnalysisResult;
use crate::view_model::DashboardViewModel;

/// Wire status of a backend job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Succeeded,
    Failed,
}

/// Client-side lifecycle phase: the wire statuses plus `Idle` before the
/// first run. `Idle` never appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Idle,
    Queued,
    Running,
    Succeeded,
    Failed,
}

impl From<JobStatus> for RunPhase {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Queued => RunPhase::Queued,
            JobStatus::Running => RunPhase::Running,
            JobStatus::Succeeded => RunPhase::Succeeded,
            JobStatus::Failed => RunPhase::Failed,
        }
    }
}

/// Synthetic progress added per simulator tick.
pub const SIM_PROGRESS_STEP: f64 = 10.0;
/// Simulated or reported progress stays at or below this ceiling until the
/// job actually succeeds.
pub const SIM_PROGRESS_CEILING: f64 = 95.0;

/// State of the single dashboard run.
///
/// Mutated only through [`update`](crate::update) as run events arrive;
/// fully reset when a new run begins.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    phase: RunPhase,
    job_id: Option<String>,
    progress: f64,
    error: Option<String>,
    chart1: Option<CategorySeries>,
    chart2: Option<GroupedSeries>,
    dirty: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> DashboardViewModel {
        DashboardViewModel {
            phase: self.phase,
            job_id: self.job_id.clone(),
            progress_percent: self.progress.round() as u8,
            error: self.error.clone(),
            chart1: self.chart1.clone(),
            chart2: self.chart2.clone(),
        }
    }

    /// Returns the dirty flag and clears it. The render loop redraws only
    /// when this reports true.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub(crate) fn begin_run(&mut self) {
        self.phase = RunPhase::Queued;
        self.job_id = None;
        self.progress = 0.0;
        self.error = None;
        self.chart1 = None;
        self.chart2 = None;
        self.dirty = true;
    }

    /// Cancellation discards the run entirely; nothing of it survives.
    pub(crate) fn reset_to_idle(&mut self) {
        self.phase = RunPhase::Idle;
        self.job_id = None;
        self.progress = 0.0;
        self.error = None;
        self.chart1 = None;
        self.chart2 = None;
        self.dirty = true;
    }

    pub(crate) fn record_job(&mut self, job_id: String) {
        self.job_id = Some(job_id);
        self.phase = RunPhase::Running;
        self.dirty = true;
    }

    pub(crate) fn set_phase(&mut self, phase: RunPhase) {
        if self.phase != phase {
            self.phase = phase;
            self.dirty = true;
        }
    }

    /// Apply a backend-reported progress value.
    ///
    /// Clamped to [0, 100] and held at the ceiling until the job has
    /// actually succeeded. Non-finite values are ignored.
    pub(crate) fn apply_reported_progress(&mut self, value: f64, status: JobStatus) {
        if !value.is_finite() {
            return;
        }
        let cap = if status == JobStatus::Succeeded {
            100.0
        } else {
            SIM_PROGRESS_CEILING
        };
        let next = value.clamp(0.0, 100.0).min(cap);
        if next != self.progress {
            self.progress = next;
            self.dirty = true;
        }
    }

    /// Advance simulated progress by one step, never past the ceiling.
    ///
    /// Ticks arriving outside an active run are ignored.
    pub(crate) fn apply_sim_tick(&mut self) {
        if !matches!(self.phase, RunPhase::Queued | RunPhase::Running) {
            return;
        }
        if self.progress < SIM_PROGRESS_CEILING {
            self.progress = (self.progress + SIM_PROGRESS_STEP).min(SIM_PROGRESS_CEILING);
            self.dirty = true;
        }
    }

    /// Terminal success: derive both chart series and drive the bar to 100.
    pub(crate) fn complete(&mut self, result: &AnalysisResult) {
        let chart1 = build_chart1(&result.sql_1);
        let chart2 = build_chart2(&result.sql_2, &chart1.categories);
        self.phase = RunPhase::Succeeded;
        self.progress = 100.0;
        self.chart1 = Some(chart1);
        self.chart2 = Some(chart2);
        self.dirty = true;
    }

    /// Terminal failure reported by the backend.
    pub(crate) fn fail(&mut self, message: String) {
        self.phase = RunPhase::Failed;
        self.error = Some(message);
        self.dirty = true;
    }

    /// A fault outside the job itself (network, decode, timeout). The phase
    /// is left as last observed; only the error slot changes.
    pub(crate) fn set_error(&mut self, message: String) {
        self.error = Some(message);
        self.dirty = true;
    }
}
