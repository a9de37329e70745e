use crate::chart::{CategorySeries, GroupedSeries};
use crate::state::RunPhase;

/// Render-ready snapshot of the dashboard state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardViewModel {
    pub phase: RunPhase,
    pub job_id: Option<String>,
    /// Whole percent for the progress bar, 0..=100.
    pub progress_percent: u8,
    pub error: Option<String>,
    pub chart1: Option<CategorySeries>,
    pub chart2: Option<GroupedSeries>,
}

impl DashboardViewModel {
    /// True once the run can no longer make progress: a terminal phase, or
    /// a surfaced error.
    pub fn is_settled(&self) -> bool {
        self.error.is_some() || matches!(self.phase, RunPhase::Succeeded | RunPhase::Failed)
    }
}
