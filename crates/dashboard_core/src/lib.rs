//! Dashboard core: pure run state machine, result decoding, and chart
//! aggregation.
mod chart;
mod effect;
mod msg;
mod result;
mod state;
mod update;
mod view_model;

pub use chart::{build_chart1, build_chart2, CategorySeries, GroupedSeries, SplitTrace};
pub use effect::Effect;
pub use msg::Msg;
pub use result::{
    decode_payload, is_valid_result, AnalysisResult, LabelCountRow, ResultError, SplitCountRow,
};
pub use state::{
    DashboardState, JobStatus, RunPhase, SIM_PROGRESS_CEILING, SIM_PROGRESS_STEP,
};
pub use update::update;
pub use view_model::DashboardViewModel;
