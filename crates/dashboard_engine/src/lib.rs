//! Dashboard engine: job API client, polling orchestration, and run events.
mod api;
mod events;
mod poll;
mod runner;
mod sim;

pub use api::{
    ApiError, ApiSettings, CreateJobResponse, HttpJobApi, JobApi, JobStatusResponse, API_BASE_ENV,
    DEFAULT_API_BASE,
};
pub use events::{ChannelEventSink, EventSink, RunEvent};
pub use poll::{poll_delay, run_job, PollSettings, GENERIC_FAILURE, TIMEOUT_MESSAGE};
pub use runner::JobRunner;
pub use sim::ProgressSimulator;
