//! Terminal shell for the analysis-job dashboard: runs one job against the
//! remote API and renders the derived charts as text.
mod logging;
mod render;

use std::time::Duration;

use dashboard_core::{update, DashboardState, Effect, Msg};
use dashboard_engine::{ApiSettings, JobRunner, PollSettings, RunEvent};
use dashboard_logging::dash_info;

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::Terminal);

    let settings = ApiSettings::from_env();
    dash_info!("job API base: {}", settings.base_url);
    let runner = JobRunner::new(settings, PollSettings::default())?;

    let mut state = DashboardState::new();

    // One run per invocation, started immediately.
    let (next, effects) = update(state, Msg::RunRequested);
    state = next;
    dispatch(&runner, effects);

    loop {
        let mut drained_any = false;
        while let Some(event) = runner.try_recv() {
            drained_any = true;
            let (next, effects) = update(state, map_event(event));
            state = next;
            dispatch(&runner, effects);
        }

        if state.consume_dirty() {
            render::draw(&state.view());
        }

        let view = state.view();
        if view.is_settled() {
            if let Some(message) = view.error {
                anyhow::bail!(message);
            }
            return Ok(());
        }

        if !drained_any {
            std::thread::sleep(Duration::from_millis(20));
        }
    }
}

fn map_event(event: RunEvent) -> Msg {
    match event {
        RunEvent::Created { job_id } => Msg::JobCreated { job_id },
        RunEvent::Status { status, progress } => Msg::StatusPolled { status, progress },
        RunEvent::SimTick => Msg::SimProgressTick,
        RunEvent::Succeeded { result } => Msg::JobSucceeded { result },
        RunEvent::Failed { message } => Msg::JobFailed { message },
        RunEvent::Faulted { message } => Msg::RunFaulted { message },
    }
}

fn dispatch(runner: &JobRunner, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::StartRun => {
                dash_info!("StartRun");
                runner.start_run();
            }
            Effect::AbortRun => runner.abort_run(),
        }
    }
}
