use crate::{DashboardState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: DashboardState, msg: Msg) -> (DashboardState, Vec<Effect>) {
    let effects = match msg {
        Msg::RunRequested => {
            // State resets at request time; the engine cancels the
            // superseded run before the new one starts, so no stale event
            // can land after this.
            state.begin_run();
            vec![Effect::StartRun]
        }
        Msg::CancelRequested => {
            state.reset_to_idle();
            vec![Effect::AbortRun]
        }
        Msg::JobCreated { job_id } => {
            state.record_job(job_id);
            Vec::new()
        }
        Msg::StatusPolled { status, progress } => {
            state.set_phase(status.into());
            if let Some(value) = progress {
                state.apply_reported_progress(value, status);
            }
            Vec::new()
        }
        Msg::SimProgressTick => {
            state.apply_sim_tick();
            Vec::new()
        }
        Msg::JobSucceeded { result } => {
            state.complete(&result);
            Vec::new()
        }
        Msg::JobFailed { message } => {
            state.fail(message);
            Vec::new()
        }
        Msg::RunFaulted { message } => {
            state.set_error(message);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
