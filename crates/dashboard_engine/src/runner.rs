use std::sync::{mpsc, Arc};
use std::thread;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::{ApiError, ApiSettings, HttpJobApi, JobApi};
use crate::events::{ChannelEventSink, EventSink, RunEvent};
use crate::poll::{run_job, PollSettings};

enum RunnerCommand {
    StartRun,
    AbortRun,
}

/// Handle to the background runtime that executes polling runs.
///
/// Starting a run supersedes the previous one: its cancellation token is
/// triggered and its task awaited before the new run is spawned, so at most
/// one polling loop and one simulator are live at any time, and no event of
/// a superseded run can arrive after the new run's events begin.
///
/// Dropping the handle cancels whatever run is still in flight.
pub struct JobRunner {
    cmd_tx: mpsc::Sender<RunnerCommand>,
    event_rx: mpsc::Receiver<RunEvent>,
}

impl JobRunner {
    /// Spawn the runner thread over an [`HttpJobApi`] built from `api`.
    pub fn new(api: ApiSettings, poll: PollSettings) -> Result<Self, ApiError> {
        let api: Arc<dyn JobApi> = Arc::new(HttpJobApi::new(api)?);
        Ok(Self::with_api(api, poll))
    }

    /// Spawn the runner thread over any [`JobApi`] implementation.
    pub fn with_api(api: Arc<dyn JobApi>, poll: PollSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));
            let mut active: Option<(CancellationToken, JoinHandle<()>)> = None;

            while let Ok(command) = cmd_rx.recv() {
                if let Some((token, task)) = active.take() {
                    token.cancel();
                    let _ = runtime.block_on(task);
                }
                if matches!(command, RunnerCommand::StartRun) {
                    let token = CancellationToken::new();
                    let task = runtime.spawn(run_job(
                        api.clone(),
                        poll.clone(),
                        sink.clone(),
                        token.clone(),
                    ));
                    active = Some((token, task));
                }
            }

            // Command channel closed: the handle was dropped. Wind down any
            // run still in flight before the runtime goes away.
            if let Some((token, task)) = active.take() {
                token.cancel();
                let _ = runtime.block_on(task);
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Begin a run, superseding any run still in flight.
    pub fn start_run(&self) {
        let _ = self.cmd_tx.send(RunnerCommand::StartRun);
    }

    /// Cancel the current run without starting a new one.
    pub fn abort_run(&self) {
        let _ = self.cmd_tx.send(RunnerCommand::AbortRun);
    }

    /// Drain one pending run event, if any.
    pub fn try_recv(&self) -> Option<RunEvent> {
        self.event_rx.try_recv().ok()
    }
}
