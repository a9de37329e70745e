/// Side effects requested by the pure update function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Start a run, superseding any run still in flight.
    StartRun,
    /// Abort the current run without starting a new one.
    AbortRun,
}
