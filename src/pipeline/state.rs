/// Lifecycle state of a capture pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// Nothing opened yet
    #[default]
    Uninitialized,
    /// Device open and streaming
    DeviceOpen,
    /// Tracker created, no cycle run yet
    TrackerReady,
    /// At least one cycle has run
    Running,
    /// Teardown in progress
    ShuttingDown,
    /// All resources released
    Closed,
}
