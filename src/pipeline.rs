//! Capture-and-track pipeline and the drivers that repeat it.

mod capture_pipeline;
mod driver;
mod state;

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use tracing::{error, info};

pub use capture_pipeline::{CapturePipeline, TrackedFrame};
pub use driver::{ContinuousPlan, Counters, Driver, RunSummary};
pub use state::PipelineState;

use crate::backend::SensorBackend;
use crate::config::CaptureConfig;
use crate::error::PipelineError;
use crate::report::SkeletonSink;

/// Start a pipeline on `backend`, run the configured mode and tear down.
///
/// Initialization failures return before any cycle runs. Teardown happens
/// whether the run succeeds or is aborted.
pub fn run<B: SensorBackend>(
    backend: &mut B,
    config: &CaptureConfig,
    sink: &mut dyn SkeletonSink,
    stop: Option<Arc<AtomicBool>>,
) -> Result<RunSummary, PipelineError> {
    let mut pipeline = match CapturePipeline::start(
        backend,
        config.device,
        config.tracker.clone(),
        config.timeout,
    ) {
        Ok(pipeline) => pipeline,
        Err(err) => {
            error!("Initialization failed: {}", err);
            info!("Pipeline state: {:?}", PipelineState::Closed);
            return Err(err);
        }
    };

    let mut driver = Driver::new(sink, config.error_policy);
    if let Some(flag) = stop {
        driver = driver.with_stop_flag(flag);
    }

    let result = match config.continuous_plan() {
        Some(plan) => driver.run_continuous(&mut pipeline, &plan),
        None => driver.run_single(&mut pipeline),
    };

    pipeline.shutdown();
    result
}
