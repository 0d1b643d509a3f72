//! Single-shot and bounded-continuous drivers built on `CapturePipeline::step`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::config::CycleErrorPolicy;
use crate::device::{CaptureDevice, FrameRate};
use crate::error::PipelineError;
use crate::pipeline::{CapturePipeline, TrackedFrame};
use crate::report::{SkeletonReport, SkeletonSink};
use crate::tracking::BodyTracker;

/// Frame and sequence counters, advanced only by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counters {
    /// Completed sequences
    pub sequence_number: u64,
    /// Cycles within the current sequence
    pub frame_number: u64,
}

impl Counters {
    /// Count one cycle. Returns `true` when this cycle completed a sequence.
    pub fn advance(&mut self, frames_per_sequence: u64) -> bool {
        self.frame_number += 1;
        if self.frame_number >= frames_per_sequence {
            self.frame_number = 0;
            self.sequence_number += 1;
            return true;
        }
        false
    }
}

/// Schedule for a bounded-continuous run.
///
/// A sequence is one second of device frames. The run ends once
/// `duration_secs` sequences have completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuousPlan {
    pub duration_secs: u64,
    pub frames_per_sequence: u64,
    /// Fixed spacing between cycle starts
    pub interval: Duration,
}

impl ContinuousPlan {
    pub fn new(duration_secs: u64, camera_fps: FrameRate) -> Self {
        Self {
            duration_secs,
            frames_per_sequence: u64::from(camera_fps.fps()),
            interval: camera_fps.frame_period(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn total_cycles(&self) -> u64 {
        self.duration_secs * self.frames_per_sequence
    }

    pub fn is_complete(&self, counters: &Counters) -> bool {
        counters.sequence_number >= self.duration_secs
    }
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Cycles attempted
    pub cycles: u64,
    /// Cycles that produced a skeleton
    pub skeletons: u64,
    /// Successful cycles with nobody in view
    pub empty_frames: u64,
    /// Cycles that failed and were skipped
    pub failed_cycles: u64,
    /// Sequences completed
    pub sequences: u64,
    /// Whether a stop request ended the run early
    pub stopped_early: bool,
}

/// Drives a pipeline and forwards skeletons to a sink.
pub struct Driver<'a> {
    sink: &'a mut dyn SkeletonSink,
    policy: CycleErrorPolicy,
    stop: Option<Arc<AtomicBool>>,
    counters: Counters,
    summary: RunSummary,
}

impl<'a> Driver<'a> {
    pub fn new(sink: &'a mut dyn SkeletonSink, policy: CycleErrorPolicy) -> Self {
        Self {
            sink,
            policy,
            stop: None,
            counters: Counters::default(),
            summary: RunSummary::default(),
        }
    }

    /// Check `flag` between cycles and stop once it is set.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop = Some(flag);
        self
    }

    /// Run exactly one cycle.
    pub fn run_single<D, T>(
        mut self,
        pipeline: &mut CapturePipeline<D, T>,
    ) -> Result<RunSummary, PipelineError>
    where
        D: CaptureDevice,
        T: BodyTracker<Capture = D::Capture>,
    {
        if let Err(err) = self.run_cycle(pipeline) {
            return Err(self.flush_after(err));
        }
        self.sink.flush()?;
        Ok(self.summary)
    }

    /// Run cycles at the plan's cadence until the plan completes.
    pub fn run_continuous<D, T>(
        mut self,
        pipeline: &mut CapturePipeline<D, T>,
        plan: &ContinuousPlan,
    ) -> Result<RunSummary, PipelineError>
    where
        D: CaptureDevice,
        T: BodyTracker<Capture = D::Capture>,
    {
        info!(
            "Capturing {} sequences of {} frames, one cycle every {:?}",
            plan.duration_secs, plan.frames_per_sequence, plan.interval
        );

        while !plan.is_complete(&self.counters) {
            if self.stop_requested() {
                info!("Stop requested, ending capture early");
                self.summary.stopped_early = true;
                break;
            }

            let started = Instant::now();
            if let Err(err) = self.run_cycle(pipeline) {
                return Err(self.flush_after(err));
            }
            if self.counters.advance(plan.frames_per_sequence) {
                self.summary.sequences += 1;
                debug!("Sequence {} complete", self.counters.sequence_number);
            }

            if !plan.is_complete(&self.counters) {
                let remaining = plan.interval.saturating_sub(started.elapsed());
                if !remaining.is_zero() {
                    thread::sleep(remaining);
                }
            }
        }

        self.sink.flush()?;
        Ok(self.summary)
    }

    fn stop_requested(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Flush what was already reported before giving up on the run.
    fn flush_after(&mut self, err: PipelineError) -> PipelineError {
        if let Err(flush_err) = self.sink.flush() {
            error!("Flushing reports after a failed run: {}", flush_err);
        }
        err
    }

    fn run_cycle<D, T>(
        &mut self,
        pipeline: &mut CapturePipeline<D, T>,
    ) -> Result<(), PipelineError>
    where
        D: CaptureDevice,
        T: BodyTracker<Capture = D::Capture>,
    {
        self.summary.cycles += 1;
        let cycle = self.summary.cycles;

        match pipeline.step() {
            Ok(frame) => self.render(&frame),
            Err(source) => {
                self.summary.failed_cycles += 1;
                match self.policy {
                    CycleErrorPolicy::Continue => {
                        if source.is_timeout() {
                            warn!("Cycle {} skipped: {}", cycle, source);
                        } else {
                            error!("Cycle {} skipped: {}", cycle, source);
                        }
                        Ok(())
                    }
                    CycleErrorPolicy::Abort => Err(PipelineError::Cycle { cycle, source }),
                }
            }
        }
    }

    fn render(&mut self, frame: &TrackedFrame) -> Result<(), PipelineError> {
        match &frame.skeleton {
            Some(skeleton) => {
                self.summary.skeletons += 1;
                self.sink.render(&SkeletonReport {
                    counters: self.counters,
                    body_count: frame.body_count,
                    device_timestamp: frame.device_timestamp,
                    skeleton,
                })?;
            }
            None => {
                self.summary.empty_frames += 1;
                debug!("No body in view");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_roll_over() {
        let mut counters = Counters::default();
        assert!(!counters.advance(3));
        assert!(!counters.advance(3));
        assert!(counters.advance(3));
        assert_eq!(
            counters,
            Counters {
                sequence_number: 1,
                frame_number: 0
            }
        );
    }

    #[test]
    fn test_plan_covers_duration_times_fps() {
        let plan = ContinuousPlan::new(10, FrameRate::Fps30);
        assert_eq!(plan.total_cycles(), 300);

        let mut counters = Counters::default();
        let mut cycles = 0;
        while !plan.is_complete(&counters) {
            counters.advance(plan.frames_per_sequence);
            cycles += 1;
        }
        assert_eq!(cycles, 300);
        assert_eq!(counters.sequence_number, 10);
    }

    #[test]
    fn test_zero_duration_runs_nothing() {
        let plan = ContinuousPlan::new(0, FrameRate::Fps5);
        assert!(plan.is_complete(&Counters::default()));
    }
}
