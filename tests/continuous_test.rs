use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use bodytrack_capture::device::{DeviceConfiguration, FrameRate};
use bodytrack_capture::error::ReportError;
use bodytrack_capture::pipeline::{self, Counters};
use bodytrack_capture::report::{SkeletonReport, SkeletonSink};
use bodytrack_capture::sim::{FaultPlan, SimBackend, SimConfig};
use bodytrack_capture::{CaptureConfig, QueueError, RunMode, Timeout};

#[derive(Default)]
struct CountersSink {
    seen: Vec<Counters>,
    timestamps: Vec<Duration>,
}

impl SkeletonSink for CountersSink {
    fn render(&mut self, report: &SkeletonReport<'_>) -> Result<(), ReportError> {
        self.seen.push(report.counters);
        self.timestamps.push(report.device_timestamp);
        Ok(())
    }
}

fn continuous(duration_secs: u64, fps: FrameRate) -> CaptureConfig {
    CaptureConfig {
        device: DeviceConfiguration {
            camera_fps: fps,
            ..Default::default()
        },
        mode: RunMode::Continuous { duration_secs },
        interval: Some(Duration::ZERO),
        ..Default::default()
    }
}

#[test]
fn test_runs_duration_times_fps_cycles() {
    let mut backend = SimBackend::new(SimConfig::default());
    let mut sink = CountersSink::default();

    let config = continuous(3, FrameRate::Fps5);
    let summary = pipeline::run(&mut backend, &config, &mut sink, None).unwrap();

    assert_eq!(summary.cycles, 15);
    assert_eq!(summary.sequences, 3);
    assert_eq!(summary.skeletons, 15);
    assert!(!summary.stopped_early);

    assert_eq!(sink.seen.first(), Some(&Counters::default()));
    assert_eq!(
        sink.seen[5],
        Counters {
            sequence_number: 1,
            frame_number: 0
        }
    );
    assert_eq!(
        sink.seen.last(),
        Some(&Counters {
            sequence_number: 2,
            frame_number: 4
        })
    );
}

#[test]
fn test_pop_failure_does_not_stop_later_cycles() {
    let faults = FaultPlan::new().pop_error(2, QueueError::Failed);
    let mut backend = SimBackend::new(SimConfig::default()).with_faults(faults);
    let mut sink = CountersSink::default();

    let config = continuous(1, FrameRate::Fps5);
    let summary = pipeline::run(&mut backend, &config, &mut sink, None).unwrap();

    assert_eq!(summary.cycles, 5);
    assert_eq!(summary.failed_cycles, 1);
    assert_eq!(summary.skeletons, 4);
    assert!(!sink.seen.iter().any(|c| c.frame_number == 1));

    let stats = backend.stats().snapshot();
    assert_eq!(stats.captures_acquired, stats.captures_released);
    assert_eq!(stats.frames_popped, stats.frames_released);
}

#[test]
fn test_pop_timeout_does_not_shift_later_results() {
    let faults = FaultPlan::new().pop_error(1, QueueError::Timeout);
    let mut backend = SimBackend::new(SimConfig::default()).with_faults(faults);
    let mut sink = CountersSink::default();
    let config = CaptureConfig {
        timeout: Timeout::After(Duration::from_millis(50)),
        ..continuous(1, FrameRate::Fps5)
    };

    let summary = pipeline::run(&mut backend, &config, &mut sink, None).unwrap();

    assert_eq!(summary.failed_cycles, 1);
    assert_eq!(summary.skeletons, 4);
    let period = FrameRate::Fps5.frame_period();
    for (counters, timestamp) in sink.seen.iter().zip(&sink.timestamps) {
        assert_eq!(
            *timestamp,
            period * counters.frame_number as u32,
            "frame {} reported another capture's result",
            counters.frame_number
        );
    }

    let stats = backend.stats().snapshot();
    assert_eq!(stats.captures_enqueued, 5);
    assert_eq!(stats.frames_popped, 5);
    assert_eq!(stats.frames_popped, stats.frames_released);
}

#[test]
fn test_empty_frames_counted_separately() {
    let faults = FaultPlan::new().no_bodies_on(1).no_bodies_on(4);
    let mut backend = SimBackend::new(SimConfig::default()).with_faults(faults);
    let mut sink = CountersSink::default();

    let config = continuous(1, FrameRate::Fps5);
    let summary = pipeline::run(&mut backend, &config, &mut sink, None).unwrap();

    assert_eq!(summary.empty_frames, 2);
    assert_eq!(summary.skeletons, 3);
    assert_eq!(summary.failed_cycles, 0);
}

#[test]
fn test_stop_flag_ends_run_before_first_cycle() {
    let mut backend = SimBackend::new(SimConfig::default());
    let mut sink = CountersSink::default();
    let stop = Arc::new(AtomicBool::new(true));

    let config = continuous(10, FrameRate::Fps30);
    let summary = pipeline::run(&mut backend, &config, &mut sink, Some(stop)).unwrap();

    assert!(summary.stopped_early);
    assert_eq!(summary.cycles, 0);
    assert!(sink.seen.is_empty());
}

#[test]
fn test_cadence_spaces_cycles() {
    let mut backend = SimBackend::new(SimConfig::default());
    let mut sink = CountersSink::default();
    let config = CaptureConfig {
        interval: Some(Duration::from_millis(20)),
        ..continuous(1, FrameRate::Fps5)
    };

    let started = std::time::Instant::now();
    let summary = pipeline::run(&mut backend, &config, &mut sink, None).unwrap();

    assert_eq!(summary.cycles, 5);
    // No sleep after the final cycle.
    assert!(started.elapsed() >= Duration::from_millis(80));
}
