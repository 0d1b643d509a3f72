use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use bodytrack_capture::device::{ColorResolution, DepthMode, FrameRate};
use bodytrack_capture::tracking::{ProcessingMode, SensorOrientation};
use bodytrack_capture::{
    CaptureConfig, ConsoleSink, CycleErrorPolicy, DeviceConfiguration, JsonLinesSink, RunMode,
    SimBackend, SimConfig, SkeletonSink, Timeout, TrackerConfiguration,
};
use clap::Parser;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "bodytrack-capture")]
#[command(about = "Capture depth frames, run body tracking and report skeleton joints")]
#[command(version)]
struct Cli {
    /// Print every joint's position, orientation and confidence
    #[arg(short, long)]
    verbose: bool,

    /// Capture continuously instead of a single frame
    #[arg(short, long)]
    continuous: bool,

    /// Continuous capture duration in seconds
    #[arg(short, long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    duration: u64,

    /// Camera frame rate
    #[arg(long, value_enum, default_value_t = FrameRate::Fps30)]
    fps: FrameRate,

    /// Depth sensor mode
    #[arg(long, value_enum, default_value_t = DepthMode::NfovUnbinned)]
    depth_mode: DepthMode,

    /// Color camera resolution
    #[arg(long, value_enum, default_value_t = ColorResolution::Off)]
    color_resolution: ColorResolution,

    /// Where the body tracker runs inference
    #[arg(long, value_enum, default_value_t = ProcessingMode::Gpu)]
    processing_mode: ProcessingMode,

    /// Sensor mounting orientation
    #[arg(long, value_enum, default_value_t = SensorOrientation::Default)]
    sensor_orientation: SensorOrientation,

    /// GPU used by the body tracker
    #[arg(long, default_value = "0")]
    gpu_device_id: u32,

    /// Bound for each blocking capture, enqueue and pop (default: wait forever)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Spacing between continuous cycles (default: one device frame period)
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Stop at the first failed capture cycle instead of skipping it
    #[arg(long)]
    abort_on_error: bool,

    /// Write one JSON record per skeleton to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// People standing in front of the simulated sensor; those outside the
    /// depth field of view are not detected
    #[arg(long, default_value = "1")]
    bodies: usize,
}

impl Cli {
    fn capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            device: DeviceConfiguration {
                depth_mode: self.depth_mode,
                color_resolution: self.color_resolution,
                camera_fps: self.fps,
                device_index: 0,
            },
            tracker: TrackerConfiguration {
                sensor_orientation: self.sensor_orientation,
                processing_mode: self.processing_mode,
                gpu_device_id: self.gpu_device_id,
            },
            mode: if self.continuous {
                RunMode::Continuous {
                    duration_secs: self.duration,
                }
            } else {
                RunMode::Single
            },
            timeout: Timeout::from_millis(self.timeout_ms),
            error_policy: if self.abort_on_error {
                CycleErrorPolicy::Abort
            } else {
                CycleErrorPolicy::Continue
            },
            interval: self.interval_ms.map(Duration::from_millis),
            verbose: self.verbose,
            output: self.output.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.capture_config();

    // Set RUST_LOG to override, e.g. RUST_LOG=bodytrack_capture=trace
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();

    let mut sinks: Vec<Box<dyn SkeletonSink>> = vec![Box::new(ConsoleSink::stdout(config.verbose))];
    if let Some(path) = &config.output {
        match JsonLinesSink::create(path) {
            Ok(sink) => sinks.push(Box::new(sink)),
            Err(err) => {
                error!("Cannot open {}: {}", path.display(), err);
                return ExitCode::FAILURE;
            }
        }
    }

    let stop = Arc::new(AtomicBool::new(false));
    if matches!(config.mode, RunMode::Continuous { .. }) {
        let flag = Arc::clone(&stop);
        if let Err(err) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
            warn!("Ctrl+C handler unavailable: {}", err);
        }
    }

    let mut backend = SimBackend::new(SimConfig {
        bodies: cli.bodies,
        realtime: true,
    });

    match bodytrack_capture::pipeline::run(&mut backend, &config, &mut sinks, Some(stop)) {
        Ok(summary) => {
            info!(
                "{} cycles: {} skeletons, {} empty, {} failed, {} sequences",
                summary.cycles,
                summary.skeletons,
                summary.empty_frames,
                summary.failed_cycles,
                summary.sequences
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("bodytrack-capture").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults_run_one_cycle() {
        let config = parse(&[]).unwrap().capture_config();
        assert_eq!(config.mode, RunMode::Single);
        assert_eq!(config.timeout, Timeout::Infinite);
        assert_eq!(config.error_policy, CycleErrorPolicy::Continue);
        assert_eq!(config.device, DeviceConfiguration::default());
        assert!(config.interval.is_none());
        assert!(config.output.is_none());
    }

    #[test]
    fn test_continuous_with_duration() {
        let config = parse(&["-c", "-d", "5"]).unwrap().capture_config();
        assert_eq!(config.mode, RunMode::Continuous { duration_secs: 5 });

        let config = parse(&["-c"]).unwrap().capture_config();
        assert_eq!(config.mode, RunMode::Continuous { duration_secs: 10 });
    }

    #[test]
    fn test_policy_timeout_and_stream_options() {
        let cli = parse(&[
            "-v",
            "--abort-on-error",
            "--timeout-ms",
            "250",
            "--interval-ms",
            "1000",
            "--fps",
            "15",
            "--depth-mode",
            "wfov-binned",
            "--color-resolution",
            "720p",
            "-o",
            "skeletons.jsonl",
        ])
        .unwrap();
        let config = cli.capture_config();

        assert!(config.verbose);
        assert_eq!(config.error_policy, CycleErrorPolicy::Abort);
        assert_eq!(config.timeout, Timeout::After(Duration::from_millis(250)));
        assert_eq!(config.interval, Some(Duration::from_secs(1)));
        assert_eq!(config.device.camera_fps, FrameRate::Fps15);
        assert_eq!(config.device.depth_mode, DepthMode::WfovBinned);
        assert_eq!(config.device.color_resolution, ColorResolution::R720p);
        assert_eq!(config.output, Some(PathBuf::from("skeletons.jsonl")));
    }

    #[test]
    fn test_bad_arguments_are_usage_errors() {
        let cases: [&[&str]; 5] = [
            &["-x"],
            &["extra"],
            &["-c", "-d", "0"],
            &["-d", "ten"],
            &["--fps", "60"],
        ];
        for args in cases {
            let err = parse(args).err().unwrap_or_else(|| panic!("{args:?} parsed"));
            assert_eq!(err.exit_code(), 2, "{args:?}");
        }
        assert_eq!(parse(&["-x"]).err().map(|e| e.kind()), Some(ErrorKind::UnknownArgument));
    }
}
