//! Persisted skeleton records, one JSON object per line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ReportError;
use crate::report::{SkeletonReport, SkeletonSink};

/// One joint of a persisted skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointRecord {
    pub joint: String,
    /// Millimetres
    pub position: [f32; 3],
    /// W, X, Y, Z
    pub orientation: [f32; 4],
    pub confidence: String,
}

/// A persisted skeleton with the cycle it was collected in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonRecord {
    pub sequence_number: u64,
    pub frame_number: u64,
    /// Wall-clock time the record was written, RFC 3339
    pub captured_at: String,
    pub device_timestamp_usec: u64,
    pub body_count: usize,
    pub body_id: u32,
    pub joints: Vec<JointRecord>,
}

impl SkeletonRecord {
    pub fn from_report(report: &SkeletonReport<'_>) -> Self {
        let joints = report
            .skeleton
            .iter()
            .map(|(id, joint)| JointRecord {
                joint: id.name().to_string(),
                position: [joint.position.x, joint.position.y, joint.position.z],
                orientation: joint.wxyz(),
                confidence: joint.confidence.label().to_string(),
            })
            .collect();

        Self {
            sequence_number: report.counters.sequence_number,
            frame_number: report.counters.frame_number,
            captured_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            device_timestamp_usec: u64::try_from(report.device_timestamp.as_micros())
                .unwrap_or(u64::MAX),
            body_count: report.body_count,
            body_id: report.skeleton.body_id,
            joints,
        }
    }
}

/// Appends a [`SkeletonRecord`] line per skeleton.
pub struct JsonLinesSink<W: Write> {
    out: W,
    written: u64,
}

impl JsonLinesSink<BufWriter<File>> {
    /// Create or truncate the data file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        info!("Writing skeleton records to {}", path.display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Records written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SkeletonSink for JsonLinesSink<W> {
    fn render(&mut self, report: &SkeletonReport<'_>) -> Result<(), ReportError> {
        let record = SkeletonRecord::from_report(report);
        serde_json::to_writer(&mut self.out, &record)?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ReportError> {
        self.out.flush()?;
        Ok(())
    }
}
