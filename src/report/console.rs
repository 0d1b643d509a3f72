//! Human-readable skeleton output.

use std::io::{self, Stdout, Write};

use crate::error::ReportError;
use crate::report::{SkeletonReport, SkeletonSink};

/// Writes skeletons as text.
///
/// Verbose mode dumps every joint's position, orientation and confidence;
/// otherwise one summary line is written per skeleton.
pub struct ConsoleSink<W: Write> {
    out: W,
    verbose: bool,
}

impl ConsoleSink<Stdout> {
    pub fn stdout(verbose: bool) -> Self {
        Self::new(io::stdout(), verbose)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self { out, verbose }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_summary(&mut self, report: &SkeletonReport<'_>) -> io::Result<()> {
        let skeleton = report.skeleton;
        let c = skeleton.centroid();
        writeln!(
            self.out,
            "seq {} frame {}: body {} of {}, {} joints, centroid [{:.1}, {:.1}, {:.1}] mm, min confidence {}",
            report.counters.sequence_number,
            report.counters.frame_number,
            skeleton.body_id,
            report.body_count,
            skeleton.joints.len(),
            c.x,
            c.y,
            c.z,
            skeleton.min_confidence().label(),
        )
    }

    fn write_joints(&mut self, report: &SkeletonReport<'_>) -> io::Result<()> {
        writeln!(
            self.out,
            "Body Skeleton Joints (seq {}, frame {}, body {}):",
            report.counters.sequence_number,
            report.counters.frame_number,
            report.skeleton.body_id
        )?;

        for (id, joint) in report.skeleton.iter() {
            let p = &joint.position;
            let [w, x, y, z] = joint.wxyz();
            writeln!(self.out, "\t{} ({})", id.name(), id.index())?;
            writeln!(self.out, "\tJoint Position XYZ [mm]:")?;
            writeln!(self.out, "\t\tX: {}\n\t\tY: {}\n\t\tZ: {}", p.x, p.y, p.z)?;
            writeln!(self.out, "\tJoint Orientation WXYZ:")?;
            writeln!(self.out, "\t\tW: {w}\n\t\tX: {x}\n\t\tY: {y}\n\t\tZ: {z}")?;
            writeln!(self.out, "\tJoint Confidence:")?;
            writeln!(self.out, "\t\t{}", joint.confidence.label())?;
            writeln!(self.out)?;
        }
        Ok(())
    }
}

impl<W: Write> SkeletonSink for ConsoleSink<W> {
    fn render(&mut self, report: &SkeletonReport<'_>) -> Result<(), ReportError> {
        if self.verbose {
            self.write_joints(report)?;
        } else {
            self.write_summary(report)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ReportError> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::body::{JointConfidence, JointId, SkeletonBuilder};
    use crate::pipeline::Counters;

    fn render(verbose: bool) -> String {
        let skeleton = SkeletonBuilder::new()
            .offset(0.0, 0.0, 1500.0)
            .all_confidence(JointConfidence::Medium)
            .position(JointId::Pelvis, 12.5, -3.0, 1500.0)
            .build()
            .sample(4);
        let report = SkeletonReport {
            counters: Counters {
                sequence_number: 2,
                frame_number: 7,
            },
            body_count: 1,
            device_timestamp: Duration::from_millis(66),
            skeleton: &skeleton,
        };

        let mut sink = ConsoleSink::new(Vec::new(), verbose);
        sink.render(&report).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_verbose_dump_lists_25_joints() {
        let text = render(true);
        assert!(text.starts_with("Body Skeleton Joints (seq 2, frame 7, body 4):"));
        assert_eq!(text.matches("Joint Position XYZ [mm]:").count(), 25);
        assert_eq!(text.matches("K4ABT_JOINT_CONFIDENCE_MEDIUM").count(), 25);
        assert!(text.contains("\tPELVIS (0)\n\tJoint Position XYZ [mm]:\n\t\tX: 12.5\n"));
        assert!(text.contains("ANKLE_RIGHT (24)"));
        assert!(!text.contains("FOOT_RIGHT"));
    }

    #[test]
    fn test_summary_line() {
        let text = render(false);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("seq 2 frame 7: body 4 of 1, 25 joints"));
        assert!(text.contains("min confidence K4ABT_JOINT_CONFIDENCE_MEDIUM"));
    }
}
