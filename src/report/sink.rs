use std::time::Duration;

use crate::body::SkeletonSample;
use crate::error::ReportError;
use crate::pipeline::Counters;

/// One collected skeleton together with the cycle it came from.
#[derive(Debug, Clone, Copy)]
pub struct SkeletonReport<'a> {
    pub counters: Counters,
    /// Bodies detected in the frame the skeleton was read from
    pub body_count: usize,
    pub device_timestamp: Duration,
    pub skeleton: &'a SkeletonSample,
}

/// Destination for collected skeletons.
pub trait SkeletonSink {
    fn render(&mut self, report: &SkeletonReport<'_>) -> Result<(), ReportError>;

    /// Push buffered output to its destination.
    fn flush(&mut self) -> Result<(), ReportError> {
        Ok(())
    }
}

/// Fan a report out to several sinks in order.
impl SkeletonSink for Vec<Box<dyn SkeletonSink>> {
    fn render(&mut self, report: &SkeletonReport<'_>) -> Result<(), ReportError> {
        for sink in self.iter_mut() {
            sink.render(report)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ReportError> {
        for sink in self.iter_mut() {
            sink.flush()?;
        }
        Ok(())
    }
}
