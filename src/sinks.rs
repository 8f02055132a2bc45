//! Destinations for rendered report lines.
//!
//! [`stop`] and [`finalize`] accept any [`ReportSink`]; passing none selects
//! [`LogSink`], which routes the report through the diagnostic log.
//!
//! [`stop`]: crate::tracker::IntervalStatsTracker::stop
//! [`finalize`]: crate::tracker::IntervalStatsTracker::finalize

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};

/// Writable text target for a single-line report.
pub trait ReportSink {
    /// Write one rendered report line.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying destination fails to accept the
    /// line. The tracker logs and swallows such errors; they never abort a
    /// measurement.
    fn write_report(&mut self, line: &str) -> TrackerResult<()>;
}

/// Default sink: emits each report as an info-level log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn write_report(&mut self, line: &str) -> TrackerResult<()> {
        tracing::info!("{}", line);
        Ok(())
    }
}

/// A `String` sink holds the most recent report only; previous contents are
/// replaced on every write.
impl ReportSink for String {
    fn write_report(&mut self, line: &str) -> TrackerResult<()> {
        self.clear();
        self.push_str(line);
        Ok(())
    }
}

/// Adapter writing each report as one line to any [`std::io::Write`]
/// destination (a file, stderr, a buffer).
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn write_report(&mut self, line: &str) -> TrackerResult<()> {
        writeln!(self.writer, "{}", line).map_err(|source| TrackerError::Io {
            context: "report write",
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerResult;

    #[test]
    fn string_sink_keeps_latest_report_only() -> TrackerResult<()> {
        let mut sink = String::new();
        sink.write_report("first")?;
        sink.write_report("second")?;
        if sink == "second" {
            Ok(())
        } else {
            Err(TrackerError::TestExpectationValue {
                message: "expected only the latest report",
                value: sink,
            })
        }
    }

    #[test]
    fn writer_sink_appends_lines() -> TrackerResult<()> {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_report("one")?;
        sink.write_report("two")?;
        let bytes = sink.into_inner();
        if bytes == b"one\ntwo\n" {
            Ok(())
        } else {
            Err(TrackerError::TestExpectationValue {
                message: "unexpected writer contents",
                value: String::from_utf8_lossy(&bytes).into_owned(),
            })
        }
    }

    #[test]
    fn log_sink_accepts_lines() -> TrackerResult<()> {
        LogSink.write_report("report line")
    }
}
