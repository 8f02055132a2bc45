//! Lightweight interval timing statistics.
//!
//! `lapstat` measures the elapsed execution time of repeated code sections
//! (or the cadence of a loop), accumulates per-sub-interval counts and
//! min/avg/max durations, and periodically emits a one-line report. It is a
//! single-threaded inline instrumentation point, not a telemetry pipeline:
//! no aggregation across processes, no export formats beyond the text line.
//!
//! ```
//! use lapstat::{IntervalStatsTracker, TrackerConfig};
//!
//! let mut tracker = IntervalStatsTracker::new(TrackerConfig {
//!     report_interval_secs: 10,
//!     prefix: "decode".to_owned(),
//!     ..TrackerConfig::default()
//! });
//!
//! for _ in 0..3 {
//!     tracker.start();
//!     // ... timed work ...
//!     tracker.stop(None);
//! }
//! tracker.finalize(None);
//! ```
pub mod config;
pub mod error;
pub mod logger;
pub mod sinks;
pub mod tracker;

pub use config::{TimeUnit, TrackerConfig};
pub use error::{TrackerError, TrackerResult};
pub use sinks::{LogSink, ReportSink, WriterSink};
pub use tracker::{IntervalStatsTracker, TrackMode};
