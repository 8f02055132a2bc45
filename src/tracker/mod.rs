//! The interval statistics state machine.
//!
//! An [`IntervalStatsTracker`] measures one in-flight sample at a time,
//! accumulates per-sub-interval execution counts, and rolls them up into a
//! one-line report once a full report interval of sub-intervals has
//! completed.

use quanta::{Clock, Instant};

use crate::config::TrackerConfig;
use crate::sinks::{LogSink, ReportSink};


const ONE_SEC_IN_MS: f64 = 1000.0;
const REPORT_WIDTH: usize = 5;

/// How samples are delimited.
///
/// A tracker starts in `Performance` and switches permanently to `Loop` the
/// first time [`IntervalStatsTracker::stop`] is called without a preceding
/// [`IntervalStatsTracker::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackMode {
    /// Measures the duration of a bounded code section via explicit
    /// start/stop pairs.
    Performance,
    /// Measures the interval between successive stop calls, e.g. the cadence
    /// of a loop or a frame rate.
    Loop,
}

/// Accumulates execution-time samples and periodically emits a report line of
/// per-sub-interval counts plus min/avg/max durations.
///
/// Single-threaded by design: the instance belongs to the thread doing the
/// timed work and takes no locks. Misuse never panics or returns errors; it
/// degrades to a logged warning and a best-effort fallback.
///
/// There is no flush on drop. Call [`IntervalStatsTracker::finalize`] to
/// obtain a trailing partial report before the tracker goes away.
#[derive(Debug)]
pub struct IntervalStatsTracker {
    config: TrackerConfig,
    /// Sub-interval slots per report period, `report_interval / subinterval`.
    capacity: usize,
    clock: Clock,
    mode: TrackMode,
    /// Begin of the in-flight sample. `None` until the first start (or the
    /// loop-mode seeding stop).
    measurement_start: Option<Instant>,
    /// Anchor for sub-interval elapsed-time accounting.
    subinterval_start: Option<Instant>,
    /// Samples seen in the current, not yet committed sub-interval.
    current_count: u64,
    /// Completed sub-interval counts for the current report period.
    completed_counts: Vec<u64>,
    /// Sum of `completed_counts` for the current report period.
    period_count_total: u64,
    /// Sum of sample durations (ms) for the current report period.
    period_duration_ms: f64,
    min_duration_ms: f64,
    max_duration_ms: f64,
    /// Samples across the tracker's whole lifetime; survives period resets.
    lifetime_count: u64,
}

fn millis_between(earlier: Instant, later: Instant) -> f64 {
    later.duration_since(earlier).as_secs_f64() * ONE_SEC_IN_MS
}

impl IntervalStatsTracker {
    /// Build a tracker over the system monotonic clock.
    ///
    /// The configuration is corrected rather than validated: a zero report
    /// interval becomes 1s/1s and a sub-interval that is zero, larger than
    /// the report interval, or not a divisor of it becomes 1s, each with a
    /// logged warning.
    #[must_use]
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_clock(config, Clock::new())
    }

    /// Same as [`IntervalStatsTracker::new`] with an injected clock. Tests
    /// pass `quanta::Clock::mock()` to drive time deterministically.
    #[must_use]
    pub fn with_clock(config: TrackerConfig, clock: Clock) -> Self {
        let config = config.normalized();
        let capacity = config.capacity();
        tracing::info!(
            "execution statistics will report every {}s, counting in {}s sub-intervals; unit {} (x{})",
            config.report_interval_secs,
            config.subinterval_secs,
            config.time_unit.as_str(),
            config.time_unit.scale()
        );
        Self {
            config,
            capacity,
            clock,
            mode: TrackMode::Performance,
            measurement_start: None,
            subinterval_start: None,
            current_count: 0,
            completed_counts: Vec::with_capacity(capacity),
            period_count_total: 0,
            period_duration_ms: 0.0,
            min_duration_ms: f64::MAX,
            max_duration_ms: 0.0,
            lifetime_count: 0,
        }
    }

    /// Begin timing one sample. Performance mode only.
    ///
    /// Calling this after the tracker has switched to loop mode is a usage
    /// error: it is logged and ignored, leaving all state untouched.
    pub fn start(&mut self) {
        match self.mode {
            TrackMode::Performance => {
                let now = self.clock.now();
                self.measurement_start = Some(now);
                if self.subinterval_start.is_none() {
                    tracing::info!(
                        "performance mode started: measuring a bounded code section for {:?}",
                        self.config.prefix
                    );
                    self.subinterval_start = Some(now);
                }
            }
            TrackMode::Loop => {
                tracing::error!("start() called while in loop mode; call ignored");
            }
        }
    }

    /// End timing one sample and update statistics. Returns whether a report
    /// was produced by this call.
    ///
    /// The first call ever made without a preceding [`start`] switches the
    /// tracker permanently to loop mode, seeds the timestamps, and records
    /// nothing (there is no valid duration yet). In loop mode every
    /// subsequent call measures the gap since the previous one.
    ///
    /// When the report period completes, the report is written to
    /// `out_report`, or to the diagnostic log if none is supplied.
    ///
    /// [`start`]: IntervalStatsTracker::start
    pub fn stop(&mut self, out_report: Option<&mut dyn ReportSink>) -> bool {
        let end = self.clock.now();
        let Some(start) = self.measurement_start else {
            self.mode = TrackMode::Loop;
            tracing::info!(
                "loop mode started: measuring the interval between successive stop() calls for {:?}",
                self.config.prefix
            );
            self.measurement_start = Some(end);
            self.subinterval_start = Some(end);
            return false;
        };

        let sample_ms = millis_between(start, end);
        let anchor = match self.subinterval_start {
            Some(anchor) => anchor,
            None => {
                self.subinterval_start = Some(end);
                end
            }
        };
        let subinterval_elapsed_ms = millis_between(anchor, end);

        if self.mode == TrackMode::Loop {
            // This end is the start of the next gap.
            self.measurement_start = Some(end);
        }

        if sample_ms < self.min_duration_ms {
            self.min_duration_ms = sample_ms;
        }
        if sample_ms > self.max_duration_ms {
            self.max_duration_ms = sample_ms;
        }
        self.current_count += 1;
        self.period_duration_ms += sample_ms;

        let mut produced = false;
        if subinterval_elapsed_ms >= self.config.subinterval_secs as f64 * ONE_SEC_IN_MS {
            self.completed_counts.push(self.current_count);
            self.period_count_total += self.current_count;
            self.current_count = 0;
            if self.completed_counts.len() >= self.capacity {
                produced = true;
                match out_report {
                    Some(sink) => {
                        self.render_report(sink);
                    }
                    None => {
                        let mut sink = LogSink;
                        self.render_report(&mut sink);
                    }
                }
            }
            self.subinterval_start = Some(end);
        }
        produced
    }

    /// Flush any uncommitted sub-interval samples and emit a final, possibly
    /// partial report. Returns whether a report was produced.
    ///
    /// Safe to call repeatedly; with nothing new accumulated it logs
    /// "nothing to report" and returns false.
    pub fn finalize(&mut self, out_report: Option<&mut dyn ReportSink>) -> bool {
        if self.current_count != 0 {
            self.completed_counts.push(self.current_count);
            self.period_count_total += self.current_count;
            self.current_count = 0;
        }
        let produced = match out_report {
            Some(sink) => self.render_report(sink),
            None => {
                let mut sink = LogSink;
                self.render_report(&mut sink)
            }
        };
        if produced {
            tracing::info!("total execution count {}", self.lifetime_count);
        }
        produced
    }

    #[must_use]
    pub fn mode(&self) -> TrackMode {
        self.mode
    }

    /// Samples recorded across the tracker's lifetime, folded in at each
    /// period reset. Durations are intentionally not tracked lifetime-wide.
    #[must_use]
    pub fn lifetime_count(&self) -> u64 {
        self.lifetime_count
    }

    /// Effective configuration after construction-time corrections.
    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Render the period's statistics as a single line and reset the period
    /// accumulators. False when no sub-interval has completed yet.
    fn render_report(&mut self, sink: &mut dyn ReportSink) -> bool {
        if self.completed_counts.is_empty() {
            tracing::info!("nothing to report");
            return false;
        }

        let unit = self.config.time_unit;
        let scale = unit.scale();
        let precision = unit.precision();
        // completed_counts is non-empty, so at least one sample was counted.
        let avg_ms = self.period_duration_ms / self.period_count_total as f64;

        let mut line = String::new();
        line.push_str(&self.config.prefix);
        line.push_str(" Exec count ");
        for count in &self.completed_counts {
            line.push_str(&format!("[{}]", count));
        }
        line.push_str(&format!(
            "({}) Exec time({})",
            self.period_count_total,
            unit.as_str()
        ));
        line.push_str(&format!(
            " ({:>width$.prec$},{:>width$.prec$},{:>width$.prec$})",
            self.min_duration_ms * scale,
            avg_ms * scale,
            self.max_duration_ms * scale,
            width = REPORT_WIDTH,
            prec = precision,
        ));

        if let Err(err) = sink.write_report(&line) {
            tracing::warn!("failed to write report: {}", err);
        }
        self.reset_period();
        true
    }

    /// Reset period accumulators, folding the period's sample count into the
    /// lifetime total. The in-flight sub-interval counter is left alone.
    fn reset_period(&mut self) {
        self.lifetime_count += self.period_count_total;
        self.period_count_total = 0;
        self.period_duration_ms = 0.0;
        self.min_duration_ms = f64::MAX;
        self.max_duration_ms = 0.0;
        self.completed_counts.clear();
    }
}
