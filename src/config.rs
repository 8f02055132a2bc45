use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Display unit for reported durations. Samples are always measured in
/// milliseconds internally; the unit only affects report scaling and
/// rounding.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Ms,
    Us,
    Ns,
}

impl TimeUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Ms => "ms",
            TimeUnit::Us => "us",
            TimeUnit::Ns => "ns",
        }
    }

    /// Multiplier applied to millisecond values for display.
    #[must_use]
    pub const fn scale(self) -> f64 {
        match self {
            TimeUnit::Ms => 1.0,
            TimeUnit::Us => 1_000.0,
            TimeUnit::Ns => 1_000_000.0,
        }
    }

    /// Fixed-point decimal places used when rendering reports.
    #[must_use]
    pub const fn precision(self) -> usize {
        match self {
            TimeUnit::Ms => 2,
            TimeUnit::Us => 2,
            TimeUnit::Ns => 0,
        }
    }

    /// Resolve a unit by name, falling back to milliseconds with a logged
    /// warning when the name is not recognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!("unrecognized time unit {:?}; falling back to ms", name);
            TimeUnit::Ms
        })
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "ms" => Ok(TimeUnit::Ms),
            "us" => Ok(TimeUnit::Us),
            "ns" => Ok(TimeUnit::Ns),
            _ => Err(TrackerError::UnknownTimeUnit {
                value: s.to_owned(),
            }),
        }
    }
}

/// Tracker configuration. Immutable once a tracker is constructed.
///
/// `report_interval_secs` must be a multiple of `subinterval_secs`; violations
/// are corrected at construction time (see [`IntervalStatsTracker::new`]),
/// never rejected.
///
/// [`IntervalStatsTracker::new`]: crate::tracker::IntervalStatsTracker::new
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Seconds between emitted reports.
    pub report_interval_secs: u64,
    /// Granularity of execution-count sampling within a report period.
    pub subinterval_secs: u64,
    /// Free-text label prepended to each report line.
    pub prefix: String,
    pub time_unit: TimeUnit,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            report_interval_secs: 10,
            subinterval_secs: 1,
            prefix: String::new(),
            time_unit: TimeUnit::Ms,
        }
    }
}

impl TrackerConfig {
    /// Apply the construction-time correction rules: a zero report interval
    /// forces 1s/1s, and a zero, oversized, or non-divisor sub-interval is
    /// forced to 1s. Both degrade with a warning rather than failing.
    pub(crate) fn normalized(mut self) -> Self {
        if self.report_interval_secs == 0 {
            tracing::warn!("report interval must be at least 1 second; using 1 second");
            self.report_interval_secs = 1;
            self.subinterval_secs = 1;
        } else if self.subinterval_secs == 0
            || self.subinterval_secs > self.report_interval_secs
            || self.report_interval_secs % self.subinterval_secs != 0
        {
            tracing::warn!(
                "illegal report interval {}s or count interval {}s; using a 1 second count interval",
                self.report_interval_secs,
                self.subinterval_secs
            );
            self.subinterval_secs = 1;
        }
        self
    }

    /// Number of sub-interval slots per report period. Valid on a normalized
    /// config only.
    pub(crate) fn capacity(&self) -> usize {
        usize::try_from(self.report_interval_secs / self.subinterval_secs).unwrap_or(usize::MAX)
    }
}
