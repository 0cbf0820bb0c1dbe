/// Process-lifetime persistence outcome counters.
///
/// One owned `CollectorStats` value lives in the collector and is passed by
/// mutable reference into the store, which updates it only at well-defined
/// outcome points: attempt start, success, terminal storage failure, and
/// validation failure. There is no reset short of restarting the process.

use chrono::{DateTime, Utc};
use std::fmt;

/// Mutable counter set owned by the collector.
#[derive(Debug, Default)]
pub struct CollectorStats {
    attempts: u64,
    successes: u64,
    failures: u64,
    validation_failures: u64,
    last_error: Option<String>,
    last_error_time: Option<DateTime<Utc>>,
}

/// Read-only copy of the counters at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub attempts: u64,
    pub successes: u64,
    pub failures: u64,
    pub validation_failures: u64,
    pub last_error: Option<String>,
    pub last_error_time: Option<DateTime<Utc>>,
}

impl CollectorStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one `save` call, before its outcome is known.
    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Counts one successfully persisted record.
    pub fn record_success(&mut self) {
        self.successes += 1;
    }

    /// Counts one terminal storage failure (retries exhausted) and captures
    /// the triggering error for diagnostics.
    pub fn record_failure(&mut self, error: &str) {
        self.failures += 1;
        self.last_error = Some(error.to_string());
        self.last_error_time = Some(Utc::now());
    }

    /// Counts one record rejected by validation (terminal, never retried).
    pub fn record_validation_failure(&mut self, error: &str) {
        self.validation_failures += 1;
        self.last_error = Some(error.to_string());
        self.last_error_time = Some(Utc::now());
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            attempts: self.attempts,
            successes: self.successes,
            failures: self.failures,
            validation_failures: self.validation_failures,
            last_error: self.last_error.clone(),
            last_error_time: self.last_error_time,
        }
    }
}

impl fmt::Display for CollectorStats {
    /// The statistics block printed by the CLI's once/test modes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Storage statistics ===")?;
        writeln!(f, "Attempts:            {}", self.attempts)?;
        writeln!(f, "Successful inserts:  {}", self.successes)?;
        writeln!(f, "Failed inserts:      {}", self.failures)?;
        writeln!(f, "Validation failures: {}", self.validation_failures)?;
        let rate = if self.attempts > 0 {
            self.successes as f64 / self.attempts as f64 * 100.0
        } else {
            0.0
        };
        writeln!(
            f,
            "Success rate:        {}/{} ({:.1}%)",
            self.successes, self.attempts, rate
        )?;
        if let Some(error) = &self.last_error {
            writeln!(f, "Last error:          {}", error)?;
            if let Some(time) = self.last_error_time {
                writeln!(f, "Last error time:     {}", time.to_rfc3339())?;
            }
        }
        write!(f, "==========================")
    }
}
