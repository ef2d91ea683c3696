//! Idle-timeout force flush
//!
//! A strategy waiting for a delimiter that never comes would hold the last
//! record of a quiet stream forever. The flusher wraps a strategy and, once
//! the buffered data has stopped changing for the configured period, emits
//! it as a record.

use logsplit_core::{Split, SplitFunc, Tokenize, Trim};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Default idle period before a forced flush
pub const DEFAULT_FLUSH_PERIOD: Duration = Duration::from_millis(500);

/// Force-flush configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlusherConfig {
    /// Idle period in milliseconds; zero disables forced flushing
    #[serde(rename = "force_flush_period_ms", with = "millis")]
    pub period: Duration,
}

impl Default for FlusherConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_FLUSH_PERIOD,
        }
    }
}

impl FlusherConfig {
    /// Create a config with the given period
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Wrap a strategy with forced flushing
    pub fn wrap<S: SplitFunc>(&self, inner: S, trim: Trim) -> Flusher<S> {
        Flusher::new(inner, self.period, trim)
    }
}

/// A strategy augmented with time-based forced flushing
///
/// Holds per-stream timer state, so each stream needs its own flusher.
#[derive(Debug, Clone)]
pub struct Flusher<S> {
    inner: S,
    period: Duration,
    trim: Trim,
    last_data_change: Instant,
    previous_data_len: usize,
}

impl<S: SplitFunc> Flusher<S> {
    /// Wrap `inner`; forced flushes are trimmed with `trim`
    pub fn new(inner: S, period: Duration, trim: Trim) -> Self {
        Self {
            inner,
            period,
            trim,
            last_data_change: Instant::now(),
            previous_data_len: 0,
        }
    }

    /// The wrapped strategy
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Run one tokenizer call at time `now`
    ///
    /// A record from the wrapped strategy resets the idle timer, as does a
    /// change in buffered length. When the buffer has been non-empty and
    /// unchanged for longer than the period, the whole buffer is emitted.
    pub fn split_at<'a>(&mut self, data: &'a [u8], at_eof: bool, now: Instant) -> Split<'a> {
        let split = self.inner.split(data, at_eof);
        if !split.is_pending() {
            self.flushed(now);
            return split;
        }

        if self.should_flush(now) {
            log::debug!(
                "forcing flush of {} idle bytes after {:?}",
                data.len(),
                self.period
            );
            self.flushed(now);
            return Split::token(data.len(), self.trim.apply(data));
        }

        self.did_not_flush(data.len(), now);
        Split::Pending
    }

    fn flushed(&mut self, now: Instant) {
        self.last_data_change = now;
        self.previous_data_len = 0;
    }

    fn did_not_flush(&mut self, data_len: usize, now: Instant) {
        if data_len != self.previous_data_len {
            self.last_data_change = now;
            self.previous_data_len = data_len;
        }
    }

    fn should_flush(&self, now: Instant) -> bool {
        !self.period.is_zero()
            && self.previous_data_len > 0
            && now.saturating_duration_since(self.last_data_change) > self.period
    }
}

impl<S: SplitFunc> Tokenize for Flusher<S> {
    fn tokenize<'a>(&mut self, data: &'a [u8], at_eof: bool) -> Split<'a> {
        self.split_at(data, at_eof, Instant::now())
    }
}

/// Serialize a `Duration` as whole milliseconds
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
