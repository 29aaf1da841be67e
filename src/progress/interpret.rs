// src/progress/interpret.rs

//! Line classifier for external tool output.
//!
//! One [`ProgressInterpreter`] instance serves one job; the only state it
//! keeps across lines is the last reported percentage (for the
//! monotonic-progress policy) and an optional total-duration hint used to
//! derive percentages from ffmpeg `time=` stamps.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::progress::ProgressEvent;

/// Percentage token like `45.3%` or `57%`.
static PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,3}(?:\.\d+)?)%").expect("percent regex is valid")
});

/// ffmpeg elapsed-time stamp like `time=00:01:23.45`.
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"time=(\d+):(\d{2}):(\d{2}(?:\.\d+)?)").expect("time regex is valid")
});

/// Milestone phrases emitted by yt-dlp / ffmpeg that are worth surfacing as
/// status rather than raw log noise.
const STATUS_PHRASES: &[&str] = &[
    "has already been downloaded",
    "[download] Destination:",
    "[Merger] Merging formats into",
    "Merging formats",
    "[ExtractAudio]",
    "Deleting original file",
    "Conversion successful",
];

/// Classifies one line of tool output into a [`ProgressEvent`].
///
/// No line causes an error: malformed or out-of-range numeric tokens, and
/// percentages that would move backwards, all degrade to
/// [`ProgressEvent::RawLine`].
#[derive(Debug, Default)]
pub struct ProgressInterpreter {
    last_percent: Option<f64>,
    duration_hint: Option<f64>,
}

impl ProgressInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpreter that also maps `time=` stamps to percentages against the
    /// given total media duration in seconds.
    pub fn with_duration_hint(total_secs: f64) -> Self {
        Self {
            last_percent: None,
            duration_hint: (total_secs > 0.0).then_some(total_secs),
        }
    }

    /// The last percentage this interpreter reported, if any.
    pub fn last_percent(&self) -> Option<f64> {
        self.last_percent
    }

    /// Classify a single line into exactly one event.
    pub fn interpret(&mut self, line: &str) -> ProgressEvent {
        if let Some(pct) = self.extract_percent(line) {
            return self.percent_event(pct, line);
        }

        if is_status_line(line) {
            return ProgressEvent::Status(line.to_string());
        }

        ProgressEvent::RawLine(line.to_string())
    }

    /// Pull a candidate percentage out of the line, either from an explicit
    /// `NN.N%` token or from a `time=` stamp when a duration hint is set.
    fn extract_percent(&self, line: &str) -> Option<f64> {
        if let Some(caps) = PERCENT_RE.captures(line) {
            // The regex only matches digits, but a token like `999%` still
            // parses; range-check below filters it out.
            return caps[1].parse::<f64>().ok();
        }

        let total = self.duration_hint?;
        let caps = TIME_RE.captures(line)?;
        let hours: f64 = caps[1].parse().ok()?;
        let minutes: f64 = caps[2].parse().ok()?;
        let seconds: f64 = caps[3].parse().ok()?;
        let elapsed = hours * 3600.0 + minutes * 60.0 + seconds;

        Some((elapsed / total * 100.0).min(100.0))
    }

    /// Apply range and monotonicity checks to a candidate percentage.
    ///
    /// External tools occasionally reprint retry headers with earlier
    /// percentages; a value strictly lower than the last reported one is
    /// noise and degrades to a raw line.
    fn percent_event(&mut self, pct: f64, line: &str) -> ProgressEvent {
        if !(0.0..=100.0).contains(&pct) {
            trace!(pct, "percentage out of range, passing line through");
            return ProgressEvent::RawLine(line.to_string());
        }

        if let Some(last) = self.last_percent {
            if pct < last {
                trace!(pct, last, "non-monotonic percentage, passing line through");
                return ProgressEvent::RawLine(line.to_string());
            }
        }

        self.last_percent = Some(pct);
        ProgressEvent::Percent(pct)
    }
}

fn is_status_line(line: &str) -> bool {
    STATUS_PHRASES.iter().any(|phrase| line.contains(phrase))
}
