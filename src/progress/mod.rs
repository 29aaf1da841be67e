// src/progress/mod.rs

//! Progress interpretation layer.
//!
//! Turns one line of raw downloader/transcoder output into exactly one
//! [`ProgressEvent`]. Nothing in here touches processes or channels; the job
//! supervision task feeds lines in and forwards the resulting events.

pub mod interpret;

pub use interpret::ProgressInterpreter;

/// Normalized unit of status derived from one line of process output.
///
/// Every line maps to exactly one variant; lines the interpreter does not
/// recognize are passed through as [`ProgressEvent::RawLine`] with the
/// original text unmodified, never dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// A percentage-complete update in `0.0..=100.0`.
    Percent(f64),
    /// A recognized milestone line (destination chosen, formats merged, ...).
    Status(String),
    /// Anything else, unmodified.
    RawLine(String),
}
