// src/job/events.rs

//! Notification events flowing from the job supervisor to the presentation
//! layer.

use crate::job::state::{JobId, JobOutcome};
use crate::progress::ProgressEvent;

/// Events sent to the presentation layer over the runner's mpsc channel.
///
/// Ordering guarantees (all sends happen from the single supervision task):
/// - `Progress` events for a job arrive in the order the process emitted the
///   underlying lines;
/// - exactly one `Finished` arrives per job, strictly after every
///   `Progress` event for that job.
#[derive(Debug, Clone)]
pub enum JobEvent {
    /// One output line was interpreted.
    Progress { job: JobId, event: ProgressEvent },

    /// The job reached a terminal state.
    Finished { job: JobId, outcome: JobOutcome },
}

impl JobEvent {
    /// The job this event belongs to.
    pub fn job(&self) -> JobId {
        match self {
            JobEvent::Progress { job, .. } | JobEvent::Finished { job, .. } => *job,
        }
    }
}
