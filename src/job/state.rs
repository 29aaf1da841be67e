// src/job/state.rs

//! Job data model.

use std::path::PathBuf;

/// Identifier for one supervised process invocation.
///
/// Ids are assigned by the runner and never reused within its lifetime, so a
/// handle from a previous job can always be told apart from the active one.
pub type JobId = u64;

/// Opaque handle returned by `JobRunner::start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobHandle {
    id: JobId,
}

impl JobHandle {
    pub(crate) fn new(id: JobId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> JobId {
        self.id
    }
}

/// What to run: program, arguments, and where.
#[derive(Debug, Clone)]
pub struct JobSpec {
    /// Program path or bare name (PATH lookup happens at spawn).
    pub program: PathBuf,

    /// Argument list, passed through verbatim.
    pub args: Vec<String>,

    /// Working directory for the child; inherits the parent's if `None`.
    pub working_dir: Option<PathBuf>,

    /// Total media duration in seconds, when known.
    ///
    /// Lets the interpreter derive percentages from transcoder `time=`
    /// stamps; download jobs leave this unset.
    pub duration_hint: Option<f64>,
}

impl JobSpec {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
            duration_hint: None,
        }
    }
}

/// Lifecycle state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

/// Terminal outcome of a job, carried by the final event.
///
/// Process failure and user cancellation are outcomes, not errors: they
/// never cross the notification channel as anything but this type.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// Process exited with code 0.
    Succeeded,
    /// Process exited nonzero or was signal-terminated (exit code -1).
    Failed {
        exit_code: i32,
        /// Tail of the process output, for display to the user.
        detail: String,
    },
    /// Terminated by an explicit cancel request.
    Cancelled,
}

impl JobOutcome {
    pub fn success(&self) -> bool {
        matches!(self, JobOutcome::Succeeded)
    }

    /// The terminal [`JobState`] this outcome corresponds to.
    pub fn state(&self) -> JobState {
        match self {
            JobOutcome::Succeeded => JobState::Succeeded,
            JobOutcome::Failed { .. } => JobState::Failed,
            JobOutcome::Cancelled => JobState::Cancelled,
        }
    }
}
