// src/job/runner.rs

//! The job runner: `start` / `cancel` over exactly one active process.

use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::process::Command;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::errors::{ClipfetchError, Result};
use crate::job::events::JobEvent;
use crate::job::state::{JobHandle, JobId, JobSpec};
use crate::job::supervisor::supervise;

/// Bookkeeping for the currently (or most recently) started job.
///
/// - `cancel` requests termination of the child; consumed on first use so
///   repeated cancels are no-ops.
/// - `task` is the supervision task; `is_finished()` on it is how the runner
///   knows whether the slot is free again.
struct ActiveJob {
    id: JobId,
    cancel: Option<oneshot::Sender<()>>,
    /// Set by the supervisor just before it emits `Finished`, so a caller
    /// that has seen the final event can start the next job right away
    /// without racing the supervision task's teardown.
    done: Arc<AtomicBool>,
    task: tokio::task::JoinHandle<()>,
}

impl ActiveJob {
    fn is_finished(&self) -> bool {
        self.done.load(Ordering::Acquire) || self.task.is_finished()
    }
}

/// Supervises at most one external process at a time.
///
/// The runner owns the single "download slot": a second `start` while a job
/// is running is rejected with [`ClipfetchError::JobAlreadyRunning`], never
/// queued. All notifications go through the `mpsc::Sender<JobEvent>` given
/// at construction; the caller is never blocked on process I/O.
pub struct JobRunner {
    events_tx: mpsc::Sender<JobEvent>,
    next_id: JobId,
    active: Option<ActiveJob>,
}

impl JobRunner {
    /// Create a runner that delivers events to `events_tx`.
    pub fn new(events_tx: mpsc::Sender<JobEvent>) -> Self {
        Self {
            events_tx,
            next_id: 1,
            active: None,
        }
    }

    /// True while the active job's supervision task has not finished.
    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| !active.is_finished())
    }

    /// Start a new job.
    ///
    /// Fails with [`ClipfetchError::JobAlreadyRunning`] if a job is still
    /// running (the first job is left untouched), and with
    /// [`ClipfetchError::Launch`] if the executable cannot be spawned.
    ///
    /// On success the child runs with piped stdout/stderr under a dedicated
    /// supervision task; events start flowing immediately.
    pub fn start(&mut self, spec: JobSpec) -> Result<JobHandle> {
        if self.is_running() {
            return Err(ClipfetchError::JobAlreadyRunning);
        }

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &spec.working_dir {
            cmd.current_dir(dir);
        }

        let child = cmd.spawn().map_err(|source| ClipfetchError::Launch {
            program: spec.program.clone(),
            source,
        })?;

        let id = self.next_id;
        self.next_id += 1;

        info!(
            job = id,
            program = %spec.program.display(),
            "job process spawned"
        );

        let (cancel_tx, cancel_rx) = oneshot::channel();
        let done = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn(supervise(
            id,
            spec,
            child,
            self.events_tx.clone(),
            cancel_rx,
            Arc::clone(&done),
        ));

        self.active = Some(ActiveJob {
            id,
            cancel: Some(cancel_tx),
            done,
            task,
        });

        Ok(JobHandle::new(id))
    }

    /// Request termination of the job behind `handle`.
    ///
    /// Idempotent: cancelling a finished job, a stale handle, or the same
    /// job twice is a silent no-op. Termination is asynchronous; the job
    /// reports `Cancelled` through its `Finished` event once the process
    /// confirms exit (or a termination timeout elapses).
    pub fn cancel(&mut self, handle: &JobHandle) {
        let Some(active) = self.active.as_mut() else {
            debug!(job = handle.id(), "cancel with no job ever started, ignoring");
            return;
        };

        if active.id != handle.id() {
            debug!(
                job = handle.id(),
                active = active.id,
                "cancel for a stale job handle, ignoring"
            );
            return;
        }

        if active.is_finished() {
            debug!(job = handle.id(), "cancel after job finished, ignoring");
            return;
        }

        match active.cancel.take() {
            Some(tx) => {
                info!(job = handle.id(), "cancellation requested");
                // The supervisor may have just exited; a dead receiver is fine.
                let _ = tx.send(());
            }
            None => debug!(job = handle.id(), "cancel already requested, ignoring"),
        }
    }
}
