// src/job/supervisor.rs

//! Background supervision task for one job process.
//!
//! The supervisor exclusively owns the child process and both its output
//! pipes. It reads stdout and stderr line-by-line, feeds each line through
//! the progress interpreter, and forwards the resulting events over the
//! runner's channel. Because every send happens from this one task, events
//! arrive in emission order and the final `Finished` event always comes
//! last.

use std::collections::VecDeque;
use std::process::ExitStatus;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tokio::process::Child;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::job::events::JobEvent;
use crate::job::state::{JobId, JobOutcome, JobSpec};
use crate::progress::ProgressInterpreter;

/// How long to wait for the process to confirm exit after a kill signal.
const TERMINATION_TIMEOUT: Duration = Duration::from_secs(5);

/// How many raw output lines to retain for the failure `detail` field.
const OUTPUT_TAIL_LINES: usize = 32;

/// Supervise a spawned child to completion (or cancellation).
///
/// Runs as its own tokio task so the caller is never blocked waiting on
/// process I/O.
pub(crate) async fn supervise(
    id: JobId,
    spec: JobSpec,
    mut child: Child,
    events_tx: mpsc::Sender<JobEvent>,
    mut cancel_rx: oneshot::Receiver<()>,
    done: Arc<AtomicBool>,
) {
    let mut out_lines = child.stdout.take().map(|s| BufReader::new(s).lines());
    let mut err_lines = child.stderr.take().map(|s| BufReader::new(s).lines());

    let mut interpreter = match spec.duration_hint {
        Some(total) => ProgressInterpreter::with_duration_hint(total),
        None => ProgressInterpreter::new(),
    };
    let mut tail: VecDeque<String> = VecDeque::new();
    let mut cancelled = false;
    let mut cancel_open = true;

    // Read both pipes until EOF, or until a cancel request arrives. A
    // closed cancel channel just means the runner moved on; the job keeps
    // running to completion.
    while out_lines.is_some() || err_lines.is_some() {
        tokio::select! {
            line = next_line(&mut out_lines), if out_lines.is_some() => match line {
                Some(line) => {
                    debug!(job = id, "stdout: {}", line);
                    handle_line(id, line, &mut interpreter, &mut tail, &events_tx).await;
                }
                None => out_lines = None,
            },
            line = next_line(&mut err_lines), if err_lines.is_some() => match line {
                Some(line) => {
                    debug!(job = id, "stderr: {}", line);
                    handle_line(id, line, &mut interpreter, &mut tail, &events_tx).await;
                }
                None => err_lines = None,
            },
            cancel = &mut cancel_rx, if cancel_open => {
                cancel_open = false;
                if cancel.is_ok() {
                    cancelled = true;
                    break;
                }
                debug!(job = id, "cancel channel closed without cancellation");
            }
        }
    }

    let outcome = if cancelled {
        terminate(id, &mut child).await;
        JobOutcome::Cancelled
    } else {
        wait_or_cancel(id, &mut child, cancel_rx, cancel_open, &tail).await
    };

    info!(job = id, outcome = ?outcome.state(), "job finished");
    // Free the runner's slot before the final event becomes observable.
    done.store(true, Ordering::Release);
    let _ = events_tx.send(JobEvent::Finished { job: id, outcome }).await;
}

/// Interpret one output line and forward the resulting event.
async fn handle_line(
    id: JobId,
    line: String,
    interpreter: &mut ProgressInterpreter,
    tail: &mut VecDeque<String>,
    events_tx: &mpsc::Sender<JobEvent>,
) {
    if tail.len() == OUTPUT_TAIL_LINES {
        tail.pop_front();
    }
    tail.push_back(line.clone());

    let event = interpreter.interpret(&line);
    // A dropped receiver just means nobody is listening any more; keep
    // draining the pipes so the child doesn't block on a full buffer.
    let _ = events_tx.send(JobEvent::Progress { job: id, event }).await;
}

/// Read the next line from an open pipe reader.
///
/// Returns `None` on EOF or read error. Pends forever when the reader is
/// already closed; the select guards keep that branch from being polled.
async fn next_line<R>(lines: &mut Option<Lines<BufReader<R>>>) -> Option<String>
where
    R: AsyncRead + Unpin,
{
    match lines.as_mut() {
        Some(lines) => match lines.next_line().await {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "error reading job output, treating as EOF");
                None
            }
        },
        None => std::future::pending().await,
    }
}

/// Signal the child to terminate and wait for it to confirm exit, bounded
/// by [`TERMINATION_TIMEOUT`].
async fn terminate(id: JobId, child: &mut Child) {
    if let Err(err) = child.start_kill() {
        // Most likely the process already exited on its own.
        debug!(job = id, error = %err, "kill signal not delivered");
    }

    match timeout(TERMINATION_TIMEOUT, child.wait()).await {
        Ok(Ok(status)) => {
            debug!(job = id, ?status, "job process exited after cancellation");
        }
        Ok(Err(err)) => {
            warn!(job = id, error = %err, "error waiting for cancelled job process");
        }
        Err(_) => {
            warn!(
                job = id,
                "job process did not confirm exit within the termination timeout"
            );
        }
    }
}

/// Wait for the child to exit, still honouring a cancel request.
///
/// A process can close both of its output pipes and keep running, so
/// cancellation must stay live after the read loop ends.
async fn wait_or_cancel(
    id: JobId,
    child: &mut Child,
    mut cancel_rx: oneshot::Receiver<()>,
    cancel_open: bool,
    tail: &VecDeque<String>,
) -> JobOutcome {
    if cancel_open {
        tokio::select! {
            status = child.wait() => return exit_outcome(id, status, tail),
            cancel = &mut cancel_rx => {
                if cancel.is_ok() {
                    info!(job = id, "cancellation received after output closed");
                    terminate(id, child).await;
                    return JobOutcome::Cancelled;
                }
                debug!(job = id, "cancel channel closed without cancellation");
            }
        }
    }

    wait_for_exit(id, child, tail).await
}

/// Wait for the child to exit and map its status to an outcome.
async fn wait_for_exit(id: JobId, child: &mut Child, tail: &VecDeque<String>) -> JobOutcome {
    let status = child.wait().await;
    exit_outcome(id, status, tail)
}

/// Map a wait result to a terminal outcome.
fn exit_outcome(
    id: JobId,
    status: std::io::Result<ExitStatus>,
    tail: &VecDeque<String>,
) -> JobOutcome {
    match status {
        Ok(status) => {
            let code = status.code().unwrap_or(-1);
            debug!(
                job = id,
                exit_code = code,
                success = status.success(),
                "job process exited"
            );

            if status.success() {
                JobOutcome::Succeeded
            } else {
                JobOutcome::Failed {
                    exit_code: code,
                    detail: tail.iter().cloned().collect::<Vec<_>>().join("\n"),
                }
            }
        }
        Err(err) => {
            error!(job = id, error = %err, "failed to wait for job process");
            JobOutcome::Failed {
                exit_code: -1,
                detail: err.to_string(),
            }
        }
    }
}
