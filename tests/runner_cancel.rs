// tests/runner_cancel.rs

//! Cancellation behaviour: prompt termination of a running job, and silent
//! no-ops everywhere else.

use std::error::Error;
use std::time::Duration;

use tokio::sync::mpsc;

use clipfetch::job::{JobEvent, JobOutcome, JobRunner};
use clipfetch_test_utils::script::{lines_job, sh_job, sleep_job};
use clipfetch_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

async fn final_outcome(rx: &mut mpsc::Receiver<JobEvent>) -> JobOutcome {
    loop {
        match with_timeout(rx.recv()).await.expect("event") {
            JobEvent::Finished { outcome, .. } => return outcome,
            JobEvent::Progress { .. } => {}
        }
    }
}

#[tokio::test]
async fn cancel_terminates_a_running_job() -> TestResult {
    init_tracing();

    let (tx, mut rx) = mpsc::channel(64);
    let mut runner = JobRunner::new(tx);

    // Without cancellation this would outlive the test timeout.
    let handle = runner.start(sleep_job(30.0))?;
    tokio::time::sleep(Duration::from_millis(50)).await;
    runner.cancel(&handle);

    assert_eq!(final_outcome(&mut rx).await, JobOutcome::Cancelled);
    Ok(())
}

#[tokio::test]
async fn cancel_immediately_after_start() -> TestResult {
    init_tracing();

    let (tx, mut rx) = mpsc::channel(64);
    let mut runner = JobRunner::new(tx);

    let handle = runner.start(sleep_job(30.0))?;
    runner.cancel(&handle);

    assert_eq!(final_outcome(&mut rx).await, JobOutcome::Cancelled);
    Ok(())
}

#[tokio::test]
async fn cancel_still_works_after_the_child_closes_its_output() -> TestResult {
    init_tracing();

    let (tx, mut rx) = mpsc::channel(64);
    let mut runner = JobRunner::new(tx);

    // The child drops both pipes right away and keeps running; the delay
    // gives the supervisor time to see EOF on both. Without cancellation
    // this would outlive the test timeout.
    let handle = runner.start(sh_job("exec >/dev/null 2>&1; sleep 30"))?;
    tokio::time::sleep(Duration::from_millis(300)).await;
    runner.cancel(&handle);

    assert_eq!(final_outcome(&mut rx).await, JobOutcome::Cancelled);
    Ok(())
}

#[tokio::test]
async fn double_cancel_is_a_noop() -> TestResult {
    init_tracing();

    let (tx, mut rx) = mpsc::channel(64);
    let mut runner = JobRunner::new(tx);

    let handle = runner.start(sleep_job(30.0))?;
    runner.cancel(&handle);
    runner.cancel(&handle);

    // Exactly one terminal event.
    assert_eq!(final_outcome(&mut rx).await, JobOutcome::Cancelled);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(rx.try_recv().is_err());
    Ok(())
}

#[tokio::test]
async fn cancel_after_finish_is_a_noop() -> TestResult {
    init_tracing();

    let (tx, mut rx) = mpsc::channel(64);
    let mut runner = JobRunner::new(tx);

    let handle = runner.start(lines_job(&["hello"], 0))?;
    assert_eq!(final_outcome(&mut rx).await, JobOutcome::Succeeded);

    // No event, no error, no panic.
    runner.cancel(&handle);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(rx.try_recv().is_err());
    Ok(())
}

#[tokio::test]
async fn cancel_with_stale_handle_does_not_touch_the_active_job() -> TestResult {
    init_tracing();

    let (tx, mut rx) = mpsc::channel(64);
    let mut runner = JobRunner::new(tx);

    let first = runner.start(lines_job(&[], 0))?;
    assert_eq!(final_outcome(&mut rx).await, JobOutcome::Succeeded);

    runner.start(lines_job(&["still here"], 0))?;
    runner.cancel(&first);

    // The second job is unaffected by the stale cancel.
    assert_eq!(final_outcome(&mut rx).await, JobOutcome::Succeeded);
    Ok(())
}
