// tests/runner_outcomes.rs

//! Exit status → outcome mapping and launch failures.

use std::error::Error;

use tokio::sync::mpsc;

use clipfetch::errors::ClipfetchError;
use clipfetch::job::{JobEvent, JobOutcome, JobRunner, JobSpec, JobState};
use clipfetch_test_utils::script::lines_job;
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
async fn exit_zero_reports_succeeded() -> TestResult {
    init_tracing();

    let (tx, mut rx) = mpsc::channel(64);
    let mut runner = JobRunner::new(tx);

    runner.start(lines_job(&["done"], 0))?;

    let outcome = final_outcome(&mut rx).await;
    assert_eq!(outcome, JobOutcome::Succeeded);
    assert_eq!(outcome.state(), JobState::Succeeded);
    Ok(())
}

#[tokio::test]
async fn nonzero_exit_reports_failed_with_output_tail() -> TestResult {
    init_tracing();

    let (tx, mut rx) = mpsc::channel(64);
    let mut runner = JobRunner::new(tx);

    runner.start(lines_job(&["fetching", "ERROR: no formats found"], 3))?;

    match final_outcome(&mut rx).await {
        JobOutcome::Failed { exit_code, detail } => {
            assert_eq!(exit_code, 3);
            assert!(detail.contains("ERROR: no formats found"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn missing_binary_fails_at_start() -> TestResult {
    init_tracing();

    let (tx, _rx) = mpsc::channel(64);
    let mut runner = JobRunner::new(tx);

    let spec = JobSpec::new("/definitely/not/a/real/binary", vec![]);
    let err = runner.start(spec).unwrap_err();
    assert!(matches!(err, ClipfetchError::Launch { .. }));

    // A failed launch doesn't occupy the slot.
    assert!(!runner.is_running());
    runner.start(lines_job(&[], 0))?;
    Ok(())
}
