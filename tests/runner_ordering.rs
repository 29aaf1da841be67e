// tests/runner_ordering.rs

//! Event ordering: progress events arrive in the order the process emitted
//! the lines, and `Finished` arrives strictly after all of them.

use std::error::Error;

use tokio::sync::mpsc;

use clipfetch::job::{JobEvent, JobOutcome, JobRunner};
use clipfetch::progress::ProgressEvent;
use clipfetch_test_utils::script::{lines_job, stderr_lines_job};
use clipfetch_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn events_arrive_in_line_order_with_finished_last() -> TestResult {
    init_tracing();

    let (tx, mut rx) = mpsc::channel(64);
    let mut runner = JobRunner::new(tx);

    let lines = ["first", "second", "third", "fourth"];
    let handle = runner.start(lines_job(&lines, 0))?;

    let mut seen = Vec::new();
    loop {
        match with_timeout(rx.recv()).await.expect("event") {
            JobEvent::Progress { job, event } => {
                assert_eq!(job, handle.id());
                match event {
                    ProgressEvent::RawLine(line) => seen.push(line),
                    other => panic!("unexpected interpretation: {other:?}"),
                }
            }
            JobEvent::Finished { job, outcome } => {
                assert_eq!(job, handle.id());
                assert_eq!(outcome, JobOutcome::Succeeded);
                break;
            }
        }
    }

    assert_eq!(seen, lines);
    Ok(())
}

#[tokio::test]
async fn percent_lines_are_interpreted_in_order() -> TestResult {
    init_tracing();

    let (tx, mut rx) = mpsc::channel(64);
    let mut runner = JobRunner::new(tx);

    let lines = [
        "[download]  10.0% of 10.00MiB",
        "[download]  55.5% of 10.00MiB",
        "[download] 100.0% of 10.00MiB",
    ];
    runner.start(lines_job(&lines, 0))?;

    let mut percents = Vec::new();
    loop {
        match with_timeout(rx.recv()).await.expect("event") {
            JobEvent::Progress { event, .. } => match event {
                ProgressEvent::Percent(pct) => percents.push(pct),
                other => panic!("unexpected interpretation: {other:?}"),
            },
            JobEvent::Finished { .. } => break,
        }
    }

    assert_eq!(percents, vec![10.0, 55.5, 100.0]);
    Ok(())
}

#[tokio::test]
async fn stderr_lines_are_delivered_too() -> TestResult {
    init_tracing();

    let (tx, mut rx) = mpsc::channel(64);
    let mut runner = JobRunner::new(tx);

    runner.start(stderr_lines_job(&["warning: something"], 0))?;

    let mut seen = Vec::new();
    loop {
        match with_timeout(rx.recv()).await.expect("event") {
            JobEvent::Progress { event, .. } => match event {
                ProgressEvent::RawLine(line) => seen.push(line),
                other => panic!("unexpected interpretation: {other:?}"),
            },
            JobEvent::Finished { .. } => break,
        }
    }

    assert_eq!(seen, vec!["warning: something"]);
    Ok(())
}
