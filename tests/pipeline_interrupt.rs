// tests/pipeline_interrupt.rs

//! An interrupt (Ctrl-C) cancels the active job and the pipeline exits
//! cleanly.
//!
//! Kept alone in this file: the test sends SIGINT to the whole test
//! process and relies on the pipeline's signal handler being the only
//! listener in the binary.

#![cfg(unix)]

use std::error::Error;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::time::Duration;

use clipfetch::invocation::Quality;
use clipfetch::pipeline::{PipelineOptions, run_pipeline};
use clipfetch::tools::ToolPaths;
use clipfetch_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn interrupt_cancels_the_running_download() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let downloader = dir.path().join("fake-downloader");
    fs::write(&downloader, "#!/bin/sh\nsleep 30\n")?;
    fs::set_permissions(&downloader, fs::Permissions::from_mode(0o755))?;

    let tools = ToolPaths {
        downloader,
        transcoder: "ffmpeg".into(),
        prober: "ffprobe".into(),
    };
    let opts = PipelineOptions {
        url: "https://example.com/v".to_string(),
        output_dir: dir.path().to_path_buf(),
        template: "%(title)s.%(ext)s".to_string(),
        quality: Quality::Best,
        skip_transcode: true,
    };

    let pid = std::process::id().to_string();
    tokio::spawn(async move {
        // The pipeline installs its signal handler as soon as it starts
        // consuming events; by now it has been listening for a while.
        tokio::time::sleep(Duration::from_millis(500)).await;
        let _ = tokio::process::Command::new("kill")
            .args(["-INT", &pid])
            .status()
            .await;
    });

    // Without the interrupt the fake downloader would sleep out the
    // timeout; a cancelled download is a clean (Ok) result.
    with_timeout(run_pipeline(&tools, &opts)).await?;
    Ok(())
}
