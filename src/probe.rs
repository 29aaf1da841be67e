// src/probe.rs

//! Small ffprobe queries.
//!
//! These run the prober to completion and parse its stdout; they are quick
//! one-shot lookups, not supervised jobs. Probe failures are plain errors to
//! the caller.

use std::path::Path;

use anyhow::anyhow;
use tokio::process::Command;
use tracing::debug;

use crate::errors::{ClipfetchError, Result};

/// Media duration of `file` in seconds.
pub async fn media_duration(prober: &Path, file: &Path) -> Result<f64> {
    let out = run_probe(
        prober,
        &["-v", "error", "-show_entries", "format=duration", "-of", "csv=p=0"],
        file,
    )
    .await?;

    let duration = out
        .trim()
        .parse::<f64>()
        .map_err(|err| anyhow!("unparsable duration '{}': {err}", out.trim()))?;

    debug!(file = %file.display(), duration, "probed media duration");
    Ok(duration)
}

/// Codec name of the first stream matching `selector` (`"v:0"` / `"a:0"`).
pub async fn stream_codec(prober: &Path, file: &Path, selector: &str) -> Result<String> {
    let out = run_probe(
        prober,
        &[
            "-v",
            "error",
            "-select_streams",
            selector,
            "-show_entries",
            "stream=codec_name",
            "-of",
            "csv=p=0",
        ],
        file,
    )
    .await?;

    Ok(out.trim().to_string())
}

async fn run_probe(prober: &Path, args: &[&str], file: &Path) -> Result<String> {
    let output = Command::new(prober)
        .args(args)
        .arg(file)
        .output()
        .await
        .map_err(|source| ClipfetchError::Launch {
            program: prober.to_path_buf(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "prober exited with {}: {}",
            output.status,
            stderr.trim()
        )
        .into());
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
