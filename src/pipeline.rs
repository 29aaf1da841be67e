// src/pipeline.rs

//! Presentation-side driver: one download job, then (conditionally) one
//! transcode job.
//!
//! This is the consumer of the job core. It only talks to the runner
//! through `start` / `cancel` and the event channel, so everything in here
//! would work identically behind a GUI.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::ConfigFile;
use crate::errors::Result;
use crate::invocation::{self, Quality};
use crate::job::{JobEvent, JobHandle, JobOutcome, JobRunner};
use crate::probe;
use crate::progress::ProgressEvent;
use crate::tools::ToolPaths;

/// Event channel depth between the supervisor and this driver.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Effective per-invocation options, after merging config and CLI.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub url: String,
    pub output_dir: PathBuf,
    pub template: String,
    pub quality: Quality,
    pub skip_transcode: bool,
}

impl PipelineOptions {
    /// CLI flags override config values; config fills the rest.
    pub fn from_config_and_cli(cfg: &ConfigFile, args: &CliArgs) -> Self {
        Self {
            url: args.url.clone(),
            output_dir: args
                .output_dir
                .clone()
                .unwrap_or_else(|| cfg.output.dir.clone()),
            template: cfg.output.template.clone(),
            quality: args.quality.unwrap_or(cfg.download.quality),
            skip_transcode: args.skip_transcode || cfg.download.skip_transcode,
        }
    }
}

/// Milestone paths gleaned from downloader status lines.
#[derive(Debug, Default)]
struct JobObservations {
    destination: Option<PathBuf>,
    merged: Option<PathBuf>,
}

impl JobObservations {
    fn record(&mut self, status_line: &str) {
        if let Some(path) = destination_from_status(status_line) {
            info!(file = %path.display(), "downloading to file");
            self.destination = Some(path);
        }
        if let Some(path) = merged_file_from_status(status_line) {
            info!(file = %path.display(), "formats merged into file");
            self.merged = Some(path);
        }
    }

    /// The most authoritative file path seen so far.
    fn final_file(self) -> Option<PathBuf> {
        self.merged.or(self.destination)
    }
}

/// Run the whole download(+transcode) flow for one URL.
pub async fn run_pipeline(tools: &ToolPaths, opts: &PipelineOptions) -> Result<()> {
    let (events_tx, mut events_rx) = mpsc::channel::<JobEvent>(EVENT_CHANNEL_CAPACITY);
    let mut runner = JobRunner::new(events_tx);

    info!(url = %opts.url, quality = ?opts.quality, "starting download");
    let spec = invocation::download_spec(
        tools,
        &opts.url,
        &opts.output_dir,
        &opts.template,
        opts.quality,
    );
    let handle = runner.start(spec)?;

    let (outcome, observations) = drive_job(&mut runner, &handle, &mut events_rx).await;
    match outcome {
        Some(JobOutcome::Succeeded) => {}
        Some(JobOutcome::Cancelled) => {
            info!("download cancelled");
            return Ok(());
        }
        Some(JobOutcome::Failed { exit_code, detail }) => {
            return Err(anyhow!("downloader exited with code {exit_code}:\n{detail}").into());
        }
        None => {
            return Err(anyhow!("event channel closed before the download finished").into());
        }
    }

    if opts.skip_transcode || opts.quality.is_audio() {
        info!("download finished");
        return Ok(());
    }

    let downloaded = match observations.final_file() {
        Some(path) => path,
        None => {
            // The downloader didn't tell us; fall back to the newest file in
            // the output directory, the way the original tool did.
            debug!("no destination reported, scanning output directory");
            newest_file(&opts.output_dir)?
        }
    };

    transcode(tools, &mut runner, &mut events_rx, &downloaded).await
}

/// Transcode `input` to H.264 + AAC MP4, skipping work that is already done.
async fn transcode(
    tools: &ToolPaths,
    runner: &mut JobRunner,
    events_rx: &mut mpsc::Receiver<JobEvent>,
    input: &Path,
) -> Result<()> {
    if input.extension().is_some_and(|ext| ext == "mp4") {
        let video = probe::stream_codec(&tools.prober, input, "v:0").await?;
        let audio = probe::stream_codec(&tools.prober, input, "a:0").await?;
        if video == "h264" && audio == "aac" {
            info!(file = %input.display(), "already H.264 + AAC, nothing to transcode");
            return Ok(());
        }
    }

    let output = transcode_output(input);
    let duration = match probe::media_duration(&tools.prober, input).await {
        Ok(total) => Some(total),
        Err(err) => {
            // Without a duration the transcode still works; we just lose the
            // percentage display.
            warn!(error = %err, "could not probe duration, transcoding without progress");
            None
        }
    };

    info!(
        input = %input.display(),
        output = %output.display(),
        "starting transcode"
    );
    let spec = invocation::transcode_spec(tools, input, &output, duration);
    let handle = runner.start(spec)?;

    let (outcome, _) = drive_job(runner, &handle, events_rx).await;
    match outcome {
        Some(JobOutcome::Succeeded) => {}
        Some(JobOutcome::Cancelled) => {
            info!("transcode cancelled");
            return Ok(());
        }
        Some(JobOutcome::Failed { exit_code, detail }) => {
            return Err(anyhow!("transcoder exited with code {exit_code}:\n{detail}").into());
        }
        None => {
            return Err(anyhow!("event channel closed before the transcode finished").into());
        }
    }

    if output != input {
        fs::remove_file(input)?;
        debug!(file = %input.display(), "removed pre-transcode file");
    }

    info!(file = %output.display(), "transcode finished");
    Ok(())
}

/// Consume events for one job until it finishes, logging progress and
/// collecting milestone paths. Ctrl-C cancels the job; the loop then keeps
/// draining until the `Cancelled` outcome arrives.
async fn drive_job(
    runner: &mut JobRunner,
    handle: &JobHandle,
    events_rx: &mut mpsc::Receiver<JobEvent>,
) -> (Option<JobOutcome>, JobObservations) {
    let mut observations = JobObservations::default();

    // Created once, outside the loop, so an interrupt landing between two
    // polls is not lost. The guard keeps the resolved future from being
    // polled again while the loop drains the remaining events.
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut interrupted = false;

    loop {
        tokio::select! {
            event = events_rx.recv() => match event {
                Some(JobEvent::Progress { event, .. }) => match event {
                    ProgressEvent::Percent(pct) => {
                        info!("progress: {pct:.1}%");
                    }
                    ProgressEvent::Status(line) => {
                        observations.record(&line);
                        info!("{line}");
                    }
                    ProgressEvent::RawLine(line) => debug!("{line}"),
                },
                Some(JobEvent::Finished { outcome, .. }) => {
                    return (Some(outcome), observations);
                }
                None => return (None, observations),
            },
            _ = &mut ctrl_c, if !interrupted => {
                interrupted = true;
                warn!("interrupt received, cancelling job");
                runner.cancel(handle);
            }
        }
    }
}

/// Parse the target path out of a `[download] Destination:` status line.
pub fn destination_from_status(line: &str) -> Option<PathBuf> {
    let rest = line.strip_prefix("[download] Destination:")?;
    let rest = rest.trim();
    (!rest.is_empty()).then(|| PathBuf::from(rest))
}

/// Parse the target path out of a `[Merger] Merging formats into` line.
pub fn merged_file_from_status(line: &str) -> Option<PathBuf> {
    let idx = line.find("[Merger] Merging formats into")?;
    let rest = line[idx + "[Merger] Merging formats into".len()..]
        .trim()
        .trim_matches('"');
    (!rest.is_empty()).then(|| PathBuf::from(rest))
}

/// Output path for transcoding `input`: same stem with an `.mp4` extension,
/// never the input path itself (ffmpeg cannot read and write one file).
pub fn transcode_output(input: &Path) -> PathBuf {
    let candidate = input.with_extension("mp4");
    if candidate != input {
        return candidate;
    }
    input.with_extension("converted.mp4")
}

/// Most recently modified regular file in `dir`.
fn newest_file(dir: &Path) -> Result<PathBuf> {
    let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let meta = entry.metadata()?;
        if !meta.is_file() {
            continue;
        }
        let modified = meta.modified()?;
        if newest.as_ref().is_none_or(|(when, _)| modified > *when) {
            newest = Some((modified, entry.path()));
        }
    }

    newest
        .map(|(_, path)| path)
        .ok_or_else(|| anyhow!("no files found in the output directory").into())
}
