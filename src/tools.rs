// src/tools.rs

//! Toolchain location.
//!
//! The job runner only ever receives plain executable paths; this module is
//! where those paths come from. Resolution order per tool:
//!
//! 1. explicit path from `[tools]` in the config (must exist),
//! 2. `assets_dir` joined with the platform-specific bundled binary name
//!    (must exist),
//! 3. the bare program name, leaving PATH lookup to the OS at spawn time.
//!
//! Downloading or updating the binaries themselves is not this crate's job.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ToolsSection;
use crate::errors::{ClipfetchError, Result};

/// Resolved executable paths for the external toolchain.
#[derive(Debug, Clone)]
pub struct ToolPaths {
    /// yt-dlp (or compatible) downloader.
    pub downloader: PathBuf,
    /// ffmpeg transcoder.
    pub transcoder: PathBuf,
    /// ffprobe prober.
    pub prober: PathBuf,
}

impl ToolPaths {
    /// Resolve all three tools from the `[tools]` config section.
    ///
    /// Fails with [`ClipfetchError::ToolNotFound`] when an explicitly
    /// configured or bundled binary is missing; a bare PATH name is accepted
    /// as-is and surfaces as a `Launch` error at spawn time instead.
    pub fn resolve(cfg: &ToolsSection) -> Result<Self> {
        let resolved = Self {
            downloader: resolve_tool(
                cfg.downloader.as_deref(),
                cfg.assets_dir.as_deref(),
                downloader_binary(),
                "yt-dlp",
            )?,
            transcoder: resolve_tool(
                cfg.transcoder.as_deref(),
                cfg.assets_dir.as_deref(),
                transcoder_binary(),
                "ffmpeg",
            )?,
            prober: resolve_tool(
                cfg.prober.as_deref(),
                cfg.assets_dir.as_deref(),
                prober_binary(),
                "ffprobe",
            )?,
        };

        debug!(
            downloader = %resolved.downloader.display(),
            transcoder = %resolved.transcoder.display(),
            prober = %resolved.prober.display(),
            "toolchain resolved"
        );

        Ok(resolved)
    }
}

fn resolve_tool(
    explicit: Option<&Path>,
    assets_dir: Option<&Path>,
    bundled_name: &str,
    bare_name: &str,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(ClipfetchError::ToolNotFound(path.to_path_buf()));
    }

    if let Some(dir) = assets_dir {
        let candidate = dir.join(bundled_name);
        if candidate.exists() {
            return Ok(candidate);
        }
        return Err(ClipfetchError::ToolNotFound(candidate));
    }

    Ok(PathBuf::from(bare_name))
}

/// Bundled downloader binary name for the current platform.
fn downloader_binary() -> &'static str {
    if cfg!(windows) {
        "yt-dlp.exe"
    } else if cfg!(target_os = "macos") {
        "yt-dlp_macos"
    } else {
        "yt-dlp"
    }
}

fn transcoder_binary() -> &'static str {
    if cfg!(windows) { "ffmpeg.exe" } else { "ffmpeg" }
}

fn prober_binary() -> &'static str {
    if cfg!(windows) { "ffprobe.exe" } else { "ffprobe" }
}
