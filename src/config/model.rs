// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::invocation::Quality;

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [tools]
/// downloader = "/opt/yt-dlp/yt-dlp"
/// assets_dir = "assets"
///
/// [output]
/// dir = "~/Videos"
/// template = "%(title)s.%(ext)s"
///
/// [download]
/// quality = "1080p"
/// skip_transcode = false
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Tool locations from `[tools]`.
    #[serde(default)]
    pub tools: ToolsSection,

    /// Output placement from `[output]`.
    #[serde(default)]
    pub output: OutputSection,

    /// Download defaults from `[download]`.
    #[serde(default)]
    pub download: DownloadSection,
}

/// Validated configuration used by the rest of the application.
///
/// Construct via `ConfigFile::try_from(raw)`; see `validate.rs`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub tools: ToolsSection,
    pub output: OutputSection,
    pub download: DownloadSection,
}

impl ConfigFile {
    /// Build a `ConfigFile` without re-running validation.
    ///
    /// Only `validate.rs` (and tests) should call this.
    pub fn new_unchecked(
        tools: ToolsSection,
        output: OutputSection,
        download: DownloadSection,
    ) -> Self {
        Self {
            tools,
            output,
            download,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(
            ToolsSection::default(),
            OutputSection::default(),
            DownloadSection::default(),
        )
    }
}

/// `[tools]` section.
///
/// Resolution order per tool: explicit path here, then `assets_dir` with the
/// platform-specific binary name, then the bare program name (PATH lookup at
/// spawn time). See `tools.rs`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ToolsSection {
    /// Explicit path to the downloader binary (yt-dlp).
    #[serde(default)]
    pub downloader: Option<PathBuf>,

    /// Explicit path to the transcoder binary (ffmpeg).
    #[serde(default)]
    pub transcoder: Option<PathBuf>,

    /// Explicit path to the prober binary (ffprobe).
    #[serde(default)]
    pub prober: Option<PathBuf>,

    /// Directory holding bundled binaries, named per platform.
    #[serde(default)]
    pub assets_dir: Option<PathBuf>,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    /// Directory downloaded files are written into.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// yt-dlp output template for the downloaded file name.
    #[serde(default = "default_output_template")]
    pub template: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_template() -> String {
    "%(title)s.%(ext)s".to_string()
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            template: default_output_template(),
        }
    }
}

/// `[download]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DownloadSection {
    /// Default quality selection; CLI `--quality` overrides it.
    #[serde(default)]
    pub quality: Quality,

    /// If true, never run the transcode step after downloading.
    #[serde(default)]
    pub skip_transcode: bool,
}
