// src/invocation.rs

//! Pure construction of [`JobSpec`]s for the external toolchain.
//!
//! Nothing in here runs anything; these functions turn user-level choices
//! (URL, output placement, quality) into argument lists.

use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;

use crate::job::JobSpec;
use crate::tools::ToolPaths;

/// Output quality / format selection, as exposed on the CLI and in
/// `[download].quality`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
pub enum Quality {
    /// Best available video+audio.
    #[default]
    #[value(name = "best")]
    #[serde(rename = "best")]
    Best,
    #[value(name = "2160p")]
    #[serde(rename = "2160p")]
    P2160,
    #[value(name = "1440p")]
    #[serde(rename = "1440p")]
    P1440,
    #[value(name = "1080p")]
    #[serde(rename = "1080p")]
    P1080,
    #[value(name = "720p")]
    #[serde(rename = "720p")]
    P720,
    #[value(name = "480p")]
    #[serde(rename = "480p")]
    P480,
    #[value(name = "360p")]
    #[serde(rename = "360p")]
    P360,
    /// Audio only, extracted to MP3.
    #[value(name = "audio-mp3")]
    #[serde(rename = "audio-mp3")]
    AudioMp3,
    #[value(name = "audio-wav")]
    #[serde(rename = "audio-wav")]
    AudioWav,
    #[value(name = "audio-m4a")]
    #[serde(rename = "audio-m4a")]
    AudioM4a,
}

impl Quality {
    /// Maximum video height, for the height-capped selections.
    pub fn height_limit(&self) -> Option<u32> {
        match self {
            Quality::P2160 => Some(2160),
            Quality::P1440 => Some(1440),
            Quality::P1080 => Some(1080),
            Quality::P720 => Some(720),
            Quality::P480 => Some(480),
            Quality::P360 => Some(360),
            _ => None,
        }
    }

    /// Audio container for the audio-only selections.
    pub fn audio_format(&self) -> Option<&'static str> {
        match self {
            Quality::AudioMp3 => Some("mp3"),
            Quality::AudioWav => Some("wav"),
            Quality::AudioM4a => Some("m4a"),
            _ => None,
        }
    }

    pub fn is_audio(&self) -> bool {
        self.audio_format().is_some()
    }

    /// Downloader format-selection arguments for this quality.
    fn format_args(&self) -> Vec<String> {
        if let Some(fmt) = self.audio_format() {
            return vec!["-x".into(), "--audio-format".into(), fmt.into()];
        }

        let expr = match self.height_limit() {
            Some(h) => format!("bestvideo[height<={h}]+bestaudio/best[height<={h}]"),
            None => "bestvideo+bestaudio/best".to_string(),
        };
        vec!["-f".into(), expr]
    }
}

/// Build the downloader invocation for one URL.
///
/// `--newline` forces one progress report per line so the interpreter sees
/// each update separately; the URL goes last, after `--`, so it can never be
/// mistaken for a flag.
pub fn download_spec(
    tools: &ToolPaths,
    url: &str,
    output_dir: &Path,
    template: &str,
    quality: Quality,
) -> JobSpec {
    let output = output_dir.join(template);

    let mut args: Vec<String> = vec![
        "--no-warnings".into(),
        "--newline".into(),
        "--ffmpeg-location".into(),
        tools.transcoder.to_string_lossy().into_owned(),
        "--output".into(),
        output.to_string_lossy().into_owned(),
        "--no-keep-video".into(),
    ];
    args.extend(quality.format_args());
    args.push("--".into());
    args.push(url.to_string());

    JobSpec::new(&tools.downloader, args)
}

/// Build the transcoder invocation converting `input` to H.264 + AAC.
///
/// `duration_hint` is the probed media duration; the supervisor hands it to
/// the interpreter so ffmpeg `time=` stamps become percentages.
pub fn transcode_spec(
    tools: &ToolPaths,
    input: &Path,
    output: &Path,
    duration_hint: Option<f64>,
) -> JobSpec {
    let args: Vec<String> = vec![
        "-i".into(),
        input.to_string_lossy().into_owned(),
        "-c:v".into(),
        "libx264".into(),
        "-c:a".into(),
        "aac".into(),
        "-y".into(),
        output.to_string_lossy().into_owned(),
    ];

    let mut spec = JobSpec::new(&tools.transcoder, args);
    spec.duration_hint = duration_hint;
    spec
}
