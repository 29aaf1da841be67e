// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::invocation::Quality;

/// Command-line arguments for `clipfetch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "clipfetch",
    version,
    about = "Download a media URL and convert it locally via yt-dlp and ffmpeg.",
    long_about = None
)]
pub struct CliArgs {
    /// Media URL to download.
    pub url: String,

    /// Path to the config file (TOML).
    ///
    /// Default: `Clipfetch.toml` in the current working directory. A missing
    /// file is fine; built-in defaults apply.
    #[arg(long, value_name = "PATH", default_value = "Clipfetch.toml")]
    pub config: String,

    /// Directory to place the downloaded file in (overrides config).
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output quality / format selection (overrides config).
    #[arg(long, value_enum, value_name = "QUALITY")]
    pub quality: Option<Quality>,

    /// Skip the post-download transcode step.
    #[arg(long)]
    pub skip_transcode: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CLIPFETCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve tools and print the planned commands, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
