// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod invocation;
pub mod job;
pub mod logging;
pub mod pipeline;
pub mod probe;
pub mod progress;
pub mod tools;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::load_or_default;
use crate::errors::Result;
use crate::pipeline::PipelineOptions;
use crate::tools::ToolPaths;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (defaults when no `Clipfetch.toml` exists)
/// - toolchain resolution
/// - the download/transcode pipeline over the job runner
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(&args.config)?;

    let tools = ToolPaths::resolve(&cfg.tools)?;
    let opts = PipelineOptions::from_config_and_cli(&cfg, &args);

    if args.dry_run {
        print_dry_run(&tools, &opts);
        return Ok(());
    }

    pipeline::run_pipeline(&tools, &opts).await
}

/// Simple dry-run output: print resolved tools and the planned download
/// command without running anything.
fn print_dry_run(tools: &ToolPaths, opts: &PipelineOptions) {
    println!("clipfetch dry-run");
    println!("  downloader: {}", tools.downloader.display());
    println!("  transcoder: {}", tools.transcoder.display());
    println!("  prober:     {}", tools.prober.display());
    println!();

    let spec = invocation::download_spec(
        tools,
        &opts.url,
        &opts.output_dir,
        &opts.template,
        opts.quality,
    );
    println!("  download command:");
    println!("    {} {}", spec.program.display(), spec.args.join(" "));
    if opts.skip_transcode || opts.quality.is_audio() {
        println!("  transcode: skipped");
    } else {
        println!("  transcode: to H.264 + AAC unless the file already matches");
    }

    debug!("dry-run complete (no execution)");
}
