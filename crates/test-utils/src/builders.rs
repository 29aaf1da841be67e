#![allow(dead_code)]

use std::path::PathBuf;

use clipfetch::config::{ConfigFile, DownloadSection, OutputSection, RawConfigFile, ToolsSection};
use clipfetch::invocation::Quality;
use clipfetch::job::JobSpec;

/// Builder for `JobSpec` to simplify test setup.
pub struct JobSpecBuilder {
    spec: JobSpec,
}

impl JobSpecBuilder {
    pub fn new(program: &str) -> Self {
        Self {
            spec: JobSpec::new(program, vec![]),
        }
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.spec.args.push(arg.to_string());
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.spec.working_dir = Some(dir.into());
        self
    }

    pub fn duration_hint(mut self, secs: f64) -> Self {
        self.spec.duration_hint = Some(secs);
        self
    }

    pub fn build(self) -> JobSpec {
        self.spec
    }
}

/// Builder for `ConfigFile`.
pub struct ConfigFileBuilder {
    raw: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawConfigFile {
                tools: ToolsSection::default(),
                output: OutputSection::default(),
                download: DownloadSection::default(),
            },
        }
    }

    pub fn with_downloader(mut self, path: impl Into<PathBuf>) -> Self {
        self.raw.tools.downloader = Some(path.into());
        self
    }

    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.raw.tools.assets_dir = Some(dir.into());
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.raw.output.dir = dir.into();
        self
    }

    pub fn with_template(mut self, template: &str) -> Self {
        self.raw.output.template = template.to_string();
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.raw.download.quality = quality;
        self
    }

    pub fn with_skip_transcode(mut self, val: bool) -> Self {
        self.raw.download.skip_transcode = val;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
