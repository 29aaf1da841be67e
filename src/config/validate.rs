// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile, ToolsSection};
use crate::errors::{ClipfetchError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ClipfetchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.tools, raw.output, raw.download))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_output(cfg)?;
    validate_tools(&cfg.tools)?;
    Ok(())
}

fn validate_output(cfg: &RawConfigFile) -> Result<()> {
    if cfg.output.template.trim().is_empty() {
        return Err(ClipfetchError::ConfigError(
            "[output].template must not be empty".to_string(),
        ));
    }

    if cfg.output.dir.as_os_str().is_empty() {
        return Err(ClipfetchError::ConfigError(
            "[output].dir must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_tools(tools: &ToolsSection) -> Result<()> {
    for (field, path) in [
        ("downloader", &tools.downloader),
        ("transcoder", &tools.transcoder),
        ("prober", &tools.prober),
        ("assets_dir", &tools.assets_dir),
    ] {
        if let Some(p) = path {
            if p.as_os_str().is_empty() {
                return Err(ClipfetchError::ConfigError(format!(
                    "[tools].{field} must not be an empty path"
                )));
            }
        }
    }

    Ok(())
}
