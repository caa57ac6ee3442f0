//! Configuration loading and parsing.
//!
//! Parses `edit-history.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [capture]
//! line_threshold = 5
//! ignore_scratch = true
//! ```
//!
//! Every field is optional. Unknown fields are ignored so newer files still
//! load. A missing file yields defaults; a malformed file logs a warning and
//! also yields defaults.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "edit-history.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Lines an edit must move from the last recorded one to be recorded.
    #[serde(default = "CaptureConfig::default_line_threshold")]
    pub line_threshold: usize,
    /// Skip edit capture in scratch documents.
    #[serde(default = "CaptureConfig::default_ignore_scratch")]
    pub ignore_scratch: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            line_threshold: Self::default_line_threshold(),
            ignore_scratch: Self::default_ignore_scratch(),
        }
    }
}

impl CaptureConfig {
    const fn default_line_threshold() -> usize {
        5
    }
    const fn default_ignore_scratch() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub capture: CaptureConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,      // original file string (optional)
    pub path: Option<PathBuf>,    // where `raw` came from
    pub file: ConfigFile,         // parsed (or default) data
}

impl Config {
    pub fn line_threshold(&self) -> usize {
        self.file.capture.line_threshold
    }

    pub fn ignore_scratch(&self) -> bool {
        self.file.capture.ignore_scratch
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("edit-history").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(
                target: "config",
                path = %path.display(),
                line_threshold = file.capture.line_threshold,
                ignore_scratch = file.capture.ignore_scratch,
                "config_loaded"
            );
            Ok(Config {
                raw: Some(content),
                path: Some(path),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}
