use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::file_utils::DEFAULT_OUTPUT_SUFFIX;
use crate::subtitle_processor::Adjustment;

/// Application configuration module
/// This module handles loading and validating the adjustment settings.
/// Every field is optional in the JSON file; command line flags override it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Milliseconds added to every timestamp
    pub time_offset_ms: i64,

    /// Delta added to SRT section numbers
    pub section_offset: i64,

    /// Tag inserted before the extension of derived output paths
    pub output_suffix: String,

    /// Log level
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

impl Config {
    /// Load a configuration file; missing fields take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.output_suffix.is_empty() {
            return Err(anyhow!("Output suffix must not be empty"));
        }

        if self.output_suffix.contains(['/', '\\']) {
            return Err(anyhow!(
                "Output suffix must not contain a path separator: {}",
                self.output_suffix
            ));
        }

        Ok(())
    }

    /// Offsets to apply to each file
    pub fn adjustment(&self) -> Adjustment {
        Adjustment::new(self.time_offset_ms, self.section_offset)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            time_offset_ms: 0,
            section_offset: 0,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            log_level: LogLevel::default(),
        }
    }
}
