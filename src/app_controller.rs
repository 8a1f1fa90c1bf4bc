use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::subtitle_processor::{self, RewriteStats, SubtitleFormat};

// @module: Application controller for subtitle adjustment

/// Outcome of adjusting one file
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustReport {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub format: SubtitleFormat,
    pub stats: RewriteStats,
}

/// Main application controller for subtitle adjustment
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config
            .validate()
            .map_err(|e| AppError::Config(format!("{:#}", e)))?;

        Ok(Self { config })
    }

    /// Where the output goes when no explicit path is given
    pub fn default_output_path(&self, input_file: &Path) -> PathBuf {
        FileManager::generate_output_path(input_file, &self.config.output_suffix)
    }

    /// Read `input_file`, shift it and write the result to `output_file`
    /// or to the derived default path
    pub fn run(&self, input_file: &Path, output_file: Option<&Path>) -> Result<AdjustReport, AppError> {
        if !FileManager::file_exists(input_file) {
            return Err(AppError::File(format!("Input file does not exist: {:?}", input_file)));
        }

        let output_file = match output_file {
            Some(path) => path.to_path_buf(),
            None => self.default_output_path(input_file),
        };

        let format = SubtitleFormat::from_path(input_file);
        let adjustment = self.config.adjustment();
        debug!(
            "Adjusting {} file {:?}: {} ms, section offset {}",
            format, input_file, adjustment.time_offset_ms, adjustment.section_offset
        );
        if format == SubtitleFormat::Smi && adjustment.section_offset != 0 {
            debug!("Section offset is ignored for SMI files");
        }

        let lines = FileManager::read_lines(input_file)?;
        let (adjusted, stats) = subtitle_processor::rewrite(format, &lines, &adjustment);
        FileManager::write_lines(&output_file, &adjusted)?;

        info!(
            "Wrote {:?}: {} timestamps shifted, {} sections renumbered ({} repaired)",
            output_file, stats.timestamps_shifted, stats.sections_renumbered, stats.sections_repaired
        );

        Ok(AdjustReport {
            input_file: input_file.to_path_buf(),
            output_file,
            format,
            stats,
        })
    }
}
