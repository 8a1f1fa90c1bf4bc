/*!
 * # subadjust - Subtitle timing adjustment
 *
 * A Rust library for shifting the timing of SRT and SMI subtitle files.
 *
 * ## Features
 *
 * - Shift every SRT time range by a signed millisecond offset
 * - Shift every SMI `<SYNC Start=...>` marker by the same kind of offset
 * - Offset SRT section numbers and repair gaps so they stay consecutive
 * - Leave every other line byte-for-byte untouched
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timestamp`: Millisecond arithmetic and `HH:MM:SS,mmm` formatting
 * - `subtitle_processor`: Line classification and the SRT/SMI rewriters
 * - `file_utils`: Reading and writing line sequences, output path derivation
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod subtitle_processor;
pub mod timestamp;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{AdjustReport, Controller};
pub use errors::{AppError, SubtitleError};
pub use subtitle_processor::{Adjustment, SubtitleFormat, rewrite_smi, rewrite_srt};
pub use timestamp::Timestamp;
