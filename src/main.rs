use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use subadjust::app_config::{Config, LogLevel};
use subadjust::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for subadjust
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct AdjustArgs {
    /// Path to initial subtitle file
    #[arg(short, long = "input-file", visible_alias = "input_file", value_name = "INPUT_FILE")]
    input_file: Option<PathBuf>,

    /// Desired name of output subtitle file [default: <input>.adjust.<ext>]
    #[arg(short, long = "output-file", visible_alias = "output_file", value_name = "OUTPUT_FILE")]
    output_file: Option<PathBuf>,

    /// Synchronization time adjustment, in milliseconds [default: 0]
    #[arg(short = 't', long, allow_negative_numbers = true)]
    millis: Option<i64>,

    /// Section number adjustment, SRT only [default: 0]
    #[arg(short, long, allow_negative_numbers = true)]
    section: Option<i64>,

    /// JSON configuration file with default offsets
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subadjust - Subtitle timing adjustment
///
/// Shifts every timestamp of an SRT or SMI file by a fixed offset and
/// renumbers SRT sections.
#[derive(Parser, Debug)]
#[command(name = "subadjust")]
#[command(version)]
#[command(about = "Subtitle timing adjustment")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "subadjust shifts SRT and SMI subtitle timings and renumbers SRT sections.

EXAMPLES:
    subadjust -i movie.srt -t 1500              # Delay subtitles by 1.5 seconds
    subadjust -i movie.srt -t -500 -s 10        # Advance 0.5 s, sections start 10 higher
    subadjust -i movie.smi -t 2000 -o out.smi   # SMI file with explicit output path
    subadjust completions bash > subadjust.bash # Generate bash completions

Files ending in .smi (any case) are treated as SMI, everything else as SRT.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    adjust: AdjustArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Info until the config and flags say otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subadjust", &mut std::io::stdout());
            Ok(())
        }
        None => run_adjust(cli.adjust),
    }
}

fn run_adjust(options: AdjustArgs) -> Result<()> {
    let input_file = options
        .input_file
        .ok_or_else(|| anyhow!("--input-file is required"))?;

    // Load configuration, then let command line flags win
    let mut config = match &options.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(millis) = options.millis {
        config.time_offset_ms = millis;
    }

    if let Some(section) = options.section {
        config.section_offset = section;
    }

    if let Some(log_level) = options.log_level {
        config.log_level = log_level.into();
    }

    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    let report = controller
        .run(&input_file, options.output_file.as_deref())
        .with_context(|| format!("Failed to adjust {:?}", input_file))?;

    info!("Success: {:?}", report.output_file);

    Ok(())
}
