use std::fmt;
use std::path::Path;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::timestamp::{TIMESTAMP_PATTERN, Timestamp};

// @module: Line classification and rewriting for SRT and SMI subtitles
//
// Lines are raw bytes: every pattern is ASCII, so files in any
// ASCII-compatible encoding pass through untouched.

/// Line terminator imposed on every rewritten line
pub const LINE_ENDING: &str = "\r\n";

// @const: SMI sync marker at line start
static SMI_START_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<SYNC Start=([0-9]+)>").unwrap()
});

// @const: SRT time range at line start
static SRT_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^({ts}) --> ({ts})", ts = TIMESTAMP_PATTERN)).unwrap()
});

/// Subtitle formats the rewriter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    /// SubRip: numbered sections with `HH:MM:SS,mmm --> HH:MM:SS,mmm` ranges
    Srt,
    /// SAMI: `<SYNC Start=ms>` markers
    Smi,
}

impl SubtitleFormat {
    /// Pick the format from the file extension; only `.smi` selects SMI
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension() {
            Some(ext) if ext.to_string_lossy().eq_ignore_ascii_case("smi") => Self::Smi,
            _ => Self::Srt,
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Srt => write!(f, "SRT"),
            Self::Smi => write!(f, "SMI"),
        }
    }
}

/// Offsets applied to one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Adjustment {
    /// Milliseconds added to every timestamp
    pub time_offset_ms: i64,
    /// Delta added to every SRT section number
    pub section_offset: i64,
}

impl Adjustment {
    pub fn new(time_offset_ms: i64, section_offset: i64) -> Self {
        Self {
            time_offset_ms,
            section_offset,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.time_offset_ms == 0 && self.section_offset == 0
    }
}

/// What a single input line was recognized as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `<SYNC Start=ms>` marker with its millisecond value
    SmiStart(i64),
    /// SRT start and end timestamps
    TimeRange(Timestamp, Timestamp),
    /// Bare SRT section number
    Section(i64),
    /// Anything else; copied to the output untouched
    Unrecognized,
}

/// Classify a line of an SMI file
pub fn classify_smi_line(line: &[u8]) -> LineKind {
    let Some(caps) = SMI_START_REGEX.captures(line) else {
        return LineKind::Unrecognized;
    };

    match parse_digits(&caps[1]) {
        Some(start) => LineKind::SmiStart(start),
        None => {
            warn!(
                "Leaving SYNC marker unchanged, start value {} does not fit",
                String::from_utf8_lossy(&caps[1])
            );
            LineKind::Unrecognized
        }
    }
}

/// Classify a line of an SRT file; a time range wins over a section number
pub fn classify_srt_line(line: &[u8]) -> LineKind {
    if let Some(caps) = SRT_RANGE_REGEX.captures(line) {
        if let (Ok(start), Ok(end)) = (Timestamp::parse(&caps[1]), Timestamp::parse(&caps[2])) {
            return LineKind::TimeRange(start, end);
        }
    }

    let trimmed = line.trim_ascii();
    if !trimmed.is_empty() && trimmed.iter().all(u8::is_ascii_digit) {
        match parse_digits(trimmed) {
            Some(section) => return LineKind::Section(section),
            None => warn!(
                "Leaving section number {} unchanged, it does not fit",
                String::from_utf8_lossy(trimmed)
            ),
        }
    }

    LineKind::Unrecognized
}

// ASCII digits to i64; None on overflow
fn parse_digits(digits: &[u8]) -> Option<i64> {
    digits.iter().try_fold(0i64, |acc, digit| {
        acc.checked_mul(10)?.checked_add(i64::from(digit - b'0'))
    })
}

/// Keeps SRT section numbers strictly consecutive across one file
#[derive(Debug, Clone, Default)]
pub struct SectionSequencer {
    previous: Option<i64>,
}

impl SectionSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept an offset section number and return the number to emit,
    /// plus whether it had to be repaired to follow the previous one
    pub fn next(&mut self, candidate: i64) -> (i64, bool) {
        let (number, repaired) = match self.previous {
            Some(prev) if candidate != prev.saturating_add(1) => (prev.saturating_add(1), true),
            _ => (candidate, false),
        };
        self.previous = Some(number);
        (number, repaired)
    }
}

/// Counters collected while rewriting one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewriteStats {
    /// Timestamp lines or SYNC markers rewritten
    pub timestamps_shifted: usize,
    /// SRT section lines re-emitted
    pub sections_renumbered: usize,
    /// Section lines forced to previous + 1
    pub sections_repaired: usize,
    /// Lines copied unchanged
    pub lines_passed_through: usize,
}

impl RewriteStats {
    pub fn total_lines(&self) -> usize {
        self.timestamps_shifted + self.sections_renumbered + self.lines_passed_through
    }
}

/// Line-at-a-time SRT rewriter carrying the section sequence state
#[derive(Debug, Clone)]
pub struct SrtRewriter {
    adjustment: Adjustment,
    sequencer: SectionSequencer,
    stats: RewriteStats,
}

impl SrtRewriter {
    pub fn new(adjustment: Adjustment) -> Self {
        Self {
            adjustment,
            sequencer: SectionSequencer::new(),
            stats: RewriteStats::default(),
        }
    }

    pub fn stats(&self) -> RewriteStats {
        self.stats
    }

    /// Rewrite one line; lines must be fed in file order
    pub fn rewrite_line(&mut self, line: &[u8]) -> Vec<u8> {
        match classify_srt_line(line) {
            LineKind::TimeRange(start, end) => {
                self.stats.timestamps_shifted += 1;
                let offset = self.adjustment.time_offset_ms;
                format!("{} --> {}{}", start.shift(offset), end.shift(offset), LINE_ENDING).into_bytes()
            }
            LineKind::Section(section) => {
                let candidate = section.saturating_add(self.adjustment.section_offset);
                let (number, repaired) = self.sequencer.next(candidate);
                if repaired {
                    debug!("Section {} renumbered to {} to follow the previous section", candidate, number);
                    self.stats.sections_repaired += 1;
                }
                self.stats.sections_renumbered += 1;
                format!("{}{}", number, LINE_ENDING).into_bytes()
            }
            LineKind::SmiStart(_) | LineKind::Unrecognized => {
                self.stats.lines_passed_through += 1;
                line.to_vec()
            }
        }
    }
}

/// Line-at-a-time SMI rewriter
#[derive(Debug, Clone)]
pub struct SmiRewriter {
    time_offset_ms: i64,
    stats: RewriteStats,
}

impl SmiRewriter {
    pub fn new(time_offset_ms: i64) -> Self {
        Self {
            time_offset_ms,
            stats: RewriteStats::default(),
        }
    }

    pub fn stats(&self) -> RewriteStats {
        self.stats
    }

    pub fn rewrite_line(&mut self, line: &[u8]) -> Vec<u8> {
        match classify_smi_line(line) {
            LineKind::SmiStart(start) => {
                self.stats.timestamps_shifted += 1;
                format!(
                    "<SYNC Start={}>{}",
                    start.saturating_add(self.time_offset_ms),
                    LINE_ENDING
                )
                .into_bytes()
            }
            _ => {
                self.stats.lines_passed_through += 1;
                line.to_vec()
            }
        }
    }
}

/// Shift every SYNC marker of an SMI file by `offset_ms`
pub fn rewrite_smi<S: AsRef<[u8]>>(lines: &[S], offset_ms: i64) -> Vec<Vec<u8>> {
    let mut rewriter = SmiRewriter::new(offset_ms);
    lines.iter().map(|line| rewriter.rewrite_line(line.as_ref())).collect()
}

/// Shift every time range and renumber every section of an SRT file
pub fn rewrite_srt<S: AsRef<[u8]>>(lines: &[S], section_offset: i64, time_offset_ms: i64) -> Vec<Vec<u8>> {
    let mut rewriter = SrtRewriter::new(Adjustment::new(time_offset_ms, section_offset));
    lines.iter().map(|line| rewriter.rewrite_line(line.as_ref())).collect()
}

/// Rewrite a whole file's lines in the given format, returning the counters too
pub fn rewrite<S: AsRef<[u8]>>(
    format: SubtitleFormat,
    lines: &[S],
    adjustment: &Adjustment,
) -> (Vec<Vec<u8>>, RewriteStats) {
    match format {
        SubtitleFormat::Srt => {
            let mut rewriter = SrtRewriter::new(*adjustment);
            let output = lines.iter().map(|line| rewriter.rewrite_line(line.as_ref())).collect();
            (output, rewriter.stats())
        }
        SubtitleFormat::Smi => {
            let mut rewriter = SmiRewriter::new(adjustment.time_offset_ms);
            let output = lines.iter().map(|line| rewriter.rewrite_line(line.as_ref())).collect();
            (output, rewriter.stats())
        }
    }
}
