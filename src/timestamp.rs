/*!
 * SRT timestamp arithmetic.
 *
 * A timestamp is held as its four clock fields but behaves as a single
 * millisecond duration: shifting flattens the fields, adds the offset and
 * decomposes the total again, largest unit first.
 *
 * Decomposition uses floor division. When an offset drives the total below
 * zero the hour field goes negative while minutes, seconds and milliseconds
 * stay in range, so `-500` ms renders as `-1:59:59,500`. Shifting such a
 * value back by a positive offset restores the original timestamp.
 */

use std::fmt;

use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::errors::SubtitleError;

pub const MILLIS_PER_HOUR: i64 = 3_600_000;
pub const MILLIS_PER_MINUTE: i64 = 60_000;
pub const MILLIS_PER_SECOND: i64 = 1_000;

/// Unanchored `HH:MM:SS,mmm` pattern, shared with the SRT range classifier
pub const TIMESTAMP_PATTERN: &str = r"[0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}";

// @const: Full-string SRT timestamp
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}):([0-9]{2}):([0-9]{2}),([0-9]{3})$").unwrap()
});

/// A subtitle timestamp split into clock fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Timestamp {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub millis: i64,
}

impl Timestamp {
    /// Create a timestamp from raw fields without normalizing them
    pub fn new(hours: i64, minutes: i64, seconds: i64, millis: i64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            millis,
        }
    }

    /// Parse exactly `HH:MM:SS,mmm`
    pub fn parse(text: &[u8]) -> Result<Self, SubtitleError> {
        let caps = TIMESTAMP_REGEX
            .captures(text)
            .ok_or_else(|| SubtitleError::InvalidTimestamp(String::from_utf8_lossy(text).into_owned()))?;

        // Two or three ASCII digits per group
        let field = |i: usize| {
            caps[i]
                .iter()
                .fold(0i64, |acc, digit| acc * 10 + i64::from(digit - b'0'))
        };

        Ok(Self::new(field(1), field(2), field(3), field(4)))
    }

    /// Decompose a millisecond total into normalized fields
    pub fn from_millis(total: i64) -> Self {
        let hours = total.div_euclid(MILLIS_PER_HOUR);
        let rest = total.rem_euclid(MILLIS_PER_HOUR);
        let minutes = rest / MILLIS_PER_MINUTE;
        let rest = rest % MILLIS_PER_MINUTE;
        let seconds = rest / MILLIS_PER_SECOND;
        let millis = rest % MILLIS_PER_SECOND;

        Self {
            hours,
            minutes,
            seconds,
            millis,
        }
    }

    /// Flatten the fields into a single millisecond total
    pub fn total_millis(&self) -> i64 {
        self.hours
            .saturating_mul(MILLIS_PER_HOUR)
            .saturating_add(self.minutes.saturating_mul(MILLIS_PER_MINUTE))
            .saturating_add(self.seconds.saturating_mul(MILLIS_PER_SECOND))
            .saturating_add(self.millis)
    }

    /// Add a signed millisecond offset and renormalize
    pub fn shift(&self, offset_ms: i64) -> Self {
        Self::from_millis(self.total_millis().saturating_add(offset_ms))
    }
}

/// Shift the timestamp given by its four fields by `offset_ms` milliseconds
pub fn shift(hours: i64, minutes: i64, seconds: i64, millis: i64, offset_ms: i64) -> Timestamp {
    Timestamp::new(hours, minutes, seconds, millis).shift(offset_ms)
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}
