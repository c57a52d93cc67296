//! Service-day time handling.
//!
//! Timetables express times as seconds after midnight of the service day.
//! Trips running past midnight keep counting, so "25:10:00" is a valid
//! time belonging to the previous service day.

use std::fmt;
use std::ops::Add;

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Latest hour accepted by [`Time::parse`].
const MAX_HOUR: u32 = 47;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A point in time, in seconds after midnight of the service day.
///
/// [`Time::NEVER`] is the sentinel for "not reached"; it compares greater
/// than every real time and absorbs additions.
///
/// # Examples
///
/// ```
/// use ultra_raptor::domain::Time;
///
/// let t = Time::parse("08:30").unwrap();
/// assert_eq!(t.seconds(), 8 * 3600 + 30 * 60);
/// assert_eq!((t + 90).to_string(), "08:31:30");
/// assert!(t < Time::NEVER);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(u32);

impl Time {
    /// Sentinel for an unreached stop.
    pub const NEVER: Time = Time(u32::MAX);

    /// Midnight at the start of the service day.
    pub const MIDNIGHT: Time = Time(0);

    /// Create a time from seconds after midnight.
    pub const fn from_seconds(seconds: u32) -> Self {
        Time(seconds)
    }

    /// Create a time from hour, minute and second components.
    pub const fn hms(hour: u32, minute: u32, second: u32) -> Self {
        Time(hour * 3600 + minute * 60 + second)
    }

    /// Parse a time from "HH:MM:SS" or "HH:MM".
    ///
    /// Hours may run up to 47 to express after-midnight trips.
    ///
    /// # Examples
    ///
    /// ```
    /// use ultra_raptor::domain::Time;
    ///
    /// assert!(Time::parse("00:00").is_ok());
    /// assert!(Time::parse("25:10:00").is_ok());
    /// assert!(Time::parse("8:30").is_err());
    /// assert!(Time::parse("12:60").is_err());
    /// assert!(Time::parse("48:00").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 && bytes.len() != 8 {
            return Err(TimeError::new("expected HH:MM or HH:MM:SS format"));
        }

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > MAX_HOUR {
            return Err(TimeError::new("hour must be 0-47"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let second = if bytes.len() == 8 {
            if bytes[5] != b':' {
                return Err(TimeError::new("expected colon at position 5"));
            }
            let second = parse_two_digits(&bytes[6..8])
                .ok_or_else(|| TimeError::new("invalid second digits"))?;
            if second > 59 {
                return Err(TimeError::new("second must be 0-59"));
            }
            second
        } else {
            0
        };

        Ok(Time::hms(hour, minute, second))
    }

    /// Create a time from a wall-clock time on the service day.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Time(time.num_seconds_from_midnight())
    }

    /// Convert to a wall-clock time, if this time falls within the first
    /// 24 hours of the service day.
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        if self.is_never() {
            return None;
        }
        NaiveTime::from_num_seconds_from_midnight_opt(self.0, 0)
    }

    /// Returns the number of seconds after midnight.
    pub fn seconds(&self) -> u32 {
        self.0
    }

    /// Returns true for the [`Time::NEVER`] sentinel.
    pub fn is_never(&self) -> bool {
        *self == Time::NEVER
    }

    /// Returns the signed duration from `other` to `self`.
    pub fn signed_duration_since(&self, other: Time) -> Duration {
        Duration::seconds(i64::from(self.0) - i64::from(other.0))
    }
}

impl Add<u32> for Time {
    type Output = Time;

    /// Add a number of seconds. `NEVER` stays `NEVER` and the sum
    /// saturates at `NEVER`.
    fn add(self, seconds: u32) -> Time {
        Time(self.0.saturating_add(seconds))
    }
}

impl fmt::Debug for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time({})", self)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_never() {
            return f.write_str("--:--:--");
        }
        let (hours, minutes, seconds) = split(i64::from(self.0));
        write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Render a duration as "41m12s", or "13h41m12s" from one hour on.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use ultra_raptor::domain::format_duration;
///
/// assert_eq!(format_duration(Duration::seconds(2472)), "41m12s");
/// assert_eq!(format_duration(Duration::seconds(49272)), "13h41m12s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let (hours, minutes, seconds) = split(total.abs());
    if hours == 0 {
        format!("{sign}{minutes:02}m{seconds:02}s")
    } else {
        format!("{sign}{hours}h{minutes:02}m{seconds:02}s")
    }
}

fn split(total_seconds: i64) -> (i64, i64, i64) {
    (
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60,
    )
}

/// Parse two ASCII digits into a number.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].checked_sub(b'0').filter(|&d| d <= 9)?;
    let d2 = bytes[1].checked_sub(b'0').filter(|&d| d <= 9)?;
    Some(u32::from(d1) * 10 + u32::from(d2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_and_without_seconds() {
        assert_eq!(Time::parse("13:41:12").unwrap().seconds(), 49272);
        assert_eq!(Time::parse("13:41").unwrap(), Time::hms(13, 41, 0));
    }

    #[test]
    fn parse_after_midnight() {
        let t = Time::parse("25:10:00").unwrap();
        assert_eq!(t.seconds(), 25 * 3600 + 600);
        assert!(t.to_naive_time().is_none());
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(Time::parse("").is_err());
        assert!(Time::parse("1:00").is_err());
        assert!(Time::parse("10-00").is_err());
        assert!(Time::parse("10:00-00").is_err());
        assert!(Time::parse("ab:00").is_err());
        assert!(Time::parse("10:00:60").is_err());
        assert!(Time::parse("48:00:00").is_err());
    }

    #[test]
    fn error_display() {
        let err = Time::parse("10:61").unwrap_err();
        assert_eq!(err.to_string(), "invalid time: minute must be 0-59");
    }

    #[test]
    fn display() {
        assert_eq!(Time::hms(8, 5, 3).to_string(), "08:05:03");
        assert_eq!(Time::hms(26, 0, 0).to_string(), "26:00:00");
        assert_eq!(Time::NEVER.to_string(), "--:--:--");
    }

    #[test]
    fn never_absorbs_additions() {
        assert_eq!(Time::NEVER + 10, Time::NEVER);
        assert_eq!(Time::from_seconds(u32::MAX - 1) + 10, Time::NEVER);
        assert!(Time::hms(47, 59, 59) < Time::NEVER);
    }

    #[test]
    fn naive_time_roundtrip() {
        let naive = NaiveTime::from_hms_opt(9, 15, 30).unwrap();
        let t = Time::from_naive_time(naive);
        assert_eq!(t, Time::hms(9, 15, 30));
        assert_eq!(t.to_naive_time(), Some(naive));
        assert!(Time::NEVER.to_naive_time().is_none());
    }

    #[test]
    fn signed_duration() {
        let a = Time::hms(10, 0, 0);
        let b = Time::hms(10, 30, 0);
        assert_eq!(b.signed_duration_since(a), Duration::minutes(30));
        assert_eq!(a.signed_duration_since(b), Duration::minutes(-30));
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(Duration::zero()), "00m00s");
        assert_eq!(format_duration(Duration::seconds(3599)), "59m59s");
        assert_eq!(format_duration(Duration::seconds(3600)), "1h00m00s");
        assert_eq!(format_duration(Duration::seconds(-90)), "-01m30s");
    }
}
