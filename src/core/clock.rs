//! # Local Clock Deriver
//!
//! Turns a timezone label such as `"UTC+05:30"` into the current wall-clock
//! time at that offset.
//!
//! ## Offset encoding
//!
//! The label is reduced to digits, `:` and `-`, split into hours and minutes,
//! and glued back together as a decimal: `"05" + "." + minutes`. Minutes of
//! `30` and `45` are rewritten to `50` and `75` first so that half and
//! three-quarter hours come out right. Any other minute value is read as a
//! literal decimal fraction, so `UTC+05:15` yields `5.15` hours, not `5.25`.
//!
//! A label without a colon (plain `"UTC"`) or without digits yields NaN, which
//! readers present as "time unavailable".

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, Utc};

/// Display text for a reading whose offset could not be parsed.
pub const TIME_UNAVAILABLE: &str = "Time unavailable";

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Wall-clock time for one timezone label at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockReading {
    pub timezone: String,
    /// Offset in decimal hours; NaN when the label could not be parsed.
    pub offset: f64,
    pub time: Option<NaiveTime>,
}

impl ClockReading {
    /// `"5:07:09 PM"`, or [`TIME_UNAVAILABLE`].
    pub fn label(&self) -> String {
        match self.time {
            Some(time) => time.format("%-I:%M:%S %p").to_string(),
            None => TIME_UNAVAILABLE.to_string(),
        }
    }
}

/// Parses a timezone label into decimal hours. See the module docs for the
/// encoding.
pub fn parse_offset(label: &str) -> f64 {
    let kept: String = label
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ':' || *c == '-')
        .collect();
    let mut parts = kept.split(':');
    let hours = parts.next().unwrap_or_default();
    let Some(minutes) = parts.next() else {
        return f64::NAN;
    };
    let minutes = match minutes {
        "30" => "50",
        "45" => "75",
        other => other,
    };
    parse_decimal_prefix(&format!("{hours}.{minutes}"))
}

/// Reads the longest leading `-?digits(.digits)?` run as a number, ignoring
/// whatever follows. NaN when no digits lead the string.
fn parse_decimal_prefix(text: &str) -> f64 {
    let bytes = text.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            has_digits = true;
            end = frac_end;
        } else if has_digits {
            // "5." reads as 5
            end = frac_start;
        }
    }
    if !has_digits {
        return f64::NAN;
    }
    text[..end].trim_end_matches('.').parse().unwrap_or(f64::NAN)
}

/// Wall-clock time at `offset` hours from the UTC instant `now`.
pub fn shift(now: DateTime<Utc>, offset: f64) -> Option<NaiveDateTime> {
    let millis = (offset * 3_600_000.0).round();
    // `as i64` saturates, so out-of-range offsets must be rejected first
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    let delta = Duration::try_milliseconds(millis as i64)?;
    now.naive_utc().checked_add_signed(delta)
}

/// Current wall-clock time for a timezone label.
pub fn current_local_time(label: &str, now: DateTime<Utc>) -> ClockReading {
    let offset = parse_offset(label);
    ClockReading {
        timezone: label.to_string(),
        offset,
        time: shift(now, offset).map(|dt| dt.time()),
    }
}

/// Readings for every timezone of a country, in order.
pub fn readings_for(timezones: &[String], now: DateTime<Utc>) -> Vec<ClockReading> {
    timezones
        .iter()
        .map(|tz| current_local_time(tz, now))
        .collect()
}
