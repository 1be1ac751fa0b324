//! Parsing of clock times, picker dates and table date cells.
//!
//! Every parser here is total: malformed input yields `None`, never a panic
//! or a clamped guess.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Minutes since local midnight, always in `0..1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);
    pub const LAST_MINUTE: ClockTime = ClockTime(MINUTES_PER_DAY - 1);

    pub(crate) const fn from_minutes(minutes: u16) -> Self {
        Self(minutes % MINUTES_PER_DAY)
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self((hour * 60 + minute) as u16))
    }

    /// Parses `H:MM am` / `HH:MMpm` (case-insensitive, optional space before
    /// the meridiem). Hour must be 1-12; 12 counts as 0 before the pm offset.
    pub fn parse_12h(text: &str) -> Option<Self> {
        let caps = CLOCK_12H.captures(text.trim())?;
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        let pm = caps[3].eq_ignore_ascii_case("pm");

        if !(1..=12).contains(&hour) || minute > 59 {
            return None;
        }

        let hour = if hour == 12 { 0 } else { hour };
        let hour = if pm { hour + 12 } else { hour };
        Self::from_hm(hour, minute)
    }

    /// Parses a 24-hour `H:MM` / `HH:MM` string.
    pub fn parse_24h(text: &str) -> Option<Self> {
        let caps = CLOCK_24H.captures(text.trim())?;
        Self::from_hm(caps[1].parse().ok()?, caps[2].parse().ok()?)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0 / 60)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0 % 60)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

static CLOCK_12H: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d{1,2}):(\d{2})\s*([ap]m)$").expect("12h clock pattern"));

static CLOCK_24H: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("24h clock pattern"));

static DATE_PICKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,2})\s*/\s*(\d{1,2})\s*/\s*(\d{4}|\d{2})\s*$").expect("picker date pattern")
});

/// Weekday, day of month, month name, four-digit year.
static DATE_CELL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+\s+(\d{1,2})\s+([A-Za-z]+)\s+(\d{4})$").expect("date cell pattern")
});

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>|[\r\n]").expect("line break pattern"));

static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));

static TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,2}:\d{2}\s*[ap]m)\s*to\s*(\d{1,2}:\d{2}\s*[ap]m)")
        .expect("time range pattern")
});

/// Shorthand for [`ClockTime::parse_12h`].
pub fn parse_clock(text: &str) -> Option<ClockTime> {
    ClockTime::parse_12h(text)
}

/// Parses a date picker value, `DD/MM/YYYY` or `DD/MM/YY` (read as `20YY`).
pub fn parse_date_picker(text: &str) -> Option<NaiveDate> {
    let caps = DATE_PICKER.captures(text)?;
    let year: i32 = caps[3].parse().ok()?;
    let year = if caps[3].len() == 2 { 2000 + year } else { year };

    NaiveDate::from_ymd_opt(year, caps[2].parse().ok()?, caps[1].parse().ok()?)
}

/// Parses a table date cell such as `Wednesday 3 September<br/>2025`.
pub fn parse_date_cell(rich_text: &str) -> Option<NaiveDate> {
    let text = strip_markup(rich_text);
    let caps = DATE_CELL.captures(&text)?;
    let month = month_number(&caps[2])?;
    NaiveDate::from_ymd_opt(caps[3].parse().ok()?, month, caps[1].parse().ok()?)
}

fn month_number(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];

    MONTHS
        .iter()
        .position(|month| month.eq_ignore_ascii_case(name))
        .map(|idx| idx as u32 + 1)
}

/// Flattens rich cell text: `<br>` variants and newlines become spaces, any
/// other tag is dropped. The result is trimmed.
pub fn strip_markup(rich_text: &str) -> String {
    let spaced = LINE_BREAK.replace_all(rich_text, " ");
    ANY_TAG.replace_all(&spaced, "").trim().to_string()
}

/// Extracts the two clocks of a `"<time> to <time>"` phrase anywhere in `text`.
/// Only the leftmost phrase is considered.
pub fn parse_time_range(text: &str) -> Option<(ClockTime, ClockTime)> {
    let caps = TIME_RANGE.captures(text)?;
    Some((parse_clock(&caps[1])?, parse_clock(&caps[2])?))
}
