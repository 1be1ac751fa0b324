//! Day bucketing and absolute-window filtering of GPS points.

use crate::clock::ClockTime;
use crate::models::GeoPoint;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Every calendar day from `from` to `to`, both inclusive. Empty when
/// `from > to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut cursor = Some(from);
    while let Some(day) = cursor.filter(|day| *day <= to) {
        days.push(day);
        cursor = day.succ_opt();
    }
    days
}

/// Dataset key for a day, e.g. `bh_20250901`.
pub fn day_key(date: NaiveDate) -> String {
    format!("bh_{}", date.format("%Y%m%d"))
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Closed UTC interval used to select points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TraceWindow {
    /// Builds the window from picker dates and optional times of day.
    ///
    /// A missing start time means midnight; a missing end time means 23:59.
    /// The end is always taken at second 59. An end before the start is
    /// moved to the next day; if it still precedes the start there is no
    /// window.
    pub fn from_picker(
        from_date: NaiveDate,
        to_date: NaiveDate,
        from_time: Option<ClockTime>,
        to_time: Option<ClockTime>,
    ) -> Option<Self> {
        let from_time = from_time.unwrap_or(ClockTime::MIDNIGHT);
        let to_time = to_time.unwrap_or(ClockTime::LAST_MINUTE);

        let from = utc_at(from_date, from_time, 0)?;
        let mut to = utc_at(to_date, to_time, 59)?;
        if to < from {
            to += Duration::days(1);
        }

        Self::new(from, to)
    }

    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Option<Self> {
        (from <= to).then_some(Self { from, to })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.to
    }

    /// Day keys touched by the window, oldest first.
    pub fn day_keys(&self) -> Vec<String> {
        days_between(self.from.date_naive(), self.to.date_naive())
            .into_iter()
            .map(day_key)
            .collect()
    }
}

fn utc_at(date: NaiveDate, time: ClockTime, second: u32) -> Option<DateTime<Utc>> {
    let time = NaiveTime::from_hms_opt(time.hour(), time.minute(), second)?;
    Some(Utc.from_utc_datetime(&date.and_time(time)))
}

/// Copies the points whose timestamp falls inside `window`, keeping order.
/// Points without a readable timestamp are left out.
pub fn filter_by_absolute_window(points: &[GeoPoint], window: &TraceWindow) -> Vec<GeoPoint> {
    points
        .iter()
        .filter(|pt| pt.instant().is_some_and(|at| window.contains(at)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn point(time: Option<&str>) -> GeoPoint {
        GeoPoint {
            lat: 51.889,
            lng: 0.903,
            time: time.map(str::to_string),
            accuracy: None,
            label: None,
        }
    }

    #[test]
    fn days_between_is_inclusive() {
        let days: Vec<String> = days_between(date(2025, 9, 1), date(2025, 9, 3))
            .into_iter()
            .map(date_key)
            .collect();
        assert_eq!(days, vec!["2025-09-01", "2025-09-02", "2025-09-03"]);
    }

    #[test]
    fn days_between_handles_month_ends_and_reversed_input() {
        let days = days_between(date(2024, 2, 28), date(2024, 3, 1));
        assert_eq!(days.len(), 3);
        assert_eq!(days[1], date(2024, 2, 29));
        assert!(days_between(date(2025, 9, 3), date(2025, 9, 1)).is_empty());
        assert_eq!(days_between(date(2025, 9, 3), date(2025, 9, 3)), vec![date(2025, 9, 3)]);
    }

    #[test]
    fn day_keys_use_compact_format() {
        assert_eq!(day_key(date(2025, 9, 1)), "bh_20250901");
    }

    #[test]
    fn window_defaults_cover_whole_days() {
        let window = TraceWindow::from_picker(date(2025, 9, 1), date(2025, 9, 2), None, None).unwrap();
        assert_eq!(window.from.to_rfc3339(), "2025-09-01T00:00:00+00:00");
        assert_eq!(window.to.to_rfc3339(), "2025-09-02T23:59:59+00:00");
        assert_eq!(window.day_keys(), vec!["bh_20250901", "bh_20250902"]);
    }

    #[test]
    fn same_day_overnight_window_wraps_to_next_day() {
        let window = TraceWindow::from_picker(
            date(2025, 9, 1),
            date(2025, 9, 1),
            ClockTime::parse_24h("23:30"),
            ClockTime::parse_24h("06:30"),
        )
        .unwrap();
        assert_eq!(window.from.to_rfc3339(), "2025-09-01T23:30:00+00:00");
        assert_eq!(window.to.to_rfc3339(), "2025-09-02T06:30:59+00:00");
        assert_eq!(window.day_keys(), vec!["bh_20250901", "bh_20250902"]);
    }

    #[test]
    fn window_rejects_end_days_before_start() {
        assert_eq!(
            TraceWindow::from_picker(date(2025, 9, 5), date(2025, 9, 1), None, None),
            None
        );
    }

    #[test]
    fn filter_keeps_closed_interval_and_skips_bad_timestamps() {
        let window = TraceWindow::from_picker(
            date(2025, 9, 1),
            date(2025, 9, 1),
            ClockTime::parse_24h("21:00"),
            ClockTime::parse_24h("22:00"),
        )
        .unwrap();

        let points = vec![
            point(Some("2025-09-01T20:59:59Z")),
            point(Some("2025-09-01T21:00:00Z")),
            point(None),
            point(Some("not a time")),
            point(Some("2025-09-01T22:00:59Z")),
            point(Some("2025-09-01T23:00:30+01:00")),
            point(Some("2025-09-01T22:01:00Z")),
        ];

        let kept = filter_by_absolute_window(&points, &window);
        let times: Vec<&str> = kept.iter().filter_map(|pt| pt.time.as_deref()).collect();
        assert_eq!(
            times,
            vec![
                "2025-09-01T21:00:00Z",
                "2025-09-01T22:00:59Z",
                "2025-09-01T23:00:30+01:00"
            ]
        );
        assert_eq!(points.len(), 7);
    }
}
