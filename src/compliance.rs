//! Folding presence records into a per-day "home overnight" map.

use crate::clock::{parse_date_cell, strip_markup};
use crate::models::PresenceRow;
use crate::overlap::intersects_overnight_window;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Date → was at home overnight. Days never observed have no entry.
pub type ComplianceMap = BTreeMap<NaiveDate, bool>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceRecord {
    pub date: NaiveDate,
    pub location_type: String,
    pub time_range: String,
}

impl PresenceRecord {
    pub fn new(date: NaiveDate, location_type: impl Into<String>, time_range: impl Into<String>) -> Self {
        Self {
            date,
            location_type: location_type.into(),
            time_range: time_range.into(),
        }
    }

    /// Converts a raw table row. Rows with an unreadable date cell are dropped.
    pub fn from_row(row: &PresenceRow) -> Option<Self> {
        let Some(date) = parse_date_cell(&row.date) else {
            debug!(cell = %row.date, "skipping row with unreadable date");
            return None;
        };

        Some(Self {
            date,
            location_type: strip_markup(&row.location_type),
            time_range: strip_markup(&row.time),
        })
    }

    pub fn is_home(&self) -> bool {
        self.location_type.trim().eq_ignore_ascii_case("home")
    }

    pub fn home_overnight(&self) -> bool {
        self.is_home() && intersects_overnight_window(&self.time_range)
    }
}

pub fn records_from_rows(rows: &[PresenceRow]) -> Vec<PresenceRecord> {
    rows.iter().filter_map(PresenceRecord::from_row).collect()
}

/// Every record's date gets an entry; it is `true` once any home record on
/// that date overlaps the overnight window, and never goes back to `false`.
pub fn compute_compliance(records: &[PresenceRecord]) -> ComplianceMap {
    let mut map = ComplianceMap::new();
    for record in records {
        let entry = map.entry(record.date).or_insert(false);
        if record.home_overnight() {
            *entry = true;
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn home_overlap_wins_regardless_of_order() {
        let day = date(2025, 9, 3);
        let home = PresenceRecord::new(day, "Home", "8:00pm to 10:00pm");
        let away = PresenceRecord::new(day, "Work", "10:00am to 12:00pm");

        let forward = compute_compliance(&[home.clone(), away.clone()]);
        let backward = compute_compliance(&[away, home]);
        assert_eq!(forward.get(&day), Some(&true));
        assert_eq!(backward.get(&day), Some(&true));
    }

    #[test]
    fn observed_days_without_home_overlap_are_false() {
        let map = compute_compliance(&[
            PresenceRecord::new(date(2025, 9, 1), "home", "9:00am to 5:00pm"),
            PresenceRecord::new(date(2025, 9, 2), "Gym", "9:00pm to 10:00pm"),
            PresenceRecord::new(date(2025, 9, 3), "HOME", "no times recorded"),
        ]);

        assert_eq!(map.len(), 3);
        assert!(map.values().all(|present| !present));
        assert_eq!(map.get(&date(2025, 9, 4)), None);
    }

    #[test]
    fn rows_are_adapted_from_table_cells() {
        let rows = vec![
            PresenceRow {
                date: "Wednesday 3 September<br/>2025".into(),
                location_type: " Home ".into(),
                time: "9:33pm<br>to<br>10:42pm".into(),
            },
            PresenceRow {
                date: "sometime".into(),
                location_type: "Home".into(),
                time: "9:33pm to 10:42pm".into(),
            },
        ];

        let records = records_from_rows(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, date(2025, 9, 3));
        assert_eq!(records[0].time_range, "9:33pm to 10:42pm");
        assert!(records[0].home_overnight());
    }
}
