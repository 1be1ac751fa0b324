//! Streak and summary derivation over a [`ComplianceMap`].
//!
//! All walks start at an explicit anchor day (normally yesterday, as today is
//! still in progress) and step backwards one day at a time.

use crate::buckets::date_key;
use crate::compliance::ComplianceMap;
use crate::models::{OvernightResponse, StreakDayView};
use chrono::{Days, NaiveDate};

pub const STREAK_LOOKBACK_DAYS: usize = 120;
pub const ABSENCE_LOOKBACK_DAYS: usize = 365;
pub const STREAK_BAR_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakDay {
    pub date: NaiveDate,
    pub present: bool,
}

fn walk_back(anchor: NaiveDate, limit: usize) -> impl Iterator<Item = NaiveDate> {
    (0..limit as u64).map_while(move |offset| anchor.checked_sub_days(Days::new(offset)))
}

/// Consecutive days with an explicit `true` entry, counting back from
/// `anchor`. A `false` or missing entry ends the run.
pub fn count_consecutive_true(map: &ComplianceMap, anchor: NaiveDate) -> u32 {
    walk_back(anchor, STREAK_LOOKBACK_DAYS)
        .take_while(|day| map.get(day) == Some(&true))
        .count() as u32
}

/// Latest day on or before `anchor` with an explicit `false` entry. Days
/// without an entry are skipped.
pub fn most_recent_false(map: &ComplianceMap, anchor: NaiveDate) -> Option<NaiveDate> {
    walk_back(anchor, ABSENCE_LOOKBACK_DAYS).find(|day| map.get(day) == Some(&false))
}

/// The seven days ending at `anchor`, oldest first. Days before the
/// earliest representable date are left out.
pub fn render_streak(map: &ComplianceMap, anchor: NaiveDate) -> Vec<StreakDay> {
    let mut days: Vec<StreakDay> = walk_back(anchor, STREAK_BAR_DAYS)
        .map(|date| StreakDay {
            date,
            present: map.get(&date) == Some(&true),
        })
        .collect();
    days.reverse();
    days
}

/// Whether every walk in this module can run its full length from `anchor`.
pub fn anchor_in_range(anchor: NaiveDate) -> bool {
    anchor
        .checked_sub_days(Days::new(ABSENCE_LOOKBACK_DAYS as u64))
        .is_some()
}

pub fn summary_sentence(subject: &str, consecutive: u32, last_absent: Option<NaiveDate>) -> String {
    let mut sentence = if consecutive > 0 {
        let nights = if consecutive == 1 { "night" } else { "nights" };
        format!(
            "{subject} remained at home overnight for the last {consecutive} consecutive {nights}."
        )
    } else {
        format!("{subject} has not remained at home overnight recently.")
    };

    if let Some(day) = last_absent {
        sentence.push_str(&format!(
            " The last time they were not at home during those times was {}.",
            day.format("%-d %B %Y")
        ));
    }
    sentence
}

pub fn build_overnight(map: &ComplianceMap, anchor: NaiveDate, subject: &str) -> OvernightResponse {
    let consecutive_nights = count_consecutive_true(map, anchor);
    let last_absent = most_recent_false(map, anchor);

    let streak = render_streak(map, anchor)
        .into_iter()
        .map(|day| {
            let status = if day.present { "at home" } else { "not at home" };
            StreakDayView {
                date: date_key(day.date),
                present: day.present,
                label: day.date.format("%A %-d %B").to_string(),
                title: format!("{} - {status}", day.date.format("%a %-d %b")),
            }
        })
        .collect();

    OvernightResponse {
        anchor: date_key(anchor),
        consecutive_nights,
        last_absent_date: last_absent.map(date_key),
        summary: summary_sentence(subject, consecutive_nights, last_absent),
        streak,
    }
}
