//! Dates injected into the pages: LOI table row dates and picker limits.

use crate::buckets::date_key;
use crate::models::LoiDate;
use chrono::{Datelike, Days, NaiveDate};

/// How many days before the anchor each LOI table row falls.
pub const LOI_ROW_DAYS_BACK: [u64; 16] = [0, 0, 0, 0, 1, 2, 3, 3, 3, 4, 4, 4, 5, 14, 14, 14];

/// Two-line cell text, e.g. `Wednesday 3 September<br/>2025`.
pub fn format_date_cell(date: NaiveDate) -> String {
    format!("{}<br/>{}", date.format("%A %-d %B"), date.year())
}

/// Row dates for the LOI table. Rows that would fall before the earliest
/// representable date are dropped.
pub fn loi_row_dates(anchor: NaiveDate) -> Vec<LoiDate> {
    LOI_ROW_DAYS_BACK
        .iter()
        .filter_map(|&back| anchor.checked_sub_days(Days::new(back)))
        .map(|date| LoiDate {
            html: format_date_cell(date),
            iso: date_key(date),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerDates {
    /// `DD/MM/YYYY`, the latest date the picker allows.
    pub today_max: String,
    /// `D/M/YY`.
    pub today_display: String,
}

pub fn picker_dates(today: NaiveDate) -> PickerDates {
    PickerDates {
        today_max: today.format("%d/%m/%Y").to_string(),
        today_display: format!("{}/{}/{:02}", today.day(), today.month(), today.year() % 100),
    }
}
