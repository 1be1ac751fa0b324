//! Trace search: picker inputs in, filtered trace or a status out.

use crate::buckets::{filter_by_absolute_window, TraceWindow};
use crate::clock::{parse_date_picker, ClockTime};
use crate::models::{Dataset, Trace, TraceQuery, TraceSearchResponse, TraceWindowView};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum TraceOutcome {
    InvalidDates,
    /// No points at all for the requested days.
    NoData { from: String, to: String },
    /// Points exist for those days but none inside the window.
    NoPointsInWindow { labels: WindowLabels },
    Found {
        labels: WindowLabels,
        window: TraceWindow,
        trace: Trace,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowLabels {
    pub from_date: String,
    pub to_date: String,
    pub from_time: String,
    pub to_time: String,
}

impl TraceOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            TraceOutcome::InvalidDates => "invalid_dates",
            TraceOutcome::NoData { .. } => "no_data",
            TraceOutcome::NoPointsInWindow { .. } => "no_points",
            TraceOutcome::Found { .. } => "found",
        }
    }

    pub fn message(&self, source: &str) -> String {
        match self {
            TraceOutcome::InvalidDates => "Please choose valid From and To dates.".to_string(),
            TraceOutcome::NoData { from, to } => {
                format!("No scenario data found in {source} for {from} to {to}.")
            }
            TraceOutcome::NoPointsInWindow { labels } => format!(
                "No points between {} {} and {} {}.",
                labels.from_date, labels.from_time, labels.to_date, labels.to_time
            ),
            TraceOutcome::Found { labels, trace, .. } => format!(
                "Showing {} point(s) from {} {} to {} {}.",
                trace.points.len(),
                labels.from_date,
                labels.from_time,
                labels.to_date,
                labels.to_time
            ),
        }
    }

    pub fn into_search_response(self, source: &str) -> TraceSearchResponse {
        let status = self.status().to_string();
        let message = self.message(source);
        match self {
            TraceOutcome::Found { window, trace, .. } => TraceSearchResponse {
                status,
                message,
                window: Some(TraceWindowView {
                    from: window.from.to_rfc3339(),
                    to: window.to.to_rfc3339(),
                }),
                bounds: trace.bounds(),
                trace: Some(trace),
            },
            _ => TraceSearchResponse {
                status,
                message,
                window: None,
                trace: None,
                bounds: None,
            },
        }
    }
}

/// Runs a search against an already-loaded dataset. `None` means the dataset
/// could not be loaded and is reported as no data.
pub fn search_traces(dataset: Option<&Dataset>, query: &TraceQuery) -> TraceOutcome {
    let from_text = query.from_date.trim();
    let to_text = match query.to_date.trim() {
        "" => from_text,
        to => to,
    };

    let (Some(from_date), Some(to_date)) = (parse_date_picker(from_text), parse_date_picker(to_text))
    else {
        return TraceOutcome::InvalidDates;
    };

    let from_time = ClockTime::parse_24h(&query.from_time);
    let to_time = ClockTime::parse_24h(&query.to_time);
    let labels = WindowLabels {
        from_date: from_text.to_string(),
        to_date: to_text.to_string(),
        from_time: from_time.unwrap_or(ClockTime::MIDNIGHT).to_string(),
        to_time: to_time.unwrap_or(ClockTime::LAST_MINUTE).to_string(),
    };

    // A to-date well before the from-date selects no days at all.
    let Some(window) = TraceWindow::from_picker(from_date, to_date, from_time, to_time) else {
        return TraceOutcome::NoData {
            from: labels.from_date,
            to: labels.to_date,
        };
    };

    let days: Vec<&Trace> = window
        .day_keys()
        .iter()
        .filter_map(|key| dataset.and_then(|data| data.traces.get(key)))
        .collect();

    let collected: Vec<_> = days.iter().flat_map(|day| day.points.iter().cloned()).collect();
    debug!(days = days.len(), points = collected.len(), "collected trace points");

    if collected.is_empty() {
        return TraceOutcome::NoData {
            from: labels.from_date,
            to: labels.to_date,
        };
    }

    let points = filter_by_absolute_window(&collected, &window);
    if points.is_empty() {
        return TraceOutcome::NoPointsInWindow { labels };
    }

    let areas = days.iter().flat_map(|day| day.areas.iter().cloned()).collect();
    TraceOutcome::Found {
        labels,
        window,
        trace: Trace { points, areas },
    }
}
