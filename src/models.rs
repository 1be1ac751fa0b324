use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A GPS dataset keyed by day (`bh_YYYYMMDD`) or by LOI trace name.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Dataset {
    pub traces: BTreeMap<String, Trace>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Trace {
    #[serde(default)]
    pub points: Vec<GeoPoint>,
    #[serde(default)]
    pub areas: Vec<Area>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, alias = "timestamp", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl GeoPoint {
    /// The timestamp as an absolute instant. Accepts RFC 3339 and the same
    /// shape without seconds (`2025-09-01T21:00Z`). An offset is required.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        let raw = self.time.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        if let Some(naive) = raw.strip_suffix(['Z', 'z']) {
            let naive = NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M").ok()?;
            return Some(Utc.from_utc_datetime(&naive));
        }
        DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z")
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// A location of interest polygon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Area {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeanddate: Option<String>,
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,
}

impl Area {
    pub fn is_plottable(&self) -> bool {
        self.coordinates.len() >= 3
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    fn around(lat: f64, lng: f64) -> Self {
        Self {
            south: lat,
            west: lng,
            north: lat,
            east: lng,
        }
    }

    fn extend(&mut self, lat: f64, lng: f64) {
        self.south = self.south.min(lat);
        self.north = self.north.max(lat);
        self.west = self.west.min(lng);
        self.east = self.east.max(lng);
    }
}

impl Trace {
    /// Box around every point and every plottable area.
    pub fn bounds(&self) -> Option<Bounds> {
        let points = self.points.iter().map(|pt| (pt.lat, pt.lng));
        let corners = self
            .areas
            .iter()
            .filter(|area| area.is_plottable())
            .flat_map(|area| area.coordinates.iter().map(|c| (c.lat, c.lng)));

        let mut bounds: Option<Bounds> = None;
        for (lat, lng) in points.chain(corners) {
            match bounds.as_mut() {
                Some(b) => b.extend(lat, lng),
                None => bounds = Some(Bounds::around(lat, lng)),
            }
        }
        bounds
    }
}

/// One observed row of the locations table, as raw cell text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceRow {
    pub date: String,
    pub location_type: String,
    #[serde(default)]
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PresenceRows {
    #[serde(default)]
    pub rows: Vec<PresenceRow>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AnchorQuery {
    pub anchor: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TraceQuery {
    #[serde(default)]
    pub from_date: String,
    #[serde(default)]
    pub to_date: String,
    #[serde(default)]
    pub from_time: String,
    #[serde(default)]
    pub to_time: String,
}

impl TraceQuery {
    pub fn is_empty(&self) -> bool {
        self.from_date.trim().is_empty() && self.to_date.trim().is_empty()
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct DatasetQuery {
    pub dataset: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StreakDayView {
    pub date: String,
    pub present: bool,
    pub label: String,
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OvernightResponse {
    pub anchor: String,
    pub consecutive_nights: u32,
    pub last_absent_date: Option<String>,
    pub summary: String,
    pub streak: Vec<StreakDayView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TraceWindowView {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TraceSearchResponse {
    pub status: String,
    pub message: String,
    pub window: Option<TraceWindowView>,
    pub trace: Option<Trace>,
    pub bounds: Option<Bounds>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoiDate {
    pub html: String,
    pub iso: String,
}
