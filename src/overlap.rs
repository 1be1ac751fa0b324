//! Minute-of-day interval overlap, with ranges allowed to wrap past midnight.

use crate::clock::{parse_time_range, ClockTime, MINUTES_PER_DAY};

/// A recurring daily interval. When `end < start` the range wraps midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockRange {
    pub start: ClockTime,
    pub end: ClockTime,
}

/// 19:00 until 07:00 the following morning.
pub const OVERNIGHT_WINDOW: ClockRange = ClockRange {
    start: ClockTime::from_minutes(19 * 60),
    end: ClockTime::from_minutes(7 * 60),
};

impl ClockRange {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    pub fn wraps_midnight(&self) -> bool {
        self.end < self.start
    }

    pub fn overlaps(&self, other: &ClockRange) -> bool {
        ranges_overlap(
            self.start.minutes(),
            self.end.minutes(),
            other.start.minutes(),
            other.end.minutes(),
        )
    }
}

/// Open-interval intersection of two minute-of-day ranges. Ranges that only
/// touch at a boundary do not overlap.
pub fn ranges_overlap(a_start: u16, a_end: u16, b_start: u16, b_end: u16) -> bool {
    let a = split_at_midnight(a_start, a_end);
    let b = split_at_midnight(b_start, b_end);

    a.iter().flatten().any(|&(xs, xe)| {
        b.iter()
            .flatten()
            .any(|&(ys, ye)| xs < ye && ys < xe)
    })
}

fn split_at_midnight(start: u16, end: u16) -> [Option<(u16, u16)>; 2] {
    if end >= start {
        [Some((start, end)), None]
    } else {
        [Some((start, MINUTES_PER_DAY)), Some((0, end))]
    }
}

/// Whether a `"<start> to <end>"` phrase overlaps [`OVERNIGHT_WINDOW`].
/// Text without a parseable range counts as no overlap.
pub fn intersects_overnight_window(range_text: &str) -> bool {
    parse_time_range(range_text)
        .map(|(start, end)| ClockRange::new(start, end).overlaps(&OVERNIGHT_WINDOW))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: u32, minute: u32) -> ClockTime {
        ClockTime::from_hm(hour, minute).unwrap()
    }

    #[test]
    fn overnight_window_cases() {
        assert!(OVERNIGHT_WINDOW.wraps_midnight());
        assert!(ClockRange::new(hm(21, 0), hm(22, 42)).overlaps(&OVERNIGHT_WINDOW));
        assert!(!ClockRange::new(hm(8, 0), hm(18, 0)).overlaps(&OVERNIGHT_WINDOW));
        assert!(ClockRange::new(hm(6, 0), hm(8, 0)).overlaps(&OVERNIGHT_WINDOW));
        assert!(ClockRange::new(hm(23, 0), hm(1, 0)).overlaps(&OVERNIGHT_WINDOW));
    }

    #[test]
    fn touching_boundaries_do_not_overlap() {
        assert!(!ClockRange::new(hm(7, 0), hm(19, 0)).overlaps(&OVERNIGHT_WINDOW));
        assert!(!ranges_overlap(600, 700, 700, 800));
        assert!(!ranges_overlap(1200, 60, 60, 1200));
    }

    #[test]
    fn overlap_is_symmetric() {
        let samples = [0u16, 59, 419, 420, 421, 720, 1139, 1140, 1141, 1439];
        for &a_start in &samples {
            for &a_end in &samples {
                for &b_start in &samples {
                    for &b_end in &samples {
                        assert_eq!(
                            ranges_overlap(a_start, a_end, b_start, b_end),
                            ranges_overlap(b_start, b_end, a_start, a_end),
                            "{a_start}-{a_end} vs {b_start}-{b_end}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn range_text_against_window() {
        assert!(intersects_overnight_window("9:33pm to 10:42pm"));
        assert!(intersects_overnight_window("6:00am to 8:00am"));
        assert!(!intersects_overnight_window("8:00am to 6:00pm"));
        assert!(!intersects_overnight_window("7:00am to 7:00pm"));
        assert!(!intersects_overnight_window("all evening"));
        assert!(!intersects_overnight_window(""));
    }
}
