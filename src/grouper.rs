//! Expands course rows into per-day occurrences bucketed by `(day, start period)`.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::config::FieldNames;
use crate::period::{symbol_rank, Period, WEEKDAYS};
use crate::timecode;
use crate::types::CourseRecord;

/// Bucket key: weekday plus the first period letter of an occurrence.
///
/// Ordered by day, then by the canonical position of `start`; letters outside
/// the grid sort after every canonical period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeSlotKey {
    pub day: u8,
    pub start: char,
}

impl Ord for TimeSlotKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.day
            .cmp(&other.day)
            .then_with(|| symbol_rank(self.start).cmp(&symbol_rank(other.start)))
            .then_with(|| self.start.cmp(&other.start))
    }
}

impl PartialOrd for TimeSlotKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One course's presence on one day, for one comma-separated time segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOccurrence {
    /// Course code, or the course name when the row has no code
    pub course_key: String,
    pub day: u8,
    /// Period letters as decoded, never empty
    pub periods: Vec<char>,
    /// Copy of the source row
    pub record: CourseRecord,
}

impl CourseOccurrence {
    /// Bucket key of this occurrence.
    pub fn key(&self) -> Option<TimeSlotKey> {
        self.periods.first().map(|&start| TimeSlotKey {
            day: self.day,
            start,
        })
    }

    /// Periods that have a grid row, in source order. The lunch letter and
    /// letters outside the period table are left out.
    pub fn grid_periods(&self) -> impl Iterator<Item = Period> + '_ {
        self.periods
            .iter()
            .filter_map(|&symbol| Period::from_symbol(symbol))
            .filter(|period| !period.is_lunch())
    }
}

/// Occurrences bucketed by key, each bucket in input-row order.
pub type GroupedCourses = BTreeMap<TimeSlotKey, Vec<CourseOccurrence>>;

/// Group course rows by `(day, start period)`.
///
/// Rows without a course name are skipped. A time-slot field of the wrong type
/// is logged and treated as an empty schedule.
pub fn group(rows: &[CourseRecord], fields: &FieldNames) -> GroupedCourses {
    let mut grouped = GroupedCourses::new();

    for row in rows {
        let Some(name) = row.text(&fields.course_name) else {
            continue;
        };

        let slots = match timecode::parse_value(row.raw(&fields.time_slot)) {
            Ok(slots) => slots,
            Err(e) => {
                log::warn!("course {name:?}: {e}; treating as unscheduled");
                continue;
            }
        };

        let course_key = row.text(&fields.course_code).unwrap_or_else(|| name.clone());

        for slot in slots {
            let Some(&start) = slot.periods.first() else {
                continue;
            };
            let key = TimeSlotKey {
                day: slot.day,
                start,
            };
            grouped.entry(key).or_default().push(CourseOccurrence {
                course_key: course_key.clone(),
                day: slot.day,
                periods: slot.periods,
                record: row.clone(),
            });
        }
    }

    grouped
}

/// Flatten buckets into one list per weekday, walking keys in order.
pub fn occurrences_by_day(grouped: &GroupedCourses) -> Vec<Vec<CourseOccurrence>> {
    let mut days: Vec<Vec<CourseOccurrence>> = vec![Vec::new(); WEEKDAYS];
    for (key, bucket) in grouped {
        match days.get_mut(usize::from(key.day)) {
            Some(day) => day.extend(bucket.iter().cloned()),
            None => log::warn!("dropping {} occurrence(s) on day {}", bucket.len(), key.day),
        }
    }
    days
}
