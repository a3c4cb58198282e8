//! Assembles placements into the outer five-day grid.

use super::engine::Placement;
use super::spans::rowspan;
use crate::config::GridLabels;
use crate::period::{Period, DAY_LABELS, PERIODS, WEEKDAYS};
use crate::types::{RowContent, SlotCell, Timetable, TimetableRow};

/// Mutable grid being filled during a render; indexed by period then day.
pub struct TimetableBuilder {
    slots: Vec<Vec<SlotCell>>,
    skipped: u32,
}

impl Default for TimetableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TimetableBuilder {
    /// An all-empty grid.
    pub fn new() -> Self {
        Self {
            slots: PERIODS
                .iter()
                .map(|_| vec![SlotCell::Empty; WEEKDAYS])
                .collect(),
            skipped: 0,
        }
    }

    fn slot(&self, day: usize, period: Period) -> Option<&SlotCell> {
        self.slots.get(period.index())?.get(day)
    }

    fn slot_mut(&mut self, day: usize, period: Period) -> Option<&mut SlotCell> {
        self.slots.get_mut(period.index())?.get_mut(day)
    }

    fn is_free(&self, day: usize, period: Period) -> bool {
        !period.is_lunch() && matches!(self.slot(day, period), Some(SlotCell::Empty))
    }

    /// Place an anchored cell and mark the slots it covers.
    ///
    /// Returns `false` (and counts the placement as skipped) when the day is
    /// out of range or any target slot is already taken.
    pub fn place(&mut self, placement: Placement) -> bool {
        let day = usize::from(placement.day);
        let anchor = placement.anchor;

        let free = std::iter::once(&anchor)
            .chain(&placement.covers)
            .all(|&period| self.is_free(day, period));
        if !free {
            log::warn!(
                "no free slot for cell at day {} period {:?}; skipping",
                placement.day,
                anchor
            );
            self.skipped += 1;
            return false;
        }

        for &period in &placement.covers {
            if let Some(slot) = self.slot_mut(day, period) {
                *slot = SlotCell::Covered { origin: anchor };
            }
        }
        if let Some(slot) = self.slot_mut(day, anchor) {
            *slot = placement.cell;
        }
        true
    }

    /// Record occurrences dropped before placement.
    pub fn skip(&mut self, count: u32) {
        self.skipped = self.skipped.saturating_add(count);
    }

    /// Finish the grid, adding period times and the lunch row.
    pub fn finish(self, labels: &GridLabels) -> Timetable {
        let rows = PERIODS
            .iter()
            .zip(self.slots)
            .map(|(&period, cells)| {
                let (start, end) = period.times();
                let content = if period.is_lunch() {
                    RowContent::LunchBreak {
                        label: labels.lunch_break.clone(),
                        colspan: rowspan(WEEKDAYS),
                    }
                } else {
                    RowContent::Slots { cells }
                };
                TimetableRow {
                    period,
                    start_time: start.to_string(),
                    end_time: end.to_string(),
                    content,
                }
            })
            .collect();

        Timetable {
            day_labels: DAY_LABELS.iter().map(|s| (*s).to_string()).collect(),
            rows,
            skipped: self.skipped,
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    fn covered_placement(day: u8, anchor: Period, covers: Vec<Period>) -> Placement {
        Placement {
            day,
            anchor,
            cell: SlotCell::Empty,
            covers,
        }
    }

    #[test]
    fn test_empty_grid_shape() {
        let table = TimetableBuilder::new().finish(&GridLabels::default());
        assert_eq!(table.rows.len(), 11);
        assert_eq!(table.day_labels, vec!["一", "二", "三", "四", "五"]);
        assert_eq!(table.skipped, 0);

        let lunch = table.row(Period::Z).unwrap();
        assert_eq!(lunch.start_time, "12:10");
        assert_eq!(
            lunch.content,
            RowContent::LunchBreak {
                label: "午間休息".into(),
                colspan: 5
            }
        );
        assert_eq!(table.cell(0, Period::Z), None);
        assert_eq!(table.cell(4, Period::J), Some(&SlotCell::Empty));
        assert_eq!(table.cell(5, Period::A), None);
    }

    #[test]
    fn test_place_marks_covered_slots() {
        let mut builder = TimetableBuilder::new();
        assert!(builder.place(covered_placement(1, Period::B, vec![Period::C])));
        let table = builder.finish(&GridLabels::default());
        assert_eq!(
            table.cell(1, Period::C),
            Some(&SlotCell::Covered { origin: Period::B })
        );
    }

    #[test]
    fn test_collisions_and_bad_days_are_skipped() {
        let mut builder = TimetableBuilder::new();
        assert!(builder.place(covered_placement(0, Period::A, vec![Period::B])));
        assert!(!builder.place(covered_placement(0, Period::B, vec![])));
        assert!(!builder.place(covered_placement(7, Period::A, vec![])));
        assert!(!builder.place(covered_placement(0, Period::D, vec![Period::Z])));
        builder.skip(2);
        assert_eq!(builder.finish(&GridLabels::default()).skipped, 5);
    }
}
