//! Shared builders and lookups for the timetable integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use coursegrid::{
    render, CourseCell, CourseRecord, NestedGrid, Period, RenderConfig, SelectionMap, SlotCell,
    Timetable,
};

/// A course row with the three columns every render needs.
#[must_use]
pub fn course(name: &str, code: &str, time: &str) -> CourseRecord {
    CourseRecord::new()
        .with("課程名稱", name)
        .with("課程編號", code)
        .with("上課時間", time)
}

/// Render with the default config and an empty selection map.
#[must_use]
pub fn render_default(rows: &[CourseRecord]) -> Timetable {
    render(rows, &SelectionMap::new(), &RenderConfig::default())
}

/// The course cell anchored at `(day, period)`; panics if there is none.
pub fn course_at(table: &Timetable, day: usize, period: Period) -> &CourseCell {
    match table.cell(day, period) {
        Some(SlotCell::Course(cell)) => cell,
        other => panic!("expected a course at day {day} {period:?}, found {other:?}"),
    }
}

/// The nested grid anchored at `(day, period)`; panics if there is none.
pub fn overlap_at(table: &Timetable, day: usize, period: Period) -> &NestedGrid {
    match table.cell(day, period) {
        Some(SlotCell::Overlap(grid)) => grid,
        other => panic!("expected an overlap at day {day} {period:?}, found {other:?}"),
    }
}

/// True when `(day, period)` is swallowed by the anchor at `origin`.
#[must_use]
pub fn is_covered_by(table: &Timetable, day: usize, period: Period, origin: Period) -> bool {
    table.cell(day, period) == Some(&SlotCell::Covered { origin })
}
