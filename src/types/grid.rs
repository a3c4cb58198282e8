use serde::Serialize;

use crate::colorizer::ColorClass;
use crate::formatter::CourseBlock;
use crate::period::Period;

/// Render-ready weekly grid: five day columns by eleven period rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    /// Weekday column labels
    pub day_labels: Vec<String>,
    /// One row per period in canonical order
    pub rows: Vec<TimetableRow>,
    /// Occurrences that could not be placed (bad start period, slot collision)
    pub skipped: u32,
}

/// A single period row of the outer grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableRow {
    pub period: Period,
    pub start_time: String,
    pub end_time: String,
    pub content: RowContent,
}

/// What a period row holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RowContent {
    /// The lunch row: one label cell spanning every day column.
    LunchBreak { label: String, colspan: u32 },
    /// One slot per weekday.
    Slots { cells: Vec<SlotCell> },
}

/// One (day, period) slot of the outer grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SlotCell {
    /// No course in this slot.
    Empty,
    /// A single course anchored here.
    Course(CourseCell),
    /// Several overlapping courses laid out as a nested grid.
    Overlap(NestedGrid),
    /// Swallowed by the rowspan of the anchor at `origin`; emit no cell.
    Covered { origin: Period },
}

/// A course shown in a grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCell {
    pub rowspan: u32,
    pub course_key: String,
    pub category: String,
    pub color_class: ColorClass,
    /// Stylesheet class for `color_class`, e.g. `cell-must`
    pub css_class: &'static str,
    pub content: CourseBlock,
}

/// Sub-grid for an overlap cluster: one column per course, one row per period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedGrid {
    /// Rows spanned by the anchor in the outer grid
    pub rowspan: u32,
    /// Union of member periods in canonical order
    pub periods: Vec<Period>,
    /// Course keys, one per column, sorted
    pub columns: Vec<String>,
    pub rows: Vec<NestedRow>,
}

/// A row of a nested grid; `cells` always has one entry per column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedRow {
    pub period: Period,
    pub cells: Vec<NestedCell>,
}

/// A cell inside a nested grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NestedCell {
    Course(CourseCell),
    Empty,
    /// Swallowed by a rowspan above it in the same column.
    Covered,
}

impl Timetable {
    /// Row for a period.
    pub fn row(&self, period: Period) -> Option<&TimetableRow> {
        self.rows.get(period.index())
    }

    /// Slot at `(day, period)`; `None` for the lunch row or out-of-range days.
    pub fn cell(&self, day: usize, period: Period) -> Option<&SlotCell> {
        match &self.row(period)?.content {
            RowContent::Slots { cells } => cells.get(day),
            RowContent::LunchBreak { .. } => None,
        }
    }

    /// Every anchored slot (course or nested grid) as `(day, period, cell)`.
    pub fn anchors(&self) -> impl Iterator<Item = (usize, Period, &SlotCell)> {
        self.rows.iter().flat_map(|row| {
            let cells: &[SlotCell] = match &row.content {
                RowContent::Slots { cells } => cells,
                RowContent::LunchBreak { .. } => &[],
            };
            cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| matches!(cell, SlotCell::Course(_) | SlotCell::Overlap(_)))
                .map(move |(day, cell)| (day, row.period, cell))
        })
    }
}

impl NestedGrid {
    /// Cell at `(period row, column)`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&NestedCell> {
        self.rows.get(row)?.cells.get(column)
    }

    /// All cells of one column, top to bottom.
    pub fn column(&self, column: usize) -> Vec<&NestedCell> {
        self.rows
            .iter()
            .filter_map(|row| row.cells.get(column))
            .collect()
    }
}
