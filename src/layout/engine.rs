//! Per-cluster layout: turns an overlap cluster into anchored grid cells.

use serde::Serialize;
use std::collections::BTreeSet;

use super::spans::{canonical_runs, presence_runs, rowspan};
use crate::colorizer::{category_for, SelectionMap};
use crate::config::RenderConfig;
use crate::formatter;
use crate::grouper::CourseOccurrence;
use crate::overlap::OverlapCluster;
use crate::period::Period;
use crate::types::{CourseCell, NestedCell, NestedGrid, NestedRow, SlotCell};

/// Inputs shared by every cluster of a render.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    pub config: &'a RenderConfig,
    pub selection: &'a SelectionMap,
}

/// A cell anchored at `(day, anchor)` that swallows the slots in `covers`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub day: u8,
    pub anchor: Period,
    pub cell: SlotCell,
    pub covers: Vec<Period>,
}

/// Result of laying out one cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterLayout {
    pub placements: Vec<Placement>,
    /// Members dropped because their start period has no grid cell
    pub skipped: u32,
}

/// Lay out one overlap cluster.
///
/// A cluster that ends up with a single placeable member is drawn as a plain
/// course cell; only real overlaps produce a nested grid.
pub fn layout_cluster(cluster: &OverlapCluster, ctx: &LayoutContext<'_>) -> ClusterLayout {
    let mut layout = ClusterLayout::default();
    let mut members: Vec<(&CourseOccurrence, Vec<Period>)> = Vec::with_capacity(cluster.len());

    for occurrence in &cluster.members {
        match resolve_periods(occurrence) {
            Some(periods) if !periods.is_empty() => members.push((occurrence, periods)),
            _ => layout.skipped += 1,
        }
    }

    if members.len() > 1 {
        layout.placements = overlap_placements(cluster.day, members, ctx);
    } else if let Some((occurrence, periods)) = members.first() {
        layout.placements = single_placements(occurrence, periods, ctx);
    }
    layout
}

/// Map an occurrence's letters onto the canonical grid.
///
/// Returns `None` when the start letter has no grid cell (unknown letter or
/// the lunch slot). Other unknown letters and `Z` are dropped.
fn resolve_periods(occurrence: &CourseOccurrence) -> Option<Vec<Period>> {
    let &start = occurrence.periods.first()?;
    match Period::from_symbol(start) {
        Some(period) if !period.is_lunch() => {}
        _ => {
            log::warn!(
                "skipping {} on day {}: start period {start:?} has no grid cell",
                occurrence.course_key,
                occurrence.day
            );
            return None;
        }
    }

    let mut resolved = BTreeSet::new();
    for &symbol in &occurrence.periods {
        match Period::from_symbol(symbol) {
            Some(period) if !period.is_lunch() => {
                resolved.insert(period);
            }
            _ => log::warn!(
                "ignoring period {symbol:?} of {} on day {}",
                occurrence.course_key,
                occurrence.day
            ),
        }
    }
    Some(resolved.into_iter().collect())
}

/// Plain course cell(s) for a non-overlapping occurrence: one per run of
/// adjacent grid rows, normally exactly one.
fn single_placements(
    occurrence: &CourseOccurrence,
    periods: &[Period],
    ctx: &LayoutContext<'_>,
) -> Vec<Placement> {
    let runs = canonical_runs(periods);
    if runs.len() > 1 {
        log::debug!(
            "{} on day {} splits into {} separate blocks",
            occurrence.course_key,
            occurrence.day,
            runs.len()
        );
    }

    runs.into_iter()
        .filter_map(|run| {
            let (&anchor, rest) = run.split_first()?;
            Some(Placement {
                day: occurrence.day,
                anchor,
                cell: SlotCell::Course(course_cell(occurrence, rowspan(run.len()), ctx)),
                covers: rest.to_vec(),
            })
        })
        .collect()
}

/// Placements for a real overlap, one per run of adjacent grid rows in the
/// cluster's union.
///
/// A rowspan never crosses the lunch row or a gap, so each run is laid out on
/// its own: a nested grid when several members meet in it, a plain course
/// cell when only one does.
fn overlap_placements(
    day: u8,
    mut members: Vec<(&CourseOccurrence, Vec<Period>)>,
    ctx: &LayoutContext<'_>,
) -> Vec<Placement> {
    members.sort_by(|a, b| a.0.course_key.cmp(&b.0.course_key));

    let all_periods: Vec<Period> = members
        .iter()
        .flat_map(|(_, periods)| periods.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let runs = canonical_runs(&all_periods);
    if runs.len() > 1 {
        log::debug!("overlap on day {day} splits at row gaps into {} blocks", runs.len());
    }

    let mut placements = Vec::with_capacity(runs.len());
    for run in runs {
        let in_run: Vec<(&CourseOccurrence, Vec<Period>)> = members
            .iter()
            .filter_map(|(occurrence, periods)| {
                let held: Vec<Period> =
                    periods.iter().copied().filter(|p| run.contains(p)).collect();
                (!held.is_empty()).then_some((*occurrence, held))
            })
            .collect();

        if in_run.len() > 1 {
            placements.extend(nested_placement(day, &run, &in_run, ctx));
        } else if let Some((occurrence, periods)) = in_run.first() {
            placements.extend(single_placements(occurrence, periods, ctx));
        }
    }
    placements
}

/// Nested grid over one run of adjacent rows: one column per member (already
/// sorted by course key), one row per period of the run.
fn nested_placement(
    day: u8,
    run: &[Period],
    members: &[(&CourseOccurrence, Vec<Period>)],
    ctx: &LayoutContext<'_>,
) -> Option<Placement> {
    let (&anchor, rest) = run.split_first()?;

    let columns: Vec<Vec<NestedCell>> = members
        .iter()
        .map(|(occurrence, periods)| {
            let presence: Vec<bool> = run.iter().map(|p| periods.contains(p)).collect();
            let spans = presence_runs(&presence);
            (0..run.len())
                .map(|idx| {
                    if let Some(span) = spans.iter().find(|span| span.start == idx) {
                        NestedCell::Course(course_cell(occurrence, span.rowspan(), ctx))
                    } else if spans.iter().any(|span| span.covers(idx)) {
                        NestedCell::Covered
                    } else {
                        NestedCell::Empty
                    }
                })
                .collect()
        })
        .collect();

    let rows = run
        .iter()
        .enumerate()
        .map(|(idx, &period)| NestedRow {
            period,
            cells: columns
                .iter()
                .map(|column| column.get(idx).cloned().unwrap_or(NestedCell::Empty))
                .collect(),
        })
        .collect();

    log::debug!(
        "day {day}: nesting {} overlapping courses over {run:?}",
        members.len()
    );

    Some(Placement {
        day,
        anchor,
        covers: rest.to_vec(),
        cell: SlotCell::Overlap(NestedGrid {
            rowspan: rowspan(run.len()),
            columns: members
                .iter()
                .map(|(occurrence, _)| occurrence.course_key.clone())
                .collect(),
            periods: run.to_vec(),
            rows,
        }),
    })
}

/// Content, category and colour for one course cell.
pub fn course_cell(
    occurrence: &CourseOccurrence,
    rowspan: u32,
    ctx: &LayoutContext<'_>,
) -> CourseCell {
    let config = ctx.config;
    let category = category_for(&occurrence.record, &config.fields, ctx.selection);
    CourseCell {
        rowspan,
        course_key: occurrence.course_key.clone(),
        category: category.label,
        color_class: category.color,
        css_class: category.color.css_class(),
        content: formatter::format(&occurrence.record, &config.fields, &config.format),
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
    use crate::types::CourseRecord;
    use Period::*;

    fn occ(key: &str, day: u8, periods: &str) -> CourseOccurrence {
        CourseOccurrence {
            course_key: key.to_string(),
            day,
            periods: periods.chars().collect(),
            record: CourseRecord::new()
                .with("課程名稱", key)
                .with("課程編號", key),
        }
    }

    fn run(members: Vec<CourseOccurrence>) -> ClusterLayout {
        let config = RenderConfig::default();
        let selection = SelectionMap::new();
        let ctx = LayoutContext {
            config: &config,
            selection: &selection,
        };
        let day = members.first().map_or(0, |m| m.day);
        layout_cluster(&OverlapCluster { day, members }, &ctx)
    }

    fn course(cell: &NestedCell) -> &CourseCell {
        match cell {
            NestedCell::Course(course) => course,
            other => panic!("expected course cell, got {other:?}"),
        }
    }

    #[test]
    fn test_single_occurrence_spans_its_periods() {
        let layout = run(vec![occ("X", 1, "BC")]);
        assert_eq!(layout.placements.len(), 1);
        let placement = &layout.placements[0];
        assert_eq!(placement.day, 1);
        assert_eq!(placement.anchor, B);
        assert_eq!(placement.covers, vec![C]);
        match &placement.cell {
            SlotCell::Course(cell) => assert_eq!(cell.rowspan, 2),
            other => panic!("expected course, got {other:?}"),
        }
    }

    #[test]
    fn test_unsorted_letters_anchor_at_canonical_first() {
        let layout = run(vec![occ("X", 0, "DCB")]);
        let placement = &layout.placements[0];
        assert_eq!(placement.anchor, B);
        assert_eq!(placement.covers, vec![C, D]);
    }

    #[test]
    fn test_two_way_overlap_nested_grid() {
        let layout = run(vec![occ("X", 2, "EF"), occ("Y", 2, "FG")]);
        assert_eq!(layout.placements.len(), 1);
        let placement = &layout.placements[0];
        assert_eq!(placement.anchor, E);
        assert_eq!(placement.covers, vec![F, G]);

        let SlotCell::Overlap(grid) = &placement.cell else {
            panic!("expected nested grid");
        };
        assert_eq!(grid.rowspan, 3);
        assert_eq!(grid.periods, vec![E, F, G]);
        assert_eq!(grid.columns, vec!["X", "Y"]);

        let x = grid.column(0);
        assert_eq!(course(x[0]).rowspan, 2);
        assert_eq!(x[1], &NestedCell::Covered);
        assert_eq!(x[2], &NestedCell::Empty);

        let y = grid.column(1);
        assert_eq!(y[0], &NestedCell::Empty);
        assert_eq!(course(y[1]).rowspan, 2);
        assert_eq!(y[2], &NestedCell::Covered);
    }

    #[test]
    fn test_columns_sorted_by_course_key() {
        let layout = run(vec![occ("MGT300", 0, "AB"), occ("CS101", 0, "B")]);
        let SlotCell::Overlap(grid) = &layout.placements[0].cell else {
            panic!("expected nested grid");
        };
        assert_eq!(grid.columns, vec!["CS101", "MGT300"]);
        assert_eq!(grid.cell(0, 0), Some(&NestedCell::Empty));
        assert_eq!(course(grid.cell(1, 0).unwrap()).course_key, "CS101");
    }

    #[test]
    fn test_gap_inside_column_splits_runs() {
        // W and W2 each hold one end of the union E,F,G
        let layout = run(vec![occ("V", 3, "EFG"), occ("W", 3, "E"), occ("W2", 3, "G")]);
        let SlotCell::Overlap(grid) = &layout.placements[0].cell else {
            panic!("expected nested grid");
        };
        assert_eq!(grid.columns, vec!["V", "W", "W2"]);
        assert_eq!(course(grid.cell(0, 0).unwrap()).rowspan, 3);
        assert_eq!(grid.cell(1, 0), Some(&NestedCell::Covered));
        assert_eq!(course(grid.cell(0, 1).unwrap()).rowspan, 1);
        assert_eq!(grid.cell(1, 1), Some(&NestedCell::Empty));
        assert_eq!(grid.cell(2, 1), Some(&NestedCell::Empty));
        assert_eq!(course(grid.cell(2, 2).unwrap()).rowspan, 1);
    }

    #[test]
    fn test_overlap_with_row_gap_splits_into_blocks() {
        let layout = run(vec![occ("X", 0, "A"), occ("Y", 0, "AC")]);
        assert_eq!(layout.placements.len(), 2);

        let first = &layout.placements[0];
        assert_eq!(first.anchor, A);
        assert!(first.covers.is_empty());
        let SlotCell::Overlap(grid) = &first.cell else {
            panic!("expected nested grid at A");
        };
        assert_eq!(grid.periods, vec![A]);
        assert_eq!(grid.rowspan, 1);
        assert_eq!(grid.columns, vec!["X", "Y"]);

        let second = &layout.placements[1];
        assert_eq!(second.anchor, C);
        assert!(second.covers.is_empty());
        assert!(matches!(
            &second.cell,
            SlotCell::Course(c) if c.course_key == "Y" && c.rowspan == 1
        ));
    }

    #[test]
    fn test_overlap_never_spans_lunch() {
        let layout = run(vec![occ("X", 1, "CDE"), occ("Y", 1, "D")]);
        assert_eq!(layout.placements.len(), 2);

        let SlotCell::Overlap(grid) = &layout.placements[0].cell else {
            panic!("expected nested grid before lunch");
        };
        assert_eq!(grid.periods, vec![C, D]);
        assert_eq!(layout.placements[0].covers, vec![D]);
        assert_eq!(course(grid.cell(0, 0).unwrap()).rowspan, 2);
        assert_eq!(grid.cell(0, 1), Some(&NestedCell::Empty));

        assert_eq!(layout.placements[1].anchor, E);
        assert!(layout.placements.iter().all(|p| !p.covers.contains(&Z)));
    }

    #[test]
    fn test_unknown_start_is_skipped() {
        let layout = run(vec![occ("X", 0, "KA")]);
        assert!(layout.placements.is_empty());
        assert_eq!(layout.skipped, 1);

        let layout = run(vec![occ("L", 0, "Z")]);
        assert!(layout.placements.is_empty());
        assert_eq!(layout.skipped, 1);
    }

    #[test]
    fn test_overlap_degrading_to_single_has_no_nested_grid() {
        let layout = run(vec![occ("X", 0, "AB"), occ("Bad", 0, "QA")]);
        assert_eq!(layout.skipped, 1);
        assert_eq!(layout.placements.len(), 1);
        assert!(matches!(layout.placements[0].cell, SlotCell::Course(_)));
    }

    #[test]
    fn test_lunch_letter_dropped_from_span() {
        let layout = run(vec![occ("X", 0, "DZE")]);
        // D and E sit on either side of the lunch row
        assert_eq!(layout.placements.len(), 2);
        assert_eq!(layout.placements[0].anchor, D);
        assert_eq!(layout.placements[1].anchor, E);
        assert!(layout.placements.iter().all(|p| p.covers.is_empty()));
    }
}
