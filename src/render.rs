//! The render pipeline: rows + selection map in, timetable out.
//!
//! `render` is a pure function of its inputs; calling it twice with the same
//! arguments yields deep-equal timetables.

use serde::Deserialize;

use crate::colorizer::SelectionMap;
use crate::config::{RenderConfig, SelectionFields};
use crate::error::Result;
use crate::filter::GradeFilter;
use crate::grouper::{group, occurrences_by_day};
use crate::layout::{layout_cluster, LayoutContext, TimetableBuilder};
use crate::overlap::partition_by_day;
use crate::types::{CourseRecord, Timetable};

/// Compute the timetable for a set of course rows.
pub fn render(rows: &[CourseRecord], selection: &SelectionMap, config: &RenderConfig) -> Timetable {
    let grouped = group(rows, &config.fields);
    let ctx = LayoutContext { config, selection };
    let mut builder = TimetableBuilder::new();

    for (day, occurrences) in occurrences_by_day(&grouped).iter().enumerate() {
        let Ok(day) = u8::try_from(day) else {
            continue;
        };
        for cluster in partition_by_day(day, occurrences) {
            let layout = layout_cluster(&cluster, &ctx);
            builder.skip(layout.skipped);
            for placement in layout.placements {
                builder.place(placement);
            }
        }
    }

    let table = builder.finish(&config.labels);
    log::debug!(
        "rendered {} row(s) into {} anchored cell(s), {} skipped",
        rows.len(),
        table.anchors().count(),
        table.skipped
    );
    table
}

/// Apply a grade filter, then render.
pub fn render_filtered(
    rows: &[CourseRecord],
    selection: &SelectionMap,
    config: &RenderConfig,
    filter: &GradeFilter,
) -> Timetable {
    if *filter == GradeFilter::All {
        return render(rows, selection, config);
    }
    let filtered = filter.apply(rows, config);
    render(&filtered, selection, config)
}

/// Selection data as it arrives over JSON: either a ready `{code: category}`
/// object or the rows of the selection spreadsheet.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SelectionInput {
    Map(SelectionMap),
    Rows(Vec<CourseRecord>),
}

impl SelectionInput {
    /// Resolve into a selection map.
    pub fn into_map(self, fields: &SelectionFields) -> SelectionMap {
        match self {
            Self::Map(map) => map,
            Self::Rows(rows) => SelectionMap::from_rows(&rows, fields),
        }
    }
}

/// Decode the selection JSON; `None` or blank input is an empty map.
///
/// # Errors
/// Returns an error when the JSON is neither an object of strings nor an
/// array of rows.
pub fn parse_selection(json: Option<&str>, fields: &SelectionFields) -> Result<SelectionMap> {
    match json.map(str::trim) {
        None | Some("") => Ok(SelectionMap::new()),
        Some(json) => {
            let input: SelectionInput = serde_json::from_str(json)?;
            Ok(input.into_map(fields))
        }
    }
}

/// JSON in, JSON out: render rows (a JSON array of objects) with optional
/// selection data and grade filter.
///
/// # Errors
/// Returns an error for malformed rows, selection or grade filter JSON.
pub fn render_json(
    rows_json: &str,
    selection_json: Option<&str>,
    grade: Option<&str>,
    config: &RenderConfig,
) -> Result<String> {
    let rows: Vec<CourseRecord> = serde_json::from_str(rows_json)?;
    let selection = parse_selection(selection_json, &config.selection_fields)?;
    let filter: GradeFilter = grade.unwrap_or("all").parse()?;
    let table = render_filtered(&rows, &selection, config, &filter);
    Ok(serde_json::to_string(&table)?)
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
    use crate::period::Period;
    use crate::types::SlotCell;

    fn course(name: &str, code: &str, time: &str) -> CourseRecord {
        CourseRecord::new()
            .with("課程名稱", name)
            .with("課程編號", code)
            .with("上課時間", time)
    }

    #[test]
    fn test_render_places_single_and_nested() {
        let rows = vec![
            course("Networks", "IM201", "2BC"),
            course("Statistics", "IM105", "3EF"),
            course("Ethics", "IM110", "3FG"),
        ];
        let table = render(&rows, &SelectionMap::new(), &RenderConfig::default());

        assert!(matches!(table.cell(1, Period::B), Some(SlotCell::Course(c)) if c.rowspan == 2));
        assert!(matches!(
            table.cell(1, Period::C),
            Some(SlotCell::Covered { origin: Period::B })
        ));
        assert!(matches!(table.cell(2, Period::E), Some(SlotCell::Overlap(g)) if g.rowspan == 3));
        assert_eq!(table.anchors().count(), 2);
    }

    #[test]
    fn test_render_is_idempotent() {
        let rows = vec![course("A", "A1", "1AB,3EF"), course("B", "B1", "1B")];
        let selection: SelectionMap = [("A1", "系必修")].into_iter().collect();
        let config = RenderConfig::default();
        assert_eq!(
            render(&rows, &selection, &config),
            render(&rows, &selection, &config)
        );
    }

    #[test]
    fn test_render_filtered_drops_rows() {
        let rows = vec![
            course("Undergrad", "U1", "1A").with("學制", "學士班").with("開課年級", "2"),
            course("Grad", "G1", "2A").with("學制", "碩士班"),
        ];
        let config = RenderConfig::default();
        let table = render_filtered(&rows, &SelectionMap::new(), &config, &GradeFilter::Master);
        assert_eq!(table.cell(0, Period::A), Some(&SlotCell::Empty));
        assert!(matches!(table.cell(1, Period::A), Some(SlotCell::Course(_))));
    }

    #[test]
    fn test_parse_selection_accepts_map_or_rows() {
        let fields = SelectionFields::default();
        let map = parse_selection(Some(r#"{"CS101":"系必修"}"#), &fields).unwrap();
        assert_eq!(map.get("CS101"), Some("系必修"));

        let map = parse_selection(Some(r#"[{"課號":"CS102","選別":"通識"}]"#), &fields).unwrap();
        assert_eq!(map.get("CS102"), Some("通識"));

        assert!(parse_selection(None, &fields).unwrap().is_empty());
        assert!(parse_selection(Some("  "), &fields).unwrap().is_empty());
        assert!(parse_selection(Some("42"), &fields).is_err());
    }

    #[test]
    fn test_render_json_roundtrip_shape() {
        let rows = r#"[{"課程名稱":"Networks","課程編號":"IM201","上課時間":"2BC"}]"#;
        let json = render_json(rows, None, None, &RenderConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rows"].as_array().unwrap().len(), 11);
        assert_eq!(value["rows"][1]["content"]["kind"], "slots");
        assert_eq!(value["rows"][1]["content"]["cells"][1]["kind"], "course");
        assert_eq!(value["rows"][1]["content"]["cells"][1]["rowspan"], 2);
        assert_eq!(value["rows"][4]["content"]["kind"], "lunchBreak");

        assert!(render_json("not json", None, None, &RenderConfig::default()).is_err());
        assert!(render_json("[]", None, Some("sophomore"), &RenderConfig::default()).is_err());
    }
}
