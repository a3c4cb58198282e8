//! Stateful timetable handle exported to JavaScript.
//!
//! The page loads the course list once, then re-renders as the user picks a
//! selection file or changes the grade filter.

use wasm_bindgen::prelude::*;

use crate::colorizer::SelectionMap;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::filter::GradeFilter;
use crate::render::{parse_selection, render_filtered};
use crate::types::{CourseRecord, Timetable};

/// Holds the current inputs and renders on demand.
#[wasm_bindgen]
#[derive(Default)]
pub struct TimetableView {
    config: RenderConfig,
    rows: Vec<CourseRecord>,
    selection: SelectionMap,
    filter: GradeFilter,
}

#[wasm_bindgen]
impl TimetableView {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self::default()
    }

    /// Replace the course rows (a JSON array of objects).
    #[wasm_bindgen(js_name = "setCourses")]
    pub fn set_courses(&mut self, rows_json: &str) -> std::result::Result<(), JsValue> {
        self.load_courses(rows_json).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the selection data (`{code: category}` or selection rows).
    #[wasm_bindgen(js_name = "setSelection")]
    pub fn set_selection(&mut self, selection_json: &str) -> std::result::Result<(), JsValue> {
        self.load_selection(selection_json).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Set the grade filter: `all`, `master` or a year number.
    #[wasm_bindgen(js_name = "setFilter")]
    pub fn set_filter(&mut self, grade: &str) -> std::result::Result<(), JsValue> {
        self.apply_filter(grade).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the render configuration (JSON).
    #[wasm_bindgen(js_name = "setConfig")]
    pub fn set_config(&mut self, config_json: &str) -> std::result::Result<(), JsValue> {
        self.load_config(config_json).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Number of course rows loaded.
    #[wasm_bindgen(js_name = "courseCount")]
    pub fn course_count(&self) -> usize {
        self.rows.len()
    }

    /// Render the current inputs to a JSON string.
    #[wasm_bindgen(js_name = "renderJson")]
    pub fn render_json(&self) -> std::result::Result<String, JsValue> {
        serde_json::to_string(&self.timetable())
            .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
    }

    /// Render the current inputs to a JS object.
    pub fn render(&self) -> std::result::Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.timetable())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }
}

impl TimetableView {
    pub fn load_courses(&mut self, rows_json: &str) -> Result<()> {
        self.rows = serde_json::from_str(rows_json)?;
        log::debug!("loaded {} course row(s)", self.rows.len());
        Ok(())
    }

    pub fn load_selection(&mut self, selection_json: &str) -> Result<()> {
        self.selection = parse_selection(Some(selection_json), &self.config.selection_fields)?;
        Ok(())
    }

    pub fn apply_filter(&mut self, grade: &str) -> Result<()> {
        self.filter = grade.parse()?;
        Ok(())
    }

    pub fn load_config(&mut self, config_json: &str) -> Result<()> {
        self.config = RenderConfig::from_json(config_json)?;
        Ok(())
    }

    pub fn filter(&self) -> &GradeFilter {
        &self.filter
    }

    /// Render the current inputs.
    pub fn timetable(&self) -> Timetable {
        render_filtered(&self.rows, &self.selection, &self.config, &self.filter)
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
    use crate::colorizer::ColorClass;
    use crate::period::Period;
    use crate::types::SlotCell;

    const ROWS: &str = r#"[
        {"課程名稱": "Networks", "課程編號": "IM201", "上課時間": "2BC", "學制": "學士班", "開課年級": "2"},
        {"課程名稱": "Seminar", "課程編號": "IM501", "上課時間": "4A", "學制": "碩士班"}
    ]"#;

    fn view() -> TimetableView {
        let mut view = TimetableView::default();
        view.load_courses(ROWS).unwrap();
        view
    }

    #[test]
    fn test_view_rerenders_after_selection() {
        let mut view = view();
        assert_eq!(view.course_count(), 2);
        let color_at_b = |view: &TimetableView| match view.timetable().cell(1, Period::B) {
            Some(SlotCell::Course(cell)) => cell.color_class,
            other => panic!("expected a course, found {other:?}"),
        };
        assert_eq!(color_at_b(&view), ColorClass::Elective);

        view.load_selection(r#"{"IM201": "系必修"}"#).unwrap();
        assert_eq!(color_at_b(&view), ColorClass::Dept);
    }

    #[test]
    fn test_view_filter() {
        let mut view = view();
        view.apply_filter("master").unwrap();
        assert_eq!(view.filter(), &GradeFilter::Master);
        let table = view.timetable();
        assert_eq!(table.cell(1, Period::B), Some(&SlotCell::Empty));
        assert!(matches!(table.cell(3, Period::A), Some(SlotCell::Course(_))));

        assert!(view.apply_filter("junior").is_err());
        assert_eq!(view.filter(), &GradeFilter::Master);
    }

    #[test]
    fn test_view_rejects_bad_json() {
        let mut view = view();
        assert!(view.load_courses("{").is_err());
        assert_eq!(view.course_count(), 2);
        assert!(view.load_config(r#"{"fields": {"courseName": " "}}"#).is_err());
    }
}
