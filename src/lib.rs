//! coursegrid - weekly course timetable layout for the web
//!
//! Turns course-registration rows into a Monday to Friday grid description:
//! - Time codes like `"2BCD,4EF"` decoded against the fixed period table
//! - Row spans for multi-period courses, one lunch row spanning the week
//! - Overlapping courses laid out side by side in a nested sub-grid
//! - Category colours from the selection spreadsheet, with row fallbacks
//! - Grade filtering (all, master's program, or one bachelor's year)
//!
//! The crate emits a serializable [`Timetable`]; turning it into markup is
//! left to the page.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { TimetableView } from 'coursegrid';
//! await init();
//! const view = new TimetableView();
//! view.setCourses(coursesJson);
//! view.setSelection(selectionJson);
//! const table = view.render();
//! ```

// Input decoding
pub mod config;
pub mod error;
pub mod filter;
pub mod period;
pub mod timecode;
pub mod types;

// Layout pipeline
pub mod colorizer;
pub mod formatter;
pub mod grouper;
pub mod layout;
pub mod overlap;
pub mod render;
pub mod wasm;

use wasm_bindgen::prelude::*;

pub use colorizer::{category_for, color_for_category, Category, ColorClass, SelectionMap};
pub use config::RenderConfig;
pub use error::{CourseGridError, Result};
pub use filter::GradeFilter;
pub use formatter::CourseBlock;
pub use period::Period;
pub use render::{render, render_filtered, render_json};
pub use types::*;
pub use wasm::TimetableView;

/// Render course rows to a JSON timetable
///
/// # Arguments
/// * `rows_json` - JSON array of course rows
/// * `selection_json` - optional `{code: category}` object or selection rows
/// * `grade` - optional grade filter (`all`, `master` or a year number)
///
/// # Errors
/// Returns an error if any input is malformed.
#[wasm_bindgen]
pub fn render_timetable(
    rows_json: &str,
    selection_json: Option<String>,
    grade: Option<String>,
) -> std::result::Result<String, JsValue> {
    render::render_json(
        rows_json,
        selection_json.as_deref(),
        grade.as_deref(),
        &RenderConfig::default(),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render course rows and return the timetable as a `JsValue`
///
/// This is more efficient than `render_timetable` when the result will be
/// used directly in JavaScript.
///
/// # Errors
/// Returns an error if the rows or selection cannot be decoded.
#[wasm_bindgen]
pub fn render_timetable_to_js(
    rows: JsValue,
    selection: JsValue,
    grade: Option<String>,
) -> std::result::Result<JsValue, JsValue> {
    let config = RenderConfig::default();
    let rows: Vec<CourseRecord> = serde_wasm_bindgen::from_value(rows)
        .map_err(|e| JsValue::from_str(&format!("Invalid course rows: {e}")))?;
    let selection = if selection.is_undefined() || selection.is_null() {
        SelectionMap::new()
    } else {
        serde_wasm_bindgen::from_value::<render::SelectionInput>(selection)
            .map_err(|e| JsValue::from_str(&format!("Invalid selection: {e}")))?
            .into_map(&config.selection_fields)
    };
    let filter: GradeFilter = grade
        .as_deref()
        .unwrap_or("all")
        .parse()
        .map_err(|e: CourseGridError| JsValue::from_str(&e.to_string()))?;

    let table = render_filtered(&rows, &selection, &config, &filter);
    serde_wasm_bindgen::to_value(&table)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Decode a time code such as `"2BCD,4EF"` into `[{day, periods}]`
///
/// # Errors
/// Returns an error if the result cannot be serialized.
#[wasm_bindgen]
pub fn parse_course_times(time_str: &str) -> std::result::Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&timecode::parse(time_str))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
