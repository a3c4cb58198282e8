//! Course category resolution and the category → colour table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::{FieldNames, SelectionFields};
use crate::types::CourseRecord;

/// Category used when neither the selection map nor the row names one.
pub const DEFAULT_CATEGORY: &str = "選修";

/// Background colour classes of course cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorClass {
    /// University-wide required courses
    Must,
    /// College-level required courses
    College,
    /// Department required courses
    Dept,
    /// Electives and everything unrecognised
    Elective,
    /// Technology sub-field electives
    Tech,
    /// Management sub-field electives
    Mgmt,
}

impl ColorClass {
    /// CSS class name used by the markup layer.
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Must => "cell-must",
            Self::College => "cell-college",
            Self::Dept => "cell-dept",
            Self::Elective => "cell-elective",
            Self::Tech => "cell-tech",
            Self::Mgmt => "cell-mgmt",
        }
    }

    /// Background colour as `#RRGGBB`.
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Must => "#D0E0F0",
            Self::College => "#FFDAB9",
            Self::Dept => "#EAD1DC",
            Self::Elective => "#FFF8DC",
            Self::Tech => "#B2C9EF",
            Self::Mgmt => "#DFF0D8",
        }
    }
}

/// Known category labels and their colour class.
const CATEGORY_COLORS: &[(&str, ColorClass)] = &[
    // Required
    ("校必修", ColorClass::Must),
    ("院必修", ColorClass::College),
    ("基礎院本課程必修", ColorClass::College),
    ("系必修", ColorClass::Dept),
    ("專業必修", ColorClass::Dept),
    ("必修", ColorClass::Dept),
    // Elective
    ("專業選修", ColorClass::Elective),
    ("選修", ColorClass::Elective),
    // Sub-fields
    ("技術次領域", ColorClass::Tech),
    ("「技術」次領域選修", ColorClass::Tech),
    ("技術次領域選修", ColorClass::Tech),
    ("管理次領域", ColorClass::Mgmt),
    ("「管理」次領域選修", ColorClass::Mgmt),
    ("管理次領域選修", ColorClass::Mgmt),
    // Other
    ("通識", ColorClass::Elective),
    ("體育", ColorClass::Elective),
    ("軍訓", ColorClass::Elective),
];

/// Colour class for a category label; unknown labels are electives.
pub fn color_for_category(label: &str) -> ColorClass {
    CATEGORY_COLORS
        .iter()
        .find(|(name, _)| *name == label)
        .map_or(ColorClass::Elective, |&(_, color)| color)
}

/// Course code → category label, typically built from the selection spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionMap {
    entries: BTreeMap<String, String>,
}

impl SelectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, course_code: impl Into<String>, category: impl Into<String>) {
        self.entries.insert(course_code.into(), category.into());
    }

    /// Category for a course code, ignoring blank entries.
    pub fn get(&self, course_code: &str) -> Option<&str> {
        self.entries
            .get(course_code)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the map from parsed selection-spreadsheet rows.
    ///
    /// Rows missing a code or a category are skipped; a later row for the
    /// same code replaces an earlier one.
    pub fn from_rows(rows: &[CourseRecord], fields: &SelectionFields) -> Self {
        let mut map = Self::new();
        for row in rows {
            let code = row.first_text(&fields.course_code);
            let category = row.first_text(&fields.category);
            match (code, category) {
                (Some(code), Some(category)) => map.insert(code, category),
                _ => log::debug!("skipping selection row without code or category"),
            }
        }
        map
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SelectionMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (code, category) in iter {
            map.insert(code, category);
        }
        map
    }
}

/// Where a resolved category came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CategorySource {
    SelectionMap,
    Selection,
    CreditType,
    Default,
}

/// A resolved display category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub label: String,
    pub color: ColorClass,
    pub source: CategorySource,
}

/// Resolve a course's category.
///
/// Lookup order: selection map by course code, then the row's own selection
/// column, then its required/elective column, then [`DEFAULT_CATEGORY`].
pub fn category_for(
    record: &CourseRecord,
    fields: &FieldNames,
    selection: &SelectionMap,
) -> Category {
    let from_map = record
        .text(&fields.course_code)
        .and_then(|code| selection.get(&code).map(str::to_string))
        .map(|label| (label, CategorySource::SelectionMap));

    let (label, source) = from_map
        .or_else(|| {
            record
                .text(&fields.selection)
                .map(|label| (label, CategorySource::Selection))
        })
        .or_else(|| {
            record
                .text(&fields.credit_type)
                .map(|label| (label, CategorySource::CreditType))
        })
        .unwrap_or_else(|| (DEFAULT_CATEGORY.to_string(), CategorySource::Default));

    Category {
        color: color_for_category(&label),
        label,
        source,
    }
}
