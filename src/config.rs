//! Render configuration: column names of the source exports and display options.
//!
//! Defaults match the registration system's Traditional Chinese exports, so
//! `RenderConfig::default()` works on its CSV/JSON output unchanged. Every
//! field is optional when loading from JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CourseGridError, Result};

/// Column names read from a course row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldNames {
    pub course_name: String,
    pub time_slot: String,
    pub course_code: String,
    /// Intrinsic category column ("選別")
    pub selection: String,
    /// Required/elective column ("修別"), the last fallback for category
    pub credit_type: String,
    pub credits: String,
    pub grade: String,
    pub teacher: Vec<String>,
    pub room: Vec<String>,
    /// Raw course name carrying an `<a href>` to the detail page
    pub linked_name: String,
    pub remarks: String,
    /// Degree program column ("學制")
    pub program: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            course_name: "課程名稱".into(),
            time_slot: "上課時間".into(),
            course_code: "課程編號".into(),
            selection: "選別".into(),
            credit_type: "修別".into(),
            credits: "學分數".into(),
            grade: "開課年級".into(),
            teacher: vec!["任課教師".into(), "授課教師".into()],
            room: vec!["上課教室".into(), "教室".into()],
            linked_name: "SemesterCourseName".into(),
            remarks: "備註".into(),
            program: "學制".into(),
        }
    }
}

/// Column names read from a selection-category spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectionFields {
    pub course_code: Vec<String>,
    pub category: Vec<String>,
}

impl Default for SelectionFields {
    fn default() -> Self {
        Self {
            course_code: vec!["課程編號".into(), "課號".into(), "Course Code".into()],
            category: vec!["選別".into(), "Selection".into()],
        }
    }
}

/// Values of the degree-program column used by the grade filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgramLabels {
    pub bachelor: String,
    pub master: String,
}

impl Default for ProgramLabels {
    fn default() -> Self {
        Self {
            bachelor: "學士班".into(),
            master: "碩士班".into(),
        }
    }
}

/// Teacher text shown in place of the teacher column for matching courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherOverride {
    /// Matched as a substring of the course name
    pub name_fragment: String,
    /// Replacement text; lines are separated by `\n`
    pub teacher: String,
}

/// Options for the cell content formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOptions {
    /// Remarks phrases marking a graduate course open to undergraduates
    pub graduate_remarks: Vec<String>,
    /// Grade badge shown for graduate-eligible courses
    pub graduate_badge: String,
    /// Glyph appended to the headline of graduate-eligible courses
    pub star: String,
    /// Name fragments of courses whose credit count is not shown
    pub hide_credits_for: Vec<String>,
    /// First matching entry replaces the teacher line
    pub teacher_overrides: Vec<TeacherOverride>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            graduate_remarks: vec![
                "為碩士班必修課，學士班大三以上學生可自由選擇是否修習。".into(),
                "為碩士班選修課，學士班大三以上學生可自由選擇是否修習。".into(),
            ],
            graduate_badge: "G".into(),
            star: "⭐".into(),
            hide_credits_for: vec!["資訊管理專題與個案".into()],
            teacher_overrides: vec![TeacherOverride {
                name_fragment: "資訊管理專題與個案".into(),
                teacher: [
                    "a. 簡宏宇 B24",
                    "b. 洪嘉良 管451",
                    "c. 黃俊哲、龔榮發 管203",
                    "d. 陳建宏 管204",
                    "e. 陳彥錚、陳小芬 管136",
                    "f. 戴榮賦、鄭育評 管106",
                ]
                .join("\n"),
            }],
        }
    }
}

/// Fixed labels of the outer grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridLabels {
    pub lunch_break: String,
}

impl Default for GridLabels {
    fn default() -> Self {
        Self {
            lunch_break: "午間休息".into(),
        }
    }
}

/// Everything a render needs besides the rows and the selection map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub fields: FieldNames,
    pub selection_fields: SelectionFields,
    pub programs: ProgramLabels,
    pub format: FormatOptions,
    pub labels: GridLabels,
}

impl RenderConfig {
    /// Parse a config from JSON; missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns an error for malformed JSON or blank required column names.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid config.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject configs that would make every row unreadable.
    ///
    /// # Errors
    /// Returns [`CourseGridError::Config`] naming the first blank column key.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("fields.courseName", &self.fields.course_name),
            ("fields.timeSlot", &self.fields.time_slot),
            ("fields.courseCode", &self.fields.course_code),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(CourseGridError::Config(format!("{name} must not be blank")));
            }
        }
        Ok(())
    }
}
