//! Grade filter applied to course rows before rendering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::RenderConfig;
use crate::error::CourseGridError;
use crate::types::CourseRecord;

/// Which courses to show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradeFilter {
    /// Every course
    #[default]
    All,
    /// Master's program courses
    Master,
    /// Bachelor's courses offered to one year, e.g. `"3"`
    Grade(String),
}

impl GradeFilter {
    /// True when a row passes the filter.
    pub fn matches(&self, record: &CourseRecord, config: &RenderConfig) -> bool {
        let fields = &config.fields;
        let program = record.text(&fields.program);
        match self {
            Self::All => true,
            Self::Master => program.as_deref() == Some(config.programs.master.as_str()),
            Self::Grade(grade) => {
                program.as_deref() == Some(config.programs.bachelor.as_str())
                    && record.text(&fields.grade).as_deref() == Some(grade.as_str())
            }
        }
    }

    /// Rows that pass the filter, in input order.
    pub fn apply(&self, rows: &[CourseRecord], config: &RenderConfig) -> Vec<CourseRecord> {
        rows.iter()
            .filter(|row| self.matches(row, config))
            .cloned()
            .collect()
    }
}

impl FromStr for GradeFilter {
    type Err = CourseGridError;

    /// Accepts `all` (or an empty string), `master`, or a year number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "master" => Ok(Self::Master),
            _ if s.chars().all(|c| c.is_ascii_digit()) => Ok(Self::Grade(s.to_string())),
            _ => Err(CourseGridError::Validation(format!(
                "unknown grade filter {s:?}; expected all, master or a year number"
            ))),
        }
    }
}

impl fmt::Display for GradeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Master => f.write_str("master"),
            Self::Grade(grade) => f.write_str(grade),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn rows() -> Vec<CourseRecord> {
        vec![
            CourseRecord::new()
                .with("課程名稱", "Intro")
                .with("學制", "學士班")
                .with("開課年級", "1"),
            CourseRecord::new()
                .with("課程名稱", "Senior")
                .with("學制", "學士班")
                .with("開課年級", 3),
            CourseRecord::new()
                .with("課程名稱", "Research Methods")
                .with("學制", "碩士班")
                .with("開課年級", "1"),
        ]
    }

    fn names(rows: &[CourseRecord]) -> Vec<String> {
        rows.iter().map(|r| r.text_or_empty("課程名稱")).collect()
    }

    #[test]
    fn test_filters() {
        let config = RenderConfig::default();
        let rows = rows();
        assert_eq!(GradeFilter::All.apply(&rows, &config).len(), 3);
        assert_eq!(
            names(&GradeFilter::Master.apply(&rows, &config)),
            vec!["Research Methods"]
        );
        assert_eq!(
            names(&GradeFilter::Grade("1".into()).apply(&rows, &config)),
            vec!["Intro"]
        );
        assert_eq!(
            names(&GradeFilter::Grade("3".into()).apply(&rows, &config)),
            vec!["Senior"]
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("all".parse::<GradeFilter>().unwrap(), GradeFilter::All);
        assert_eq!("".parse::<GradeFilter>().unwrap(), GradeFilter::All);
        assert_eq!("Master".parse::<GradeFilter>().unwrap(), GradeFilter::Master);
        assert_eq!(
            "4".parse::<GradeFilter>().unwrap(),
            GradeFilter::Grade("4".into())
        );
        assert!("freshman".parse::<GradeFilter>().is_err());
        assert_eq!(GradeFilter::Grade("2".into()).to_string(), "2");
    }
}
