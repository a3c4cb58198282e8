//! Display text for a course cell.

use serde::Serialize;

use crate::config::{FieldNames, FormatOptions};
use crate::types::CourseRecord;

/// Descriptive text block for one course. Missing fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseBlock {
    /// Full course name
    pub name: String,
    /// Leading "name(qualifier)" part, highlighted by the markup layer
    pub title: String,
    /// Credit count, empty when hidden
    pub credits: String,
    /// Grade label without parentheses, e.g. `3` or `G`
    pub grade_badge: String,
    /// Teachers joined with `、`, or a configured override that may span lines
    pub teacher: String,
    pub room: String,
    /// Course detail page URL
    pub link: String,
    /// Graduate course open to senior undergraduates
    pub graduate_eligible: bool,
    /// Glyph appended to the headline, empty when not applicable
    pub star: String,
}

impl CourseBlock {
    /// First line: name, credits in parentheses, and the star marker.
    pub fn headline(&self) -> String {
        let mut line = self.name.clone();
        if !self.credits.is_empty() {
            line.push('(');
            line.push_str(&self.credits);
            line.push(')');
        }
        if !self.star.is_empty() {
            line.push(' ');
            line.push_str(&self.star);
        }
        line
    }

    /// Grade badge in parentheses, or empty.
    pub fn grade_display(&self) -> String {
        if self.grade_badge.is_empty() {
            String::new()
        } else {
            format!("({})", self.grade_badge)
        }
    }

    /// Display lines in cell order: headline, grade, teacher, room.
    pub fn lines(&self) -> Vec<String> {
        vec![
            self.headline(),
            self.grade_display(),
            self.teacher.clone(),
            self.room.clone(),
        ]
    }
}

/// Build the display block for a course row.
pub fn format(record: &CourseRecord, fields: &FieldNames, options: &FormatOptions) -> CourseBlock {
    let name = record.text_or_empty(&fields.course_name);
    let remarks = record.text_or_empty(&fields.remarks);

    let graduate_eligible = options
        .graduate_remarks
        .iter()
        .any(|phrase| !phrase.is_empty() && remarks.contains(phrase.as_str()));

    let hide_credits = options
        .hide_credits_for
        .iter()
        .any(|fragment| !fragment.is_empty() && name.contains(fragment.as_str()));
    let credits = if hide_credits {
        String::new()
    } else {
        record.text_or_empty(&fields.credits)
    };

    let grade_badge = if graduate_eligible {
        options.graduate_badge.clone()
    } else {
        record.text_or_empty(&fields.grade)
    };

    let teacher = match options
        .teacher_overrides
        .iter()
        .find(|o| !o.name_fragment.is_empty() && name.contains(o.name_fragment.as_str()))
    {
        Some(found) => found.teacher.clone(),
        None => record
            .first_text(&fields.teacher)
            .map(|raw| normalize_teachers(&raw))
            .unwrap_or_default(),
    };

    let link = record
        .text(&fields.linked_name)
        .and_then(|raw| extract_href(&raw))
        .unwrap_or_default();

    CourseBlock {
        title: title_of(&name).to_string(),
        name,
        credits,
        grade_badge,
        teacher,
        room: record.first_text(&fields.room).unwrap_or_default(),
        link,
        graduate_eligible,
        star: if graduate_eligible {
            options.star.clone()
        } else {
            String::new()
        },
    }
}

/// Pull the `href="..."` target out of an embedded anchor tag.
pub fn extract_href(raw: &str) -> Option<String> {
    let (_, rest) = raw.split_once("href=\"")?;
    let (url, _) = rest.split_once('"')?;
    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}

/// Strip export quoting and join teachers with the ideographic comma.
fn normalize_teachers(raw: &str) -> String {
    raw.trim_matches('"')
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join("、")
}

/// Leading `name(qualifier)` of a course name, e.g. the Chinese title with its
/// English translation; the whole name when there is no qualifier.
fn title_of(name: &str) -> &str {
    let Some(open) = name.find(|c: char| c == '(' || c == '（') else {
        return name;
    };
    if open == 0 {
        return name;
    }
    let after_open = name
        .get(open..)
        .and_then(|rest| rest.chars().next())
        .map_or(open, |ch| open + ch.len_utf8());
    let Some(close_rel) = name
        .get(after_open..)
        .and_then(|rest| rest.find(|c: char| c == ')' || c == '）'))
    else {
        return name;
    };
    if close_rel == 0 {
        return name;
    }
    let close = after_open + close_rel;
    let end = name
        .get(close..)
        .and_then(|rest| rest.chars().next())
        .map_or(close, |ch| close + ch.len_utf8());
    name.get(..end).unwrap_or(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn block(record: &CourseRecord) -> CourseBlock {
        format(record, &FieldNames::default(), &FormatOptions::default())
    }

    #[test]
    fn test_full_block() {
        let record = CourseRecord::new()
            .with("課程名稱", "資料庫管理(Database Management)")
            .with("學分數", 3)
            .with("開課年級", "2")
            .with("任課教師", "\"王小明,李大華\"")
            .with("上課教室", "管203")
            .with(
                "SemesterCourseName",
                "<a href=\"https://example.edu/course?id=1\">資料庫管理</a>",
            );

        let block = block(&record);
        assert_eq!(block.title, "資料庫管理(Database Management)");
        assert_eq!(block.credits, "3");
        assert_eq!(block.grade_badge, "2");
        assert_eq!(block.teacher, "王小明、李大華");
        assert_eq!(block.room, "管203");
        assert_eq!(block.link, "https://example.edu/course?id=1");
        assert!(!block.graduate_eligible);
        assert_eq!(block.headline(), "資料庫管理(Database Management)(3)");
        assert_eq!(block.lines()[1], "(2)");
    }

    #[test]
    fn test_graduate_eligible_marker() {
        let record = CourseRecord::new()
            .with("課程名稱", "機器學習")
            .with("學分數", "3")
            .with("開課年級", "1")
            .with(
                "備註",
                "本課程為碩士班選修課，學士班大三以上學生可自由選擇是否修習。",
            );

        let block = block(&record);
        assert!(block.graduate_eligible);
        assert_eq!(block.grade_badge, "G");
        assert_eq!(block.grade_display(), "(G)");
        assert_eq!(block.headline(), "機器學習(3) ⭐");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let block = block(&CourseRecord::new());
        assert_eq!(block, CourseBlock::default());
        assert_eq!(block.lines(), vec!["", "", "", ""]);
    }

    #[test]
    fn test_fallback_columns_and_hidden_credits() {
        let record = CourseRecord::new()
            .with("課程名稱", "資訊管理專題與個案")
            .with("學分數", 2)
            .with("授課教師", "陳老師")
            .with("教室", "B24");
        let block = block(&record);
        assert_eq!(block.credits, "");
        assert_eq!(block.room, "B24");
    }

    #[test]
    fn test_teacher_override_replaces_column() {
        let capstone = CourseRecord::new()
            .with("課程名稱", "資訊管理專題與個案(二)")
            .with("任課教師", "簡宏宇");
        let teacher = block(&capstone).teacher;
        assert_eq!(teacher.lines().count(), 6);
        assert!(teacher.starts_with("a. 簡宏宇 B24\nb. 洪嘉良 管451"));
        assert!(teacher.ends_with("f. 戴榮賦、鄭育評 管106"));

        let mut options = FormatOptions::default();
        options.teacher_overrides.clear();
        let plain = format(&capstone, &FieldNames::default(), &options);
        assert_eq!(plain.teacher, "簡宏宇");

        let other = CourseRecord::new()
            .with("課程名稱", "作業研究")
            .with("授課教師", "陳老師");
        assert_eq!(block(&other).teacher, "陳老師");
    }

    #[test]
    fn test_extract_href() {
        assert_eq!(
            extract_href("<a href=\"/c/1\" target=\"_blank\">x</a>").as_deref(),
            Some("/c/1")
        );
        assert_eq!(extract_href("plain name"), None);
        assert_eq!(extract_href("<a href=\"\">x</a>"), None);
    }

    #[test]
    fn test_title_of() {
        assert_eq!(title_of("統計學（一）進階"), "統計學（一）");
        assert_eq!(title_of("Calculus"), "Calculus");
        assert_eq!(title_of("(Lab) Physics"), "(Lab) Physics");
        assert_eq!(title_of("Broken (paren"), "Broken (paren");
        assert_eq!(title_of("Empty () group"), "Empty () group");
    }
}
