//! Decoder for compact course time codes such as `"2BCD,4EF"`.
//!
//! Each comma-separated segment holds a weekday digit (1 = Monday) followed by
//! one or more period letters; text around that pair is ignored. Letters are
//! kept in the order given; mapping them onto the canonical grid happens
//! later in the layout engine.

use serde::Serialize;
use serde_json::Value;

use crate::error::{CourseGridError, Result};
use crate::period::WEEKDAYS;

/// One decoded segment: a weekday and the period letters on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    /// 0-indexed weekday (0 = Monday).
    pub day: u8,
    /// Upper-cased period letters in source order.
    pub periods: Vec<char>,
}

/// Parse a time-code string into its segments.
///
/// Malformed segments are dropped with a warning; an empty string yields no
/// segments.
pub fn parse(time_str: &str) -> Vec<TimeSlot> {
    time_str
        .split(',')
        .filter_map(|segment| {
            let segment = segment.trim();
            if segment.is_empty() {
                return None;
            }
            let slot = parse_segment(segment);
            if slot.is_none() {
                log::warn!("dropping malformed time-code segment {segment:?} in {time_str:?}");
            }
            slot
        })
        .collect()
}

/// Parse a raw time-slot field taken from a course row.
///
/// A missing field or JSON `null` is treated as an empty schedule.
///
/// # Errors
/// Returns [`CourseGridError::Validation`] when the field holds anything other
/// than a string or `null`.
pub fn parse_value(value: Option<&Value>) -> Result<Vec<TimeSlot>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(parse(s)),
        Some(other) => Err(CourseGridError::Validation(format!(
            "time slot must be a string, got {other}"
        ))),
    }
}

/// Parse a single trimmed segment like `"2bc"`.
///
/// The first weekday digit directly followed by letters wins; anything around
/// it (`"4E1"`, `"2BC(lab)"`) is ignored.
fn parse_segment(segment: &str) -> Option<TimeSlot> {
    let chars: Vec<char> = segment.chars().collect();
    let start = chars.windows(2).position(|pair| {
        matches!(pair, [digit, letter] if digit.is_ascii_digit() && letter.is_ascii_alphabetic())
    })?;
    let (&digit, rest) = chars.get(start..)?.split_first()?;

    let day = u8::try_from(digit.to_digit(10)?.checked_sub(1)?).ok()?;
    if usize::from(day) >= WEEKDAYS {
        return None;
    }

    let periods: Vec<char> = rest
        .iter()
        .take_while(|ch| ch.is_ascii_alphabetic())
        .map(char::to_ascii_uppercase)
        .collect();
    if periods.is_empty() {
        return None;
    }

    Some(TimeSlot { day, periods })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_single_segment() {
        assert_eq!(
            parse("2BCD"),
            vec![TimeSlot {
                day: 1,
                periods: vec!['B', 'C', 'D']
            }]
        );
    }

    #[test]
    fn test_parse_lowercase_multi_segment() {
        let slots = parse("2bc,4ef");
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].day, 1);
        assert_eq!(slots[0].periods, vec!['B', 'C']);
        assert_eq!(slots[1].day, 3);
        assert_eq!(slots[1].periods, vec!['E', 'F']);
    }

    #[test]
    fn test_letters_keep_source_order() {
        assert_eq!(parse("1CB")[0].periods, vec!['C', 'B']);
    }

    #[test]
    fn test_malformed_segments_dropped() {
        let slots = parse("2BC,xyz,6AB,0C,3,5GH");
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].day, 1);
        assert_eq!(slots[1].day, 4);
        assert_eq!(slots[1].periods, vec!['G', 'H']);
    }

    #[test]
    fn test_text_around_the_code_is_ignored() {
        let slots = parse("4E1,2BC(lab),週3FG");
        assert_eq!(slots.len(), 3);
        assert_eq!((slots[0].day, slots[0].periods.clone()), (3, vec!['E']));
        assert_eq!((slots[1].day, slots[1].periods.clone()), (1, vec!['B', 'C']));
        assert_eq!((slots[2].day, slots[2].periods.clone()), (2, vec!['F', 'G']));
    }

    #[test]
    fn test_whitespace_and_empty_segments() {
        let slots = parse(" 1AB , ,3E ");
        assert_eq!(slots.len(), 2);
        assert!(parse("").is_empty());
        assert!(parse(",,").is_empty());
    }

    #[test]
    fn test_parse_value_types() {
        assert!(parse_value(None).unwrap().is_empty());
        assert!(parse_value(Some(&Value::Null)).unwrap().is_empty());
        assert_eq!(parse_value(Some(&json!("1A"))).unwrap().len(), 1);

        let err = parse_value(Some(&json!(42))).unwrap_err();
        assert!(matches!(err, CourseGridError::Validation(_)));
        assert!(parse_value(Some(&json!(["1A"]))).is_err());
    }
}
