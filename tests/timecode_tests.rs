//! Time-code decoding tests for coursegrid
//!
//! Tests for segment parsing, malformed input, non-string time fields and the
//! canonical period table the decoder feeds.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::approx_constant,
    clippy::cast_possible_truncation,
    clippy::absurd_extreme_comparisons,
    clippy::cast_lossless
)]

use coursegrid::period::{period_index, PERIODS};
use coursegrid::timecode::{parse, parse_value, TimeSlot};
use coursegrid::Period;
use serde_json::json;
use test_case::test_case;

fn slot(day: u8, periods: &str) -> TimeSlot {
    TimeSlot {
        day,
        periods: periods.chars().collect(),
    }
}

#[test_case("2BCD", vec![slot(1, "BCD")] ; "single segment")]
#[test_case("2bc,4ef", vec![slot(1, "BC"), slot(3, "EF")] ; "lower case segments")]
#[test_case(" 1A , 5J ", vec![slot(0, "A"), slot(4, "J")] ; "padded segments")]
#[test_case("3DCB", vec![slot(2, "DCB")] ; "source order kept")]
#[test_case("1Z", vec![slot(0, "Z")] ; "lunch letter kept for the layout to drop")]
#[test_case("2B-C", vec![slot(1, "B")] ; "letters stop at punctuation")]
#[test_case("4E1", vec![slot(3, "E")] ; "trailing digit ignored")]
#[test_case("2BC(lab)", vec![slot(1, "BC")] ; "trailing note ignored")]
#[test_case("12A", vec![slot(1, "A")] ; "digit directly before the letters wins")]
fn test_parse(input: &str, expected: Vec<TimeSlot>) {
    assert_eq!(parse(input), expected);
}

#[test_case("" ; "empty")]
#[test_case("   " ; "blank")]
#[test_case("," ; "only separator")]
#[test_case("6A" ; "saturday")]
#[test_case("0A" ; "day zero")]
#[test_case("2" ; "no periods")]
#[test_case("B2" ; "letters first")]
#[test_case("-2" ; "digit without letters")]
fn test_parse_yields_nothing(input: &str) {
    assert!(parse(input).is_empty());
}

#[test]
fn test_bad_segment_does_not_poison_the_rest() {
    assert_eq!(parse("2BC,x,4E"), vec![slot(1, "BC"), slot(3, "E")]);
}

#[test]
fn test_parse_value() {
    assert!(parse_value(None).unwrap().is_empty());
    assert!(parse_value(Some(&json!(null))).unwrap().is_empty());
    assert_eq!(parse_value(Some(&json!("5HI"))).unwrap(), vec![slot(4, "HI")]);
    assert!(parse_value(Some(&json!(12))).is_err());
    assert!(parse_value(Some(&json!(["1A"]))).is_err());
}

#[test]
fn test_timeslot_serializes_as_letters() {
    let value = serde_json::to_value(parse("2BC")).unwrap();
    assert_eq!(value, json!([{"day": 1, "periods": ["B", "C"]}]));
}

#[test]
fn test_period_table_is_canonical() {
    let symbols: String = PERIODS.iter().map(|p| p.symbol()).collect();
    assert_eq!(symbols, "ABCDZEFGHIJ");
    assert_eq!(period_index('E'), Some(5));
    assert_eq!(period_index('z'), Some(4));
    assert_eq!(period_index('K'), None);
    assert!(Period::D < Period::Z && Period::Z < Period::E);
    assert!(!Period::D.is_followed_by(Period::E));
    assert!(Period::E.is_followed_by(Period::F));
}
