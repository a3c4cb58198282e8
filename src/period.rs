//! The fixed period grid: canonical period order, clock times and day labels.
//!
//! Every ordering decision in the crate (bucket keys, overlap unions, row
//! spans) goes through [`Period`] and [`period_index`], so there is exactly
//! one definition of "canonical order".

use serde::{Deserialize, Serialize};

/// Number of weekday columns in the grid (Monday to Friday).
pub const WEEKDAYS: usize = 5;

/// Weekday labels shown above the day columns.
pub const DAY_LABELS: [&str; WEEKDAYS] = ["一", "二", "三", "四", "五"];

/// A named timetable slot within a day.
///
/// Variants are declared in canonical order, so the derived `Ord` is the
/// canonical order. `Z` is the lunch break and never holds a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Period {
    A,
    B,
    C,
    D,
    Z,
    E,
    F,
    G,
    H,
    I,
    J,
}

/// All periods in canonical order.
pub const PERIODS: [Period; 11] = [
    Period::A,
    Period::B,
    Period::C,
    Period::D,
    Period::Z,
    Period::E,
    Period::F,
    Period::G,
    Period::H,
    Period::I,
    Period::J,
];

impl Period {
    /// Look up a period by its letter (case-insensitive).
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'Z' => Some(Self::Z),
            'E' => Some(Self::E),
            'F' => Some(Self::F),
            'G' => Some(Self::G),
            'H' => Some(Self::H),
            'I' => Some(Self::I),
            'J' => Some(Self::J),
            _ => None,
        }
    }

    /// The letter code of this period.
    pub const fn symbol(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::Z => 'Z',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
            Self::H => 'H',
            Self::I => 'I',
            Self::J => 'J',
        }
    }

    /// Position of this period in [`PERIODS`] (0 = `A`, 4 = `Z`, 10 = `J`).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// True for the reserved lunch slot.
    pub const fn is_lunch(self) -> bool {
        matches!(self, Self::Z)
    }

    /// Start and end clock times, e.g. `("8:10", "9:00")` for `A`.
    pub const fn times(self) -> (&'static str, &'static str) {
        match self {
            Self::A => ("8:10", "9:00"),
            Self::B => ("9:10", "10:00"),
            Self::C => ("10:10", "11:00"),
            Self::D => ("11:10", "12:00"),
            Self::Z => ("12:10", "13:00"),
            Self::E => ("13:10", "14:00"),
            Self::F => ("14:10", "15:00"),
            Self::G => ("15:10", "16:00"),
            Self::H => ("16:10", "17:00"),
            Self::I => ("17:10", "18:00"),
            Self::J => ("18:10", "19:00"),
        }
    }

    /// True when `other` directly follows `self` in canonical order.
    pub const fn is_followed_by(self, other: Self) -> bool {
        self.index() + 1 == other.index()
    }
}

/// Canonical position of a period letter, or `None` for letters outside the grid.
pub fn period_index(symbol: char) -> Option<usize> {
    Period::from_symbol(symbol).map(Period::index)
}

/// Sort key for a raw period letter: canonical letters first in grid order,
/// anything else afterwards.
pub(crate) fn symbol_rank(symbol: char) -> usize {
    period_index(symbol).unwrap_or(PERIODS.len())
}
