//! Run detection for row spans.

use crate::period::Period;

/// A maximal run of consecutive positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub len: usize,
}

impl Run {
    /// One past the last position of the run.
    pub fn end(self) -> usize {
        self.start + self.len
    }

    /// True for positions inside the run after its first one.
    pub fn covers(self, idx: usize) -> bool {
        idx > self.start && idx < self.end()
    }

    /// Run length as a rowspan.
    pub fn rowspan(self) -> u32 {
        rowspan(self.len)
    }
}

/// Convert a row count into a rowspan value.
pub fn rowspan(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Maximal runs of `true` in a presence mask.
pub fn presence_runs(presence: &[bool]) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut current: Option<Run> = None;

    for (idx, &present) in presence.iter().enumerate() {
        match (present, current.as_mut()) {
            (true, Some(run)) => run.len += 1,
            (true, None) => current = Some(Run { start: idx, len: 1 }),
            (false, _) => {
                if let Some(run) = current.take() {
                    runs.push(run);
                }
            }
        }
    }
    if let Some(run) = current {
        runs.push(run);
    }
    runs
}

/// Split canonically sorted periods into runs of adjacent grid rows.
///
/// `D` and `E` are not adjacent: the lunch row sits between them.
pub fn canonical_runs(periods: &[Period]) -> Vec<Vec<Period>> {
    let mut runs: Vec<Vec<Period>> = Vec::new();
    for &period in periods {
        match runs.last_mut() {
            Some(run) if run.last().is_some_and(|&prev| prev.is_followed_by(period)) => {
                run.push(period);
            }
            _ => runs.push(vec![period]),
        }
    }
    runs
}
