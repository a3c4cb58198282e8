//! Layout engine for the weekly timetable grid.
//!
//! This module handles:
//! - Mapping each occurrence's period letters onto canonical grid rows
//! - Row spans for non-overlapping courses
//! - Nested sub-grids with per-column spans for overlap clusters
//! - Assembling placements into the outer grid with the fixed lunch row

mod engine;
mod grid;
mod spans;

pub use engine::{course_cell, layout_cluster, ClusterLayout, LayoutContext, Placement};
pub use grid::TimetableBuilder;
pub use spans::{canonical_runs, presence_runs, Run};
