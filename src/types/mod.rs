//! Data types shared across the layout pipeline.

mod grid;
mod record;

pub use grid::*;
pub use record::*;
