//! Terminal output helpers

pub mod display;

pub use display::{BoardFormatter, BoardSummary, ColorOutput};
