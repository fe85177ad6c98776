//! Game of Life core functionality

pub mod grid;
pub mod rules;
pub mod io;

pub use grid::GridState;
pub use rules::EpochEngine;
pub use io::{create_example_boards, StateCodec};
