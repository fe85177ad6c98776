//! Conway's Game of Life on a toroidal grid
//!
//! This library provides a double-buffered grid, the epoch engine that steps
//! it, a flat text encoding for saving and loading boards, and the session
//! state an interactive front end drives.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod session;
pub mod utils;

pub use config::Settings;
pub use error::LifeError;
pub use game_of_life::{EpochEngine, GridState, StateCodec};
pub use session::{Playback, Session};
