//! Interactive session: a grid plus the playback and editing state around it
//!
//! A [`Session`] is what an event loop drives. Ticks advance the grid only
//! while playback is running. A press toggles its cell in either state, but
//! drag painting, random fills and clears are accepted only while paused.

pub mod input;
pub mod playback;

pub use input::{cell_at, DragGesture};
pub use playback::Playback;

use crate::config::Settings;
use crate::error::Result;
use crate::game_of_life::{EpochEngine, GridState, StateCodec};
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct Session {
    grid: GridState,
    playback: Playback,
    codec: StateCodec,
    save_path: PathBuf,
    cell_size: u32,
    epoch: u64,
}

impl Session {
    /// Create a paused session with an empty grid sized from `settings`
    pub fn new(settings: &Settings) -> Self {
        Self {
            grid: GridState::new(settings.grid.width, settings.grid.height),
            playback: Playback::Paused,
            codec: StateCodec::new(settings.persistence.decode_policy),
            save_path: settings.persistence.save_path.clone(),
            cell_size: settings.display.cell_size,
            epoch: 0,
        }
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// Epochs advanced since the session started
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn start(&mut self) {
        self.set_playback(Playback::Running);
    }

    pub fn pause(&mut self) {
        self.set_playback(Playback::Paused);
    }

    pub fn toggle_playback(&mut self) {
        self.set_playback(self.playback.toggled());
    }

    fn set_playback(&mut self, playback: Playback) {
        if self.playback != playback {
            info!(%playback, epoch = self.epoch, "Playback changed");
            self.playback = playback;
        }
    }

    /// Advance one epoch if running. Returns whether the grid changed generation.
    pub fn tick(&mut self) -> bool {
        if !self.playback.is_running() {
            return false;
        }
        EpochEngine::advance(&mut self.grid);
        self.epoch += 1;
        true
    }

    /// Advance one epoch regardless of playback state
    pub fn step(&mut self) {
        EpochEngine::advance(&mut self.grid);
        self.epoch += 1;
    }

    pub fn randomize(&mut self) -> bool {
        self.randomize_with(&mut rand::rng())
    }

    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.playback.is_running() {
            return false;
        }
        self.grid.randomize_with(rng);
        debug!(living = self.grid.living_count(), "Grid randomized");
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.playback.is_running() {
            return false;
        }
        self.grid.clear();
        true
    }

    /// Press at pixel `(px, py)`: toggle the cell underneath and begin a
    /// drag gesture. Presses are honoured while running too.
    pub fn begin_drag(&mut self, px: u32, py: u32) -> DragGesture {
        let (x, y) = self.cell_under(px, py);
        let new_value = self.grid.toggle_cell(x, y);
        DragGesture::from_toggle(new_value)
    }

    /// Paint the gesture's value onto the cell under `(px, py)`. Ignored
    /// while running.
    pub fn drag_to(&mut self, gesture: &DragGesture, px: u32, py: u32) {
        if self.playback.is_running() {
            return;
        }
        let (x, y) = self.cell_under(px, py);
        self.grid.set_cell(x, y, gesture.paint());
    }

    /// Finish a gesture; its paint value goes with it.
    pub fn end_drag(gesture: DragGesture) {
        drop(gesture);
    }

    fn cell_under(&self, px: u32, py: u32) -> (usize, usize) {
        cell_at(px, py, self.cell_size, self.grid.width(), self.grid.height())
    }

    /// Persist the front buffer to the configured save path
    pub fn save(&self) -> Result<()> {
        StateCodec::save(&self.grid, &self.save_path)
    }

    /// Replace the front buffer with the board at the configured save path.
    /// On failure the grid is unchanged.
    pub fn load(&mut self) -> Result<()> {
        self.codec.load(&mut self.grid, &self.save_path)
    }
}
