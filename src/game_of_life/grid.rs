//! Double-buffered toroidal grid for Game of Life

use crate::error::{LifeError, Result};
use rand::Rng;
use std::fmt;

/// Probability that `randomize` brings a cell to life.
pub const RANDOM_FILL_PROBABILITY: f64 = 0.25;

/// Cell grid held in two buffers.
///
/// The front buffer is the displayed, editable state. The back buffer is
/// scratch space the epoch engine writes the next generation into before
/// the two trade places via [`GridState::swap`]. Cell `(x, y)` is stored at
/// `x * height + y` in both buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    width: usize,
    height: usize,
    buffers: [Vec<bool>; 2],
    front: usize,
}

impl GridState {
    /// Create a grid with every cell dead in both buffers.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive, got {width}x{height}");
        Self {
            width,
            height,
            buffers: [vec![false; width * height], vec![false; width * height]],
            front: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells in one buffer
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Whether `(x, y)` names a cell of this grid
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Clamp arbitrary coordinates onto the nearest cell.
    pub fn clamp(&self, x: usize, y: usize) -> (usize, usize) {
        (x.min(self.width - 1), y.min(self.height - 1))
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            self.contains(x, y),
            "cell ({x}, {y}) out of bounds for {}x{} grid",
            self.width,
            self.height
        );
        x * self.height + y
    }

    fn checked_index(&self, x: usize, y: usize) -> Result<usize> {
        if self.contains(x, y) {
            Ok(x * self.height + y)
        } else {
            Err(LifeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Read a cell from the front buffer.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the grid.
    pub fn get_cell(&self, x: usize, y: usize) -> bool {
        self.buffers[self.front][self.index(x, y)]
    }

    /// Write a cell in the front buffer.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the grid.
    pub fn set_cell(&mut self, x: usize, y: usize, value: bool) {
        let idx = self.index(x, y);
        self.buffers[self.front][idx] = value;
    }

    /// Flip a cell in the front buffer and return its new value.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the grid.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> bool {
        let idx = self.index(x, y);
        let cell = &mut self.buffers[self.front][idx];
        *cell = !*cell;
        *cell
    }

    pub fn try_get_cell(&self, x: usize, y: usize) -> Result<bool> {
        let idx = self.checked_index(x, y)?;
        Ok(self.buffers[self.front][idx])
    }

    pub fn try_set_cell(&mut self, x: usize, y: usize, value: bool) -> Result<()> {
        let idx = self.checked_index(x, y)?;
        self.buffers[self.front][idx] = value;
        Ok(())
    }

    pub fn try_toggle_cell(&mut self, x: usize, y: usize) -> Result<bool> {
        self.checked_index(x, y)?;
        Ok(self.toggle_cell(x, y))
    }

    /// Fill the front buffer at random using the thread-local generator.
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::rng());
    }

    /// Fill the front buffer at random, each cell alive with probability
    /// [`RANDOM_FILL_PROBABILITY`] independently of the others.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in self.buffers[self.front].iter_mut() {
            *cell = rng.random_bool(RANDOM_FILL_PROBABILITY);
        }
    }

    /// Kill every cell in the front buffer
    pub fn clear(&mut self) {
        self.buffers[self.front].fill(false);
    }

    /// Exchange front and back buffers. Only the selector moves.
    pub fn swap(&mut self) {
        self.front ^= 1;
    }

    /// Front buffer in storage order (x-major, y-minor)
    pub fn front(&self) -> &[bool] {
        &self.buffers[self.front]
    }

    /// Front buffer for reading and back buffer for writing, used by the
    /// epoch engine while it computes the next generation.
    pub(crate) fn split_buffers(&mut self) -> (&[bool], &mut [bool]) {
        let (first, second) = self.buffers.split_at_mut(1);
        if self.front == 0 {
            (first[0].as_slice(), second[0].as_mut_slice())
        } else {
            (second[0].as_slice(), first[0].as_mut_slice())
        }
    }

    /// Replace the whole front buffer with already-validated cells.
    pub(crate) fn replace_front(&mut self, cells: &[bool]) {
        debug_assert_eq!(cells.len(), self.cell_count());
        self.buffers[self.front].copy_from_slice(cells);
    }

    /// Coordinates of every living cell, x-major
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.front()
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(idx, _)| (idx / self.height, idx % self.height))
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.front().iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.front().iter().all(|&cell| !cell)
    }
}

impl fmt::Display for GridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let symbol = if self.get_cell(x, y) { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
