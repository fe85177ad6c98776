//! Display and output formatting utilities

use crate::game_of_life::GridState;
use crate::session::Playback;
use serde::Serialize;

/// Terminal renderings of a grid
pub struct BoardFormatter;

impl BoardFormatter {
    /// Format a grid in compact form, one text row per y
    pub fn format_grid_compact(grid: &GridState) -> String {
        let mut output = String::with_capacity(grid.height() * (grid.width() * 3 + 1));
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                output.push(if grid.get_cell(x, y) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &GridState) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for y in 0..grid.height() {
            output.push_str(&format!("{:2} ", y));
            for x in 0..grid.width() {
                output.push_str(if grid.get_cell(x, y) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Frame shown for each tick of a playing session
    pub fn format_frame(grid: &GridState, epoch: u64, playback: Playback) -> String {
        format!(
            "Epoch {} ({}) - living: {}\n{}",
            epoch,
            playback,
            grid.living_count(),
            Self::format_grid_compact(grid)
        )
    }
}

/// Headline numbers for a board
#[derive(Debug, Clone, Serialize)]
pub struct BoardSummary {
    pub width: usize,
    pub height: usize,
    pub living: usize,
    pub density: f64,
    pub living_cells: Vec<(usize, usize)>,
}

impl BoardSummary {
    pub fn of(grid: &GridState) -> Self {
        let living = grid.living_count();
        Self {
            width: grid.width(),
            height: grid.height(),
            living,
            density: living as f64 / grid.cell_count() as f64,
            living_cells: grid.living_cells(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Green,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Blue => 34,
        }
    }
}
