//! Persistence of the front buffer as a flat line of '0'/'1' characters
//!
//! The encoding holds `width * height` characters with no separators,
//! written for x from 0 to width-1 and, within each x, y from 0 to
//! height-1. Dimensions are not stored; reader and writer must agree on
//! them through configuration.

use super::GridState;
use crate::config::DecodePolicy;
use crate::error::{LifeError, Result};
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info};

/// Reads and writes boards in the flat character encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateCodec {
    policy: DecodePolicy,
}

impl StateCodec {
    pub fn new(policy: DecodePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// Encode the front buffer as exactly `width * height` characters
    pub fn encode(grid: &GridState) -> String {
        grid.front()
            .iter()
            .map(|&alive| if alive { '1' } else { '0' })
            .collect()
    }

    /// Write the encoding to any byte sink.
    pub fn write_to<W: Write>(grid: &GridState, mut writer: W) -> Result<()> {
        writer.write_all(Self::encode(grid).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Save the front buffer to `path`.
    ///
    /// The board is written to a sibling temporary file which is then
    /// renamed over `path`, so a failed save never leaves a partial board.
    pub fn save<P: AsRef<Path>>(grid: &GridState, path: P) -> Result<()> {
        let path = path.as_ref();
        let file_error = |source| LifeError::File {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(file_error)?;
        }

        let mut staging = path.as_os_str().to_owned();
        staging.push(".tmp");
        let staging = Path::new(&staging);

        if let Err(source) = fs::write(staging, Self::encode(grid)) {
            let _ = fs::remove_file(staging);
            return Err(file_error(source));
        }
        fs::rename(staging, path).map_err(|source| {
            let _ = fs::remove_file(staging);
            file_error(source)
        })?;

        info!(path = %path.display(), living = grid.living_count(), "Board saved");
        Ok(())
    }

    /// Decode `input` into the grid's front buffer.
    ///
    /// Only the first line is considered and a trailing line terminator is
    /// ignored. Decoding is all-or-nothing: on any error the grid is left
    /// exactly as it was.
    pub fn decode_into(&self, grid: &mut GridState, input: &str) -> Result<()> {
        let line = input.lines().next().unwrap_or("");
        let cells = self.decode_line(line, grid.width(), grid.height())?;
        grid.replace_front(&cells);
        Ok(())
    }

    /// Decode the first line read from `reader` into the grid.
    pub fn read_from<R: BufRead>(&self, grid: &mut GridState, mut reader: R) -> Result<()> {
        let mut line = Vec::new();
        reader.read_until(b'\n', &mut line)?;
        self.decode_bytes(grid, &line)
    }

    /// Decode raw board bytes into the grid.
    ///
    /// Bytes that are not valid UTF-8 decode as U+FFFD, one replacement per
    /// invalid sequence, so they count as live cells under the permissive
    /// policy and are rejected under the strict one.
    pub fn decode_bytes(&self, grid: &mut GridState, input: &[u8]) -> Result<()> {
        self.decode_into(grid, &String::from_utf8_lossy(input))
    }

    /// Load a board from `path` into the grid's front buffer.
    pub fn load<P: AsRef<Path>>(&self, grid: &mut GridState, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read(path).map_err(|source| LifeError::File {
            path: path.to_path_buf(),
            source,
        })?;

        self.decode_bytes(grid, &content)?;
        info!(path = %path.display(), living = grid.living_count(), "Board loaded");
        Ok(())
    }

    fn decode_line(&self, line: &str, width: usize, height: usize) -> Result<Vec<bool>> {
        let expected = width * height;
        let mut cells = Vec::with_capacity(expected);

        for (index, ch) in line.chars().take(expected).enumerate() {
            let alive = match (ch, self.policy) {
                ('0', _) => false,
                ('1', _) | (_, DecodePolicy::Permissive) => true,
                (_, DecodePolicy::Strict) => {
                    return Err(LifeError::MalformedCharacter {
                        character: ch,
                        index,
                        x: index / height,
                        y: index % height,
                    })
                }
            };
            cells.push(alive);
        }

        if cells.len() < expected {
            return Err(LifeError::TruncatedInput {
                expected,
                actual: cells.len(),
            });
        }

        let surplus = line.chars().count() - expected;
        if surplus > 0 {
            debug!(surplus, "Ignoring characters past the end of the board");
        }

        Ok(cells)
    }
}

/// Write example boards, sized for `width` x `height`, into `output_dir`.
///
/// Existing boards are kept unless `overwrite` is set. Returns how many
/// boards were written.
pub fn create_example_boards<P: AsRef<Path>>(
    output_dir: P,
    width: usize,
    height: usize,
    overwrite: bool,
) -> Result<usize> {
    let dir = output_dir.as_ref();
    let examples: [(&str, &[(usize, usize)]); 3] = [
        ("block.txt", &[(5, 5), (5, 6), (6, 5), (6, 6)]),
        ("blinker.txt", &[(10, 9), (10, 10), (10, 11)]),
        ("glider.txt", &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]),
    ];

    let mut written = 0;
    for (name, cells) in examples {
        let path = dir.join(name);
        if path.exists() && !overwrite {
            debug!(path = %path.display(), "Keeping existing example board");
            continue;
        }

        let mut grid = GridState::new(width, height);
        for &(x, y) in cells {
            if grid.contains(x, y) {
                grid.set_cell(x, y, true);
            }
        }
        StateCodec::save(&grid, &path)?;
        written += 1;
    }

    Ok(written)
}
