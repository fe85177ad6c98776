//! Game of Life rules and the epoch engine

use super::GridState;
use itertools::iproduct;
use rayon::prelude::*;

/// Steps a [`GridState`] forward one generation at a time.
pub struct EpochEngine;

impl EpochEngine {
    /// Apply the rules to every cell of the front buffer, write the results
    /// into the back buffer, then swap so the new generation becomes front.
    ///
    /// Neighbour counts are read from the front buffer only, so the update
    /// is simultaneous across all cells.
    pub fn advance(grid: &mut GridState) {
        let (width, height) = (grid.width(), grid.height());
        let (front, back) = grid.split_buffers();

        // Each column of the back buffer is owned by exactly one worker
        back.par_chunks_mut(height)
            .enumerate()
            .for_each(|(x, column)| {
                for (y, cell) in column.iter_mut().enumerate() {
                    let neighbours = live_neighbours(front, width, height, x, y);
                    *cell = Self::should_be_alive(front[x * height + y], neighbours);
                }
            });

        grid.swap();
    }

    /// Advance the grid through several epochs
    pub fn advance_by(grid: &mut GridState, epochs: usize) {
        for _ in 0..epochs {
            Self::advance(grid);
        }
    }

    /// Count the live cells around `(x, y)` in the front buffer, wrapping
    /// across the grid edges.
    pub fn count_neighbours(grid: &GridState, x: usize, y: usize) -> u8 {
        assert!(grid.contains(x, y), "cell ({x}, {y}) out of bounds");
        live_neighbours(grid.front(), grid.width(), grid.height(), x, y)
    }

    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbour_count: u8) -> bool {
        matches!((current_state, neighbour_count), (true, 2) | (true, 3) | (false, 3))
    }
}

/// Step `coord` by `delta` on a ring of `len` cells.
#[inline]
fn wrap(coord: usize, delta: isize, len: usize) -> usize {
    (coord as isize + delta).rem_euclid(len as isize) as usize
}

fn live_neighbours(cells: &[bool], width: usize, height: usize, x: usize, y: usize) -> u8 {
    iproduct!(-1isize..=1, -1isize..=1)
        .filter(|&(dx, dy)| dx != 0 || dy != 0)
        .filter(|&(dx, dy)| cells[wrap(x, dx, width) * height + wrap(y, dy, height)])
        .count() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_with(cells: &[(usize, usize)]) -> GridState {
        let mut grid = GridState::new(40, 40);
        for &(x, y) in cells {
            grid.set_cell(x, y, true);
        }
        grid
    }

    fn sorted(mut cells: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
        cells.sort_unstable();
        cells
    }

    /// Straightforward single-threaded reference for comparison
    fn naive_next(grid: &GridState) -> Vec<bool> {
        let (w, h) = (grid.width(), grid.height());
        let mut next = vec![false; w * h];
        for x in 0..w {
            for y in 0..h {
                let mut n = 0;
                for dx in [w - 1, 0, 1] {
                    for dy in [h - 1, 0, 1] {
                        if (dx, dy) != (0, 0) && grid.get_cell((x + dx) % w, (y + dy) % h) {
                            n += 1;
                        }
                    }
                }
                next[x * h + y] = EpochEngine::should_be_alive(grid.get_cell(x, y), n);
            }
        }
        next
    }

    #[test]
    fn test_rule_logic() {
        assert!(!EpochEngine::should_be_alive(true, 0));
        assert!(!EpochEngine::should_be_alive(true, 1));
        assert!(EpochEngine::should_be_alive(true, 2));
        assert!(EpochEngine::should_be_alive(true, 3));
        assert!(!EpochEngine::should_be_alive(true, 4));
        assert!(!EpochEngine::should_be_alive(true, 8));
        assert!(EpochEngine::should_be_alive(false, 3));
        assert!(!EpochEngine::should_be_alive(false, 2));
        assert!(!EpochEngine::should_be_alive(false, 4));
    }

    #[test]
    fn test_single_cell_dies() {
        let mut grid = grid_with(&[(0, 0)]);
        EpochEngine::advance(&mut grid);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_neighbours_wrap_around_corners() {
        let grid = grid_with(&[(39, 39), (39, 0), (0, 39)]);
        assert_eq!(EpochEngine::count_neighbours(&grid, 0, 0), 3);
        assert_eq!(EpochEngine::count_neighbours(&grid, 39, 39), 2);
        assert_eq!(EpochEngine::count_neighbours(&grid, 20, 20), 0);
    }

    #[test]
    fn test_birth_across_the_seam() {
        let mut grid = grid_with(&[(39, 39), (39, 0), (0, 39)]);
        EpochEngine::advance(&mut grid);
        // The L-shaped triomino becomes a block straddling the corner
        assert_eq!(
            sorted(grid.living_cells()),
            vec![(0, 0), (0, 39), (39, 0), (39, 39)]
        );
    }

    #[test]
    fn test_still_life_block() {
        let block = [(5, 5), (5, 6), (6, 5), (6, 6)];
        let mut grid = grid_with(&block);

        for &(x, y) in &block {
            assert_eq!(EpochEngine::count_neighbours(&grid, x, y), 3);
        }
        assert_eq!(EpochEngine::count_neighbours(&grid, 4, 4), 1);
        assert_eq!(EpochEngine::count_neighbours(&grid, 4, 5), 2);
        assert_eq!(EpochEngine::count_neighbours(&grid, 7, 6), 2);
        assert_eq!(EpochEngine::count_neighbours(&grid, 7, 7), 1);
        assert_eq!(EpochEngine::count_neighbours(&grid, 8, 5), 0);

        for _ in 0..25 {
            EpochEngine::advance(&mut grid);
            assert_eq!(sorted(grid.living_cells()), block.to_vec());
        }
    }

    #[test]
    fn test_oscillator_blinker() {
        let mut grid = grid_with(&[(10, 9), (10, 10), (10, 11)]);

        EpochEngine::advance(&mut grid);
        assert_eq!(sorted(grid.living_cells()), vec![(9, 10), (10, 10), (11, 10)]);

        EpochEngine::advance(&mut grid);
        assert_eq!(sorted(grid.living_cells()), vec![(10, 9), (10, 10), (10, 11)]);
    }

    #[test]
    fn test_glider_circles_the_torus() {
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let mut grid = grid_with(&glider);

        EpochEngine::advance_by(&mut grid, 4);
        let shifted: Vec<_> = glider.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
        assert_eq!(sorted(grid.living_cells()), sorted(shifted));

        // 4 epochs per diagonal step, 40 steps to come home
        EpochEngine::advance_by(&mut grid, 4 * 39);
        assert_eq!(sorted(grid.living_cells()), sorted(glider.to_vec()));
    }

    #[test]
    fn test_matches_reference_on_random_soup() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = GridState::new(40, 40);
        grid.randomize_with(&mut rng);

        for _ in 0..10 {
            let expected = naive_next(&grid);
            EpochEngine::advance(&mut grid);
            assert_eq!(grid.front(), expected.as_slice());
        }
    }

    #[test]
    fn test_stale_back_buffer_never_leaks() {
        let mut grid = GridState::new(40, 40);
        // Fill what will be the back buffer with noise, then return to an empty front
        grid.swap();
        grid.randomize_with(&mut StdRng::seed_from_u64(3));
        grid.swap();
        grid.set_cell(10, 9, true);
        grid.set_cell(10, 10, true);
        grid.set_cell(10, 11, true);

        let before = grid.clone();
        EpochEngine::advance(&mut grid);

        assert_eq!(before.living_cells(), vec![(10, 9), (10, 10), (10, 11)]);
        assert_eq!(sorted(grid.living_cells()), vec![(9, 10), (10, 10), (11, 10)]);
    }

    #[test]
    fn test_non_square_grid_wraps_each_axis() {
        let mut grid = GridState::new(7, 5);
        // Horizontal blinker crossing the x seam
        grid.set_cell(6, 2, true);
        grid.set_cell(0, 2, true);
        grid.set_cell(1, 2, true);

        EpochEngine::advance(&mut grid);
        assert_eq!(sorted(grid.living_cells()), vec![(0, 1), (0, 2), (0, 3)]);

        EpochEngine::advance(&mut grid);
        assert_eq!(sorted(grid.living_cells()), vec![(0, 2), (1, 2), (6, 2)]);
    }
}
