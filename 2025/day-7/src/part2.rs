use std::collections::HashMap;

use glam::IVec2;
use miette::*;

use crate::error::GridError;
use crate::grid::{Cell, Grid, DOWN, LEFT, RIGHT};

/// Branch taken at the most recent splitter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Start,
    Left,
    Right,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MemoKey {
    pub point: IVec2,
    pub direction: Direction,
}

/// Counts distinct descents through a grid, caching every subtree it has
/// already walked.
///
/// The cache lives as long as the counter, so one counter answers any number
/// of queries against the same grid. Counts are `u128` since every splitter
/// on a path doubles the number of ways down.
pub struct PathCounter<'g> {
    grid: &'g Grid,
    memo: HashMap<MemoKey, u128>,
}

impl<'g> PathCounter<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            memo: HashMap::new(),
        }
    }

    /// Number of paths that leave the grid after moving down from `point`,
    /// or `None` if that number does not fit in a `u128`.
    ///
    /// Dropping below the last row or off the side of a row ends one path.
    /// A splitter forks into the cells left and right of it on the same row,
    /// and any cell that is neither empty nor a splitter is a dead end.
    pub fn count_from(&mut self, point: IVec2, direction: Direction) -> Option<u128> {
        let point = point + DOWN;

        let Some(cell) = self.grid.get(point) else {
            return Some(1);
        };

        let key = MemoKey { point, direction };
        if let Some(&count) = self.memo.get(&key) {
            return Some(count);
        }

        let count = match cell {
            Cell::Splitter => {
                let left = self.count_from(point + LEFT, Direction::Left)?;
                let right = self.count_from(point + RIGHT, Direction::Right)?;
                left.checked_add(right)?
            }
            Cell::Empty => self.count_from(point, direction)?,
            Cell::Start | Cell::Other(_) => 0,
        };

        self.memo.insert(key, count);
        Some(count)
    }

    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }
}

#[tracing::instrument(level = "debug", skip(grid), ret)]
pub fn count_all_paths(grid: &Grid) -> Result<u128, GridError> {
    let start = grid.start()?;

    let mut counter = PathCounter::new(grid);
    let total = counter.count_from(start, Direction::Start);
    tracing::debug!(memo = counter.memo_len(), "path count complete");

    total.ok_or(GridError::Overflow)
}

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let grid = Grid::parse(input)?;
    let total_paths = count_all_paths(&grid)?;
    Ok(total_paths.to_string())
}
