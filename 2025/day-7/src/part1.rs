use std::collections::HashSet;

use glam::IVec2;
use miette::*;

use crate::error::GridError;
use crate::grid::{Cell, Grid, DOWN, LEFT, RIGHT};

/// Counts how many times a beam is split on its way down the manifold.
///
/// Beams advance one row per tick. A position is only ever occupied by the
/// first beam to reach it: every later arrival is dropped, so each cell is
/// processed at most once and the count never exceeds the number of cells.
#[tracing::instrument(level = "debug", skip(grid), ret)]
pub fn simulate_beams(grid: &Grid) -> Result<usize, GridError> {
    let start = grid.start()?;

    let mut beams = vec![start];
    let mut visited: HashSet<IVec2> = HashSet::new();
    let mut total_splits = 0;
    let mut tick = 0;

    while !beams.is_empty() {
        tick += 1;
        tracing::trace!(tick, frontier = beams.len());

        let mut next_beams = Vec::with_capacity(beams.len());
        // `insert` returns false for positions another beam already claimed
        let mut enqueue = |beam: IVec2| {
            if visited.insert(beam) {
                next_beams.push(beam);
            }
        };

        for beam in beams {
            let beam = beam + DOWN;

            match grid.get(beam) {
                // Off the bottom or outside this row
                None => {}
                Some(Cell::Splitter) => {
                    total_splits += 1;
                    // Both halves leave from the splitter's row
                    enqueue(beam + LEFT);
                    enqueue(beam + RIGHT);
                }
                Some(Cell::Empty) => enqueue(beam),
                Some(Cell::Start | Cell::Other(_)) => {}
            }
        }

        beams = next_beams;
    }

    Ok(total_splits)
}

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let grid = Grid::parse(input)?;
    let total_splits = simulate_beams(&grid)?;
    Ok(total_splits.to_string())
}
