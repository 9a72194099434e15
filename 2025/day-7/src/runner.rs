use std::fmt::Display;
use std::path::Path;

use miette::Report;

use crate::error::GridError;
use crate::grid::Grid;

/// Files each part is run against, in order, relative to the crate root.
pub const INPUTS: [&str; 2] = ["example.txt", "input.txt"];

/// Loads `name` from `dir`, solves it and renders the `<file>: <answer>`
/// line. A file that cannot be read or solved is logged and reported as
/// having no input.
pub fn solve_file<T, F>(dir: &Path, name: &str, solve: F) -> String
where
    T: Display,
    F: FnOnce(&Grid) -> Result<T, GridError>,
{
    let answer = Grid::load(dir.join(name)).and_then(|grid| {
        tracing::debug!(
            file = name,
            rows = grid.height(),
            cells = grid.cell_count(),
            "loaded grid"
        );
        tracing::trace!("\n{grid}");
        solve(&grid)
    });

    match answer {
        Ok(answer) => format!("{}: {}", name, answer),
        Err(err) => {
            tracing::warn!(file = name, error = ?Report::new(err), "skipping input");
            format!("{}: No input found", name)
        }
    }
}
