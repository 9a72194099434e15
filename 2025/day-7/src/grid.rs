use std::fmt;
use std::fs;
use std::path::Path;

use chumsky::prelude::*;
use glam::IVec2;
use itertools::Itertools;

use crate::error::GridError;

/// One row further down the manifold.
pub const DOWN: IVec2 = IVec2::Y;
pub const LEFT: IVec2 = IVec2::NEG_X;
pub const RIGHT: IVec2 = IVec2::X;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Cell {
    Empty,
    Splitter,
    Start,
    /// Anything else. Beams and paths cannot pass through it.
    Other(char),
}

impl From<char> for Cell {
    fn from(c: char) -> Self {
        match c {
            '.' => Cell::Empty,
            '^' => Cell::Splitter,
            'S' => Cell::Start,
            other => Cell::Other(other),
        }
    }
}

impl From<Cell> for char {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => '.',
            Cell::Splitter => '^',
            Cell::Start => 'S',
            Cell::Other(c) => c,
        }
    }
}

/// The manifold as read from the puzzle input.
///
/// Rows keep whatever length they had in the input. Points are `IVec2` with
/// `x` as the column and `y` as the row, so a beam stepping left off column
/// zero is just another point outside the grid.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Vec<Cell>>, extra::Err<Rich<'a, char>>> {
    let cell = any()
        .filter(|c: &char| *c != '\n' && *c != '\r')
        .map(Cell::from);

    cell.repeated()
        .collect::<Vec<_>>()
        .separated_by(text::newline())
        .allow_trailing()
        .collect::<Vec<_>>()
}

impl Grid {
    pub fn parse(input: &str) -> Result<Self, GridError> {
        let mut rows = parser()
            .parse(input)
            .into_result()
            .map_err(|e| GridError::Parse(format!("{:?}", e)))?;

        // A trailing newline leaves empty rows behind; both algorithms treat
        // them exactly like the space below the last row.
        while rows.last().is_some_and(Vec::is_empty) {
            rows.pop();
        }

        Ok(Grid { rows })
    }

    /// Reads and parses the grid stored at `path`.
    #[tracing::instrument(level = "debug", skip(path), fields(file = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| GridError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&input)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Returns the cell at `point`, or `None` if the point lies above, left
    /// of, or below the grid, or past the end of its own row.
    pub fn get(&self, point: IVec2) -> Option<Cell> {
        let row = usize::try_from(point.y).ok()?;
        let col = usize::try_from(point.x).ok()?;
        self.rows.get(row)?.get(col).copied()
    }

    /// Column of the first 'S' in the first row. Markers on later rows are
    /// ignored.
    pub fn start_column(&self) -> Result<usize, GridError> {
        let first = self.rows.first().ok_or(GridError::EmptyGrid)?;
        first
            .iter()
            .position(|&cell| cell == Cell::Start)
            .ok_or(GridError::MissingStart)
    }

    pub fn start(&self) -> Result<IVec2, GridError> {
        top_row_point(self.start_column()?)
    }
}

fn top_row_point(column: usize) -> Result<IVec2, GridError> {
    let x = i32::try_from(column).map_err(|_| GridError::TooWide { column })?;
    Ok(IVec2::new(x, 0))
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .rows
            .iter()
            .map(|row| row.iter().copied().map(char::from).collect::<String>())
            .join("\n");
        write!(f, "{}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case('.', Cell::Empty)]
    #[case('^', Cell::Splitter)]
    #[case('S', Cell::Start)]
    #[case('#', Cell::Other('#'))]
    #[case(' ', Cell::Other(' '))]
    fn classifies_cells(#[case] c: char, #[case] expected: Cell) {
        assert_eq!(expected, Cell::from(c));
        assert_eq!(c, char::from(expected));
    }

    #[test]
    fn keeps_ragged_rows() -> miette::Result<()> {
        let grid = Grid::parse("S..\n.\n.^.#")?;
        assert_eq!(3, grid.height());
        assert_eq!(8, grid.cell_count());
        assert_eq!("S..\n.\n.^.#", grid.to_string());
        Ok(())
    }

    #[rstest]
    #[case("S..\n...\n")]
    #[case("S..\r\n...\r\n")]
    #[case("S..\n...\n\n\n")]
    fn drops_trailing_empty_rows(#[case] input: &str) -> miette::Result<()> {
        let grid = Grid::parse(input)?;
        assert_eq!(2, grid.height());
        assert_eq!("S..\n...", grid.to_string());
        Ok(())
    }

    #[test]
    fn keeps_interior_empty_rows() -> miette::Result<()> {
        let grid = Grid::parse("S..\n\n...")?;
        assert_eq!(3, grid.height());
        assert_eq!(None, grid.get(IVec2::new(0, 1)));
        Ok(())
    }

    #[test]
    fn empty_input_is_an_empty_grid() -> miette::Result<()> {
        let grid = Grid::parse("")?;
        assert_eq!(0, grid.height());
        assert!(matches!(grid.start_column(), Err(GridError::EmptyGrid)));
        Ok(())
    }

    #[test]
    fn get_respects_each_row_length() -> miette::Result<()> {
        let grid = Grid::parse("S..\n.\n.^.")?;
        assert_eq!(Some(Cell::Start), grid.get(IVec2::new(0, 0)));
        assert_eq!(Some(Cell::Splitter), grid.get(IVec2::new(1, 2)));
        assert_eq!(None, grid.get(IVec2::new(1, 1)));
        assert_eq!(None, grid.get(IVec2::new(-1, 0)));
        assert_eq!(None, grid.get(IVec2::new(0, -1)));
        assert_eq!(None, grid.get(IVec2::new(0, 3)));
        Ok(())
    }

    #[rstest]
    #[case("S..", 0)]
    #[case("..S", 2)]
    #[case(".S.S", 1)]
    fn finds_start_in_first_row(#[case] input: &str, #[case] expected: usize) -> miette::Result<()> {
        let grid = Grid::parse(input)?;
        assert_eq!(expected, grid.start_column()?);
        assert_eq!(IVec2::new(expected as i32, 0), grid.start()?);
        Ok(())
    }

    #[test]
    fn column_past_i32_is_too_wide() {
        let column = i32::MAX as usize + 1;
        assert!(matches!(
            top_row_point(column),
            Err(GridError::TooWide { column: c }) if c == column
        ));
        assert!(matches!(
            top_row_point(i32::MAX as usize),
            Ok(p) if p == IVec2::new(i32::MAX, 0)
        ));
    }

    #[test]
    fn ignores_start_below_first_row() -> miette::Result<()> {
        let grid = Grid::parse("...\n.S.")?;
        assert!(matches!(grid.start_column(), Err(GridError::MissingStart)));
        Ok(())
    }

    #[test]
    fn load_reports_unreadable_file() {
        let result = Grid::load("this/file/does/not/exist.txt");
        assert!(matches!(result, Err(GridError::Io { .. })));
    }

    #[test]
    fn loads_example_file() -> miette::Result<()> {
        let grid = Grid::load(concat!(env!("CARGO_MANIFEST_DIR"), "/example.txt"))?;
        assert_eq!(16, grid.height());
        assert_eq!(7, grid.start_column()?);
        Ok(())
    }
}
