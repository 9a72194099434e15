use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use miette::Diagnostic;

/// Failures that keep a grid from producing an answer.
///
/// A grid that loads and has a start marker never fails: beams or paths that
/// run into short rows just stop, and an answer of zero is a real answer.
#[derive(Debug, Diagnostic)]
pub enum GridError {
    #[diagnostic(code(day7::io))]
    Io { path: PathBuf, source: io::Error },

    #[diagnostic(code(day7::parse))]
    Parse(String),

    #[diagnostic(code(day7::empty_grid))]
    EmptyGrid,

    #[diagnostic(
        code(day7::missing_start),
        help("the first row must contain an 'S' marking where the beam enters")
    )]
    MissingStart,

    #[diagnostic(code(day7::too_wide))]
    TooWide { column: usize },

    #[diagnostic(
        code(day7::overflow),
        help("the grid has more ways down than fit in 128 bits")
    )]
    Overflow,
}

impl fmt::Display for GridError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io { path, .. } => write!(fmt, "could not read {}", path.display()),
            Self::Parse(reason) => write!(fmt, "parse failed: {reason}"),
            Self::EmptyGrid => write!(fmt, "grid has no rows"),
            Self::MissingStart => write!(fmt, "no start position 'S' found in the first row"),
            Self::TooWide { column } => write!(fmt, "column {column} is too far right to address"),
            Self::Overflow => write!(fmt, "path count overflowed"),
        }
    }
}

impl error::Error for GridError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
