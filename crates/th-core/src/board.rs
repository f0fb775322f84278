//! Board grid parsing and cell classification.
//!
//! A board is described by plain text: one row per line, each character one
//! of `#` (blocked), `.` (clear) or `X` (clear, starting position).

use std::fmt;

use thiserror::Error;

use crate::command::Direction;

/// A grid coordinate, row first.
///
/// Identity is value equality, so cells can live in sets and be compared
/// directly against freshly computed coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell one unit step away in `direction`.
    pub const fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Classification of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Clear,
    Blocked,
    /// The starting position. Clear for every movement purpose.
    Start,
}

impl CellKind {
    /// Map a board-file character to its classification.
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' => Some(CellKind::Clear),
            '#' => Some(CellKind::Blocked),
            'X' => Some(CellKind::Start),
            _ => None,
        }
    }

    /// The base symbol used when rendering this cell.
    pub const fn symbol(self) -> char {
        match self {
            CellKind::Blocked => '#',
            CellKind::Clear | CellKind::Start => '.',
        }
    }

    pub const fn is_clear(self) -> bool {
        matches!(self, CellKind::Clear | CellKind::Start)
    }
}

/// Errors raised while parsing a board description.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("empty board data")]
    Empty,

    #[error("row {row} is empty")]
    EmptyRow { row: usize },

    #[error("invalid character '{symbol}' on the grid at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },

    #[error("row {row} has {got} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("board has no starting cell 'X'")]
    MissingStart,
}

/// A parsed board: immutable for the lifetime of a game.
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    grid: Vec<Vec<CellKind>>,
    /// Clear cells in parse order; the sampling pool for treasure candidates.
    clear: Vec<Cell>,
    start: Cell,
}

impl Board {
    /// Parse a board from its text description.
    ///
    /// Trailing newlines and CRLF line endings are tolerated. If several `X`
    /// cells appear, the last one is the starting position.
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        let mut grid = Vec::new();
        let mut clear = Vec::new();
        let mut start = None;
        let mut cols = None;

        for (row, line) in text.lines().enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                return Err(BoardError::EmptyRow { row });
            }
            let expected = *cols.get_or_insert(line.chars().count());
            let got = line.chars().count();
            if got != expected {
                return Err(BoardError::RaggedRow { row, got, expected });
            }

            let mut row_kinds = Vec::with_capacity(got);
            for (col, symbol) in line.chars().enumerate() {
                let kind = CellKind::from_symbol(symbol).ok_or(BoardError::UnknownSymbol {
                    symbol,
                    row,
                    col,
                })?;
                let cell = Cell::new(row as i32, col as i32);
                if kind.is_clear() {
                    clear.push(cell);
                }
                if kind == CellKind::Start {
                    start = Some(cell);
                }
                row_kinds.push(kind);
            }
            grid.push(row_kinds);
        }

        if grid.is_empty() {
            return Err(BoardError::Empty);
        }
        let start = start.ok_or(BoardError::MissingStart)?;

        Ok(Self {
            rows: grid.len(),
            cols: cols.unwrap_or(0),
            grid,
            clear,
            start,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    /// Every clear cell (including the start), in parse order.
    pub fn clear_cells(&self) -> &[Cell] {
        &self.clear
    }

    /// Classification of a cell, if it lies on the board.
    pub fn kind(&self, cell: Cell) -> Option<CellKind> {
        if cell.row < 0 || cell.col < 0 {
            return None;
        }
        self.grid
            .get(cell.row as usize)
            .and_then(|row| row.get(cell.col as usize))
            .copied()
    }

    /// Whether the player may occupy `cell`. Off-board cells are not clear.
    pub fn is_clear(&self, cell: Cell) -> bool {
        self.kind(cell).is_some_and(CellKind::is_clear)
    }

    /// Whether `cell` holds an obstacle. Off-board cells are not blocked;
    /// the locked-mode loss rule only fires on explicit obstacles.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.kind(cell) == Some(CellKind::Blocked)
    }
}
