//! Text-format puzzle ingestion.
//!
//! A puzzle file holds one or more puzzles. Each starts with a header line
//! `<id>) <size> <max-ship-size>`, followed by `size` grid rows over the
//! cell alphabet (whitespace between cells is ignored), one line of `size`
//! row sums and one line of `size` column sums. Blank lines and lines
//! starting with `#` between puzzles are skipped.

use crate::board::Board;
use crate::common::PuzzleError;
use crate::tile::Value;
use core::fmt;

/// Errors produced while parsing a puzzle file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A header line was malformed or missing.
    Header { line: usize },
    /// A grid cell character is outside the alphabet.
    Cell { line: usize, col: usize, ch: char },
    /// A grid row has the wrong number of cells.
    RowLength { line: usize, expected: usize },
    /// A sum line was missing or did not hold the expected count of integers.
    Sums { line: usize, expected: usize },
    /// The file ended in the middle of a puzzle.
    Truncated,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Header { line } => {
                write!(f, "line {line}: expected a puzzle header `<id>) <size> <max-ship>`")
            }
            ParseError::Cell { line, col, ch } => {
                write!(f, "line {line}, cell {col}: invalid character {ch:?}")
            }
            ParseError::RowLength { line, expected } => {
                write!(f, "line {line}: expected {expected} cells")
            }
            ParseError::Sums { line, expected } => {
                write!(f, "line {line}: expected {expected} lane sums")
            }
            ParseError::Truncated => write!(f, "file ended in the middle of a puzzle"),
        }
    }
}

impl std::error::Error for ParseError {}

/// One parsed puzzle, not yet turned into a live board.
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub name: String,
    pub size: usize,
    pub max_ship_size: usize,
    pub cells: Vec<Vec<Value>>,
    pub row_sums: Vec<usize>,
    pub col_sums: Vec<usize>,
}

impl Puzzle {
    /// Parses every puzzle in `input`.
    pub fn parse_all(input: &str) -> Result<Vec<Puzzle>, ParseError> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l))
            .filter(|(_, l)| {
                let t = l.trim();
                !t.is_empty() && !t.starts_with('#')
            });
        let mut puzzles = Vec::new();
        while let Some((line_no, header)) = lines.next() {
            let (name, size, max_ship_size) =
                parse_header(header).ok_or(ParseError::Header { line: line_no })?;
            let mut cells = Vec::with_capacity(size);
            for _ in 0..size {
                let (line_no, row) = lines.next().ok_or(ParseError::Truncated)?;
                cells.push(parse_row(row, size, line_no)?);
            }
            let (line_no, row_line) = lines.next().ok_or(ParseError::Truncated)?;
            let row_sums = parse_sums(row_line, size, line_no)?;
            let (line_no, col_line) = lines.next().ok_or(ParseError::Truncated)?;
            let col_sums = parse_sums(col_line, size, line_no)?;
            puzzles.push(Puzzle {
                name,
                size,
                max_ship_size,
                cells,
                row_sums,
                col_sums,
            });
        }
        Ok(puzzles)
    }

    /// Builds a live board from the puzzle, applying every non-blank clue.
    ///
    /// Clue application cascades normally; the journal is cleared afterwards
    /// so the audit trail starts at the solve proper.
    pub fn to_board(&self) -> Result<Board, PuzzleError> {
        let mut board = Board::new(
            self.name.clone(),
            self.size,
            self.max_ship_size,
            self.row_sums.clone(),
            self.col_sums.clone(),
        )?;
        for (r, row) in self.cells.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value != Value::Blank {
                    board.set_value(r, c, value)?;
                }
            }
        }
        board.clear_journal();
        Ok(board)
    }
}

fn parse_header(line: &str) -> Option<(String, usize, usize)> {
    let mut parts = line.split_whitespace();
    let id = parts.next()?.strip_suffix(')')?;
    if id.is_empty() {
        return None;
    }
    let size: usize = parts.next()?.parse().ok()?;
    let max_ship_size: usize = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((id.to_string(), size, max_ship_size))
}

fn parse_row(line: &str, size: usize, line_no: usize) -> Result<Vec<Value>, ParseError> {
    let mut row = Vec::with_capacity(size);
    for (col, ch) in line.chars().filter(|c| !c.is_whitespace()).enumerate() {
        let value = Value::from_char(ch).ok_or(ParseError::Cell {
            line: line_no,
            col,
            ch,
        })?;
        row.push(value);
    }
    if row.len() != size {
        return Err(ParseError::RowLength {
            line: line_no,
            expected: size,
        });
    }
    Ok(row)
}

fn parse_sums(line: &str, size: usize, line_no: usize) -> Result<Vec<usize>, ParseError> {
    let sums: Vec<usize> = line
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| ParseError::Sums {
            line: line_no,
            expected: size,
        })?;
    if sums.len() != size {
        return Err(ParseError::Sums {
            line: line_no,
            expected: size,
        });
    }
    Ok(sums)
}
