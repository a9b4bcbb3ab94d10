//! ASCII board layouts.
//!
//! One text line per grid row. Leading and trailing whitespace and blank lines
//! are ignored, so layouts can be indented inside string literals.
//!
//! | glyph | cell                         |
//! |-------|------------------------------|
//! | `#`   | wall                         |
//! | `.`   | empty floor                  |
//! | `G`   | gem                          |
//! | `S`   | shield                       |
//! | `M`   | mine                         |
//! | `O`   | stop cell                    |
//! | `A`   | agent standing on empty floor |

use slide_gems_core::{Cell, CellCoord, GridSize};
use thiserror::Error;

/// Errors raised while parsing an ASCII layout.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout contained no non-blank rows.
    #[error("layout contains no rows")]
    Empty,
    /// A row differed in width from the first row.
    #[error("row {row} has {found} cells but the first row has {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: u32,
        /// Width of the first row.
        expected: u32,
        /// Width of the offending row.
        found: u32,
    },
    /// A character did not map to any cell type.
    #[error("unknown glyph '{glyph}' at row {row}, column {column}")]
    UnknownGlyph {
        /// Character that failed to parse.
        glyph: char,
        /// Zero-based row of the character.
        row: u32,
        /// Zero-based column of the character.
        column: u32,
    },
    /// No `A` glyph was present.
    #[error("layout does not place the agent")]
    MissingAgent,
    /// More than one `A` glyph was present.
    #[error("agent placed twice, at {first:?} and {second:?}")]
    DuplicateAgent {
        /// First agent position encountered.
        first: CellCoord,
        /// Second agent position encountered.
        second: CellCoord,
    },
    /// The layout dimensions do not fit the coordinate type.
    #[error("layout is too large")]
    TooLarge,
}

/// Grid contents recovered from a layout.
#[derive(Debug)]
pub(crate) struct ParsedLayout {
    pub(crate) size: GridSize,
    pub(crate) cells: Vec<Cell>,
    pub(crate) agent: CellCoord,
}

pub(crate) fn parse(layout: &str) -> Result<ParsedLayout, LayoutError> {
    let rows: Vec<&str> = layout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let Some(first) = rows.first() else {
        return Err(LayoutError::Empty);
    };
    let expected = to_u32(first.chars().count())?;

    let mut cells = Vec::with_capacity(rows.len() * first.len());
    let mut agent: Option<CellCoord> = None;

    for (row_index, line) in rows.iter().enumerate() {
        let row = to_u32(row_index)?;
        let found = to_u32(line.chars().count())?;
        if found != expected {
            return Err(LayoutError::RaggedRow {
                row,
                expected,
                found,
            });
        }

        for (column_index, glyph) in line.chars().enumerate() {
            let column = to_u32(column_index)?;
            let cell = match glyph {
                '#' => Cell::WALL,
                '.' => Cell::EMPTY,
                'G' => Cell::GEM,
                'S' => Cell::SHIELD,
                'M' => Cell::MINE,
                'O' => Cell::STOP,
                'A' => {
                    let here = CellCoord::new(row, column);
                    if let Some(first) = agent {
                        return Err(LayoutError::DuplicateAgent {
                            first,
                            second: here,
                        });
                    }
                    agent = Some(here);
                    Cell::EMPTY
                }
                _ => {
                    return Err(LayoutError::UnknownGlyph { glyph, row, column });
                }
            };
            cells.push(cell);
        }
    }

    let agent = agent.ok_or(LayoutError::MissingAgent)?;
    let size = GridSize::new(to_u32(rows.len())?, expected);

    Ok(ParsedLayout { size, cells, agent })
}

/// Glyph used when rendering a cell that the agent does not occupy.
///
/// Cells combining several flags render as their most significant feature.
pub(crate) fn glyph(cell: Cell) -> char {
    if cell.wall {
        '#'
    } else if cell.mine {
        'M'
    } else if cell.stop {
        'O'
    } else if cell.gem {
        'G'
    } else if cell.shield {
        'S'
    } else {
        '.'
    }
}

fn to_u32(value: usize) -> Result<u32, LayoutError> {
    u32::try_from(value).map_err(|_| LayoutError::TooLarge)
}
