#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Slide Gems engine.
//!
//! This crate defines the vocabulary that connects the board, the decision
//! engine and adapters. Adapters submit [`Command`] values describing desired
//! slides, the world executes those commands via its `apply` entry point and
//! broadcasts [`Event`] values. The decision engine never mutates anything: it
//! reads a [`BoardView`] and answers with a [`Direction`].

use serde::{Deserialize, Serialize};

/// Cardinal slide directions available to the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in the canonical scan order used by the engine.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit displacement expressed as `(row delta, column delta)`.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

/// Location of a single grid cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Adjacent cell in the provided direction.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant. The
    /// upper bounds are owned by [`GridSize`], so callers still need to check
    /// the result against the grid dimensions.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<CellCoord> {
        let (row_delta, column_delta) = direction.delta();
        let row = self.row.checked_add_signed(row_delta)?;
        let column = self.column.checked_add_signed(column_delta)?;
        Some(Self::new(row, column))
    }

    /// Straight-line distance between the centres of two cells.
    #[must_use]
    pub fn euclidean_distance(self, other: CellCoord) -> f64 {
        let rows = f64::from(self.row) - f64::from(other.row);
        let columns = f64::from(self.column) - f64::from(other.column);
        rows.hypot(columns)
    }
}

/// Dimensions of the board measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    rows: u32,
    columns: u32,
}

impl GridSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row < self.rows && cell.column < self.columns
    }

    /// Iterator over every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = CellCoord> {
        (0..self.rows).flat_map(move |row| (0..self.columns).map(move |column| CellCoord::new(row, column)))
    }
}

/// Static properties of a single board cell.
///
/// Flags are independent; a cell may for instance hold a gem and be a stop
/// cell at the same time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Impassable cell; slides end before entering it.
    pub wall: bool,
    /// Collectible gem.
    pub gem: bool,
    /// Collectible shield absorbing one hazard.
    pub shield: bool,
    /// Hazard that consumes a shield or destroys the agent.
    pub mine: bool,
    /// Cell that halts a slide on top of it.
    pub stop: bool,
}

impl Cell {
    /// Open floor with no features.
    pub const EMPTY: Cell = Cell {
        wall: false,
        gem: false,
        shield: false,
        mine: false,
        stop: false,
    };

    /// Impassable wall cell.
    pub const WALL: Cell = Cell {
        wall: true,
        ..Cell::EMPTY
    };

    /// Floor holding a gem.
    pub const GEM: Cell = Cell {
        gem: true,
        ..Cell::EMPTY
    };

    /// Floor holding a shield.
    pub const SHIELD: Cell = Cell {
        shield: true,
        ..Cell::EMPTY
    };

    /// Armed mine.
    pub const MINE: Cell = Cell {
        mine: true,
        ..Cell::EMPTY
    };

    /// Stop cell.
    pub const STOP: Cell = Cell {
        stop: true,
        ..Cell::EMPTY
    };

    /// Reports whether the cell holds a gem or a shield.
    #[must_use]
    pub const fn is_collectible(&self) -> bool {
        self.gem || self.shield
    }
}

/// Result of a single slide query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlideOutcome {
    /// Cell the agent rests on once the slide ends.
    pub destination: CellCoord,
    /// Number of gems passed over, including the destination.
    pub gems: u32,
    /// Number of shields passed over, including the destination.
    pub shields: u32,
    /// Indicates whether the slide ended on a mine.
    pub hazard_struck: bool,
}

impl SlideOutcome {
    /// Outcome of a slide that could not leave its starting cell.
    #[must_use]
    pub const fn stationary(cell: CellCoord) -> Self {
        Self {
            destination: cell,
            gems: 0,
            shields: 0,
            hazard_struck: false,
        }
    }

    /// Reports whether the slide moved the agent away from `from`.
    #[must_use]
    pub fn displaced(&self, from: CellCoord) -> bool {
        self.destination != from
    }

    /// Reports whether the slide collected at least one gem or shield.
    #[must_use]
    pub const fn collected_item(&self) -> bool {
        self.gems > 0 || self.shields > 0
    }
}

/// Difficulty tier selecting the decision strategy.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Difficulty {
    /// Immediate-reward scoring of single slides.
    Easy,
    /// Breadth-first search toward the nearest reachable gem.
    Medium,
    /// Clustered targets scored with bounded recursive lookahead.
    Hard,
}

impl Difficulty {
    /// Every tier in ascending order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

/// Read-only board snapshot consumed by the decision engine.
///
/// Implementations must answer [`BoardView::slide`] deterministically and
/// without mutating anything: it is the simulate form of the slide query.
pub trait BoardView {
    /// Dimensions of the grid.
    fn size(&self) -> GridSize;

    /// Static properties of the cell, or `None` outside the grid.
    fn cell(&self, cell: CellCoord) -> Option<Cell>;

    /// Cell currently occupied by the agent.
    fn agent(&self) -> CellCoord;

    /// Number of shields the agent currently carries.
    fn shields(&self) -> u32;

    /// Simulates a slide starting at `from` in the provided direction.
    fn slide(&self, from: CellCoord, direction: Direction) -> SlideOutcome;
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Slides the agent in the provided direction, collecting items en route.
    Slide {
        /// Direction of travel.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the agent completed a slide.
    AgentSlid {
        /// Direction of travel.
        direction: Direction,
        /// Cell occupied before the slide.
        from: CellCoord,
        /// Cell occupied after the slide.
        to: CellCoord,
        /// Gems collected on the way.
        gems: u32,
        /// Shields collected on the way.
        shields: u32,
    },
    /// A mine was struck and a shield absorbed it.
    HazardAbsorbed {
        /// Location of the consumed mine.
        cell: CellCoord,
        /// Shields left after absorbing the blast.
        shields_remaining: u32,
    },
    /// A mine was struck without a shield to absorb it.
    AgentDestroyed {
        /// Location of the mine.
        cell: CellCoord,
    },
    /// The last gem on the board was collected.
    BoardCleared,
    /// A slide request was refused.
    SlideRejected {
        /// Direction that was requested.
        direction: Direction,
        /// Specific reason the slide was refused.
        reason: SlideRejection,
    },
}

/// Reasons a slide request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlideRejection {
    /// The agent was destroyed earlier and can no longer move.
    AgentDestroyed,
}
