#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state management for Slide Gems.

mod layout;
mod slide;

use slide_gems_core::{Cell, CellCoord, Command, Event, GridSize, SlideRejection};

pub use layout::LayoutError;

/// Represents the authoritative Slide Gems board.
#[derive(Clone, Debug)]
pub struct World {
    size: GridSize,
    cells: Vec<Cell>,
    agent: CellCoord,
    shields: u32,
    alive: bool,
    gems_collected: u32,
}

impl World {
    /// Builds a world from an ASCII layout. See the `layout` module docs for
    /// the glyph table.
    pub fn from_layout(layout: &str) -> Result<Self, LayoutError> {
        let parsed = layout::parse(layout)?;
        Ok(Self {
            size: parsed.size,
            cells: parsed.cells,
            agent: parsed.agent,
            shields: 0,
            alive: true,
            gems_collected: 0,
        })
    }

    /// Replaces the number of shields the agent carries.
    #[must_use]
    pub fn with_shields(mut self, shields: u32) -> Self {
        self.shields = shields;
        self
    }

    fn cell(&self, cell: CellCoord) -> Option<Cell> {
        slide::index(self.size, cell).and_then(|offset| self.cells.get(offset).copied())
    }

    fn cell_mut(&mut self, cell: CellCoord) -> Option<&mut Cell> {
        slide::index(self.size, cell).and_then(|offset| self.cells.get_mut(offset))
    }

    fn gems_remaining(&self) -> usize {
        self.cells.iter().filter(|cell| cell.gem).count()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Slide { direction } => {
            if !world.alive {
                out_events.push(Event::SlideRejected {
                    direction,
                    reason: SlideRejection::AgentDestroyed,
                });
                return;
            }

            let from = world.agent;
            let mut entered = Vec::new();
            let outcome = slide::trace(world.size, &world.cells, from, direction, |cell| {
                entered.push(cell)
            });

            for cell in entered {
                if let Some(entry) = world.cell_mut(cell) {
                    entry.gem = false;
                    entry.shield = false;
                }
            }

            world.agent = outcome.destination;
            world.shields = world.shields.saturating_add(outcome.shields);
            world.gems_collected = world.gems_collected.saturating_add(outcome.gems);
            out_events.push(Event::AgentSlid {
                direction,
                from,
                to: outcome.destination,
                gems: outcome.gems,
                shields: outcome.shields,
            });

            if outcome.hazard_struck {
                if world.shields == 0 {
                    world.alive = false;
                    out_events.push(Event::AgentDestroyed {
                        cell: outcome.destination,
                    });
                    return;
                }

                world.shields -= 1;
                if let Some(entry) = world.cell_mut(outcome.destination) {
                    entry.mine = false;
                }
                out_events.push(Event::HazardAbsorbed {
                    cell: outcome.destination,
                    shields_remaining: world.shields,
                });
            }

            if outcome.gems > 0 && world.gems_remaining() == 0 {
                out_events.push(Event::BoardCleared);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use slide_gems_core::{BoardView, Cell, CellCoord, Direction, GridSize, SlideOutcome};

    use super::{layout, slide, World};

    /// Captures a read-only board view suitable for the decision engine.
    #[must_use]
    pub fn board_view(world: &World) -> BoardSnapshot<'_> {
        BoardSnapshot { world }
    }

    /// Dimensions of the board.
    #[must_use]
    pub fn size(world: &World) -> GridSize {
        world.size
    }

    /// Cell currently occupied by the agent.
    #[must_use]
    pub fn agent(world: &World) -> CellCoord {
        world.agent
    }

    /// Number of shields the agent carries.
    #[must_use]
    pub fn shields(world: &World) -> u32 {
        world.shields
    }

    /// Reports whether the agent survived every slide so far.
    #[must_use]
    pub fn is_agent_alive(world: &World) -> bool {
        world.alive
    }

    /// Total gems collected since the world was created.
    #[must_use]
    pub fn gems_collected(world: &World) -> u32 {
        world.gems_collected
    }

    /// Number of gems still lying on the board.
    #[must_use]
    pub fn gems_remaining(world: &World) -> usize {
        world.gems_remaining()
    }

    /// Renders the board back into layout text, one line per row.
    ///
    /// The agent glyph hides whatever lies beneath it, so a board where the
    /// agent rests on a stop cell does not survive a render/parse round trip.
    #[must_use]
    pub fn render(world: &World) -> String {
        let mut text = String::new();
        for row in 0..world.size.rows() {
            for column in 0..world.size.columns() {
                let cell = CellCoord::new(row, column);
                if cell == world.agent {
                    text.push('A');
                } else {
                    text.push(world.cell(cell).map_or('#', layout::glyph));
                }
            }
            text.push('\n');
        }
        text
    }

    /// Read-only snapshot of the board borrowed from the world.
    #[derive(Clone, Copy, Debug)]
    pub struct BoardSnapshot<'a> {
        world: &'a World,
    }

    impl BoardView for BoardSnapshot<'_> {
        fn size(&self) -> GridSize {
            self.world.size
        }

        fn cell(&self, cell: CellCoord) -> Option<Cell> {
            self.world.cell(cell)
        }

        fn agent(&self) -> CellCoord {
            self.world.agent
        }

        fn shields(&self) -> u32 {
            self.world.shields
        }

        fn slide(&self, from: CellCoord, direction: Direction) -> SlideOutcome {
            slide::trace(self.world.size, &self.world.cells, from, direction, |_| {})
        }
    }
}
