//! Slide simulator shared by the simulated and the applied slide paths.

use slide_gems_core::{Cell, CellCoord, Direction, GridSize, SlideOutcome};

/// Walks a slide from `from` until it is halted, reporting every entered cell.
///
/// The slide ends before a wall or the grid edge, on a stop cell, or on a
/// mine. Gems and shields are tallied for every entered cell, including the
/// one the slide ends on. `visit` receives the entered cells in travel order
/// and is never called with the starting cell.
pub(crate) fn trace<F>(
    size: GridSize,
    cells: &[Cell],
    from: CellCoord,
    direction: Direction,
    mut visit: F,
) -> SlideOutcome
where
    F: FnMut(CellCoord),
{
    let mut outcome = SlideOutcome::stationary(from);
    let mut current = from;

    loop {
        let Some(next) = current
            .neighbor(direction)
            .filter(|cell| size.contains(*cell))
        else {
            break;
        };
        let Some(cell) = index(size, next).and_then(|offset| cells.get(offset).copied()) else {
            break;
        };

        if cell.wall {
            break;
        }

        current = next;
        visit(current);

        if cell.gem {
            outcome.gems += 1;
        }
        if cell.shield {
            outcome.shields += 1;
        }
        if cell.mine {
            outcome.hazard_struck = true;
            break;
        }
        if cell.stop {
            break;
        }
    }

    outcome.destination = current;
    outcome
}

/// Row-major offset of the cell, or `None` outside the grid.
pub(crate) fn index(size: GridSize, cell: CellCoord) -> Option<usize> {
    if !size.contains(cell) {
        return None;
    }

    let width = usize::try_from(size.columns()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    let column = usize::try_from(cell.column()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}
