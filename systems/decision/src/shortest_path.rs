//! Shortest-path strategy used by the medium tier.
//!
//! Breadth-first search over slide transitions. A search state is the cell
//! the agent rests on plus the shields it would still hold; states reached
//! twice with the same key are expanded once, whatever the route. The search
//! answers with the *first* slide of the branch that reaches a gem.
//!
//! Slides out of the agent's own cell are the ones the agent would take, so
//! they must not strike a mine without a shield already in hand. Later hops
//! may spend shields collected on the way, as the world does when it applies
//! them.
//!
//! Promising directions are probed from the agent's cell, so a seed that
//! survives the safety check always collects its gem and is returned at once.
//! The seeded frontier is therefore only expanded when every promising seed
//! is fatal, in which case it is empty and the full search takes over.

use std::collections::{HashSet, VecDeque};

use rand::Rng;
use slide_gems_core::{BoardView, CellCoord, Direction};

use crate::{safety, DecisionConfig};

#[derive(Clone, Copy, Debug)]
struct SearchNode {
    cell: CellCoord,
    shields: u32,
    origin: Option<Direction>,
}

impl SearchNode {
    fn key(&self) -> (CellCoord, u32) {
        (self.cell, self.shields)
    }
}

/// Frontier and visited set of a single search, dropped when it returns.
#[derive(Debug)]
struct Search {
    frontier: VecDeque<SearchNode>,
    visited: HashSet<(CellCoord, u32)>,
    shield_ceiling: u32,
}

impl Search {
    fn new<B>(board: &B) -> Self
    where
        B: BoardView + ?Sized,
    {
        Self {
            frontier: VecDeque::new(),
            visited: HashSet::new(),
            shield_ceiling: shield_ceiling(board),
        }
    }

    fn enqueue(&mut self, node: SearchNode) {
        let node = SearchNode {
            shields: node.shields.min(self.shield_ceiling),
            ..node
        };
        if self.visited.insert(node.key()) {
            self.frontier.push_back(node);
        }
    }

    fn run<B>(mut self, board: &B) -> Option<Direction>
    where
        B: BoardView + ?Sized,
    {
        let mut expanded = 0_usize;

        while let Some(node) = self.frontier.pop_front() {
            expanded += 1;

            for direction in Direction::ALL {
                let outcome = board.slide(node.cell, direction);
                let budget = match node.origin {
                    None => safety::budget_after(node.shields, &outcome),
                    Some(_) => safety::hop_budget(node.shields, &outcome),
                };
                let Some(shields) = budget else {
                    continue;
                };
                if !outcome.displaced(node.cell) && outcome.gems == 0 {
                    continue;
                }

                let origin = node.origin.unwrap_or(direction);
                if outcome.gems > 0 {
                    tracing::trace!(expanded, ?origin, "gem reached");
                    return Some(origin);
                }

                self.enqueue(SearchNode {
                    cell: outcome.destination,
                    shields,
                    origin: Some(origin),
                });
            }
        }

        tracing::trace!(expanded, visited = self.visited.len(), "frontier exhausted");
        None
    }
}

pub(crate) fn choose<B, R>(board: &B, config: &DecisionConfig, rng: &mut R) -> Option<Direction>
where
    B: BoardView + ?Sized,
    R: Rng + ?Sized,
{
    let agent = board.agent();
    let promising: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|direction| safety::gem_in_sight(board, agent, *direction, config.promising_probe))
        .collect();

    if promising.is_empty() {
        tracing::debug!("no promising direction, searching every slide");
        return full_search(board, rng);
    }

    if let Some(direction) = seeded_search(board, &promising) {
        return Some(direction);
    }

    tracing::debug!(?promising, "promising directions lead nowhere, searching every slide");
    full_search(board, rng)
}

/// Searches from one slide per promising direction.
fn seeded_search<B>(board: &B, seeds: &[Direction]) -> Option<Direction>
where
    B: BoardView + ?Sized,
{
    let agent = board.agent();
    let mut search = Search::new(board);

    for &direction in seeds {
        let outcome = board.slide(agent, direction);
        let Some(shields) = safety::budget_after(board.shields(), &outcome) else {
            continue;
        };
        search.enqueue(SearchNode {
            cell: outcome.destination,
            shields,
            origin: Some(direction),
        });
        if outcome.gems > 0 {
            return Some(direction);
        }
    }

    search.run(board)
}

/// Searches from the agent's own cell, then settles for a random safe move.
fn full_search<B, R>(board: &B, rng: &mut R) -> Option<Direction>
where
    B: BoardView + ?Sized,
    R: Rng + ?Sized,
{
    let mut search = Search::new(board);
    search.enqueue(SearchNode {
        cell: board.agent(),
        shields: board.shields(),
        origin: None,
    });

    search.run(board).or_else(|| {
        tracing::debug!("no reachable gem, falling back to a random safe move");
        safety::random_safe_move(board, rng)
    })
}

/// Most shields the agent could ever hold on this board.
///
/// Simulated slides never consume the shields they cross, so without a
/// ceiling a loop over a shield cell would mint new search states forever.
fn shield_ceiling<B>(board: &B) -> u32
where
    B: BoardView + ?Sized,
{
    let on_board = board
        .size()
        .cells()
        .filter(|cell| board.cell(*cell).is_some_and(|cell| cell.shield))
        .count();
    board
        .shields()
        .saturating_add(u32::try_from(on_board).unwrap_or(u32::MAX))
}
