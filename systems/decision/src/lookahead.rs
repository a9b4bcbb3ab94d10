//! Clustered-lookahead strategy used by the hard tier.

use rand::Rng;
use slide_gems_core::{BoardView, CellCoord, Direction, SlideOutcome};

use crate::{
    cluster::{self, TargetCluster},
    safety, DecisionConfig,
};

const GEM_VALUE: f64 = 100.0;
const SHIELD_VALUE: f64 = 10.0;

pub(crate) fn choose<B, R>(board: &B, config: &DecisionConfig, rng: &mut R) -> Option<Direction>
where
    B: BoardView + ?Sized,
    R: Rng + ?Sized,
{
    let agent = board.agent();
    let clusters = cluster::cluster_targets(board);
    tracing::trace!(clusters = clusters.len(), "targets clustered");

    let mut path = Vec::with_capacity(path_capacity(config));
    let mut best: Option<(Direction, f64)> = None;

    for cluster in &clusters {
        let Some(candidate) = cluster_candidate(board, cluster) else {
            continue;
        };
        let outcome = board.slide(agent, candidate);
        let Some(shields) = safety::budget_after(board.shields(), &outcome) else {
            continue;
        };

        path.clear();
        let score = move_score(board, &outcome, shields, config.lookahead_depth, config, &mut path);
        tracing::trace!(quadrant = ?cluster.quadrant(), ?candidate, score, "cluster scored");

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    if let Some((direction, _)) = best {
        return Some(direction);
    }

    tracing::debug!("no cluster candidate, scoring every slide");
    recursive_choice(board, config).or_else(|| {
        tracing::debug!("no viable slide, falling back to a random safe move");
        safety::random_safe_move(board, rng)
    })
}

/// Best first slide toward one cluster, or `None` when every slide is fatal
/// or leaves the agent in place.
fn cluster_candidate<B>(board: &B, cluster: &TargetCluster) -> Option<Direction>
where
    B: BoardView + ?Sized,
{
    let agent = board.agent();
    let shields = board.shields();
    let mut best: Option<(Direction, f64)> = None;

    for direction in Direction::ALL {
        let outcome = board.slide(agent, direction);
        // Stationary slides are skipped along with fatal ones: they cannot
        // approach the cluster and would stall the agent in place.
        if safety::is_fatal(shields, &outcome) || !outcome.displaced(agent) {
            continue;
        }

        let score = cluster.approach_score(outcome.destination, direction)
            + f64::from(outcome.gems) * GEM_VALUE
            + f64::from(outcome.shields) * SHIELD_VALUE;
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((direction, score));
        }
    }

    best.map(|(direction, _)| direction)
}

/// Value of having just taken `outcome`, looking `depth` plies ahead.
///
/// `path` holds the cells rested on along the current branch; it is returned
/// to its original length before this function returns.
fn move_score<B>(
    board: &B,
    outcome: &SlideOutcome,
    shields: u32,
    depth: u32,
    config: &DecisionConfig,
    path: &mut Vec<CellCoord>,
) -> f64
where
    B: BoardView + ?Sized,
{
    if depth == 0 {
        return 0.0;
    }

    let from = outcome.destination;
    path.push(from);

    let mut future = 0.0_f64;
    for direction in branch_directions(board, from, config.lookahead_probe) {
        let next = board.slide(from, direction);
        let Some(remaining) = safety::hop_budget(shields, &next) else {
            continue;
        };
        if next.gems == 0 && path.contains(&next.destination) {
            continue;
        }
        future = future.max(move_score(board, &next, remaining, depth - 1, config, path));
    }

    let _ = path.pop();
    immediate_value(outcome) + future * config.decay
}

/// Directions worth exploring from `from`: those with a collectible in sight,
/// otherwise every slide that moves without touching a mine.
fn branch_directions<B>(board: &B, from: CellCoord, reach: u32) -> impl Iterator<Item = Direction>
where
    B: BoardView + ?Sized,
{
    let promising =
        Direction::ALL.map(|direction| safety::collectible_in_sight(board, from, direction, reach));
    let selected = if promising.contains(&true) {
        promising
    } else {
        Direction::ALL.map(|direction| {
            let outcome = board.slide(from, direction);
            !outcome.hazard_struck && outcome.displaced(from)
        })
    };

    Direction::ALL
        .into_iter()
        .zip(selected)
        .filter_map(|(direction, keep)| keep.then_some(direction))
}

/// Cluster-free fallback: scores every first slide with an exhaustive
/// recursive lookahead.
fn recursive_choice<B>(board: &B, config: &DecisionConfig) -> Option<Direction>
where
    B: BoardView + ?Sized,
{
    let agent = board.agent();
    let mut path = Vec::with_capacity(path_capacity(config));
    let mut best: Option<(Direction, f64)> = None;

    for direction in Direction::ALL {
        let outcome = board.slide(agent, direction);
        let Some(shields) = safety::budget_after(board.shields(), &outcome) else {
            continue;
        };
        if !outcome.displaced(agent) && outcome.gems == 0 {
            continue;
        }

        path.clear();
        path.push(outcome.destination);
        let score = immediate_value(&outcome)
            + recursive_score(
                board,
                outcome.destination,
                shields,
                config.lookahead_depth.saturating_sub(1),
                config,
                &mut path,
            );
        tracing::trace!(?direction, score, "slide scored");

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((direction, score));
        }
    }

    best.map(|(direction, _)| direction)
}

fn recursive_score<B>(
    board: &B,
    from: CellCoord,
    shields: u32,
    depth: u32,
    config: &DecisionConfig,
    path: &mut Vec<CellCoord>,
) -> f64
where
    B: BoardView + ?Sized,
{
    if depth == 0 {
        return 0.0;
    }

    let mut best = 0.0_f64;
    for direction in Direction::ALL {
        let next = board.slide(from, direction);
        let Some(remaining) = safety::hop_budget(shields, &next) else {
            continue;
        };
        if next.gems == 0 && path.contains(&next.destination) {
            continue;
        }

        path.push(next.destination);
        let future = recursive_score(board, next.destination, remaining, depth - 1, config, path);
        let _ = path.pop();

        best = best.max(immediate_value(&next) + future * config.decay);
    }
    best
}

fn immediate_value(outcome: &SlideOutcome) -> f64 {
    f64::from(outcome.gems) * GEM_VALUE + f64::from(outcome.shields) * SHIELD_VALUE
}

fn path_capacity(config: &DecisionConfig) -> usize {
    usize::try_from(config.lookahead_depth).unwrap_or(0) + 1
}
