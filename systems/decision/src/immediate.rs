//! Immediate-reward strategy used by the easy tier.

use rand::Rng;
use slide_gems_core::{BoardView, Direction, SlideOutcome};

use crate::safety;

/// Score given to fatal or non-displacing slides.
pub const DISQUALIFIED: i32 = -1000;

const GEM_REWARD: i32 = 100;
const SHIELD_REWARD: i32 = 50;
const EXPLORATION_BONUS: i32 = 10;

/// Immediate score assigned to a single direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectionScore {
    /// Direction that was evaluated.
    pub direction: Direction,
    /// Reward of one slide in that direction, or [`DISQUALIFIED`].
    pub score: i32,
}

/// Scores every direction from the agent's cell with one slide query each.
///
/// Gems are worth 100 and shields 50. A safe slide that moves the agent but
/// collects nothing earns a flat exploration bonus of 10.
pub fn score_directions<B>(board: &B) -> [DirectionScore; 4]
where
    B: BoardView + ?Sized,
{
    let agent = board.agent();
    let shields = board.shields();
    Direction::ALL.map(|direction| {
        let outcome = board.slide(agent, direction);
        let score = if safety::is_fatal(shields, &outcome) || !outcome.displaced(agent) {
            DISQUALIFIED
        } else {
            reward(&outcome)
        };
        DirectionScore { direction, score }
    })
}

pub(crate) fn choose<B, R>(board: &B, rng: &mut R) -> Option<Direction>
where
    B: BoardView + ?Sized,
    R: Rng + ?Sized,
{
    let mut best: Option<DirectionScore> = None;
    for scored in score_directions(board) {
        if best.map_or(scored.score > -1, |current| scored.score > current.score) {
            best = Some(scored);
        }
    }

    match best {
        Some(scored) if scored.score > 0 => {
            tracing::trace!(direction = ?scored.direction, score = scored.score, "best immediate reward");
            Some(scored.direction)
        }
        _ => {
            tracing::debug!("no rewarding slide, falling back to a random safe move");
            safety::random_safe_move(board, rng)
        }
    }
}

fn reward(outcome: &SlideOutcome) -> i32 {
    if !outcome.collected_item() {
        return EXPLORATION_BONUS;
    }
    weighted(outcome.gems, GEM_REWARD).saturating_add(weighted(outcome.shields, SHIELD_REWARD))
}

fn weighted(count: u32, weight: i32) -> i32 {
    i32::try_from(count)
        .unwrap_or(i32::MAX)
        .saturating_mul(weight)
}

#[cfg(test)]
mod tests {
    use slide_gems_world::{query, World};

    use super::*;

    #[test]
    fn walls_and_edges_disqualify_directions() {
        let world = World::from_layout(
            "
            ###
            #A.
            ###
            ",
        )
        .expect("layout parses");
        let scores = score_directions(&query::board_view(&world));

        let by_direction = |direction| {
            scores
                .iter()
                .find(|scored| scored.direction == direction)
                .map(|scored| scored.score)
        };
        assert_eq!(by_direction(Direction::North), Some(DISQUALIFIED));
        assert_eq!(by_direction(Direction::East), Some(EXPLORATION_BONUS));
        assert_eq!(by_direction(Direction::West), Some(DISQUALIFIED));
    }

    #[test]
    fn shields_and_gems_stack() {
        let world = World::from_layout("AGS.G").expect("layout parses");
        let scores = score_directions(&query::board_view(&world));

        assert_eq!(scores[1].direction, Direction::East);
        assert_eq!(scores[1].score, 2 * GEM_REWARD + SHIELD_REWARD);
    }
}
