//! Safety rules, forward probes and the random fallback shared by every tier.

use rand::{seq::SliceRandom, Rng};
use slide_gems_core::{BoardView, CellCoord, Direction, SlideOutcome};

/// Reports whether a slide the agent is about to take, holding `shields`,
/// counts as fatal.
///
/// Only slides returned to the caller are judged this way, and only the
/// shields held before the slide starts count.
pub(crate) fn is_fatal(shields: u32, outcome: &SlideOutcome) -> bool {
    outcome.hazard_struck && shields == 0
}

/// Shields left after a slide the agent is about to take, or `None` when
/// [`is_fatal`] rejects it.
pub(crate) fn budget_after(shields: u32, outcome: &SlideOutcome) -> Option<u32> {
    if is_fatal(shields, outcome) {
        return None;
    }

    let spent = u32::from(outcome.hazard_struck);
    Some((shields - spent).saturating_add(outcome.shields))
}

/// Shields left after a later hop of a simulated route, or `None` when the
/// hop would destroy the agent.
///
/// A slide ends on the first mine it strikes, so every shield it collected
/// was picked up before the blast and absorbs it, exactly as `apply` does.
pub(crate) fn hop_budget(shields: u32, outcome: &SlideOutcome) -> Option<u32> {
    let held = shields.saturating_add(outcome.shields);
    if outcome.hazard_struck {
        held.checked_sub(1)
    } else {
        Some(held)
    }
}

/// Scans up to `reach` cells ahead for a gem.
///
/// The scan ends at the grid edge or a wall, and after a stop cell or a mine,
/// whose own contents still count.
pub(crate) fn gem_in_sight<B>(board: &B, from: CellCoord, direction: Direction, reach: u32) -> bool
where
    B: BoardView + ?Sized,
{
    let mut current = from;
    for _ in 0..reach {
        let Some(next) = current.neighbor(direction) else {
            return false;
        };
        let Some(cell) = board.cell(next) else {
            return false;
        };
        if cell.wall {
            return false;
        }
        if cell.gem {
            return true;
        }
        if cell.stop || cell.mine {
            return false;
        }
        current = next;
    }
    false
}

/// Scans up to `reach` cells ahead for a gem or a shield, stopping only at
/// walls and the grid edge.
pub(crate) fn collectible_in_sight<B>(
    board: &B,
    from: CellCoord,
    direction: Direction,
    reach: u32,
) -> bool
where
    B: BoardView + ?Sized,
{
    let mut current = from;
    for _ in 0..reach {
        let Some(next) = current.neighbor(direction) else {
            return false;
        };
        let Some(cell) = board.cell(next) else {
            return false;
        };
        if cell.wall {
            return false;
        }
        if cell.is_collectible() {
            return true;
        }
        current = next;
    }
    false
}

/// Last resort shared by every tier.
///
/// Draws uniformly among safe displacing slides that collect an item, then
/// among any safe displacing slide. `None` means the agent is trapped.
pub(crate) fn random_safe_move<B, R>(board: &B, rng: &mut R) -> Option<Direction>
where
    B: BoardView + ?Sized,
    R: Rng + ?Sized,
{
    let agent = board.agent();
    let shields = board.shields();
    let mut safe = Vec::with_capacity(Direction::ALL.len());
    let mut rewarding = Vec::with_capacity(Direction::ALL.len());

    for direction in Direction::ALL {
        let outcome = board.slide(agent, direction);
        if is_fatal(shields, &outcome) || !outcome.displaced(agent) {
            continue;
        }
        safe.push(direction);
        if outcome.collected_item() {
            rewarding.push(direction);
        }
    }

    let pool = if rewarding.is_empty() { &safe } else { &rewarding };
    let choice = pool.choose(rng).copied();
    tracing::debug!(
        ?choice,
        safe = safe.len(),
        rewarding = rewarding.len(),
        "random safe move"
    );
    choice
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use slide_gems_world::{query, World};

    use super::*;

    fn outcome(hazard_struck: bool, shields: u32) -> SlideOutcome {
        SlideOutcome {
            destination: CellCoord::new(0, 0),
            gems: 0,
            shields,
            hazard_struck,
        }
    }

    #[test]
    fn budget_consumes_a_shield_per_hazard() {
        assert_eq!(budget_after(0, &outcome(true, 0)), None);
        assert_eq!(budget_after(0, &outcome(true, 2)), None);
        assert_eq!(budget_after(1, &outcome(true, 0)), Some(0));
        assert_eq!(budget_after(1, &outcome(true, 1)), Some(1));
        assert_eq!(budget_after(0, &outcome(false, 3)), Some(3));
    }

    #[test]
    fn later_hops_spend_shields_collected_on_the_way() {
        assert_eq!(hop_budget(0, &outcome(true, 0)), None);
        assert_eq!(hop_budget(0, &outcome(true, 1)), Some(0));
        assert_eq!(hop_budget(0, &outcome(true, 2)), Some(1));
        assert_eq!(hop_budget(2, &outcome(true, 0)), Some(1));
        assert_eq!(hop_budget(1, &outcome(false, 1)), Some(2));
    }

    #[test]
    fn gem_probe_stops_at_stop_cells_but_sees_their_contents() {
        let world = World::from_layout("AO.G").expect("layout parses");
        let view = query::board_view(&world);
        assert!(!gem_in_sight(&view, view.agent(), Direction::East, 3));

        let world = World::from_layout("A.G.").expect("layout parses");
        let view = query::board_view(&world);
        assert!(gem_in_sight(&view, view.agent(), Direction::East, 3));
        assert!(!gem_in_sight(&view, view.agent(), Direction::East, 1));
    }

    #[test]
    fn collectible_probe_looks_past_stop_cells() {
        let world = World::from_layout("AOS.").expect("layout parses");
        let view = query::board_view(&world);
        assert!(collectible_in_sight(&view, view.agent(), Direction::East, 2));
        assert!(!collectible_in_sight(&view, view.agent(), Direction::West, 2));
    }

    #[test]
    fn random_fallback_prefers_rewarding_moves() {
        let world = World::from_layout(
            "
            .....
            S.A..
            .....
            ",
        )
        .expect("layout parses");
        let view = query::board_view(&world);

        for seed in 0..16 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            assert_eq!(random_safe_move(&view, &mut rng), Some(Direction::West));
        }
    }
}
