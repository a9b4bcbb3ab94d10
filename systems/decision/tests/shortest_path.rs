use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slide_gems_core::{BoardView, CellCoord, Command, Difficulty, Direction, Event};
use slide_gems_system_decision::choose_direction;
use slide_gems_world::{self as world, query, World};

const DETOUR: &str = "
    #######
    #A...O#
    #####.#
    #G....#
    #######
";

fn choose(world: &World, seed: u64) -> Option<Direction> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    choose_direction(&query::board_view(world), Difficulty::Medium, &mut rng)
}

#[test]
fn distant_gem_in_line_is_taken_in_one_slide() {
    let world = World::from_layout("#A....G#").expect("layout parses");
    let view = query::board_view(&world);

    let direction = choose(&world, 0).expect("a move exists");

    assert_eq!(direction, Direction::East);
    assert_eq!(view.slide(view.agent(), direction).gems, 1);
}

#[test]
fn gem_in_sight_is_taken_in_one_slide() {
    let world = World::from_layout(
        "
        #####
        #A.G#
        #...#
        #####
        ",
    )
    .expect("layout parses");

    assert_eq!(choose(&world, 0), Some(Direction::East));
}

#[test]
fn first_slide_of_a_multi_hop_route_is_returned() {
    let world = World::from_layout(DETOUR).expect("layout parses");
    let view = query::board_view(&world);

    let direction = choose(&world, 0).expect("a move exists");
    let first = view.slide(view.agent(), direction);

    assert_eq!(direction, Direction::East);
    assert_eq!(first.gems, 0);
    assert!(first.displaced(view.agent()));
}

#[test]
fn route_does_not_depend_on_the_seed() {
    let world = World::from_layout(DETOUR).expect("layout parses");

    for seed in 0..8 {
        assert_eq!(choose(&world, seed), Some(Direction::East));
    }
}

#[test]
fn mine_blocks_the_route_until_a_shield_is_held() {
    let world = World::from_layout("#AM.G#").expect("layout parses");
    assert_eq!(choose(&world, 0), None);

    let shielded = world.with_shields(1);
    assert_eq!(choose(&shielded, 0), Some(Direction::East));
}

#[test]
fn shield_picked_up_mid_route_clears_a_later_mine() {
    let layout = "
        A.O
        .#S
        .#M
        ##G
    ";
    let start = World::from_layout(layout).expect("layout parses");

    for seed in 0..16 {
        assert_eq!(choose(&start, seed), Some(Direction::East));
    }

    let mut played = start;
    let mut events = Vec::new();
    for direction in [Direction::East, Direction::South, Direction::South] {
        world::apply(&mut played, Command::Slide { direction }, &mut events);
    }

    assert!(query::is_agent_alive(&played));
    assert!(events.contains(&Event::HazardAbsorbed {
        cell: CellCoord::new(2, 2),
        shields_remaining: 0,
    }));
    assert!(events.contains(&Event::BoardCleared));
}

#[test]
fn fatal_seeds_hand_over_to_the_full_search() {
    // East sees the gem but runs on into the mine; the only safe route goes
    // south first.
    let world = World::from_layout(
        "
        #AGM#
        #...#
        #..G#
        ",
    )
    .expect("layout parses");

    for seed in 0..8 {
        assert_eq!(choose(&world, seed), Some(Direction::South));
    }

    let shielded = world.with_shields(1);
    assert_eq!(choose(&shielded, 0), Some(Direction::East));
}
