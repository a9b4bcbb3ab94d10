use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slide_gems_core::{CellCoord, Command, Difficulty, Direction, Event};
use slide_gems_system_decision::Decision;
use slide_gems_world::{self as world, query, World};

const MAX_TURNS: usize = 60;

const MAZE: &str = "
    #########
    #A..O..G#
    #.#M#.#.#
    #S..G.O.#
    #.#.#M#.#
    #G..O..S#
    #########
";

#[derive(Debug, PartialEq)]
struct Replay {
    events: Vec<Event>,
    turns: usize,
    agent: CellCoord,
    alive: bool,
    gems_collected: u32,
}

fn replay(layout: &str, difficulty: Difficulty, seed: u64) -> Replay {
    let mut state = World::from_layout(layout).expect("layout parses");
    let decision = Decision::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut events = Vec::new();
    let mut turns = 0;

    while turns < MAX_TURNS {
        let Some(direction) =
            decision.choose_direction(&query::board_view(&state), difficulty, &mut rng)
        else {
            break;
        };
        let start = events.len();
        world::apply(&mut state, Command::Slide { direction }, &mut events);
        turns += 1;

        let finished = events[start..].iter().any(|event| {
            matches!(event, Event::BoardCleared | Event::AgentDestroyed { .. })
        });
        if finished {
            break;
        }
    }

    Replay {
        events,
        turns,
        agent: query::agent(&state),
        alive: query::is_agent_alive(&state),
        gems_collected: query::gems_collected(&state),
    }
}

#[test]
fn same_seed_replays_identically() {
    for difficulty in Difficulty::ALL {
        for seed in [0, 9, 42] {
            assert_eq!(
                replay(MAZE, difficulty, seed),
                replay(MAZE, difficulty, seed),
                "{difficulty:?} diverged for seed {seed}"
            );
        }
    }
}

#[test]
fn two_gem_replay_matches_recorded_log() {
    // Every tier takes the east gem, drops south along the right wall and
    // sweeps west onto the second gem.
    let layout = "
        #####
        #A.G#
        #...#
        #G..#
        #####
    ";
    let expected = vec![
        Event::AgentSlid {
            direction: Direction::East,
            from: CellCoord::new(1, 1),
            to: CellCoord::new(1, 3),
            gems: 1,
            shields: 0,
        },
        Event::AgentSlid {
            direction: Direction::South,
            from: CellCoord::new(1, 3),
            to: CellCoord::new(3, 3),
            gems: 0,
            shields: 0,
        },
        Event::AgentSlid {
            direction: Direction::West,
            from: CellCoord::new(3, 3),
            to: CellCoord::new(3, 1),
            gems: 1,
            shields: 0,
        },
        Event::BoardCleared,
    ];

    for difficulty in Difficulty::ALL {
        for seed in [0, 9, 42] {
            let outcome = replay(layout, difficulty, seed);

            assert_eq!(
                outcome,
                Replay {
                    events: expected.clone(),
                    turns: 3,
                    agent: CellCoord::new(3, 1),
                    alive: true,
                    gems_collected: 2,
                },
                "{difficulty:?} with seed {seed}"
            );
        }
    }
}

#[test]
fn agent_survives_every_replay() {
    for difficulty in Difficulty::ALL {
        for seed in 0..4 {
            let outcome = replay(MAZE, difficulty, seed);
            assert!(outcome.alive, "{difficulty:?} lost the agent with seed {seed}");
            assert!(!outcome
                .events
                .iter()
                .any(|event| matches!(event, Event::AgentDestroyed { .. })));
        }
    }
}

#[test]
fn single_gem_board_is_cleared_in_one_slide() {
    let layout = "
        #####
        #A.G#
        #...#
        #####
    ";

    for difficulty in Difficulty::ALL {
        let outcome = replay(layout, difficulty, 0);

        assert_eq!(outcome.turns, 1, "{difficulty:?}");
        assert_eq!(outcome.gems_collected, 1);
        assert_eq!(
            outcome.events,
            vec![
                Event::AgentSlid {
                    direction: Direction::East,
                    from: CellCoord::new(1, 1),
                    to: CellCoord::new(1, 3),
                    gems: 1,
                    shields: 0,
                },
                Event::BoardCleared,
            ]
        );
    }
}
