#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the slide gems decision engine.

mod layout_transfer;

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slide_gems_core::{CellCoord, Command as WorldCommand, Difficulty, Direction, Event};
use slide_gems_system_decision::{Decision, DecisionConfig};
use slide_gems_world::{self as world, query, World};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::layout_transfer::BoardTransfer;

const DEFAULT_LOG_FILTER: &str = "slide_gems=info";

/// Chooses slides for a gem-collecting agent on an ice board.
#[derive(Debug, Parser)]
#[command(name = "slide-gems", version)]
struct CliArgs {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Prints the direction the engine would slide next.
    Choose {
        #[command(flatten)]
        board: BoardArgs,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Slides repeatedly until the board is cleared or no move remains.
    Play {
        #[command(flatten)]
        board: BoardArgs,
        #[command(flatten)]
        engine: EngineArgs,
        /// Stops after this many slides.
        #[arg(long, value_name = "COUNT", default_value_t = 200)]
        max_turns: u32,
    },
    /// Prints the board as a single-line transfer string.
    Export {
        #[command(flatten)]
        board: BoardArgs,
    },
}

#[derive(Debug, Args)]
struct BoardArgs {
    /// File containing an ASCII board layout.
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with = "layout",
        required_unless_present = "layout"
    )]
    board: Option<PathBuf>,
    /// Transfer string previously produced by `export`.
    #[arg(long, value_name = "TRANSFER")]
    layout: Option<String>,
    /// Overrides the number of shields the agent carries.
    #[arg(long, value_name = "COUNT")]
    shields: Option<u32>,
}

#[derive(Debug, Args)]
struct EngineArgs {
    /// Strategy tier used to pick slides.
    #[arg(long, value_enum, default_value_t = DifficultyArg::Hard)]
    difficulty: DifficultyArg,
    /// Seed for the random fallback; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file overriding the engine's tuning knobs.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

/// Reason a `play` session stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ending {
    Cleared,
    Trapped,
    Destroyed,
    TurnLimit,
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Cleared => "board cleared",
            Self::Trapped => "no legal move",
            Self::Destroyed => "agent destroyed",
            Self::TurnLimit => "turn limit reached",
        };
        f.write_str(label)
    }
}

/// Entry point for the slide gems command-line interface.
fn main() -> Result<()> {
    init_logging()?;

    match CliArgs::parse().command {
        CliCommand::Choose { board, engine } => run_choose(&board, &engine),
        CliCommand::Play {
            board,
            engine,
            max_turns,
        } => run_play(&board, &engine, max_turns),
        CliCommand::Export { board } => run_export(&board),
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install the log subscriber")
}

fn run_choose(board: &BoardArgs, engine: &EngineArgs) -> Result<()> {
    let world = load_world(board)?;
    let decision = load_decision(engine.config.as_deref())?;
    let mut rng = seeded_rng(engine.seed);

    let choice =
        decision.choose_direction(&query::board_view(&world), engine.difficulty.into(), &mut rng);
    match choice {
        Some(direction) => println!("{}", direction_label(direction)),
        None => println!("{}", Ending::Trapped),
    }
    Ok(())
}

fn run_play(board: &BoardArgs, engine: &EngineArgs, max_turns: u32) -> Result<()> {
    let mut world = load_world(board)?;
    let decision = load_decision(engine.config.as_deref())?;
    let mut rng = seeded_rng(engine.seed);
    let difficulty = engine.difficulty.into();

    let mut events = Vec::new();
    let mut turns = 0_u32;
    let ending = loop {
        if query::gems_remaining(&world) == 0 {
            break Ending::Cleared;
        }
        if turns == max_turns {
            break Ending::TurnLimit;
        }
        let Some(direction) =
            decision.choose_direction(&query::board_view(&world), difficulty, &mut rng)
        else {
            break Ending::Trapped;
        };

        events.clear();
        world::apply(&mut world, WorldCommand::Slide { direction }, &mut events);
        turns += 1;
        for event in &events {
            println!("turn {turns}: {}", describe(event));
        }

        if !query::is_agent_alive(&world) {
            break Ending::Destroyed;
        }
    };

    tracing::info!(turns, %ending, "play finished");
    print!("{}", query::render(&world));
    println!(
        "{ending} after {turns} turns: {} gems collected, {} remaining, {} shields",
        query::gems_collected(&world),
        query::gems_remaining(&world),
        query::shields(&world),
    );
    Ok(())
}

fn run_export(board: &BoardArgs) -> Result<()> {
    let world = load_world(board)?;
    let encoded = BoardTransfer::capture(&world)
        .encode()
        .context("failed to encode the board")?;
    println!("{encoded}");
    Ok(())
}

fn load_world(args: &BoardArgs) -> Result<World> {
    let world = match (&args.board, &args.layout) {
        (Some(path), _) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read board file {}", path.display()))?;
            World::from_layout(&text)
                .with_context(|| format!("invalid board in {}", path.display()))?
        }
        (None, Some(transfer)) => BoardTransfer::decode(transfer)
            .context("invalid transfer string")?
            .into_world()
            .context("transfer string does not describe a playable board")?,
        (None, None) => bail!("either --board or --layout must be provided"),
    };

    Ok(match args.shields {
        Some(shields) => world.with_shields(shields),
        None => world,
    })
}

fn load_decision(path: Option<&Path>) -> Result<Decision> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str::<DecisionConfig>(&text)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        }
        None => DecisionConfig::default(),
    };
    tracing::debug!(?config, "engine configured");

    Decision::new(config).context("invalid engine configuration")
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    let seed = seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "random fallback seeded");
    ChaCha8Rng::seed_from_u64(seed)
}

fn describe(event: &Event) -> String {
    match event {
        Event::AgentSlid {
            direction,
            from,
            to,
            gems,
            shields,
        } => format!(
            "slid {} from {} to {}, +{gems} gems, +{shields} shields",
            direction_label(*direction),
            cell_label(*from),
            cell_label(*to),
        ),
        Event::HazardAbsorbed {
            cell,
            shields_remaining,
        } => format!(
            "shield absorbed the mine at {}, {shields_remaining} left",
            cell_label(*cell)
        ),
        Event::AgentDestroyed { cell } => {
            format!("agent destroyed by the mine at {}", cell_label(*cell))
        }
        Event::BoardCleared => "last gem collected".to_owned(),
        Event::SlideRejected { direction, reason } => format!(
            "slide {} rejected: {reason:?}",
            direction_label(*direction)
        ),
    }
}

fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::North => "north",
        Direction::East => "east",
        Direction::South => "south",
        Direction::West => "west",
    }
}

fn cell_label(cell: CellCoord) -> String {
    format!("({}, {})", cell.row(), cell.column())
}
