#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Decision engine that picks the agent's next slide.
//!
//! The engine is a pure function of the board snapshot it is handed: every
//! hypothetical move goes through [`BoardView::slide`], and all search
//! containers live only for the duration of one call. The random source is
//! consulted solely by the last-resort fallback that draws among safe moves.
//!
//! | tier                  | strategy                                              |
//! |-----------------------|-------------------------------------------------------|
//! | [`Difficulty::Easy`]   | immediate reward of each single slide                 |
//! | [`Difficulty::Medium`] | breadth-first search toward the nearest gem           |
//! | [`Difficulty::Hard`]   | quadrant clusters scored with decayed lookahead       |

mod cluster;
mod config;
pub mod immediate;
mod lookahead;
mod safety;
mod shortest_path;

use rand::Rng;
use slide_gems_core::{BoardView, Difficulty, Direction};

pub use config::{ConfigError, DecisionConfig, MAX_LOOKAHEAD_DEPTH};
pub use immediate::{score_directions, DirectionScore};

/// Stateless move selector configured once and reused for every decision.
#[derive(Clone, Debug, Default)]
pub struct Decision {
    config: DecisionConfig,
}

impl Decision {
    /// Creates an engine after validating the provided configuration.
    pub fn new(config: DecisionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration the engine runs with.
    #[must_use]
    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Chooses the next slide for the agent on `board`.
    ///
    /// Returns `None` only when no direction is both safe and able to move the
    /// agent, meaning the agent is trapped. A returned direction never strikes
    /// a mine while the agent holds no shield.
    #[tracing::instrument(
        level = "debug",
        skip(self, board, rng),
        fields(agent = ?board.agent(), shields = board.shields())
    )]
    pub fn choose_direction<B, R>(
        &self,
        board: &B,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Option<Direction>
    where
        B: BoardView + ?Sized,
        R: Rng + ?Sized,
    {
        let choice = match difficulty {
            Difficulty::Easy => immediate::choose(board, rng),
            Difficulty::Medium => shortest_path::choose(board, &self.config, rng),
            Difficulty::Hard => lookahead::choose(board, &self.config, rng),
        };
        tracing::debug!(?choice, "direction chosen");
        choice
    }
}

/// Chooses the next slide using the default configuration.
pub fn choose_direction<B, R>(board: &B, difficulty: Difficulty, rng: &mut R) -> Option<Direction>
where
    B: BoardView + ?Sized,
    R: Rng + ?Sized,
{
    Decision::default().choose_direction(board, difficulty, rng)
}
