//! Tuning knobs for the decision engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Deepest lookahead accepted by [`DecisionConfig::validate`].
pub const MAX_LOOKAHEAD_DEPTH: u32 = 8;

/// Adjustable parameters of the decision strategies.
///
/// Every field has a default, so a TOML file only needs to name the knobs it
/// changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecisionConfig {
    /// Plies explored by the hard tier, counting the slide being scored.
    pub lookahead_depth: u32,
    /// Factor applied to each level of future reward relative to its parent.
    pub decay: f64,
    /// Cells scanned when the medium tier looks for promising directions.
    pub promising_probe: u32,
    /// Cells scanned when the hard tier picks lookahead branches.
    pub lookahead_probe: u32,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            lookahead_depth: 4,
            decay: 0.9,
            promising_probe: 3,
            lookahead_probe: 2,
        }
    }
}

impl DecisionConfig {
    /// Checks that every knob lies in its supported range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookahead_depth == 0 || self.lookahead_depth > MAX_LOOKAHEAD_DEPTH {
            return Err(ConfigError::DepthOutOfRange {
                depth: self.lookahead_depth,
                max: MAX_LOOKAHEAD_DEPTH,
            });
        }
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(ConfigError::DecayOutOfRange(self.decay));
        }
        if self.promising_probe == 0 {
            return Err(ConfigError::ZeroProbe("promising_probe"));
        }
        if self.lookahead_probe == 0 {
            return Err(ConfigError::ZeroProbe("lookahead_probe"));
        }
        Ok(())
    }
}

/// Reasons a [`DecisionConfig`] is rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Lookahead depth was zero or too deep to finish promptly.
    #[error("lookahead depth {depth} must lie between 1 and {max}")]
    DepthOutOfRange {
        /// Requested depth.
        depth: u32,
        /// Largest accepted depth.
        max: u32,
    },
    /// Decay must lie in `(0, 1]`.
    #[error("decay {0} must lie in (0, 1]")]
    DecayOutOfRange(f64),
    /// A probe length was zero.
    #[error("{0} must scan at least one cell")]
    ZeroProbe(&'static str),
}
