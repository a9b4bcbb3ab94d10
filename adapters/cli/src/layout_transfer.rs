#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use slide_gems_world::{query, LayoutError, World};

const TRANSFER_DOMAIN: &str = "slide";
const TRANSFER_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded board payload.
pub(crate) const TRANSFER_HEADER: &str = "slide:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Board captured as layout rows together with the agent's shields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BoardTransfer {
    /// Number of columns in every layout row.
    pub(crate) columns: u32,
    /// Number of layout rows.
    pub(crate) rows: u32,
    /// Shields carried by the agent.
    pub(crate) shields: u32,
    /// Layout text, one entry per row.
    pub(crate) layout: Vec<String>,
}

impl BoardTransfer {
    /// Captures the current state of `world`.
    #[must_use]
    pub(crate) fn capture(world: &World) -> Self {
        let size = query::size(world);
        Self {
            columns: size.columns(),
            rows: size.rows(),
            shields: query::shields(world),
            layout: query::render(world).lines().map(str::to_owned).collect(),
        }
    }

    /// Encodes the board into a single-line string suitable for clipboard transfer.
    pub(crate) fn encode(&self) -> Result<String, TransferError> {
        let payload = TransferPayload {
            shields: self.shields,
            layout: self.layout.clone(),
        };
        let json = serde_json::to_vec(&payload).map_err(TransferError::Serialization)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        Ok(format!(
            "{TRANSFER_HEADER}:{}x{}:{encoded}",
            self.columns, self.rows
        ))
    }

    /// Decodes a board from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, TransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(TransferError::MissingPrefix)?;
        let version = parts.next().ok_or(TransferError::MissingVersion)?;
        let dimensions = parts.next().ok_or(TransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(TransferError::MissingPayload)?;

        if domain != TRANSFER_DOMAIN {
            return Err(TransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != TRANSFER_VERSION {
            return Err(TransferError::UnsupportedVersion(version.to_owned()));
        }

        let (columns, rows) = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(TransferError::InvalidEncoding)?;
        let decoded: TransferPayload =
            serde_json::from_slice(&bytes).map_err(TransferError::InvalidPayload)?;

        let matches_dimensions = usize::try_from(rows).is_ok_and(|rows| rows == decoded.layout.len())
            && decoded.layout.iter().all(|row| {
                usize::try_from(columns).is_ok_and(|columns| columns == row.chars().count())
            });
        if !matches_dimensions {
            return Err(TransferError::DimensionMismatch { columns, rows });
        }

        Ok(Self {
            columns,
            rows,
            shields: decoded.shields,
            layout: decoded.layout,
        })
    }

    /// Builds the world described by the transfer.
    pub(crate) fn into_world(self) -> Result<World, TransferError> {
        let world = World::from_layout(&self.layout.join("\n")).map_err(TransferError::InvalidLayout)?;
        Ok(world.with_shields(self.shields))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct TransferPayload {
    shields: u32,
    layout: Vec<String>,
}

/// Errors that can occur while encoding or decoding board transfer strings.
#[derive(Debug)]
pub(crate) enum TransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the transfer string.
    MissingPrefix,
    /// The transfer string did not contain a version segment.
    MissingVersion,
    /// The transfer string did not include grid dimensions.
    MissingDimensions,
    /// The transfer string did not include the payload segment.
    MissingPayload,
    /// The transfer string used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The transfer string used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed from the transfer string.
    InvalidDimensions(String),
    /// The layout rows disagree with the advertised dimensions.
    DimensionMismatch {
        /// Advertised column count.
        columns: u32,
        /// Advertised row count.
        rows: u32,
    },
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
    /// The payload could not be serialised.
    Serialization(serde_json::Error),
    /// The layout rows do not describe a playable board.
    InvalidLayout(LayoutError),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "transfer string was empty"),
            Self::MissingPrefix => write!(f, "transfer string is missing the prefix"),
            Self::MissingVersion => write!(f, "transfer string is missing the version"),
            Self::MissingDimensions => write!(f, "transfer string is missing the grid dimensions"),
            Self::MissingPayload => write!(f, "transfer string is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "transfer prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "transfer version '{version}' is not supported")
            }
            Self::InvalidDimensions(dimensions) => {
                write!(f, "could not parse grid dimensions '{dimensions}'")
            }
            Self::DimensionMismatch { columns, rows } => {
                write!(f, "layout rows do not form a {columns}x{rows} board")
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode transfer payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse transfer payload: {error}")
            }
            Self::Serialization(error) => {
                write!(f, "could not serialise transfer payload: {error}")
            }
            Self::InvalidLayout(error) => write!(f, "transfer layout is invalid: {error}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) | Self::Serialization(error) => Some(error),
            Self::InvalidLayout(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), TransferError> {
    let (columns, rows) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| TransferError::InvalidDimensions(dimensions.to_owned()))?;

    let columns = columns
        .trim()
        .parse::<u32>()
        .map_err(|_| TransferError::InvalidDimensions(dimensions.to_owned()))?;
    let rows = rows
        .trim()
        .parse::<u32>()
        .map_err(|_| TransferError::InvalidDimensions(dimensions.to_owned()))?;

    if columns == 0 || rows == 0 {
        return Err(TransferError::InvalidDimensions(dimensions.to_owned()));
    }

    Ok((columns, rows))
}
