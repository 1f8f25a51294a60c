//! Error taxonomy for paperdoll rendering.
//!
//! Skippable layers (out-of-range ids, non-wearable items, hue id 0) are not
//! errors and never surface here. Everything in [`Error`] aborts the render.

use std::fmt;

use thiserror::Error;

/// The collaborator table an asset id was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Gump index / gump art.
    Gump,
    /// Hue palette table.
    Hue,
    /// Item (tile data) metadata.
    Item,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gump => "gump",
            Self::Hue => "hue",
            Self::Item => "item",
        })
    }
}

/// Fatal rendering error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A non-skipped layer referenced a record that does not exist.
    #[error("{kind} {id} not found")]
    AssetNotFound { kind: AssetKind, id: u32 },

    /// A record exists but its data is malformed.
    #[error("corrupt {kind} {id}: {reason}")]
    CorruptAsset {
        kind: AssetKind,
        id: u32,
        reason: String,
    },

    /// The canvas, background image or a font could not be acquired.
    #[error("resource unavailable: {resource}: {reason}")]
    ResourceUnavailable { resource: String, reason: String },

    /// Unknown race type code.
    #[error("invalid race type {0}")]
    InvalidRace(u8),
}

impl Error {
    pub fn not_found(kind: AssetKind, id: u32) -> Self {
        Self::AssetNotFound { kind, id }
    }

    pub fn corrupt(kind: AssetKind, id: u32, reason: impl Into<String>) -> Self {
        Self::CorruptAsset {
            kind,
            id,
            reason: reason.into(),
        }
    }

    pub fn unavailable(resource: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Self::ResourceUnavailable {
            resource: resource.to_string(),
            reason: reason.to_string(),
        }
    }
}
