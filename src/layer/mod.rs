//! Paperdoll layers.
//!
//! A layer starts as a [`LayerDescriptor`] naming either a gump directly or an
//! equipped item. The [`resolve`] step turns it into a [`ResolvedSprite`]
//! (or skips it), and [`render`] blits the decoded runs onto the canvas.
//!
//! Layers are drawn strictly in the order they are given; a later layer
//! overwrites an earlier one wherever both have opaque pixels.

pub mod render;
pub mod resolve;

pub use render::LayerRenderer;
pub use resolve::resolve;

use serde::{Deserialize, Serialize};

use crate::race::Race;

// ============================================================================
// LayerDescriptor
// ============================================================================

/// Describes one layer of a paperdoll.
///
/// `source_id` is kept wider than the asset id space so out-of-range ids can
/// be represented; they resolve to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerDescriptor {
    source_id: u32,
    raw_gump: bool,
    female: bool,
    hue_id: u32,
}

impl LayerDescriptor {
    /// A layer whose id already is a gump id.
    pub fn gump(gump_id: u32, hue_id: u32) -> Self {
        Self {
            source_id: gump_id,
            raw_gump: true,
            female: false,
            hue_id,
        }
    }

    /// A layer for an equipped item, mapped to a gump through tile data.
    pub fn item(item_id: u32, female: bool, hue_id: u32) -> Self {
        Self {
            source_id: item_id,
            raw_gump: false,
            female,
            hue_id,
        }
    }

    /// The body layer for a race.
    pub fn body(race: Race, female: bool, hue_id: u32) -> Self {
        Self {
            female,
            ..Self::gump(u32::from(race.body_id(female)), hue_id)
        }
    }

    pub fn source_id(&self) -> u32 {
        self.source_id
    }

    /// Returns true if [`source_id`](Self::source_id) is a gump id rather than
    /// an item id.
    pub fn is_raw_gump(&self) -> bool {
        self.raw_gump
    }

    pub fn is_female(&self) -> bool {
        self.female
    }

    /// Hue to apply; 0 means native colors.
    pub fn hue_id(&self) -> u32 {
        self.hue_id
    }
}

// ============================================================================
// ResolvedSprite
// ============================================================================

/// A concrete gump ready to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSprite {
    pub gump_id: u32,
    pub hue_id: u32,
}

// ============================================================================
// Offset
// ============================================================================

/// Translation applied to every run of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    /// No translation.
    pub const NONE: Self = Self { dx: 0, dy: 0 };

    /// Shift that centers a character inside the paperdoll frame.
    pub const PAPERDOLL: Self = Self { dx: 8, dy: 15 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}
