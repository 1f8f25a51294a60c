//! Asset collaborator contracts.
//!
//! The compositor never reads MUL files itself. It talks to four read-only
//! collaborators: the gump index, the gump art decoder, the hue table and the
//! tile data table. Implementations must be reentrant if independent renders
//! share them across threads.

pub mod hue;
pub mod memory;

pub use hue::Hue;
pub use memory::MemoryAssets;

use palette::Srgb;

use crate::error::Error;

// ============================================================================
// Records
// ============================================================================

/// One entry of the gump index table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GumpRecord {
    /// The gump id this record was looked up by.
    pub gump_id: u32,
    /// Offset of the encoded data in the art container.
    pub offset: u32,
    /// Length of the encoded data.
    pub length: u32,
}

/// Tile data for a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemData {
    /// Raw tile flags.
    pub flags: u64,
    /// Item value; for wearables this is the base gump id.
    pub value: u32,
}

impl ItemData {
    /// Tile flag marking an item as equippable.
    pub const WEARABLE: u64 = 0x0040_0000;

    pub fn new(flags: u64, value: u32) -> Self {
        Self { flags, value }
    }

    /// Shorthand for a wearable item whose gump base is `value`.
    pub fn wearable(value: u32) -> Self {
        Self::new(Self::WEARABLE, value)
    }

    pub fn is_wearable(&self) -> bool {
        self.flags & Self::WEARABLE != 0
    }
}

/// A horizontal span of identically colored pixels.
///
/// A run whose color is `(0, 0, 0)` is transparent and never drawn. Pure
/// black is therefore not representable in gump art; the asset format uses
/// it as the skip marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRun {
    pub x: i32,
    pub y: i32,
    pub color: Srgb<u8>,
    pub length: u32,
}

impl PixelRun {
    pub fn new(x: i32, y: i32, color: Srgb<u8>, length: u32) -> Self {
        Self { x, y, color, length }
    }

    /// Returns true for the all-zero skip marker.
    pub fn is_transparent(&self) -> bool {
        self.color.red == 0 && self.color.green == 0 && self.color.blue == 0
    }
}

// ============================================================================
// Collaborator Traits
// ============================================================================

/// Gump index lookup (`gumpidx.mul`).
pub trait GumpIndex {
    /// Returns the index record for `gump_id`, or [`Error::AssetNotFound`].
    fn gump_record(&self, gump_id: u32) -> Result<GumpRecord, Error>;
}

/// Gump art decoder (`gumpart.mul`).
pub trait GumpArt {
    /// Decodes a record into ordered pixel runs, applying `hue` if given.
    ///
    /// Fails with [`Error::CorruptAsset`] when the record is malformed.
    fn decode(&self, record: &GumpRecord, hue: Option<&Hue>) -> Result<Vec<PixelRun>, Error>;
}

/// Hue palette lookup (`hues.mul`).
pub trait HueTable {
    fn hue(&self, hue_id: u32) -> Result<Hue, Error>;
}

/// Item metadata lookup (`tiledata.mul`).
pub trait TileData {
    fn item_data(&self, item_id: u32) -> Result<ItemData, Error>;
}

impl<T: GumpIndex + ?Sized> GumpIndex for &T {
    fn gump_record(&self, gump_id: u32) -> Result<GumpRecord, Error> {
        (**self).gump_record(gump_id)
    }
}

impl<T: GumpArt + ?Sized> GumpArt for &T {
    fn decode(&self, record: &GumpRecord, hue: Option<&Hue>) -> Result<Vec<PixelRun>, Error> {
        (**self).decode(record, hue)
    }
}

impl<T: HueTable + ?Sized> HueTable for &T {
    fn hue(&self, hue_id: u32) -> Result<Hue, Error> {
        (**self).hue(hue_id)
    }
}

impl<T: TileData + ?Sized> TileData for &T {
    fn item_data(&self, item_id: u32) -> Result<ItemData, Error> {
        (**self).item_data(item_id)
    }
}
