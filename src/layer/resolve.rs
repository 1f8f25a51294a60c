//! Mapping layer descriptors to gump ids.

use super::{LayerDescriptor, ResolvedSprite};
use crate::assets::TileData;
use crate::error::Error;

/// Largest source id a layer may carry.
pub const MAX_SOURCE_ID: u32 = 0xFFFF;

/// Wearable gump values below this are split into male and female sheets.
pub const GENDERED_GUMP_THRESHOLD: u32 = 10_000;

/// Added to a gendered wearable gump value for male characters.
pub const MALE_GUMP_OFFSET: u32 = 50_000;

/// Added to a gendered wearable gump value for female characters.
pub const FEMALE_GUMP_OFFSET: u32 = 60_000;

/// Resolves `descriptor` to a concrete gump.
///
/// Returns `Ok(None)` when the layer contributes nothing: the source id is 0
/// or above [`MAX_SOURCE_ID`], or the item is not wearable. A missing tile
/// data record for an in-range item is an error.
pub fn resolve<T>(descriptor: &LayerDescriptor, tiles: &T) -> Result<Option<ResolvedSprite>, Error>
where
    T: TileData + ?Sized,
{
    let source_id = descriptor.source_id();
    if source_id == 0 || source_id > MAX_SOURCE_ID {
        log::trace!("skipping layer with out-of-range id {source_id}");
        return Ok(None);
    }

    let hue_id = descriptor.hue_id();
    if descriptor.is_raw_gump() {
        return Ok(Some(ResolvedSprite {
            gump_id: source_id,
            hue_id,
        }));
    }

    let item = tiles.item_data(source_id)?;
    if !item.is_wearable() {
        log::trace!("skipping non-wearable item {source_id:#06x}");
        return Ok(None);
    }

    Ok(Some(ResolvedSprite {
        gump_id: gendered_gump(item.value, descriptor.is_female()),
        hue_id,
    }))
}

/// Applies the male/female sheet offset to a wearable's base gump value.
pub fn gendered_gump(value: u32, female: bool) -> u32 {
    if value >= GENDERED_GUMP_THRESHOLD {
        value
    } else if female {
        value + FEMALE_GUMP_OFFSET
    } else {
        value + MALE_GUMP_OFFSET
    }
}
