//! In-memory asset collaborators.
//!
//! [`MemoryAssets`] implements every collaborator trait over plain maps. It is
//! useful for tests, previews and for callers that decode the MUL containers
//! up front.

use std::collections::HashMap;

use super::{GumpArt, GumpIndex, GumpRecord, Hue, HueTable, ItemData, PixelRun, TileData};
use crate::error::{AssetKind, Error};

/// Gumps, hues and item data held in memory.
///
/// Gump runs are stored in their native (unhued) colors; the hue is applied
/// by [`GumpArt::decode`].
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    gumps: HashMap<u32, Vec<PixelRun>>,
    hues: HashMap<u32, Hue>,
    items: HashMap<u32, ItemData>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a gump.
    pub fn with_gump(mut self, gump_id: u32, runs: Vec<PixelRun>) -> Self {
        self.insert_gump(gump_id, runs);
        self
    }

    pub fn with_hue(mut self, hue_id: u32, hue: Hue) -> Self {
        self.hues.insert(hue_id, hue);
        self
    }

    pub fn with_item(mut self, item_id: u32, data: ItemData) -> Self {
        self.items.insert(item_id, data);
        self
    }

    pub fn insert_gump(&mut self, gump_id: u32, runs: Vec<PixelRun>) {
        self.gumps.insert(gump_id, runs);
    }
}

impl GumpIndex for MemoryAssets {
    fn gump_record(&self, gump_id: u32) -> Result<GumpRecord, Error> {
        let runs = self
            .gumps
            .get(&gump_id)
            .ok_or(Error::not_found(AssetKind::Gump, gump_id))?;

        Ok(GumpRecord {
            gump_id,
            offset: 0,
            length: runs.len() as u32,
        })
    }
}

impl GumpArt for MemoryAssets {
    fn decode(&self, record: &GumpRecord, hue: Option<&Hue>) -> Result<Vec<PixelRun>, Error> {
        let runs = self
            .gumps
            .get(&record.gump_id)
            .ok_or_else(|| Error::corrupt(AssetKind::Gump, record.gump_id, "record has no art"))?;

        if record.offset != 0 || record.length as usize != runs.len() {
            return Err(Error::corrupt(
                AssetKind::Gump,
                record.gump_id,
                format!(
                    "record spans {}+{} but art holds {} runs",
                    record.offset,
                    record.length,
                    runs.len()
                ),
            ));
        }

        let Some(hue) = hue else {
            return Ok(runs.clone());
        };

        Ok(runs
            .iter()
            .map(|run| {
                if run.is_transparent() {
                    *run
                } else {
                    PixelRun {
                        color: hue.tint(run.color),
                        ..*run
                    }
                }
            })
            .collect())
    }
}

impl HueTable for MemoryAssets {
    fn hue(&self, hue_id: u32) -> Result<Hue, Error> {
        self.hues
            .get(&hue_id)
            .cloned()
            .ok_or(Error::not_found(AssetKind::Hue, hue_id))
    }
}

impl TileData for MemoryAssets {
    fn item_data(&self, item_id: u32) -> Result<ItemData, Error> {
        self.items
            .get(&item_id)
            .copied()
            .ok_or(Error::not_found(AssetKind::Item, item_id))
    }
}
