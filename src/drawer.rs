//! Paperdoll compositing engine.

use image::RgbaImage;

use crate::assets::{GumpArt, GumpIndex, HueTable, TileData};
use crate::error::Error;
use crate::layer::{LayerDescriptor, LayerRenderer, Offset, resolve};
use crate::paperdoll::Paperdoll;
use crate::profile::{CanvasSource, ColorOrder, VisualProfile};
use crate::text::{FontBook, draw_text};

// ============================================================================
// PaperdollDrawer
// ============================================================================

/// Composes paperdoll images from gump art.
///
/// The drawer holds its read-only collaborators and a [`FontBook`] that keeps
/// the system fonts loaded between renders. Every call to
/// [`draw_paperdoll`](Self::draw_paperdoll) allocates its own canvas, so one
/// drawer can serve concurrent renders when the collaborators allow it.
///
/// # Drawing Order
///
/// 1. **Canvas** - a transparent canvas with the background gump drawn at its
///    raw position, or a pre-rendered background image
/// 2. **Body** - shifted by the profile's layer offset
/// 3. **Items** - in paperdoll order, each over the previous ones
/// 4. **Name and title** - using the profile's text policy
///
/// # Example
///
/// ```
/// use paperdoll_renderer::{
///     LayerDescriptor, MemoryAssets, Paperdoll, PaperdollDrawer, PixelRun, VisualProfile,
/// };
/// use palette::Srgb;
///
/// let assets = MemoryAssets::new()
///     .with_gump(0x7D1, vec![PixelRun::new(0, 0, Srgb::new(90, 90, 90), 262)])
///     .with_gump(400, vec![PixelRun::new(0, 0, Srgb::new(200, 160, 120), 4)]);
///
/// let drawer = PaperdollDrawer::from_source(&assets);
/// let doll = Paperdoll::new(LayerDescriptor::gump(400, 0));
/// let image = drawer.draw_paperdoll(&doll, &VisualProfile::classic()).unwrap();
///
/// assert_eq!(image.get_pixel(8, 15).0, [200, 160, 120, 255]);
/// ```
pub struct PaperdollDrawer<I, A, T, H> {
    index: I,
    art: A,
    tiles: T,
    hues: H,
    fonts: FontBook,
}

impl<'a, S> PaperdollDrawer<&'a S, &'a S, &'a S, &'a S>
where
    S: GumpIndex + GumpArt + TileData + HueTable + ?Sized,
{
    /// Creates a drawer whose collaborators are all served by `source`.
    pub fn from_source(source: &'a S) -> Self {
        Self::new(source, source, source, source)
    }
}

impl<I, A, T, H> PaperdollDrawer<I, A, T, H>
where
    I: GumpIndex,
    A: GumpArt,
    T: TileData,
    H: HueTable,
{
    pub fn new(index: I, art: A, tiles: T, hues: H) -> Self {
        Self {
            index,
            art,
            tiles,
            hues,
            fonts: FontBook::new(),
        }
    }

    /// Renders `paperdoll` with `profile`.
    ///
    /// Any missing or corrupt asset referenced by a drawn layer, or a canvas,
    /// background or font that cannot be acquired, aborts the render. No
    /// partially drawn canvas is returned.
    pub fn draw_paperdoll(
        &self,
        paperdoll: &Paperdoll,
        profile: &VisualProfile,
    ) -> Result<RgbaImage, Error> {
        let mut canvas = self.establish_background(profile)?;
        log::debug!("background established ({}x{})", canvas.width(), canvas.height());

        let offset = profile.layer_offset;
        let order = profile.color_order;
        self.add_layer(&mut canvas, paperdoll.body(), offset, order)?;
        for item in paperdoll.items() {
            self.add_layer(&mut canvas, item, offset, order)?;
        }
        log::debug!("drew body and {} item layers", paperdoll.items().len());

        draw_text(&mut canvas, paperdoll.name(), profile.name_y, &profile.text, &self.fonts)?;
        draw_text(&mut canvas, paperdoll.title(), profile.title_y, &profile.text, &self.fonts)?;

        Ok(canvas)
    }

    /// Acquires the canvas for `profile`.
    ///
    /// A procedural canvas gets its background gump here, before any layer
    /// offset is in effect.
    fn establish_background(&self, profile: &VisualProfile) -> Result<RgbaImage, Error> {
        match &profile.canvas {
            CanvasSource::Procedural {
                width,
                height,
                background_gump,
            } => {
                let mut canvas = blank_canvas(*width, *height)?;
                let background = LayerDescriptor::gump(u32::from(*background_gump), 0);
                self.add_layer(&mut canvas, &background, Offset::NONE, profile.color_order)?;
                Ok(canvas)
            }
            CanvasSource::Image { path } => {
                let image = image::open(path).map_err(|e| Error::unavailable(path.display(), e))?;
                Ok(image.to_rgba8())
            }
        }
    }

    /// Resolves and draws one layer. Skipped layers draw nothing.
    fn add_layer(
        &self,
        canvas: &mut RgbaImage,
        descriptor: &LayerDescriptor,
        offset: Offset,
        order: ColorOrder,
    ) -> Result<(), Error> {
        let Some(sprite) = resolve(descriptor, &self.tiles)? else {
            return Ok(());
        };

        LayerRenderer::new(&self.index, &self.art, &self.hues).render(canvas, sprite, offset, order)
    }
}

/// Allocates a fully transparent canvas.
fn blank_canvas(width: u32, height: u32) -> Result<RgbaImage, Error> {
    let fits = u64::from(width) * u64::from(height) * 4 <= isize::MAX as u64;
    if width == 0 || height == 0 || !fits {
        return Err(Error::unavailable(
            "canvas",
            format!("cannot allocate {width}x{height}"),
        ));
    }
    Ok(RgbaImage::new(width, height))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Hue, ItemData, MemoryAssets, PixelRun};
    use crate::error::AssetKind;
    use crate::profile::{BitmapText, TextPolicy};
    use palette::Srgb;

    const GRAY: Srgb<u8> = Srgb::new(100, 100, 100);
    const RED: Srgb<u8> = Srgb::new(255, 0, 0);
    const BLUE: Srgb<u8> = Srgb::new(0, 0, 255);

    const SHIRT: u32 = 0x1517;
    const ROBE: u32 = 0x1F03;
    const APPLE: u32 = 0x09D0;

    fn assets() -> MemoryAssets {
        MemoryAssets::new()
            .with_gump(0x7D1, vec![PixelRun::new(0, 0, GRAY, 30), PixelRun::new(0, 1, GRAY, 30)])
            .with_gump(400, vec![PixelRun::new(0, 0, RED, 3)])
            .with_gump(401, vec![PixelRun::new(0, 0, RED, 3)])
            .with_gump(50_435, vec![PixelRun::new(1, 0, BLUE, 3)])
            .with_gump(60_435, vec![PixelRun::new(2, 0, BLUE, 3)])
            .with_gump(12_000, vec![PixelRun::new(0, 0, Srgb::new(0, 0, 0), 5)])
            .with_hue(33, Hue::uniform(Srgb::new(0, 255, 0)))
            .with_item(SHIRT, ItemData::wearable(435))
            .with_item(ROBE, ItemData::wearable(12_000))
            .with_item(APPLE, ItemData::new(0, 435))
    }

    /// Classic profile with bitmap text so tests don't depend on system fonts.
    fn classic() -> VisualProfile {
        VisualProfile::classic().with_text(TextPolicy::Bitmap(BitmapText::default()))
    }

    fn body() -> LayerDescriptor {
        LayerDescriptor::gump(400, 0)
    }

    fn write_background(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("paperdoll.png");
        RgbaImage::from_pixel(262, 324, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn classic_scenario() {
        let assets = assets();
        let drawer = PaperdollDrawer::from_source(&assets);
        let doll = Paperdoll::new(body())
            .with_name("Avatar")
            .with_title("the Stranger");

        let canvas = drawer.draw_paperdoll(&doll, &VisualProfile::classic()).unwrap();

        assert_eq!(canvas.dimensions(), (262, 324));
        // Background at raw coordinates.
        assert_eq!(canvas.get_pixel(0, 0).0, [100, 100, 100, 255]);
        assert_eq!(canvas.get_pixel(29, 1).0, [100, 100, 100, 255]);
        // Body unhued at +8,+15.
        for x in 8..11 {
            assert_eq!(canvas.get_pixel(x, 15).0, [255, 0, 0, 255]);
        }
        assert_eq!(canvas.get_pixel(11, 15).0, [0, 0, 0, 0]);
        assert_eq!(canvas.get_pixel(0, 15).0, [0, 0, 0, 0]);
    }

    #[test]
    fn classic_scenario_stamps_name_and_title() {
        let assets = assets();
        let drawer = PaperdollDrawer::from_source(&assets);
        let profile = VisualProfile::classic();
        let bare = drawer.draw_paperdoll(&Paperdoll::new(body()), &profile).unwrap();
        let doll = Paperdoll::new(body())
            .with_name("Avatar")
            .with_title("the Stranger");

        let canvas = drawer.draw_paperdoll(&doll, &profile).unwrap();

        let changed: Vec<(u32, u32)> = canvas
            .enumerate_pixels()
            .filter(|&(x, y, p)| p != bare.get_pixel(x, y))
            .map(|(x, y, _)| (x, y))
            .collect();
        let in_band = |rows: std::ops::RangeInclusive<u32>| {
            changed.iter().filter(|(_, y)| rows.contains(y)).count()
        };
        assert!(in_band(263..=277) > 10, "name missing: {changed:?}");
        assert!(in_band(281..=295) > 10, "title missing: {changed:?}");
        assert!(changed.iter().all(|&(x, _)| x >= 38));
        assert!(changed.iter().all(|&(_, y)| y >= 260));
    }

    #[test]
    fn classic_offsets_everything_but_the_background() {
        let assets = assets();
        let drawer = PaperdollDrawer::from_source(&assets);
        let doll = Paperdoll::new(body()).with_item(LayerDescriptor::item(SHIRT, false, 0));

        let canvas = drawer.draw_paperdoll(&doll, &classic()).unwrap();

        // Body 0..3, shirt 1..4, both shifted; shirt wins where they overlap.
        assert_eq!(canvas.get_pixel(8, 15).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(9, 15).0, [0, 0, 255, 255]);
        assert_eq!(canvas.get_pixel(11, 15).0, [0, 0, 255, 255]);
        assert_eq!(canvas.get_pixel(1, 0).0, [100, 100, 100, 255]);
    }

    #[test]
    fn later_items_occlude_earlier_ones() {
        let assets = assets();
        let drawer = PaperdollDrawer::from_source(&assets);
        let doll = Paperdoll::new(body())
            .with_item(LayerDescriptor::item(SHIRT, false, 0))
            .with_item(LayerDescriptor::gump(400, 33));

        let canvas = drawer.draw_paperdoll(&doll, &classic()).unwrap();

        for x in 8..11 {
            assert_eq!(canvas.get_pixel(x, 15).0, [0, 255, 0, 255]);
        }
        assert_eq!(canvas.get_pixel(11, 15).0, [0, 0, 255, 255]);
    }

    #[test]
    fn female_items_use_female_sheet() {
        let assets = assets();
        let drawer = PaperdollDrawer::from_source(&assets);
        let doll = Paperdoll::new(LayerDescriptor::gump(401, 0))
            .with_item(LayerDescriptor::item(SHIRT, true, 0));

        let canvas = drawer.draw_paperdoll(&doll, &classic()).unwrap();

        assert_eq!(canvas.get_pixel(9, 15).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(10, 15).0, [0, 0, 255, 255]);
    }

    #[test]
    fn skipped_layers_draw_nothing() {
        let assets = assets();
        let drawer = PaperdollDrawer::from_source(&assets);
        let plain = drawer.draw_paperdoll(&Paperdoll::new(body()), &classic()).unwrap();

        let doll = Paperdoll::new(body())
            .with_item(LayerDescriptor::item(70_000, false, 0))
            .with_item(LayerDescriptor::item(0, false, 0))
            .with_item(LayerDescriptor::item(APPLE, true, 33))
            .with_item(LayerDescriptor::item(ROBE, false, 0));

        assert_eq!(drawer.draw_paperdoll(&doll, &classic()).unwrap(), plain);
    }

    #[test]
    fn rendering_is_deterministic() {
        let assets = assets();
        let drawer = PaperdollDrawer::from_source(&assets);
        let doll = Paperdoll::new(body())
            .with_item(LayerDescriptor::item(SHIRT, false, 33))
            .with_name("Avatar")
            .with_title("the Stranger");

        let first = drawer.draw_paperdoll(&doll, &classic()).unwrap();
        let second = drawer.draw_paperdoll(&doll, &classic()).unwrap();

        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn modern_uses_background_image_and_offsets_body() {
        let dir = tempfile::tempdir().unwrap();
        let profile = VisualProfile::modern(write_background(&dir));
        let assets = assets();
        let drawer = PaperdollDrawer::from_source(&assets);
        let doll = Paperdoll::new(body()).with_name("Avatar");

        let canvas = drawer.draw_paperdoll(&doll, &profile).unwrap();

        assert_eq!(canvas.dimensions(), (262, 324));
        // No background gump: the image shows through at the origin.
        assert_eq!(canvas.get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(canvas.get_pixel(8, 15).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(7, 15).0, [10, 20, 30, 255]);
        // Name drawn in black.
        assert!(canvas.pixels().any(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn missing_background_image_is_unavailable() {
        let assets = assets();
        let drawer = PaperdollDrawer::from_source(&assets);
        let profile = VisualProfile::modern("/nonexistent/paperdoll.png");

        let err = drawer.draw_paperdoll(&Paperdoll::new(body()), &profile).unwrap_err();

        assert!(matches!(err, Error::ResourceUnavailable { .. }));
    }

    #[test]
    fn zero_sized_canvas_is_unavailable() {
        let assets = assets();
        let drawer = PaperdollDrawer::from_source(&assets);
        let profile = VisualProfile {
            canvas: CanvasSource::Procedural {
                width: 0,
                height: 324,
                background_gump: 0x7D1,
            },
            ..classic()
        };

        let err = drawer.draw_paperdoll(&Paperdoll::new(body()), &profile).unwrap_err();

        assert!(matches!(err, Error::ResourceUnavailable { .. }));
    }

    #[test]
    fn missing_background_gump_aborts() {
        let assets = MemoryAssets::new().with_gump(400, vec![PixelRun::new(0, 0, RED, 3)]);
        let drawer = PaperdollDrawer::from_source(&assets);

        let err = drawer.draw_paperdoll(&Paperdoll::new(body()), &classic()).unwrap_err();

        assert!(matches!(err, Error::AssetNotFound { kind: AssetKind::Gump, id: 0x7D1 }));
    }

    #[test]
    fn missing_assets_abort_the_render() {
        let assets = assets();
        let drawer = PaperdollDrawer::from_source(&assets);

        let no_gump = Paperdoll::new(LayerDescriptor::gump(999, 0));
        assert!(matches!(
            drawer.draw_paperdoll(&no_gump, &classic()),
            Err(Error::AssetNotFound { kind: AssetKind::Gump, id: 999 })
        ));

        let no_hue = Paperdoll::new(LayerDescriptor::gump(400, 77));
        assert!(matches!(
            drawer.draw_paperdoll(&no_hue, &classic()),
            Err(Error::AssetNotFound { kind: AssetKind::Hue, id: 77 })
        ));

        let no_item = Paperdoll::new(body()).with_item(LayerDescriptor::item(0x2222, false, 0));
        assert!(matches!(
            drawer.draw_paperdoll(&no_item, &classic()),
            Err(Error::AssetNotFound { kind: AssetKind::Item, id: 0x2222 })
        ));
    }

    #[test]
    fn separate_collaborators() {
        let gumps = assets();
        let tiles = MemoryAssets::new().with_item(SHIRT, ItemData::wearable(435));
        let drawer = PaperdollDrawer::new(&gumps, &gumps, &tiles, &gumps);
        let doll = Paperdoll::new(body()).with_item(LayerDescriptor::item(SHIRT, false, 0));

        let canvas = drawer.draw_paperdoll(&doll, &classic()).unwrap();

        assert_eq!(canvas.get_pixel(11, 15).0, [0, 0, 255, 255]);
    }
}
