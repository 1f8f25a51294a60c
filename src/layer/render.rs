//! Drawing resolved layers onto a canvas.

use image::{Rgba, RgbaImage};

use super::{Offset, ResolvedSprite};
use crate::assets::{GumpArt, GumpIndex, HueTable, PixelRun};
use crate::error::Error;
use crate::profile::ColorOrder;

/// Draws resolved sprites using the gump and hue collaborators.
pub struct LayerRenderer<'a, I: ?Sized, A: ?Sized, H: ?Sized> {
    index: &'a I,
    art: &'a A,
    hues: &'a H,
}

impl<'a, I, A, H> LayerRenderer<'a, I, A, H>
where
    I: GumpIndex + ?Sized,
    A: GumpArt + ?Sized,
    H: HueTable + ?Sized,
{
    pub fn new(index: &'a I, art: &'a A, hues: &'a H) -> Self {
        Self { index, art, hues }
    }

    /// Decodes `sprite` and blits every run at `offset`.
    ///
    /// The hue table is only consulted for a non-zero hue id. Lookup and
    /// decode failures propagate; off-canvas pixels are clipped.
    pub fn render(
        &self,
        canvas: &mut RgbaImage,
        sprite: ResolvedSprite,
        offset: Offset,
        order: ColorOrder,
    ) -> Result<(), Error> {
        let hue = if sprite.hue_id > 0 {
            Some(self.hues.hue(sprite.hue_id)?)
        } else {
            None
        };

        let record = self.index.gump_record(sprite.gump_id)?;
        let runs = self.art.decode(&record, hue.as_ref())?;

        for run in &runs {
            blit_run(canvas, run, offset, order);
        }

        Ok(())
    }
}

/// Writes one run onto the canvas, replacing whatever was there.
///
/// Transparent runs leave the canvas untouched.
pub fn blit_run(canvas: &mut RgbaImage, run: &PixelRun, offset: Offset, order: ColorOrder) {
    if run.is_transparent() {
        return;
    }

    let y = i64::from(run.y) + i64::from(offset.dy);
    if y < 0 || y >= i64::from(canvas.height()) {
        return;
    }

    let color = order.arrange(run.color);
    let pixel = Rgba([color.red, color.green, color.blue, u8::MAX]);

    let start = i64::from(run.x) + i64::from(offset.dx);
    let end = (start + i64::from(run.length)).min(i64::from(canvas.width()));
    for x in start.max(0)..end {
        canvas.put_pixel(x as u32, y as u32, pixel);
    }
}
