//! Name and title overlay.

pub mod bitmap;
pub mod vector;

pub use vector::FontBook;

use image::RgbaImage;

use crate::error::Error;
use crate::profile::TextPolicy;

/// Draws `text` at row `y` using `policy`. Empty text draws nothing.
///
/// Vector text looks its fonts up in `fonts`.
pub fn draw_text(
    canvas: &mut RgbaImage,
    text: &str,
    y: i32,
    policy: &TextPolicy,
    fonts: &FontBook,
) -> Result<(), Error> {
    if text.is_empty() {
        return Ok(());
    }

    match policy {
        TextPolicy::Vector(style) => vector::draw(canvas, text, y, style, fonts),
        TextPolicy::Bitmap(style) => {
            bitmap::draw(canvas, text, y, style);
            Ok(())
        }
    }
}
