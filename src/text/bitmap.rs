//! Fixed-cell bitmap font text.
//!
//! Glyphs are 5x7 pixels drawn inside a 7x13 cell. Lines are centered with a
//! heuristic tuned to this cell width on the 262 pixel wide paperdoll.

use image::{Rgba, RgbaImage};

use crate::profile::BitmapText;

/// Horizontal advance per character.
pub const CELL_WIDTH: i32 = 7;

/// Center line the heuristic balances text around.
const CENTER_X: f32 = 131.0;

/// Glyph placement inside the cell.
const GLYPH_LEFT: i32 = 1;
const GLYPH_TOP: i32 = 3;

/// Column-major 5x7 glyphs for ASCII 0x20..=0x7E; bit 0 is the top row.
const GLYPHS: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x08, 0x2A, 0x1C, 0x2A, 0x08], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // \
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x08, 0x04, 0x08, 0x10, 0x08], // ~
];

/// Glyph for `c`; characters outside printable ASCII render as `?`.
fn glyph(c: char) -> &'static [u8; 5] {
    let index = match c {
        ' '..='~' => c as usize - 0x20,
        _ => '?' as usize - 0x20,
    };
    &GLYPHS[index]
}

/// Left edge of a centered line: `max(0, 131 - chars * 3.5)`, truncated.
pub fn centered_x(text: &str) -> i32 {
    let chars = text.chars().count() as f32;
    (CENTER_X - chars * (CELL_WIDTH as f32 / 2.0)).max(0.0) as i32
}

/// Draws `text` centered, with the top of the cell at `y`.
pub fn draw(canvas: &mut RgbaImage, text: &str, y: i32, style: &BitmapText) {
    let [r, g, b] = style.color;
    let pixel = Rgba([r, g, b, u8::MAX]);
    let (width, height) = (canvas.width() as i32, canvas.height() as i32);

    let mut cell_x = centered_x(text);
    for c in text.chars() {
        for (col, bits) in glyph(c).iter().enumerate() {
            for row in 0..7 {
                if bits & (1u8 << row) == 0 {
                    continue;
                }
                let px = cell_x + GLYPH_LEFT + col as i32;
                let py = y + GLYPH_TOP + row;
                if px >= 0 && py >= 0 && px < width && py < height {
                    canvas.put_pixel(px as u32, py as u32, pixel);
                }
            }
        }
        cell_x += CELL_WIDTH;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted(canvas: &RgbaImage) -> Vec<(u32, u32)> {
        canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[3] != 0)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn centering_heuristic() {
        assert_eq!(centered_x(""), 131);
        assert_eq!(centered_x("Avatar"), 110);
        // 131 - 12 * 3.5 = 89
        assert_eq!(centered_x("the Stranger"), 89);
        // 131 - 3 * 3.5 = 120.5, truncated
        assert_eq!(centered_x("abc"), 120);
        assert_eq!(centered_x(&"x".repeat(40)), 0);
        assert_eq!(centered_x(&"x".repeat(38)), 0);
    }

    #[test]
    fn glyphs_stay_inside_their_cells() {
        let mut canvas = RgbaImage::new(262, 40);
        draw(&mut canvas, "Avatar", 10, &BitmapText::default());

        let start = centered_x("Avatar") as u32;
        let pixels = painted(&canvas);
        assert!(!pixels.is_empty());
        for (x, y) in pixels {
            assert!(x >= start && x < start + 6 * CELL_WIDTH as u32, "x {x} outside line");
            assert!(y >= 10 && y < 10 + 13, "y {y} outside cell");
        }
    }

    #[test]
    fn uses_configured_color() {
        let mut canvas = RgbaImage::new(262, 40);
        draw(&mut canvas, "I", 0, &BitmapText { color: [200, 10, 10] });

        assert!(canvas.pixels().filter(|p| p.0[3] != 0).all(|p| p.0 == [200, 10, 10, 255]));
    }

    #[test]
    fn spaces_draw_nothing() {
        let mut canvas = RgbaImage::new(262, 40);
        draw(&mut canvas, "   ", 0, &BitmapText::default());
        assert!(painted(&canvas).is_empty());
    }

    #[test]
    fn unknown_characters_fall_back_to_question_mark() {
        let mut unknown = RgbaImage::new(262, 40);
        let mut question = RgbaImage::new(262, 40);
        draw(&mut unknown, "é", 0, &BitmapText::default());
        draw(&mut question, "?", 0, &BitmapText::default());

        assert_eq!(unknown, question);
    }

    #[test]
    fn text_is_clipped_at_canvas_edges() {
        let mut canvas = RgbaImage::new(20, 5);
        draw(&mut canvas, &"W".repeat(60), -4, &BitmapText::default());
        assert!(!painted(&canvas).is_empty());
    }
}
