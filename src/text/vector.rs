//! Vector font text rendered through resvg/usvg.
//!
//! The text is laid out as an SVG `<text>` element the size of the canvas,
//! rasterized by resvg, and blended over the canvas.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{ColorU8, Pixmap, Transform};
use resvg::usvg::fontdb::{Database, Family, Query};
use resvg::usvg::{Options, Tree};

use crate::error::Error;
use crate::profile::VectorText;

/// Font sizes are given in points at 96 dpi.
const POINTS_TO_PIXELS: f32 = 96.0 / 72.0;

// ============================================================================
// Font lookup
// ============================================================================

/// Font databases shared across renders.
///
/// Scanning the system font directories is slow, so it happens at most once
/// per book, on the first vector text drawn without a font file.
#[derive(Default)]
pub struct FontBook {
    system: OnceLock<Arc<Database>>,
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// The system font database, loaded on first use.
    pub fn system(&self) -> Arc<Database> {
        let fonts = self.system.get_or_init(|| {
            let mut fonts = Database::new();
            fonts.load_system_fonts();
            log::debug!("loaded {} system font faces", fonts.faces().count());
            Arc::new(fonts)
        });
        Arc::clone(fonts)
    }

    /// Fonts for `style`: its font file if it names one, else the system fonts.
    fn fonts_for(&self, style: &VectorText) -> Result<Arc<Database>, Error> {
        match &style.font_path {
            Some(path) => load_font_file(path).map(Arc::new),
            None => Ok(self.system()),
        }
    }
}

fn load_font_file(path: &Path) -> Result<Database, Error> {
    let data = std::fs::read(path).map_err(|e| Error::unavailable(path.display(), e))?;
    let mut fonts = Database::new();
    fonts.load_font_data(data);
    Ok(fonts)
}

/// Family name to lay text out with.
///
/// `requested` wins when a face provides it; otherwise the first face in
/// `fonts` stands in. `None` only when `fonts` holds no face at all.
fn resolve_family(fonts: &Database, requested: &str) -> Option<String> {
    let query = Query {
        families: &[Family::Name(requested)],
        ..Query::default()
    };
    let id = match fonts.query(&query) {
        Some(id) => id,
        None => {
            let id = fonts.faces().next()?.id;
            log::debug!("font family {requested:?} not found, using a fallback face");
            id
        }
    };
    fonts.face(id)?.families.first().map(|(name, _)| name.clone())
}

// ============================================================================
// Drawing
// ============================================================================

/// Draws `text` with its baseline at `y`.
///
/// Fails with [`Error::ResourceUnavailable`] if the configured font file
/// cannot be read, or if no usable face is available at all.
pub fn draw(
    canvas: &mut RgbaImage,
    text: &str,
    y: i32,
    style: &VectorText,
    fonts: &FontBook,
) -> Result<(), Error> {
    let fontdb = fonts.fonts_for(style)?;
    let family = resolve_family(&fontdb, &style.font_family).ok_or_else(|| match &style.font_path {
        Some(path) => Error::unavailable(path.display(), "no usable font face"),
        None => Error::unavailable(format!("font family {:?}", style.font_family), "no system fonts"),
    })?;

    let mut options = Options::default();
    options.fontdb = fontdb;
    options.font_family = family.clone();

    let (width, height) = canvas.dimensions();
    let svg = text_svg(width, height, text, style.left_margin, y, &family, style);
    let tree = Tree::from_str(&svg, &options).map_err(|e| Error::unavailable("text layout", e))?;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| Error::unavailable("text pixmap", format!("{width}x{height}")))?;
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

    blend_text(canvas, &pixmap);
    Ok(())
}

/// Builds the SVG document for one line of text.
fn text_svg(width: u32, height: u32, text: &str, x: i32, y: i32, family: &str, style: &VectorText) -> String {
    let [r, g, b] = style.color;
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><text x="{x}" y="{y}" font-family="{family}" font-size="{size}" fill="#{r:02x}{g:02x}{b:02x}">{text}</text></svg>"##,
        family = escape(family),
        size = style.font_size * POINTS_TO_PIXELS,
        text = escape(text),
    )
}

/// Escapes XML markup characters.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Blends a rasterized text layer of the canvas's size over the canvas.
fn blend_text(canvas: &mut RgbaImage, text: &Pixmap) {
    for (dst, src) in canvas.pixels_mut().zip(text.pixels()) {
        if src.alpha() != 0 {
            *dst = over(src.demultiply(), *dst);
        }
    }
}

/// Straight-alpha source-over; `src` must not be fully transparent.
fn over(src: ColorU8, dst: Rgba<u8>) -> Rgba<u8> {
    let src_a = f32::from(src.alpha()) / 255.0;
    let dst_a = f32::from(dst[3]) / 255.0 * (1.0 - src_a);
    let out_a = src_a + dst_a;

    let channel = |s: u8, d: u8| ((f32::from(s) * src_a + f32::from(d) * dst_a) / out_a).round() as u8;
    Rgba([
        channel(src.red(), dst[0]),
        channel(src.green(), dst[1]),
        channel(src.blue(), dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

// ============================================================================
// Tests
// ============================================================================
