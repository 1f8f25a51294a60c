//! Hue palettes.

use palette::Srgb;

/// Number of color entries in a hue.
pub const HUE_COLORS: usize = 32;

/// A color substitution palette of 32 fifteen-bit (`xRRRRRGGGGGBBBBB`) colors.
///
/// Gump pixels are tinted by their red intensity: the five high bits of the
/// source red channel select the palette entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hue {
    colors: [u16; HUE_COLORS],
}

impl Hue {
    pub fn new(colors: [u16; HUE_COLORS]) -> Self {
        Self { colors }
    }

    /// A hue mapping every intensity to the same color.
    pub fn uniform(color: Srgb<u8>) -> Self {
        Self::new([to_rgb555(color); HUE_COLORS])
    }

    /// Substitutes `color` through this palette.
    pub fn tint(&self, color: Srgb<u8>) -> Srgb<u8> {
        let index = usize::from(color.red >> 3);
        from_rgb555(self.colors[index])
    }
}

/// Expands a 15-bit color to 24-bit, replicating the high bits into the low.
pub fn from_rgb555(color: u16) -> Srgb<u8> {
    let expand = |c: u16| -> u8 {
        let c = (c & 0x1F) as u8;
        (c << 3) | (c >> 2)
    };
    Srgb::new(expand(color >> 10), expand(color >> 5), expand(color))
}

/// Truncates a 24-bit color to 15-bit.
pub fn to_rgb555(color: Srgb<u8>) -> u16 {
    (u16::from(color.red >> 3) << 10) | (u16::from(color.green >> 3) << 5) | u16::from(color.blue >> 3)
}
