//! Serializable visual profiles.
//!
//! A [`VisualProfile`] selects how the canvas is prepared, where layers land,
//! and how the name and title are drawn. Two presets exist:
//!
//! - [`VisualProfile::classic`]: transparent 262x324 canvas with the paperdoll
//!   frame gump as its first layer, vector text.
//! - [`VisualProfile::modern`]: a pre-rendered background image as the
//!   canvas, centered bitmap text.
//!
//! Profiles serialize to camelCase JSON:
//!
//! ```json
//! {
//!   "canvas": { "kind": "procedural", "width": 262, "height": 324, "backgroundGump": 2001 },
//!   "layerOffset": { "dx": 8, "dy": 15 },
//!   "text": { "kind": "vector", "fontFamily": "UO Classic", "fontSize": 10.0, "leftMargin": 40, "color": [25, 25, 25] },
//!   "nameY": 277,
//!   "titleY": 295,
//!   "colorOrder": "rgb"
//! }
//! ```

use std::path::PathBuf;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::layer::Offset;

/// Paperdoll frame gump drawn first by the classic profile.
pub const CLASSIC_BACKGROUND_GUMP: u16 = 0x7D1;

/// Classic canvas dimensions.
pub const CLASSIC_CANVAS_SIZE: (u32, u32) = (262, 324);

// ============================================================================
// Canvas Source
// ============================================================================

/// Where the canvas comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum CanvasSource {
    /// A fully transparent canvas with a background gump drawn unshifted.
    Procedural {
        width: u32,
        height: u32,
        #[serde(rename = "backgroundGump")]
        background_gump: u16,
    },

    /// A background image file used as the canvas itself.
    Image { path: PathBuf },
}

// ============================================================================
// Text Policy
// ============================================================================

/// Vector font text at a fixed left margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct VectorText {
    /// Font file to load. Without it, system fonts are searched for
    /// `font_family`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,

    pub font_family: String,

    /// Size in points.
    pub font_size: f32,

    pub left_margin: i32,

    pub color: [u8; 3],
}

impl Default for VectorText {
    fn default() -> Self {
        Self {
            font_path: None,
            font_family: "UO Classic".to_string(),
            font_size: 10.0,
            left_margin: 40,
            color: [25, 25, 25],
        }
    }
}

/// Bitmap font text, horizontally centered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct BitmapText {
    pub color: [u8; 3],
}

impl Default for BitmapText {
    fn default() -> Self {
        Self { color: [0, 0, 0] }
    }
}

/// How name and title are drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum TextPolicy {
    Vector(VectorText),
    Bitmap(BitmapText),
}

// ============================================================================
// Color Order
// ============================================================================

/// Channel order of decoded gump runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum ColorOrder {
    #[default]
    Rgb,
    Bgr,
}

impl ColorOrder {
    /// Reorders a decoded color into RGB.
    pub fn arrange(self, color: Srgb<u8>) -> Srgb<u8> {
        match self {
            Self::Rgb => color,
            Self::Bgr => Srgb::new(color.blue, color.green, color.red),
        }
    }
}

// ============================================================================
// VisualProfile
// ============================================================================

/// Complete rendering configuration for one paperdoll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct VisualProfile {
    pub canvas: CanvasSource,

    /// Shift applied to the body and every item layer. Never applied to the
    /// background gump of a procedural canvas.
    pub layer_offset: Offset,

    pub text: TextPolicy,

    /// Name position. Baseline for vector text, cell top for bitmap text.
    pub name_y: i32,

    pub title_y: i32,

    #[serde(default)]
    pub color_order: ColorOrder,
}

impl VisualProfile {
    /// The classic paperdoll.
    pub fn classic() -> Self {
        let (width, height) = CLASSIC_CANVAS_SIZE;
        Self {
            canvas: CanvasSource::Procedural {
                width,
                height,
                background_gump: CLASSIC_BACKGROUND_GUMP,
            },
            layer_offset: Offset::PAPERDOLL,
            text: TextPolicy::Vector(VectorText::default()),
            name_y: 277,
            title_y: 295,
            color_order: ColorOrder::Rgb,
        }
    }

    /// The modern paperdoll, drawn over a pre-rendered background image.
    pub fn modern(background: impl Into<PathBuf>) -> Self {
        Self {
            canvas: CanvasSource::Image {
                path: background.into(),
            },
            layer_offset: Offset::PAPERDOLL,
            text: TextPolicy::Bitmap(BitmapText::default()),
            name_y: 268,
            title_y: 286,
            color_order: ColorOrder::Rgb,
        }
    }

    /// Uses `path` as the vector font. No effect on bitmap text.
    pub fn with_font_file(mut self, path: impl Into<PathBuf>) -> Self {
        if let TextPolicy::Vector(ref mut vector) = self.text {
            vector.font_path = Some(path.into());
        }
        self
    }

    pub fn with_text(mut self, text: TextPolicy) -> Self {
        self.text = text;
        self
    }

    pub fn with_color_order(mut self, order: ColorOrder) -> Self {
        self.color_order = order;
        self
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================
