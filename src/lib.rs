//! paperdoll-renderer: Character paperdoll compositing for legacy gump art
//!
//! This crate composes a character portrait from a body gump and the gumps of
//! its worn items, applies hues and the profile's alignment, and stamps the
//! character's name and title.
//!
//! # Example
//!
//! ```
//! use paperdoll_renderer::{
//!     ItemData, LayerDescriptor, MemoryAssets, Paperdoll, PaperdollDrawer, PixelRun, Race,
//!     VisualProfile,
//! };
//! use palette::Srgb;
//!
//! let assets = MemoryAssets::new()
//!     .with_gump(0x7D1, vec![PixelRun::new(0, 0, Srgb::new(90, 90, 90), 262)])
//!     .with_gump(400, vec![PixelRun::new(0, 0, Srgb::new(200, 160, 120), 6)])
//!     .with_gump(50_435, vec![PixelRun::new(2, 0, Srgb::new(255, 255, 255), 2)])
//!     .with_item(0x1517, ItemData::wearable(435));
//!
//! let doll = Paperdoll::new(LayerDescriptor::body(Race::Human, false, 0))
//!     .with_item(LayerDescriptor::item(0x1517, false, 0))
//!     .with_name("Avatar")
//!     .with_title("the Stranger");
//!
//! let drawer = PaperdollDrawer::from_source(&assets);
//! let image = drawer.draw_paperdoll(&doll, &VisualProfile::classic()).unwrap();
//!
//! assert_eq!(image.dimensions(), (262, 324));
//! assert_eq!(image.get_pixel(10, 15).0, [255, 255, 255, 255]);
//! ```
//!
//! # Serializable Profiles
//!
//! [`VisualProfile`] round-trips through JSON, so profiles can live in
//! configuration files:
//!
//! ```
//! use paperdoll_renderer::VisualProfile;
//!
//! let json = VisualProfile::modern("assets/paperdoll.png").to_json().unwrap();
//! let restored = VisualProfile::from_json(&json).unwrap();
//! assert_eq!(restored, VisualProfile::modern("assets/paperdoll.png"));
//! ```

mod assets;
mod drawer;
mod error;
mod layer;
mod paperdoll;
mod profile;
mod race;
mod text;

pub use assets::{GumpArt, GumpIndex, GumpRecord, Hue, HueTable, ItemData, MemoryAssets, PixelRun, TileData};
pub use drawer::PaperdollDrawer;
pub use error::{AssetKind, Error};
pub use layer::resolve::{
    FEMALE_GUMP_OFFSET, GENDERED_GUMP_THRESHOLD, MALE_GUMP_OFFSET, MAX_SOURCE_ID, gendered_gump,
};
pub use layer::{LayerDescriptor, LayerRenderer, Offset, ResolvedSprite, resolve};
pub use paperdoll::Paperdoll;
pub use profile::{
    BitmapText, CLASSIC_BACKGROUND_GUMP, CLASSIC_CANVAS_SIZE, CanvasSource, ColorOrder, TextPolicy,
    VectorText, VisualProfile,
};
pub use race::Race;
pub use text::{FontBook, draw_text};
