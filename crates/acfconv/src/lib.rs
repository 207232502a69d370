//! acfconv: ACF bitmap font toolkit.
//! Features: outline font rasterization, ACF encoding and decoding.

pub mod encode;
mod error;
mod face;
mod font;
pub mod format;
mod glyph;
pub mod raster;
pub use encode::{encode, encode_to_vec};
pub use error::{AcfError, Result};
pub use face::{FontFace, PixelSize};
pub use font::AcfFont;
pub use format::{AcfMetadata, PixelFormat};
pub use glyph::{F26Dot6, GlyphBitmap};
pub use raster::Rasterizer;

// Test utilities
pub mod test_support;
