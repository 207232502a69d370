//! Outline font rasterization.
//!
//! [`Rasterizer::load`] is the capability check: it fails with
//! [`AcfError::MissingRasterizer`] when the crate was built without the
//! `fontdue` feature, before any font or output file is touched.
use std::path::Path;

use crate::{AcfError, FontFace, Result};

const MISSING_HINT: &str = "rebuild acfconv with the `fontdue` feature (enabled by default)";

/// Handle to the outline rasterization backend.
#[derive(Debug)]
pub struct Rasterizer {
    _priv: (),
}

impl Rasterizer {
    pub fn load() -> Result<Self> {
        if cfg!(feature = "fontdue") {
            Ok(Self { _priv: () })
        } else {
            Err(AcfError::MissingRasterizer { hint: MISSING_HINT })
        }
    }

    pub fn open_face(&self, path: &Path) -> Result<Box<dyn FontFace>> {
        let bytes = std::fs::read(path)?;
        self.open_face_bytes(bytes)
    }

    pub fn open_face_bytes(&self, bytes: Vec<u8>) -> Result<Box<dyn FontFace>> {
        #[cfg(feature = "fontdue")]
        {
            Ok(Box::new(outline::OutlineFace::from_bytes(bytes)?))
        }
        #[cfg(not(feature = "fontdue"))]
        {
            let _ = bytes;
            Err(AcfError::MissingRasterizer { hint: MISSING_HINT })
        }
    }
}

#[cfg(feature = "fontdue")]
pub use outline::OutlineFace;

#[cfg(feature = "fontdue")]
mod outline {
    use fontdue::{Font, FontSettings};
    use log::{debug, warn};
    use ttf_parser::name_id;

    use crate::{glyph::F26Dot6, AcfError, FontFace, GlyphBitmap, PixelSize, Result};

    /// A TrueType/OpenType face rasterized with `fontdue`.
    pub struct OutlineFace {
        font: Font,
        family: String,
        style: String,
        size: PixelSize,
    }

    impl OutlineFace {
        pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
            let (family, style) = read_names(&bytes)?;
            let font = Font::from_bytes(bytes, FontSettings::default())
                .map_err(|e| AcfError::FontParse(e.to_string()))?;
            debug!(
                "opened {family} {style}: {} glyphs, {} units/em",
                font.glyph_count(),
                font.units_per_em()
            );
            Ok(Self {
                font,
                family,
                style,
                size: PixelSize::default(),
            })
        }

        fn px(&self) -> f32 {
            f32::from(self.size.get())
        }
    }

    impl FontFace for OutlineFace {
        fn family_name(&self) -> &str {
            &self.family
        }

        fn style_name(&self) -> &str {
            &self.style
        }

        fn set_pixel_size(&mut self, size: PixelSize) {
            self.size = size;
        }

        fn line_height(&self) -> F26Dot6 {
            self.font
                .horizontal_line_metrics(self.px())
                .map(|m| F26Dot6::from_f32(m.new_line_size).round_to_grid())
                .unwrap_or_else(|| F26Dot6::from_pixels(self.size.get().into()))
        }

        fn rasterize(&self, code_point: u8) -> Result<GlyphBitmap> {
            // Unmapped characters come back as glyph 0 (.notdef).
            let (metrics, pixels) = self.font.rasterize(char::from(code_point), self.px());
            let advance = F26Dot6::from_f32(metrics.advance_width).round_to_grid();
            // the encoder rejects anything over 255 anyway
            let width = u32::try_from(metrics.width).unwrap_or(u32::MAX);
            let height = u32::try_from(metrics.height).unwrap_or(u32::MAX);
            let top = metrics
                .ymin
                .saturating_add(i32::try_from(height).unwrap_or(i32::MAX));
            if width == 0 || height == 0 {
                // keep the bearings, drop the ink
                return Ok(GlyphBitmap {
                    left: metrics.xmin,
                    top,
                    ..GlyphBitmap::empty(advance)
                });
            }
            Ok(GlyphBitmap {
                width,
                height,
                left: metrics.xmin,
                top,
                advance,
                pixels,
            })
        }
    }

    fn read_names(bytes: &[u8]) -> Result<(String, String)> {
        let face =
            ttf_parser::Face::parse(bytes, 0).map_err(|e| AcfError::FontParse(e.to_string()))?;
        let lookup = |ids: &[u16]| {
            ids.iter().find_map(|&id| {
                face.names()
                    .into_iter()
                    .filter(|n| n.name_id == id)
                    .find_map(|n| n.to_string())
                    .filter(|s| !s.is_empty())
            })
        };
        let family = lookup(&[name_id::TYPOGRAPHIC_FAMILY, name_id::FAMILY]).unwrap_or_else(|| {
            warn!("font has no family name, using \"Unknown\"");
            "Unknown".to_string()
        });
        let style = lookup(&[name_id::TYPOGRAPHIC_SUBFAMILY, name_id::SUBFAMILY])
            .unwrap_or_else(|| "Regular".to_string());
        Ok((family, style))
    }
}

#[cfg(all(test, feature = "fontdue"))]
mod tests {
    use super::*;
    use crate::PixelSize;

    const TEST_FONT: &[u8] = include_bytes!("../tests/data/test-mono.ttf");

    #[test]
    fn capability_loads_with_backend() {
        assert!(Rasterizer::load().is_ok());
    }

    #[test]
    fn reads_names_and_metrics() {
        let mut face = Rasterizer::load()
            .unwrap()
            .open_face_bytes(TEST_FONT.to_vec())
            .unwrap();
        face.set_pixel_size(PixelSize::new(16).unwrap());
        assert_eq!(face.family_name(), "Test");
        assert_eq!(face.style_name(), "Regular");
        assert_eq!(face.line_height_px(), 16);
    }

    #[test]
    fn space_is_empty_and_box_is_inked() {
        let mut face = OutlineFace::from_bytes(TEST_FONT.to_vec()).unwrap();
        face.set_pixel_size(PixelSize::new(16).unwrap());
        let space = face.rasterize(b' ').unwrap();
        assert!(space.is_empty());
        assert!(space.pixels.is_empty());
        assert_eq!(space.advance_px(), 10);

        let a = face.rasterize(b'A').unwrap();
        assert!(!a.is_empty());
        assert_eq!(a.pixels.len(), a.expected_len());
        assert!(a.top > 0);
        assert_eq!(a.advance_px(), 10);
    }

    #[test]
    fn unmapped_code_points_use_notdef() {
        let mut face = OutlineFace::from_bytes(TEST_FONT.to_vec()).unwrap();
        face.set_pixel_size(PixelSize::new(16).unwrap());
        let notdef = face.rasterize(0xE9).unwrap();
        assert!(!notdef.is_empty());
        assert_eq!(notdef, face.rasterize(0x01).unwrap());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = OutlineFace::from_bytes(b"not a font".to_vec()).err().unwrap();
        assert!(matches!(err, AcfError::FontParse(_)));
    }

    #[test]
    fn empty_glyph_keeps_rasterizer_bearings() {
        let mut face = OutlineFace::from_bytes(TEST_FONT.to_vec()).unwrap();
        face.set_pixel_size(PixelSize::new(16).unwrap());
        let space = face.rasterize(b' ').unwrap();
        let (metrics, _) = fontdue::Font::from_bytes(TEST_FONT, fontdue::FontSettings::default())
            .unwrap()
            .rasterize(' ', 16.0);
        assert_eq!(space.left, metrics.xmin);
        assert_eq!(space.top, metrics.ymin + metrics.height as i32);
        assert_eq!((space.width, space.height), (0, 0));
    }
}
