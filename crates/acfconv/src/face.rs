use std::{fmt, num::NonZeroU16};

use crate::{glyph::F26Dot6, AcfError, GlyphBitmap, Result};

/// A positive pixel size, applied to both axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PixelSize(NonZeroU16);

impl PixelSize {
    pub const DEFAULT: PixelSize = match NonZeroU16::new(16) {
        Some(px) => PixelSize(px),
        None => unreachable!(),
    };

    pub fn new(px: u32) -> Result<Self> {
        u16::try_from(px)
            .ok()
            .and_then(NonZeroU16::new)
            .map(PixelSize)
            .ok_or(AcfError::InvalidPixelSize(px))
    }

    pub fn get(self) -> u16 {
        self.0.get()
    }
}

impl Default for PixelSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PixelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// A sized font face that can rasterize the first 256 code points.
///
/// Implemented by the outline backend in [`crate::raster`] and by decoded
/// [`crate::AcfFont`]s.
pub trait FontFace {
    fn family_name(&self) -> &str;

    /// Style name, for example `Regular` or `Bold`.
    fn style_name(&self) -> &str;

    /// Sets the square pixel size used by [`FontFace::line_height`] and
    /// [`FontFace::rasterize`].
    fn set_pixel_size(&mut self, size: PixelSize);

    /// Line height at the current size.
    fn line_height(&self) -> F26Dot6;

    fn line_height_px(&self) -> i32 {
        self.line_height().to_pixels()
    }

    /// Rasterizes `code_point` at the current size. Code points the face does
    /// not map yield the face's fallback glyph, never an error.
    fn rasterize(&self, code_point: u8) -> Result<GlyphBitmap>;
}

impl<F: FontFace + ?Sized> FontFace for Box<F> {
    fn family_name(&self) -> &str {
        (**self).family_name()
    }

    fn style_name(&self) -> &str {
        (**self).style_name()
    }

    fn set_pixel_size(&mut self, size: PixelSize) {
        (**self).set_pixel_size(size)
    }

    fn line_height(&self) -> F26Dot6 {
        (**self).line_height()
    }

    fn rasterize(&self, code_point: u8) -> Result<GlyphBitmap> {
        (**self).rasterize(code_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_size_rejects_zero_and_huge() {
        assert!(matches!(PixelSize::new(0), Err(AcfError::InvalidPixelSize(0))));
        assert!(matches!(
            PixelSize::new(70_000),
            Err(AcfError::InvalidPixelSize(70_000))
        ));
        assert_eq!(PixelSize::new(16).unwrap(), PixelSize::default());
        assert_eq!(PixelSize::new(1).unwrap().get(), 1);
    }
}
