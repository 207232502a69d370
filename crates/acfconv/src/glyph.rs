use std::fmt;

/// A 26.6 fixed-point value: the low 6 bits are the fractional pixel.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct F26Dot6(i32);

impl F26Dot6 {
    pub const ZERO: Self = Self(0);

    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> i32 {
        self.0
    }

    pub const fn from_pixels(px: i32) -> Self {
        Self(px * 64)
    }

    /// Converts a fractional pixel value, rounding to the nearest 1/64.
    pub fn from_f32(px: f32) -> Self {
        Self((px * 64.0).round() as i32)
    }

    /// Whole pixels, truncating toward zero. For non-negative values this is `bits >> 6`.
    pub const fn to_pixels(self) -> i32 {
        self.0 / 64
    }

    /// Rounds to the nearest whole pixel, half-way cases rounding up.
    pub const fn round_to_grid(self) -> Self {
        Self((self.0 + 32) & !63)
    }
}

impl fmt::Debug for F26Dot6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F26Dot6({})", self.0 as f32 / 64.0)
    }
}

/// The rasterized form of one code point.
///
/// Code points without ink (space, or a zero-sized fallback) are still a
/// `GlyphBitmap`, just with `width == 0 && height == 0` and no pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphBitmap {
    /// Bitmap width in pixels
    pub width: u32,
    /// Bitmap height in pixels
    pub height: u32,
    /// Horizontal offset of the bitmap from the pen position
    pub left: i32,
    /// Distance from the baseline up to the first bitmap row
    pub top: i32,
    /// Pen advance after drawing this glyph
    pub advance: F26Dot6,
    /// Row-major alpha coverage, one byte per pixel
    pub pixels: Vec<u8>,
}

impl GlyphBitmap {
    pub fn empty(advance: F26Dot6) -> Self {
        Self {
            width: 0,
            height: 0,
            left: 0,
            top: 0,
            advance,
            pixels: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn advance_px(&self) -> i32 {
        self.advance.to_pixels()
    }

    /// Number of pixel bytes `width * height` calls for.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Coverage at `(x, y)`, or 0 outside the bitmap.
    pub fn coverage(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return 0;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels.get(idx).copied().unwrap_or(0)
    }
}
