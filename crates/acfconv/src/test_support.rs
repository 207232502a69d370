//! Test support utilities for acfconv.
//!
//! This module provides helper types that are useful for testing the encoder
//! without a real outline font, but are not part of the public API.

use std::collections::BTreeMap;

use crate::{glyph::F26Dot6, AcfError, FontFace, GlyphBitmap, PixelSize, Result};

/// A deterministic monospace face that needs no font file.
///
/// Printable code points (0x21..=0x7E and 0xA1..=0xFF) get a `size/2` by
/// `3*size/4` box with a position-dependent coverage pattern; everything else
/// is inkless. Advance is 0.6em and the line height 1.25em unless overridden.
pub struct SyntheticFace {
    family: String,
    style: String,
    size: PixelSize,
    line_height: Option<F26Dot6>,
    overrides: BTreeMap<u8, GlyphBitmap>,
    fail_at: Option<u8>,
}

impl SyntheticFace {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
            size: PixelSize::default(),
            line_height: None,
            overrides: BTreeMap::new(),
            fail_at: None,
        }
    }

    pub fn with_line_height(mut self, line_height: F26Dot6) -> Self {
        self.line_height = Some(line_height);
        self
    }

    /// Replaces the generated glyph for `code_point`.
    pub fn with_glyph(mut self, code_point: u8, glyph: GlyphBitmap) -> Self {
        self.overrides.insert(code_point, glyph);
        self
    }

    /// Makes [`FontFace::rasterize`] fail for `code_point`.
    pub fn failing_at(mut self, code_point: u8) -> Self {
        self.fail_at = Some(code_point);
        self
    }

    pub fn pixel_size(&self) -> PixelSize {
        self.size
    }

    fn is_printable(code_point: u8) -> bool {
        matches!(code_point, 0x21..=0x7E | 0xA1..=0xFF)
    }
}

impl FontFace for SyntheticFace {
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
        let px = i32::from(self.size.get());
        self.line_height
            .unwrap_or_else(|| F26Dot6::from_bits(px * 64 + px * 16))
    }

    fn rasterize(&self, code_point: u8) -> Result<GlyphBitmap> {
        if self.fail_at == Some(code_point) {
            return Err(AcfError::FontParse(format!(
                "synthetic failure at {code_point}"
            )));
        }
        if let Some(glyph) = self.overrides.get(&code_point) {
            return Ok(glyph.clone());
        }
        let px = u32::from(self.size.get());
        let advance = F26Dot6::from_bits((px * 64 * 3 / 5) as i32);
        if !Self::is_printable(code_point) {
            return Ok(GlyphBitmap::empty(advance));
        }
        let width = (px / 2).max(1);
        let height = (px * 3 / 4).max(1);
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 31 + y * 17 + u32::from(code_point)) % 256) as u8);
            }
        }
        Ok(GlyphBitmap {
            width,
            height,
            left: (px / 8) as i32,
            top: height as i32,
            advance,
            pixels,
        })
    }
}
