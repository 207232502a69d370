use acfconv::{AcfFont, GlyphBitmap};

/// Coverage ramp, lightest to darkest.
const RAMP: &[u8] = b" .:-=+*#%@";

/// A coverage canvas that prints as ASCII art.
pub struct PreviewCanvas {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl PreviewCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Draws `glyph` with its bitmap's top-left corner at `(x, y)`. Overlapping
    /// pixels keep the higher coverage.
    pub fn blit(&mut self, x: i32, y: i32, glyph: &GlyphBitmap) {
        for gy in 0..glyph.height as i32 {
            for gx in 0..glyph.width as i32 {
                let (cx, cy) = (x + gx, y + gy);
                if cx < 0 || cy < 0 || cx as usize >= self.width || cy as usize >= self.height {
                    continue;
                }
                let cell = &mut self.cells[cy as usize * self.width + cx as usize];
                *cell = (*cell).max(glyph.coverage(gx, gy));
            }
        }
    }

    pub fn into_ascii_string(self) -> String {
        let mut out = String::new();
        for (li, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            if li > 0 {
                out.push('\n');
            }
            let line: String = row
                .iter()
                .map(|&c| RAMP[(c as usize * (RAMP.len() - 1) + 127) / 255] as char)
                .collect();
            out.push_str(line.trim_end());
        }
        out
    }
}

/// Convenience: lay out `text` on one baseline and render it as ASCII art.
/// Characters above U+00FF are drawn with the glyph for `?`.
pub fn render_preview(font: &AcfFont, text: &str) -> String {
    let mut placed = Vec::new();
    let mut pen = 0i32;
    for ch in text.chars() {
        let Some(glyph) = font.glyph(ch).or_else(|| font.glyph('?')) else {
            continue;
        };
        placed.push((pen, glyph));
        pen += glyph.advance_px();
    }

    let min_x = placed.iter().map(|(p, g)| p + g.left).min().unwrap_or(0).min(0);
    let max_x = placed
        .iter()
        .map(|(p, g)| (p + g.left + g.width as i32).max(p + g.advance_px()))
        .max()
        .unwrap_or(0);
    let ascent = placed.iter().map(|(_, g)| g.top).max().unwrap_or(0).max(0);
    let descent = placed
        .iter()
        .map(|(_, g)| g.height as i32 - g.top)
        .max()
        .unwrap_or(0)
        .max(0);

    let mut canvas = PreviewCanvas::new((max_x - min_x) as usize, (ascent + descent) as usize);
    for (p, g) in placed {
        canvas.blit(p + g.left - min_x, ascent - g.top, g);
    }
    canvas.into_ascii_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use acfconv::{encode_to_vec, F26Dot6, PixelSize};
    use acfconv::test_support::SyntheticFace;

    fn solid(width: u32, height: u32, top: i32) -> GlyphBitmap {
        GlyphBitmap {
            width,
            height,
            left: 0,
            top,
            advance: F26Dot6::from_pixels(width as i32 + 1),
            pixels: vec![255; (width * height) as usize],
        }
    }

    fn font_with(glyphs: Vec<(u8, GlyphBitmap)>) -> AcfFont {
        let mut face = SyntheticFace::new("Test", "Regular");
        for cp in 0..=255u8 {
            face = face.with_glyph(cp, GlyphBitmap::empty(F26Dot6::from_pixels(2)));
        }
        for (cp, g) in glyphs {
            face = face.with_glyph(cp, g);
        }
        let doc = encode_to_vec(&mut face, PixelSize::default()).unwrap();
        AcfFont::from_bytes(&doc).unwrap()
    }

    #[test]
    fn glyphs_share_a_baseline() {
        let font = font_with(vec![(b'a', solid(2, 2, 2)), (b'p', solid(2, 3, 1))]);
        let out = render_preview(&font, "ap");
        assert_eq!(out, "@@\n@@ @@\n   @@\n   @@");
    }

    #[test]
    fn unknown_chars_fall_back_to_question_mark() {
        let font = font_with(vec![(b'?', solid(1, 1, 1))]);
        assert_eq!(render_preview(&font, "\u{263a}"), "@");
    }

    #[test]
    fn blank_text_renders_empty() {
        let font = font_with(vec![]);
        assert_eq!(render_preview(&font, "   "), "");
    }
}
