use std::{fs, io::Read, path::Path};

use log::debug;

use crate::{
    format::{AcfMetadata, PixelFormat, END_MAGIC, GLYPH_COUNT, MAGIC, VERSION},
    glyph::F26Dot6,
    AcfError, FontFace, GlyphBitmap, PixelSize, Result,
};

/// A decoded ACF document.
///
/// Parsing is strict: anything the desktop's reader would refuse is refused
/// here as well, so a file that loads is a file the desktop can use.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcfFont {
    pub metadata: AcfMetadata,
    glyphs: Vec<GlyphBitmap>,
}

impl AcfFont {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn read<R: Read>(reader: R) -> Result<Self> {
        let mut buf = Vec::new();
        let mut reader = reader;
        reader.read_to_end(&mut buf)?;
        Self::from_bytes(&buf)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut r = ByteReader::new(bytes);

        if r.take(3)? != MAGIC {
            return Err(AcfError::BadMagic);
        }
        let version = r.u8()?;
        if version != VERSION {
            return Err(AcfError::UnsupportedVersion(version));
        }
        let pixel_format = match r.u8()? {
            b if PixelFormat::from_byte(b) == Some(PixelFormat::Alpha) => PixelFormat::Alpha,
            other => return Err(AcfError::UnsupportedPixelFormat(other)),
        };
        let height = r.u16()?;
        if height == 0 {
            return Err(AcfError::InvalidHeight);
        }
        let kerning_pairs = r.u16()?;
        if kerning_pairs > 0 {
            return Err(AcfError::KerningUnsupported(kerning_pairs));
        }
        let family_name = r.pascal_string("family")?;
        let style_name = r.pascal_string("style")?;

        let mut glyphs = Vec::with_capacity(GLYPH_COUNT);
        for _ in 0..GLYPH_COUNT {
            let width = r.u8()?;
            let glyph_height = r.u8()?;
            let left = r.u8()? as i8;
            let top = r.u8()? as i8;
            let advance = r.u8()?;
            let pixels = r.take(width as usize * glyph_height as usize)?.to_vec();
            glyphs.push(GlyphBitmap {
                width: width.into(),
                height: glyph_height.into(),
                left: left.into(),
                top: top.into(),
                advance: F26Dot6::from_pixels(advance.into()),
                pixels,
            });
        }

        if r.take(3)? != END_MAGIC {
            return Err(AcfError::BadEndMagic);
        }
        if r.remaining() > 0 {
            return Err(AcfError::TrailingData(r.remaining()));
        }

        debug!("decoded ACF {family_name} {style_name}, height {height}px");
        Ok(Self {
            metadata: AcfMetadata {
                version,
                pixel_format,
                height,
                family_name,
                style_name,
            },
            glyphs,
        })
    }

    pub fn height(&self) -> u16 {
        self.metadata.height
    }

    /// Glyph for `ch`, or `None` above U+00FF.
    pub fn glyph(&self, ch: char) -> Option<&GlyphBitmap> {
        let idx = u8::try_from(u32::from(ch)).ok()?;
        self.glyphs.get(idx as usize)
    }

    /// All 256 glyphs in code point order.
    pub fn glyphs(&self) -> impl Iterator<Item = (u8, &GlyphBitmap)> {
        self.glyphs.iter().enumerate().map(|(i, g)| (i as u8, g))
    }

    /// Number of glyphs that carry a bitmap.
    pub fn inked_count(&self) -> usize {
        self.glyphs.iter().filter(|g| !g.is_empty()).count()
    }
}

/// Bitmap fonts have a single size; [`FontFace::set_pixel_size`] is ignored
/// and re-encoding reproduces the decoded document.
impl FontFace for AcfFont {
    fn family_name(&self) -> &str {
        &self.metadata.family_name
    }

    fn style_name(&self) -> &str {
        &self.metadata.style_name
    }

    fn set_pixel_size(&mut self, _size: PixelSize) {}

    fn line_height(&self) -> F26Dot6 {
        F26Dot6::from_pixels(self.metadata.height.into())
    }

    fn rasterize(&self, code_point: u8) -> Result<GlyphBitmap> {
        Ok(self.glyphs[code_point as usize].clone())
    }
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.offset + n;
        let Some(slice) = self.bytes.get(self.offset..end) else {
            return Err(AcfError::Truncated {
                offset: self.offset,
            });
        };
        self.offset = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn pascal_string(&mut self, field: &'static str) -> Result<String> {
        let len = self.u8()? as usize;
        let mut raw = self.take(len)?;
        if let [rest @ .., 0] = raw {
            raw = rest;
        }
        String::from_utf8(raw.to_vec()).map_err(|_| AcfError::InvalidName { field })
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }
}
