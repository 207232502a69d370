//! ACF container layout.
//!
//! ```text
//! "ACF" version:u8 pixel_format:u8 height:u16le kerning_pairs:u16le
//! family:pstr style:pstr
//! 256 x { width:u8 height:u8 left:i8 top:i8 advance:u8 pixels:[u8; width*height] }
//! "FCA"
//! ```
//!
//! `pstr` is a length byte followed by the name and a NUL; the length counts
//! the NUL.

pub const MAGIC: [u8; 3] = *b"ACF";
pub const END_MAGIC: [u8; 3] = *b"FCA";
pub const VERSION: u8 = 0;
/// Records per document, one for each code point 0..=255.
pub const GLYPH_COUNT: usize = 256;
pub const RECORD_HEADER_LEN: usize = 5;
/// Magic, version, pixel format, height and kerning count.
pub const FIXED_HEADER_LEN: usize = 9;
/// Longest name whose length byte (name + NUL) still fits in a `u8`.
pub const MAX_NAME_LEN: usize = u8::MAX as usize - 1;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelFormat {
    /// One byte of coverage per pixel
    #[default]
    Alpha,
    /// Eight pixels per byte. Reserved; never written.
    Mono,
}

impl PixelFormat {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(PixelFormat::Alpha),
            1 => Some(PixelFormat::Mono),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            PixelFormat::Alpha => 0,
            PixelFormat::Mono => 1,
        }
    }
}

/// Header fields that precede the glyph records.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcfMetadata {
    pub version: u8,
    pub pixel_format: PixelFormat,
    /// Line height in pixels
    pub height: u16,
    pub family_name: String,
    pub style_name: String,
}

impl AcfMetadata {
    /// Encoded size of the header, names included.
    pub fn encoded_len(&self) -> usize {
        FIXED_HEADER_LEN + self.family_name.len() + 2 + self.style_name.len() + 2
    }
}
