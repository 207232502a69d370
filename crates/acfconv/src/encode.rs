//! ACF writer.
use std::io::Write;

use log::{debug, info, trace};

use crate::{
    format::{
        PixelFormat, END_MAGIC, GLYPH_COUNT, MAGIC, MAX_NAME_LEN, RECORD_HEADER_LEN, VERSION,
    },
    AcfError, FontFace, GlyphBitmap, PixelSize, Result,
};

/// Rasterizes code points 0..=255 of `face` at `pixel_size` and writes the
/// ACF document to `sink`.
///
/// The header is validated before anything is written. Each glyph record is
/// assembled in memory and handed to the sink in one `write_all`, so a failing
/// sink never receives half a record. On error the bytes already written are
/// not a valid document and should be discarded.
pub fn encode<F, W>(face: &mut F, pixel_size: PixelSize, mut sink: W) -> Result<()>
where
    F: FontFace + ?Sized,
    W: Write,
{
    face.set_pixel_size(pixel_size);

    let header = encode_header(face)?;
    debug!(
        "encoding {} {} at {pixel_size}, line height {}px",
        face.family_name(),
        face.style_name(),
        face.line_height_px()
    );
    sink.write_all(&header)?;

    let mut written = header.len();
    let mut inked = 0usize;
    let mut record = Vec::with_capacity(RECORD_HEADER_LEN + 64 * 64);
    for code_point in 0..=u8::MAX {
        let glyph = face.rasterize(code_point)?;
        record.clear();
        append_record(&mut record, code_point, &glyph)?;
        trace!(
            "glyph {code_point:#04x}: {}x{} at ({}, {}) advance {}",
            glyph.width,
            glyph.height,
            glyph.left,
            glyph.top,
            glyph.advance_px()
        );
        sink.write_all(&record)?;
        written += record.len();
        if !glyph.is_empty() {
            inked += 1;
        }
    }

    sink.write_all(&END_MAGIC)?;
    sink.flush()?;
    written += END_MAGIC.len();
    info!(
        "wrote {written} bytes: {GLYPH_COUNT} glyphs, {inked} with bitmaps ({} {})",
        face.family_name(),
        face.style_name()
    );
    Ok(())
}

/// [`encode`] into a fresh buffer.
pub fn encode_to_vec<F>(face: &mut F, pixel_size: PixelSize) -> Result<Vec<u8>>
where
    F: FontFace + ?Sized,
{
    let mut out = Vec::new();
    encode(face, pixel_size, &mut out)?;
    Ok(out)
}

fn encode_header<F: FontFace + ?Sized>(face: &F) -> Result<Vec<u8>> {
    let height = face.line_height_px();
    let height = u16::try_from(height).map_err(|_| AcfError::HeightOverflow(height))?;

    let mut out = Vec::new();
    out.extend(MAGIC);
    out.push(VERSION);
    out.push(PixelFormat::Alpha.as_byte());
    out.extend(u16::to_le_bytes(height));
    out.extend(u16::to_le_bytes(0)); // kerning pairs
    append_name(&mut out, "family", face.family_name())?;
    append_name(&mut out, "style", face.style_name())?;
    Ok(out)
}

fn append_name(out: &mut Vec<u8>, field: &'static str, name: &str) -> Result<()> {
    if name.contains('\0') {
        return Err(AcfError::InvalidName { field });
    }
    if name.len() > MAX_NAME_LEN {
        return Err(AcfError::NameTooLong {
            field,
            len: name.len(),
            max: MAX_NAME_LEN,
        });
    }
    out.push(name.len() as u8 + 1);
    out.extend(name.as_bytes());
    out.push(0);
    Ok(())
}

fn append_record(out: &mut Vec<u8>, code_point: u8, glyph: &GlyphBitmap) -> Result<()> {
    if glyph.pixels.len() != glyph.expected_len() {
        return Err(AcfError::BitmapSizeMismatch {
            code_point,
            len: glyph.pixels.len(),
            expected: glyph.expected_len(),
        });
    }
    let width: u8 = fit(code_point, "width", glyph.width.into())?;
    let height: u8 = fit(code_point, "height", glyph.height.into())?;
    let left: i8 = fit(code_point, "left bearing", glyph.left.into())?;
    let top: i8 = fit(code_point, "top bearing", glyph.top.into())?;
    let advance: u8 = fit(code_point, "advance", glyph.advance_px().into())?;

    out.push(width);
    out.push(height);
    out.push(left as u8);
    out.push(top as u8);
    out.push(advance);
    out.extend(&glyph.pixels);
    Ok(())
}

fn fit<T: TryFrom<i64>>(code_point: u8, field: &'static str, value: i64) -> Result<T> {
    T::try_from(value).map_err(|_| AcfError::FieldOverflow {
        code_point,
        field,
        value,
    })
}
