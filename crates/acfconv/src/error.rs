use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcfError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no font rasterizer available: {hint}")]
    MissingRasterizer { hint: &'static str },
    #[error("font parse error: {0}")]
    FontParse(String),
    #[error("invalid pixel size {0}: must be positive")]
    InvalidPixelSize(u32),
    #[error("{field} name is {len} bytes, at most {max} fit the length prefix")]
    NameTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    #[error("invalid {field} name")]
    InvalidName { field: &'static str },
    #[error("glyph {code_point}: {field} {value} does not fit its byte field")]
    FieldOverflow {
        code_point: u8,
        field: &'static str,
        value: i64,
    },
    #[error("font height {0}px does not fit the header")]
    HeightOverflow(i32),
    #[error("glyph {code_point}: bitmap has {len} bytes, expected {expected}")]
    BitmapSizeMismatch {
        code_point: u8,
        len: usize,
        expected: usize,
    },
    #[error("invalid magic bytes")]
    BadMagic,
    #[error("invalid ending magic bytes")]
    BadEndMagic,
    #[error("unsupported ACF version {0}")]
    UnsupportedVersion(u8),
    #[error("unsupported pixel format {0}")]
    UnsupportedPixelFormat(u8),
    #[error("invalid font height 0")]
    InvalidHeight,
    #[error("ACF kerning is not supported ({0} pairs)")]
    KerningUnsupported(u16),
    #[error("unexpected end of data at offset {offset}")]
    Truncated { offset: usize },
    #[error("{0} bytes after ending magic")]
    TrailingData(usize),
}

pub type Result<T> = std::result::Result<T, AcfError>;
