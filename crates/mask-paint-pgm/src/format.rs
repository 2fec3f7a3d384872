//! Wire-level PGM parsing and serialization.
//!
//! The header is whitespace-delimited free text: the `P5` magic token
//! followed by three decimal numbers (width, height, maxval), in any
//! line arrangement, with `#` comment lines permitted between tokens.
//! The pixel payload starts at the byte after the newline terminating
//! the line that carried the last header token.

use log::debug;
use mask_paint_core::{GrayRaster, GrayRasterView};

/// Magic token of the binary-payload PGM variant.
pub const MAGIC: &str = "P5";

/// Header tokens must appear within this many leading bytes.
const HEADER_SCAN_LIMIT: usize = 1024;

/// Errors returned by [`decode`].
#[derive(thiserror::Error, Debug)]
pub enum PgmFormatError {
    #[error("unsupported magic token {found:?}, only binary PGM (\"P5\") is accepted")]
    UnsupportedFormat { found: String },
    #[error("header ended before width, height and maxval were all read")]
    MissingHeaderField,
    #[error("malformed header token {token:?}")]
    BadHeaderToken { token: String },
    #[error("width, height and maxval must all be positive")]
    ZeroDimension,
    #[error("maxval {max_val} requires two-byte samples, which are not supported")]
    UnsupportedMaxVal { max_val: usize },
    #[error("image dimensions overflow the addressable payload size")]
    DimensionOverflow,
    #[error("payload truncated (expected {expected} bytes, got {actual})")]
    TruncatedPayload { expected: usize, actual: usize },
}

/// A decoded binary PGM image borrowing its pixel payload.
///
/// Invariant: `samples.len() == width * height`, one byte per pixel,
/// row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PgmImage<'a> {
    pub width: usize,
    pub height: usize,
    pub max_val: u16,
    pub samples: &'a [u8],
}

impl<'a> PgmImage<'a> {
    /// Wrap a grayscale raster with the conventional `maxval = 255`.
    pub fn from_raster(raster: &'a GrayRaster) -> Self {
        Self::from_view(raster.view())
    }

    /// Wrap a borrowed grayscale raster with `maxval = 255`.
    pub fn from_view(view: GrayRasterView<'a>) -> Self {
        Self {
            width: view.width,
            height: view.height,
            max_val: 255,
            samples: view.data,
        }
    }

    /// Copy the payload into an owned raster.
    pub fn to_raster(&self) -> GrayRaster {
        GrayRaster {
            width: self.width,
            height: self.height,
            data: self.samples.to_vec(),
        }
    }
}

/// True when the line's first non-space/tab byte is `#`.
fn is_comment(line: &[u8]) -> bool {
    line.iter()
        .find(|&&b| b != b' ' && b != b'\t')
        .is_some_and(|&b| b == b'#')
}

/// Decode a binary PGM buffer into a zero-copy image view.
pub fn decode(bytes: &[u8]) -> Result<PgmImage<'_>, PgmFormatError> {
    let window = &bytes[..bytes.len().min(HEADER_SCAN_LIMIT)];

    let mut fields = [0usize; 3];
    let mut found = 0usize;
    let mut magic_seen = false;
    let mut pos = 0usize;
    let mut payload_start = None;

    while pos < window.len() {
        let line_end = window[pos..].iter().position(|&b| b == b'\n');
        let (line, next) = match line_end {
            Some(i) => (&window[pos..pos + i], pos + i + 1),
            None => (&window[pos..], window.len()),
        };
        pos = next;

        if is_comment(line) {
            continue;
        }

        for token in line
            .split(|&b| b == b' ' || b == b'\t')
            .filter(|t| !t.is_empty())
        {
            let text = std::str::from_utf8(token).map_err(|_| PgmFormatError::BadHeaderToken {
                token: String::from_utf8_lossy(token).into_owned(),
            })?;
            if !magic_seen {
                if text != MAGIC {
                    return Err(PgmFormatError::UnsupportedFormat {
                        found: text.to_owned(),
                    });
                }
                magic_seen = true;
                continue;
            }
            if found == 3 {
                break;
            }
            fields[found] = text.parse().map_err(|_| PgmFormatError::BadHeaderToken {
                token: text.to_owned(),
            })?;
            found += 1;
        }

        if magic_seen && found == 3 {
            payload_start = Some(pos);
            break;
        }
    }

    let Some(payload_start) = payload_start else {
        return Err(PgmFormatError::MissingHeaderField);
    };

    let [width, height, max_val] = fields;
    if width == 0 || height == 0 || max_val == 0 {
        return Err(PgmFormatError::ZeroDimension);
    }
    if max_val > 255 {
        return Err(PgmFormatError::UnsupportedMaxVal { max_val });
    }
    let expected = width
        .checked_mul(height)
        .ok_or(PgmFormatError::DimensionOverflow)?;

    let payload = &bytes[payload_start..];
    if payload.len() < expected {
        return Err(PgmFormatError::TruncatedPayload {
            expected,
            actual: payload.len(),
        });
    }

    debug!("decoded PGM header: {width}x{height}, maxval {max_val}");
    Ok(PgmImage {
        width,
        height,
        max_val: max_val as u16,
        // Trailing bytes beyond width*height are ignored.
        samples: &payload[..expected],
    })
}

/// Serialize to the canonical layout: `"P5\nW H\nMAX\n"` then the raw
/// payload, with no comments and no padding.
pub fn encode(img: &PgmImage<'_>) -> Vec<u8> {
    let header = format!("{MAGIC}\n{} {}\n{}\n", img.width, img.height, img.max_val);
    let mut out = Vec::with_capacity(header.len() + img.samples.len());
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(img.samples);
    out
}
