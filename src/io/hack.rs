//! Byte-level JPEG glitching
//!
//! JPEG headers have a roughly standard size, so overwriting bytes past a fixed
//! offset corrupts scan data without breaking the file structure.

use crate::io::configuration::{COPY_SUFFIX, JPG_BYTE_START};
use crate::io::error::{ImgprocError, Result, WithPath, invalid_parameter, out_of_range};
use log::debug;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Overwrite instruction: write `hex` at slot `position`
///
/// Slot `k` of an edit whose payload spans `n` bytes starts at byte
/// `JPG_BYTE_START + k * n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteEdit {
    /// Slot index, in units of the payload size
    pub position: usize,
    /// Even-length hexadecimal payload
    pub hex: String,
}

impl FromStr for ByteEdit {
    type Err = ImgprocError;

    /// Parse `POSITION:HEX`, e.g. `12:ff00`
    fn from_str(s: &str) -> Result<Self> {
        let (position, hex) = s
            .split_once(':')
            .ok_or_else(|| invalid_parameter("edit", &s, &"expected POSITION:HEX"))?;
        let position = position
            .trim()
            .parse()
            .ok()
            .ok_or_else(|| invalid_parameter("edit", &s, &"position must be a non-negative integer"))?;
        let hex = hex.trim().to_string();
        decode_hex(&hex)?;
        Ok(Self { position, hex })
    }
}

/// Decode an even-length, non-empty hexadecimal string into bytes
///
/// # Errors
///
/// Returns an error if the string is empty, of odd length, or not hexadecimal
pub fn decode_hex(hex: &str) -> Result<Vec<u8>> {
    if hex.is_empty() || hex.len() % 2 != 0 {
        return Err(invalid_parameter(
            "hex",
            &hex,
            &"must hold a non-empty even number of characters",
        ));
    }
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid_parameter("hex", &hex, &"not strictly hexadecimal"));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| invalid_parameter("hex", &hex, &"not strictly hexadecimal"))
        })
        .collect()
}

/// Path of the working copy: `<stem>_copy.<ext>` next to the original
pub fn copy_path(path: &Path) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let name = match path.extension() {
        Some(ext) => format!("{stem}{COPY_SUFFIX}.{}", ext.to_string_lossy()),
        None => format!("{stem}{COPY_SUFFIX}"),
    };
    path.with_file_name(name)
}

/// Byte range `[start, end)` covered by slot `position` of a `size`-byte payload
fn edit_span(position: usize, size: usize) -> Option<(usize, usize)> {
    let start = position.checked_mul(size)?.checked_add(JPG_BYTE_START)?;
    Some((start, start.checked_add(size)?))
}

/// Overwrite bytes of a JPEG file
///
/// When `make_copy` is set the original is left untouched and the edits go to
/// a copy. Returns the path of the modified file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read or written
/// - The content is not a JPEG
/// - A payload is not valid hexadecimal
/// - An edit offset overflows or extends past the end of the file
pub fn switch_bytes_jpeg(path: &Path, edits: &[ByteEdit], make_copy: bool) -> Result<PathBuf> {
    let mut data = std::fs::read(path).with_path(path)?;
    if image::guess_format(&data).ok() != Some(image::ImageFormat::Jpeg) {
        return Err(ImgprocError::InvalidSourceData {
            reason: format!("'{}' is not a JPEG file", path.display()),
        });
    }

    for edit in edits {
        let payload = decode_hex(&edit.hex)?;
        let (start, end) = edit_span(edit.position, payload.len()).ok_or_else(|| {
            invalid_parameter(
                "edit",
                &format!("{}:{}", edit.position, edit.hex),
                &"byte offset overflows",
            )
        })?;
        let len = data.len();
        let target = data
            .get_mut(start..end)
            .ok_or_else(|| out_of_range("byte", end - 1, len))?;
        target.copy_from_slice(&payload);
        debug!("Wrote {} bytes at offset {start}", payload.len());
    }

    let destination = if make_copy {
        copy_path(path)
    } else {
        path.to_path_buf()
    };
    std::fs::write(&destination, &data).map_err(|e| ImgprocError::FileSystem {
        path: destination.clone(),
        operation: "write",
        source: e,
    })?;
    Ok(destination)
}
