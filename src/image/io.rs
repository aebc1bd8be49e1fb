//! Text and PNG I/O for the conversion demo.
//!
//! - `read_float_image`: parse a `height width` header followed by rows of
//!   comma/space separated floats. Line length and dimensions are bounded.
//! - `write_byte_rows`: print a byte image as comma separated rows.
//! - `save_grayscale_u8`: write a byte image to a grayscale PNG.
use super::{GrayImageU8, ImageF32, ImageView};
use image::{GrayImage, ImageBuffer, Luma};
use std::fs;
use std::io::{BufRead, Read, Write};
use std::path::Path;

/// Longest accepted input line, newline included.
pub const MAX_LINE_BYTES: usize = 64 * 1024;
/// Largest accepted width or height.
pub const MAX_DIMENSION: usize = 4096;

/// Read a float image from text.
///
/// ```text
/// 2 3
/// 0.0, 0.5, 1.0
/// 0.25 0.75 0.1
/// ```
pub fn read_float_image<R: BufRead>(mut reader: R) -> Result<ImageF32, String> {
    let mut line = String::new();
    if read_bounded_line(&mut reader, &mut line)? == 0 {
        return Err("Missing `height width` header".to_string());
    }
    let (height, width) = parse_header(&line)?;

    let mut image = ImageF32::new(width, height);
    for y in 0..height {
        if read_bounded_line(&mut reader, &mut line)? == 0 {
            return Err(format!(
                "Expected {height} rows, input ended after {y} (row {} missing)",
                y + 1
            ));
        }
        let mut col = 0usize;
        for token in tokens(&line) {
            if col == width {
                return Err(format!(
                    "Row {} contains more than {width} values",
                    y + 1
                ));
            }
            let v: f32 = token
                .parse()
                .map_err(|e| format!("Row {}, column {}: `{token}`: {e}", y + 1, col + 1))?;
            image.set(col, y, v);
            col += 1;
        }
        if col != width {
            return Err(format!(
                "Row {} does not contain exactly {width} values (got {col})",
                y + 1
            ));
        }
    }
    Ok(image)
}

/// Print `image` one row per line, values separated by `, `.
pub fn write_byte_rows<W: Write>(image: &GrayImageU8, mut out: W) -> std::io::Result<()> {
    for row in image.rows() {
        let mut first = true;
        for v in row {
            if !first {
                out.write_all(b", ")?;
            }
            write!(out, "{v}")?;
            first = false;
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Save an 8-bit grayscale buffer to a PNG.
pub fn save_grayscale_u8(buffer: &GrayImageU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let width = u32::try_from(buffer.width()).map_err(|e| format!("Image too wide: {e}"))?;
    let height = u32::try_from(buffer.height()).map_err(|e| format!("Image too tall: {e}"))?;
    let mut data = Vec::with_capacity(buffer.pixel_count());
    for row in buffer.rows() {
        data.extend_from_slice(row);
    }
    let image: GrayImage = ImageBuffer::<Luma<u8>, Vec<u8>>::from_raw(width, height, data)
        .ok_or_else(|| "Failed to create image buffer".to_string())?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

fn read_bounded_line<R: BufRead>(reader: &mut R, line: &mut String) -> Result<usize, String> {
    line.clear();
    let limit = MAX_LINE_BYTES as u64 + 1;
    let n = reader
        .by_ref()
        .take(limit)
        .read_line(line)
        .map_err(|e| format!("Failed to read input: {e}"))?;
    if line.len() > MAX_LINE_BYTES {
        return Err(format!("Input line longer than {MAX_LINE_BYTES} bytes"));
    }
    Ok(n)
}

fn parse_header(line: &str) -> Result<(usize, usize), String> {
    let mut it = tokens(line);
    let mut next_dim = |name: &str| -> Result<usize, String> {
        let token = it
            .next()
            .ok_or_else(|| format!("Header is missing {name}"))?;
        let v: usize = token
            .parse()
            .map_err(|_| format!("Invalid {name} `{token}`"))?;
        if v == 0 || v > MAX_DIMENSION {
            return Err(format!("{name} must be in 1..={MAX_DIMENSION}, got {v}"));
        }
        Ok(v)
    };
    let height = next_dim("height")?;
    let width = next_dim("width")?;
    if let Some(extra) = it.next() {
        return Err(format!("Unexpected token `{extra}` in header"));
    }
    Ok((height, width))
}

fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
