//! Serialization for LabelMap
//!
//! Mixed text header + binary data format.
//!
//! ```text
//! \nLabelMap Version 1\n
//! w = W, h = H, nbytes = N\n
//! max_label = M\n
//! <raw u32 data, little-endian, N bytes>
//! \n
//! ```
//!
//! `max_label` is informational; it is checked against the payload on read.

use crate::error::{Error, Result};
use crate::label::LabelMap;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// LabelMap format version
const LABELMAP_VERSION: i32 = 1;

/// Maximum cell count for a serialized LabelMap (2^29)
const MAX_LABELMAP_CELLS: u64 = 1 << 29;

/// Maximum input size in bytes.
const MAX_INPUT_SIZE: u64 = 2_200_000_000;

impl LabelMap {
    /// Read a LabelMap from a reader.
    pub fn read_from_reader(reader: &mut impl Read) -> Result<Self> {
        let mut buf = Vec::new();
        reader.take(MAX_INPUT_SIZE + 1).read_to_end(&mut buf)?;
        if buf.len() as u64 > MAX_INPUT_SIZE {
            return Err(Error::DecodeError(format!(
                "input too large: exceeds maximum allowed size of {MAX_INPUT_SIZE} bytes"
            )));
        }
        Self::read_from_bytes(&buf)
    }

    /// Read a LabelMap from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::read_from_reader(&mut BufReader::new(file))
    }

    /// Read a LabelMap from a byte slice.
    pub fn read_from_bytes(data: &[u8]) -> Result<Self> {
        let header = parse_header(data)?;

        let ncells = header.width as u64 * header.height as u64;
        if ncells > MAX_LABELMAP_CELLS {
            return Err(Error::DecodeError(format!(
                "LabelMap too large: {ncells} cells exceeds maximum {MAX_LABELMAP_CELLS}"
            )));
        }
        let expected_nbytes = ncells * 4;
        if header.nbytes != expected_nbytes {
            return Err(Error::DecodeError(format!(
                "LabelMap nbytes mismatch: header says {} but w*h*4 = {expected_nbytes}",
                header.nbytes
            )));
        }

        let binary_end = header.header_end + header.nbytes as usize;
        if data.len() < binary_end {
            return Err(Error::DecodeError(format!(
                "LabelMap data truncated: need {binary_end} bytes but only have {}",
                data.len()
            )));
        }
        let labels: Vec<u32> = data[header.header_end..binary_end]
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        let map = LabelMap::from_data(header.width, header.height, labels)?;
        if map.max_label() != header.max_label {
            return Err(Error::DecodeError(format!(
                "LabelMap max_label mismatch: header says {} but data holds {}",
                header.max_label,
                map.max_label()
            )));
        }
        Ok(map)
    }

    /// Write a LabelMap to a writer.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> Result<()> {
        let nbytes = (self.width() as u64) * (self.height() as u64) * 4;
        writeln!(writer, "\nLabelMap Version {LABELMAP_VERSION}")?;
        writeln!(
            writer,
            "w = {}, h = {}, nbytes = {nbytes}",
            self.width(),
            self.height()
        )?;
        writeln!(writer, "max_label = {}", self.max_label())?;

        for &label in self.data() {
            writer.write_all(&label.to_le_bytes())?;
        }

        writeln!(writer)?;
        Ok(())
    }

    /// Write a LabelMap to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a LabelMap to a byte vector.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}

struct Header {
    width: u32,
    height: u32,
    nbytes: u64,
    max_label: u32,
    header_end: usize,
}

/// Parse the three text header lines. Binary data follows right after
/// the newline that ends the `max_label` line.
fn parse_header(data: &[u8]) -> Result<Header> {
    let header_end = find_header_end(data)?;
    let text = std::str::from_utf8(&data[..header_end])
        .map_err(|e| Error::DecodeError(format!("LabelMap header is not valid UTF-8: {e}")))?;
    let mut lines = text
        .lines()
        .map(|l| l.trim_matches(|c: char| c.is_ascii_whitespace()))
        .filter(|l| !l.is_empty());

    let version_line = lines
        .next()
        .ok_or_else(|| Error::DecodeError("LabelMap version line not found".to_string()))?;
    let version: i32 = version_line
        .strip_prefix("LabelMap Version ")
        .ok_or_else(|| Error::DecodeError(format!("not a LabelMap header: {version_line:?}")))?
        .trim()
        .parse()
        .map_err(|e| Error::DecodeError(format!("failed to parse LabelMap version: {e}")))?;
    if version != LABELMAP_VERSION {
        return Err(Error::DecodeError(format!(
            "invalid LabelMap version: {version}"
        )));
    }

    let dim_line = lines
        .next()
        .ok_or_else(|| Error::DecodeError("LabelMap dimension line not found".to_string()))?;
    let mut width = None;
    let mut height = None;
    let mut nbytes = None;
    for (key, value) in key_values(dim_line) {
        match key {
            "w" => width = Some(parse_field::<u32>(key, value)?),
            "h" => height = Some(parse_field::<u32>(key, value)?),
            "nbytes" => nbytes = Some(parse_field::<u64>(key, value)?),
            _ => {}
        }
    }

    let label_line = lines
        .next()
        .ok_or_else(|| Error::DecodeError("LabelMap max_label line not found".to_string()))?;
    let max_label = key_values(label_line)
        .find(|(key, _)| *key == "max_label")
        .map(|(key, value)| parse_field::<u32>(key, value))
        .transpose()?;

    match (width, height, nbytes, max_label) {
        (Some(width), Some(height), Some(nbytes), Some(max_label)) => Ok(Header {
            width,
            height,
            nbytes,
            max_label,
            header_end,
        }),
        _ => Err(Error::DecodeError(
            "LabelMap header is missing a field".to_string(),
        )),
    }
}

fn key_values(line: &str) -> impl Iterator<Item = (&str, &str)> {
    line.split(',').filter_map(|part| {
        let (key, value) = part.split_once('=')?;
        Some((key.trim(), value.trim()))
    })
}

fn parse_field<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| Error::DecodeError(format!("failed to parse LabelMap {key}: {e}")))
}

/// Byte offset right after the third non-empty header line.
fn find_header_end(data: &[u8]) -> Result<usize> {
    let scan_limit = data.len().min(256);
    let mut content_lines = 0;
    let mut pos = 0;

    while pos < scan_limit {
        let Some(offset) = data[pos..scan_limit].iter().position(|&b| b == b'\n') else {
            break;
        };
        let line_end = pos + offset;
        if data[pos..line_end].iter().any(|b| !b.is_ascii_whitespace()) {
            content_lines += 1;
            if content_lines == 3 {
                return Ok(line_end + 1);
            }
        }
        pos = line_end + 1;
    }

    Err(Error::DecodeError(
        "LabelMap header incomplete".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let labels = LabelMap::from_data(3, 1, vec![1, 1, 2]).unwrap();
        let bytes = labels.write_to_bytes().unwrap();

        let header = b"\nLabelMap Version 1\nw = 3, h = 1, nbytes = 12\nmax_label = 2\n";
        assert_eq!(&bytes[..header.len()], header);
        assert_eq!(
            &bytes[header.len()..],
            &[1, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, b'\n']
        );
    }

    #[test]
    fn test_roundtrip() {
        let labels = LabelMap::from_data(4, 2, vec![1, 1, 2, 3, 4, 4, 0x0102_0304, 3]).unwrap();
        let bytes = labels.write_to_bytes().unwrap();
        let restored = LabelMap::read_from_bytes(&bytes).unwrap();
        assert_eq!(restored, labels);
    }

    #[test]
    fn test_blank_header_lines_skipped() {
        let labels = LabelMap::from_data(2, 1, vec![1, 2]).unwrap();
        let bytes = labels.write_to_bytes().unwrap();

        // Whitespace-only lines between header lines are not header content
        let mut padded = b"\t\n".to_vec();
        padded.extend_from_slice(&bytes[..20]);
        padded.extend_from_slice(b" \t\r\n");
        padded.extend_from_slice(&bytes[20..]);
        assert_eq!(&bytes[..20], b"\nLabelMap Version 1\n");

        let restored = LabelMap::read_from_bytes(&padded).unwrap();
        assert_eq!(restored, labels);
    }

    #[test]
    fn test_roundtrip_empty() {
        let labels = LabelMap::new(0, 5);
        let bytes = labels.write_to_bytes().unwrap();
        let restored = LabelMap::read_from_bytes(&bytes).unwrap();
        assert_eq!(restored.dimensions(), (0, 5));
        assert!(restored.is_empty());
    }

    #[test]
    fn test_file_roundtrip() {
        let labels = LabelMap::from_data(2, 2, vec![1, 2, 2, 1]).unwrap();

        let dir = std::env::temp_dir().join("seedseg_test_labelmap");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("labels.lmap");

        labels.write_to_file(&path).unwrap();
        let restored = LabelMap::read_from_file(&path).unwrap();
        assert_eq!(restored, labels);
    }

    #[test]
    fn test_reject_bad_version() {
        let data = b"\nLabelMap Version 9\nw = 1, h = 1, nbytes = 4\nmax_label = 1\n\x01\0\0\0\n";
        assert!(LabelMap::read_from_bytes(data).is_err());
    }

    #[test]
    fn test_reject_truncated() {
        let labels = LabelMap::from_data(2, 2, vec![1, 2, 3, 4]).unwrap();
        let bytes = labels.write_to_bytes().unwrap();
        assert!(LabelMap::read_from_bytes(&bytes[..bytes.len() - 6]).is_err());
    }

    #[test]
    fn test_reject_max_label_mismatch() {
        let data = b"\nLabelMap Version 1\nw = 1, h = 1, nbytes = 4\nmax_label = 5\n\x01\0\0\0\n";
        assert!(LabelMap::read_from_bytes(data).is_err());
    }

    #[test]
    fn test_reject_garbage() {
        assert!(LabelMap::read_from_bytes(b"not a label map").is_err());
    }
}
