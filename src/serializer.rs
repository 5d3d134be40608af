//! Serializer Module
//!
//! Single-laptop files, for fixtures and for moving records between tools.
//!
//! ## Binary Format
//! ```text
//! ┌───────────┬─────────────┬──────────────┬───────────┬──────────────────┐
//! │ Magic (4) │ Version (2) │ Length (4)   │ CRC32 (4) │ bincode(Laptop)  │
//! └───────────┴─────────────┴──────────────┴───────────┴──────────────────┘
//! ```
//! Integers are little-endian; the CRC covers the payload only.
//!
//! ## JSON Format
//! Pretty-printed, snake_case field names, every field present even when
//! it holds its default value.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{CatalogError, Result};
use crate::model::Laptop;

/// Magic bytes identifying a binary laptop file
pub const MAGIC: &[u8; 4] = b"PCBK";

/// Binary format version
pub const VERSION: u16 = 1;

/// Magic + version + length + crc
pub const HEADER_SIZE: usize = 14;

/// Write `laptop` to `path` in the binary format
pub fn write_binary_file(laptop: &Laptop, path: &Path) -> Result<()> {
    let payload = bincode::serialize(laptop)?;
    let crc = crc32fast::hash(&payload);

    let mut writer = BufWriter::new(create(path)?);
    writer.write_all(MAGIC)?;
    writer.write_all(&VERSION.to_le_bytes())?;
    writer.write_all(&(payload.len() as u32).to_le_bytes())?;
    writer.write_all(&crc.to_le_bytes())?;
    writer.write_all(&payload)?;
    writer.flush()?;

    Ok(())
}

/// Read a laptop written by `write_binary_file`
pub fn read_binary_file(path: &Path) -> Result<Laptop> {
    let bytes = fs::read(path)?;

    if bytes.len() < HEADER_SIZE {
        return Err(CatalogError::Serialization(format!(
            "{}: truncated header ({} bytes)",
            path.display(),
            bytes.len()
        )));
    }
    if &bytes[0..4] != MAGIC {
        return Err(CatalogError::Serialization(format!(
            "{}: not a laptop file",
            path.display()
        )));
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != VERSION {
        return Err(CatalogError::Serialization(format!(
            "{}: unsupported version {}",
            path.display(),
            version
        )));
    }

    let len = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]) as usize;
    let expected_crc = u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]);

    let payload = &bytes[HEADER_SIZE..];
    if payload.len() != len {
        return Err(CatalogError::Serialization(format!(
            "{}: payload is {} bytes, header says {}",
            path.display(),
            payload.len(),
            len
        )));
    }

    let actual_crc = crc32fast::hash(payload);
    if actual_crc != expected_crc {
        return Err(CatalogError::Serialization(format!(
            "{}: checksum mismatch (expected {:08x}, got {:08x})",
            path.display(),
            expected_crc,
            actual_crc
        )));
    }

    Ok(bincode::deserialize(payload)?)
}

/// Write `laptop` to `path` as pretty JSON
pub fn write_json_file(laptop: &Laptop, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(create(path)?);
    serde_json::to_writer_pretty(&mut writer, laptop)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Read a laptop written by `write_json_file`
pub fn read_json_file(path: &Path) -> Result<Laptop> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Convert a binary laptop file into a JSON one
pub fn binary_to_json(binary: &Path, json: &Path) -> Result<Laptop> {
    let laptop = read_binary_file(binary)?;
    write_json_file(&laptop, json)?;
    Ok(laptop)
}

fn create(path: &Path) -> Result<File> {
    Ok(OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?)
}
