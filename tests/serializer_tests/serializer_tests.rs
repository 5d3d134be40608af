//! Serializer Tests
//!
//! Tests for binary and JSON laptop files.

use std::fs;

use tempfile::TempDir;

use pcbook::error::CatalogError;
use pcbook::model::{Laptop, MemoryUnit, Weight};
use pcbook::sample::Generator;
use pcbook::serializer::{
    binary_to_json, read_binary_file, read_json_file, write_binary_file, write_json_file,
    HEADER_SIZE, MAGIC,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup() -> (TempDir, Laptop) {
    let dir = TempDir::new().unwrap();
    let laptop = Generator::with_seed(42).new_laptop();
    (dir, laptop)
}

/// Replace random floats with exactly representable ones so text round trips
/// compare equal
fn with_round_floats(mut laptop: Laptop) -> Laptop {
    laptop.price_usd = 1999.5;
    laptop.cpu.min_ghz = 2.5;
    laptop.cpu.max_ghz = 4.25;
    for gpu in &mut laptop.gpus {
        gpu.min_ghz = 1.0;
        gpu.max_ghz = 1.5;
    }
    laptop.screen.size_inch = 15.5;
    laptop.weight = Some(Weight::Kg(1.75));
    laptop
}

// =============================================================================
// Binary File Tests
// =============================================================================

#[test]
fn test_binary_file_round_trip() {
    let (dir, laptop) = setup();
    let path = dir.path().join("laptop.bin");

    write_binary_file(&laptop, &path).unwrap();

    assert_eq!(read_binary_file(&path).unwrap(), laptop);
}

#[test]
fn test_binary_file_header() {
    let (dir, laptop) = setup();
    let path = dir.path().join("laptop.bin");
    write_binary_file(&laptop, &path).unwrap();

    let bytes = fs::read(&path).unwrap();

    assert_eq!(&bytes[0..4], MAGIC);
    let len = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]) as usize;
    assert_eq!(bytes.len(), HEADER_SIZE + len);
}

#[test]
fn test_binary_file_overwrites_existing() {
    let (dir, laptop) = setup();
    let path = dir.path().join("laptop.bin");
    fs::write(&path, vec![0xAB; 4096]).unwrap();

    write_binary_file(&laptop, &path).unwrap();

    assert_eq!(read_binary_file(&path).unwrap(), laptop);
}

#[test]
fn test_binary_file_detects_corruption() {
    let (dir, laptop) = setup();
    let path = dir.path().join("laptop.bin");
    write_binary_file(&laptop, &path).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&path, &bytes).unwrap();

    assert!(matches!(read_binary_file(&path), Err(CatalogError::Serialization(_))));
}

#[test]
fn test_binary_file_bad_magic() {
    let (dir, laptop) = setup();
    let path = dir.path().join("laptop.bin");
    write_binary_file(&laptop, &path).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    bytes[0] = b'X';
    fs::write(&path, &bytes).unwrap();

    assert!(matches!(read_binary_file(&path), Err(CatalogError::Serialization(_))));
}

#[test]
fn test_binary_file_truncated() {
    let (dir, laptop) = setup();
    let path = dir.path().join("laptop.bin");
    write_binary_file(&laptop, &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();
    assert!(matches!(read_binary_file(&path), Err(CatalogError::Serialization(_))));

    fs::write(&path, &bytes[..HEADER_SIZE - 1]).unwrap();
    assert!(matches!(read_binary_file(&path), Err(CatalogError::Serialization(_))));
}

#[test]
fn test_binary_file_missing() {
    let dir = TempDir::new().unwrap();
    let result = read_binary_file(&dir.path().join("nope.bin"));
    assert!(matches!(result, Err(CatalogError::Io(_))));
}

// =============================================================================
// JSON File Tests
// =============================================================================

#[test]
fn test_json_file_round_trip() {
    let (dir, laptop) = setup();
    let laptop = with_round_floats(laptop);
    let path = dir.path().join("laptop.json");

    write_json_file(&laptop, &path).unwrap();

    assert_eq!(read_json_file(&path).unwrap(), laptop);
}

#[test]
fn test_json_keeps_default_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.json");

    write_json_file(&Laptop::default(), &path).unwrap();
    let text = fs::read_to_string(&path).unwrap();

    assert!(text.contains("\"price_usd\""));
    assert!(text.contains("\"release_year\""));
    assert!(text.contains("\"gpus\": []"));
}

#[test]
fn test_json_rejects_garbage() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ \"brand\": ").unwrap();

    assert!(matches!(read_json_file(&path), Err(CatalogError::Serialization(_))));
}

#[test]
fn test_binary_to_json() {
    let (dir, laptop) = setup();
    let mut laptop = with_round_floats(laptop);
    laptop.ram.unit = MemoryUnit::Terabyte;
    let binary = dir.path().join("laptop.bin");
    let json = dir.path().join("laptop.json");
    write_binary_file(&laptop, &binary).unwrap();

    let converted = binary_to_json(&binary, &json).unwrap();

    assert_eq!(converted, laptop);
    assert_eq!(read_json_file(&json).unwrap(), laptop);
}
