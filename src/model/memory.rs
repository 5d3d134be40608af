//! Memory quantities
//!
//! A (value, unit) pair. Two quantities are only comparable after both are
//! normalized to bits.

use serde::{Deserialize, Serialize};

/// Unit of a memory quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MemoryUnit {
    /// Unspecified; normalizes to zero bits
    #[default]
    Unknown,
    Bit,
    Byte,
    Kilobyte,
    Megabyte,
    Gigabyte,
    Terabyte,
}

impl MemoryUnit {
    /// Left shift that converts one unit of `self` into bits
    ///
    /// Byte is 2^3 bits, every step above it another 2^10.
    fn bit_shift(self) -> Option<u32> {
        match self {
            MemoryUnit::Unknown => None,
            MemoryUnit::Bit => Some(0),
            MemoryUnit::Byte => Some(3),
            MemoryUnit::Kilobyte => Some(13),
            MemoryUnit::Megabyte => Some(23),
            MemoryUnit::Gigabyte => Some(33),
            MemoryUnit::Terabyte => Some(43),
        }
    }
}

/// A memory size such as `16 GB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Memory {
    pub value: u64,
    pub unit: MemoryUnit,
}

impl Memory {
    pub fn new(value: u64, unit: MemoryUnit) -> Self {
        Self { value, unit }
    }

    pub fn gigabytes(value: u64) -> Self {
        Self::new(value, MemoryUnit::Gigabyte)
    }

    pub fn terabytes(value: u64) -> Self {
        Self::new(value, MemoryUnit::Terabyte)
    }

    /// Normalize to a bit count
    ///
    /// Computed in 128 bits: `u64::MAX` terabytes still fits.
    pub fn to_bits(&self) -> u128 {
        match self.unit.bit_shift() {
            Some(shift) => u128::from(self.value) << shift,
            None => 0,
        }
    }
}
