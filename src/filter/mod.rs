//! Filter Module
//!
//! Search predicate and its evaluator.
//!
//! ## Semantics
//! A filter is a conjunction of inclusive bounds over price, core count,
//! base clock and RAM size. A zero-valued field imposes no constraint, so
//! `Filter::default()` matches every laptop.

mod matcher;

pub use matcher::matches;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::model::Memory;

/// Search predicate over laptops
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Filter {
    /// Inclusive upper bound; `0.0` means unbounded
    pub max_price_usd: f64,

    /// Inclusive lower bound on `cpu.number_cores`
    pub min_cpu_cores: u32,

    /// Inclusive lower bound on `cpu.min_ghz`
    pub min_cpu_ghz: f64,

    /// Inclusive lower bound on `ram`, compared in bits
    pub min_ram: Memory,
}

impl Filter {
    /// Create a new filter builder
    pub fn builder() -> FilterBuilder {
        FilterBuilder::default()
    }

    /// Reject values no laptop could be meaningfully compared against
    pub fn validate(&self) -> Result<()> {
        if !self.max_price_usd.is_finite() || self.max_price_usd < 0.0 {
            return Err(CatalogError::Invalid(format!(
                "max_price_usd must be a non-negative number, got {}",
                self.max_price_usd
            )));
        }
        if !self.min_cpu_ghz.is_finite() || self.min_cpu_ghz < 0.0 {
            return Err(CatalogError::Invalid(format!(
                "min_cpu_ghz must be a non-negative number, got {}",
                self.min_cpu_ghz
            )));
        }
        Ok(())
    }
}

/// Builder for Filter
#[derive(Default)]
pub struct FilterBuilder {
    filter: Filter,
}

impl FilterBuilder {
    pub fn max_price_usd(mut self, price: f64) -> Self {
        self.filter.max_price_usd = price;
        self
    }

    pub fn min_cpu_cores(mut self, cores: u32) -> Self {
        self.filter.min_cpu_cores = cores;
        self
    }

    pub fn min_cpu_ghz(mut self, ghz: f64) -> Self {
        self.filter.min_cpu_ghz = ghz;
        self
    }

    pub fn min_ram(mut self, ram: Memory) -> Self {
        self.filter.min_ram = ram;
        self
    }

    pub fn build(self) -> Filter {
        self.filter
    }
}
