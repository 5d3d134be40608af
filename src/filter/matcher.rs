//! Filter evaluation
//!
//! Pure predicate: no side effects, no error conditions.

use crate::model::Laptop;

use super::Filter;

/// Decide whether `laptop` satisfies every clause of `filter`
///
/// All bounds are inclusive: a laptop sitting exactly on a threshold
/// qualifies.
pub fn matches(filter: &Filter, laptop: &Laptop) -> bool {
    if filter.max_price_usd > 0.0 && laptop.price_usd > filter.max_price_usd {
        return false;
    }

    if laptop.cpu.number_cores < filter.min_cpu_cores {
        return false;
    }

    if laptop.cpu.min_ghz < filter.min_cpu_ghz {
        return false;
    }

    laptop.ram.to_bits() >= filter.min_ram.to_bits()
}
