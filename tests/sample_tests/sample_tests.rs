//! Sample Generator Tests
//!
//! Tests verify:
//! - Seeded generators are deterministic
//! - Generated values stay in their documented ranges

use pcbook::model::{StorageDriver, Weight};
use pcbook::sample::Generator;

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_seeded_generators_agree() {
    let a = Generator::with_seed(7).new_cpu();
    let b = Generator::with_seed(7).new_cpu();
    assert_eq!(a, b);
}

#[test]
fn test_seeded_laptops_share_ids() {
    let a = Generator::with_seed(9).new_laptop();
    let b = Generator::with_seed(9).new_laptop();
    assert_eq!(a.id, b.id);
    assert_ne!(a.id, Generator::with_seed(10).new_laptop().id);
}

// =============================================================================
// Range Tests
// =============================================================================

#[test]
fn test_cpu_ranges() {
    let mut generator = Generator::with_seed(1);
    for _ in 0..200 {
        let cpu = generator.new_cpu();
        assert!((2..=8).contains(&cpu.number_cores));
        assert!(cpu.number_threads >= cpu.number_cores && cpu.number_threads <= 12);
        assert!(cpu.min_ghz >= 2.0 && cpu.min_ghz < 3.5);
        assert!(cpu.max_ghz >= cpu.min_ghz && cpu.max_ghz < 5.0);
    }
}

#[test]
fn test_laptop_shape() {
    let mut generator = Generator::with_seed(3);
    for _ in 0..50 {
        let laptop = generator.new_laptop();

        assert!(uuid::Uuid::parse_str(&laptop.id).is_ok());
        assert_eq!(laptop.storages.len(), 2);
        assert_eq!(laptop.storages[0].driver, StorageDriver::Ssd);
        assert_eq!(laptop.storages[1].driver, StorageDriver::Hdd);
        assert!((1500.0..3500.0).contains(&laptop.price_usd));
        assert!((2015..=2019).contains(&laptop.release_year));

        let kg = laptop.weight.map(|w| w.as_kg()).unwrap();
        assert!((1.0..3.0).contains(&kg));
    }
}

#[test]
fn test_weight_in_pounds_converts_to_kg() {
    let kg = Weight::Lb(2.204_622_621_8).as_kg();
    assert!((kg - 1.0).abs() < 1e-9);
    assert_eq!(Weight::Kg(1.5).as_kg(), 1.5);
}
