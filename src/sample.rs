//! Sample Module
//!
//! Random but plausible laptops for demos, tests and benchmarks.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Builder;

use crate::model::{
    Cpu, Gpu, Keyboard, KeyboardLayout, Laptop, Memory, MemoryUnit, Panel, Resolution, Screen,
    Storage, StorageDriver, Timestamp, Weight,
};

const LAPTOP_BRANDS: &[&str] = &["Apple", "Dell", "Lenovo"];
const KEYBOARD_LAYOUTS: &[KeyboardLayout] = &[
    KeyboardLayout::Qwerty,
    KeyboardLayout::Qwertz,
    KeyboardLayout::Azerty,
];
const PANELS: &[Panel] = &[Panel::Ips, Panel::Oled];

/// Random laptop generator
pub struct Generator {
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator; the same seed yields the same laptops
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn new_keyboard(&mut self) -> Keyboard {
        Keyboard {
            layout: self.pick(KEYBOARD_LAYOUTS),
            backlit: self.rng.gen_bool(0.5),
        }
    }

    pub fn new_cpu(&mut self) -> Cpu {
        let brand = self.pick(&["Intel", "AMD"]);
        let name = match brand {
            "Intel" => self.pick(&[
                "Xeon E-2286M",
                "Core i9-9980HK",
                "Core i7-9750H",
                "Core i5-9400F",
                "Core i3-1005G1",
            ]),
            _ => self.pick(&[
                "Ryzen 7 PRO 2700U",
                "Ryzen 5 PRO 3500U",
                "Ryzen 3 PRO 3200GE",
            ]),
        };

        let number_cores = self.rng.gen_range(2..=8);
        let number_threads = self.rng.gen_range(number_cores..=12);
        let min_ghz = self.rng.gen_range(2.0..3.5);
        let max_ghz = self.rng.gen_range(min_ghz..5.0);

        Cpu {
            brand: brand.to_string(),
            name: name.to_string(),
            number_cores,
            number_threads,
            min_ghz,
            max_ghz,
        }
    }

    pub fn new_gpu(&mut self) -> Gpu {
        let brand = self.pick(&["NVIDIA", "AMD"]);
        let name = match brand {
            "NVIDIA" => self.pick(&["RTX 2060", "RTX 2070", "GTX 1660-Ti", "GTX 1070"]),
            _ => self.pick(&["RX 590", "RX 580", "RX 5700-XT", "RX Vega-56"]),
        };

        let min_ghz = self.rng.gen_range(1.0..1.5);
        let max_ghz = self.rng.gen_range(min_ghz..2.0);

        Gpu {
            brand: brand.to_string(),
            name: name.to_string(),
            min_ghz,
            max_ghz,
            memory: Memory::gigabytes(self.rng.gen_range(2..=6)),
        }
    }

    pub fn new_ram(&mut self) -> Memory {
        Memory::gigabytes(self.rng.gen_range(4..=64))
    }

    pub fn new_ssd(&mut self) -> Storage {
        Storage {
            driver: StorageDriver::Ssd,
            memory: Memory::new(self.rng.gen_range(128..=1024), MemoryUnit::Gigabyte),
        }
    }

    pub fn new_hdd(&mut self) -> Storage {
        Storage {
            driver: StorageDriver::Hdd,
            memory: Memory::terabytes(self.rng.gen_range(1..=6)),
        }
    }

    pub fn new_screen(&mut self) -> Screen {
        let height = self.rng.gen_range(1080..=4320);
        let width = height * 16 / 9;

        Screen {
            size_inch: self.rng.gen_range(13.0..17.0),
            resolution: Resolution { width, height },
            panel: self.pick(PANELS),
            multitouch: self.rng.gen_bool(0.5),
        }
    }

    pub fn new_laptop(&mut self) -> Laptop {
        let brand = self.pick(LAPTOP_BRANDS);
        let name = match brand {
            "Apple" => self.pick(&["Macbook Air", "Macbook Pro"]),
            "Dell" => self.pick(&["Latitude", "Vostro", "XPS", "Alienware"]),
            _ => self.pick(&["Thinkpad X1", "Thinkpad P1", "Thinkpad P53"]),
        };

        Laptop {
            id: self.new_id(),
            brand: brand.to_string(),
            name: name.to_string(),
            cpu: self.new_cpu(),
            ram: self.new_ram(),
            gpus: vec![self.new_gpu()],
            storages: vec![self.new_ssd(), self.new_hdd()],
            screen: self.new_screen(),
            keyboard: self.new_keyboard(),
            weight: Some(Weight::Kg(self.rng.gen_range(1.0..3.0))),
            price_usd: self.rng.gen_range(1500.0..3500.0),
            release_year: self.rng.gen_range(2015..=2019),
            updated_at: Timestamp::now(),
        }
    }

    /// Random v4 UUID drawn from this generator's rng
    fn new_id(&mut self) -> String {
        Builder::from_random_bytes(self.rng.gen()).into_uuid().to_string()
    }

    fn pick<T: Copy>(&mut self, choices: &[T]) -> T {
        // Every call site passes a non-empty literal list.
        *choices
            .choose(&mut self.rng)
            .unwrap_or(&choices[0])
    }
}
