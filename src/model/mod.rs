//! Model Module
//!
//! Plain record types exchanged between the store, the service layer and
//! the wire protocol.
//!
//! ## Ownership
//! Records are ordinary `Clone` values. Nothing in the crate hands out a
//! reference into stored state: the store copies on the way in and on the
//! way out, so a caller can mutate what it holds freely.

mod laptop;
mod memory;

pub use laptop::{
    Cpu, Gpu, Keyboard, KeyboardLayout, Laptop, Panel, Resolution, Screen, Storage,
    StorageDriver, Timestamp, Weight,
};
pub use memory::{Memory, MemoryUnit};
