//! Cycle collector state for the gcguard runtime, and the scoped guards that suspend it around
//! code that must not see a collection pass.

#[macro_use]
extern crate log;

pub use gcguard_common as common;

pub mod gc;
mod settings;

pub use settings::Settings;
