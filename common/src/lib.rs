//! Shared primitives for the gcguard crates: locks, reference counting and atomics that switch
//! between thread-safe and single-threaded versions with the `threading` feature, plus the
//! primary-thread registry.

pub mod atomic;
pub mod lock;
pub mod rc;
pub mod thread;
