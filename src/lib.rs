//! Scoped suspension of the runtime's cycle collector.
//!
//! Wrap code that must not be interrupted by a collection pass, typically native parsing that
//! calls back into the runtime, in a guard:
//!
//! ```
//! gcguard::init();
//! {
//!     let _guard = gcguard::scoped_gc_guard();
//!     assert!(!gcguard::gc::isenabled());
//!     // parse ...
//! }
//! assert!(gcguard::gc::isenabled());
//! ```
//!
//! Acyclic objects are still freed by reference counting inside the guard; only cycle
//! collection waits. See [`gc`] for the difference between the two guard flavours.

#[macro_use]
extern crate log;

pub use gcguard_common as common;
pub use gcguard_vm::gc;
pub use gcguard_vm::gc::{
    scoped_gc_guard, scoped_gc_guard_any_thread, scoped_gc_guard_any_thread_with,
    scoped_gc_guard_with, GcGuard, GuardConfig,
};
pub use gcguard_vm::Settings;

/// Record the calling thread as the primary thread. Call it from `main` before spawning threads;
/// until it is called, [`scoped_gc_guard`] passes through on every thread.
///
/// Returns `false`, leaving the earlier record in place, if another thread got there first.
pub fn init() -> bool {
    let marked = common::thread::mark_primary_thread();
    if !marked {
        warn!(
            "primary thread already recorded as {:?}",
            common::thread::primary_thread()
        );
    }
    marked
}
