//! Cycle collector state and scoped suspension of automatic collection.
//!
//! Reference counting frees acyclic garbage immediately; only garbage cycles wait for a
//! collection pass. Passes run from allocation sites through [`Collector::gc`], so they can
//! interleave with any code that allocates, including callbacks re-entered from native code
//! in the middle of a parse. A [`GcGuard`] closes that window:
//!
//! | guard | suspends on | forced pass on exit |
//! | ----- | ----------- | ------------------- |
//! | [`scoped_gc_guard`] | the primary thread only | never |
//! | [`scoped_gc_guard_any_thread`] | any thread | if configured |
//!
//! Both capture the enabled flag before touching it, disable automatic collection only if it was
//! enabled, and put it back when dropped, on normal exit and during unwinding alike. A guard
//! that did not disable anything restores nothing, which keeps nested guards correct.
//!
//! The flag is shared by every thread using the collector and nothing serializes guards on
//! different threads. Two overlapping [`scoped_gc_guard_any_thread`] scopes on different threads
//! can leave the flag in a state neither of them expects; keep those scopes short and confined to
//! one thread at a time.

mod collector;
mod controller;
mod guard;
mod utils;

pub use collector::{
    collect, disable, enable, global_collector, isenabled, Collector, CycleSweeper,
    GLOBAL_COLLECTOR,
};
pub use controller::GcController;
pub use guard::{
    scoped_gc_guard, scoped_gc_guard_any_thread, scoped_gc_guard_any_thread_with,
    scoped_gc_guard_with, Affinity, GcGuard, GuardConfig,
};
pub use utils::{CollectError, GcResult, GcStats};
