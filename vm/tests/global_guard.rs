//! The global collector's flag is shared by the whole test binary, so everything touching it
//! lives in this single test.

use gcguard_vm::common::thread::mark_primary_thread;
use gcguard_vm::gc::{self, GcController, GuardConfig};
use std::thread;

#[test]
fn global_guards() {
    let _ = env_logger::builder().is_test(true).try_init();
    assert!(mark_primary_thread());
    gc::enable();
    assert_eq!(
        gc::global_collector().primary_thread(),
        Some(thread::current().id())
    );

    {
        let _outer = gc::scoped_gc_guard();
        assert!(!gc::isenabled());
        {
            let inner = gc::scoped_gc_guard();
            assert_eq!(inner.was_enabled(), Some(false));
        }
        assert!(!gc::isenabled());
    }
    assert!(gc::isenabled());

    thread::spawn(|| {
        let primary_only = gc::scoped_gc_guard();
        assert!(primary_only.is_pass_through());
        assert!(gc::isenabled());
        {
            let _any = gc::scoped_gc_guard_any_thread();
            assert!(!gc::isenabled());
        }
        assert!(gc::isenabled());
    })
    .join()
    .unwrap();
    assert!(gc::isenabled());

    {
        let _noop = gc::scoped_gc_guard_with(GuardConfig::new(false, true));
        assert!(gc::isenabled());
    }

    let collections = gc::global_collector().stats().collections;
    drop(gc::scoped_gc_guard_any_thread_with(GuardConfig::new(true, true)));
    assert!(gc::isenabled());
    assert_eq!(gc::global_collector().stats().collections, collections + 1);

    // an explicit pass still runs while the collector is off
    gc::disable();
    assert!(gc::collect().is_ok());
    {
        let guard = gc::scoped_gc_guard();
        assert_eq!(guard.was_enabled(), Some(false));
    }
    assert!(!gc::isenabled());
    gc::enable();
}
