//! Guards used before any thread was recorded as primary. Runs in its own test binary so that
//! nothing else records the primary thread first.

use gcguard_vm::common::thread::{mark_primary_thread, primary_thread};
use gcguard_vm::gc::{self, GcController};
use std::thread;

fn worker_guard_passes_through() {
    thread::spawn(|| {
        let guard = gc::scoped_gc_guard();
        assert!(guard.is_pass_through());
        assert!(gc::isenabled());
    })
    .join()
    .unwrap();
}

#[test]
fn worker_using_the_guard_first_does_not_become_primary() {
    let _ = env_logger::builder().is_test(true).try_init();
    gc::enable();

    worker_guard_passes_through();
    assert_eq!(primary_thread(), None);
    assert_eq!(gc::global_collector().primary_thread(), None);

    // the launching thread is not primary either until it says so
    {
        let guard = gc::scoped_gc_guard();
        assert!(guard.is_pass_through());
        assert!(gc::isenabled());
    }
    assert_eq!(primary_thread(), None);

    assert!(mark_primary_thread());
    assert_eq!(
        gc::global_collector().primary_thread(),
        Some(thread::current().id())
    );
    {
        let guard = gc::scoped_gc_guard();
        assert_eq!(guard.was_enabled(), Some(true));
        assert!(!gc::isenabled());
    }
    assert!(gc::isenabled());

    worker_guard_passes_through();
    assert_eq!(primary_thread(), Some(thread::current().id()));
}
