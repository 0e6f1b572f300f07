//! Process-wide record of the primary thread.
//!
//! The identity is stored once, by [`mark_primary_thread`] called from `main` at startup, and
//! compared explicitly. Until then no thread is primary: asking never records the caller.

use once_cell::sync::OnceCell;
use std::thread::{self, ThreadId};

static PRIMARY_THREAD: OnceCell<ThreadId> = OnceCell::new();

/// Record the calling thread as the primary thread.
///
/// Returns `false` if a different thread was recorded first, in which case the earlier record
/// is kept.
pub fn mark_primary_thread() -> bool {
    let current = thread::current().id();
    *PRIMARY_THREAD.get_or_init(|| current) == current
}

/// The recorded primary thread, `None` before [`mark_primary_thread`] ran.
pub fn primary_thread() -> Option<ThreadId> {
    PRIMARY_THREAD.get().copied()
}

pub fn is_primary_thread() -> bool {
    primary_thread() == Some(thread::current().id())
}

cfg_if::cfg_if! {
    if #[cfg(feature = "threading")] {
        pub trait ThreadingConstraint: Send + Sync {}
        impl<T: Send + Sync> ThreadingConstraint for T {}
    } else {
        pub trait ThreadingConstraint {}
        impl<T> ThreadingConstraint for T {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_thread_is_primary() {
        // asking from a worker first must not make the worker primary
        let worker = thread::spawn(|| (primary_thread(), is_primary_thread()))
            .join()
            .unwrap();
        assert_eq!(worker, (None, false));
        assert_eq!(primary_thread(), None);

        assert!(mark_primary_thread());
        assert!(is_primary_thread());
        assert_eq!(primary_thread(), Some(thread::current().id()));

        let other = thread::spawn(|| (mark_primary_thread(), is_primary_thread()))
            .join()
            .unwrap();
        assert_eq!(other, (false, false));
        assert!(mark_primary_thread());
    }
}
