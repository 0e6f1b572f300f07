//! [`lock_api`]-based lock types that are or are not `Send + Sync` depending on whether the
//! `threading` feature of this crate is enabled.

use lock_api::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

cfg_if::cfg_if! {
    if #[cfg(feature = "threading")] {
        pub use parking_lot::{RawMutex, RawRwLock};
    } else {
        mod cell_lock;
        pub use cell_lock::{RawCellMutex as RawMutex, RawCellRwLock as RawRwLock};
    }
}

pub type RtMutex<T> = Mutex<RawMutex, T>;
pub type RtMutexGuard<'a, T> = MutexGuard<'a, RawMutex, T>;

pub type RtRwLock<T> = RwLock<RawRwLock, T>;
pub type RtRwLockReadGuard<'a, T> = RwLockReadGuard<'a, RawRwLock, T>;
pub type RtRwLockWriteGuard<'a, T> = RwLockWriteGuard<'a, RawRwLock, T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_lock_excludes_readers() {
        let lock = RtRwLock::new(());
        let read = lock.read();
        assert!(lock.try_write().is_none());
        drop(read);
        let write = lock.try_write();
        assert!(write.is_some());
        assert!(lock.try_read().is_none());
    }

    #[test]
    fn mutex_try_lock_fails_while_held() {
        let m = RtMutex::new(1);
        let guard = m.lock();
        assert!(m.try_lock().is_none());
        drop(guard);
        *m.lock() += 1;
        assert_eq!(*m.lock(), 2);
    }
}
