use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::thread::ThreadId;

#[cfg(not(feature = "threading"))]
use crate::common::atomic::Radium;
use crate::common::atomic::{Ordering, RtAtomic};
use crate::common::lock::{RtMutex, RtRwLock, RtRwLockReadGuard, RtRwLockWriteGuard};
use crate::common::rc::RtRc;
use crate::common::thread::{self as rt_thread, ThreadingConstraint};
use crate::gc::{CollectError, GcController, GcResult, GcStats};
use crate::Settings;

thread_local! {
    /// assume any finalizer doesn't create new thread, so a pass only ever runs on this one thread.
    static IS_GC_THREAD: Cell<bool> = Cell::new(false);
}

/// The global cycle collector
#[cfg(feature = "threading")]
pub static GLOBAL_COLLECTOR: once_cell::sync::Lazy<RtRc<Collector>> =
    once_cell::sync::Lazy::new(|| RtRc::new(Collector::new(Settings::from_env())));

#[cfg(not(feature = "threading"))]
thread_local! {
    pub static GLOBAL_COLLECTOR: RtRc<Collector> = RtRc::new(Collector::new(Settings::from_env()));
}

pub fn global_collector() -> RtRc<Collector> {
    #[cfg(feature = "threading")]
    {
        GLOBAL_COLLECTOR.clone()
    }
    #[cfg(not(feature = "threading"))]
    {
        GLOBAL_COLLECTOR.with(|gc| gc.clone())
    }
}

/// The traversal a collection pass runs to find and free garbage cycles.
pub trait CycleSweeper: ThreadingConstraint {
    fn sweep(&mut self) -> GcResult;
}

impl<F> CycleSweeper for F
where
    F: FnMut() -> GcResult + ThreadingConstraint,
{
    fn sweep(&mut self) -> GcResult {
        self()
    }
}

pub struct Collector {
    enabled: RtMutex<bool>,
    collections: RtAtomic<usize>,
    /// for stop the world: mutators hold it shared, a pass takes it exclusively
    pause: RtRwLock<()>,
    sweeper: RtMutex<Option<Box<dyn CycleSweeper>>>,
    settings: Settings,
    /// `None` follows the process-wide record in [`rt_thread`]
    pinned_primary: Option<ThreadId>,
}

impl fmt::Debug for Collector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collector")
            .field("enabled", &self.enabled)
            .field("collections", &self.collections.load(Ordering::Relaxed))
            .field("primary", &self.primary_thread())
            .finish()
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Collector {
    /// A collector whose primary thread is whatever
    /// [`mark_primary_thread`](crate::common::thread::mark_primary_thread) records, looked up on
    /// every check so it may be recorded after the collector was built.
    pub fn new(settings: Settings) -> Self {
        Self::build(settings, None)
    }

    /// A collector that treats `primary` as its primary thread regardless of the process record.
    pub fn with_primary_thread(settings: Settings, primary: ThreadId) -> Self {
        Self::build(settings, Some(primary))
    }

    fn build(settings: Settings, pinned_primary: Option<ThreadId>) -> Self {
        Self {
            enabled: RtMutex::new(settings.gc_enabled),
            collections: 0.into(),
            pause: RtRwLock::new(()),
            sweeper: RtMutex::new(None),
            settings,
            pinned_primary,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Install the traversal run by every pass, returning the previous one.
    pub fn set_sweeper(
        &self,
        sweeper: impl CycleSweeper + 'static,
    ) -> Option<Box<dyn CycleSweeper>> {
        self.sweeper.lock().replace(Box::new(sweeper))
    }

    /// Keep passes from starting while the returned guard is alive.
    ///
    /// Returns `None` on the thread currently running a pass: that thread already owns the world,
    /// and blocking here would deadlock it.
    pub fn hold_world(&self) -> Option<RtRwLockReadGuard<'_, ()>> {
        if IS_GC_THREAD.with(|v| v.get()) {
            return None;
        }
        Some(self.pause.read())
    }

    /// _suggest_(may or may not) collector to collect garbage.
    ///
    /// Nothing happens while the collector is disabled, which is what a
    /// [`GcGuard`](crate::gc::GcGuard) relies on. Unlike [`collect_now`](GcController::collect_now)
    /// it gives up at once if mutators are holding the world.
    pub fn gc(&self) -> GcResult {
        if !self.is_enabled() {
            trace!("automatic collection skipped, collector is disabled");
            return GcResult::default();
        }
        match self.collect_cycles(false) {
            Ok(result) => result,
            Err(err) => {
                debug!("automatic collection skipped: {err}");
                GcResult::default()
            }
        }
    }

    pub fn stats(&self) -> GcStats {
        GcStats {
            enabled: self.is_enabled(),
            collections: self.collections.load(Ordering::Relaxed),
        }
    }

    fn set_enabled(&self, enabled: bool) {
        let mut flag = self.enabled.lock();
        if *flag != enabled {
            debug!(
                "cycle collector {}",
                if enabled { "enabled" } else { "disabled" }
            );
            *flag = enabled;
        }
    }

    /// `force` means a explicit call to `collect_now()`, which will wait a little for mutators
    /// to release the world instead of giving up at once
    fn collect_cycles(&self, force: bool) -> Result<GcResult, CollectError> {
        if IS_GC_THREAD.with(|v| v.get()) {
            return Err(CollectError::Reentrant);
        }
        let _lock = self.stop_the_world(force)?;
        IS_GC_THREAD.with(|v| v.set(true));

        // run the sweeper outside its slot so a finalizer may replace it
        let mut sweeper = self.sweeper.lock().take();
        let swept = panic::catch_unwind(AssertUnwindSafe(|| {
            sweeper.as_mut().map(|s| s.sweep()).unwrap_or_default()
        }));
        IS_GC_THREAD.with(|v| v.set(false));
        if let Some(sweeper) = sweeper {
            let mut slot = self.sweeper.lock();
            if slot.is_none() {
                *slot = Some(sweeper);
            }
        }

        let result =
            swept.map_err(|payload| CollectError::SweeperPanicked(panic_message(&*payload)))?;
        self.collections.fetch_add(1, Ordering::Relaxed);
        if result.cyclic_cnt > 0 {
            info!("Cyclic garbage collected, count={}", result.cyclic_cnt);
        }
        Ok(result)
    }

    fn stop_the_world(&self, force: bool) -> Result<RtRwLockWriteGuard<'_, ()>, CollectError> {
        #[cfg(feature = "threading")]
        {
            let lock = if force {
                self.pause.try_write_for(self.settings.pause_timeout)
            } else {
                self.pause.try_write()
            };
            lock.ok_or_else(|| {
                warn!("Can't acquire lock to stop the world.");
                CollectError::Busy
            })
        }
        // every thread has its own collector, so only this thread can be holding the world
        #[cfg(not(feature = "threading"))]
        {
            let _force = force;
            self.pause.try_write().ok_or(CollectError::Busy)
        }
    }
}

impl GcController for Collector {
    fn is_enabled(&self) -> bool {
        *self.enabled.lock()
    }

    fn enable(&self) {
        self.set_enabled(true)
    }

    fn disable(&self) {
        self.set_enabled(false)
    }

    fn collect_now(&self) -> Result<GcResult, CollectError> {
        self.collect_cycles(true)
    }

    fn primary_thread(&self) -> Option<ThreadId> {
        self.pinned_primary.or_else(rt_thread::primary_thread)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

pub fn isenabled() -> bool {
    global_collector().is_enabled()
}

pub fn enable() {
    global_collector().enable()
}

pub fn disable() {
    global_collector().disable()
}

/// Explicit pass on the global collector; runs even while the collector is disabled.
pub fn collect() -> Result<GcResult, CollectError> {
    global_collector().collect_now()
}
