use std::fmt;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use crate::common::rc::RtRc;
use crate::gc::{global_collector, Collector, GcController};

/// How a [`GcGuard`] is configured. Fixed for the guard's whole life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardConfig {
    /// `false` turns the guard into a no-op.
    pub enabled: bool,
    /// Run one explicit pass after re-enabling the collector. Only honoured by
    /// [`Affinity::AnyThread`] guards.
    pub force_collect_on_exit: bool,
}

impl GuardConfig {
    /// Defaults of [`scoped_gc_guard`].
    pub const PRIMARY_THREAD: Self = Self::new(true, true);
    /// Defaults of [`scoped_gc_guard_any_thread`].
    pub const ANY_THREAD: Self = Self::new(true, false);

    pub const fn new(enabled: bool, force_collect_on_exit: bool) -> Self {
        Self {
            enabled,
            force_collect_on_exit,
        }
    }
}

/// Which threads a [`GcGuard`] may suspend the collector from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affinity {
    /// Only the controller's primary thread; anywhere else, or while no primary thread is known,
    /// the guard passes through. Event handlers of the host platform run on that thread and
    /// expect to own the collector there.
    PrimaryThread,
    /// Whichever thread creates the guard.
    AnyThread,
}

/// Suspends automatic cycle collection until dropped.
///
/// The guard reads the enabled flag once on creation and disables the collector only if it was
/// enabled; dropping it re-enables only what it disabled. Restoring never fails: a panic from the
/// controller while restoring is logged and swallowed, and so is a failed forced pass.
///
/// A guard belongs to the thread that created it and cannot be sent elsewhere.
#[must_use = "the collector is resumed as soon as the guard is dropped"]
pub struct GcGuard<C: GcController> {
    controller: C,
    affinity: Affinity,
    force_collect_on_exit: bool,
    /// `None` if this guard passes through
    was_enabled: Option<bool>,
    _not_send: PhantomData<*const ()>,
}

impl<C: GcController> GcGuard<C> {
    /// An affinity-checked guard. It never forces a pass on exit, whatever `config` asks for.
    pub fn primary_thread(controller: C, config: GuardConfig) -> Self {
        Self::enter(controller, config, Affinity::PrimaryThread)
    }

    /// A guard that suspends the collector on the calling thread, whichever it is.
    pub fn any_thread(controller: C, config: GuardConfig) -> Self {
        Self::enter(controller, config, Affinity::AnyThread)
    }

    fn enter(controller: C, config: GuardConfig, affinity: Affinity) -> Self {
        let was_enabled = if !config.enabled {
            None
        } else if affinity == Affinity::PrimaryThread
            && controller.primary_thread() != Some(thread::current().id())
        {
            // no primary thread recorded yet counts as off the primary thread
            trace!("gc guard passes through off the primary thread");
            None
        } else {
            let was_enabled = controller.is_enabled();
            if was_enabled {
                controller.disable();
            }
            Some(was_enabled)
        };
        trace!("gc guard entered: {affinity:?}, was_enabled={was_enabled:?}");
        Self {
            controller,
            affinity,
            force_collect_on_exit: config.force_collect_on_exit,
            was_enabled,
            _not_send: PhantomData,
        }
    }

    pub fn affinity(&self) -> Affinity {
        self.affinity
    }

    /// The flag captured on entry, `None` for a pass-through guard.
    pub fn was_enabled(&self) -> Option<bool> {
        self.was_enabled
    }

    pub fn is_pass_through(&self) -> bool {
        self.was_enabled.is_none()
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    fn restore(&self) {
        if self.was_enabled != Some(true) {
            return;
        }
        self.controller.enable();
        // A pass straight after some native teardown sequences has crashed the host process,
        // so affinity-checked guards never force one.
        if self.affinity == Affinity::AnyThread && self.force_collect_on_exit {
            match self.controller.collect_now() {
                Ok(result) => trace!("gc guard forced a pass on exit: {result:?}"),
                Err(err) => debug!("ignoring failed collection on gc guard exit: {err}"),
            }
        }
    }
}

impl<C: GcController> Drop for GcGuard<C> {
    fn drop(&mut self) {
        if panic::catch_unwind(AssertUnwindSafe(|| self.restore())).is_err() {
            error!("gc guard failed to restore the collector state");
        }
    }
}

impl<C: GcController> fmt::Debug for GcGuard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GcGuard")
            .field("affinity", &self.affinity)
            .field("force_collect_on_exit", &self.force_collect_on_exit)
            .field("was_enabled", &self.was_enabled)
            .finish()
    }
}

/// Suspend the global collector if called on the primary thread, with
/// [`GuardConfig::PRIMARY_THREAD`].
pub fn scoped_gc_guard() -> GcGuard<RtRc<Collector>> {
    scoped_gc_guard_with(GuardConfig::PRIMARY_THREAD)
}

pub fn scoped_gc_guard_with(config: GuardConfig) -> GcGuard<RtRc<Collector>> {
    GcGuard::primary_thread(global_collector(), config)
}

/// Suspend the global collector on the calling thread, with [`GuardConfig::ANY_THREAD`].
pub fn scoped_gc_guard_any_thread() -> GcGuard<RtRc<Collector>> {
    scoped_gc_guard_any_thread_with(GuardConfig::ANY_THREAD)
}

pub fn scoped_gc_guard_any_thread_with(config: GuardConfig) -> GcGuard<RtRc<Collector>> {
    GcGuard::any_thread(global_collector(), config)
}
