use std::rc::Rc;
use std::sync::Arc;
use std::thread::ThreadId;

use crate::gc::{CollectError, GcResult};

/// Access to a collector's enabled flag, as needed by [`GcGuard`](crate::gc::GcGuard).
///
/// `enable` and `disable` are idempotent and cannot fail. `collect_now` runs one explicit pass
/// whether or not the collector is enabled.
pub trait GcController {
    fn is_enabled(&self) -> bool;
    fn enable(&self);
    fn disable(&self);
    fn collect_now(&self) -> Result<GcResult, CollectError>;
    /// The thread that affinity-checked guards are allowed to suspend the collector from, `None`
    /// while no primary thread is known.
    fn primary_thread(&self) -> Option<ThreadId>;
}

macro_rules! forward_controller {
    ($($ptr:ty),*) => {
        $(
            impl<T: GcController + ?Sized> GcController for $ptr {
                #[inline]
                fn is_enabled(&self) -> bool {
                    (**self).is_enabled()
                }
                #[inline]
                fn enable(&self) {
                    (**self).enable()
                }
                #[inline]
                fn disable(&self) {
                    (**self).disable()
                }
                #[inline]
                fn collect_now(&self) -> Result<GcResult, CollectError> {
                    (**self).collect_now()
                }
                #[inline]
                fn primary_thread(&self) -> Option<ThreadId> {
                    (**self).primary_thread()
                }
            }
        )*
    };
}

forward_controller!(&T, Arc<T>, Rc<T>);
