#[cfg(not(feature = "threading"))]
use std::rc::Rc;
#[cfg(feature = "threading")]
use std::sync::Arc;

// type aliases instead of newtypes because you can't do `fn method(self: RtRc<Self>)` with a
// newtype; requires the unstable arbitrary_self_types
#[cfg(feature = "threading")]
pub type RtRc<T> = Arc<T>;
#[cfg(not(feature = "threading"))]
pub type RtRc<T> = Rc<T>;
