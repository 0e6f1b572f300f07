pub use core::sync::atomic::Ordering;
pub use radium::Radium;

mod sealed {
    pub trait Sealed {}
}

pub trait RtAtomicScalar: sealed::Sealed {
    type Radium: Radium<Item = Self>;
}

pub type RtAtomic<T> = <T as RtAtomicScalar>::Radium;

#[cfg(feature = "threading")]
macro_rules! atomic_ty {
    ($i:ty, $atomic:ty) => {
        $atomic
    };
}
#[cfg(not(feature = "threading"))]
macro_rules! atomic_ty {
    ($i:ty, $atomic:ty) => {
        core::cell::Cell<$i>
    };
}

macro_rules! impl_atomic_scalar {
    ($(($i:ty, $atomic:ty),)*) => {
        $(
            impl sealed::Sealed for $i {}
            impl RtAtomicScalar for $i {
                type Radium = atomic_ty!($i, $atomic);
            }
        )*
    };
}

impl_atomic_scalar!(
    (bool, core::sync::atomic::AtomicBool),
    (usize, core::sync::atomic::AtomicUsize),
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_behaves_like_an_atomic() {
        let count: RtAtomic<usize> = 1.into();
        assert_eq!(count.fetch_add(2, Ordering::Relaxed), 1);
        assert_eq!(count.load(Ordering::Relaxed), 3);
        count.store(0, Ordering::Relaxed);
        assert_eq!(count.load(Ordering::Relaxed), 0);
    }
}
