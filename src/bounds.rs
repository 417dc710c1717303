//! Sentinel keys for common priority types
//!
//! A [`SentinelHeap`](crate::sentinel::SentinelHeap) needs two keys that
//! bracket every key it will ever hold. For the primitive integer types the
//! natural choice is `MIN` and `MAX`; [`SentinelKey`] names that choice so a
//! heap can be built with just a capacity:
//!
//! ```rust
//! use sentinel_heap::sentinel::SentinelHeap;
//!
//! let mut heap: SentinelHeap<u32, &str> = SentinelHeap::with_capacity(4);
//! heap.enqueue("max", u32::MAX);
//! heap.enqueue("min", u32::MIN);
//! assert_eq!(heap.dequeue(), Some("min"));
//! assert_eq!(heap.dequeue(), Some("max"));
//! ```

use std::cmp::Reverse;

/// A key type with a known smallest and largest value.
///
/// Both constants may themselves be used as real keys: the sift loops compare
/// with a strict `>`, so a key equal to a sentinel never moves past it.
pub trait SentinelKey: Ord + Copy {
    /// A key less than or equal to every key of this type
    const INFIMUM: Self;
    /// A key greater than or equal to every key of this type
    const SUPREMUM: Self;
}

macro_rules! sentinel_impl {
    ($($T: ty),*) => {
        $(
            impl SentinelKey for $T {
                const INFIMUM: Self = <$T>::MIN;
                const SUPREMUM: Self = <$T>::MAX;
            }
        )*
    };
}

sentinel_impl!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl SentinelKey for bool {
    const INFIMUM: Self = false;
    const SUPREMUM: Self = true;
}

impl SentinelKey for char {
    const INFIMUM: Self = '\0';
    const SUPREMUM: Self = char::MAX;
}

impl SentinelKey for () {
    const INFIMUM: Self = ();
    const SUPREMUM: Self = ();
}

/// Max-heap behaviour: the largest inner value becomes the smallest key.
impl<T: SentinelKey> SentinelKey for Reverse<T> {
    const INFIMUM: Self = Reverse(T::SUPREMUM);
    const SUPREMUM: Self = Reverse(T::INFIMUM);
}

impl<A: SentinelKey, B: SentinelKey> SentinelKey for (A, B) {
    const INFIMUM: Self = (A::INFIMUM, B::INFIMUM);
    const SUPREMUM: Self = (A::SUPREMUM, B::SUPREMUM);
}

impl<A: SentinelKey, B: SentinelKey, C: SentinelKey> SentinelKey for (A, B, C) {
    const INFIMUM: Self = (A::INFIMUM, B::INFIMUM, C::INFIMUM);
    const SUPREMUM: Self = (A::SUPREMUM, B::SUPREMUM, C::SUPREMUM);
}
