//! Sentinel-bounded binary heap
//!
//! A fixed-capacity binary min-heap whose sift loops carry no bounds tests.
//! The backing array has two more slots than the heap can hold:
//!
//! ```text
//!  index:  0          1 ..= size         size+1 ..= capacity     capacity+1
//!  key:    infimum    live elements      supremum (vacant)       supremum
//! ```
//!
//! Slot 0 holds a key no real key is smaller than, so sift-up always stops at
//! the root without checking for it. Vacant slots hold a key no real key is
//! larger than, so sift-down can compare two siblings without asking whether
//! the right one exists. The only branch left outside the comparisons is a
//! single capacity check per insert.
//!
//! Removal uses the two-phase scheme: the hole left by the minimum descends
//! along the smaller children all the way to the bottom, and only then does
//! the last element bubble up from there. This does fewer comparisons than
//! swapping the last element to the root and sifting it down.
//!
//! # Time Complexity
//!
//! | Operation | Complexity   |
//! |-----------|--------------|
//! | `new`     | O(capacity)  |
//! | `clear`   | O(capacity)  |
//! | `enqueue` | O(log n)     |
//! | `dequeue` | O(log n)     |
//! | `peek`    | O(1)         |
//! | `count`   | O(1)         |
//!
//! # Example
//!
//! ```rust
//! use sentinel_heap::sentinel::SentinelHeap;
//!
//! let mut heap = SentinelHeap::new(10, -10, 1000);
//! heap.enqueue("a", 0);
//! heap.enqueue("b", 3);
//! heap.enqueue("c", 6);
//! heap.enqueue("d", 2);
//! heap.enqueue("e", 5);
//!
//! assert_eq!(heap.count(), 5);
//! assert_eq!(heap.dequeue(), Some("a"));
//! assert_eq!(heap.dequeue(), Some("d"));
//! assert_eq!(heap.dequeue(), Some("b"));
//! assert_eq!(heap.dequeue(), Some("e"));
//! assert_eq!(heap.dequeue(), Some("c"));
//! assert_eq!(heap.dequeue(), None);
//! ```

use crate::bounds::SentinelKey;
use crate::error::HeapError;
use std::mem;

#[derive(Debug, Clone)]
struct Slot<K, V> {
    key: K,
    value: Option<V>,
}

/// A fixed-capacity binary min-heap with sentinel keys at both ends
///
/// Stores `(key, value)` pairs and always yields the value with the smallest
/// key first. Equal keys come out in no particular order.
///
/// # Key contract
///
/// Every key passed to [`enqueue`](Self::enqueue) must satisfy
/// `infimum <= key <= supremum`. This is checked only in debug builds. In
/// release builds a key below the infimum makes the insert loop forever at
/// the root and a key above the supremum can lose elements; neither can cause
/// undefined behaviour.
#[derive(Debug, Clone)]
pub struct SentinelHeap<K, V> {
    /// `capacity + 2` slots: the infimum, the heap proper, the supremum
    slots: Box<[Slot<K, V>]>,
    capacity: usize,
    size: usize,
}

impl<K: Ord + Copy, V> SentinelHeap<K, V> {
    /// Creates an empty heap holding at most `capacity` elements.
    ///
    /// `infimum` must compare less than or equal to, and `supremum` greater
    /// than or equal to, every key that will ever be enqueued.
    ///
    /// # Panics
    ///
    /// Panics if `capacity + 2` overflows `usize`.
    pub fn new(capacity: usize, infimum: K, supremum: K) -> Self {
        let Some(len) = capacity.checked_add(2) else {
            panic!("capacity overflow");
        };
        let slots = (0..len)
            .map(|_| Slot {
                key: supremum,
                value: None,
            })
            .collect();

        let mut heap = SentinelHeap {
            slots,
            capacity,
            size: 0,
        };
        heap.slot_mut(0).key = infimum;
        heap.slot_mut(capacity + 1).key = supremum;
        heap.clear();

        tracing::trace!(capacity, "allocated sentinel heap");
        heap
    }

    /// Removes every element, dropping the values still held.
    pub fn clear(&mut self) {
        let supremum = self.supremum();
        for slot in &mut self.slots[1..=self.capacity] {
            slot.key = supremum;
            slot.value = None;
        }
        if self.size > 0 {
            tracing::trace!(dropped = self.size, "cleared sentinel heap");
        }
        self.size = 0;
    }

    /// Returns the number of elements in the heap
    #[inline]
    pub fn count(&self) -> usize {
        self.size
    }

    /// Returns the number of elements in the heap
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the heap is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns true if another insert would exceed the capacity
    #[inline]
    pub fn is_full(&self) -> bool {
        self.size == self.capacity
    }

    /// Returns the maximum number of elements the heap can hold
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the lower sentinel key
    #[inline]
    pub fn infimum(&self) -> K {
        self.key_at(0)
    }

    /// Returns the upper sentinel key
    #[inline]
    pub fn supremum(&self) -> K {
        self.key_at(self.capacity + 1)
    }

    /// Inserts `value` with priority `key`.
    ///
    /// # Panics
    ///
    /// Panics if the heap already holds `capacity` elements. Use
    /// [`try_enqueue`](Self::try_enqueue) to get an error instead.
    #[inline]
    pub fn enqueue(&mut self, value: V, key: K) {
        if self.try_enqueue(value, key).is_err() {
            full(self.capacity);
        }
    }

    /// Inserts `value` with priority `key`, or returns
    /// [`HeapError::Full`] (dropping `value`) if there is no room.
    #[inline]
    pub fn try_enqueue(&mut self, value: V, key: K) -> Result<(), HeapError> {
        if self.size == self.capacity {
            return Err(HeapError::Full {
                capacity: self.capacity,
            });
        }
        self.size += 1;
        self.sift_up(self.size, key, Some(value));
        Ok(())
    }

    /// Returns the minimum key and its value without removing them
    pub fn peek(&self) -> Option<(&K, &V)> {
        if self.size == 0 {
            return None;
        }
        let slot = &self.slots[1];
        slot.value.as_ref().map(|value| (&slot.key, value))
    }

    /// Removes the element with the smallest key and returns its value.
    ///
    /// Returns `None` on an empty heap, leaving it untouched.
    #[inline]
    pub fn dequeue(&mut self) -> Option<V> {
        self.dequeue_entry().map(|(_, value)| value)
    }

    /// Like [`dequeue`](Self::dequeue), but an empty heap yields
    /// `V::default()`.
    pub fn dequeue_or_default(&mut self) -> V
    where
        V: Default,
    {
        self.dequeue().unwrap_or_default()
    }

    /// Removes the element with the smallest key and returns it with its key.
    pub fn dequeue_entry(&mut self) -> Option<(K, V)> {
        let size = self.size;
        if size == 0 {
            return None;
        }

        // Vacate the last slot first: during the descent it reads as the
        // supremum and always loses to its live sibling.
        let supremum = self.supremum();
        let last = self.slot_mut(size);
        let bubble_key = mem::replace(&mut last.key, supremum);
        let bubble_value = last.value.take();
        self.size = size - 1;

        if size == 1 {
            return bubble_value.map(|value| (bubble_key, value));
        }

        let min_key = self.key_at(1);
        let min_value = self.slot_mut(1).value.take();

        let mut hole = 1;
        let mut succ = 2;
        while succ < size {
            let left = self.key_at(succ);
            let right = self.key_at(succ + 1);
            let key = if left > right {
                succ += 1;
                right
            } else {
                left
            };
            self.move_into(hole, succ, key);
            hole = succ;
            succ <<= 1;
        }

        self.sift_up(hole, bubble_key, bubble_value);
        min_value.map(|value| (min_key, value))
    }

    /// Checks the slot layout: sentinels in place and bracketing every live
    /// key, heap order over the live range, and every vacant slot holding the
    /// supremum and no value.
    #[doc(hidden)]
    pub fn is_well_formed(&self) -> bool {
        let size = self.size;
        let infimum = self.infimum();
        let supremum = self.supremum();
        let live = &self.slots[1..=size];
        let vacant = &self.slots[size + 1..=self.capacity];

        size <= self.capacity
            && infimum <= supremum
            && live
                .iter()
                .all(|slot| infimum <= slot.key && slot.key <= supremum)
            && self.slots[0].value.is_none()
            && self.slots[self.capacity + 1].value.is_none()
            && (2..=size).all(|i| self.slots[i >> 1].key <= self.slots[i].key)
            && live.iter().all(|slot| slot.value.is_some())
            && vacant
                .iter()
                .all(|slot| slot.value.is_none() && slot.key == supremum)
    }

    /// Moves `key` up from `hole` until its parent is no greater, then stores
    /// it there with `value`.
    ///
    /// Slot 0 holds the infimum, so the loop ends at the root without an index
    /// check.
    #[inline(always)]
    fn sift_up(&mut self, mut hole: usize, key: K, value: Option<V>) {
        debug_assert!(
            self.infimum() <= key && key <= self.supremum(),
            "key outside the sentinel bounds"
        );

        let mut pred = hole >> 1;
        let mut pred_key = self.key_at(pred);
        while pred_key > key {
            self.move_into(hole, pred, pred_key);
            hole = pred;
            pred >>= 1;
            pred_key = self.key_at(pred);
        }

        let slot = self.slot_mut(hole);
        slot.key = key;
        slot.value = value;
    }

    /// Moves the value at `from` into `hole` under `key`.
    #[inline(always)]
    fn move_into(&mut self, hole: usize, from: usize, key: K) {
        let value = self.slot_mut(from).value.take();
        let slot = self.slot_mut(hole);
        slot.key = key;
        slot.value = value;
    }

    // The sift loops only produce indices in `0..=capacity + 1`: sift-up
    // halves an index that starts at most at `size`, and the descent reads
    // `succ + 1` only while `succ < size`. Both hold for any `Ord` behaviour
    // because `size <= capacity` is enforced before every insert.

    #[inline(always)]
    fn key_at(&self, index: usize) -> K {
        debug_assert!(index < self.slots.len());
        // SAFETY: `index <= capacity + 1` and `slots.len() == capacity + 2`.
        unsafe { self.slots.get_unchecked(index).key }
    }

    #[inline(always)]
    fn slot_mut(&mut self, index: usize) -> &mut Slot<K, V> {
        debug_assert!(index < self.slots.len());
        // SAFETY: `index <= capacity + 1` and `slots.len() == capacity + 2`.
        unsafe { self.slots.get_unchecked_mut(index) }
    }
}

impl<K: SentinelKey, V> SentinelHeap<K, V> {
    /// Creates an empty heap using `K::INFIMUM` and `K::SUPREMUM` as
    /// sentinels, so every value of `K` is a legal key.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(capacity, K::INFIMUM, K::SUPREMUM)
    }
}

#[cold]
#[inline(never)]
fn full(capacity: usize) -> ! {
    panic!("{}", HeapError::Full { capacity })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_heap() -> SentinelHeap<i32, &'static str> {
        SentinelHeap::new(10, -10, 1000)
    }

    fn enqueue_all(
        heap: &mut SentinelHeap<i32, &'static str>,
        keys: &[i32],
        values: &[&'static str],
    ) {
        for (i, (&key, &value)) in keys.iter().zip(values).enumerate() {
            heap.enqueue(value, key);
            assert_eq!(heap.count(), i + 1);
            assert!(heap.is_well_formed());
        }
    }

    #[test]
    fn test_empty_initially() {
        let heap = scenario_heap();
        assert_eq!(heap.count(), 0);
        assert!(heap.is_empty());
        assert!(!heap.is_full());
        assert_eq!(heap.capacity(), 10);
        assert_eq!(heap.infimum(), -10);
        assert_eq!(heap.supremum(), 1000);
        assert_eq!(heap.peek(), None);
        assert!(heap.is_well_formed());
    }

    #[test]
    fn test_dequeue_order_five_elements() {
        let mut heap = scenario_heap();
        enqueue_all(&mut heap, &[0, 3, 6, 2, 5], &["a", "b", "c", "d", "e"]);

        let expected = ["a", "d", "b", "e", "c"];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(heap.dequeue(), Some(*want));
            assert_eq!(heap.count(), expected.len() - (i + 1));
            assert!(heap.is_well_formed());
        }
    }

    #[test]
    fn test_dequeue_order_two_elements() {
        let mut heap = scenario_heap();
        enqueue_all(&mut heap, &[0, 1], &["a", "b"]);

        assert_eq!(heap.dequeue(), Some("a"));
        assert_eq!(heap.count(), 1);
        assert_eq!(heap.dequeue(), Some("b"));
        assert_eq!(heap.count(), 0);
    }

    #[test]
    fn test_single_element_then_empty() {
        let mut heap = scenario_heap();
        heap.enqueue("a", 0);

        assert_eq!(heap.dequeue(), Some("a"));
        assert_eq!(heap.count(), 0);
        assert_eq!(heap.dequeue(), None);
        assert_eq!(heap.count(), 0);
        assert!(heap.is_well_formed());
    }

    #[test]
    fn test_dequeue_empty_returns_default() {
        let mut heap: SentinelHeap<i32, String> = SentinelHeap::new(10, -10, 1000);
        assert_eq!(heap.dequeue_or_default(), String::default());
        assert_eq!(heap.count(), 0);

        heap.enqueue("x".to_string(), 1);
        assert_eq!(heap.dequeue_or_default(), "x");
        assert_eq!(heap.dequeue_or_default(), "");
        assert_eq!(heap.count(), 0);
    }

    #[test]
    fn test_dequeue_entry_returns_key() {
        let mut heap = scenario_heap();
        heap.enqueue("late", 7);
        heap.enqueue("early", 2);

        assert_eq!(heap.dequeue_entry(), Some((2, "early")));
        assert_eq!(heap.dequeue_entry(), Some((7, "late")));
        assert_eq!(heap.dequeue_entry(), None);
    }

    #[test]
    fn test_peek_tracks_minimum() {
        let mut heap = scenario_heap();
        heap.enqueue("five", 5);
        assert_eq!(heap.peek(), Some((&5, &"five")));
        heap.enqueue("one", 1);
        assert_eq!(heap.peek(), Some((&1, &"one")));
        heap.enqueue("three", 3);
        assert_eq!(heap.peek(), Some((&1, &"one")));

        heap.dequeue();
        assert_eq!(heap.peek(), Some((&3, &"three")));
    }

    #[test]
    fn test_fill_to_capacity() {
        let mut heap = scenario_heap();
        for i in (0..10).rev() {
            heap.enqueue("x", i);
        }
        assert!(heap.is_full());
        assert!(heap.is_well_formed());

        for i in 0..10 {
            assert_eq!(heap.dequeue_entry(), Some((i, "x")));
        }
        assert!(heap.is_empty());
    }

    #[test]
    #[should_panic(expected = "heap is full (capacity 10)")]
    fn test_enqueue_full_panics() {
        let mut heap = scenario_heap();
        for i in 0..20 {
            heap.enqueue("too much", i);
        }
    }

    #[test]
    fn test_try_enqueue_full() {
        let mut heap = scenario_heap();
        for i in 0..10 {
            assert_eq!(heap.try_enqueue("ok", i), Ok(()));
        }
        assert_eq!(
            heap.try_enqueue("too much", 10),
            Err(HeapError::Full { capacity: 10 })
        );
        assert_eq!(heap.count(), 10);
        assert!(heap.is_well_formed());
    }

    #[test]
    fn test_clear_resets() {
        let mut heap = scenario_heap();
        enqueue_all(&mut heap, &[4, 1, 9], &["four", "one", "nine"]);
        heap.dequeue();

        heap.clear();
        assert_eq!(heap.count(), 0);
        assert_eq!(heap.dequeue(), None);
        assert!(heap.is_well_formed());

        enqueue_all(&mut heap, &[8, 2], &["eight", "two"]);
        assert_eq!(heap.dequeue(), Some("two"));
        assert_eq!(heap.dequeue(), Some("eight"));
    }

    #[test]
    fn test_duplicate_keys() {
        let mut heap = scenario_heap();
        heap.enqueue("a", 1);
        heap.enqueue("b", 1);
        heap.enqueue("c", 1);
        heap.enqueue("z", 0);

        assert_eq!(heap.dequeue_entry(), Some((0, "z")));
        let mut rest: Vec<_> = (0..3).filter_map(|_| heap.dequeue_entry()).collect();
        rest.sort();
        assert_eq!(rest, vec![(1, "a"), (1, "b"), (1, "c")]);
    }

    #[test]
    fn test_interleaved_operations() {
        let mut heap: SentinelHeap<u32, u32> = SentinelHeap::with_capacity(64);
        let mut reference = Vec::new();

        for round in 0..200u32 {
            let key = round.wrapping_mul(2_654_435_761) % 97;
            if round % 3 == 2 {
                reference.sort_unstable();
                let expected = if reference.is_empty() {
                    None
                } else {
                    Some(reference.remove(0))
                };
                assert_eq!(heap.dequeue_entry().map(|(k, _)| k), expected);
            } else if !heap.is_full() {
                heap.enqueue(key, key);
                reference.push(key);
            }
            assert_eq!(heap.count(), reference.len());
            assert!(heap.is_well_formed());
        }
    }

    #[test]
    fn test_zero_capacity() {
        let mut heap: SentinelHeap<i32, ()> = SentinelHeap::with_capacity(0);
        assert!(heap.is_full());
        assert_eq!(heap.dequeue(), None);
        assert_eq!(heap.try_enqueue((), 0), Err(HeapError::Full { capacity: 0 }));
        assert!(heap.is_well_formed());
    }

    #[test]
    fn test_corrupted_infimum_detected() {
        let mut heap = scenario_heap();
        enqueue_all(&mut heap, &[4, 1, 9], &["four", "one", "nine"]);

        heap.slots[0].key = 5;
        assert!(!heap.is_well_formed());

        heap.slots[0].key = 2000;
        assert!(!heap.is_well_formed());

        heap.slots[0].key = -10;
        assert!(heap.is_well_formed());
    }

    #[test]
    fn test_enqueue_after_failed_try_enqueue() {
        let mut heap: SentinelHeap<i32, i32> = SentinelHeap::new(2, 0, 100);
        heap.enqueue(7, 7);
        heap.enqueue(3, 3);
        assert_eq!(heap.try_enqueue(1, 1), Err(HeapError::Full { capacity: 2 }));
        assert_eq!(heap.count(), 2);

        assert_eq!(heap.dequeue(), Some(3));
        heap.enqueue(1, 1);
        assert_eq!(heap.dequeue(), Some(1));
        assert_eq!(heap.dequeue(), Some(7));
        assert!(heap.is_well_formed());
    }

    #[test]
    fn test_sentinel_valued_keys() {
        let mut heap: SentinelHeap<i8, i8> = SentinelHeap::with_capacity(4);
        heap.enqueue(i8::MAX, i8::MAX);
        heap.enqueue(0, 0);
        heap.enqueue(i8::MIN, i8::MIN);
        heap.enqueue(i8::MAX, i8::MAX);

        assert_eq!(heap.dequeue(), Some(i8::MIN));
        assert_eq!(heap.dequeue(), Some(0));
        assert_eq!(heap.dequeue(), Some(i8::MAX));
        assert_eq!(heap.dequeue(), Some(i8::MAX));
        assert_eq!(heap.dequeue(), None);
    }
}
