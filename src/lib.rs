//! Sentinel-Bounded Binary Heap for Rust
//!
//! This crate provides a fixed-capacity binary min-heap built for the inner
//! loop of graph searches such as Dijkstra's algorithm and A*. Its sift loops
//! carry no bounds checks: two sentinel keys at the ends of the backing array,
//! and a sentinel filler in every vacant slot, decide the boundary comparisons
//! instead.
//!
//! # Features
//!
//! - **SentinelHeap**: O(log n) enqueue and dequeue, O(1) peek and count, no
//!   allocation after construction
//! - **SentinelKey**: ready-made sentinels for the integer types, `Reverse`,
//!   and tuples
//! - **Search**: single-source Dijkstra using the heap as its open set
//!
//! The heap deliberately has no `decrease_key`, no merge and no growth. The
//! caller picks the capacity and promises that every key lies between the
//! sentinels.
//!
//! # Example
//!
//! ```rust
//! use sentinel_heap::SentinelHeap;
//!
//! let mut heap = SentinelHeap::new(4, i32::MIN, i32::MAX);
//! heap.enqueue("item1", 5);
//! heap.enqueue("item2", 3);
//! assert_eq!(heap.peek(), Some((&3, &"item2")));
//! assert_eq!(heap.dequeue(), Some("item2"));
//! assert_eq!(heap.count(), 1);
//! ```

pub mod bounds;
pub mod error;
pub mod search;
pub mod sentinel;

// Re-export the main types for convenience
pub use bounds::SentinelKey;
pub use error::HeapError;
pub use sentinel::SentinelHeap;
