//! Hand-rolled containers used as plumbing by the tabletop games.
//!
//! - [`LinkedList`]: a doubly linked, order-preserving sequence with
//!   positional get/set/delete and value removal.
//! - [`BoundedQueue`]: a FIFO over a [`LinkedList`] with an optional maximum
//!   size and failing / non-failing operation pairs.
//! - [`ChainedMap`]: a hash map resolving collisions with per-bucket chains,
//!   doubling its bucket array once half full.
//!
//! Absent keys and values are reported as `None`; the remaining failure
//! modes are described by [`CollectionError`].
//!
//! ```
//! use tabletop_collections::{BoundedQueue, ChainedMap};
//!
//! let mut ore = ChainedMap::new();
//! ore.put("hills", 3);
//! assert_eq!(ore.put("hills", 4), Some(3));
//!
//! let mut turns = BoundedQueue::with_max_size(2);
//! assert!(turns.offer("red"));
//! assert!(turns.offer("blue"));
//! assert!(!turns.offer("white"));
//! assert_eq!(turns.poll(), Some("red"));
//! ```

mod chained_map;
mod error;
mod linked_list;
mod queue;

pub use chained_map::{ChainedMap, DEFAULT_CAPACITY, Iter as MapIter};
pub use error::CollectionError;
pub use linked_list::{IntoIter, Iter, LinkedList};
pub use queue::BoundedQueue;
