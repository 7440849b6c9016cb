//! Error type shared by the containers.

use thiserror::Error;

/// Failures a container reports to its caller.
///
/// Absent keys and values are not errors; lookups return `None` for those.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    /// The container is already holding its maximum number of elements.
    #[error("capacity exceeded: at most {max_size} elements allowed")]
    CapacityExceeded { max_size: usize },

    /// The operation needs at least one element.
    #[error("collection is empty")]
    EmptyCollection,

    /// A positional access fell outside `0..len`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
