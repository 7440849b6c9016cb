//! FIFO queue with an optional size limit.

use crate::{CollectionError, LinkedList, linked_list::Iter};

/// A first-in, first-out queue backed by a [`LinkedList`].
///
/// Every operation comes in two flavours: [`add`](Self::add),
/// [`remove`](Self::remove) and [`element`](Self::element) return a
/// [`CollectionError`] on failure, while [`offer`](Self::offer),
/// [`poll`](Self::poll) and [`peek`](Self::peek) report the same condition
/// as `false` or `None`.
#[derive(Clone, Debug)]
pub struct BoundedQueue<T> {
    list: LinkedList<T>,
    max_size: usize,
}

impl<T> Default for BoundedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BoundedQueue<T> {
    /// Create a queue with no practical size limit.
    pub fn new() -> Self {
        Self::with_max_size(usize::MAX)
    }

    /// Create a queue holding at most `max_size` elements.
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            list: LinkedList::new(),
            max_size,
        }
    }

    /// Largest number of elements the queue accepts.
    #[inline]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.list.len() >= self.max_size
    }

    /// Enqueue `data`, failing when the queue is full.
    pub fn add(&mut self, data: T) -> Result<(), CollectionError> {
        if self.is_full() {
            return Err(CollectionError::CapacityExceeded {
                max_size: self.max_size,
            });
        }
        self.list.append(data);
        Ok(())
    }

    /// Enqueue `data` if there is room. Returns whether it was accepted.
    pub fn offer(&mut self, data: T) -> bool {
        self.add(data).is_ok()
    }

    /// Dequeue the front element, failing when the queue is empty.
    pub fn remove(&mut self) -> Result<T, CollectionError> {
        self.list.pop_front().ok_or(CollectionError::EmptyCollection)
    }

    /// Dequeue the front element if there is one.
    pub fn poll(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    /// The front element, failing when the queue is empty.
    pub fn element(&self) -> Result<&T, CollectionError> {
        self.list.front().ok_or(CollectionError::EmptyCollection)
    }

    /// The front element if there is one.
    pub fn peek(&self) -> Option<&T> {
        self.list.front()
    }

    /// Iterate from front to back without dequeuing.
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }

    /// Read-only view of the backing list.
    pub fn as_list(&self) -> &LinkedList<T> {
        &self.list
    }
}

impl<'a, T> IntoIterator for &'a BoundedQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
