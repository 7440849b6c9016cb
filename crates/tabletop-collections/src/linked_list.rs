//! Doubly linked, order-preserving sequence.
//!
//! Nodes live in a slot arena and link to each other by slot index, so the
//! list needs no `unsafe` and no shared ownership. Deleted slots are threaded
//! onto a free list and reused by later insertions.

use std::fmt;
use std::iter::FusedIterator;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::CollectionError;

#[derive(Clone)]
struct Node<T> {
    data: T,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Clone)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

/// A doubly linked list with positional access and value removal.
///
/// `head`, `tail` and `len` are tracked explicitly: an empty list has neither
/// head nor tail, a single-element list has `head == tail`, and every other
/// list is an acyclic chain whose `prev`/`next` links agree in both
/// directions.
#[derive(Clone)]
pub struct LinkedList<T> {
    slots: Vec<Slot<T>>,
    free: Option<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of elements in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Insert `data` in front of the current head.
    pub fn add_first(&mut self, data: T) {
        let old_head = self.head;
        let i = self.alloc(Node {
            data,
            prev: None,
            next: old_head,
        });
        match old_head {
            Some(h) => self.node_mut(h).prev = Some(i),
            None => self.tail = Some(i),
        }
        self.head = Some(i);
        self.len += 1;
    }

    /// Insert `data` after the current tail.
    pub fn append(&mut self, data: T) {
        let old_tail = self.tail;
        let i = self.alloc(Node {
            data,
            prev: old_tail,
            next: None,
        });
        match old_tail {
            Some(t) => self.node_mut(t).next = Some(i),
            None => self.head = Some(i),
        }
        self.tail = Some(i);
        self.len += 1;
    }

    /// The first element, if any.
    pub fn front(&self) -> Option<&T> {
        self.head.map(|h| &self.node(h).data)
    }

    /// The last element, if any.
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|t| &self.node(t).data)
    }

    /// Remove and return the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        self.head.map(|h| self.unlink(h))
    }

    /// Remove and return the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        self.tail.map(|t| self.unlink(t))
    }

    /// The element at `index`, walking from the head.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slot_at(index).map(|i| &self.node(i).data)
    }

    /// Mutable access to the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let i = self.slot_at(index)?;
        Some(&mut self.node_mut(i).data)
    }

    /// Replace the element at `index`, returning the old value.
    pub fn set(&mut self, index: usize, data: T) -> Result<T, CollectionError> {
        let len = self.len;
        let i = self
            .slot_at(index)
            .ok_or(CollectionError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(&mut self.node_mut(i).data, data))
    }

    /// Remove and return the element at `index`.
    ///
    /// The head and tail are unlinked in constant time; interior positions
    /// are found by walking from the head. An out-of-range index is logged
    /// and leaves the list untouched.
    pub fn delete(&mut self, index: usize) -> Option<T> {
        let slot = if index == 0 {
            self.head
        } else if self.len > 0 && index == self.len - 1 {
            self.tail
        } else {
            self.slot_at(index)
        };
        match slot {
            Some(i) => Some(self.unlink(i)),
            None => {
                let err = CollectionError::IndexOutOfRange {
                    index,
                    len: self.len,
                };
                log::warn!("linked list delete ignored: {err}");
                None
            }
        }
    }

    /// Iterate from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    // -----------------------------------------------------------------------
    // Slot arena
    // -----------------------------------------------------------------------

    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free {
            Some(i) => {
                let Slot::Vacant { next_free } = self.slots[i] else {
                    unreachable!("free list points at an occupied slot");
                };
                self.free = next_free;
                self.slots[i] = Slot::Occupied(node);
                i
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, i: usize) -> T {
        let vacant = Slot::Vacant {
            next_free: self.free,
        };
        match std::mem::replace(&mut self.slots[i], vacant) {
            Slot::Occupied(node) => {
                self.free = Some(i);
                node.data
            }
            Slot::Vacant { .. } => unreachable!("released a vacant slot"),
        }
    }

    fn node(&self, i: usize) -> &Node<T> {
        match &self.slots[i] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link points at a vacant slot"),
        }
    }

    fn node_mut(&mut self, i: usize) -> &mut Node<T> {
        match &mut self.slots[i] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link points at a vacant slot"),
        }
    }

    /// Slot holding the element at `index`.
    fn slot_at(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        let mut cur = self.head;
        for _ in 0..index {
            cur = cur.and_then(|i| self.node(i).next);
        }
        cur
    }

    /// Detach slot `i`, repairing its neighbours' links first.
    fn unlink(&mut self, i: usize) -> T {
        let (prev, next) = {
            let n = self.node(i);
            (n.prev, n.next)
        };
        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
        self.release(i)
    }
}

impl<T: PartialEq> LinkedList<T> {
    /// Whether any element equals `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|x| x == value)
    }

    /// Remove the first element equal to `value`.
    ///
    /// Returns `false` and leaves the list unchanged when no element
    /// matches. Lists of `Option<_>` may remove a stored `None` this way.
    pub fn remove(&mut self, value: &T) -> bool {
        let mut cur = self.head;
        while let Some(i) = cur {
            let node = self.node(i);
            if node.data == *value {
                self.unlink(i);
                return true;
            }
            cur = node.next;
        }
        false
    }
}

impl<T: Clone> LinkedList<T> {
    /// Copy the elements into a vector, head first.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Copy the elements into a vector in a fresh random order.
    pub fn to_shuffled_vec(&self) -> Vec<T> {
        self.to_shuffled_vec_with(&mut rand::rng())
    }

    /// Like [`to_shuffled_vec`](Self::to_shuffled_vec), drawing from `rng`.
    pub fn to_shuffled_vec_with(&self, rng: &mut impl Rng) -> Vec<T> {
        let mut items = self.to_vec();
        items.shuffle(rng);
        items
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Borrowing iterator over a [`LinkedList`], head to tail.
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.front?);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.back?);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.data)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Owning iterator over a [`LinkedList`], head to tail.
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for LinkedList<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for LinkedList<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = <Vec<T> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Walk the chain both ways and check it agrees with `len`, `head`, `tail`.
    fn check_links<T>(list: &LinkedList<T>) {
        match list.len {
            0 => {
                assert_eq!(list.head, None);
                assert_eq!(list.tail, None);
            }
            1 => assert_eq!(list.head, list.tail),
            _ => {}
        }
        let mut forward = Vec::new();
        let mut prev = None;
        let mut cur = list.head;
        while let Some(i) = cur {
            let n = list.node(i);
            assert_eq!(n.prev, prev, "prev link of slot {i}");
            forward.push(i);
            prev = Some(i);
            cur = n.next;
            assert!(forward.len() <= list.len, "cycle in forward chain");
        }
        assert_eq!(prev, list.tail);
        assert_eq!(forward.len(), list.len);
    }

    fn list_of(items: &[i32]) -> LinkedList<i32> {
        items.iter().copied().collect()
    }

    #[test]
    fn add_first_and_append_order() {
        let mut l = LinkedList::new();
        l.add_first(5);
        l.add_first(10);
        l.append(1);
        l.add_first(20);
        check_links(&l);
        assert_eq!(l.to_vec(), vec![20, 10, 5, 1]);
        assert_eq!(l.front(), Some(&20));
        assert_eq!(l.back(), Some(&1));
    }

    #[test]
    fn get_and_set() {
        let mut l = list_of(&[1, 2, 3]);
        assert_eq!(l.get(0), Some(&1));
        assert_eq!(l.get(2), Some(&3));
        assert_eq!(l.get(3), None);
        assert_eq!(l.set(1, 20), Ok(2));
        assert_eq!(l.to_vec(), vec![1, 20, 3]);
        assert_eq!(
            l.set(3, 0),
            Err(CollectionError::IndexOutOfRange { index: 3, len: 3 })
        );
        *l.get_mut(0).unwrap() += 100;
        assert_eq!(l.get(0), Some(&101));
    }

    #[test]
    fn delete_head_tail_interior() {
        let mut l = list_of(&[0, 1, 2, 3, 4]);
        assert_eq!(l.delete(0), Some(0));
        check_links(&l);
        assert_eq!(l.delete(3), Some(4));
        check_links(&l);
        assert_eq!(l.delete(1), Some(2));
        check_links(&l);
        assert_eq!(l.to_vec(), vec![1, 3]);
    }

    #[test]
    fn delete_sole_element_resets_ends() {
        let mut l = list_of(&[7]);
        assert_eq!(l.delete(0), Some(7));
        assert!(l.is_empty());
        assert_eq!(l.head, None);
        assert_eq!(l.tail, None);
        l.append(8);
        check_links(&l);
        assert_eq!(l.to_vec(), vec![8]);
    }

    #[test]
    fn delete_out_of_range_is_noop() {
        let mut l = list_of(&[1, 2]);
        assert_eq!(l.delete(2), None);
        assert_eq!(l.delete(usize::MAX), None);
        assert_eq!(l.to_vec(), vec![1, 2]);
        let mut empty: LinkedList<i32> = LinkedList::new();
        assert_eq!(empty.delete(0), None);
        check_links(&empty);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut l = list_of(&[1, 2, 3]);
        l.delete(1);
        l.delete(0);
        l.append(4);
        l.add_first(5);
        assert_eq!(l.slots.len(), 3);
        check_links(&l);
        assert_eq!(l.to_vec(), vec![5, 3, 4]);
    }

    #[test]
    fn remove_by_value() {
        let mut l = list_of(&[1, 2, 3, 2, 4]);
        assert!(l.remove(&2));
        assert_eq!(l.to_vec(), vec![1, 3, 2, 4]);
        assert!(l.remove(&1));
        assert!(l.remove(&4));
        check_links(&l);
        assert_eq!(l.to_vec(), vec![3, 2]);
    }

    #[test]
    fn remove_only_element_empties() {
        let mut l = list_of(&[9]);
        assert!(l.remove(&9));
        assert_eq!(l.len(), 0);
        assert_eq!(l.head, None);
        assert_eq!(l.tail, None);
    }

    #[test]
    fn remove_missing_leaves_list_unchanged() {
        let mut l = list_of(&[1, 2, 3]);
        let before = l.clone();
        assert!(!l.remove(&12));
        assert_eq!(l, before);
        assert_eq!(l.head, before.head);
        assert_eq!(l.tail, before.tail);
        check_links(&l);
    }

    #[test]
    fn remove_stored_none() {
        let mut l: LinkedList<Option<&str>> = [Some("a"), None, Some("b"), None]
            .into_iter()
            .collect();
        assert!(l.remove(&None));
        assert_eq!(l.to_vec(), vec![Some("a"), Some("b"), None]);
        assert!(l.contains(&None));
        assert!(l.remove(&None));
        assert!(!l.contains(&None));
        assert!(!l.remove(&None));
    }

    #[test]
    fn contains_and_clear() {
        let mut l = list_of(&[1, 2, 3]);
        assert!(l.contains(&3));
        assert!(!l.contains(&4));
        l.clear();
        check_links(&l);
        assert!(l.is_empty());
        assert_eq!(l.iter().next(), None);
    }

    #[test]
    fn iteration_is_restartable_and_double_ended() {
        let l = list_of(&[1, 2, 3, 4]);
        let first: Vec<_> = l.iter().copied().collect();
        let second: Vec<_> = (&l).into_iter().copied().collect();
        assert_eq!(first, second);
        let rev: Vec<_> = l.iter().rev().copied().collect();
        assert_eq!(rev, vec![4, 3, 2, 1]);

        let mut it = l.iter();
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&4));
        assert_eq!(it.len(), 2);
        assert_eq!(it.next(), Some(&2));
        assert_eq!(it.next_back(), Some(&3));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn into_iter_drains_in_order() {
        let l = list_of(&[3, 1, 2]);
        let v: Vec<_> = l.into_iter().collect();
        assert_eq!(v, vec![3, 1, 2]);
    }

    #[test]
    fn shuffled_vec_is_a_permutation() {
        let l: LinkedList<i32> = (0..50).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let mut shuffled = l.to_shuffled_vec_with(&mut rng);
        assert_eq!(shuffled.len(), 50);
        assert_ne!(shuffled, l.to_vec());
        shuffled.sort_unstable();
        assert_eq!(shuffled, l.to_vec());
        // The list itself is untouched.
        assert_eq!(l.get(0), Some(&0));

        let mut fresh = l.to_shuffled_vec();
        fresh.sort_unstable();
        assert_eq!(fresh, l.to_vec());
    }

    #[test]
    fn debug_format() {
        let l = list_of(&[1, 2]);
        assert_eq!(format!("{l:?}"), "[1, 2]");
    }
}
