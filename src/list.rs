//! Singly-linked list container
//!
//! [`List`] keeps a head link and a length counter and nothing else: there is
//! no tail pointer, so appending walks the whole chain. That is fine for the
//! roster sizes this crate targets (tens to low thousands of records).
//!
//! Complexity:
//! - `first`, `pop_front`, `len`, `is_empty`: O(1)
//! - `add`, `get`, `remove`, `remove_at`, `contains`: O(n)
//! - `clear`: O(1) unlinking; nodes are released as the chain is dropped

use std::fmt;
use std::iter::FusedIterator;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ListError;

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    element: T,
    next: Link<T>,
}

/// An ordered, mutable, singly-linked sequence
pub struct List<T> {
    head: Link<T>,
    len: usize,
}

impl<T> List<T> {
    /// Create an empty list
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Append an element at the tail
    pub fn add(&mut self, element: T) {
        let len = self.len;
        let node = Box::new(Node { element, next: None });
        match self.link_at_mut(len) {
            Some(slot) => *slot = Some(node),
            None => unreachable!("list length out of sync with its links"),
        }
        self.len += 1;
    }

    /// Remove the first element equal to `element`
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, element: &T) -> bool
    where
        T: PartialEq,
    {
        match self.position(|e| e == element) {
            Some(index) => self.remove_at(index),
            None => false,
        }
    }

    /// Remove the element at `index`
    ///
    /// An out-of-range index is a no-op and returns `false`.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        let Some(slot) = self.link_at_mut(index) else {
            return false;
        };
        match slot.take() {
            Some(mut node) => {
                *slot = node.next.take();
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Detach and return the head element
    pub fn pop_front(&mut self) -> Option<T> {
        self.head.take().map(|mut node| {
            self.head = node.next.take();
            self.len -= 1;
            node.element
        })
    }

    /// Drop every element
    pub fn clear(&mut self) {
        let chain = self.head.take();
        self.len = 0;
        drop_chain(chain);
    }

    /// Linear equality scan
    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|e| e == element)
    }

    /// Element at `index`, or [`ListError::IndexOutOfRange`]
    pub fn get(&self, index: usize) -> Result<&T, ListError> {
        if index >= self.len {
            return Err(ListError::IndexOutOfRange { index, len: self.len });
        }
        self.iter()
            .nth(index)
            .ok_or(ListError::IndexOutOfRange { index, len: self.len })
    }

    /// Head element, if any
    pub fn first(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.element)
    }

    /// Index of the first element matching `predicate`
    pub fn position<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().position(|e| predicate(e))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Snapshot of the elements in list order
    ///
    /// The returned vector is independent of later mutations.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len);
        out.extend(self.iter().cloned());
        out
    }

    /// New list holding clones of the elements that satisfy `predicate`
    ///
    /// Relative order is preserved and `self` is left untouched.
    pub fn filter<P>(&self, mut predicate: P) -> List<T>
    where
        T: Clone,
        P: FnMut(&T) -> bool,
    {
        self.iter().filter(|e| predicate(e)).cloned().collect()
    }

    /// Forward iterator from the head
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }

    /// The link that holds (or would hold) the node at `index`.
    /// `index == len` yields the empty tail link.
    fn link_at_mut(&mut self, index: usize) -> Option<&mut Link<T>> {
        let mut cursor = &mut self.head;
        for _ in 0..index {
            cursor = &mut cursor.as_mut()?.next;
        }
        Some(cursor)
    }
}

/// Unlink nodes one at a time so long chains don't overflow the stack
fn drop_chain<T>(mut link: Link<T>) {
    while let Some(mut node) = link {
        link = node.next.take();
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        drop_chain(self.head.take());
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        // Walk to the tail once instead of once per element
        let mut appended = 0;
        let len = self.len;
        let Some(mut tail) = self.link_at_mut(len) else {
            unreachable!("list length out of sync with its links");
        };
        for element in iter {
            let node = tail.insert(Box::new(Node { element, next: None }));
            tail = &mut node.next;
            appended += 1;
        }
        self.len += appended;
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

/// Borrowing iterator over a [`List`]
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            self.remaining -= 1;
            &node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator over a [`List`]
pub struct IntoIter<T>(List<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<T: Serialize> Serialize for List<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for List<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(|items| items.into_iter().collect())
    }
}
