//! Frontier containers for the three search strategies.
//!
//! BFS uses a FIFO queue, DFS a LIFO stack and A* a min-priority queue. All
//! three sit behind [`Frontier`] so the strategies read the same way.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

/// Discovered entries waiting to be popped.
pub trait Frontier {
    type Entry;

    fn push(&mut self, entry: Self::Entry);

    fn pop(&mut self) -> Option<Self::Entry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First in, first out.
impl<T> Frontier for VecDeque<T> {
    type Entry = T;

    #[inline]
    fn push(&mut self, entry: T) {
        self.push_back(entry);
    }

    #[inline]
    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

/// Last in, first out.
impl<T> Frontier for Vec<T> {
    type Entry = T;

    #[inline]
    fn push(&mut self, entry: T) {
        Vec::push(self, entry);
    }

    #[inline]
    fn pop(&mut self) -> Option<T> {
        Vec::pop(self)
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

/// Heap entry ordered by `(priority, sequence)` only; the payload never
/// takes part in comparisons.
struct Ranked<T> {
    key: Reverse<(u32, u64)>,
    item: T,
}

impl<T> PartialEq for Ranked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for Ranked<T> {}

impl<T> PartialOrd for Ranked<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Ranked<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Min-priority frontier.
///
/// Pops the lowest priority first. Equal priorities come out in the order
/// they were pushed.
pub struct BestFirst<T> {
    heap: BinaryHeap<Ranked<T>>,
    next_sequence: u64,
}

impl<T> BestFirst<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }
}

impl<T> Default for BestFirst<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier for BestFirst<T> {
    /// `(priority, item)`.
    type Entry = (u32, T);

    fn push(&mut self, (priority, item): (u32, T)) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Ranked {
            key: Reverse((priority, sequence)),
            item,
        });
    }

    fn pop(&mut self) -> Option<(u32, T)> {
        self.heap.pop().map(|ranked| (ranked.key.0 .0, ranked.item))
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
