use std::collections::HashMap;
use std::fmt::Debug;

/// A binary min-heap over vertices with a position map, supporting
/// decrease-key.
///
/// Priorities are scalar distances; ties between equal priorities are left to
/// the heap's internal order. Callers that care about tie-breaking apply
/// their own comparison before deciding whether to insert or decrease.
#[derive(Debug)]
pub struct AddressableHeap<P>
where
    P: PartialOrd + Copy + Debug,
{
    /// Heap entries as `(priority, vertex)`, in binary-heap order
    entries: Vec<(P, usize)>,

    /// Index of each vertex inside `entries`
    positions: HashMap<usize, usize>,
}

impl<P> AddressableHeap<P>
where
    P: PartialOrd + Copy + Debug,
{
    /// Creates a new empty heap
    pub fn new() -> Self {
        AddressableHeap {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Creates a new empty heap with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        AddressableHeap {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Returns true if the heap holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries in the heap
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if `vertex` is currently in the heap
    pub fn contains(&self, vertex: usize) -> bool {
        self.positions.contains_key(&vertex)
    }

    /// Returns the current priority of `vertex`, if present
    pub fn priority(&self, vertex: usize) -> Option<P> {
        self.positions.get(&vertex).map(|&idx| self.entries[idx].0)
    }

    /// Adds `vertex` with the given priority. Callers guarantee the vertex is
    /// not already present.
    pub fn insert(&mut self, vertex: usize, priority: P) {
        debug_assert!(!self.contains(vertex), "vertex {vertex} inserted twice");
        let idx = self.entries.len();
        self.entries.push((priority, vertex));
        self.positions.insert(vertex, idx);
        self.sift_up(idx);
    }

    /// Removes and returns the entry with the smallest priority
    pub fn extract_min(&mut self) -> Option<(usize, P)> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.swap_entries(0, last);
        let (priority, vertex) = self.entries.pop().expect("non-empty heap");
        self.positions.remove(&vertex);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some((vertex, priority))
    }

    /// Lowers the priority of `vertex` to `priority`. A no-op when the vertex
    /// is absent or the new priority is not strictly smaller.
    pub fn decrease_key(&mut self, vertex: usize, priority: P) {
        let Some(&idx) = self.positions.get(&vertex) else {
            return;
        };
        if priority < self.entries[idx].0 {
            self.entries[idx].0 = priority;
            self.sift_up(idx);
        }
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.entries[idx].0 < self.entries[parent].0 {
                self.swap_entries(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        loop {
            let left = idx * 2 + 1;
            if left >= self.entries.len() {
                break;
            }
            let right = left + 1;
            let mut smallest = left;
            if right < self.entries.len() && self.entries[right].0 < self.entries[left].0 {
                smallest = right;
            }
            if self.entries[smallest].0 < self.entries[idx].0 {
                self.swap_entries(idx, smallest);
                idx = smallest;
            } else {
                break;
            }
        }
    }

    fn swap_entries(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.entries.swap(a, b);
        self.positions.insert(self.entries[a].1, a);
        self.positions.insert(self.entries[b].1, b);
    }
}

impl<P> Default for AddressableHeap<P>
where
    P: PartialOrd + Copy + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
