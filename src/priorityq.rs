// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Port of GLU libtess priorityq.c and priorityq-heap.c
//
// A two-phase priority queue:
//   Phase 1 (pre-init): inserts go into a key array that `init` sorts once.
//   Phase 2 (post-init): inserts go directly into a min-heap.
// Deletion is supported via handles: negative handles address the sorted
// array, positive ones the heap. Zero is never a valid handle.
//
// Keys are vertex indices. The ordering is supplied on every call, so the
// queue never holds a reference to the mesh it orders.

use crate::error::{TessError, TessResult};
use crate::mesh::INVALID;

#[inline]
fn grow<T>(v: &mut Vec<T>, additional: usize) -> TessResult<()> {
    v.try_reserve(additional).map_err(|_| TessError::OutOfMemory)
}

/// A heap-based priority queue (used after initialization).
struct Heap {
    /// nodes[1..=size] are active; nodes[0] unused. Stores handle indices.
    nodes: Vec<i32>,
    /// handles[handle] = (key, node_pos). Free handles chain through node_pos.
    handles: Vec<(u32, i32)>,
    size: usize,
    free_list: i32,
    initialized: bool,
}

impl Heap {
    fn new() -> Self {
        Heap {
            // nodes[1] = 1 and handles[1].key = INVALID so that an empty heap
            // reports no minimum.
            nodes: vec![0, 1],
            handles: vec![(INVALID, 0), (INVALID, 1)],
            size: 0,
            free_list: 0,
            initialized: false,
        }
    }

    #[inline]
    fn key_of(&self, handle: i32) -> u32 {
        self.handles[handle as usize].0
    }

    fn float_down<F: Fn(u32, u32) -> bool>(&mut self, mut curr: usize, leq: &F) {
        let h_curr = self.nodes[curr];
        loop {
            let mut child = curr << 1;
            if child < self.size
                && leq(self.key_of(self.nodes[child + 1]), self.key_of(self.nodes[child]))
            {
                child += 1;
            }
            if child > self.size || leq(self.key_of(h_curr), self.key_of(self.nodes[child])) {
                self.nodes[curr] = h_curr;
                self.handles[h_curr as usize].1 = curr as i32;
                break;
            }
            let h_child = self.nodes[child];
            self.nodes[curr] = h_child;
            self.handles[h_child as usize].1 = curr as i32;
            curr = child;
        }
    }

    fn float_up<F: Fn(u32, u32) -> bool>(&mut self, mut curr: usize, leq: &F) {
        let h_curr = self.nodes[curr];
        loop {
            let parent = curr >> 1;
            if parent == 0 || leq(self.key_of(self.nodes[parent]), self.key_of(h_curr)) {
                self.nodes[curr] = h_curr;
                self.handles[h_curr as usize].1 = curr as i32;
                break;
            }
            let h_parent = self.nodes[parent];
            self.nodes[curr] = h_parent;
            self.handles[h_parent as usize].1 = curr as i32;
            curr = parent;
        }
    }

    fn init<F: Fn(u32, u32) -> bool>(&mut self, leq: &F) {
        for i in (1..=self.size).rev() {
            self.float_down(i, leq);
        }
        self.initialized = true;
    }

    fn insert<F: Fn(u32, u32) -> bool>(&mut self, key: u32, leq: &F) -> TessResult<i32> {
        let curr = self.size + 1;
        if curr >= self.nodes.len() {
            grow(&mut self.nodes, 1)?;
            self.nodes.push(0);
        }

        let free_handle = if self.free_list == 0 {
            if curr >= self.handles.len() {
                grow(&mut self.handles, 1)?;
                self.handles.push((INVALID, 0));
            }
            curr as i32
        } else {
            let f = self.free_list;
            self.free_list = self.handles[f as usize].1;
            f
        };

        self.size = curr;
        self.nodes[curr] = free_handle;
        self.handles[free_handle as usize] = (key, curr as i32);

        if self.initialized {
            self.float_up(curr, leq);
        }
        Ok(free_handle)
    }

    fn extract_min<F: Fn(u32, u32) -> bool>(&mut self, leq: &F) -> u32 {
        let h_min = self.nodes[1];
        let min_key = self.handles[h_min as usize].0;

        if self.size > 0 {
            self.nodes[1] = self.nodes[self.size];
            self.handles[self.nodes[1] as usize].1 = 1;

            self.handles[h_min as usize] = (INVALID, self.free_list);
            self.free_list = h_min;

            self.size -= 1;
            if self.size > 0 {
                self.float_down(1, leq);
            }
        }
        min_key
    }

    fn delete<F: Fn(u32, u32) -> bool>(&mut self, h_curr: i32, leq: &F) {
        debug_assert!(self.handles[h_curr as usize].0 != INVALID);
        let curr = self.handles[h_curr as usize].1 as usize;

        self.nodes[curr] = self.nodes[self.size];
        self.handles[self.nodes[curr] as usize].1 = curr as i32;

        self.size -= 1;
        if curr <= self.size {
            if curr <= 1
                || leq(
                    self.key_of(self.nodes[curr >> 1]),
                    self.key_of(self.nodes[curr]),
                )
            {
                self.float_down(curr, leq);
            } else {
                self.float_up(curr, leq);
            }
        }

        self.handles[h_curr as usize] = (INVALID, self.free_list);
        self.free_list = h_curr;
    }

    #[inline]
    fn minimum(&self) -> u32 {
        self.handles[self.nodes[1] as usize].0
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// The combined priority queue (sort-array + heap).
pub struct PriorityQ {
    heap: Heap,
    /// Pre-init key storage; deleted entries become INVALID.
    keys: Vec<u32>,
    /// Indices into `keys`, sorted so the minimum is at the end.
    order: Vec<usize>,
    /// Live prefix of `order`.
    size: usize,
    initialized: bool,
}

impl Default for PriorityQ {
    fn default() -> Self {
        Self::new()
    }
}

impl PriorityQ {
    pub fn new() -> Self {
        PriorityQ {
            heap: Heap::new(),
            keys: Vec::new(),
            order: Vec::new(),
            size: 0,
            initialized: false,
        }
    }

    /// Sort the pre-init keys and switch to heap inserts.
    pub fn init<F: Fn(u32, u32) -> bool>(&mut self, leq: &F) -> TessResult<()> {
        grow(&mut self.order, self.keys.len())?;
        self.order.clear();
        self.order.extend(0..self.keys.len());
        self.size = self.keys.len();

        // Descending, so the minimum pops from the end.
        let keys = &self.keys;
        self.order.sort_by(|&a, &b| {
            let (ka, kb) = (keys[a], keys[b]);
            match (leq(ka, kb), leq(kb, ka)) {
                (true, true) => std::cmp::Ordering::Equal,
                (true, false) => std::cmp::Ordering::Greater,
                _ => std::cmp::Ordering::Less,
            }
        });

        self.initialized = true;
        self.heap.init(leq);
        Ok(())
    }

    /// Insert a key and return its handle.
    pub fn insert<F: Fn(u32, u32) -> bool>(&mut self, key: u32, leq: &F) -> TessResult<i32> {
        if self.initialized {
            return self.heap.insert(key, leq);
        }
        grow(&mut self.keys, 1)?;
        let curr = self.keys.len();
        self.keys.push(key);
        Ok(-(curr as i32 + 1))
    }

    #[inline]
    fn sort_min(&self) -> u32 {
        self.keys[self.order[self.size - 1]]
    }

    /// Remove and return the smallest key, or `None` when empty.
    pub fn extract_min<F: Fn(u32, u32) -> bool>(&mut self, leq: &F) -> Option<u32> {
        if self.size == 0 {
            if self.heap.is_empty() {
                return None;
            }
            return Some(self.heap.extract_min(leq));
        }

        let sort_min = self.sort_min();
        if !self.heap.is_empty() && leq(self.heap.minimum(), sort_min) {
            return Some(self.heap.extract_min(leq));
        }

        loop {
            self.size -= 1;
            if self.size == 0 || self.sort_min() != INVALID {
                break;
            }
        }
        Some(sort_min)
    }

    /// The smallest key without removing it.
    pub fn minimum<F: Fn(u32, u32) -> bool>(&self, leq: &F) -> Option<u32> {
        if self.size == 0 {
            if self.heap.is_empty() {
                return None;
            }
            return Some(self.heap.minimum());
        }

        let sort_min = self.sort_min();
        if !self.heap.is_empty() {
            let heap_min = self.heap.minimum();
            if leq(heap_min, sort_min) {
                return Some(heap_min);
            }
        }
        Some(sort_min)
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0 && self.heap.is_empty()
    }

    /// Delete the key with the given handle.
    pub fn delete<F: Fn(u32, u32) -> bool>(&mut self, handle: i32, leq: &F) {
        if handle >= 0 {
            self.heap.delete(handle, leq);
            return;
        }

        let curr = (-(handle + 1)) as usize;
        debug_assert!(curr < self.keys.len() && self.keys[curr] != INVALID);
        self.keys[curr] = INVALID;

        while self.size > 0 && self.sort_min() == INVALID {
            self.size -= 1;
        }
    }
}
