// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Port of GLU libtess dict.c/h
//
// A sorted doubly-linked list (dictionary) used by the sweep algorithm
// to maintain the active edge set ordered by the comparison function.
//
// Keys are ActiveRegion indices. INVALID = u32::MAX marks the head sentinel.
// Deleted nodes go on a free list and are reused by later inserts.

use crate::error::{TessError, TessResult};
use crate::mesh::INVALID;

/// Index into Dict::nodes
pub type NodeIdx = u32;

#[derive(Clone, Debug)]
pub struct DictNode {
    pub key: u32, // ActiveRegion index, or INVALID for the head
    pub next: NodeIdx,
    pub prev: NodeIdx,
}

impl Default for DictNode {
    fn default() -> Self {
        DictNode {
            key: INVALID,
            next: INVALID,
            prev: INVALID,
        }
    }
}

/// A sorted circular doubly-linked list.
// The head sentinel is always at index 0: head.prev == head.next == head when empty.
pub struct Dict {
    nodes: Vec<DictNode>,
    /// Recycled nodes, chained through `next`.
    free: NodeIdx,
}

/// Index of the head sentinel node.
pub const DICT_HEAD: NodeIdx = 0;

impl Dict {
    pub fn new() -> Self {
        let head = DictNode {
            key: INVALID,
            next: DICT_HEAD,
            prev: DICT_HEAD,
        };
        Dict {
            nodes: vec![head],
            free: INVALID,
        }
    }

    /// dictInsert: insert a key, searching backward from the head.
    pub fn insert<F>(&mut self, key: u32, leq: &F) -> TessResult<NodeIdx>
    where
        F: Fn(u32, u32) -> bool,
    {
        self.insert_before(DICT_HEAD, key, leq)
    }

    /// dictInsertBefore: walk backward from `node` to the first node whose
    /// key is `<= key` (or the head) and link the new node after it.
    pub fn insert_before<F>(&mut self, mut node: NodeIdx, key: u32, leq: &F) -> TessResult<NodeIdx>
    where
        F: Fn(u32, u32) -> bool,
    {
        loop {
            node = self.nodes[node as usize].prev;
            let node_key = self.nodes[node as usize].key;
            if node_key == INVALID || leq(node_key, key) {
                break;
            }
        }

        let next_node = self.nodes[node as usize].next;
        let new_node = DictNode {
            key,
            next: next_node,
            prev: node,
        };
        let new_idx = if self.free != INVALID {
            let idx = self.free;
            self.free = self.nodes[idx as usize].next;
            self.nodes[idx as usize] = new_node;
            idx
        } else {
            self.nodes
                .try_reserve(1)
                .map_err(|_| TessError::OutOfMemory)?;
            self.nodes.push(new_node);
            (self.nodes.len() - 1) as NodeIdx
        };

        self.nodes[node as usize].next = new_idx;
        self.nodes[next_node as usize].prev = new_idx;
        Ok(new_idx)
    }

    /// dictDelete: unlink a node and recycle it.
    pub fn delete(&mut self, node: NodeIdx) {
        debug_assert!(node != DICT_HEAD);
        let next = self.nodes[node as usize].next;
        let prev = self.nodes[node as usize].prev;
        self.nodes[next as usize].prev = prev;
        self.nodes[prev as usize].next = next;

        self.nodes[node as usize] = DictNode {
            key: INVALID,
            next: self.free,
            prev: INVALID,
        };
        self.free = node;
    }

    /// dictSearch: the first node whose key is `>= key`, or the head.
    pub fn search<F>(&self, key: u32, leq: &F) -> NodeIdx
    where
        F: Fn(u32, u32) -> bool,
    {
        let mut node = DICT_HEAD;
        loop {
            node = self.nodes[node as usize].next;
            let node_key = self.nodes[node as usize].key;
            if node_key == INVALID || leq(key, node_key) {
                return node;
            }
        }
    }

    #[inline]
    pub fn key(&self, node: NodeIdx) -> u32 {
        self.nodes[node as usize].key
    }

    #[inline]
    pub fn min(&self) -> NodeIdx {
        self.nodes[DICT_HEAD as usize].next
    }

    #[inline]
    pub fn succ(&self, node: NodeIdx) -> NodeIdx {
        self.nodes[node as usize].next
    }

    #[inline]
    pub fn pred(&self, node: NodeIdx) -> NodeIdx {
        self.nodes[node as usize].prev
    }

    pub fn is_empty(&self) -> bool {
        self.min() == DICT_HEAD
    }
}

impl Default for Dict {
    fn default() -> Self {
        Self::new()
    }
}
