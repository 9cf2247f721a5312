//! Ordered Red-Black Tree - Node Storage
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use alloc::vec::Vec;

/// The color RED of a node in a red-black tree.
pub const RED: bool = false;
/// The color BLACK of a node in a red-black tree.
pub const BLACK: bool = true;
/// Index of the sentinel node, used for every absent child and for the parent of the root.
pub const NIL: usize = 0;

/// A single slot of the node arena.
#[derive(Clone)]
pub(crate) struct Node<D> {
    /// `None` for the sentinel and for slots sitting on the free list.
    pub item: Option<D>,
    color: bool,
    parent: usize,
    left: usize,
    right: usize,
}

impl<D> Node<D> {
    const fn sentinel() -> Self {
        Node { item: None, color: BLACK, parent: NIL, left: NIL, right: NIL }
    }

    fn new(item: D) -> Self {
        Node { item: Some(item), color: RED, parent: NIL, left: NIL, right: NIL }
    }
}

/// A growable storage container for the nodes of a red-black tree.
///
/// Slot [NIL] always holds the sentinel. Deleted slots are kept in a linked list threaded
/// through their `right` link and are handed out again before the vector grows.
#[derive(Clone)]
pub(crate) struct Storage<D> {
    /// The storage container for the nodes.
    data: Vec<Node<D>>,
    /// The number of live nodes in the tree.
    length: usize,
    /// Head of the linked list of free slots.
    available: usize,
}

impl<D> Storage<D> {
    /// Create an empty storage container.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a storage container able to hold `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut data = Vec::with_capacity(capacity.saturating_add(1));
        data.push(Node::sentinel());
        Storage { data, length: 0, available: NIL }
    }

    /// Get the number of live nodes in the storage container.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Get the number of nodes the container can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.data.capacity() - 1
    }

    /// Make room for at least `additional` more nodes, counting free slots.
    pub fn reserve(&mut self, additional: usize) {
        let free = self.data.len() - 1 - self.length;
        if additional > free {
            self.data.reserve(additional - free);
        }
    }

    /// Add a new red node holding `item`, returning its index.
    ///
    /// # Time Complexity
    ///
    /// O(1) amortized
    ///
    pub fn add(&mut self, item: D) -> usize {
        self.length += 1;
        if self.available != NIL {
            let idx = self.available;
            let node = &mut self.data[idx];
            self.available = node.right;
            *node = Node::new(item);
            return idx;
        }

        if self.data.len() == self.data.capacity() {
            log::trace!("Growing node storage past {} slots.", self.data.capacity());
        }
        self.data.push(Node::new(item));
        self.data.len() - 1
    }

    /// Delete a node from the storage container, returning the item it held.
    ///
    /// The node must already be unlinked from the tree.
    ///
    /// # Time Complexity
    ///
    /// O(1)
    ///
    pub fn delete(&mut self, idx: usize) -> Option<D> {
        if !self.contains(idx) {
            return None;
        }
        let node = &mut self.data[idx];
        let item = node.item.take();
        node.color = BLACK;
        node.parent = NIL;
        node.left = NIL;
        node.right = self.available;
        self.available = idx;
        self.length -= 1;
        item
    }

    /// Drop every node, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.truncate(1);
        self.data[NIL] = Node::sentinel();
        self.length = 0;
        self.available = NIL;
    }

    /// Indicates whether `idx` names a live node.
    pub fn contains(&self, idx: usize) -> bool {
        idx != NIL && self.data.get(idx).is_some_and(|node| node.item.is_some())
    }

    /// Gets a reference to the item of a live node.
    pub fn get(&self, idx: usize) -> Option<&D> {
        if idx == NIL {
            return None;
        }
        self.data.get(idx)?.item.as_ref()
    }

    /// Gets the item of a node known to be live.
    pub fn item(&self, idx: usize) -> &D {
        self.data[idx].item.as_ref().expect("Live node holds an item.")
    }

    /// Replaces the item of a node known to be live, returning the old one.
    pub fn replace_item(&mut self, idx: usize, item: D) -> D {
        self.data[idx].item.replace(item).expect("Live node holds an item.")
    }

    /// Exchanges the items of two nodes, leaving structure and colors in place.
    pub fn swap_items(&mut self, a: usize, b: usize) {
        let item = self.data[a].item.take();
        self.data[a].item = core::mem::replace(&mut self.data[b].item, item);
    }

    pub fn color(&self, idx: usize) -> bool {
        self.data[idx].color
    }

    pub fn set_color(&mut self, idx: usize, color: bool) {
        self.data[idx].color = color;
    }

    pub fn is_red(&self, idx: usize) -> bool {
        self.data[idx].color == RED
    }

    pub fn is_black(&self, idx: usize) -> bool {
        self.data[idx].color == BLACK
    }

    pub fn set_red(&mut self, idx: usize) {
        self.set_color(idx, RED);
    }

    pub fn set_black(&mut self, idx: usize) {
        self.set_color(idx, BLACK);
    }

    pub fn parent(&self, idx: usize) -> usize {
        self.data[idx].parent
    }

    pub fn set_parent(&mut self, idx: usize, parent: usize) {
        self.data[idx].parent = parent;
    }

    pub fn left(&self, idx: usize) -> usize {
        self.data[idx].left
    }

    pub fn set_left(&mut self, idx: usize, left: usize) {
        self.data[idx].left = left;
    }

    pub fn right(&self, idx: usize) -> usize {
        self.data[idx].right
    }

    pub fn set_right(&mut self, idx: usize, right: usize) {
        self.data[idx].right = right;
    }

    /// The sentinel's parent link is scratch space during delete; this puts it back.
    pub fn reset_sentinel(&mut self) {
        self.data[NIL].parent = NIL;
    }

    /// Indicates whether the sentinel still looks like a freshly created sentinel.
    pub fn sentinel_intact(&self) -> bool {
        let nil = &self.data[NIL];
        nil.item.is_none() && nil.color == BLACK && nil.parent == NIL && nil.left == NIL && nil.right == NIL
    }

    /// Returns the leftmost node of the subtree rooted at `idx`.
    pub fn minimum(&self, mut idx: usize) -> usize {
        while self.left(idx) != NIL {
            idx = self.left(idx);
        }
        idx
    }

    /// Returns the rightmost node of the subtree rooted at `idx`.
    pub fn maximum(&self, mut idx: usize) -> usize {
        while self.right(idx) != NIL {
            idx = self.right(idx);
        }
        idx
    }

    /// Returns the in-order successor of `idx`, or [NIL] if it is the last node.
    pub fn successor(&self, idx: usize) -> usize {
        if self.right(idx) != NIL {
            return self.minimum(self.right(idx));
        }
        let mut current = idx;
        let mut parent = self.parent(current);
        while parent != NIL && current == self.right(parent) {
            current = parent;
            parent = self.parent(parent);
        }
        parent
    }

    /// Returns the in-order predecessor of `idx`, or [NIL] if it is the first node.
    pub fn predecessor(&self, idx: usize) -> usize {
        if self.left(idx) != NIL {
            return self.maximum(self.left(idx));
        }
        let mut current = idx;
        let mut parent = self.parent(current);
        while parent != NIL && current == self.left(parent) {
            current = parent;
            parent = self.parent(parent);
        }
        parent
    }

    /// Returns the number of nodes on the longest path from `idx` down to the sentinel.
    pub fn height(&self, idx: usize) -> usize {
        if idx == NIL {
            return 0;
        }
        core::cmp::max(self.height(self.left(idx)), self.height(self.right(idx))) + 1
    }
}
