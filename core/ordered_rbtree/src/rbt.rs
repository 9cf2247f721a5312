//! Ordered Red-Black Tree
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use crate::{
    node::{Storage, NIL},
    Error, Item, Result,
};

/// Where an item lives, or would live, in the tree.
enum Location {
    /// An equal item is stored at this index.
    Occupied(usize),
    /// No equal item exists; a new node would hang off `parent` on the given side.
    Vacant { parent: usize, left: bool },
}

/// A red-black tree of items ordered by their [Item] implementation.
///
/// Nodes are addressed by `usize` handles. A handle stays valid until its node is deleted, but
/// deleting a node with two children moves its successor's item into it, so every delete should
/// be treated as invalidating all outstanding handles.
#[derive(Clone)]
pub struct Rbt<D>
where
    D: Item,
{
    pub(crate) storage: Storage<D>,
    pub(crate) root: usize,
}

impl<D> Rbt<D>
where
    D: Item,
{
    /// Creates an empty red-black tree.
    pub fn new() -> Self {
        Rbt { storage: Storage::new(), root: NIL }
    }

    /// Creates an empty red-black tree able to hold `capacity` items before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        log::debug!("Creating red-black tree with capacity for {} items.", capacity);
        Rbt { storage: Storage::with_capacity(capacity), root: NIL }
    }

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Indicates whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.storage.len() == 0
    }

    /// Returns the number of items the tree can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Reserves room for at least `additional` more items.
    pub fn reserve(&mut self, additional: usize) {
        self.storage.reserve(additional);
    }

    /// Returns the height of the tree.
    pub fn height(&self) -> usize {
        self.storage.height(self.root)
    }

    /// Removes every item from the tree, keeping the allocated storage.
    pub fn clear(&mut self) {
        log::trace!("Clearing red-black tree holding {} items.", self.len());
        self.storage.clear();
        self.root = NIL;
    }

    /// Adds an item to the tree unless an equal item is already present.
    ///
    /// Returns `true` if the item was added. When an equal item exists the tree is left
    /// untouched, including the stored item, and `false` is returned.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    pub fn insert(&mut self, item: D) -> bool {
        match self.location(&item) {
            Location::Occupied(_) => {
                log::trace!("Ignoring insert of an item equal to one already stored.");
                false
            }
            Location::Vacant { parent, left } => {
                self.insert_at(item, parent, left);
                true
            }
        }
    }

    /// Adds an item to the tree, or returns the stored item equal to it.
    ///
    /// When an equal item exists it is returned unmodified and `item` is dropped. Otherwise `item`
    /// is added and a reference to it is returned.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    pub fn insert_or_get(&mut self, item: D) -> &D {
        let idx = match self.location(&item) {
            Location::Occupied(idx) => idx,
            Location::Vacant { parent, left } => self.insert_at(item, parent, left),
        };
        self.storage.item(idx)
    }

    /// Adds an item to the tree, overwriting an equal item if one is stored.
    ///
    /// Returns `Some(D)` holding the previous item if it was overwritten.
    ///
    /// Returns `None` if the item was newly added.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    pub fn replace(&mut self, item: D) -> Option<D> {
        match self.location(&item) {
            Location::Occupied(idx) => Some(self.storage.replace_item(idx, item)),
            Location::Vacant { parent, left } => {
                self.insert_at(item, parent, left);
                None
            }
        }
    }

    /// Adds an item into the tree, returning the handle of its node.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [AlreadyExists](Error::AlreadyExists) if an equal item already exists in the tree.
    ///
    pub fn add(&mut self, item: D) -> Result<usize> {
        match self.location(&item) {
            Location::Occupied(_) => Err(Error::AlreadyExists),
            Location::Vacant { parent, left } => Ok(self.insert_at(item, parent, left)),
        }
    }

    /// Searches for an item equal to `item`, returning the stored one if it exists.
    ///
    /// # Time Complexity
    ///
    /// O(log n). Use [get_with_idx](Self::get_with_idx) if you know the handle, as it is O(1).
    ///
    pub fn get(&self, item: &D) -> Option<&D> {
        self.get_idx(item).map(|idx| self.storage.item(idx))
    }

    /// Indicates whether an item equal to `item` is stored in the tree.
    pub fn contains(&self, item: &D) -> bool {
        self.get_idx(item).is_some()
    }

    /// Searches the tree, returning the handle of the node holding an item equal to `item`.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    pub fn get_idx(&self, item: &D) -> Option<usize> {
        match self.location(item) {
            Location::Occupied(idx) => Some(idx),
            Location::Vacant { .. } => None,
        }
    }

    /// Directly accesses the item of a node.
    ///
    /// Returns `None` if the handle does not name a live node.
    ///
    /// # Time Complexity
    ///
    /// O(1)
    ///
    pub fn get_with_idx(&self, idx: usize) -> Option<&D> {
        self.storage.get(idx)
    }

    /// Returns the smallest item in the tree, or `None` if the tree is empty.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    pub fn min(&self) -> Option<&D> {
        self.first_idx().map(|idx| self.storage.item(idx))
    }

    /// Returns the largest item in the tree, or `None` if the tree is empty.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    pub fn max(&self) -> Option<&D> {
        self.last_idx().map(|idx| self.storage.item(idx))
    }

    /// Returns the handle of the node holding the smallest item.
    pub fn first_idx(&self) -> Option<usize> {
        (self.root != NIL).then(|| self.storage.minimum(self.root))
    }

    /// Returns the handle of the node holding the largest item.
    pub fn last_idx(&self) -> Option<usize> {
        (self.root != NIL).then(|| self.storage.maximum(self.root))
    }

    /// Returns the handle of the in-order successor of the node at `current`.
    ///
    /// Returns `None` if `current` holds the largest item or is not a live node.
    ///
    /// # Time Complexity
    ///
    /// O(1) amortized, O(log n) worst case.
    ///
    pub fn next_idx(&self, current: usize) -> Option<usize> {
        if !self.storage.contains(current) {
            log::trace!("next_idx called with stale handle {}.", current);
            return None;
        }
        let next = self.storage.successor(current);
        (next != NIL).then_some(next)
    }

    /// Returns the handle of the in-order predecessor of the node at `current`.
    ///
    /// Returns `None` if `current` holds the smallest item or is not a live node.
    ///
    /// # Time Complexity
    ///
    /// O(1) amortized, O(log n) worst case.
    ///
    pub fn prev_idx(&self, current: usize) -> Option<usize> {
        if !self.storage.contains(current) {
            log::trace!("prev_idx called with stale handle {}.", current);
            return None;
        }
        let prev = self.storage.predecessor(current);
        (prev != NIL).then_some(prev)
    }

    /// Returns the item following the stored item equal to `current`.
    ///
    /// Returns `None` if no equal item is stored or it is the largest one.
    pub fn next(&self, current: &D) -> Option<&D> {
        let idx = self.next_idx(self.get_idx(current)?)?;
        self.get_with_idx(idx)
    }

    /// Returns the item preceding the stored item equal to `current`.
    ///
    /// Returns `None` if no equal item is stored or it is the smallest one.
    pub fn prev(&self, current: &D) -> Option<&D> {
        let idx = self.prev_idx(self.get_idx(current)?)?;
        self.get_with_idx(idx)
    }

    /// Deletes the item equal to `item` from the tree.
    ///
    /// Returns `Some(D)` holding the removed item if it was found.
    ///
    /// Returns `None` if the item was not found, leaving the tree unchanged.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    pub fn delete(&mut self, item: &D) -> Option<D> {
        let idx = self.get_idx(item)?;
        Some(self.remove_node(idx))
    }

    /// Deletes the node with the given handle from the tree, returning its item.
    ///
    /// # Time Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [NotFound](Error::NotFound) if the handle does not name a live node.
    ///
    pub fn delete_with_idx(&mut self, idx: usize) -> Result<D> {
        if !self.storage.contains(idx) {
            return Err(Error::NotFound);
        }
        Ok(self.remove_node(idx))
    }

    /// Descends from the root looking for `item`.
    fn location(&self, item: &D) -> Location {
        let mut parent = NIL;
        let mut left = false;
        let mut current = self.root;
        while current != NIL {
            let stored = self.storage.item(current);
            parent = current;
            if item.less(stored) {
                left = true;
                current = self.storage.left(current);
            } else if stored.less(item) {
                left = false;
                current = self.storage.right(current);
            } else {
                return Location::Occupied(current);
            }
        }
        Location::Vacant { parent, left }
    }

    /// Hangs a new red leaf off `parent` and restores the red-black properties.
    fn insert_at(&mut self, item: D, parent: usize, left: bool) -> usize {
        let node = self.storage.add(item);
        self.storage.set_parent(node, parent);
        if parent == NIL {
            self.root = node;
        } else if left {
            self.storage.set_left(parent, node);
        } else {
            self.storage.set_right(parent, node);
        }
        self.fixup_add(node);
        node
    }

    /// Unlinks the node at `idx` from the tree and releases its slot, returning the removed item.
    fn remove_node(&mut self, idx: usize) -> D {
        // A node with two children trades items with its successor, which has at most one child,
        // and the successor's slot is the one spliced out.
        let mut to_splice = idx;
        if self.storage.left(idx) != NIL && self.storage.right(idx) != NIL {
            to_splice = self.storage.minimum(self.storage.right(idx));
            self.storage.swap_items(idx, to_splice);
        }

        let child = match self.storage.left(to_splice) {
            NIL => self.storage.right(to_splice),
            left => left,
        };
        let parent = self.storage.parent(to_splice);

        // Written even when `child` is the sentinel, the delete fixup walks up from it.
        self.storage.set_parent(child, parent);
        self.replace_child(parent, to_splice, child);

        if self.storage.is_black(to_splice) {
            self.fixup_delete(child);
        }
        self.storage.reset_sentinel();

        self.storage.delete(to_splice).expect("Spliced node holds an item.")
    }

    /// Points whichever link of `parent` referenced `old` at `new` instead.
    fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        if parent == NIL {
            self.root = new;
        } else if self.storage.left(parent) == old {
            self.storage.set_left(parent, new);
        } else {
            self.storage.set_right(parent, new);
        }
    }

    /// Rotate the subtree rooted at `node` to the left, returning the new subtree root.
    fn rotate_left(&mut self, node: usize) -> usize {
        let right_child = self.storage.right(node);
        let inner = self.storage.left(right_child);

        self.storage.set_right(node, inner);
        if inner != NIL {
            self.storage.set_parent(inner, node);
        }

        let parent = self.storage.parent(node);
        self.storage.set_parent(right_child, parent);
        self.replace_child(parent, node, right_child);

        self.storage.set_left(right_child, node);
        self.storage.set_parent(node, right_child);
        right_child
    }

    /// Rotate the subtree rooted at `node` to the right, returning the new subtree root.
    fn rotate_right(&mut self, node: usize) -> usize {
        let left_child = self.storage.left(node);
        let inner = self.storage.right(left_child);

        self.storage.set_left(node, inner);
        if inner != NIL {
            self.storage.set_parent(inner, node);
        }

        let parent = self.storage.parent(node);
        self.storage.set_parent(left_child, parent);
        self.replace_child(parent, node, left_child);

        self.storage.set_right(left_child, node);
        self.storage.set_parent(node, left_child);
        left_child
    }

    /// Updates the tree after a node has been added, to meet the red-black tree properties.
    fn fixup_add(&mut self, mut node: usize) {
        // The sentinel is black, so the loop also stops once `node` is the root.
        while self.storage.is_red(self.storage.parent(node)) {
            let parent = self.storage.parent(node);
            // A red parent is never the root, so the grandparent is a real node.
            let grandparent = self.storage.parent(parent);

            if parent == self.storage.left(grandparent) {
                let uncle = self.storage.right(grandparent);

                // Case 1: Uncle is red, recolor parent, grandparent, uncle and continue upwards
                if self.storage.is_red(uncle) {
                    self.storage.set_black(parent);
                    self.storage.set_black(uncle);
                    self.storage.set_red(grandparent);
                    node = grandparent;
                    continue;
                }

                // Case 2: uncle is black and node is left->right "inner child" of its grandparent
                if node == self.storage.right(parent) {
                    node = parent;
                    self.rotate_left(node);
                }

                // Case 3: uncle is black and node is left->left "outer child" of its grandparent
                let parent = self.storage.parent(node);
                let grandparent = self.storage.parent(parent);
                self.storage.set_black(parent);
                self.storage.set_red(grandparent);
                self.rotate_right(grandparent);
            } else {
                let uncle = self.storage.left(grandparent);

                if self.storage.is_red(uncle) {
                    self.storage.set_black(parent);
                    self.storage.set_black(uncle);
                    self.storage.set_red(grandparent);
                    node = grandparent;
                    continue;
                }

                // Case 2 mirrored: right->left "inner child"
                if node == self.storage.left(parent) {
                    node = parent;
                    self.rotate_right(node);
                }

                // Case 3 mirrored: right->right "outer child"
                let parent = self.storage.parent(node);
                let grandparent = self.storage.parent(parent);
                self.storage.set_black(parent);
                self.storage.set_red(grandparent);
                self.rotate_left(grandparent);
            }
        }
        let root = self.root;
        self.storage.set_black(root);
    }

    /// Updates the tree after a black node has been spliced out, to meet the red-black tree
    /// properties. `node` carries the extra black and may be the sentinel.
    fn fixup_delete(&mut self, mut node: usize) {
        while node != self.root && self.storage.is_black(node) {
            let parent = self.storage.parent(node);

            if node == self.storage.left(parent) {
                let mut sibling = self.storage.right(parent);

                // Case 1: The sibling is red, rotate it above the parent so the sibling is black
                if self.storage.is_red(sibling) {
                    self.storage.set_black(sibling);
                    self.storage.set_red(parent);
                    self.rotate_left(parent);
                    sibling = self.storage.right(parent);
                }

                // Case 2: Black sibling with two black children, push the extra black upwards
                if self.storage.is_black(self.storage.left(sibling)) && self.storage.is_black(self.storage.right(sibling)) {
                    self.storage.set_red(sibling);
                    node = parent;
                    continue;
                }

                // Case 3: Black sibling whose "outer nephew" is black, rotate the red inner nephew up
                if self.storage.is_black(self.storage.right(sibling)) {
                    let inner = self.storage.left(sibling);
                    self.storage.set_black(inner);
                    self.storage.set_red(sibling);
                    self.rotate_right(sibling);
                    sibling = self.storage.right(parent);
                }

                // Case 4: Black sibling with a red "outer nephew", rotate around the parent and stop
                let parent_color = self.storage.color(parent);
                self.storage.set_color(sibling, parent_color);
                self.storage.set_black(parent);
                let outer = self.storage.right(sibling);
                self.storage.set_black(outer);
                self.rotate_left(parent);
                node = self.root;
            } else {
                let mut sibling = self.storage.left(parent);

                if self.storage.is_red(sibling) {
                    self.storage.set_black(sibling);
                    self.storage.set_red(parent);
                    self.rotate_right(parent);
                    sibling = self.storage.left(parent);
                }

                if self.storage.is_black(self.storage.left(sibling)) && self.storage.is_black(self.storage.right(sibling)) {
                    self.storage.set_red(sibling);
                    node = parent;
                    continue;
                }

                if self.storage.is_black(self.storage.left(sibling)) {
                    let inner = self.storage.right(sibling);
                    self.storage.set_black(inner);
                    self.storage.set_red(sibling);
                    self.rotate_left(sibling);
                    sibling = self.storage.left(parent);
                }

                let parent_color = self.storage.color(parent);
                self.storage.set_color(sibling, parent_color);
                self.storage.set_black(parent);
                let outer = self.storage.left(sibling);
                self.storage.set_black(outer);
                self.rotate_right(parent);
                node = self.root;
            }
        }
        self.storage.set_black(node);
    }
}

impl<D> Default for Rbt<D>
where
    D: Item,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<D> core::fmt::Debug for Rbt<D>
where
    D: Item,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Rbt")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("height", &self.height())
            .finish()
    }
}

impl<D> FromIterator<D> for Rbt<D>
where
    D: Item,
{
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        let mut rbt = Rbt::new();
        rbt.extend(iter);
        rbt
    }
}

impl<D> Extend<D> for Rbt<D>
where
    D: Item,
{
    fn extend<I: IntoIterator<Item = D>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.insert(item);
        }
    }
}
