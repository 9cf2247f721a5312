//! Ordered Red-Black Tree - Invariant Checking
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use crate::{node::NIL, Error, Item, Rbt, Result};

impl<D> Rbt<D>
where
    D: Item,
{
    /// Checks every red-black and binary search tree property of the tree.
    ///
    /// Returns the black height of the tree, not counting the sentinel.
    ///
    /// # Time Complexity
    ///
    /// O(n)
    ///
    /// # Errors
    ///
    /// Returns the first violation found:
    ///
    /// - [BrokenLink](Error::BrokenLink) if the sentinel was modified or a child does not point
    ///   back at its parent.
    /// - [RedRoot](Error::RedRoot) if the root is red.
    /// - [RedViolation](Error::RedViolation) if a red node has a red child.
    /// - [BlackHeightMismatch](Error::BlackHeightMismatch) if two paths carry a different number
    ///   of black nodes.
    /// - [OrderViolation](Error::OrderViolation) if the in-order sequence is not strictly
    ///   increasing.
    /// - [LengthMismatch](Error::LengthMismatch) if the number of reachable nodes differs from
    ///   [len](Self::len).
    ///
    pub fn verify(&self) -> Result<usize> {
        self.check_tree().inspect_err(|err| log::warn!("Red-black tree failed verification: {}", err))
    }

    fn check_tree(&self) -> Result<usize> {
        if !self.storage.sentinel_intact() || self.storage.parent(self.root) != NIL {
            return Err(Error::BrokenLink);
        }
        if self.root != NIL && self.storage.is_red(self.root) {
            return Err(Error::RedRoot);
        }

        let mut count = 0;
        let mut last = None;
        let black_height = self.check_subtree(self.root, &mut count, &mut last)?;

        if count != self.len() {
            return Err(Error::LengthMismatch);
        }
        Ok(black_height)
    }

    /// Checks the subtree rooted at `idx`, returning its black height.
    ///
    /// `last` tracks the previous node of the in-order walk.
    fn check_subtree(&self, idx: usize, count: &mut usize, last: &mut Option<usize>) -> Result<usize> {
        if idx == NIL {
            return Ok(0);
        }
        if !self.storage.contains(idx) {
            return Err(Error::BrokenLink);
        }

        let left = self.storage.left(idx);
        let right = self.storage.right(idx);
        for child in [left, right] {
            if child == NIL {
                continue;
            }
            if self.storage.parent(child) != idx {
                return Err(Error::BrokenLink);
            }
            if self.storage.is_red(idx) && self.storage.is_red(child) {
                return Err(Error::RedViolation);
            }
        }

        let left_height = self.check_subtree(left, count, last)?;

        let item = self.storage.item(idx);
        if let Some(prev) = *last {
            if !self.storage.item(prev).less(item) {
                return Err(Error::OrderViolation);
            }
        }
        *last = Some(idx);
        *count += 1;
        if *count > self.len() {
            // Also stops a cycle from recursing forever.
            return Err(Error::LengthMismatch);
        }

        let right_height = self.check_subtree(right, count, last)?;
        if left_height != right_height {
            return Err(Error::BlackHeightMismatch);
        }
        Ok(left_height + usize::from(self.storage.is_black(idx)))
    }
}
