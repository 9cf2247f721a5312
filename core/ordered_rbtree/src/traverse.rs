//! Ordered Red-Black Tree - Traversal
//!
//! Callback traversals stop as soon as the visitor returns `false` and never look at the rest of
//! the tree. Subtrees that cannot hold a qualifying item are skipped without being visited.
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
use crate::{node::NIL, Item, Rbt};

impl<D> Rbt<D>
where
    D: Item,
{
    /// Visits, in ascending order, every item greater than or equal to `pivot`.
    ///
    /// Traversal ends early if `visit` returns `false`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use ordered_rbtree::Rbt;
    ///
    /// let rbt: Rbt<u32> = (0..10).collect();
    /// let mut seen = Vec::new();
    /// rbt.ascend(&7, |item| {
    ///     seen.push(*item);
    ///     true
    /// });
    /// assert_eq!(seen, [7, 8, 9]);
    /// ```
    pub fn ascend<F>(&self, pivot: &D, mut visit: F)
    where
        F: FnMut(&D) -> bool,
    {
        self.ascend_from(self.root, pivot, &mut visit);
    }

    /// Visits, in descending order, every item less than or equal to `pivot`.
    ///
    /// Traversal ends early if `visit` returns `false`.
    pub fn descend<F>(&self, pivot: &D, mut visit: F)
    where
        F: FnMut(&D) -> bool,
    {
        self.descend_from(self.root, pivot, &mut visit);
    }

    /// Visits, in ascending order, every item in the half open range `[ge, lt)`.
    ///
    /// Traversal ends early if `visit` returns `false`.
    pub fn ascend_range<F>(&self, ge: &D, lt: &D, mut visit: F)
    where
        F: FnMut(&D) -> bool,
    {
        self.ascend_range_from(self.root, ge, lt, &mut visit);
    }

    /// Visits every item parent first, then the left subtree, then the right subtree.
    ///
    /// Traversal ends early if `visit` returns `false`.
    pub fn preorder<F>(&self, mut visit: F)
    where
        F: FnMut(&D) -> bool,
    {
        self.preorder_from(self.root, &mut visit);
    }

    /// Returns an iterator over the items of the tree in ascending order.
    pub fn iter(&self) -> Iter<'_, D> {
        Iter { rbt: self, front: self.first_idx(), back: self.last_idx(), remaining: self.len() }
    }

    fn ascend_from<F>(&self, idx: usize, pivot: &D, visit: &mut F) -> bool
    where
        F: FnMut(&D) -> bool,
    {
        if idx == NIL {
            return true;
        }
        let item = self.storage.item(idx);
        if !item.less(pivot) {
            if !self.ascend_from(self.storage.left(idx), pivot, visit) {
                return false;
            }
            if !visit(item) {
                return false;
            }
        }
        self.ascend_from(self.storage.right(idx), pivot, visit)
    }

    fn descend_from<F>(&self, idx: usize, pivot: &D, visit: &mut F) -> bool
    where
        F: FnMut(&D) -> bool,
    {
        if idx == NIL {
            return true;
        }
        let item = self.storage.item(idx);
        if !pivot.less(item) {
            if !self.descend_from(self.storage.right(idx), pivot, visit) {
                return false;
            }
            if !visit(item) {
                return false;
            }
        }
        self.descend_from(self.storage.left(idx), pivot, visit)
    }

    fn ascend_range_from<F>(&self, idx: usize, ge: &D, lt: &D, visit: &mut F) -> bool
    where
        F: FnMut(&D) -> bool,
    {
        if idx == NIL {
            return true;
        }
        let item = self.storage.item(idx);
        if !item.less(lt) {
            return self.ascend_range_from(self.storage.left(idx), ge, lt, visit);
        }
        if item.less(ge) {
            return self.ascend_range_from(self.storage.right(idx), ge, lt, visit);
        }

        if !self.ascend_range_from(self.storage.left(idx), ge, lt, visit) {
            return false;
        }
        if !visit(item) {
            return false;
        }
        self.ascend_range_from(self.storage.right(idx), ge, lt, visit)
    }

    fn preorder_from<F>(&self, idx: usize, visit: &mut F) -> bool
    where
        F: FnMut(&D) -> bool,
    {
        if idx == NIL {
            return true;
        }
        visit(self.storage.item(idx))
            && self.preorder_from(self.storage.left(idx), visit)
            && self.preorder_from(self.storage.right(idx), visit)
    }
}

/// An iterator over the items of an [Rbt] in ascending order.
///
/// Created by [Rbt::iter]. Walks the tree by successor and predecessor links, so it needs no
/// allocation.
pub struct Iter<'a, D>
where
    D: Item,
{
    rbt: &'a Rbt<D>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, D> Iterator for Iter<'a, D>
where
    D: Item,
{
    type Item = &'a D;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front?;
        self.remaining -= 1;
        self.front = self.rbt.next_idx(idx);
        self.rbt.get_with_idx(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<D> DoubleEndedIterator for Iter<'_, D>
where
    D: Item,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back?;
        self.remaining -= 1;
        self.back = self.rbt.prev_idx(idx);
        self.rbt.get_with_idx(idx)
    }
}

impl<D> ExactSizeIterator for Iter<'_, D> where D: Item {}

impl<D> Clone for Iter<'_, D>
where
    D: Item,
{
    fn clone(&self) -> Self {
        Iter { rbt: self.rbt, front: self.front, back: self.back, remaining: self.remaining }
    }
}

impl<'a, D> IntoIterator for &'a Rbt<D>
where
    D: Item,
{
    type Item = &'a D;
    type IntoIter = Iter<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use crate::Rbt;
    use std::{vec, vec::Vec};

    const WORDS: [&str; 9] = ["a", "b", "c", "aa", "ab", "ac", "abc", "acb", "bac"];

    fn collect_ascend<D: crate::Item + Copy>(rbt: &Rbt<D>, pivot: &D) -> Vec<D> {
        let mut seen = Vec::new();
        rbt.ascend(pivot, |item| {
            seen.push(*item);
            true
        });
        seen
    }

    #[test]
    fn test_ascend_after_deleting_min() {
        let mut rbt: Rbt<&str> = ["a", "b", "c", "d"].into_iter().collect();
        rbt.delete(&"a");

        let min = *rbt.min().unwrap();
        assert_eq!(min, "b");
        assert_eq!(collect_ascend(&rbt, &min), ["b", "c", "d"]);
    }

    #[test]
    fn test_ascend_pivot_is_inclusive() {
        let rbt: Rbt<u32> = (0..10).map(|i| i * 2).collect();
        assert_eq!(collect_ascend(&rbt, &14), [14, 16, 18]);
        assert_eq!(collect_ascend(&rbt, &15), [16, 18]);
        assert!(collect_ascend(&rbt, &100).is_empty());
        assert_eq!(collect_ascend(&rbt, &0).len(), 10);
    }

    #[test]
    fn test_descend() {
        let rbt: Rbt<u32> = (0..10).collect();
        let mut seen = Vec::new();
        rbt.descend(&1, |item| {
            seen.push(*item);
            true
        });
        assert_eq!(seen, [1, 0]);

        let mut seen = Vec::new();
        rbt.descend(&100, |item| {
            seen.push(*item);
            true
        });
        assert_eq!(seen, [9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_ascend_range() {
        let rbt: Rbt<&str> = WORDS.into_iter().collect();
        let mut seen = Vec::new();
        rbt.ascend_range(&"ab", &"b", |item| {
            seen.push(*item);
            true
        });
        assert_eq!(seen, ["ab", "abc", "ac", "acb"]);

        // An empty or inverted range visits nothing
        let mut count = 0;
        rbt.ascend_range(&"b", &"b", |_| {
            count += 1;
            true
        });
        rbt.ascend_range(&"c", &"a", |_| {
            count += 1;
            true
        });
        assert_eq!(count, 0);
    }

    #[test]
    fn test_early_termination() {
        let rbt: Rbt<u32> = (0..0x1000).collect();

        let mut visited = 0;
        rbt.ascend(&0, |_| {
            visited += 1;
            false
        });
        assert_eq!(visited, 1);

        let mut visited = Vec::new();
        rbt.descend(&0x800, |item| {
            visited.push(*item);
            false
        });
        assert_eq!(visited, [0x800]);

        let mut visited = Vec::new();
        rbt.ascend_range(&100, &200, |item| {
            visited.push(*item);
            false
        });
        assert_eq!(visited, [100]);

        let mut visited = 0;
        rbt.preorder(|_| {
            visited += 1;
            false
        });
        assert_eq!(visited, 1);

        // Stopping part way through a scan
        let mut visited = Vec::new();
        rbt.ascend(&10, |item| {
            visited.push(*item);
            visited.len() < 5
        });
        assert_eq!(visited, [10, 11, 12, 13, 14]);
    }

    #[test]
    fn test_empty_tree() {
        let rbt: Rbt<u32> = Rbt::new();
        let mut visited = 0;
        rbt.ascend(&0, |_| {
            visited += 1;
            true
        });
        rbt.descend(&0, |_| {
            visited += 1;
            true
        });
        rbt.ascend_range(&0, &10, |_| {
            visited += 1;
            true
        });
        rbt.preorder(|_| {
            visited += 1;
            true
        });
        assert_eq!(visited, 0);
        assert!(rbt.iter().next().is_none());
        assert!(rbt.iter().next_back().is_none());
    }

    #[test]
    fn test_preorder() {
        /*
                 [2B]
                /    \
             [1R]    [3R]
        */
        let rbt: Rbt<u32> = [1, 2, 3].into_iter().collect();
        let mut seen = Vec::new();
        rbt.preorder(|item| {
            seen.push(*item);
            true
        });
        assert_eq!(seen, [2, 1, 3]);
    }

    #[test]
    fn test_iter_matches_handle_walks() {
        let rbt: Rbt<&str> = WORDS.into_iter().collect();

        let mut by_handle = Vec::new();
        let mut current = rbt.first_idx();
        while let Some(idx) = current {
            by_handle.push(*rbt.get_with_idx(idx).unwrap());
            current = rbt.next_idx(idx);
        }
        let ascending: Vec<&str> = rbt.iter().copied().collect();
        assert_eq!(by_handle, ascending);
        assert_eq!(ascending, collect_ascend(&rbt, rbt.min().unwrap()));

        let mut by_handle = Vec::new();
        let mut current = rbt.last_idx();
        while let Some(idx) = current {
            by_handle.push(*rbt.get_with_idx(idx).unwrap());
            current = rbt.prev_idx(idx);
        }
        let mut descending = Vec::new();
        rbt.descend(rbt.max().unwrap(), |item| {
            descending.push(*item);
            true
        });
        assert_eq!(by_handle, descending);
        assert_eq!(rbt.iter().rev().copied().collect::<Vec<_>>(), descending);
    }

    #[test]
    fn test_iter_from_both_ends() {
        let rbt: Rbt<u32> = (1..=5).collect();
        let mut iter = rbt.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);

        let mut total = 0u32;
        for item in &rbt {
            total += *item;
        }
        assert_eq!(total, 15);
    }

    #[test]
    fn test_extend_ignores_duplicates() {
        let mut rbt: Rbt<u32> = vec![5, 1, 5].into_iter().collect();
        rbt.extend([1, 2, 3]);
        assert_eq!(rbt.len(), 4);
        assert_eq!(rbt.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 5]);
    }
}
