//! A `no_std` red-black tree over items ordered by a caller supplied "less-than" capability.
//!
//! The tree stores its nodes in a growable arena and addresses them by index. Index `0` is a
//! shared, always black sentinel that stands in for every missing child and for the parent of
//! the root, so the rotation and fixup code never has to special case an absent link.
//!
//! Items are ordered solely through the [Item] trait. Two items where neither is
//! [less](Item::less) than the other are treated as the same item: the tree never holds both.
//! A blanket implementation is provided for all types that implement [Ord], however the user can
//! implement the trait for their own types to order them by something other than the whole
//! value, e.g. a record ordered by its id only.
//!
//! ## Duplicate policies
//!
//! - [insert](Rbt::insert) ignores an item equal to one already stored.
//! - [insert_or_get](Rbt::insert_or_get) returns the stored equal item untouched.
//! - [replace](Rbt::replace) overwrites the stored equal item and hands back the old one.
//! - [add](Rbt::add) rejects the item with [AlreadyExists](Error::AlreadyExists).
//!
//! ## Concurrency
//!
//! The tree is a plain single-threaded structure. Every mutation takes `&mut self`, so sharing a
//! tree between threads requires wrapping it in a lock held for the whole call (a `RwLock` works
//! well for read heavy workloads). Traversals borrow the tree and cannot overlap a mutation.
//!
//! ## Benchmarks
//!
//! There are benchmarks available in the `benches` directory comparing the tree against
//! `BTreeSet` with 4096 entries of 32bit, 128bit, and 384bit keys. The tests are as follows:
//!
//! - Insertion: Time to completely fill the data structure with random numbers.
//! - Search: Time it takes to search for every element in the data structure once.
//! - Delete: Time it takes to delete every element in the data structure.
//!
//! ## Examples
//!
//! ```rust
//! use ordered_rbtree::Rbt;
//!
//! let mut rbt: Rbt<&str> = Rbt::new();
//! for word in ["a", "b", "c", "aa", "ab", "ac", "abc", "acb", "bac"] {
//!     rbt.insert(word);
//! }
//!
//! let mut seen = Vec::new();
//! rbt.ascend_range(&"ab", &"b", |item| {
//!     seen.push(*item);
//!     true
//! });
//! assert_eq!(seen, ["ab", "abc", "ac", "acb"]);
//! ```
//!
//! ## License
//!
//! Copyright (C) Microsoft Corporation. All rights reserved.
//!
//! SPDX-License-Identifier: BSD-2-Clause-Patent
//!
#![no_std]
extern crate alloc;

mod node;
mod rbt;
mod traverse;
mod verify;

pub use rbt::Rbt;
pub use traverse::Iter;

/// Public result type for the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Public error types for the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The node was not found in the tree.
    NotFound,
    /// An equal item already exists in the tree.
    AlreadyExists,
    /// The root of a non-empty tree is red.
    RedRoot,
    /// A red node has a red child.
    RedViolation,
    /// Two paths from the same node pass through a different number of black nodes.
    BlackHeightMismatch,
    /// The in-order sequence of items is not strictly increasing.
    OrderViolation,
    /// A parent and child disagree about their relationship, or the sentinel was modified.
    BrokenLink,
    /// The tracked length does not match the number of reachable nodes.
    LengthMismatch,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Error::NotFound => "node not found",
            Error::AlreadyExists => "an equal item already exists",
            Error::RedRoot => "root node is red",
            Error::RedViolation => "red node has a red child",
            Error::BlackHeightMismatch => "black height differs between paths",
            Error::OrderViolation => "items are out of order",
            Error::BrokenLink => "parent and child links disagree",
            Error::LengthMismatch => "length does not match reachable nodes",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for Error {}

/// The ordering capability required of everything stored in an [Rbt].
///
/// The order must be a strict weak order that stays consistent for as long as the item is in
/// the tree. The tree does not detect an inconsistent order; the result of using one is an
/// unspecified (but memory safe) arrangement of items.
pub trait Item {
    /// Returns `true` if `self` is ordered strictly before `than`.
    fn less(&self, than: &Self) -> bool;
}

impl<T> Item for T
where
    T: Ord,
{
    fn less(&self, than: &Self) -> bool {
        self < than
    }
}
