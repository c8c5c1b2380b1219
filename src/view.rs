//! Read-only views over collections owned by parameter objects.
//!
//! A view only ever holds a shared borrow, so the owner's storage cannot be
//! structurally changed through it and the owner cannot change it while the
//! view is alive.

use std::collections::BTreeMap;
use std::ops::Deref;

/// Read-only view of an owned sequence.
#[derive(Debug, PartialEq, Eq)]
pub struct FrozenList<'a, T> {
    items: &'a [T],
}

impl<'a, T> FrozenList<'a, T> {
    pub(crate) fn new(items: &'a [T]) -> Self {
        Self { items }
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.items
    }

    /// Iterates for as long as the owner is borrowed, not just the view.
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.items.iter()
    }
}

impl<T> Clone for FrozenList<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FrozenList<'_, T> {}

impl<T> Deref for FrozenList<'_, T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.items
    }
}

impl<'a, T> IntoIterator for FrozenList<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Read-only view of an owned ordered map.
#[derive(Debug, PartialEq, Eq)]
pub struct FrozenMap<'a, K, V> {
    entries: &'a BTreeMap<K, V>,
}

impl<'a, K, V> FrozenMap<'a, K, V> {
    pub(crate) fn new(entries: &'a BTreeMap<K, V>) -> Self {
        Self { entries }
    }

    pub fn as_map(&self) -> &'a BTreeMap<K, V> {
        self.entries
    }

    pub fn iter(&self) -> std::collections::btree_map::Iter<'a, K, V> {
        self.entries.iter()
    }
}

impl<K, V> Clone for FrozenMap<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for FrozenMap<'_, K, V> {}

impl<K, V> Deref for FrozenMap<'_, K, V> {
    type Target = BTreeMap<K, V>;

    fn deref(&self) -> &Self::Target {
        self.entries
    }
}

impl<'a, K, V> IntoIterator for FrozenMap<'a, K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = std::collections::btree_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
