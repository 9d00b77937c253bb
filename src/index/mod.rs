//! # Index Module — *Bidirectional Keyed Index*
//!
//! [`KeyIndex<K>`] is the structure behind each axis (row or column) of a
//! [`crate::frame::Frame`]: an insertion-ordered key sequence plus a
//! `key -> coordinate` map, so lookups run both directions in O(1)/O(log n).
//! A *filter view* is a non-owning ordinal-to-coordinate permutation over a
//! shared root — it can be read and re-filtered freely, but any structural
//! mutation (`add`, `add_all`, `replace`) on a view fails with
//! [`IndexError::ViewMutation`]; only the root index may grow.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::aliases::{Coordinate, Key, Ordinal};
use crate::error::IndexError;

#[cfg(feature = "fast_hash")]
type MapImpl<K, V> = HashMap<K, V, ahash::RandomState>;
#[cfg(not(feature = "fast_hash"))]
type MapImpl<K, V> = HashMap<K, V>;

struct RootData<K: Key> {
    keys: Vec<K>,
    coords: MapImpl<K, Coordinate>,
}

impl<K: Key> RootData<K> {
    fn new() -> Self {
        RootData { keys: Vec::new(), coords: MapImpl::default() }
    }
}

/// A keyed axis index: either a root (owns its keys, can grow) or a filter
/// view (an ordinal-to-coordinate permutation over a shared root).
pub struct KeyIndex<K: Key> {
    root: Arc<RwLock<RootData<K>>>,
    /// `None` on a root index (identity over `root.keys`); `Some(perm)` on a
    /// filter view, where `perm[ordinal]` is the coordinate in `root.keys`.
    view: Option<Vec<Coordinate>>,
}

impl<K: Key> KeyIndex<K> {
    pub fn empty() -> Self {
        KeyIndex { root: Arc::new(RwLock::new(RootData::new())), view: None }
    }

    pub fn of(keys: Vec<K>) -> Result<Self, IndexError> {
        let index = KeyIndex::empty();
        index.add_all(keys, false)?;
        Ok(index)
    }

    pub fn is_view(&self) -> bool {
        self.view.is_some()
    }

    pub fn size(&self) -> usize {
        match &self.view {
            Some(v) => v.len(),
            None => self.root.read().unwrap().keys.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn add(&self, key: K) -> Result<Coordinate, IndexError> {
        if self.view.is_some() {
            return Err(IndexError::ViewMutation("add"));
        }
        let mut root = self.root.write().unwrap();
        if root.coords.contains_key(&key) {
            return Err(IndexError::DuplicateKey(format!("{key:?}")));
        }
        let coord = root.keys.len();
        root.keys.push(key.clone());
        root.coords.insert(key, coord);
        Ok(coord)
    }

    /// Adds every key in `keys`, in order. When `ignore_duplicates` is
    /// `false`, a key already present is a hard error and no further keys
    /// are added. When `true`, a key already present is silently skipped
    /// rather than added again. Returns the count of keys actually added.
    pub fn add_all(&self, keys: Vec<K>, ignore_duplicates: bool) -> Result<usize, IndexError> {
        let mut added = 0;
        for key in keys {
            match self.add(key) {
                Ok(_) => added += 1,
                Err(IndexError::DuplicateKey(_)) if ignore_duplicates => {}
                Err(e) => return Err(e),
            }
        }
        Ok(added)
    }

    /// Replaces `existing` with `new` in place, preserving its coordinate.
    pub fn replace(&self, existing: &K, new: K) -> Result<(), IndexError> {
        if self.view.is_some() {
            return Err(IndexError::ViewMutation("replace"));
        }
        let mut root = self.root.write().unwrap();
        let coord = *root
            .coords
            .get(existing)
            .ok_or_else(|| IndexError::ReplaceUnknown(format!("{existing:?}")))?;
        if &new != existing && root.coords.contains_key(&new) {
            return Err(IndexError::ReplaceConflict(format!("{new:?}")));
        }
        root.coords.remove(existing);
        root.keys[coord] = new.clone();
        root.coords.insert(new, coord);
        Ok(())
    }

    fn root_coordinate(&self, key: &K) -> Option<Coordinate> {
        self.root.read().unwrap().coords.get(key).copied()
    }

    /// `true` if `key` is visible through this index (view-scoped).
    pub fn contains(&self, key: &K) -> bool {
        match self.root_coordinate(key) {
            Some(coord) => match &self.view {
                Some(v) => v.contains(&coord),
                None => true,
            },
            None => false,
        }
    }

    pub fn contains_all(&self, keys: &[K]) -> bool {
        keys.iter().all(|k| self.contains(k))
    }

    /// The stable physical coordinate for `key`, if visible through this index.
    pub fn coordinate(&self, key: &K) -> Option<Coordinate> {
        let coord = self.root_coordinate(key)?;
        match &self.view {
            Some(v) if !v.contains(&coord) => None,
            _ => Some(coord),
        }
    }

    /// The visible position of `coordinate` in this index's ordinal order.
    pub fn ordinal_of(&self, coordinate: Coordinate) -> Option<Ordinal> {
        match &self.view {
            Some(v) => v.iter().position(|&c| c == coordinate),
            None => {
                if coordinate < self.root.read().unwrap().keys.len() {
                    Some(coordinate)
                } else {
                    None
                }
            }
        }
    }

    /// The stable coordinate visible at `ordinal` in this index's order.
    pub fn coordinate_at(&self, ordinal: Ordinal) -> Option<Coordinate> {
        match &self.view {
            Some(v) => v.get(ordinal).copied(),
            None => {
                if ordinal < self.root.read().unwrap().keys.len() {
                    Some(ordinal)
                } else {
                    None
                }
            }
        }
    }

    pub fn key_at(&self, ordinal: Ordinal) -> Option<K> {
        let root = self.root.read().unwrap();
        let coord = match &self.view {
            Some(v) => *v.get(ordinal)?,
            None => ordinal,
        };
        root.keys.get(coord).cloned()
    }

    pub fn ordinal_of_key(&self, key: &K) -> Option<Ordinal> {
        self.ordinal_of(self.coordinate(key)?)
    }

    pub fn previous_key(&self, key: &K) -> Option<K> {
        let ordinal = self.ordinal_of_key(key)?;
        if ordinal == 0 {
            None
        } else {
            self.key_at(ordinal - 1)
        }
    }

    pub fn next_key(&self, key: &K) -> Option<K> {
        let ordinal = self.ordinal_of_key(key)?;
        self.key_at(ordinal + 1)
    }

    pub fn first(&self) -> Option<K> {
        self.key_at(0)
    }

    pub fn last(&self) -> Option<K> {
        self.size().checked_sub(1).and_then(|o| self.key_at(o))
    }

    /// The coordinate permutation this index currently exposes, in ordinal order.
    pub(crate) fn coordinates(&self) -> Vec<Coordinate> {
        match &self.view {
            Some(v) => v.clone(),
            None => (0..self.root.read().unwrap().keys.len()).collect(),
        }
    }

    /// Builds a view holding exactly `coordinates`, in that order, trusting
    /// the caller that every coordinate is valid. Used by the frame sort
    /// machinery, which computes permutations directly over coordinates.
    pub(crate) fn from_coordinates(&self, coordinates: Vec<Coordinate>) -> KeyIndex<K> {
        KeyIndex { root: Arc::clone(&self.root), view: Some(coordinates) }
    }

    /// Reorders this index's visible keys by `cmp`, stably.
    pub fn sorted_by<F: Fn(&K, &K) -> std::cmp::Ordering>(&self, cmp: F) -> KeyIndex<K> {
        let root = self.root.read().unwrap();
        let mut coords = self.coordinates();
        coords.sort_by(|&a, &b| cmp(&root.keys[a], &root.keys[b]));
        drop(root);
        self.from_coordinates(coords)
    }

    /// Restores this index's visible keys to root insertion order — the
    /// `Direction::Restore` identity permutation.
    pub fn restored(&self) -> KeyIndex<K> {
        let mut coords = self.coordinates();
        coords.sort_unstable();
        self.from_coordinates(coords)
    }

    /// A filter view over exactly the keys in `keys`, in the order given.
    /// Errors if any key is not visible through `self`.
    pub fn filter_keys(&self, keys: &[K]) -> Result<KeyIndex<K>, IndexError> {
        let mut perm = Vec::with_capacity(keys.len());
        for key in keys {
            let coord = self
                .coordinate(key)
                .ok_or_else(|| IndexError::UnknownKey(format!("{key:?}")))?;
            perm.push(coord);
        }
        Ok(KeyIndex { root: Arc::clone(&self.root), view: Some(perm) })
    }

    /// A filter view over the subset of `self`'s visible keys matching `predicate`.
    pub fn filter_predicate<F: Fn(&K) -> bool>(&self, predicate: F) -> KeyIndex<K> {
        let root = self.root.read().unwrap();
        let perm: Vec<Coordinate> = self
            .coordinates()
            .into_iter()
            .filter(|&c| predicate(&root.keys[c]))
            .collect();
        drop(root);
        KeyIndex { root: Arc::clone(&self.root), view: Some(perm) }
    }

    /// A filter view over keys visible through both `self` and `other`,
    /// preserving `self`'s ordinal order.
    pub fn intersect(&self, other: &KeyIndex<K>) -> KeyIndex<K> {
        let root = self.root.read().unwrap();
        let perm: Vec<Coordinate> = self
            .coordinates()
            .into_iter()
            .filter(|&c| other.contains(&root.keys[c]))
            .collect();
        drop(root);
        KeyIndex { root: Arc::clone(&self.root), view: Some(perm) }
    }

    /// `deep = true` flattens this view into a brand-new, independently
    /// growable root (a fresh coordinate space). `deep = false` returns a
    /// cheap handle sharing the same root and view.
    pub fn copy(&self, deep: bool) -> KeyIndex<K> {
        if !deep {
            return KeyIndex { root: Arc::clone(&self.root), view: self.view.clone() };
        }
        let root = self.root.read().unwrap();
        let keys: Vec<K> = self.coordinates().into_iter().map(|c| root.keys[c].clone()).collect();
        drop(root);
        let fresh = KeyIndex::empty();
        fresh.add_all(keys, false).expect("flattened keys cannot contain duplicates");
        fresh
    }

    pub fn for_each_entry<F: FnMut(Ordinal, &K)>(&self, mut f: F) {
        let root = self.root.read().unwrap();
        for (ordinal, coord) in self.coordinates().into_iter().enumerate() {
            f(ordinal, &root.keys[coord]);
        }
    }

    pub fn keys_in_order(&self) -> Vec<K> {
        let root = self.root.read().unwrap();
        self.coordinates().into_iter().map(|c| root.keys[c].clone()).collect()
    }
}

impl<K: Key> Clone for KeyIndex<K> {
    fn clone(&self) -> Self {
        self.copy(false)
    }
}
