//! `IdentifierSpace`: maps client identities to dense handles.
//!
//! Identities of any `Hash + Eq` type are stored once in a dense slot table;
//! the hash table only stores slot indices and cached hashes, so keys are never
//! duplicated.
//!
//! # Handle policy
//! Handles are issued in increasing order and are **retired** by [`release`],
//! never reused. Interning a released identity again yields a fresh handle.
//!
//! [`release`]: IdentifierSpace::release

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use crate::error::{GraphError, GraphResult};
use crate::graph::DenseHandle;

/// State of one allocated handle.
#[derive(Debug, Clone)]
enum Slot<T> {
    /// Live handle bound to an identity.
    Bound(T),
    /// Live handle without an identity.
    Anonymous,
    /// Released handle; never handed out again.
    Retired,
}

/// Entry in the hash table.
#[derive(Clone, Copy, Debug)]
struct Entry {
    /// Cached hash of the identity to speed up probing and resizing.
    hash: u64,
    /// Index into `slots`.
    index: usize,
}

#[derive(Clone, Copy, Debug)]
enum Bucket {
    Empty,
    /// Left behind by a release so probe chains stay intact.
    Tombstone,
    Full(Entry),
}

/// A bidirectional identity ⇄ handle mapping.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `intern_for` | \(O(1)\) amortized | Linear probing, 75% load factor |
/// | `lookup` | \(O(1)\) expected | Never allocates |
/// | `identity_for` | \(O(1)\) | Direct slot index |
/// | `release` | \(O(1)\) expected | Leaves a tombstone |
#[derive(Debug, Clone)]
pub struct IdentifierSpace<T, H = usize, S = RandomState> {
    slots: Vec<Slot<T>>,
    /// Open-addressing table, size is always a power of two.
    buckets: Vec<Bucket>,
    /// Live handles (bound or anonymous).
    live: usize,
    /// Full buckets plus tombstones; drives resizing.
    occupied: usize,
    hash_builder: S,
    _handle: PhantomData<fn() -> H>,
}

impl<T, H> IdentifierSpace<T, H, RandomState> {
    /// Creates an empty identifier space.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an identifier space with room for `capacity` identities.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<T, H, S> IdentifierSpace<T, H, S> {
    /// Creates an identifier space with capacity and hasher.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let cap = (capacity * 4 / 3 + 1).next_power_of_two().max(8);
        Self {
            slots: Vec::with_capacity(capacity),
            buckets: vec![Bucket::Empty; cap],
            live: 0,
            occupied: 0,
            hash_builder,
            _handle: PhantomData,
        }
    }

    /// Number of live handles.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if no handle is live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of handles ever allocated, live or retired.
    ///
    /// Every handle index is strictly below this bound.
    #[inline]
    pub fn bound(&self) -> usize {
        self.slots.len()
    }
}

impl<T, H: DenseHandle, S> IdentifierSpace<T, H, S> {
    /// Allocates a live handle that carries no identity.
    pub fn reserve(&mut self) -> H {
        let index = self.slots.len();
        self.slots.push(Slot::Anonymous);
        self.live += 1;
        H::from_index(index)
    }

    /// Returns the identity bound to `handle`.
    ///
    /// `Ok(None)` means the handle is live but anonymous.
    ///
    /// # Errors
    /// [`GraphError::UnknownHandle`] if the handle was never allocated or has been released.
    pub fn identity_for(&self, handle: H) -> GraphResult<Option<&T>> {
        match self.slots.get(handle.index()) {
            Some(Slot::Bound(identity)) => Ok(Some(identity)),
            Some(Slot::Anonymous) => Ok(None),
            Some(Slot::Retired) | None => Err(GraphError::UnknownHandle(handle.index())),
        }
    }

    /// Returns `true` if `handle` is live.
    #[inline]
    pub fn contains(&self, handle: H) -> bool {
        matches!(
            self.slots.get(handle.index()),
            Some(Slot::Bound(_) | Slot::Anonymous)
        )
    }

    /// Iterates live, bound handles and their identities in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| match slot {
            Slot::Bound(identity) => Some((H::from_index(i), identity)),
            _ => None,
        })
    }
}

impl<T, H, S> IdentifierSpace<T, H, S>
where
    T: Hash + Eq,
    H: DenseHandle,
    S: BuildHasher,
{
    /// Returns the handle for `identity`, allocating a new one on first sight.
    pub fn intern_for(&mut self, identity: T) -> H {
        let hash = self.hash_builder.hash_one(&identity);
        if let Some(index) = self.find_slot(&identity, hash) {
            return H::from_index(index);
        }

        self.reserve_bucket();
        let index = self.slots.len();
        self.slots.push(Slot::Bound(identity));
        self.insert_entry(Entry { hash, index });
        self.live += 1;
        H::from_index(index)
    }

    /// Looks up the handle bound to `identity` without allocating.
    pub fn lookup<Q>(&self, identity: &Q) -> Option<H>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(identity);
        self.find_slot(identity, hash).map(H::from_index)
    }

    /// Permanently retires `handle` and returns its identity, if any.
    ///
    /// # Errors
    /// [`GraphError::UnknownHandle`] if the handle was never allocated or is already released.
    pub fn release(&mut self, handle: H) -> GraphResult<Option<T>> {
        let index = handle.index();
        if !self.contains(handle) {
            return Err(GraphError::UnknownHandle(index));
        }

        self.live -= 1;
        match std::mem::replace(&mut self.slots[index], Slot::Retired) {
            Slot::Bound(identity) => {
                let hash = self.hash_builder.hash_one(&identity);
                self.remove_entry(hash, index);
                Ok(Some(identity))
            }
            _ => Ok(None),
        }
    }

    /// Probes for `identity` and returns its slot index if bound.
    fn find_slot<Q>(&self, identity: &Q, hash: u64) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mask = self.buckets.len() - 1;
        #[allow(clippy::cast_possible_truncation)]
        let mut idx = (hash as usize) & mask;

        for _ in 0..self.buckets.len() {
            match self.buckets[idx] {
                Bucket::Empty => return None,
                Bucket::Tombstone => {}
                Bucket::Full(entry) => {
                    if entry.hash == hash {
                        if let Some(Slot::Bound(stored)) = self.slots.get(entry.index) {
                            if stored.borrow() == identity {
                                return Some(entry.index);
                            }
                        }
                    }
                }
            }
            idx = (idx + 1) & mask;
        }
        None
    }

    fn insert_entry(&mut self, entry: Entry) {
        let mask = self.buckets.len() - 1;
        #[allow(clippy::cast_possible_truncation)]
        let mut idx = (entry.hash as usize) & mask;
        loop {
            match self.buckets[idx] {
                Bucket::Empty => {
                    self.occupied += 1;
                    self.buckets[idx] = Bucket::Full(entry);
                    return;
                }
                Bucket::Tombstone => {
                    self.buckets[idx] = Bucket::Full(entry);
                    return;
                }
                Bucket::Full(_) => idx = (idx + 1) & mask,
            }
        }
    }

    fn remove_entry(&mut self, hash: u64, index: usize) {
        let mask = self.buckets.len() - 1;
        #[allow(clippy::cast_possible_truncation)]
        let mut idx = (hash as usize) & mask;
        for _ in 0..self.buckets.len() {
            match self.buckets[idx] {
                Bucket::Empty => return,
                Bucket::Full(entry) if entry.index == index => {
                    self.buckets[idx] = Bucket::Tombstone;
                    return;
                }
                _ => idx = (idx + 1) & mask,
            }
        }
    }

    /// Grows (or just rehashes away tombstones) before the load factor passes 75%.
    fn reserve_bucket(&mut self) {
        if (self.occupied + 1) * 4 <= self.buckets.len() * 3 {
            return;
        }
        let full = self
            .buckets
            .iter()
            .filter(|b| matches!(b, Bucket::Full(_)))
            .count();
        let new_cap = if (full + 1) * 2 > self.buckets.len() {
            self.buckets.len() * 2
        } else {
            self.buckets.len()
        };

        let old = std::mem::replace(&mut self.buckets, vec![Bucket::Empty; new_cap]);
        self.occupied = 0;
        for bucket in old {
            if let Bucket::Full(entry) = bucket {
                self.insert_entry(entry);
            }
        }
    }
}

impl<T, H, S: Default> Default for IdentifierSpace<T, H, S> {
    fn default() -> Self {
        Self::with_capacity_and_hasher(0, S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_basic() {
        let mut space: IdentifierSpace<String> = IdentifierSpace::new();

        let id1 = space.intern_for("hello".to_string());
        let id2 = space.intern_for("world".to_string());
        let id3 = space.intern_for("hello".to_string());

        assert_eq!(id1, id3);
        assert_ne!(id1, id2);
        assert_eq!((id1, id2), (0, 1));
        assert_eq!(space.len(), 2);

        assert_eq!(space.identity_for(id1), Ok(Some(&"hello".to_string())));
        assert_eq!(space.lookup("world"), Some(id2));
        assert_eq!(space.lookup("missing"), None);
    }

    #[test]
    fn test_release_retires_handle() {
        let mut space: IdentifierSpace<&str> = IdentifierSpace::new();
        let a = space.intern_for("a");
        let b = space.intern_for("b");

        assert_eq!(space.release(a), Ok(Some("a")));
        assert_eq!(space.identity_for(a), Err(GraphError::UnknownHandle(a)));
        assert_eq!(space.release(a), Err(GraphError::UnknownHandle(a)));
        assert_eq!(space.lookup("a"), None);
        assert!(!space.contains(a));

        // Re-interning issues a fresh handle.
        let a2 = space.intern_for("a");
        assert_ne!(a2, a);
        assert_eq!(a2, 2);
        assert_eq!(space.lookup("b"), Some(b));
        assert_eq!(space.len(), 2);
        assert_eq!(space.bound(), 3);
    }

    #[test]
    fn test_anonymous_handles() {
        let mut space: IdentifierSpace<u64> = IdentifierSpace::new();
        let anon = space.reserve();
        let named = space.intern_for(7);

        assert_eq!(space.identity_for(anon), Ok(None));
        assert_eq!(space.identity_for(named), Ok(Some(&7)));
        assert_eq!(space.iter().collect::<Vec<_>>(), vec![(named, &7)]);
        assert_eq!(space.release(anon), Ok(None));
        assert_eq!(space.identity_for(99), Err(GraphError::UnknownHandle(99)));
    }

    #[test]
    fn test_growth_and_churn() {
        let mut space: IdentifierSpace<u32> = IdentifierSpace::new();
        for i in 0..1000 {
            assert_eq!(space.intern_for(i), i as usize);
        }
        for i in (0..1000).step_by(2) {
            space.release(i as usize).unwrap();
        }
        for i in 0..1000u32 {
            let expected = if i % 2 == 0 { None } else { Some(i as usize) };
            assert_eq!(space.lookup(&i), expected);
        }
        // Heavy churn must not exhaust the table with tombstones.
        for i in 1000..5000u32 {
            let h = space.intern_for(i);
            space.release(h).unwrap();
        }
        assert_eq!(space.len(), 500);
        assert_eq!(space.lookup(&999), Some(999));
    }
}
