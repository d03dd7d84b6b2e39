//! Open-addressing intern table with user-supplied `Hash + Eq` and
//! pointer-stable handles, ported from `earley_hash_set.hpp`'s `HashSet<T>`.
//!
//! Every interned value is boxed once and never moved again; only the
//! table of pointers to those boxes is reallocated on growth, so a
//! [`Handle<T>`] handed out by [`HashSet::insert`] stays valid for as long
//! as the table itself lives.

use std::borrow::Borrow;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::Deref;
use std::ptr::NonNull;

/// A stable reference to a value owned by a [`HashSet`]. Cheap to copy,
/// compares by identity (the two handles are equal iff they were produced
/// by interning the same logical slot), not by value.
pub struct Handle<T> {
    ptr: NonNull<T>,
    _marker: PhantomData<T>,
}

impl<T> Handle<T> {
    pub fn get(&self) -> &T {
        // SAFETY: `HashSet` never drops or moves a value once boxed; the
        // handle cannot outlive the table that produced it in practice
        // since this crate never exposes a way to hand one out separately.
        unsafe { self.ptr.as_ref() }
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ptr.hash(state);
    }
}

impl<T> Deref for Handle<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

/// Open-addressing set: insert-or-find, never removes. Used to intern
/// item set cores, item sets and distance vectors (spec §4.3), and to
/// index `(core, token)` / `(core, nonterminal)` transitions.
pub struct HashSet<T> {
    slots: Vec<Option<Box<T>>>,
    len: usize,
}

const INITIAL_CAPACITY: usize = 11;

impl<T> Default for HashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HashSet<T> {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let cap = next_prime(capacity.max(3));
        HashSet {
            slots: (0..cap).map(|_| None).collect(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: Hash + Eq> HashSet<T> {
    /// Interns `value`, returning its handle and whether it was newly
    /// inserted (`false` means an equal value was already present).
    pub fn insert(&mut self, value: T) -> (Handle<T>, bool) {
        if (self.len + 1) * 4 > self.slots.len() * 3 {
            self.grow();
        }
        let hash = hash_of(&value);
        let cap = self.slots.len();
        let step = secondary_step(hash, cap);
        let mut index = (hash % cap as u64) as usize;
        loop {
            match &self.slots[index] {
                Some(existing) if existing.as_ref() == &value => {
                    let ptr = NonNull::from(existing.as_ref());
                    return (
                        Handle {
                            ptr,
                            _marker: PhantomData,
                        },
                        false,
                    );
                }
                Some(_) => index = (index + step) % cap,
                None => {
                    let boxed = Box::new(value);
                    let ptr = NonNull::from(boxed.as_ref());
                    self.slots[index] = Some(boxed);
                    self.len += 1;
                    return (
                        Handle {
                            ptr,
                            _marker: PhantomData,
                        },
                        true,
                    );
                }
            }
        }
    }

    /// Looks up an equal value without inserting.
    pub fn find(&self, value: &T) -> Option<Handle<T>> {
        self.find_by(value)
    }

    /// Looks up a value by anything it borrows as, e.g. probing a
    /// `HashSet<ItemSetCore>` with a bare `&[CoreEntry]` of start items
    /// before a full `ItemSetCore` has even been built.
    pub fn find_by<Q>(&self, probe: &Q) -> Option<Handle<T>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let cap = self.slots.len();
        let hash = hash_of(probe);
        let step = secondary_step(hash, cap);
        let mut index = (hash % cap as u64) as usize;
        for _ in 0..cap {
            match &self.slots[index] {
                Some(existing) if existing.as_ref().borrow() == probe => {
                    return Some(Handle {
                        ptr: NonNull::from(existing.as_ref()),
                        _marker: PhantomData,
                    });
                }
                Some(_) => index = (index + step) % cap,
                None => return None,
            }
        }
        None
    }

    fn grow(&mut self) {
        let new_cap = next_prime(self.slots.len() * 2);
        let mut new_slots: Vec<Option<Box<T>>> = (0..new_cap).map(|_| None).collect();
        for slot in self.slots.drain(..) {
            let Some(boxed) = slot else { continue };
            let hash = hash_of(boxed.as_ref());
            let step = secondary_step(hash, new_cap);
            let mut index = (hash % new_cap as u64) as usize;
            while new_slots[index].is_some() {
                index = (index + step) % new_cap;
            }
            new_slots[index] = Some(boxed);
        }
        self.slots = new_slots;
    }
}

fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn secondary_step(hash: u64, cap: usize) -> usize {
    1 + (hash % (cap as u64 - 2)) as usize
}

fn next_prime(mut n: usize) -> usize {
    if n <= 2 {
        return 2;
    }
    if n % 2 == 0 {
        n += 1;
    }
    while !is_prime(n) {
        n += 2;
    }
    n
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 3;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    n % 2 != 0 || n == 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserting_equal_values_returns_same_handle() {
        let mut set: HashSet<Vec<u32>> = HashSet::new();
        let (h1, fresh1) = set.insert(vec![1, 2, 3]);
        let (h2, fresh2) = set.insert(vec![1, 2, 3]);
        assert!(fresh1);
        assert!(!fresh2);
        assert_eq!(h1, h2);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn distinct_values_get_distinct_handles() {
        let mut set: HashSet<u32> = HashSet::new();
        let (h1, _) = set.insert(1);
        let (h2, _) = set.insert(2);
        assert_ne!(h1, h2);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn handles_survive_growth() {
        let mut set: HashSet<u32> = HashSet::new();
        let mut handles = Vec::new();
        for i in 0..500u32 {
            let (h, fresh) = set.insert(i);
            assert!(fresh);
            handles.push((i, h));
        }
        for (i, h) in &handles {
            assert_eq!(*h.get(), *i);
            assert_eq!(set.find(i), Some(*h));
        }
    }

    #[test]
    fn find_on_absent_value_is_none() {
        let mut set: HashSet<u32> = HashSet::new();
        set.insert(1);
        assert_eq!(set.find(&42), None);
    }
}
