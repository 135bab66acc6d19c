//! Digram index: maps an adjacent symbol pair to the arena key of the first
//! node of its canonical occurrence.
//!
//! Overlap detection is deliberately NOT performed here — `try_insert` only
//! answers "is this digram already present, and if so where". The caller
//! (the enforcement protocol in `engine.rs`) decides whether a returned
//! occurrence overlaps the new one before acting on it, keeping this module
//! a plain associative structure.

use crate::symbol::{Symbol, SymbolKey};
use ahash::AHashMap;
use slotmap::DefaultKey;
use std::collections::hash_map::Entry;
use std::hash::Hash;

type DigramKey = (SymbolKey, SymbolKey);

#[derive(Default)]
pub(crate) struct DigramIndex {
    entries: AHashMap<DigramKey, DefaultKey>,
}

impl DigramIndex {
    pub(crate) fn new() -> Self {
        Self {
            entries: AHashMap::new(),
        }
    }

    fn key_for<T: Hash>(first: &Symbol<T>, second: &Symbol<T>) -> Option<DigramKey> {
        if first.is_head() || second.is_tail() {
            return None;
        }
        Some((SymbolKey::of(first), SymbolKey::of(second)))
    }

    /// Finds-or-inserts the digram `(first, first.next)`. Returns the
    /// existing occurrence's first node if one was already indexed;
    /// otherwise inserts `first` as the canonical occurrence and returns
    /// `None`. A digram touching a Head/Tail sentinel is never indexed and
    /// always returns `None`.
    pub(crate) fn try_insert<T: Hash>(
        &mut self,
        first: DefaultKey,
        first_symbol: &Symbol<T>,
        second_symbol: &Symbol<T>,
    ) -> Option<DefaultKey> {
        let Some(key) = Self::key_for(first_symbol, second_symbol) else {
            return None;
        };
        match self.entries.entry(key) {
            Entry::Vacant(e) => {
                e.insert(first);
                None
            }
            Entry::Occupied(e) => Some(*e.get()),
        }
    }

    /// Removes the index entry for the digram starting at `first`, but only
    /// if it still points at `first` — a different occurrence may have
    /// since become canonical for that key.
    pub(crate) fn remove_if_pointing<T: Hash>(
        &mut self,
        first: DefaultKey,
        first_symbol: &Symbol<T>,
        second_symbol: &Symbol<T>,
    ) {
        let Some(key) = Self::key_for(first_symbol, second_symbol) else {
            return;
        };
        if let Entry::Occupied(e) = self.entries.entry(key) {
            if *e.get() == first {
                e.remove();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;
    use slotmap::SlotMap;

    #[test]
    fn first_insert_returns_none() {
        let mut index = DigramIndex::new();
        let mut arena: SlotMap<DefaultKey, ()> = SlotMap::new();
        let first = arena.insert(());
        let a = Symbol::Terminal('a');
        let b = Symbol::Terminal('b');
        assert_eq!(index.try_insert(first, &a, &b), None);
    }

    #[test]
    fn second_insert_returns_first_occurrence() {
        let mut index = DigramIndex::new();
        let mut arena: SlotMap<DefaultKey, ()> = SlotMap::new();
        let first = arena.insert(());
        let second = arena.insert(());
        let a = Symbol::Terminal('a');
        let b = Symbol::Terminal('b');
        assert_eq!(index.try_insert(first, &a, &b), None);
        assert_eq!(index.try_insert(second, &a, &b), Some(first));
    }

    #[test]
    fn sentinel_touching_digrams_are_never_indexed() {
        let mut index = DigramIndex::new();
        let mut arena: SlotMap<DefaultKey, ()> = SlotMap::new();
        let first = arena.insert(());
        let head = Symbol::<char>::Head {
            rule_id: 0,
            count: 0,
            tail: arena.insert(()),
        };
        let tail = Symbol::<char>::Tail;
        let a = Symbol::Terminal('a');
        assert_eq!(index.try_insert(first, &head, &a), None);
        assert_eq!(index.try_insert(first, &a, &tail), None);
        // Neither call should have inserted anything to collide against.
        assert_eq!(index.try_insert(first, &a, &a), None);
    }

    #[test]
    fn remove_only_if_still_pointing() {
        let mut index = DigramIndex::new();
        let mut arena: SlotMap<DefaultKey, ()> = SlotMap::new();
        let first = arena.insert(());
        let second = arena.insert(());
        let a = Symbol::Terminal('a');
        let b = Symbol::Terminal('b');
        index.try_insert(first, &a, &b);
        // Removing from a different (stale) location is a no-op.
        index.remove_if_pointing(second, &a, &b);
        assert_eq!(index.try_insert(second, &a, &b), Some(first));
    }
}
