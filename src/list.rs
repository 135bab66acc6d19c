//! Intrusive doubly-linked list operations over the symbol arena.
//!
//! Unlike a classic intrusive list (links embedded in a struct reached by
//! pointer), the links here are fields on arena-owned nodes reached by a
//! generational `DefaultKey`. `SymbolArena` is the only thing that
//! understands node adjacency; digram/rule/engine code never pokes
//! `prev`/`next` directly.

use crate::symbol::{Symbol, SymbolNode};
use slotmap::{DefaultKey, SlotMap};

pub(crate) struct SymbolArena<T> {
    nodes: SlotMap<DefaultKey, SymbolNode<T>>,
}

impl<T> SymbolArena<T> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: SlotMap::new(),
        }
    }

    pub(crate) fn get(&self, key: DefaultKey) -> &SymbolNode<T> {
        &self.nodes[key]
    }

    pub(crate) fn get_mut(&mut self, key: DefaultKey) -> &mut SymbolNode<T> {
        &mut self.nodes[key]
    }

    pub(crate) fn insert(&mut self, symbol: Symbol<T>) -> DefaultKey {
        self.nodes.insert(SymbolNode::new(symbol))
    }

    pub(crate) fn remove(&mut self, key: DefaultKey) -> SymbolNode<T> {
        self.nodes.remove(key).expect("removing a live node")
    }

    pub(crate) fn contains(&self, key: DefaultKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub(crate) fn next(&self, key: DefaultKey) -> Option<DefaultKey> {
        self.nodes[key].next
    }

    pub(crate) fn prev(&self, key: DefaultKey) -> Option<DefaultKey> {
        self.nodes[key].prev
    }

    /// `next` advanced `count` times. `count == 0` returns `key` itself.
    pub(crate) fn next_n(&self, mut key: DefaultKey, count: usize) -> Option<DefaultKey> {
        for _ in 0..count {
            key = self.next(key)?;
        }
        Some(key)
    }

    pub(crate) fn prev_n(&self, mut key: DefaultKey, count: usize) -> Option<DefaultKey> {
        for _ in 0..count {
            key = self.prev(key)?;
        }
        Some(key)
    }

    /// Inserts `new_node` immediately after `anchor`, relinking neighbours.
    pub(crate) fn insert_after(&mut self, anchor: DefaultKey, new_node: DefaultKey) {
        let old_next = self.nodes[anchor].next;
        self.nodes[anchor].next = Some(new_node);
        self.nodes[new_node].prev = Some(anchor);
        self.nodes[new_node].next = old_next;
        if let Some(old_next) = old_next {
            self.nodes[old_next].prev = Some(new_node);
        }
    }

    pub(crate) fn insert_before(&mut self, anchor: DefaultKey, new_node: DefaultKey) {
        let old_prev = self.nodes[anchor].prev;
        self.nodes[anchor].prev = Some(new_node);
        self.nodes[new_node].next = Some(anchor);
        self.nodes[new_node].prev = old_prev;
        if let Some(old_prev) = old_prev {
            self.nodes[old_prev].next = Some(new_node);
        }
    }

    /// Severs the link between `key` and `key.next`, leaving both ends
    /// otherwise intact. Used to carve a sub-sequence out of its list.
    pub(crate) fn split_after(&mut self, key: DefaultKey) -> Option<DefaultKey> {
        let next = self.nodes[key].next.take()?;
        self.nodes[next].prev = None;
        Some(next)
    }

    pub(crate) fn split_before(&mut self, key: DefaultKey) -> Option<DefaultKey> {
        let prev = self.nodes[key].prev.take()?;
        self.nodes[prev].next = None;
        Some(prev)
    }

    /// Joins `left`'s tail end to `right`'s head end. Both ends must
    /// currently be free (`left.next == None`, `right.prev == None`).
    pub(crate) fn join(&mut self, left: DefaultKey, right: DefaultKey) {
        debug_assert!(self.nodes[left].next.is_none(), "left end is not free");
        debug_assert!(self.nodes[right].prev.is_none(), "right end is not free");
        self.nodes[left].next = Some(right);
        self.nodes[right].prev = Some(left);
    }

    /// Removes `key` from its list, stitching its former neighbours
    /// together, and returns the removed node's own prev/next (now cleared
    /// on the node itself, but returned so the caller can repair digrams at
    /// the splice point).
    pub(crate) fn unlink(&mut self, key: DefaultKey) -> (Option<DefaultKey>, Option<DefaultKey>) {
        let prev = self.nodes[key].prev.take();
        let next = self.nodes[key].next.take();
        if let Some(prev) = prev {
            self.nodes[prev].next = next;
        }
        if let Some(next) = next {
            self.nodes[next].prev = prev;
        }
        (prev, next)
    }

    /// Unlinks `count` consecutive nodes starting at `first` as a single
    /// range, stitching the sequence back together around them. The
    /// internal links within the removed range are left untouched — only
    /// the two boundary links to the rest of the list are severed — so the
    /// range itself is still a valid, traversable chain from `first` to the
    /// returned last node. Returns `(before, last, after)`.
    pub(crate) fn unlink_n(
        &mut self,
        first: DefaultKey,
        count: usize,
    ) -> (Option<DefaultKey>, DefaultKey, Option<DefaultKey>) {
        debug_assert!(count >= 1, "unlinking a range requires at least one node");
        let last = self
            .next_n(first, count - 1)
            .expect("count consecutive nodes must exist");
        let before = self.nodes[first].prev.take();
        let after = self.nodes[last].next.take();
        if let Some(before) = before {
            self.nodes[before].next = after;
        }
        if let Some(after) = after {
            self.nodes[after].prev = before;
        }
        (before, last, after)
    }
}
