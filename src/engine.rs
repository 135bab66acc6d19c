//! The Sequitur engine: owns the symbol arena, digram index, rule table and
//! id allocator, and implements the enforcement protocol that restores
//! digram uniqueness (p1) and rule utility (p2) after every insertion.

use crate::digram::DigramIndex;
use crate::list::SymbolArena;
use crate::rule_table::RuleTable;
use crate::symbol::Symbol;
use crate::IdAllocator;
use log::{debug, trace};
use slotmap::DefaultKey;
use std::hash::Hash;

/// A single incremental grammar-inference run over a stream of `T`.
///
/// `Sequitur` is single-owner and single-threaded: no method suspends, and
/// no two calls may run concurrently against the same instance. It is
/// movable (plain Rust move semantics) but not `Clone` — deep-cloning the
/// arena graph with key remapping has no caller in this crate and would be
/// easy to get subtly wrong.
pub struct Sequitur<T> {
    pub(crate) symbols: SymbolArena<T>,
    digram_index: DigramIndex,
    rule_table: RuleTable,
    id_gen: IdAllocator,
    start_head: DefaultKey,
    start_tail: DefaultKey,
    len: usize,
}

/// Snapshot of grammar size, useful for reporting compression effectiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrammarStats {
    pub input_length: usize,
    pub grammar_symbols: usize,
    pub rule_count: usize,
}

impl GrammarStats {
    /// Terminals-per-grammar-symbol; 1.0 if the grammar has not compressed
    /// the input at all.
    pub fn compression_ratio(&self) -> f64 {
        if self.grammar_symbols == 0 {
            return 1.0;
        }
        self.input_length as f64 / self.grammar_symbols as f64
    }
}

impl<T: Hash + Eq + Clone> Sequitur<T> {
    pub fn new() -> Self {
        let mut symbols = SymbolArena::new();
        let mut id_gen = IdAllocator::new();
        let mut rule_table = RuleTable::new();

        let start_id = id_gen.acquire();
        debug_assert_eq!(start_id, 0, "the start rule must be id 0");

        let tail = symbols.insert(Symbol::Tail);
        let head = symbols.insert(Symbol::Head {
            rule_id: start_id,
            count: u32::MAX,
            tail,
        });
        // head <-> tail with nothing between yet.
        symbols.get_mut(head).next = Some(tail);
        symbols.get_mut(tail).prev = Some(head);
        rule_table.insert(start_id, head);

        Self {
            symbols,
            digram_index: DigramIndex::new(),
            rule_table,
            id_gen,
            start_head: head,
            start_tail: tail,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn rule_table(&self) -> &RuleTable {
        &self.rule_table
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rule_table
    }

    pub fn stats(&self) -> GrammarStats {
        GrammarStats {
            input_length: self.len,
            grammar_symbols: self.symbols_len(),
            rule_count: self.rule_table.len(),
        }
    }

    fn symbols_len(&self) -> usize {
        let mut count = 0;
        for (_, head) in self.rule_table.iter() {
            let mut cur = self.symbols.next(head);
            while let Some(key) = cur {
                if self.symbols.get(key).symbol.is_tail() {
                    break;
                }
                count += 1;
                cur = self.symbols.next(key);
            }
        }
        count
    }

    /// Appends one terminal to the end of the start rule, then runs the
    /// enforcement protocol until both invariants hold again.
    pub fn push(&mut self, value: T) {
        let new_node = self.symbols.insert(Symbol::Terminal(value));
        let before_tail = self
            .symbols
            .prev(self.start_tail)
            .expect("start tail always has a prev: at minimum the start head");
        self.symbols.insert_before(self.start_tail, new_node);
        self.len += 1;
        debug!(target: "sequitur_engine::push", "appended terminal #{}", self.len);

        if !self.symbols.get(before_tail).symbol.is_head() {
            self.link_made(before_tail);
        }
    }

    fn is_sequence_start(&self, key: DefaultKey) -> bool {
        self.symbols.get(key).symbol.is_head()
    }

    fn is_sequence_end(&self, key: DefaultKey) -> bool {
        self.symbols.get(key).symbol.is_tail()
    }

    /// The central enforcement routine (spec §4.6). `first` and
    /// `first.next` form a digram that was just created or re-exposed by a
    /// mutation; restore p1/p2 in its neighbourhood.
    fn link_made(&mut self, first: DefaultKey) {
        let Some(second) = self.symbols.next(first) else {
            return;
        };

        let first_symbol = self.symbols.get(first).symbol.clone_payload();
        let second_symbol = self.symbols.get(second).symbol.clone_payload();

        let Some(other_first) = self
            .digram_index
            .try_insert(first, &first_symbol, &second_symbol)
        else {
            return;
        };

        let other_second = self
            .symbols
            .next(other_first)
            .expect("indexed digram's first node must still have a next");

        // Overlap: the two occurrences share a node. Not a match.
        if other_second == first || other_first == second {
            return;
        }

        if let Some(rule_head) = self.get_complete_rule(other_first) {
            let new_ref = self.swap_for_existing_rule(first, rule_head);
            self.check_new_links(new_ref, None);
        } else {
            let (loc1, loc2) = self.swap_for_new_rule(first, other_first);
            self.check_new_links(loc1, Some(loc2));
        }
    }

    /// True iff `first`'s digram IS the entire body of some rule: `first`'s
    /// predecessor is that rule's Head and `first.next.next` is its Tail.
    fn get_complete_rule(&self, first: DefaultKey) -> Option<DefaultKey> {
        let second = self.symbols.next(first)?;
        let prev = self.symbols.prev(first)?;
        if !self.symbols.get(prev).symbol.is_head() {
            return None;
        }
        let after_second = self.symbols.next(second)?;
        if !self.symbols.get(after_second).symbol.is_tail() {
            return None;
        }
        if let Symbol::Head { tail, .. } = self.symbols.get(prev).symbol {
            if tail == after_second {
                return Some(prev);
            }
        }
        None
    }

    /// Materialises a brand-new rule whose body is a clone of the digram at
    /// `match1`, then replaces both `match1` and `match2` with references to
    /// it. Returns the two locations where the new `RuleRef`s now sit.
    fn swap_for_new_rule(&mut self, match1: DefaultKey, match2: DefaultKey) -> (DefaultKey, DefaultKey) {
        debug_assert_ne!(match1, match2);
        let match1_second = self
            .symbols
            .next(match1)
            .expect("match1 must have a next to form a digram");

        let body_first_symbol = self.symbols.get(match1).symbol.clone_payload();
        let body_second_symbol = self.symbols.get(match1_second).symbol.clone_payload();

        let rule_id = self.id_gen.acquire();
        trace!(target: "sequitur_engine::rule", "creating rule {rule_id}");

        let tail_key = self.symbols.insert(Symbol::Tail);
        let head_key = self.symbols.insert(Symbol::Head {
            rule_id,
            count: 0,
            tail: tail_key,
        });

        let body_first = self.symbols.insert(body_first_symbol);
        let body_second = self.symbols.insert(body_second_symbol);

        self.symbols.insert_after(head_key, body_first);
        self.symbols.insert_after(body_first, body_second);
        self.symbols.insert_after(body_second, tail_key);

        // The occurrence at match1/match2 is about to be replaced, so drop
        // whatever stale index entries referenced it before indexing the
        // rule's own (now canonical) copy under the same key.
        self.remove_digram_entry(match1);
        self.remove_digram_entry(match2);
        let _ = self.digram_index.try_insert(
            body_first,
            &self.symbols.get(body_first).symbol.clone_payload(),
            &self.symbols.get(body_second).symbol.clone_payload(),
        );

        self.rule_table.insert(rule_id, head_key);

        self.increment_if_rule(body_first);
        self.increment_if_rule(body_second);

        let loc1 = self.swap_for_existing_rule(match1, head_key);
        let loc2 = self.swap_for_existing_rule(match2, head_key);

        (loc1, loc2)
    }

    /// Replaces the digram at `first` with a single `RuleRef` to the rule
    /// headed by `rule_head`, then recursively repairs rule utility for any
    /// rule references that were part of the consumed digram.
    fn swap_for_existing_rule(&mut self, first: DefaultKey, rule_head: DefaultKey) -> DefaultKey {
        let second = self
            .symbols
            .next(first)
            .expect("first must have a next to form a digram");

        let before = self.symbols.prev(first);
        let after = self.symbols.next(second);

        if let Some(prev) = before {
            self.remove_digram_entry(prev);
        }
        self.remove_digram_entry(second);

        self.decrement_if_rule(first);
        self.decrement_if_rule(second);

        let rule_id = match self.symbols.get(rule_head).symbol {
            Symbol::Head { rule_id, .. } => rule_id,
            _ => unreachable!("rule_head must resolve to a Head symbol"),
        };

        self.symbols.unlink_n(first, 2);
        self.symbols.remove(first);
        self.symbols.remove(second);

        let new_ref = self.symbols.insert(Symbol::RuleRef { rule_id });
        match (before, after) {
            (Some(b), Some(a)) => {
                self.symbols.insert_after(b, new_ref);
                debug_assert_eq!(self.symbols.next(new_ref), Some(a));
            }
            (Some(b), None) => self.symbols.insert_after(b, new_ref),
            (None, Some(a)) => self.symbols.insert_before(a, new_ref),
            (None, None) => unreachable!("a digram always has at least one neighbour: its own rule's Head/Tail"),
        }

        self.increment_rule_count(rule_head);

        let rule_first = self
            .symbols
            .next(rule_head)
            .expect("rule head always has a body");
        let rule_second = self
            .symbols
            .next(rule_first)
            .expect("a two-symbol rule body always has a second node");
        self.expand_rule_if_necessary(rule_first);
        self.expand_rule_if_necessary(rule_second);

        new_ref
    }

    /// Dissolves `node`'s rule inline if its usage count has dropped to one,
    /// splicing the rule body back into the sequence at `node`'s position.
    fn expand_rule_if_necessary(&mut self, node: DefaultKey) {
        let Some(rule_id) = self.symbols.get(node).symbol.as_rule_ref() else {
            return;
        };
        let Some(rule_head) = self.rule_table_head(rule_id) else {
            return;
        };

        let count = match self.symbols.get(rule_head).symbol {
            Symbol::Head { count, .. } => count,
            _ => unreachable!(),
        };
        debug_assert!(count > 0, "a registered rule must have at least one use");
        if count != 1 {
            return;
        }

        trace!(target: "sequitur_engine::rule", "dissolving rule {rule_id}, usage dropped to 1");

        let rule_tail = match self.symbols.get(rule_head).symbol {
            Symbol::Head { tail, .. } => tail,
            _ => unreachable!(),
        };
        let body_first = self
            .symbols
            .next(rule_head)
            .expect("rule head always has a body");
        let body_last = self
            .symbols
            .prev(rule_tail)
            .expect("rule tail always has a body");

        let before = self.symbols.prev(node);
        let after = self.symbols.next(node);

        if let Some(prev) = before {
            self.remove_digram_entry(prev);
        }
        self.remove_digram_entry(node);

        self.rule_table.remove(rule_id);
        self.id_gen.release(rule_id);

        // Carve the body out of its Head/Tail sentinels. This only touches
        // the two links to the sentinels — body_first..body_last keeps
        // whatever internal chain it already had, however long it is.
        self.symbols.split_after(rule_head);
        self.symbols.split_before(rule_tail);
        self.symbols.remove(rule_head);
        self.symbols.remove(rule_tail);

        // Sever `node`'s own two links without letting a generic `unlink`
        // auto-stitch `before` and `after` together first — the body is
        // going in that gap instead, and `join` requires both seam ends
        // free.
        self.symbols.split_before(node);
        self.symbols.split_after(node);
        self.symbols.remove(node);

        // Splice the freed body in where `node` used to be. `join` only
        // ever writes the two pointers at the seam it's given, so the
        // body's own internal links survive untouched even when it's more
        // than two symbols long.
        match (before, after) {
            (Some(b), Some(a)) => {
                self.symbols.join(b, body_first);
                self.symbols.join(body_last, a);
            }
            (Some(b), None) => self.symbols.join(b, body_first),
            (None, Some(a)) => self.symbols.join(body_last, a),
            (None, None) => unreachable!("a RuleRef always sits inside some rule's body"),
        }

        if let Some(prev) = before {
            if !self.is_sequence_start(prev) {
                self.link_made(prev);
            }
        }
        if let Some(after) = after {
            if !self.is_sequence_end(after) {
                self.link_made(body_last);
            }
        }
    }

    /// Re-verifies digrams at the boundaries left by a swap. `a` is always
    /// checked; `b` is checked too when a second insertion location exists
    /// (the new-rule case creates two).
    fn check_new_links(&mut self, a: DefaultKey, b: Option<DefaultKey>) {
        self.check_one(a);
        if let Some(b) = b {
            self.check_one(b);
        }
        if let Some(b) = b {
            if let Some(prev) = self.symbols.prev(b) {
                if prev != a && !self.is_sequence_start(prev) {
                    self.link_made(prev);
                }
            }
        }
        if let Some(prev) = self.symbols.prev(a) {
            let already = b.map(|b| prev == b).unwrap_or(false);
            if !already && !self.is_sequence_start(prev) {
                self.link_made(prev);
            }
        }
    }

    fn check_one(&mut self, key: DefaultKey) {
        if !self.symbols.contains(key) {
            return;
        }
        if self.is_sequence_start(key) {
            return;
        }
        if let Some(next) = self.symbols.next(key) {
            if !self.is_sequence_end(next) {
                self.link_made(key);
            }
        }
    }

    fn rule_table_head(&self, rule_id: u32) -> Option<DefaultKey> {
        self.rule_table.get(rule_id)
    }

    fn remove_digram_entry(&mut self, first: DefaultKey) {
        if self.symbols.get(first).symbol.is_head() {
            return;
        }
        let Some(second) = self.symbols.next(first) else {
            return;
        };
        let first_symbol = self.symbols.get(first).symbol.clone_payload();
        let second_symbol = self.symbols.get(second).symbol.clone_payload();
        self.digram_index
            .remove_if_pointing(first, &first_symbol, &second_symbol);
    }

    fn increment_if_rule(&mut self, key: DefaultKey) {
        if let Some(rule_id) = self.symbols.get(key).symbol.as_rule_ref() {
            if let Some(head) = self.rule_table_head(rule_id) {
                self.increment_rule_count(head);
            }
        }
    }

    fn decrement_if_rule(&mut self, key: DefaultKey) {
        if let Some(rule_id) = self.symbols.get(key).symbol.as_rule_ref() {
            if let Some(head) = self.rule_table_head(rule_id) {
                self.decrement_rule_count(head);
            }
        }
    }

    fn increment_rule_count(&mut self, head: DefaultKey) {
        if let Symbol::Head { rule_id, count, tail } = self.symbols.get(head).symbol {
            self.symbols.get_mut(head).symbol = Symbol::Head {
                rule_id,
                count: count + 1,
                tail,
            };
        }
    }

    fn decrement_rule_count(&mut self, head: DefaultKey) {
        if let Symbol::Head { rule_id, count, tail } = self.symbols.get(head).symbol {
            assert!(count > 0, "rule {rule_id} usage count underflowed");
            self.symbols.get_mut(head).symbol = Symbol::Head {
                rule_id,
                count: count - 1,
                tail,
            };
        }
    }

    pub(crate) fn start_head(&self) -> DefaultKey {
        self.start_head
    }

    pub(crate) fn start_tail(&self) -> DefaultKey {
        self.start_tail
    }

    pub(crate) fn symbol_at(&self, key: DefaultKey) -> &Symbol<T> {
        &self.symbols.get(key).symbol
    }

    pub(crate) fn symbols_next(&self, key: DefaultKey) -> Option<DefaultKey> {
        self.symbols.next(key)
    }

    pub(crate) fn symbols_prev(&self, key: DefaultKey) -> Option<DefaultKey> {
        self.symbols.prev(key)
    }
}

impl<T: Hash + Eq + Clone> Default for Sequitur<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq + Clone> Extend<T> for Sequitur<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

