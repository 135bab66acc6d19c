//! Bidirectional flattening iterators over the reconstructed terminal
//! sequence: descend into `RuleRef`s via a position stack and yield
//! terminals in (or reverse of) insertion order.

use crate::engine::Sequitur;
use crate::symbol::Symbol;
use slotmap::DefaultKey;
use std::hash::Hash;

/// Forward flattening iterator, yielding terminals left to right.
pub struct Iter<'a, T> {
    engine: &'a Sequitur<T>,
    current: Option<DefaultKey>,
    stack: Vec<DefaultKey>,
}

/// Reverse flattening iterator, yielding terminals right to left.
pub struct RevIter<'a, T> {
    engine: &'a Sequitur<T>,
    current: Option<DefaultKey>,
    stack: Vec<DefaultKey>,
}

impl<'a, T: Hash + Eq + Clone> Iter<'a, T> {
    pub(crate) fn new(engine: &'a Sequitur<T>) -> Self {
        let mut stack = Vec::new();
        let start = engine.symbols_next(engine.start_head());
        let current = start.and_then(|key| Self::resolve_forward(engine, key, &mut stack));
        Self {
            engine,
            current,
            stack,
        }
    }

    fn resolve_forward(
        engine: &Sequitur<T>,
        key: DefaultKey,
        stack: &mut Vec<DefaultKey>,
    ) -> Option<DefaultKey> {
        match engine.symbol_at(key) {
            Symbol::Terminal(_) => Some(key),
            Symbol::RuleRef { rule_id } => {
                stack.push(key);
                let rule_head = engine.rules().get(*rule_id)?;
                let rule_first = engine.symbols_next(rule_head)?;
                Self::resolve_forward(engine, rule_first, stack)
            }
            Symbol::Head { .. } => {
                let next = engine.symbols_next(key)?;
                Self::resolve_forward(engine, next, stack)
            }
            Symbol::Tail => {
                let parent = stack.pop()?;
                let next = engine.symbols_next(parent)?;
                Self::resolve_forward(engine, next, stack)
            }
        }
    }
}

impl<'a, T: Hash + Eq + Clone> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current_key = self.current?;
        let value = match self.engine.symbol_at(current_key) {
            Symbol::Terminal(v) => v,
            _ => unreachable!("resolve_forward only stops on terminals"),
        };
        let next_key = self.engine.symbols_next(current_key);
        self.current = next_key.and_then(|k| Self::resolve_forward(self.engine, k, &mut self.stack));
        Some(value)
    }
}

impl<'a, T: Hash + Eq + Clone> PartialEq for Iter<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current && self.stack == other.stack
    }
}

impl<'a, T: Hash + Eq + Clone> RevIter<'a, T> {
    pub(crate) fn new(engine: &'a Sequitur<T>) -> Self {
        let mut stack = Vec::new();
        let start = engine.symbols_prev(engine.start_tail());
        let current = start.and_then(|key| Self::resolve_backward(engine, key, &mut stack));
        Self {
            engine,
            current,
            stack,
        }
    }

    fn resolve_backward(
        engine: &Sequitur<T>,
        key: DefaultKey,
        stack: &mut Vec<DefaultKey>,
    ) -> Option<DefaultKey> {
        match engine.symbol_at(key) {
            Symbol::Terminal(_) => Some(key),
            Symbol::RuleRef { rule_id } => {
                stack.push(key);
                let rule_head = engine.rules().get(*rule_id)?;
                let tail = match engine.symbol_at(rule_head) {
                    Symbol::Head { tail, .. } => *tail,
                    _ => unreachable!("rule table entries always point at a Head"),
                };
                let rule_last = engine.symbols_prev(tail)?;
                Self::resolve_backward(engine, rule_last, stack)
            }
            Symbol::Tail => {
                let prev = engine.symbols_prev(key)?;
                Self::resolve_backward(engine, prev, stack)
            }
            Symbol::Head { .. } => {
                let parent = stack.pop()?;
                let prev = engine.symbols_prev(parent)?;
                Self::resolve_backward(engine, prev, stack)
            }
        }
    }
}

impl<'a, T: Hash + Eq + Clone> Iterator for RevIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current_key = self.current?;
        let value = match self.engine.symbol_at(current_key) {
            Symbol::Terminal(v) => v,
            _ => unreachable!("resolve_backward only stops on terminals"),
        };
        let prev_key = self.engine.symbols_prev(current_key);
        self.current =
            prev_key.and_then(|k| Self::resolve_backward(self.engine, k, &mut self.stack));
        Some(value)
    }
}

impl<'a, T: Hash + Eq + Clone> PartialEq for RevIter<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current && self.stack == other.stack
    }
}

impl<T: Hash + Eq + Clone> Sequitur<T> {
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    pub fn rev_iter(&self) -> RevIter<'_, T> {
        RevIter::new(self)
    }
}

impl<'a, T: Hash + Eq + Clone> IntoIterator for &'a Sequitur<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
