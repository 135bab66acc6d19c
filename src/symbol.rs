use slotmap::DefaultKey;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// One node of the grammar's symbol graph.
///
/// `Head`/`Tail` are sentinels bracketing a rule's body; they never take part
/// in a digram and are skipped by the flattening iterators.
#[derive(Debug, Clone)]
pub(crate) enum Symbol<T> {
    Terminal(T),
    RuleRef { rule_id: u32 },
    Head {
        rule_id: u32,
        count: u32,
        tail: DefaultKey,
    },
    Tail,
}

impl<T> Symbol<T> {
    pub(crate) fn as_rule_ref(&self) -> Option<u32> {
        match self {
            Symbol::RuleRef { rule_id } => Some(*rule_id),
            _ => None,
        }
    }

    pub(crate) fn is_head(&self) -> bool {
        matches!(self, Symbol::Head { .. })
    }

    pub(crate) fn is_tail(&self) -> bool {
        matches!(self, Symbol::Tail)
    }
}

/// A doubly linked node owned by the engine's arena.
///
/// `prev`/`next` are `None` only transiently, between unlinking a node and
/// either re-linking or dropping it.
#[derive(Debug)]
pub(crate) struct SymbolNode<T> {
    pub symbol: Symbol<T>,
    pub prev: Option<DefaultKey>,
    pub next: Option<DefaultKey>,
}

impl<T> SymbolNode<T> {
    pub(crate) fn new(symbol: Symbol<T>) -> Self {
        Self {
            symbol,
            prev: None,
            next: None,
        }
    }
}

/// A compact semantic fingerprint of a symbol, used as a digram-index key
/// component so the index never needs to borrow from the arena or re-hash a
/// terminal on every lookup.
///
/// Two symbols with the same `SymbolKey` are interchangeable for digram
/// purposes regardless of which arena slot they live in: a `RuleRef` is
/// identified by the rule it targets, a terminal by its value, never by node
/// address.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub(crate) struct SymbolKey(u64);

impl SymbolKey {
    pub(crate) fn of<T: Hash>(symbol: &Symbol<T>) -> Self {
        let mut hasher = DefaultHasher::new();
        match symbol {
            Symbol::Terminal(v) => {
                0u8.hash(&mut hasher);
                v.hash(&mut hasher);
            }
            Symbol::RuleRef { rule_id } => {
                1u8.hash(&mut hasher);
                rule_id.hash(&mut hasher);
            }
            Symbol::Head { rule_id, .. } => {
                2u8.hash(&mut hasher);
                rule_id.hash(&mut hasher);
            }
            Symbol::Tail => {
                3u8.hash(&mut hasher);
            }
        }
        SymbolKey(hasher.finish())
    }
}

impl<T: Clone> Symbol<T> {
    /// Clones the symbol's payload for use in a freshly materialised rule
    /// body. Never copies list pointers — the clone starts unlinked.
    pub(crate) fn clone_payload(&self) -> Symbol<T> {
        match self {
            Symbol::Terminal(v) => Symbol::Terminal(v.clone()),
            Symbol::RuleRef { rule_id } => Symbol::RuleRef { rule_id: *rule_id },
            Symbol::Head {
                rule_id,
                count,
                tail,
            } => Symbol::Head {
                rule_id: *rule_id,
                count: *count,
                tail: *tail,
            },
            Symbol::Tail => Symbol::Tail,
        }
    }
}

impl<T: PartialEq> Symbol<T> {
    pub(crate) fn semantically_equals(&self, other: &Symbol<T>) -> bool {
        match (self, other) {
            (Symbol::Terminal(a), Symbol::Terminal(b)) => a == b,
            (Symbol::RuleRef { rule_id: a }, Symbol::RuleRef { rule_id: b }) => a == b,
            (Symbol::Head { rule_id: a, .. }, Symbol::Head { rule_id: b, .. }) => a == b,
            (Symbol::Tail, Symbol::Tail) => true,
            _ => false,
        }
    }
}
