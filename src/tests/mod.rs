
use crate::symbol::{Symbol, SymbolKey};
use crate::Sequitur;
use slotmap::DefaultKey;
use std::hash::Hash;

/// Every adjacent non-sentinel pair in every rule body, tagged with each
/// symbol's own `SymbolKey` fingerprint so property tests can check P3
/// without re-deriving digram identity themselves: two terminals only
/// collide here if they'd also collide in the engine's own digram index.
pub(crate) fn all_digrams<T: Clone + Eq + Hash>(seq: &Sequitur<T>) -> Vec<(SymbolKey, SymbolKey)> {
    let mut digrams = Vec::new();
    for (_, head) in seq.rules().iter() {
        let mut cursor = seq_next(seq, head);
        while let Some(key) = cursor {
            let Some(next_key) = seq_next(seq, key) else {
                break;
            };
            if !seq.symbol_at(key).is_head() && !seq.symbol_at(next_key).is_tail() {
                let tag = SymbolKey::of(seq.symbol_at(key));
                let next_tag = SymbolKey::of(seq.symbol_at(next_key));
                digrams.push((tag, next_tag));
            }
            cursor = Some(next_key);
        }
    }
    digrams
}

fn seq_next<T: Clone + Eq + Hash>(seq: &Sequitur<T>, key: DefaultKey) -> Option<DefaultKey> {
    seq.symbols_next(key)
}

pub(crate) fn rule_usage_count<T: Clone + Eq + Hash>(seq: &Sequitur<T>, head: DefaultKey) -> u32 {
    match seq.symbol_at(head) {
        Symbol::Head { count, .. } => *count,
        _ => 0,
    }
}
