//! # sequitur-engine
//!
//! An online implementation of the Sequitur grammar-inference algorithm.
//!
//! Terminals are streamed in one at a time via [`Sequitur::push`]; after
//! each one the engine restores two invariants over its rule set:
//!
//! 1. **Digram uniqueness**: no pair of adjacent symbols appears more than
//!    once in any rule body.
//! 2. **Rule utility**: every rule other than the start rule is referenced
//!    at least twice.
//!
//! ## Example
//!
//! ```
//! use sequitur_engine::Sequitur;
//!
//! let mut seq = Sequitur::new();
//! seq.extend("abcabcabc".chars());
//!
//! let reconstructed: String = seq.iter().collect();
//! assert_eq!(reconstructed, "abcabcabc");
//!
//! println!("{} rules", seq.rules().len());
//! ```
//!
//! Iteration is bidirectional: [`Sequitur::rev_iter`] walks the same
//! reconstructed sequence back to front without separately materialising it.
//!
//! ```
//! use sequitur_engine::Sequitur;
//!
//! let mut seq = Sequitur::new();
//! seq.extend("abcabc".chars());
//! let forward: String = seq.iter().collect();
//! let mut backward: String = seq.rev_iter().collect();
//! backward = backward.chars().rev().collect();
//! assert_eq!(forward, backward);
//! ```
//!
//! The engine is single-owner and single-threaded: no method blocks or
//! yields, and no two calls may run concurrently against the same instance.
//! It does no I/O and reads no configuration — a caller such as a CLI or a
//! batch compressor is expected to own the terminal stream and the rule-set
//! presentation.

mod digram;
mod engine;
mod id_gen;
mod list;
mod rule_table;
mod symbol;

#[cfg(test)]
mod tests;

pub(crate) use id_gen::IdAllocator;

pub mod iter;

pub use engine::{GrammarStats, Sequitur};
pub use iter::{Iter, RevIter};
pub use rule_table::RuleTable;
