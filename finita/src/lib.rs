#![warn(missing_docs)]

//! A small finite automaton library: build a machine from explicit state,
//! symbol and transition lists, run it deterministically or
//! nondeterministically, and determinize it through the classic subset
//! construction.
//!
//! The transition relation is a plain set of labeled edges, so the same
//! [`Automaton`] value can describe a DFA or an NFA. State and symbol types
//! are opaque to the library, they only need equality, hashing and cloning.

pub mod automaton;
pub mod dfa;
pub mod nfa;
pub mod subset;

pub use automaton::{Automaton, BuildError, Builder, Transition};
pub use nfa::StateSet;
