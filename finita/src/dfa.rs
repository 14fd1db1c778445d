//! Deterministic simulation: a single current state stepped symbol by
//! symbol.

use std::hash::Hash;

use hashbrown::HashMap;

use crate::automaton::Automaton;

impl<S: Eq, Σ: Eq> Automaton<S, Σ> {
    /// Walks `symbols` left to right from `state` and returns the state
    /// reached, or `None` as soon as some step has no matching edge.
    ///
    /// Each step scans the edge list in stored order and takes the *first*
    /// edge matching the current state and symbol. When the relation is not
    /// actually deterministic the result therefore depends on edge insertion
    /// order; callers wanting true determinism must keep at most one edge
    /// per (state, symbol) pair, or determinize first.
    pub fn transition<'a>(&'a self, state: &'a S, symbols: &[Σ]) -> Option<&'a S> {
        let mut current = state;
        for symbol in symbols {
            current = self
                .transitions()
                .iter()
                .find(|t| t.from == *current && t.symbol == *symbol)
                .map(|t| &t.to)?;
        }
        Some(current)
    }

    /// Whether the automaton accepts `symbols`: the walk from the initial
    /// state must survive the whole sequence and end in a final state.
    pub fn accept(&self, symbols: &[Σ]) -> bool {
        match self.transition(self.initial_state(), symbols) {
            Some(state) => self.is_final(state),
            None => false,
        }
    }
}

impl<S: Eq, Σ: Eq + Hash> Automaton<S, Σ> {
    /// The outgoing edges of `state` as a symbol-to-target map.
    ///
    /// Built by scanning all edges and inserting into the map, so when
    /// several edges leave `state` on the same symbol the *last* one wins.
    /// This is deliberately the opposite tie-break from [`transition`],
    /// which takes the first match. The asymmetry only shows up on
    /// nondeterministic relations; determinize first if it matters.
    ///
    /// [`transition`]: Automaton::transition
    pub fn transitions_from(&self, state: &S) -> HashMap<&Σ, &S> {
        let mut out = HashMap::new();
        for t in self.transitions() {
            if t.from == *state {
                out.insert(&t.symbol, &t.to);
            }
        }
        out
    }
}
