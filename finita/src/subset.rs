//! Subset construction: determinizing an automaton whose edge relation may
//! be nondeterministic.

use std::fmt::Display;
use std::hash::Hash;

use hashbrown::HashMap;
use log::debug;

use crate::automaton::{Automaton, Transition};
use crate::nfa::StateSet;

impl<S: Clone + Eq + Hash, Σ: Clone + Eq> Automaton<S, Σ> {
    /// Builds an equivalent deterministic automaton whose states are sets of
    /// this automaton's states.
    ///
    /// Discovery starts from the singleton set of the initial state and
    /// proceeds in discovery order, trying each source symbol in declared
    /// order. A non-empty step result becomes a new subset state unless an
    /// equal set (order-independent) was already discovered, and records one
    /// edge. An empty step result records nothing: there is no sink state,
    /// absence of an edge is the rejection signal. A subset state is final
    /// iff it contains at least one source final state.
    ///
    /// Terminates because a source with N states has at most 2^N − 1
    /// non-empty subsets and every iteration either consumes a worklist
    /// entry or discovers a subset not seen before.
    pub fn determinize(&self) -> Automaton<StateSet<S>, Σ> {
        let mut discovered: Vec<StateSet<S>> =
            vec![StateSet::singleton(self.initial_state().clone())];
        let mut index_of: HashMap<StateSet<S>, usize> = HashMap::new();
        index_of.insert(discovered[0].clone(), 0);
        let mut edges: Vec<Transition<StateSet<S>, Σ>> = Vec::new();

        let mut i = 0;
        while i < discovered.len() {
            let current = discovered[i].clone();
            for symbol in self.symbols() {
                let next = self.step_all(&current, symbol);
                if next.is_empty() {
                    continue;
                }
                let target = match index_of.get(&next) {
                    Some(&index) => index,
                    None => {
                        let index = discovered.len();
                        index_of.insert(next.clone(), index);
                        discovered.push(next.clone());
                        index
                    }
                };
                edges.push(Transition::new(
                    current.clone(),
                    symbol.clone(),
                    discovered[target].clone(),
                ));
            }
            i += 1;
        }

        let finals: Vec<usize> = discovered
            .iter()
            .enumerate()
            .filter(|(_, set)| self.final_states().any(|f| set.contains(f)))
            .map(|(index, _)| index)
            .collect();

        debug!(
            "determinized {} states into {} subset states, {} edges",
            self.states().len(),
            discovered.len(),
            edges.len()
        );

        Automaton::from_parts(discovered, self.symbols().to_vec(), 0, finals, edges)
    }

    /// [`determinize`], then relabel every subset state through `convert`.
    ///
    /// The converter is called once per discovered set, in discovery order;
    /// edges and finality carry over unchanged. It should map distinct sets
    /// to distinct labels, otherwise distinct subset states end up equal in
    /// the result.
    ///
    /// [`determinize`]: Automaton::determinize
    pub fn determinize_with<T, F>(&self, mut convert: F) -> Automaton<T, Σ>
    where
        T: Clone + Eq + Hash,
        F: FnMut(&StateSet<S>) -> T,
    {
        let raw = self.determinize();

        let mut labels: HashMap<&StateSet<S>, T> = HashMap::new();
        let states: Vec<T> = raw
            .states()
            .iter()
            .map(|set| {
                let label = convert(set);
                labels.insert(set, label.clone());
                label
            })
            .collect();

        let transitions: Vec<Transition<T, Σ>> = raw
            .transitions()
            .iter()
            .map(|t| {
                Transition::new(
                    labels[&t.from].clone(),
                    t.symbol.clone(),
                    labels[&t.to].clone(),
                )
            })
            .collect();

        let finals: Vec<usize> = raw
            .states()
            .iter()
            .enumerate()
            .filter(|(_, set)| raw.is_final(set))
            .map(|(index, _)| index)
            .collect();

        Automaton::from_parts(states, raw.symbols().to_vec(), 0, finals, transitions)
    }

    /// [`determinize`] with the stock string converter: each subset state is
    /// labeled by its members rendered, sorted and joined with `separator`.
    ///
    /// [`determinize`]: Automaton::determinize
    pub fn determinize_joined(&self, separator: &str) -> Automaton<String, Σ>
    where
        S: Display,
    {
        self.determinize_with(|set| set.join(separator))
    }
}
