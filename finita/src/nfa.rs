//! Nondeterministic simulation: a set of current states stepped symbol by
//! symbol.

use std::collections::hash_map::DefaultHasher;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::automaton::Automaton;

/// An unordered set of states, usable itself as the state type of a
/// determinized automaton.
///
/// Equality is structural and order-independent, and hashing is commutative
/// over the members, so two sets discovered in different orders collapse to
/// one entry in a hash map. Members are kept in a small inline vector;
/// subset-construction sets are typically tiny and membership is a linear
/// scan.
#[derive(Clone, Debug)]
pub struct StateSet<S> {
    members: SmallVec<[S; 4]>,
}

impl<S: Eq> StateSet<S> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            members: SmallVec::new(),
        }
    }

    /// Creates a set holding exactly one state.
    pub fn singleton(state: S) -> Self {
        let mut set = Self::new();
        set.insert(state);
        set
    }

    /// Inserts `state`, returning whether it was not already present.
    pub fn insert(&mut self, state: S) -> bool {
        if self.contains(&state) {
            return false;
        }
        self.members.push(state);
        true
    }

    /// Whether `state` is a member.
    pub fn contains(&self, state: &S) -> bool {
        self.members.iter().any(|m| m == state)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates the members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.members.iter()
    }
}

impl<S: Eq + Display> StateSet<S> {
    /// Renders the members as strings, sorted, joined with `separator`.
    ///
    /// Sorting the rendered labels makes the output independent of the order
    /// the members were discovered in, which keeps determinized automata
    /// printable in a stable way.
    pub fn join(&self, separator: &str) -> String {
        let mut labels: Vec<String> = self.members.iter().map(|m| m.to_string()).collect();
        labels.sort();
        labels.join(separator)
    }
}

impl<S: Eq> PartialEq for StateSet<S> {
    fn eq(&self, other: &Self) -> bool {
        // Members are pairwise distinct, so equal length plus one-way
        // containment is enough.
        self.members.len() == other.members.len()
            && self.members.iter().all(|m| other.contains(m))
    }
}

impl<S: Eq> Eq for StateSet<S> {}

impl<S: Eq + Hash> Hash for StateSet<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent: combine per-member hashes with a commutative
        // operation so the hash agrees with the unordered equality above.
        let mut combined: u64 = 0;
        for member in &self.members {
            let mut hasher = DefaultHasher::new();
            member.hash(&mut hasher);
            combined = combined.wrapping_add(hasher.finish());
        }
        state.write_u64(combined);
        state.write_usize(self.members.len());
    }
}

impl<'a, S: Eq> IntoIterator for &'a StateSet<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<S: Eq> FromIterator<S> for StateSet<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

impl<S: Clone + Eq, Σ: Eq> Automaton<S, Σ> {
    /// One nondeterministic step: the union of the targets of every edge
    /// leaving a member of `states` on `symbol`. Edge order is irrelevant
    /// here since the result is a set.
    pub fn step_all(&self, states: &StateSet<S>, symbol: &Σ) -> StateSet<S> {
        let mut next = StateSet::new();
        for t in self.transitions() {
            if t.symbol == *symbol && states.contains(&t.from) {
                next.insert(t.to.clone());
            }
        }
        next
    }

    /// Iterates [`step_all`] over `symbols` left to right. An empty
    /// intermediate set just propagates to an empty result; "stuck" and
    /// "nothing reachable" are the same outcome in this mode.
    ///
    /// [`step_all`]: Automaton::step_all
    pub fn step_sequence(&self, states: &StateSet<S>, symbols: &[Σ]) -> StateSet<S> {
        let mut current = states.clone();
        for symbol in symbols {
            current = self.step_all(&current, symbol);
        }
        current
    }

    /// Nondeterministic walk seeded with the single state `state`.
    pub fn step_from(&self, state: &S, symbols: &[Σ]) -> StateSet<S> {
        self.step_sequence(&StateSet::singleton(state.clone()), symbols)
    }

    /// Whether the set reached from the initial state after consuming
    /// `symbols` contains at least one final state.
    pub fn accept_nondeterministic(&self, symbols: &[Σ]) -> bool {
        let reached = self.step_from(self.initial_state(), symbols);
        let accepted = reached.iter().any(|s| self.is_final(s));
        accepted
    }
}
