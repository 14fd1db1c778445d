//! The automaton value type and its builder.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use log::debug;

/// One labeled edge of the transition relation.
///
/// Two transitions are equal only when all three components are equal, so a
/// `Vec<Transition>` deduplicated by equality behaves as a set of edges. The
/// relation is allowed to hold several edges sharing `from` and `symbol`,
/// which is what makes [`Automaton`] able to describe nondeterministic
/// machines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition<S, Σ> {
    /// State the edge leaves from.
    pub from: S,
    /// Input symbol the edge consumes.
    pub symbol: Σ,
    /// State the edge arrives at.
    pub to: S,
}

impl<S, Σ> Transition<S, Σ> {
    /// Creates an edge from its three components.
    pub fn new(from: S, symbol: Σ, to: S) -> Self {
        Self { from, symbol, to }
    }
}

/// An immutable finite automaton over state type `S` and symbol type `Σ`.
///
/// Values are only produced by [`Builder::build`] (or internally by the
/// subset construction), which establishes the invariants: states and
/// symbols pairwise distinct in first-declaration order, exactly one initial
/// state, final states a subset of the state list, edges deduplicated as
/// exact triples. Nothing mutates an automaton after that.
#[derive(Clone, Debug)]
pub struct Automaton<S, Σ> {
    states: Vec<S>,
    symbols: Vec<Σ>,
    initial: usize,
    finals: Vec<usize>,
    transitions: Vec<Transition<S, Σ>>,
}

impl<S, Σ> Automaton<S, Σ> {
    /// Infallible constructor for callers that already hold the invariants,
    /// i.e. `Builder::build` and the subset construction.
    pub(crate) fn from_parts(
        states: Vec<S>,
        symbols: Vec<Σ>,
        initial: usize,
        finals: Vec<usize>,
        transitions: Vec<Transition<S, Σ>>,
    ) -> Self {
        Self {
            states,
            symbols,
            initial,
            finals,
            transitions,
        }
    }

    /// The declared states, deduplicated, in first-declaration order.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// The alphabet, deduplicated, in first-declaration order.
    pub fn symbols(&self) -> &[Σ] {
        &self.symbols
    }

    /// The edge relation in build-time order.
    pub fn transitions(&self) -> &[Transition<S, Σ>] {
        &self.transitions
    }

    /// The single initial state.
    pub fn initial_state(&self) -> &S {
        &self.states[self.initial]
    }

    /// The final (accepting) states, in state-list order.
    pub fn final_states(&self) -> impl Iterator<Item = &S> {
        self.finals.iter().map(|&i| &self.states[i])
    }
}

impl<S: Eq, Σ> Automaton<S, Σ> {
    /// Whether `state` equals the initial state.
    pub fn is_initial(&self, state: &S) -> bool {
        *self.initial_state() == *state
    }

    /// Whether `state` is one of the final states. A value that matches no
    /// declared state is simply not final.
    pub fn is_final(&self, state: &S) -> bool {
        self.finals.iter().any(|&i| self.states[i] == *state)
    }
}

/// Errors reported by [`Builder::build`].
#[derive(Debug, PartialEq, Eq)]
pub enum BuildError {
    /// No states were declared; an automaton needs at least one.
    EmptyStates,

    /// [`Builder::initial_state`] was never called.
    MissingInitialState,

    /// The requested initial state equals none of the declared states.
    UnknownInitialState,
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::EmptyStates => write!(f, "automaton has no states"),
            Self::MissingInitialState => write!(f, "no initial state was declared"),
            Self::UnknownInitialState => {
                write!(f, "initial state is not among the declared states")
            }
        }
    }
}

impl Error for BuildError {}

/// Mutable accumulator for an automaton description.
///
/// Declarations may repeat and arrive in any order; `build` deduplicates
/// everything once and freezes the result. The builder itself is not
/// consumed and can build again (or keep accumulating) afterwards.
#[derive(Clone, Debug)]
pub struct Builder<S, Σ> {
    states: Vec<S>,
    symbols: Vec<Σ>,
    initial: Option<S>,
    finals: Vec<S>,
    transitions: Vec<Transition<S, Σ>>,
}

/// Equality-based dedup keeping the first occurrence of each value.
fn dedup<T: PartialEq + Clone>(values: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(value) {
            out.push(value.clone());
        }
    }
    out
}

impl<S, Σ> Default for Builder<S, Σ> {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            symbols: Vec::new(),
            initial: None,
            finals: Vec::new(),
            transitions: Vec::new(),
        }
    }
}

impl<S: Clone + Eq, Σ: Clone + Eq> Builder<S, Σ> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the candidate state list wholesale; the last call wins.
    pub fn states<I: IntoIterator<Item = S>>(&mut self, states: I) -> &mut Self {
        self.states.clear();
        self.states.extend(states);
        self
    }

    /// Replaces the candidate alphabet wholesale; the last call wins.
    pub fn symbols<I: IntoIterator<Item = Σ>>(&mut self, symbols: I) -> &mut Self {
        self.symbols.clear();
        self.symbols.extend(symbols);
        self
    }

    /// Adds final states. Additive across calls, unlike `states`.
    pub fn add_final_states<I: IntoIterator<Item = S>>(&mut self, states: I) -> &mut Self {
        self.finals.extend(states);
        self
    }

    /// Sets the initial state; the last call wins.
    pub fn initial_state(&mut self, state: S) -> &mut Self {
        self.initial = Some(state);
        self
    }

    /// Appends one candidate edge.
    pub fn transition(&mut self, from: S, symbol: Σ, to: S) -> &mut Self {
        self.transitions.push(Transition::new(from, symbol, to));
        self
    }

    /// Deduplicates the accumulated declarations, resolves the initial and
    /// final states against the state list and freezes an [`Automaton`].
    ///
    /// Fails when no state was declared, when no initial state was set, or
    /// when the initial state matches no declared state. Final states that
    /// match no declared state are dropped. Edge endpoints are copied
    /// verbatim and are *not* checked against the state list; that is the
    /// caller's contract (the text-format reader validates them upstream).
    pub fn build(&self) -> Result<Automaton<S, Σ>, BuildError> {
        let states = dedup(&self.states);
        let symbols = dedup(&self.symbols);
        let finals = dedup(&self.finals);
        let transitions = dedup(&self.transitions);

        if states.is_empty() {
            return Err(BuildError::EmptyStates);
        }

        let initial = match &self.initial {
            None => return Err(BuildError::MissingInitialState),
            Some(wanted) => states
                .iter()
                .position(|s| s == wanted)
                .ok_or(BuildError::UnknownInitialState)?,
        };

        let final_indexes: Vec<usize> = states
            .iter()
            .enumerate()
            .filter(|(_, s)| finals.contains(s))
            .map(|(i, _)| i)
            .collect();

        debug!(
            "built automaton: {} states, {} symbols, {} transitions, {} final",
            states.len(),
            symbols.len(),
            transitions.len(),
            final_indexes.len()
        );

        Ok(Automaton::from_parts(
            states,
            symbols,
            initial,
            final_indexes,
            transitions,
        ))
    }
}

// MARK: Tests
#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Automaton<&'static str, char> {
        Builder::new()
            .states(["A", "B", "C", "D"])
            .symbols(['x', 'y', 'z'])
            .initial_state("A")
            .add_final_states(["B", "D"])
            .transition("A", 'x', "A")
            .transition("A", 'y', "D")
            .transition("A", 'z', "D")
            .transition("D", 'x', "B")
            .transition("B", 'y', "D")
            .transition("B", 'z', "A")
            .build()
            .unwrap()
    }

    #[test]
    fn test_basics() {
        let a = sample();
        assert_eq!(a.states(), &["A", "B", "C", "D"]);
        assert_eq!(a.symbols(), &['x', 'y', 'z']);
        assert_eq!(*a.initial_state(), "A");
        assert!(a.is_initial(&"A"));
        assert!(!a.is_initial(&"B"));
        assert_eq!(a.final_states().copied().collect::<Vec<_>>(), ["B", "D"]);
        assert!(a.is_final(&"D"));
        assert!(!a.is_final(&"A"));
        assert!(!a.is_final(&"undeclared"));
        assert_eq!(a.transitions().len(), 6);
    }

    #[test]
    fn test_dedup_preserves_first_occurrence_order() {
        let a = Builder::new()
            .states(["B", "A", "B", "C", "A"])
            .symbols(['1', '0', '1', '0'])
            .initial_state("A")
            .add_final_states(["C", "C"])
            .transition("A", '0', "B")
            .transition("A", '0', "B")
            .transition("B", '1', "C")
            .build()
            .unwrap();

        assert_eq!(a.states(), &["B", "A", "C"]);
        assert_eq!(a.symbols(), &['1', '0']);
        assert_eq!(a.final_states().count(), 1);
        assert_eq!(a.transitions().len(), 2);
    }

    #[test]
    fn test_states_replace_finals_accumulate() {
        let mut b = Builder::<_, char>::new();
        b.states(["X", "Y"]);
        b.states(["A", "B", "C"]);
        b.add_final_states(["B"]);
        b.add_final_states(["C"]);
        b.initial_state("A");
        let a = b.build().unwrap();

        assert_eq!(a.states(), &["A", "B", "C"]);
        assert_eq!(a.final_states().copied().collect::<Vec<_>>(), ["B", "C"]);
    }

    #[test]
    fn test_builder_is_reusable() {
        let mut b = Builder::new();
        b.states(["A"]).symbols(['x']).initial_state("A");
        let first = b.build().unwrap();
        b.add_final_states(["A"]);
        let second = b.build().unwrap();

        assert_eq!(first.final_states().count(), 0);
        assert_eq!(second.final_states().count(), 1);
    }

    #[test]
    fn test_undeclared_final_states_are_dropped() {
        let a = Builder::<_, char>::new()
            .states(["A", "B"])
            .initial_state("A")
            .add_final_states(["B", "Z"])
            .build()
            .unwrap();
        assert_eq!(a.final_states().copied().collect::<Vec<_>>(), ["B"]);
    }

    #[test]
    fn test_build_errors() {
        let empty: Result<Automaton<&str, char>, _> = Builder::new().build();
        assert_eq!(empty.unwrap_err(), BuildError::EmptyStates);

        let missing = Builder::<&str, char>::new().states(["A"]).build();
        assert_eq!(missing.unwrap_err(), BuildError::MissingInitialState);

        let unknown = Builder::<&str, char>::new()
            .states(["A"])
            .initial_state("Q")
            .build();
        assert_eq!(unknown.unwrap_err(), BuildError::UnknownInitialState);
    }

    #[test]
    fn test_transition_equality_is_componentwise() {
        let t = Transition::new("A", 'x', "B");
        assert_eq!(t, Transition::new("A", 'x', "B"));
        assert_ne!(t, Transition::new("A", 'x', "C"));
        assert_ne!(t, Transition::new("A", 'y', "B"));
        assert_ne!(t, Transition::new("C", 'x', "B"));
    }
}
