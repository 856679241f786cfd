use std::collections::HashSet;

use super::*;

/// Deterministic finite automaton: at most one destination per
/// (state, symbol) pair, and a single occupied state.
///
/// States and symbols are caller-chosen identifiers; the engine gives them
/// no meaning beyond equality and hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa<S, A>
where
    S: std::fmt::Debug + Clone + Eq + std::hash::Hash,
    A: std::fmt::Debug + Clone + Eq + std::hash::Hash,
{
    moves: Table<S, A, S>,
    initial_state: S,
    accepting_states: HashSet<S>,
    current_state: S,
}

impl<S, A> Dfa<S, A>
where
    S: std::fmt::Debug + Clone + Eq + std::hash::Hash,
    A: std::fmt::Debug + Clone + Eq + std::hash::Hash,
{
    #[tracing::instrument(skip_all)]
    pub fn new(initial_state: S, accepting_states: HashSet<S>) -> Self {
        Self::with_table(Table::new(), initial_state, accepting_states)
    }

    /// Starts from a pre-populated transition table.
    #[tracing::instrument(skip_all)]
    pub fn with_table(moves: Table<S, A, S>, initial_state: S, accepting_states: HashSet<S>) -> Self {
        let current_state = initial_state.clone();
        Self {
            moves,
            initial_state,
            accepting_states,
            current_state,
        }
    }

    /// Adds a transition. A later call with the same (from, symbol) replaces
    /// the earlier destination; this is deliberate overwrite, not an error.
    pub fn add_transition(&mut self, from: S, symbol: A, to: S) {
        self.moves.insert(from, symbol, to);
    }

    pub fn add_transitions<I>(&mut self, transitions: I)
    where
        I: IntoIterator<Item = (S, A, S)>,
    {
        for (from, symbol, to) in transitions {
            self.add_transition(from, symbol, to);
        }
    }

    pub fn transition_table(&self) -> &Table<S, A, S> {
        &self.moves
    }

    pub fn current_state(&self) -> &S {
        &self.current_state
    }

    pub fn accepting_states(&self) -> &HashSet<S> {
        &self.accepting_states
    }
}

impl<S, A> Automaton for Dfa<S, A>
where
    S: std::fmt::Debug + Clone + Eq + std::hash::Hash,
    A: std::fmt::Debug + Clone + Eq + std::hash::Hash,
{
    type State = S;
    type Symbol = A;

    fn initial_state(&self) -> &S {
        &self.initial_state
    }

    fn set_initial_state(&mut self, state: S) {
        self.initial_state = state;
    }

    #[tracing::instrument(skip_all)]
    fn reset(&mut self) {
        self.current_state = self.initial_state.clone();
    }

    /// On a miss the current state is left untouched: a later step behaves
    /// exactly as if the missed call had never happened.
    #[tracing::instrument(skip(self), ret)]
    fn step(&mut self, symbol: &A) -> Option<Status> {
        let target = self.moves.get(&self.current_state, symbol)?.clone();
        let status = if self.accepting_states.contains(&target) {
            Status::Accepting
        } else {
            Status::Running
        };
        self.current_state = target;
        Some(status)
    }

    fn is_accepting(&self) -> bool {
        self.accepting_states.contains(&self.current_state)
    }
}

impl<S, A> std::fmt::Display for Dfa<S, A>
where
    S: std::fmt::Debug + Clone + Eq + std::hash::Hash,
    A: std::fmt::Debug + Clone + Eq + std::hash::Hash,
{
    /// One line per populated transition, destination flagged when
    /// accepting. Line order is unspecified.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ((from, symbol), to) in self.moves.iter() {
            let flag = if self.accepting_states.contains(to) {
                " [accepting]"
            } else {
                ""
            };
            writeln!(f, "({from:?}, {symbol:?}) -> {to:?}{flag}")?;
        }
        Ok(())
    }
}

#[test]
fn test_step_moves_and_miss_does_not() {
    let mut dfa: Dfa<u32, char> = Dfa::new(0, HashSet::from([1]));
    dfa.add_transition(0, 'a', 1);
    dfa.add_transition(1, 'b', 0);

    assert_eq!(dfa.step(&'x'), None);
    assert_eq!(dfa.current_state(), &0);

    assert_eq!(dfa.step(&'a'), Some(Status::Accepting));
    assert_eq!(dfa.step(&'b'), Some(Status::Running));
    assert_eq!(dfa.current_state(), &0);
}

#[test]
fn test_reset_returns_to_initial() {
    let mut dfa: Dfa<u32, char> = Dfa::new(0, HashSet::from([1]));
    dfa.add_transition(0, 'a', 1);
    dfa.step(&'a');
    assert_eq!(dfa.current_state(), &1);
    dfa.reset();
    assert_eq!(dfa.current_state(), &0);
}
