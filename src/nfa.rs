use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use super::*;

/// Nondeterministic finite automaton with ε-moves.
///
/// Symbol moves live in the keyed table; ε-moves are a separate adjacency
/// map, never a sentinel value of the symbol type. The occupied states form
/// a set (the configuration), kept closed under ε-moves after every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa<S, A>
where
    S: std::fmt::Debug + Clone + Eq + std::hash::Hash,
    A: std::fmt::Debug + Clone + Eq + std::hash::Hash,
{
    moves: Table<S, A, HashSet<S>>,
    epsilon_moves: HashMap<S, HashSet<S>>,
    initial_state: S,
    accepting_states: HashSet<S>,
    current_states: HashSet<S>,
}

impl<S, A> Nfa<S, A>
where
    S: std::fmt::Debug + Clone + Eq + std::hash::Hash,
    A: std::fmt::Debug + Clone + Eq + std::hash::Hash,
{
    #[tracing::instrument(skip_all)]
    pub fn new(initial_state: S, accepting_states: HashSet<S>) -> Self {
        Self::with_table(Table::new(), HashMap::new(), initial_state, accepting_states)
    }

    /// Starts from pre-populated symbol and ε tables.
    #[tracing::instrument(skip_all)]
    pub fn with_table(
        moves: Table<S, A, HashSet<S>>,
        epsilon_moves: HashMap<S, HashSet<S>>,
        initial_state: S,
        accepting_states: HashSet<S>,
    ) -> Self {
        let mut nfa = Self {
            moves,
            epsilon_moves,
            initial_state,
            accepting_states,
            current_states: Default::default(),
        };
        nfa.reset();
        nfa
    }

    /// Unions `to` into the destination set for (from, symbol); a second
    /// destination for the same pair accumulates rather than replacing.
    pub fn add_transition(&mut self, from: S, symbol: A, to: S) {
        self.moves.entry_or_default(from, symbol).insert(to);
    }

    pub fn add_epsilon_transition(&mut self, from: S, to: S) {
        match self.epsilon_moves.entry(from) {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(Default::default()),
        }
        .insert(to);
    }

    /// Batch add; a `None` symbol is an ε-move.
    pub fn add_transitions<I>(&mut self, transitions: I)
    where
        I: IntoIterator<Item = (S, Option<A>, S)>,
    {
        for (from, symbol, to) in transitions {
            match symbol {
                Some(symbol) => self.add_transition(from, symbol, to),
                None => self.add_epsilon_transition(from, to),
            }
        }
    }

    pub fn transition_table(&self) -> &Table<S, A, HashSet<S>> {
        &self.moves
    }

    pub fn epsilon_moves(&self) -> &HashMap<S, HashSet<S>> {
        &self.epsilon_moves
    }

    /// The configuration: every state the automaton currently occupies.
    pub fn current_states(&self) -> &HashSet<S> {
        &self.current_states
    }

    pub fn accepting_states(&self) -> &HashSet<S> {
        &self.accepting_states
    }

    /// ε-closure of a set of states: everything reachable through ε-moves
    /// alone, including the starting states themselves.
    ///
    /// Worklist iteration with one visited set shared across all members, so
    /// ε-cycles terminate and a state expanded for one member is never
    /// re-expanded for another.
    #[tracing::instrument(skip_all)]
    pub fn epsilon_closure(&self, states: &HashSet<S>) -> HashSet<S> {
        let mut closure: HashSet<S> = Default::default();
        let mut stack: Vec<S> = states.iter().cloned().collect();

        while let Some(state) = stack.pop() {
            if !closure.insert(state.clone()) {
                continue;
            }
            if let Some(targets) = self.epsilon_moves.get(&state) {
                for target in targets {
                    if !closure.contains(target) {
                        stack.push(target.clone());
                    }
                }
            }
        }

        closure
    }
}

impl<S, A> Automaton for Nfa<S, A>
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

    /// Recomputes the configuration as the ε-closure of the initial state.
    #[tracing::instrument(skip_all)]
    fn reset(&mut self) {
        let initial = HashSet::from([self.initial_state.clone()]);
        self.current_states = self.epsilon_closure(&initial);
    }

    /// Unions the destination sets for every occupied state, then replaces
    /// the configuration with the ε-closure of that union.
    ///
    /// An empty result is terminal: the closure of the empty set is empty,
    /// so every later step also returns `None` until `reset`.
    #[tracing::instrument(skip(self), ret)]
    fn step(&mut self, symbol: &A) -> Option<Status> {
        let mut targets: HashSet<S> = Default::default();
        for state in &self.current_states {
            if let Some(destinations) = self.moves.get(state, symbol) {
                targets.extend(destinations.iter().cloned());
            }
        }
        self.current_states = self.epsilon_closure(&targets);

        if self.is_accepting() {
            Some(Status::Accepting)
        } else if !self.current_states.is_empty() {
            Some(Status::Running)
        } else {
            // no live states left; dead until reset
            tracing::debug!("configuration is empty");
            None
        }
    }

    fn is_accepting(&self) -> bool {
        !self.current_states.is_disjoint(&self.accepting_states)
    }
}

impl<S, A> std::fmt::Display for Nfa<S, A>
where
    S: std::fmt::Debug + Clone + Eq + std::hash::Hash,
    A: std::fmt::Debug + Clone + Eq + std::hash::Hash,
{
    /// One line per (origin, symbol, destination), ε-moves labelled "ε",
    /// destinations flagged when accepting. Line order is unspecified.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let flag = |to: &S| {
            if self.accepting_states.contains(to) {
                " [accepting]"
            } else {
                ""
            }
        };
        for ((from, symbol), destinations) in self.moves.iter() {
            for to in destinations {
                writeln!(f, "({from:?}, {symbol:?}) -> {to:?}{}", flag(to))?;
            }
        }
        for (from, destinations) in &self.epsilon_moves {
            for to in destinations {
                writeln!(f, "({from:?}, ε) -> {to:?}{}", flag(to))?;
            }
        }
        Ok(())
    }
}

#[test]
fn test_union_insert_accumulates() {
    let mut nfa: Nfa<u32, char> = Nfa::new(0, HashSet::from([2]));
    nfa.add_transition(0, 'a', 1);
    nfa.add_transition(0, 'a', 2);
    assert_eq!(
        nfa.transition_table().get(&0, &'a'),
        Some(&HashSet::from([1, 2]))
    );
}

#[test]
fn test_closure_includes_self_and_survives_cycles() {
    let mut nfa: Nfa<char, u8> = Nfa::new('A', HashSet::new());
    nfa.add_epsilon_transition('A', 'B');
    nfa.add_epsilon_transition('B', 'A');

    let closure = nfa.epsilon_closure(&HashSet::from(['A']));
    assert_eq!(closure, HashSet::from(['A', 'B']));
}
