/// The running status reported by a successful step.
///
/// A missing transition is not a status; `step` reports it as `None` and
/// each engine documents what happens to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Running,
    Accepting,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Running => f.write_str("Running"),
            Status::Accepting => f.write_str("Accepting"),
        }
    }
}

/// Behavior shared by the engine types: an initial state, a stepping
/// operation, and an acceptance probe.
///
/// A DFA and an NFA share no state layout, only this shape, so driver code
/// is written against the trait rather than a common base type.
pub trait Automaton {
    type State;
    type Symbol;

    fn initial_state(&self) -> &Self::State;

    /// Writing the initial state does not move the current configuration;
    /// only `reset` does.
    fn set_initial_state(&mut self, state: Self::State);

    /// Puts the automaton back at its initial configuration.
    ///
    /// Must be called after transitions are added to an engine that has
    /// already stepped; stepping without it is out of contract.
    fn reset(&mut self);

    fn step(&mut self, symbol: &Self::Symbol) -> Option<Status>;

    /// Whether the current configuration is accepting.
    fn is_accepting(&self) -> bool;

    /// Resets, then consumes all of `input`. True when every symbol had a
    /// transition and the final configuration is accepting.
    fn accepts<I>(&mut self, input: I) -> bool
    where
        I: IntoIterator<Item = Self::Symbol>,
    {
        self.reset();
        for symbol in input {
            if self.step(&symbol).is_none() {
                return false;
            }
        }
        self.is_accepting()
    }

    /// Resets, then feeds `input` until the automaton first reports
    /// `Accepting`, returning how many symbols it consumed to get there.
    ///
    /// The empty prefix counts: an accepting initial configuration yields
    /// `Some(0)`. `None` when the automaton dies or the input runs out
    /// without accepting.
    fn first_accept<I>(&mut self, input: I) -> Option<usize>
    where
        I: IntoIterator<Item = Self::Symbol>,
    {
        self.reset();
        if self.is_accepting() {
            return Some(0);
        }
        for (consumed, symbol) in input.into_iter().enumerate() {
            match self.step(&symbol) {
                Some(Status::Accepting) => return Some(consumed + 1),
                Some(Status::Running) => {}
                None => return None,
            }
        }
        None
    }
}

#[test]
fn test_status_display() {
    assert_eq!(Status::Running.to_string(), "Running");
    assert_eq!(Status::Accepting.to_string(), "Accepting");
}
