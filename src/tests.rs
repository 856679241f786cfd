#![cfg(test)]
use super::*;

use std::collections::{HashMap, HashSet};

#[test]
fn test_dfa_overwrite_keeps_last_destination() {
    test_setup();
    let mut dfa: Dfa<u32, char> = Dfa::new(0, HashSet::from([2]));
    dfa.add_transition(0, 'a', 1);
    dfa.add_transition(0, 'a', 2);

    assert_eq!(dfa.transition_table().len(), 1);
    assert_eq!(dfa.step(&'a'), Some(Status::Accepting));
    assert_eq!(dfa.current_state(), &2);
}

#[test]
fn test_dfa_miss_leaves_state_unchanged() {
    let mut dfa: Dfa<u32, char> = Dfa::new(0, HashSet::from([1]));
    dfa.add_transition(0, 'a', 1);

    assert_eq!(dfa.step(&'b'), None);
    assert_eq!(dfa.current_state(), &0);
    // behaves as if the miss had never happened
    assert_eq!(dfa.step(&'a'), Some(Status::Accepting));
    assert_eq!(dfa.current_state(), &1);
}

#[test]
fn test_accept_detection() {
    let mut dfa: Dfa<u32, char> = Dfa::new(0, HashSet::from([1]));
    dfa.add_transition(0, 'a', 1);

    assert_eq!(dfa.step(&'a'), Some(Status::Accepting));

    dfa.reset();
    assert_eq!(dfa.step(&'b'), None);
    assert_eq!(dfa.current_state(), &0);
}

#[test]
fn test_nfa_union_reaches_both_destinations() {
    let mut nfa: Nfa<u32, char> = Nfa::new(0, HashSet::new());
    nfa.add_transition(0, 'a', 1);
    nfa.add_transition(0, 'a', 2);
    nfa.reset();

    assert_eq!(nfa.step(&'a'), Some(Status::Running));
    assert_eq!(nfa.current_states(), &HashSet::from([1, 2]));
}

#[test]
fn test_epsilon_closure_idempotence() {
    let mut nfa: Nfa<u32, char> = Nfa::new(0, HashSet::new());
    nfa.add_epsilon_transition(0, 1);
    nfa.add_epsilon_transition(1, 2);
    nfa.add_epsilon_transition(2, 0);
    nfa.add_epsilon_transition(3, 4);

    let once = nfa.epsilon_closure(&HashSet::from([0, 3]));
    let twice = nfa.epsilon_closure(&once);
    assert_eq!(once, twice);
    assert_eq!(once, HashSet::from([0, 1, 2, 3, 4]));
}

#[test]
fn test_epsilon_cycle_closure_is_exact() {
    let mut nfa: Nfa<char, u8> = Nfa::new('A', HashSet::new());
    nfa.add_epsilon_transition('A', 'B');
    nfa.add_epsilon_transition('B', 'A');
    nfa.reset();

    assert_eq!(nfa.current_states(), &HashSet::from(['A', 'B']));
}

#[test]
fn test_nfa_death_is_terminal_until_reset() {
    let mut nfa: Nfa<u32, char> = Nfa::new(0, HashSet::from([1]));
    nfa.add_transition(0, 'a', 1);
    nfa.reset();

    assert_eq!(nfa.step(&'x'), None);
    assert!(nfa.current_states().is_empty());
    // any symbol now, even one with transitions elsewhere in the table
    assert_eq!(nfa.step(&'a'), None);
    assert_eq!(nfa.step(&'x'), None);

    nfa.reset();
    assert_eq!(nfa.step(&'a'), Some(Status::Accepting));
}

#[test]
fn test_nfa_accept_via_closure() {
    test_setup();
    let mut nfa: Nfa<u32, char> = Nfa::new(0, HashSet::from([2]));
    nfa.add_epsilon_transition(0, 1);
    nfa.add_transition(1, 'a', 2);
    nfa.reset();

    assert_eq!(nfa.current_states(), &HashSet::from([0, 1]));
    assert_eq!(nfa.step(&'a'), Some(Status::Accepting));
    assert_eq!(nfa.current_states(), &HashSet::from([2]));
}

#[test]
fn test_keys_round_trip() {
    let mut dfa: Dfa<u32, char> = Dfa::new(0, HashSet::new());
    dfa.add_transitions([(0, 'a', 1), (0, 'b', 2), (1, 'a', 0), (0, 'a', 3)]);

    let keys: HashSet<(u32, char)> = dfa.transition_table().keys().cloned().collect();
    assert_eq!(keys, HashSet::from([(0, 'a'), (0, 'b'), (1, 'a')]));
}

// driver code sees both engines through the one trait
fn scan<M>(automaton: &mut M, input: &str) -> Option<usize>
where
    M: Automaton<Symbol = char>,
{
    automaton.first_accept(input.chars())
}

#[test]
fn test_driver_is_generic_over_engines() {
    let mut dfa: Dfa<u32, char> = Dfa::new(0, HashSet::from([1]));
    dfa.add_transition(0, 'a', 1);

    let mut nfa: Nfa<u32, char> = Nfa::new(0, HashSet::from([2]));
    nfa.add_epsilon_transition(0, 1);
    nfa.add_transition(1, 'a', 2);
    nfa.reset();

    assert_eq!(scan(&mut dfa, "za"), None);
    assert_eq!(scan(&mut dfa, "a"), Some(1));
    assert_eq!(scan(&mut nfa, "a"), Some(1));
}

#[test]
fn test_accepts_consumes_whole_input() {
    let mut dfa: Dfa<u32, char> = Dfa::new(0, HashSet::from([1]));
    dfa.add_transition(0, 'a', 1);
    dfa.add_transition(1, 'b', 0);

    assert!(dfa.accepts("a".chars()));
    assert!(!dfa.accepts("ab".chars()));
    assert!(!dfa.accepts("x".chars()));
    assert!(!dfa.accepts("".chars()));
}

#[test]
fn test_empty_input_accepts_when_initial_is_accepting() {
    let mut dfa: Dfa<u32, char> = Dfa::new(0, HashSet::from([0]));
    assert!(dfa.accepts("".chars()));
    assert_eq!(dfa.first_accept("".chars()), Some(0));

    let mut nfa: Nfa<u32, char> = Nfa::new(0, HashSet::from([1]));
    nfa.add_epsilon_transition(0, 1);
    nfa.reset();
    assert!(nfa.accepts("".chars()));
    assert_eq!(nfa.first_accept("xyz".chars()), Some(0));
}

#[test]
fn test_set_initial_state_takes_effect_on_reset_only() {
    let mut nfa: Nfa<u32, char> = Nfa::new(0, HashSet::new());
    nfa.add_epsilon_transition(5, 6);
    nfa.reset();
    assert_eq!(nfa.current_states(), &HashSet::from([0]));

    nfa.set_initial_state(5);
    // configuration untouched until an explicit reset
    assert_eq!(nfa.current_states(), &HashSet::from([0]));
    nfa.reset();
    assert_eq!(nfa.current_states(), &HashSet::from([5, 6]));
}

#[test]
fn test_with_table_construction() {
    let mut moves: Table<u32, char, u32> = Table::new();
    moves.insert(0, 'a', 1);
    let dfa = Dfa::with_table(moves, 0, HashSet::from([1]));
    assert_eq!(dfa.current_state(), &0);

    let mut symbol_moves: Table<u32, char, HashSet<u32>> = Table::new();
    symbol_moves.insert(1, 'a', HashSet::from([2]));
    let epsilon_moves = HashMap::from([(0, HashSet::from([1]))]);
    let nfa = Nfa::with_table(symbol_moves, epsilon_moves, 0, HashSet::from([2]));
    // the constructor already closed over ε
    assert_eq!(nfa.current_states(), &HashSet::from([0, 1]));
}

#[test]
fn test_display_lists_every_transition() {
    let mut dfa: Dfa<u32, char> = Dfa::new(0, HashSet::from([1]));
    dfa.add_transition(0, 'a', 1);
    dfa.add_transition(1, 'b', 0);

    let rendered = dfa.to_string();
    assert!(rendered.contains("(0, 'a') -> 1 [accepting]"));
    assert!(rendered.contains("(1, 'b') -> 0\n"));

    let mut nfa: Nfa<u32, char> = Nfa::new(0, HashSet::from([2]));
    nfa.add_transition(0, 'a', 2);
    nfa.add_epsilon_transition(0, 1);

    let rendered = nfa.to_string();
    assert!(rendered.contains("(0, 'a') -> 2 [accepting]"));
    assert!(rendered.contains("(0, ε) -> 1\n"));
}

#[test]
fn test_protocol_states_with_string_symbols() {
    // a tiny handshake validator: states and symbols are plain strs
    let mut nfa: Nfa<&str, &str> = Nfa::new("idle", HashSet::from(["closed"]));
    nfa.add_transitions([
        ("idle", Some("syn"), "open"),
        ("open", Some("fin"), "closing"),
        ("closing", None, "closed"),
    ]);
    nfa.reset();

    assert_eq!(nfa.step(&"syn"), Some(Status::Running));
    assert_eq!(nfa.step(&"fin"), Some(Status::Accepting));
    assert_eq!(nfa.current_states(), &HashSet::from(["closing", "closed"]));
}

#[cfg(feature = "graphs")]
#[test]
fn test_graphviz_render() {
    let mut dfa: Dfa<u32, char> = Dfa::new(0, HashSet::from([1]));
    dfa.add_transition(0, 'a', 1);

    let g = graphviz_wrap(dfa.graphviz(), "dfa");
    assert!(g.contains("digraph G {"));
    assert!(g.contains(r#"node_0 -> node_1 [label="'a'" fontsize="20pt"];"#));
    assert!(g.contains(r#"node_0 [label="enter", shape="circle"]"#));
    assert!(g.contains(r#"node_1 [label="1", shape="doublecircle"]"#));

    let mut nfa: Nfa<u32, char> = Nfa::new(0, HashSet::from([2]));
    nfa.add_epsilon_transition(0, 1);
    nfa.add_transition(1, 'a', 2);
    let g = nfa.graphviz();
    assert!(g.contains(r#"node_0 -> node_1 [label="ε" fontsize="20pt"];"#));
    assert!(g.contains(r#"node_2 [label="2", shape="doublecircle"]"#));
}

#[cfg(feature = "graphs")]
#[test]
fn test_graphviz_file() {
    let mut dfa: Dfa<u32, char> = Dfa::new(0, HashSet::from([1]));
    dfa.add_transition(0, 'a', 1);

    let path = std::env::temp_dir().join("recognizers_dfa.dot");
    dfa.graphviz_file(path.to_str().unwrap(), "dfa");
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("node_0 -> node_1"));
}

pub fn test_setup() {
    assert!(*TEST_SETUP);
}

static TEST_SETUP: once_cell::sync::Lazy<bool> = once_cell::sync::Lazy::new(|| {
    setup();
    true
});

pub fn setup() {
    let subscriber = tracing_subscriber::fmt()
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
