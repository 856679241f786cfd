use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// A table keyed by an (origin state, symbol) pair: the transition store for
/// both engine types.
///
/// Lookup of an unpopulated pair is an explicit miss, never a default value,
/// so an engine can tell "no transition" apart from "transition to some
/// state".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<X, Y, V>
where
    X: Eq + std::hash::Hash,
    Y: Eq + std::hash::Hash,
{
    stored: HashMap<(X, Y), V>,
}

impl<X, Y, V> Table<X, Y, V>
where
    X: Eq + std::hash::Hash + Clone,
    Y: Eq + std::hash::Hash + Clone,
{
    pub fn new() -> Self {
        Default::default()
    }

    // keys are cheap identifiers, so lookup builds the composite key by clone
    pub fn get(&self, x: &X, y: &Y) -> Option<&V> {
        self.stored.get(&(x.clone(), y.clone()))
    }

    pub fn get_mut(&mut self, x: &X, y: &Y) -> Option<&mut V> {
        self.stored.get_mut(&(x.clone(), y.clone()))
    }

    /// Inserting over a populated pair replaces its value and returns the
    /// displaced one.
    pub fn insert(&mut self, x: X, y: Y, v: V) -> Option<V> {
        self.stored.insert((x, y), v)
    }

    /// The value slot for a pair, default-populated when vacant.
    pub fn entry_or_default(&mut self, x: X, y: Y) -> &mut V
    where
        V: Default,
    {
        match self.stored.entry((x, y)) {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(Default::default()),
        }
    }

    /// Populated (origin, symbol) pairs, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &(X, Y)> {
        self.stored.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(X, Y), &V)> {
        self.stored.iter()
    }

    pub fn len(&self) -> usize {
        self.stored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stored.is_empty()
    }
}

impl<X, Y, V> Default for Table<X, Y, V>
where
    X: Eq + std::hash::Hash,
    Y: Eq + std::hash::Hash,
{
    fn default() -> Self {
        Self {
            stored: HashMap::new(),
        }
    }
}

#[test]
fn test_insert_overwrites() {
    let mut t: Table<u32, char, u32> = Table::new();
    assert_eq!(t.insert(0, 'a', 1), None);
    assert_eq!(t.insert(0, 'a', 2), Some(1));
    assert_eq!(t.get(&0, &'a'), Some(&2));
    assert_eq!(t.len(), 1);

    if let Some(v) = t.get_mut(&0, &'a') {
        *v = 3;
    }
    assert_eq!(t.get(&0, &'a'), Some(&3));
}

#[test]
fn test_miss_is_explicit() {
    let t: Table<u32, char, u32> = Table::new();
    assert_eq!(t.get(&0, &'a'), None);
    assert!(t.is_empty());
}
