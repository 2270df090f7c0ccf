//! Generic deterministic finite automaton
//!
//! A transition table keyed by `(state, symbol)` plus a partial map of accept
//! states to labels. Each state may carry one wildcard edge ([`Symbol::Any`])
//! that is only consulted when no exact edge exists for the input character.

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Input symbol on a transition edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Char(char),
    Any,
}

/// Character class argument for [`Dfa::add_transitions`].
#[derive(Debug, Clone, Copy)]
pub enum CharClass<'a> {
    /// One edge per character of the string.
    Set(&'a str),
    /// A single wildcard edge.
    Any,
}

#[derive(Debug, Clone)]
pub struct Dfa<S, L> {
    table: FxHashMap<(S, Symbol), S>,
    accept: FxHashMap<S, L>,
}

impl<S, L> Dfa<S, L>
where
    S: Copy + Eq + Hash,
    L: Copy,
{
    pub fn new() -> Self {
        Dfa {
            table: FxHashMap::default(),
            accept: FxHashMap::default(),
        }
    }

    pub fn add_transition(&mut self, state: S, symbol: Symbol, next: S) {
        self.table.insert((state, symbol), next);
    }

    /// Fan a character class out into individual edges, or add the wildcard.
    pub fn add_transitions(&mut self, state: S, class: CharClass<'_>, next: S) {
        match class {
            CharClass::Any => self.add_transition(state, Symbol::Any, next),
            CharClass::Set(chars) => {
                for ch in chars.chars() {
                    self.add_transition(state, Symbol::Char(ch), next);
                }
            }
        }
    }

    /// Exact edge first, then the wildcard, else `None`.
    pub fn next_state(&self, state: S, input: char) -> Option<S> {
        self.table
            .get(&(state, Symbol::Char(input)))
            .or_else(|| self.table.get(&(state, Symbol::Any)))
            .copied()
    }

    pub fn mark_accept(&mut self, state: S, label: L) {
        self.accept.insert(state, label);
    }

    pub fn is_accept(&self, state: S) -> bool {
        self.accept.contains_key(&state)
    }

    pub fn accept_label(&self, state: S) -> Option<L> {
        self.accept.get(&state).copied()
    }

    pub fn transition_count(&self) -> usize {
        self.table.len()
    }
}

impl<S, L> Default for Dfa<S, L>
where
    S: Copy + Eq + Hash,
    L: Copy,
{
    fn default() -> Self {
        Self::new()
    }
}
