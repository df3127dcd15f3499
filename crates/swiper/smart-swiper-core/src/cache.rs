//! Memo table of computed transitions.

use std::rc::Rc;

use hashbrown::HashMap;
use log::trace;

use crate::port::TransitionKey;
use crate::step::Step;

/// Shared, immutable step sequence dispatched for one item.
pub type Transition = Rc<[Step]>;

/// Transitions keyed by `(from, to)`. Entries stay valid until the step
/// defaults change, at which point the owner clears the whole table.
#[derive(Debug, Default)]
pub struct TransitionCache {
    entries: HashMap<TransitionKey, Transition>,
    hits: u64,
    misses: u64,
}

impl TransitionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached transition for `key`, counting the lookup as hit or miss.
    pub fn get(&mut self, key: &TransitionKey) -> Option<Transition> {
        match self.entries.get(key) {
            Some(t) => {
                self.hits += 1;
                trace!("transition cache hit {key}");
                Some(Rc::clone(t))
            }
            None => {
                self.misses += 1;
                trace!("transition cache miss {key}");
                None
            }
        }
    }

    pub fn insert(&mut self, key: TransitionKey, transition: Transition) {
        self.entries.insert(key, transition);
    }

    pub fn contains(&self, key: &TransitionKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
