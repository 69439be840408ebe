//! The chart: an append-only sequence of state sets, one per input position.
//! State set `k` holds every item consistent with the first `k` tokens.
//!
//! Sets deduplicate on whole items, partial trees included. Deduplication is
//! not an optimization here: on left-recursive grammars it is what makes the
//! closure terminate.

use crate::grammar::{NonTerm, Production, Symbol};
use crate::Tree;

/// One Earley item: a rule under recognition. `production` and `dot` together
/// name the remaining suffix; `origin` is the chart index where recognition
/// began; `tree` accumulates the children matched so far.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) struct Item<T> {
    pub(crate) head: NonTerm,
    production: Production<T>,
    dot: usize,
    pub(crate) origin: usize,
    pub(crate) tree: Tree<T>,
}

impl<T> Item<T> {
    pub(crate) fn next_symbol(&self) -> Option<&Symbol<T>> {
        self.production.symbols().get(self.dot)
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.dot == self.production.len()
    }

    /// True iff this item is waiting on the nonterminal `name`.
    pub(crate) fn awaits(&self, name: &NonTerm) -> bool {
        matches!(self.next_symbol(), Some(Symbol::NonTerm(n)) if n == name)
    }
}

impl<T: Clone> Item<T> {
    /// A freshly predicted item: dot at the start, tree holding only the head.
    pub(crate) fn predicted(head: NonTerm, production: Production<T>, at: usize) -> Item<T> {
        let tree = Tree::new(head.clone());
        Item { head, production, dot: 0, origin: at, tree }
    }

    /// Step over a terminal, recording the token that satisfied it.
    pub(crate) fn scanned(&self, token: T) -> Item<T> {
        let mut item = self.stepped();
        item.tree.extend_term(token);
        item
    }

    /// Step over a nonterminal, recording the completed subtree.
    pub(crate) fn completed_with(&self, subtree: Tree<T>) -> Item<T> {
        let mut item = self.stepped();
        item.tree.extend_parsed(subtree);
        item
    }

    fn stepped(&self) -> Item<T> {
        Item {
            head: self.head.clone(),
            production: self.production.clone(),
            dot: self.dot + 1,
            origin: self.origin,
            tree: self.tree.clone(),
        }
    }
}

/// A deduplicating, insertion-ordered set of items.
#[derive(Clone, Debug)]
struct StateSet<T>(Vec<Item<T>>);

impl<T: Eq> StateSet<T> {
    fn new() -> StateSet<T> {
        StateSet(Vec::new())
    }

    fn push_new(&mut self, item: Item<T>) -> bool {
        if self.0.contains(&item) {
            return false;
        }
        self.0.push(item);
        true
    }
}

pub(crate) struct Chart<T> {
    sets: Vec<StateSet<T>>,
}

impl<T: Eq> Chart<T> {
    /// A chart for position 0: one empty state set.
    pub(crate) fn new() -> Chart<T> {
        Chart { sets: vec![StateSet::new()] }
    }

    pub(crate) fn len(&self) -> usize {
        self.sets.len()
    }

    /// The items at position `k`. The first position past the edge reads as
    /// empty, so callers can probe `k == len()` before anything scanned there.
    pub(crate) fn set(&self, k: usize) -> &[Item<T>] {
        self.sets.get(k).map(|set| set.0.as_slice()).unwrap_or(&[])
    }

    pub(crate) fn contains(&self, k: usize, item: &Item<T>) -> bool {
        self.set(k).contains(item)
    }

    /// Idempotent insert; returns true iff `item` was newly added. Inserting
    /// at `k == len()` grows the chart by one fresh state set.
    pub(crate) fn insert(&mut self, k: usize, item: Item<T>) -> bool {
        debug_assert!(k <= self.sets.len());
        debug_assert!(item.origin <= k);
        if k == self.sets.len() {
            self.sets.push(StateSet::new());
        }
        self.sets[k].push_new(item)
    }

    /// Complete items at `k` that span the whole input: the candidate
    /// top-level parses after `k` tokens.
    pub(crate) fn completed_roots(&self, k: usize) -> impl Iterator<Item = (&NonTerm, &Tree<T>)> {
        self.set(k)
            .iter()
            .filter(|item| item.is_complete() && item.origin == 0)
            .map(|item| (&item.head, &item.tree))
    }
}
