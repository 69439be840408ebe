//! Grammars: an insertion-ordered table from nonterminal name to alternative
//! productions. The table is immutable for the life of a parser; alternation
//! order is preserved for display purposes but the engine must not depend on
//! it for correctness.

use std::collections::HashSet;
use std::sync::Arc;

use derive_more::Display;
use linear_map::LinearMap;

use crate::matcher::Matcher;

/// A nonterminal name. The name is shared, not owned: every item and tree
/// node recognizing a rule carries a clone, so cloning is a refcount bump and
/// equality is on content.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Display)]
pub struct NonTerm(Arc<str>);

impl NonTerm {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NonTerm {
    fn from(name: &str) -> NonTerm {
        NonTerm(name.into())
    }
}

impl From<String> for NonTerm {
    fn from(name: String) -> NonTerm {
        NonTerm(name.into())
    }
}

/// One position's worth of grammar: either a terminal, recognized by its
/// matcher, or a reference to another rule by name.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Symbol<T> {
    Terminal(Matcher<T>),
    NonTerm(NonTerm),
}

impl<T> Symbol<T> {
    pub fn terminal(matcher: Matcher<T>) -> Symbol<T> {
        Symbol::Terminal(matcher)
    }

    pub fn nonterm(name: impl Into<NonTerm>) -> Symbol<T> {
        Symbol::NonTerm(name.into())
    }
}

/// An alternative right-hand side: an ordered, possibly empty sequence of
/// symbols. The sequence sits behind an `Arc` and is shared by every item
/// whose dot walks it; items never own production suffixes.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Production<T>(Arc<[Symbol<T>]>);

impl<T> Production<T> {
    pub fn symbols(&self) -> &[Symbol<T>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> FromIterator<Symbol<T>> for Production<T> {
    fn from_iter<I: IntoIterator<Item = Symbol<T>>>(symbols: I) -> Production<T> {
        Production(symbols.into_iter().collect())
    }
}

/// The rule table. Names are unique keys; repeated [`Grammar::rule`] calls
/// for the same name accumulate alternatives.
#[derive(Clone, Debug)]
pub struct Grammar<T> {
    rules: LinearMap<NonTerm, Vec<Production<T>>>,
}

impl<T> Grammar<T> {
    pub fn new() -> Grammar<T> {
        Grammar { rules: LinearMap::new() }
    }

    /// Append one alternative for `name`.
    pub fn rule(
        &mut self,
        name: impl Into<NonTerm>,
        symbols: impl IntoIterator<Item = Symbol<T>>,
    ) -> &mut Grammar<T> {
        let name = name.into();
        let production = symbols.into_iter().collect();
        match self.rules.get_mut(&name) {
            Some(alternatives) => alternatives.push(production),
            None => {
                self.rules.insert(name, vec![production]);
            }
        }
        self
    }

    /// The alternatives for `name`, in the order they were added.
    pub fn productions(&self, name: &NonTerm) -> Option<&[Production<T>]> {
        self.rules.get(name).map(|alternatives| alternatives.as_slice())
    }

    pub fn contains(&self, name: &NonTerm) -> bool {
        self.rules.contains_key(name)
    }

    /// Names with at least one production.
    pub fn defined(&self) -> HashSet<NonTerm> {
        self.rules.keys().cloned().collect()
    }

    /// Names referenced on some right-hand side but never defined. Predicting
    /// such a name at parse time is fatal, so clients that assemble grammars
    /// dynamically should check this first.
    pub fn undefined(&self) -> HashSet<NonTerm> {
        self.rules
            .values()
            .flat_map(|alternatives| alternatives.iter())
            .flat_map(|production| production.symbols())
            .filter_map(|symbol| match symbol {
                Symbol::NonTerm(name) if !self.contains(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }
}

impl<T> Default for Grammar<T> {
    fn default() -> Grammar<T> {
        Grammar::new()
    }
}
