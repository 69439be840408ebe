//! Incremental Earley parsing over opaque token streams.
//!
//! The chart grows by one state set per token fed; at every point the parser
//! can report whether the input so far is a prefix of some accepted string,
//! whether it is already accepted, or why the last token made further
//! progress impossible.
//!
//! ```
//! use marley::{exactly, Grammar, Parser, Symbol};
//!
//! // parens → ε | '(' parens ')'
//! let mut grammar = Grammar::new();
//! grammar.rule("parens", []);
//! grammar.rule("parens", [
//!     Symbol::terminal(exactly('(')),
//!     Symbol::nonterm("parens"),
//!     Symbol::terminal(exactly(')')),
//! ]);
//!
//! let mut parser = Parser::new(grammar, "parens");
//! parser.feed_many("(())".chars());
//! assert!(parser.finished());
//! ```

use thiserror::Error;

mod chart;
mod display;
mod engine;
mod grammar;
mod matcher;
mod parser;

pub use crate::grammar::{Grammar, NonTerm, Production, Symbol};
pub use crate::matcher::{exactly, tag, Matcher, Token};
pub use crate::parser::Parser;

#[cfg(test)]
mod tests;

/// Why a parse stopped. Recorded by the parser the moment it happens and
/// sticky from then on.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum ParseError {
    /// The previous position's state set was already empty when a token
    /// arrived.
    #[error("Parser cannot advance")]
    NoProgress,
    /// No item could scan the incoming token. `expected` holds the label of
    /// every matcher that rejected it, deduplicated, in the order the
    /// closure tried them.
    #[error("Expected one of: {}", .expected.join(", "))]
    UnexpectedToken { expected: Vec<String> },
}

/// A parse tree: the nonterminal that was recognized and the children its
/// production matched, in order.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Tree<T> {
    head: NonTerm,
    children: Vec<Child<T>>,
}

/// One matched element of a production.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Child<T> {
    /// A token consumed by Scanning.
    Term(T),
    /// A subtree propagated by Completion.
    Parse(Tree<T>),
}

impl<T> Tree<T> {
    pub(crate) fn new(head: NonTerm) -> Tree<T> {
        Tree { head, children: Vec::new() }
    }

    pub fn head(&self) -> &NonTerm {
        &self.head
    }

    pub fn children(&self) -> &[Child<T>] {
        &self.children
    }

    pub(crate) fn extend_term(&mut self, token: T) {
        self.children.push(Child::Term(token));
    }

    pub(crate) fn extend_parsed(&mut self, subtree: Tree<T>) {
        self.children.push(Child::Parse(subtree));
    }

    /// The scanned tokens of this tree, in input order.
    pub fn leaves(&self) -> Vec<&T> {
        let mut accum = Vec::new();
        self.collect_leaves(&mut accum);
        accum
    }

    fn collect_leaves<'a>(&'a self, accum: &mut Vec<&'a T>) {
        for child in &self.children {
            match child {
                Child::Term(token) => accum.push(token),
                Child::Parse(subtree) => subtree.collect_leaves(accum),
            }
        }
    }
}
