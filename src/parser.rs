//! The stateful façade over the engine: owns the grammar, the growing chart,
//! the position cursor, and the sticky failure.

use crate::chart::Chart;
use crate::engine;
use crate::grammar::{Grammar, NonTerm};
use crate::matcher::Token;
use crate::{ParseError, Tree};

#[cfg(test)]
#[path = "tests/parser.rs"]
mod tests_for_parser;

/// An incremental parse in progress.
///
/// Feed tokens one at a time; at every point the parser can say whether the
/// input so far is already a sentence of the grammar ([`finished`]), whether
/// it can still become one (`!failed()`), or why it cannot ([`failure`]).
/// Once a token kills the parse the failure is sticky: later feeds are
/// ignored and the chart stays at the position where failure was detected.
///
/// [`finished`]: Parser::finished
/// [`failure`]: Parser::failure
pub struct Parser<T: Token> {
    grammar: Grammar<T>,
    start: NonTerm,
    chart: Chart<T>,
    position: usize,
    failure: Option<ParseError>,
}

impl<T: Token> Parser<T> {
    /// Panics if `start` has no rule in `grammar`.
    pub fn new(grammar: Grammar<T>, start: impl Into<NonTerm>) -> Parser<T> {
        let start = start.into();
        assert!(grammar.contains(&start), "start rule {start} is not defined in the grammar");
        let chart = engine::seed_chart(&grammar, &start);
        Parser { grammar, start, chart, position: 0, failure: None }
    }

    /// Advance the chart by one token. A no-op once the parse has failed.
    pub fn feed(&mut self, token: T) {
        if self.failure.is_some() {
            return;
        }
        self.position += 1;
        match engine::advance(&self.grammar, &mut self.chart, self.position, &token) {
            Ok(()) => debug_assert_eq!(self.chart.len(), self.position + 1),
            Err(failure) => self.failure = Some(failure),
        }
    }

    /// Feed tokens in order. Harmless to keep iterating after a failure.
    pub fn feed_many(&mut self, tokens: impl IntoIterator<Item = T>) {
        for token in tokens {
            self.feed(token);
        }
    }

    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }

    /// The recorded failure, if any.
    pub fn failure(&self) -> Option<&ParseError> {
        self.failure.as_ref()
    }

    /// True iff the tokens fed so far form a complete sentence of the start
    /// rule.
    pub fn finished(&self) -> bool {
        self.chart.completed_roots(self.position).any(|(head, _)| *head == self.start)
    }

    /// Every complete parse of the input so far. More than one tree means the
    /// input is ambiguous under this grammar; an empty list means the input
    /// is (at most) a proper prefix.
    pub fn results(&self) -> Vec<Tree<T>> {
        self.chart
            .completed_roots(self.position)
            .filter(|(head, _)| **head == self.start)
            .map(|(_, tree)| tree.clone())
            .collect()
    }

    /// How many tokens have been accepted, counting the one that failed.
    pub fn position(&self) -> usize {
        self.position
    }

    #[cfg(test)]
    pub(crate) fn chart(&self) -> &Chart<T> {
        &self.chart
    }
}
