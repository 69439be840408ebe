//! The three Earley inference rules and the driver that advances the chart
//! by exactly one token.
//!
//! Each state set is the closure of its seeds under Prediction, Scanning and
//! Completion. The closure runs over a work queue with a membership test:
//! popping an item dispatches on its first remaining symbol, and only items
//! not already present in the chart at their target position are enqueued.
//! That insert-if-absent check is the change detector; once the queue drains,
//! no rule can derive anything new.
//!
//! The dequeue discipline is deliberately a parameter. Correctness depends
//! only on the closure, so LIFO (the default) and FIFO must produce the same
//! state sets; the engine's tests hold it to that.

use std::collections::VecDeque;

use crate::chart::{Chart, Item};
use crate::grammar::{Grammar, NonTerm, Production, Symbol};
use crate::matcher::Token;
use crate::ParseError;

#[cfg(test)]
#[path = "tests/engine.rs"]
mod tests_for_engine;

#[derive(Copy, Clone, Debug)]
pub(crate) enum Discipline {
    Lifo,
    Fifo,
}

type Queue<T> = VecDeque<(usize, Item<T>)>;

/// The chart for the empty input: every production of `start` predicted into
/// state set 0, closed under Prediction alone. There is no token to scan,
/// and Completion has nothing to propagate that Prediction did not already
/// place there; ε-productions of `start` sit in the set already complete.
pub(crate) fn seed_chart<T: Token>(grammar: &Grammar<T>, start: &NonTerm) -> Chart<T> {
    let mut chart = Chart::new();
    let mut queue = Queue::new();
    for production in productions(grammar, start) {
        enqueue(&mut chart, &mut queue, 0, Item::predicted(start.clone(), production.clone(), 0));
    }
    while let Some((k, item)) = queue.pop_back() {
        if let Some(Symbol::NonTerm(name)) = item.next_symbol() {
            predict(grammar, &mut chart, &mut queue, k, name);
        }
    }
    chart
}

pub(crate) fn advance<T: Token>(
    grammar: &Grammar<T>,
    chart: &mut Chart<T>,
    position: usize,
    token: &T,
) -> Result<(), ParseError> {
    advance_with(grammar, chart, position, token, Discipline::Lifo)
}

/// Compute state set `position` from state set `position - 1` and `token`.
///
/// The queue is seeded with every item of the prior set; an empty prior set
/// means an earlier token already killed the parse. After the drain, an
/// empty set at `position` means no item could scan `token`, and the labels
/// collected from the failed scans become the diagnostic.
pub(crate) fn advance_with<T: Token>(
    grammar: &Grammar<T>,
    chart: &mut Chart<T>,
    position: usize,
    token: &T,
    discipline: Discipline,
) -> Result<(), ParseError> {
    debug_assert!(position >= 1);
    let prior = position - 1;

    let mut queue: Queue<T> = chart.set(prior).iter().map(|item| (prior, item.clone())).collect();
    if queue.is_empty() {
        return Err(ParseError::NoProgress);
    }

    let mut expected: Vec<String> = Vec::new();
    loop {
        let popped = match discipline {
            Discipline::Lifo => queue.pop_back(),
            Discipline::Fifo => queue.pop_front(),
        };
        let (k, item) = match popped {
            Some(entry) => entry,
            None => break,
        };

        match item.next_symbol() {
            // Completion: every item in the origin set waiting on this head
            // advances, absorbing the finished subtree.
            None => {
                let continuations: Vec<Item<T>> = chart
                    .set(item.origin)
                    .iter()
                    .filter(|parent| parent.awaits(&item.head))
                    .map(|parent| parent.completed_with(item.tree.clone()))
                    .collect();
                for continuation in continuations {
                    enqueue(chart, &mut queue, k, continuation);
                }
            }

            // Prediction: expand the awaited rule in place.
            Some(Symbol::NonTerm(name)) => {
                predict(grammar, chart, &mut queue, k, name);
            }

            // Scanning: only the newest state set can consume this token.
            // Terminal items at earlier positions are skipped; they stay in
            // the chart for Completion to reach.
            Some(Symbol::Terminal(matcher)) => {
                if k == prior {
                    if matcher.matches(token) {
                        enqueue(chart, &mut queue, k + 1, item.scanned(token.clone()));
                    } else {
                        let label = matcher.expected();
                        if !expected.contains(&label) {
                            expected.push(label);
                        }
                    }
                }
            }
        }
    }

    if chart.set(position).is_empty() {
        Err(ParseError::UnexpectedToken { expected })
    } else {
        Ok(())
    }
}

fn predict<T: Token>(
    grammar: &Grammar<T>,
    chart: &mut Chart<T>,
    queue: &mut Queue<T>,
    k: usize,
    name: &NonTerm,
) {
    for production in productions(grammar, name) {
        enqueue(chart, queue, k, Item::predicted(name.clone(), production.clone(), k));
    }
}

// A predicted name missing from the grammar is a malformed grammar, not a
// parse failure.
fn productions<'g, T>(grammar: &'g Grammar<T>, name: &NonTerm) -> &'g [Production<T>] {
    match grammar.productions(name) {
        Some(alternatives) => alternatives,
        None => panic!("grammar has no rule named {name}"),
    }
}

fn enqueue<T: Token>(chart: &mut Chart<T>, queue: &mut Queue<T>, k: usize, item: Item<T>) {
    if chart.contains(k, &item) {
        return;
    }
    queue.push_back((k, item.clone()));
    chart.insert(k, item);
}
