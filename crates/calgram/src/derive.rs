//! Leftmost and rightmost derivations of accepted tokens.
//!
//! A derivation starts from the start symbol and rewrites one non-terminal
//! occurrence per step until only terminals remain, recording every
//! intermediate sentential form and growing the parse tree as it goes.
//!
//! The sentential form is held as a sequence of tagged items rather than as
//! text. Each pending non-terminal carries the path of its tree node and the
//! offset of the input slice it must yield, so choosing the leftmost or
//! rightmost occurrence is a scan for the first or last pending item, and
//! choosing the production is [`Grammar::select`] on that slice.
//!
//! Both orders apply the same productions to the same nodes, only in a
//! different sequence, so they return identical trees and the same number of
//! steps.

use crate::grammar::{Grammar, NonTerminal, Symbol};
use crate::tree::Node;
use crate::validate::{recognize, Rejection};
use std::fmt;
use thiserror::Error;

/// Which non-terminal occurrence is rewritten at each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Rewrite the first remaining non-terminal.
    Leftmost,
    /// Rewrite the last remaining non-terminal.
    Rightmost,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Order::Leftmost => "leftmost",
            Order::Rightmost => "rightmost",
        })
    }
}

/// One application of a production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Index, within the sentential form before the step, of the replaced symbol.
    pub position: usize,
    /// The non-terminal that was replaced.
    pub non_terminal: NonTerminal,
    /// The right-hand side it was replaced by.
    pub replacement: Vec<Symbol>,
}

/// A completed derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    /// The order rewrites were applied in.
    pub order: Order,
    /// Sentential forms, from the start symbol to the input itself.
    pub steps: Vec<String>,
    /// The rewrite that produced each step after the first.
    pub rewrites: Vec<Rewrite>,
    /// The parse tree, rooted at the start symbol.
    pub tree: Node,
}

/// Why no derivation was produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    /// The input is not in the language.
    #[error("Invalid input: {reason}")]
    NotDerivable {
        /// The rejected input.
        input: String,
        /// What the validator objected to.
        #[source]
        reason: Rejection,
    },

    /// No alternative of a non-terminal yields the slice it must cover.
    #[error("no production of {non_terminal} derives '{target}'")]
    NoProduction {
        /// The non-terminal being rewritten.
        non_terminal: NonTerminal,
        /// The input slice it had to yield.
        target: String,
    },

    /// A pending non-terminal pointed at a node that does not exist.
    #[error("no parse tree node at path {0:?}")]
    DetachedNode(Vec<usize>),
}

/// Derives `input` in the given order.
///
/// The input is validated first; an invalid input yields
/// [`DerivationError::NotDerivable`] and no tree.
///
/// # Errors
///
/// Returns [`DerivationError::NotDerivable`] for input outside the language.
pub fn derive(input: &str, order: Order) -> Result<Derivation, DerivationError> {
    if let Err(reason) = recognize(input) {
        log::debug!("refusing to derive {input:?}: {reason}");
        return Err(DerivationError::NotDerivable {
            input: input.to_owned(),
            reason,
        });
    }
    run(Grammar::canonical(), input, order)
}

/// Derives `input` by always rewriting the leftmost non-terminal.
///
/// # Errors
///
/// See [`derive`].
pub fn leftmost(input: &str) -> Result<Derivation, DerivationError> {
    derive(input, Order::Leftmost)
}

/// Derives `input` by always rewriting the rightmost non-terminal.
///
/// # Errors
///
/// See [`derive`].
pub fn rightmost(input: &str) -> Result<Derivation, DerivationError> {
    derive(input, Order::Rightmost)
}

#[derive(Debug, Clone)]
struct Pending {
    non_terminal: NonTerminal,
    path: Vec<usize>,
    start: usize,
}

#[derive(Debug, Clone)]
enum Item {
    Terminal(char),
    Pending(Pending),
}

impl Item {
    fn label(&self) -> char {
        match self {
            Item::Terminal(c) => *c,
            Item::Pending(pending) => pending.non_terminal.label(),
        }
    }
}

fn render(form: &[Item]) -> String {
    form.iter().map(Item::label).collect()
}

fn pick(form: &[Item], order: Order) -> Option<(usize, &Pending)> {
    let mut pending = form.iter().enumerate().filter_map(|(i, item)| match item {
        Item::Pending(p) => Some((i, p)),
        Item::Terminal(_) => None,
    });
    match order {
        Order::Leftmost => pending.next(),
        Order::Rightmost => pending.next_back(),
    }
}

/// Runs a derivation of `input` over `grammar` without validating it first.
///
/// Terminals are assumed to be single-byte characters, which holds for any
/// input the validator accepts.
fn run(grammar: &Grammar, input: &str, order: Order) -> Result<Derivation, DerivationError> {
    let start = grammar.start();
    let mut tree = Node::new(start.into());
    let mut form = vec![Item::Pending(Pending {
        non_terminal: start,
        path: Vec::new(),
        start: 0,
    })];
    let mut steps = vec![render(&form)];
    let mut rewrites = Vec::new();

    while let Some((position, pending)) = pick(&form, order) {
        let pending = pending.clone();
        let nt = pending.non_terminal;
        let no_production = |target: &str| DerivationError::NoProduction {
            non_terminal: nt,
            target: target.to_owned(),
        };

        let rest = input.get(pending.start..).unwrap_or_default();
        let end = grammar
            .span(nt)
            .map(|width| pending.start + width)
            .ok_or_else(|| no_production(rest))?;
        let target = input.get(pending.start..end).ok_or_else(|| no_production(rest))?;
        let rhs = grammar.select(nt, target).ok_or_else(|| no_production(target))?;

        let node = tree
            .child_at_path_mut(&pending.path)
            .ok_or_else(|| DerivationError::DetachedNode(pending.path.clone()))?;

        let mut offset = pending.start;
        let mut replacement = Vec::with_capacity(rhs.len());
        for (i, symbol) in rhs.iter().enumerate() {
            node.add_child(Node::new(*symbol));
            match symbol {
                Symbol::Terminal(c) => {
                    replacement.push(Item::Terminal(*c));
                    offset += 1;
                }
                Symbol::NonTerminal(child) => {
                    let mut path = pending.path.clone();
                    path.push(i);
                    replacement.push(Item::Pending(Pending {
                        non_terminal: *child,
                        path,
                        start: offset,
                    }));
                    offset += grammar.span(*child).ok_or_else(|| no_production(target))?;
                }
            }
        }

        form.splice(position..=position, replacement);
        rewrites.push(Rewrite {
            position,
            non_terminal: nt,
            replacement: rhs.to_vec(),
        });
        steps.push(render(&form));
        log::trace!("{order} step {}: {nt} at {position} => {}", steps.len() - 1, render(&form));
    }

    log::debug!(
        "{order} derivation of {input:?} finished after {} rewrites",
        rewrites.len()
    );
    Ok(Derivation {
        order,
        steps,
        rewrites,
        tree,
    })
}
