//! Consistency checks for a [`Grammar`](crate::grammar::Grammar).
//!
//! The derivation engine relies on a handful of structural invariants: every
//! symbol is declared, no alternative is empty, labels never collide with
//! terminal characters, and every non-terminal yields a fixed number of
//! characters. These passes verify them up front so that a malformed table is
//! reported as an error instead of surfacing halfway through a derivation.

use crate::grammar::{Grammar, NonTerminal, Symbol};
use std::collections::BTreeSet;
use thiserror::Error;

/// A structural defect found in a grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// The start symbol heads no production.
    #[error("start symbol '{0}' has no productions")]
    MissingStart(NonTerminal),

    /// A right-hand side mentions a non-terminal with no productions.
    #[error("undefined symbol '{symbol}' referenced in rule '{rule}'")]
    UndefinedSymbol {
        /// The undeclared non-terminal.
        symbol: NonTerminal,
        /// The rule whose right-hand side mentions it.
        rule: NonTerminal,
    },

    /// An alternative with no symbols.
    #[error("rule '{0}' has an empty alternative")]
    EmptyProduction(NonTerminal),

    /// A terminal character could be mistaken for a non-terminal label.
    #[error("terminal '{0}' collides with the non-terminal label alphabet")]
    LabelCollision(char),

    /// The alternatives of a rule yield strings of different lengths.
    #[error("rule '{0}' has no fixed yield width")]
    UnevenSpan(NonTerminal),
}

/// Checks that `grammar` satisfies the invariants derivation depends on.
///
/// Rules unreachable from the start symbol are logged as warnings and do not
/// fail the check.
///
/// # Errors
///
/// Returns the first [`GrammarError`] encountered.
pub fn check(grammar: &Grammar) -> Result<(), GrammarError> {
    check_start(grammar)?;
    check_alternatives(grammar)?;
    check_labels(grammar)?;
    check_spans(grammar)?;
    check_unreachable_rules(grammar);
    Ok(())
}

fn check_start(grammar: &Grammar) -> Result<(), GrammarError> {
    if grammar.productions_for(grammar.start()).is_empty() {
        return Err(GrammarError::MissingStart(grammar.start()));
    }
    Ok(())
}

fn check_alternatives(grammar: &Grammar) -> Result<(), GrammarError> {
    for (rule, alternatives) in grammar.productions() {
        for rhs in alternatives {
            if rhs.is_empty() {
                return Err(GrammarError::EmptyProduction(rule));
            }
            for symbol in rhs {
                if let Symbol::NonTerminal(nt) = symbol {
                    if !grammar.is_non_terminal(*symbol) {
                        return Err(GrammarError::UndefinedSymbol { symbol: *nt, rule });
                    }
                }
            }
        }
    }
    Ok(())
}

fn check_labels(grammar: &Grammar) -> Result<(), GrammarError> {
    match grammar.terminals().iter().find(|c| c.is_ascii_uppercase()) {
        Some(c) => Err(GrammarError::LabelCollision(*c)),
        None => Ok(()),
    }
}

fn check_spans(grammar: &Grammar) -> Result<(), GrammarError> {
    for (rule, _) in grammar.productions() {
        if grammar.span(rule).is_none() {
            return Err(GrammarError::UnevenSpan(rule));
        }
    }
    Ok(())
}

fn check_unreachable_rules(grammar: &Grammar) {
    let mut reachable = BTreeSet::new();
    let mut to_visit = vec![grammar.start()];

    while let Some(rule) = to_visit.pop() {
        if !reachable.insert(rule) {
            continue;
        }
        to_visit.extend(
            grammar
                .productions_for(rule)
                .iter()
                .flatten()
                .filter_map(|symbol| symbol.as_non_terminal()),
        );
    }

    for (rule, _) in grammar.productions() {
        if !reachable.contains(&rule) {
            log::warn!("unreachable rule '{rule}'");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_grammar_is_consistent() {
        assert_eq!(check(Grammar::canonical()), Ok(()));
    }

    #[test]
    fn test_missing_start() {
        let grammar = Grammar::from_table(NonTerminal::S, &[(NonTerminal::N, &["1"])]);
        assert_eq!(check(&grammar), Err(GrammarError::MissingStart(NonTerminal::S)));
    }

    #[test]
    fn test_undefined_symbol() {
        let grammar = Grammar::from_table(NonTerminal::S, &[(NonTerminal::S, &["M/D"])]);
        assert_eq!(
            check(&grammar),
            Err(GrammarError::UndefinedSymbol {
                symbol: NonTerminal::M,
                rule: NonTerminal::S,
            })
        );
    }

    #[test]
    fn test_empty_alternative() {
        let grammar = Grammar::from_table(NonTerminal::S, &[(NonTerminal::S, &["1", ""])]);
        assert_eq!(check(&grammar), Err(GrammarError::EmptyProduction(NonTerminal::S)));
    }

    #[test]
    fn test_uneven_span() {
        let grammar = Grammar::from_table(
            NonTerminal::S,
            &[(NonTerminal::S, &["N", "NN"]), (NonTerminal::N, &["0"])],
        );
        assert_eq!(check(&grammar), Err(GrammarError::UnevenSpan(NonTerminal::S)));
    }

    #[test]
    fn test_label_collision() {
        let grammar = Grammar::from_table(NonTerminal::S, &[(NonTerminal::S, &["0A"])]);
        assert_eq!(check(&grammar), Err(GrammarError::LabelCollision('A')));
    }

    #[test]
    fn test_unreachable_rule_is_not_an_error() {
        let grammar = Grammar::from_table(
            NonTerminal::S,
            &[(NonTerminal::S, &["0"]), (NonTerminal::Z, &["1"])],
        );
        assert_eq!(check(&grammar), Ok(()));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GrammarError::UndefinedSymbol {
                symbol: NonTerminal::V,
                rule: NonTerminal::S,
            }
            .to_string(),
            "undefined symbol 'V' referenced in rule 'S'"
        );
    }
}
