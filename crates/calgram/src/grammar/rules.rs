//! Core types for representing the symbols and production rules of the grammar.
//!
//! This module contains the vocabulary the rest of the crate speaks: the closed
//! set of non-terminal labels, the terminal characters, and the declarative
//! production table that [`Grammar`](crate::grammar::Grammar) is built from.

use std::fmt;

/// A non-terminal label of the calendar-token grammar.
///
/// Every label renders as a single ASCII uppercase letter, which keeps it
/// disjoint from the terminal alphabet (digits and separators).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NonTerminal {
    /// The start symbol: a whole `month sep day sep year` token.
    S,
    /// A two-character month field.
    M,
    /// A two-character day field.
    D,
    /// A four-digit year field.
    Y,
    /// Any digit `0..=9`.
    N,
    /// A non-zero digit `1..=9`.
    X,
    /// A digit in `0..=2`.
    V,
    /// A digit in `0..=1`.
    Z,
}

impl NonTerminal {
    /// All non-terminals, in declaration order.
    pub const ALL: [NonTerminal; 8] = [
        NonTerminal::S,
        NonTerminal::M,
        NonTerminal::D,
        NonTerminal::Y,
        NonTerminal::N,
        NonTerminal::X,
        NonTerminal::V,
        NonTerminal::Z,
    ];

    /// Returns the single-letter label used in sentential forms.
    #[must_use]
    pub fn label(self) -> char {
        match self {
            NonTerminal::S => 'S',
            NonTerminal::M => 'M',
            NonTerminal::D => 'D',
            NonTerminal::Y => 'Y',
            NonTerminal::N => 'N',
            NonTerminal::X => 'X',
            NonTerminal::V => 'V',
            NonTerminal::Z => 'Z',
        }
    }

    /// Looks up the non-terminal carrying `label`, if any.
    #[must_use]
    pub fn from_label(label: char) -> Option<Self> {
        Self::ALL.into_iter().find(|nt| nt.label() == label)
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A grammar symbol: either a non-terminal label or a terminal character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A symbol that must be rewritten before a derivation completes.
    NonTerminal(NonTerminal),
    /// A character that appears literally in the accepted string.
    Terminal(char),
}

impl Symbol {
    /// Returns the character this symbol prints as.
    #[must_use]
    pub fn label(self) -> char {
        match self {
            Symbol::NonTerminal(nt) => nt.label(),
            Symbol::Terminal(c) => c,
        }
    }

    /// Returns the wrapped non-terminal, if this is one.
    #[must_use]
    pub fn as_non_terminal(self) -> Option<NonTerminal> {
        match self {
            Symbol::NonTerminal(nt) => Some(nt),
            Symbol::Terminal(_) => None,
        }
    }
}

impl From<NonTerminal> for Symbol {
    fn from(nt: NonTerminal) -> Self {
        Symbol::NonTerminal(nt)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The field separator of an accepted token.
///
/// Each variant selects one top-level alternative of the start symbol, so the
/// three shapes share one validator and one derivation routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separator {
    /// `/`, as in `05/12/2023`.
    Slash,
    /// `-`, as in `05-12-2023`.
    Dash,
    /// `.`, as in `05.12.2023`.
    Dot,
}

impl Separator {
    /// All separators, in the order of the start symbol's alternatives.
    pub const ALL: [Separator; 3] = [Separator::Slash, Separator::Dash, Separator::Dot];

    /// Parses a separator character.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '/' => Some(Separator::Slash),
            '-' => Some(Separator::Dash),
            '.' => Some(Separator::Dot),
            _ => None,
        }
    }

    /// Returns the literal separator character.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Separator::Slash => '/',
            Separator::Dash => '-',
            Separator::Dot => '.',
        }
    }

    /// Index of the start-symbol alternative this separator selects.
    #[must_use]
    pub fn alternative(self) -> usize {
        match self {
            Separator::Slash => 0,
            Separator::Dash => 1,
            Separator::Dot => 2,
        }
    }
}

/// The declarative production table, one entry per non-terminal.
///
/// Right-hand sides are written as strings: uppercase letters name
/// non-terminals, every other character is a terminal.
pub(crate) const RULES: &[(NonTerminal, &[&str])] = &[
    (NonTerminal::S, &["M/D/Y", "M-D-Y", "M.D.Y"]),
    (NonTerminal::M, &["0X", "1V"]),
    (NonTerminal::D, &["0X", "1N", "2N", "3Z"]),
    (NonTerminal::Y, &["NNNN"]),
    (
        NonTerminal::N,
        &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"],
    ),
    (
        NonTerminal::X,
        &["1", "2", "3", "4", "5", "6", "7", "8", "9"],
    ),
    (NonTerminal::V, &["0", "1", "2"]),
    (NonTerminal::Z, &["0", "1"]),
];

/// Reads one right-hand side from the table notation.
pub(crate) fn parse_rhs(rhs: &str) -> Vec<Symbol> {
    rhs.chars()
        .map(|c| match NonTerminal::from_label(c) {
            Some(nt) => Symbol::NonTerminal(nt),
            None => Symbol::Terminal(c),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for nt in NonTerminal::ALL {
            assert_eq!(NonTerminal::from_label(nt.label()), Some(nt));
            assert!(nt.label().is_ascii_uppercase());
        }
        assert_eq!(NonTerminal::from_label('P'), None);
        assert_eq!(NonTerminal::from_label('7'), None);
    }

    #[test]
    fn test_separator_alternatives_follow_table_order() {
        let (_, start_alternatives) = RULES[0];
        for sep in Separator::ALL {
            let rhs = start_alternatives[sep.alternative()];
            assert!(rhs.contains(sep.as_char()), "{rhs} lacks {sep:?}");
            assert_eq!(Separator::from_char(sep.as_char()), Some(sep));
        }
        assert_eq!(Separator::from_char(':'), None);
    }

    #[test]
    fn test_parse_rhs() {
        assert_eq!(
            parse_rhs("1V"),
            vec![Symbol::Terminal('1'), Symbol::NonTerminal(NonTerminal::V)]
        );
        assert_eq!(parse_rhs("M.D.Y").len(), 5);
    }
}
