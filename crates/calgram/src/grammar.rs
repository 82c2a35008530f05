//! The grammar model: non-terminals, terminals and their productions.
//!
//! A [`Grammar`] is built once from a declarative production table and then
//! shared read-only by the validator and the derivation engine. The
//! terminal/non-terminal partition and each non-terminal's yield width are
//! computed at construction, so every query afterwards is a lookup.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::LazyLock;

pub mod check;
pub mod rules;

pub use check::{check, GrammarError};
pub use rules::{NonTerminal, Separator, Symbol};

static CANONICAL: LazyLock<Grammar> = LazyLock::new(Grammar::dates);

/// An immutable context-free grammar over single-character symbols.
///
/// Productions are kept in declaration order, and each non-terminal's
/// alternatives keep the order they were written in, so selection and
/// display are deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    start: NonTerminal,
    productions: Vec<(NonTerminal, Vec<Vec<Symbol>>)>,
    terminals: BTreeSet<char>,
    non_terminals: BTreeSet<NonTerminal>,
    spans: BTreeMap<NonTerminal, usize>,
}

impl Grammar {
    /// Builds the calendar-token grammar.
    ///
    /// ```text
    /// S -> M/D/Y | M-D-Y | M.D.Y
    /// M -> 0X | 1V
    /// D -> 0X | 1N | 2N | 3Z
    /// Y -> NNNN
    /// N -> 0 | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9
    /// X -> 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9
    /// V -> 0 | 1 | 2
    /// Z -> 0 | 1
    /// ```
    #[must_use]
    pub fn dates() -> Self {
        Self::from_table(NonTerminal::S, rules::RULES)
    }

    /// Returns the shared, lazily built calendar-token grammar.
    #[must_use]
    pub fn canonical() -> &'static Grammar {
        &CANONICAL
    }

    /// Builds a grammar from a production table written in the compact
    /// notation of [`rules`]: uppercase letters are non-terminal labels and
    /// every other character is a terminal.
    ///
    /// Construction never fails. Use [`check`] to verify the result.
    #[must_use]
    pub fn from_table(start: NonTerminal, table: &[(NonTerminal, &[&str])]) -> Self {
        let productions: Vec<(NonTerminal, Vec<Vec<Symbol>>)> = table
            .iter()
            .map(|(lhs, alternatives)| {
                (*lhs, alternatives.iter().map(|rhs| rules::parse_rhs(rhs)).collect())
            })
            .collect();

        let non_terminals: BTreeSet<NonTerminal> =
            productions.iter().map(|(lhs, _)| *lhs).collect();

        // A terminal is any right-hand-side symbol that never heads a production.
        let terminals = productions
            .iter()
            .flat_map(|(_, alternatives)| alternatives.iter().flatten())
            .filter_map(|symbol| match symbol {
                Symbol::Terminal(c) => Some(*c),
                Symbol::NonTerminal(_) => None,
            })
            .collect();

        let mut grammar = Grammar {
            start,
            productions,
            terminals,
            non_terminals,
            spans: BTreeMap::new(),
        };
        grammar.spans = NonTerminal::ALL
            .into_iter()
            .filter_map(|nt| grammar.measure(nt, NonTerminal::ALL.len()).map(|w| (nt, w)))
            .collect();
        grammar
    }

    /// The start symbol.
    #[must_use]
    pub fn start(&self) -> NonTerminal {
        self.start
    }

    /// Returns `true` if `symbol` is one of this grammar's terminals.
    #[must_use]
    pub fn is_terminal(&self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::Terminal(c) => self.terminals.contains(&c),
            Symbol::NonTerminal(_) => false,
        }
    }

    /// Returns `true` if `symbol` heads at least one production.
    #[must_use]
    pub fn is_non_terminal(&self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::NonTerminal(nt) => self.non_terminals.contains(&nt),
            Symbol::Terminal(_) => false,
        }
    }

    /// Returns the alternatives of `nt`, in declaration order.
    ///
    /// An empty slice means the grammar has no productions for `nt`.
    #[must_use]
    pub fn productions_for(&self, nt: NonTerminal) -> &[Vec<Symbol>] {
        self.productions
            .iter()
            .find(|(lhs, _)| *lhs == nt)
            .map(|(_, alternatives)| alternatives.as_slice())
            .unwrap_or_default()
    }

    /// Iterates over `(lhs, alternatives)` pairs in declaration order.
    pub fn productions(&self) -> impl Iterator<Item = (NonTerminal, &[Vec<Symbol>])> + '_ {
        self.productions
            .iter()
            .map(|(lhs, alternatives)| (*lhs, alternatives.as_slice()))
    }

    /// The terminal alphabet, sorted.
    #[must_use]
    pub fn terminals(&self) -> &BTreeSet<char> {
        &self.terminals
    }

    /// Maps a character to the grammar symbol it denotes.
    #[must_use]
    pub fn classify(&self, c: char) -> Option<Symbol> {
        if let Some(nt) = NonTerminal::from_label(c) {
            return self.non_terminals.contains(&nt).then_some(Symbol::NonTerminal(nt));
        }
        self.terminals.contains(&c).then_some(Symbol::Terminal(c))
    }

    /// The number of terminals every string derived from `nt` has.
    ///
    /// `None` when `nt` has no productions, its alternatives disagree on
    /// width, or the width is not finite.
    #[must_use]
    pub fn span(&self, nt: NonTerminal) -> Option<usize> {
        self.spans.get(&nt).copied()
    }

    /// Picks the alternative of `nt` whose terminals agree with `target`.
    ///
    /// `target` is the exact slice of the accepted string that `nt` must
    /// yield. Nested non-terminals are stepped over by their span, so only
    /// literal characters are compared. The first agreeing alternative wins.
    #[must_use]
    pub fn select(&self, nt: NonTerminal, target: &str) -> Option<&[Symbol]> {
        let target: Vec<char> = target.chars().collect();
        self.productions_for(nt)
            .iter()
            .find(|rhs| self.agrees(rhs, &target))
            .map(Vec::as_slice)
    }

    fn agrees(&self, rhs: &[Symbol], target: &[char]) -> bool {
        let mut offset = 0;
        for symbol in rhs {
            match symbol {
                Symbol::Terminal(c) => {
                    if target.get(offset) != Some(c) {
                        return false;
                    }
                    offset += 1;
                }
                Symbol::NonTerminal(nt) => match self.span(*nt) {
                    Some(width) => offset += width,
                    None => return false,
                },
            }
        }
        offset == target.len()
    }

    fn measure(&self, nt: NonTerminal, fuel: usize) -> Option<usize> {
        let fuel = fuel.checked_sub(1)?;
        let mut width = None;
        for rhs in self.productions_for(nt) {
            let w = self.measure_rhs(rhs, fuel)?;
            match width {
                None => width = Some(w),
                Some(prev) if prev != w => return None,
                Some(_) => {}
            }
        }
        width
    }

    fn measure_rhs(&self, rhs: &[Symbol], fuel: usize) -> Option<usize> {
        rhs.iter()
            .map(|symbol| match symbol {
                Symbol::Terminal(_) => Some(1),
                Symbol::NonTerminal(nt) => self.measure(*nt, fuel),
            })
            .sum()
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::dates()
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (lhs, alternatives)) in self.productions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{lhs} -> ")?;
            for (j, rhs) in alternatives.iter().enumerate() {
                if j > 0 {
                    write!(f, " | ")?;
                }
                for symbol in rhs {
                    write!(f, "{symbol}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition() {
        let grammar = Grammar::dates();
        for nt in NonTerminal::ALL {
            assert!(grammar.is_non_terminal(nt.into()));
            assert!(!grammar.is_terminal(nt.into()));
        }
        for c in "0123456789/-.".chars() {
            assert!(grammar.is_terminal(Symbol::Terminal(c)), "{c}");
            assert!(!grammar.is_non_terminal(Symbol::Terminal(c)));
        }
        assert!(!grammar.is_terminal(Symbol::Terminal('a')));
        assert_eq!(grammar.terminals().len(), 13);
    }

    #[test]
    fn test_productions_for_unknown_is_empty() {
        let grammar = Grammar::from_table(NonTerminal::S, &[(NonTerminal::S, &["N"])]);
        assert!(grammar.productions_for(NonTerminal::N).is_empty());
        assert!(!grammar.is_non_terminal(NonTerminal::N.into()));
        assert_eq!(grammar.classify('N'), None);
    }

    #[test]
    fn test_classify() {
        let grammar = Grammar::canonical();
        assert_eq!(grammar.classify('M'), Some(Symbol::NonTerminal(NonTerminal::M)));
        assert_eq!(grammar.classify('7'), Some(Symbol::Terminal('7')));
        assert_eq!(grammar.classify('P'), None);
        assert_eq!(grammar.classify(' '), None);
    }

    #[test]
    fn test_spans() {
        let grammar = Grammar::canonical();
        assert_eq!(grammar.span(NonTerminal::S), Some(10));
        assert_eq!(grammar.span(NonTerminal::M), Some(2));
        assert_eq!(grammar.span(NonTerminal::D), Some(2));
        assert_eq!(grammar.span(NonTerminal::Y), Some(4));
        assert_eq!(grammar.span(NonTerminal::Z), Some(1));
    }

    #[test]
    fn test_uneven_span_is_unknown() {
        let grammar = Grammar::from_table(
            NonTerminal::S,
            &[(NonTerminal::S, &["N", "NN"]), (NonTerminal::N, &["1"])],
        );
        assert_eq!(grammar.span(NonTerminal::N), Some(1));
        assert_eq!(grammar.span(NonTerminal::S), None);
    }

    #[test]
    fn test_select_by_leading_characters() {
        let grammar = Grammar::canonical();
        let s = grammar.select(NonTerminal::S, "12-31-2023").unwrap();
        assert_eq!(s.iter().map(|s| s.label()).collect::<String>(), "M-D-Y");

        let d = grammar.select(NonTerminal::D, "31").unwrap();
        assert_eq!(d, &[Symbol::Terminal('3'), Symbol::NonTerminal(NonTerminal::Z)]);

        assert_eq!(
            grammar.select(NonTerminal::V, "2").unwrap(),
            &[Symbol::Terminal('2')]
        );
        assert!(grammar.select(NonTerminal::V, "3").is_none());
        assert!(grammar.select(NonTerminal::M, "2").is_none());
        assert!(grammar.select(NonTerminal::S, "05:12:2023").is_none());
    }

    #[test]
    fn test_display_matches_table() {
        let text = Grammar::dates().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "S -> M/D/Y | M-D-Y | M.D.Y");
        assert_eq!(lines[2], "D -> 0X | 1N | 2N | 3Z");
        assert_eq!(lines[7], "Z -> 0 | 1");
    }
}
