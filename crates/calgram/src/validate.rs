//! Membership checks for calendar-like tokens.
//!
//! The accepted language is small enough to characterise directly: ten
//! characters, two identical separators drawn from `/`, `-` and `.`, and three
//! fixed-width fields whose leading digit constrains the one after it. Fields
//! are shape-checked only; `02/31/2023` is accepted even though no such date
//! exists.
//!
//! [`validate`] is the boolean contract. [`recognize`] returns the same
//! decision with either the split fields or the reason for rejection.

use crate::grammar::{Grammar, NonTerminal, Separator, Symbol};
use std::fmt;
use thiserror::Error;

/// Number of characters in every accepted token.
pub const TOKEN_LEN: usize = 10;

const SEPARATOR_POSITIONS: [usize; 2] = [2, 5];

/// The three fields of an accepted token, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFields<'a> {
    /// The separator used at both positions.
    pub separator: Separator,
    /// The two-character month field.
    pub month: &'a str,
    /// The two-character day field.
    pub day: &'a str,
    /// The four-digit year field.
    pub year: &'a str,
}

/// Names one of the three fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The leading two-character field.
    Month,
    /// The middle two-character field.
    Day,
    /// The trailing four-digit field.
    Year,
}

impl Field {
    /// The non-terminal that derives this field.
    #[must_use]
    pub fn non_terminal(self) -> NonTerminal {
        match self {
            Field::Month => NonTerminal::M,
            Field::Day => NonTerminal::D,
            Field::Year => NonTerminal::Y,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Month => "month",
            Field::Day => "day",
            Field::Year => "year",
        })
    }
}

/// The input does not have the coarse shape of a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeMismatch {
    /// Wrong number of characters.
    #[error("expected 10 characters, found {0}")]
    Length(usize),

    /// A character that is not allowed at its position.
    #[error("unexpected character {found:?} at position {position}")]
    Character {
        /// Zero-based character offset.
        position: usize,
        /// The offending character.
        found: char,
    },

    /// The two separators differ.
    #[error("separators '{first}' and '{second}' differ")]
    MixedSeparators {
        /// The separator after the month.
        first: char,
        /// The separator after the day.
        second: char,
    },
}

/// Why an input is not in the language.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Wrong length, a disallowed character, or inconsistent separators.
    #[error("shape mismatch: {0}")]
    Shape(#[from] ShapeMismatch),

    /// The shape is right but a field breaks its finer rule.
    #[error("{field} field '{value}' is not derivable from {}", .field.non_terminal())]
    Field {
        /// The failing field.
        field: Field,
        /// Its text.
        value: String,
    },
}

/// Returns `true` if `input` is in the language.
///
/// No trimming is performed; surrounding whitespace makes the input invalid.
#[must_use]
pub fn validate(input: &str) -> bool {
    recognize(input).is_ok()
}

/// Splits an accepted token into its fields.
///
/// # Errors
///
/// Returns a [`Rejection`] describing the first rule `input` breaks.
pub fn recognize(input: &str) -> Result<DateFields<'_>, Rejection> {
    let chars: Vec<char> = input.chars().collect();
    if chars.len() != TOKEN_LEN {
        return Err(ShapeMismatch::Length(chars.len()).into());
    }

    for (position, &found) in chars.iter().enumerate() {
        let allowed = if SEPARATOR_POSITIONS.contains(&position) {
            Separator::from_char(found).is_some()
        } else {
            found.is_ascii_digit()
        };
        if !allowed {
            return Err(ShapeMismatch::Character { position, found }.into());
        }
    }

    let [first, second] = SEPARATOR_POSITIONS.map(|position| chars[position]);
    if first != second {
        return Err(ShapeMismatch::MixedSeparators { first, second }.into());
    }
    let separator = Separator::from_char(first).ok_or(ShapeMismatch::Character {
        position: SEPARATOR_POSITIONS[0],
        found: first,
    })?;

    // Every character is ASCII past this point, so byte slicing is exact.
    let fields = DateFields {
        separator,
        month: &input[0..2],
        day: &input[3..5],
        year: &input[6..10],
    };

    if !month_shape(fields.month) {
        return Err(Rejection::Field {
            field: Field::Month,
            value: fields.month.to_owned(),
        });
    }
    if !day_shape(fields.day) {
        return Err(Rejection::Field {
            field: Field::Day,
            value: fields.day.to_owned(),
        });
    }
    Ok(fields)
}

fn month_shape(month: &str) -> bool {
    matches!(
        month.as_bytes(),
        [b'0', b'1'..=b'9'] | [b'1', b'0'..=b'2']
    )
}

fn day_shape(day: &str) -> bool {
    matches!(
        day.as_bytes(),
        [b'0', b'1'..=b'9'] | [b'1' | b'2', b'0'..=b'9'] | [b'3', b'0' | b'1']
    )
}

/// Describes which production accounts for each field of an accepted token.
///
/// ```text
/// S -> M/D/Y (using '/' separator)
/// Month part (05):
///   M -> 0X where X = 5
/// Day part (12):
///   D -> 1N where N = 2
/// Year part (2023):
///   Y -> NNNN where N = 2, 0, 2, 3
/// ```
#[must_use]
pub fn explain(fields: &DateFields<'_>) -> Vec<String> {
    let grammar = Grammar::canonical();
    let sep = fields.separator.as_char();
    let mut lines = vec![format!("S -> M{sep}D{sep}Y (using '{sep}' separator)")];

    for (field, text) in [(Field::Month, fields.month), (Field::Day, fields.day)] {
        lines.push(format!("{} part ({text}):", capitalised(field)));
        if let Some(line) = rule_line(grammar, field.non_terminal(), text) {
            lines.push(line);
        }
    }

    let digits: Vec<String> = fields.year.chars().map(String::from).collect();
    lines.push(format!("Year part ({}):", fields.year));
    lines.push(format!("  Y -> NNNN where N = {}", digits.join(", ")));
    lines
}

fn rule_line(grammar: &Grammar, nt: NonTerminal, text: &str) -> Option<String> {
    let rhs = grammar.select(nt, text)?;
    let inner = rhs.iter().find_map(|symbol| symbol.as_non_terminal())?;
    let shown: String = rhs.iter().copied().map(Symbol::label).collect();
    Some(format!("  {nt} -> {shown} where {inner} = {}", text.get(1..)?))
}

fn capitalised(field: Field) -> &'static str {
    match field {
        Field::Month => "Month",
        Field::Day => "Day",
        Field::Year => "Year",
    }
}
