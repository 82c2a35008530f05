//! Validation, derivations and parse trees for a calendar-token grammar.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::multiple_crate_versions)]

/// The grammar model: symbols, productions and consistency checks.
///
/// Everything else in the crate reads the grammar through this module, so the
/// production table it holds is the single definition of the language.
pub mod grammar;

/// Membership checks for input strings.
///
/// Validation decides whether a string belongs to the language before any
/// derivation is attempted, and says why when it does not.
pub mod validate;

/// Ordered parse trees and their layout for drawing.
pub mod tree;

/// Leftmost and rightmost derivations.
pub mod derive;

/// Serialisable bundles of validation and derivation results.
pub mod report;

pub use derive::{derive, leftmost, rightmost, Derivation, DerivationError, Order, Rewrite};
pub use grammar::{check, Grammar, GrammarError, NonTerminal, Separator, Symbol};
pub use report::{DerivationReport, Report, TreeReport};
pub use tree::layout::{layout, Layout, LayoutConfig, Placement};
pub use tree::Node;
pub use validate::{explain, recognize, validate, DateFields, Field, Rejection, ShapeMismatch};
