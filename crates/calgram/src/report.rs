//! A serialisable bundle of everything a front end displays for one input.
//!
//! The report is plain data: strings, flags and a recursive tree of labels.
//! It derives [`Facet`] so it can be emitted as JSON with [`facet_json`].

use crate::derive::{derive, Derivation, Order};
use crate::grammar::{Grammar, Symbol};
use crate::tree::Node;
use crate::validate::{explain, recognize};
use facet::Facet;

/// A parse tree reduced to labels.
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct TreeReport {
    /// The node's symbol, as printed.
    pub label: String,
    /// Whether the node is a terminal.
    pub terminal: bool,
    /// Children in left-to-right order.
    pub children: Vec<TreeReport>,
}

impl From<&Node> for TreeReport {
    fn from(node: &Node) -> Self {
        Self {
            label: node.label().to_string(),
            terminal: matches!(node.symbol(), Symbol::Terminal(_)),
            children: node.children().iter().map(TreeReport::from).collect(),
        }
    }
}

/// One derivation, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct DerivationReport {
    /// `"leftmost"` or `"rightmost"`.
    pub order: String,
    /// Sentential forms from the start symbol to the input.
    pub steps: Vec<String>,
    /// The parse tree.
    pub tree: TreeReport,
}

impl From<&Derivation> for DerivationReport {
    fn from(derivation: &Derivation) -> Self {
        Self {
            order: derivation.order.to_string(),
            steps: derivation.steps.clone(),
            tree: TreeReport::from(&derivation.tree),
        }
    }
}

/// Validation outcome, explanation and both derivations of one input.
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct Report {
    /// The input, exactly as given.
    pub input: String,
    /// Whether the input is in the language.
    pub valid: bool,
    /// Why the input was rejected, when it was.
    pub rejection: Option<String>,
    /// Which production accounts for each field; empty when invalid.
    pub explanation: Vec<String>,
    /// The grammar in arrow notation.
    pub grammar: String,
    /// The leftmost derivation, when valid.
    pub leftmost: Option<DerivationReport>,
    /// The rightmost derivation, when valid.
    pub rightmost: Option<DerivationReport>,
}

impl Report {
    /// Validates and derives `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let (valid, rejection, explanation) = match recognize(input) {
            Ok(fields) => (true, None, explain(&fields)),
            Err(reason) => (false, Some(reason.to_string()), Vec::new()),
        };
        let mut report = Self {
            input: input.to_owned(),
            valid,
            rejection,
            explanation,
            grammar: Grammar::canonical().to_string(),
            leftmost: None,
            rightmost: None,
        };
        if valid {
            report.leftmost = report.record(input, Order::Leftmost);
            report.rightmost = report.record(input, Order::Rightmost);
        }
        report
    }

    fn record(&mut self, input: &str, order: Order) -> Option<DerivationReport> {
        match derive(input, order) {
            Ok(derivation) => Some(DerivationReport::from(&derivation)),
            Err(e) => {
                log::error!("{order} derivation of accepted input {input:?} failed: {e}");
                self.rejection = Some(e.to_string());
                None
            }
        }
    }

    /// Serialises the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        facet_json::to_string(self)
    }
}
