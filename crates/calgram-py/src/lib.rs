//! Python bindings for calgram.
//!
//! The extension module `_calgram` exposes validation, both derivation orders
//! and the JSON report, so a Python front end can draw the results without
//! reimplementing the grammar.

use calgram::{Derivation, DerivationError, Grammar, Node, Order, Report, Symbol};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// A parse tree node as seen from Python.
#[pyclass(name = "Node", module = "calgram", frozen)]
#[derive(Clone)]
struct PyNode {
    /// The node's label, a single character.
    #[pyo3(get)]
    value: String,
    /// Whether the label is a terminal character.
    #[pyo3(get)]
    terminal: bool,
    /// Child nodes, left to right.
    #[pyo3(get)]
    children: Vec<PyNode>,
}

#[pymethods]
impl PyNode {
    /// The leaf labels concatenated left to right.
    fn yield_string(&self) -> String {
        if self.children.is_empty() {
            return self.value.clone();
        }
        self.children.iter().map(PyNode::yield_string).collect()
    }

    fn __repr__(&self) -> String {
        format!("Node({:?}, children={})", self.value, self.children.len())
    }
}

impl From<&Node> for PyNode {
    fn from(node: &Node) -> Self {
        Self {
            value: node.label().to_string(),
            terminal: matches!(node.symbol(), Symbol::Terminal(_)),
            children: node.children().iter().map(PyNode::from).collect(),
        }
    }
}

fn into_py_result(result: Result<Derivation, DerivationError>) -> PyResult<(Vec<String>, PyNode)> {
    let derivation = result.map_err(|e| PyValueError::new_err(e.to_string()))?;
    let tree = PyNode::from(&derivation.tree);
    Ok((derivation.steps, tree))
}

/// Returns `True` if `input` is in the language.
#[pyfunction]
fn validate(input: &str) -> bool {
    calgram::validate(input)
}

/// Returns `(steps, tree)` for the leftmost derivation of `input`.
///
/// Raises `ValueError` if `input` is not in the language.
#[pyfunction]
fn leftmost_derivation(input: &str) -> PyResult<(Vec<String>, PyNode)> {
    into_py_result(calgram::derive(input, Order::Leftmost))
}

/// Returns `(steps, tree)` for the rightmost derivation of `input`.
///
/// Raises `ValueError` if `input` is not in the language.
#[pyfunction]
fn rightmost_derivation(input: &str) -> PyResult<(Vec<String>, PyNode)> {
    into_py_result(calgram::derive(input, Order::Rightmost))
}

/// The grammar in arrow notation, one rule per line.
#[pyfunction]
fn grammar_text() -> String {
    Grammar::canonical().to_string()
}

/// The full validation and derivation report for `input`, as JSON.
#[pyfunction]
fn report_json(input: &str) -> String {
    Report::new(input).to_json()
}

#[pymodule]
fn _calgram(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyNode>()?;
    m.add_function(wrap_pyfunction!(validate, m)?)?;
    m.add_function(wrap_pyfunction!(leftmost_derivation, m)?)?;
    m.add_function(wrap_pyfunction!(rightmost_derivation, m)?)?;
    m.add_function(wrap_pyfunction!(grammar_text, m)?)?;
    m.add_function(wrap_pyfunction!(report_json, m)?)?;
    Ok(())
}
