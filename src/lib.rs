//! # kinexpr
//!
//! kinexpr reads the informal math expressions found in kinematics tables
//! (`2+sin(t1)*-d2`, `atan2(y, x)`, `*(d3, cos(t1))`) and turns them into
//! expression trees that can be evaluated, printed in a canonical form and
//! simplified. Semicolon separated tables of such expressions become matrices
//! of trees, ready to be chained as homogeneous transformations.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::interpreter::registry::Registry;

/// Defines the operator catalog.
///
/// This module declares the closed set of unary and binary operators, their
/// spellings, precedence tiers and the tags used to describe nodes. Every
/// operator name is resolved here once; later stages match on the enums.
///
/// # Responsibilities
/// - Maps operator names and symbols to enum variants.
/// - Defines precedence and commutativity of binary operators.
pub mod ast;
/// Provides the error types for parsing and evaluation.
///
/// This module defines every failure that can be raised while interpreting
/// text, building nodes, evaluating trees or combining matrices. Errors that
/// happen inside a sub-expression are wrapped with the enclosing text and
/// keep the inner failure as their source.
///
/// # Responsibilities
/// - Defines `ParseError` for malformed expressions.
/// - Defines `RuntimeError` for construction, evaluation and matrix failures.
/// - Implements `Display` and `std::error::Error` for both.
pub mod error;
/// Orchestrates parsing, evaluation and simplification.
///
/// This module ties together the lexer, the parser, the node registry, the
/// evaluator, the simplifier and the matrix type.
///
/// # Responsibilities
/// - Coordinates all core components.
/// - Provides the entry points for interpreting expressions and matrices.
pub mod interpreter;
/// General numeric helpers.
///
/// Literal comparison tolerance and locale-invariant decimal parsing.
pub mod util;

/// Controls what [`get_result`] produces.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Interpret the whole input as a `;`/`,` separated matrix.
    pub matrix:   bool,
    /// Substitute bound variables and simplify before printing.
    pub simplify: bool,
    /// Print numeric values instead of expressions.
    pub evaluate: bool,
    /// Values to bind to variables after parsing.
    pub bindings: Vec<(String, f64)>,
}

/// Interprets `source` and returns the printed result.
///
/// Without [`Options::matrix`], every non-blank line of `source` is one
/// expression and produces one output line. With it, the whole source is one
/// matrix.
///
/// # Errors
/// Returns an error if parsing fails, if a binding names a variable that no
/// expression references, or if evaluation meets an unbound variable.
///
/// # Examples
/// ```
/// use kinexpr::{Options, get_result};
///
/// let options = Options { simplify: true,
///                         ..Options::default() };
/// assert_eq!(get_result("1 * x + 0 * y", &options).unwrap(), "x");
///
/// let options = Options { evaluate: true,
///                         bindings: vec![("a".to_string(), 2.0)],
///                         ..Options::default() };
/// assert_eq!(get_result("a ^ 3 - 1", &options).unwrap(), "7");
///
/// // 'b' is never bound.
/// assert!(get_result("a + b", &options).is_err());
/// ```
pub fn get_result(source: &str, options: &Options) -> Result<String, Box<dyn std::error::Error>> {
    let registry = Registry::new();

    if options.matrix {
        let mut matrix = registry.interpret_matrix(source)?;
        bind(&registry, &options.bindings)?;
        if options.simplify {
            matrix = matrix.substitute().simplify();
        }
        if !options.evaluate {
            return Ok(matrix.to_string());
        }
        let rows = matrix.eval()?
                         .iter()
                         .map(|row| row.iter().map(f64::to_string).collect::<Vec<_>>().join(", "))
                         .collect::<Vec<_>>();
        return Ok(format!("[ {} ]", rows.join(" ; ")));
    }

    let nodes = source.lines()
                      .filter(|line| !line.trim().is_empty())
                      .map(|line| registry.interpret_node(line))
                      .collect::<Result<Vec<_>, _>>()?;
    bind(&registry, &options.bindings)?;
    debug!(expressions = nodes.len(), "interpreted source");

    let mut output = Vec::with_capacity(nodes.len());
    for node in &nodes {
        let node = if options.simplify { node.substitute().simplify() } else { node.clone() };
        if options.evaluate {
            output.push(node.eval()?.to_string());
        } else {
            output.push(node.unparse());
        }
    }
    Ok(output.join("\n"))
}

fn bind(registry: &Registry, bindings: &[(String, f64)]) -> Result<(), Box<dyn std::error::Error>> {
    for (name, value) in bindings {
        registry.set_variable(name, *value)?;
    }
    Ok(())
}
