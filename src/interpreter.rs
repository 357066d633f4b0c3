/// The evaluator module computes numeric values of expression trees.
///
/// Evaluation walks a tree bottom-up, reading bound variable values from the
/// owning registry and dispatching each operator to its arithmetic or
/// trigonometric primitive.
///
/// # Responsibilities
/// - Evaluates literal, variable, unary and binary nodes.
/// - Reports variables that have no bound value.
pub mod evaluator;
/// The lexer module splits expression text into character groups.
///
/// Groups are identifiers, operator symbols, numeric literals and whole
/// balanced parenthesis groups. Two merges make the groups usable by the
/// parser: a name followed by a group becomes a call, and a sign in unary
/// position is fused onto the following number.
///
/// # Responsibilities
/// - Classifies and extracts lexical units from whitespace-stripped text.
/// - Finds balanced parenthesis groups.
/// - Reports unrecognized characters and unbalanced parentheses.
pub mod lexer;
/// The matrix module holds rectangular grids of expression nodes.
///
/// Matrices are what the string interface produces for `;`/`,` separated
/// tables, and they support the handful of linear-algebra operations used to
/// chain homogeneous transformations.
pub mod matrix;
/// The node module defines the expression tree handle.
///
/// A [`node::Node`] is an index into its registry's arena plus a handle to
/// that registry. It provides accessors, canonical printing and structural
/// equality.
pub mod node;
/// The parser module turns strings into expression trees.
///
/// It classifies text as a literal, a name, an infix chain, or a
/// parenthesized (possibly prefixed) call, and resolves chains by precedence
/// climbing.
///
/// # Responsibilities
/// - Interprets single expressions, comma separated lists and matrices.
/// - Validates syntax and wraps nested failures with their context.
pub mod parser;
/// The registry module owns all nodes of one expression universe.
///
/// It interns variable leaves by name, stores their bound values, and offers
/// the constructors used by both the parser and programmatic callers.
pub mod registry;
/// Fixed-point algebraic simplification.
pub mod simplify;
