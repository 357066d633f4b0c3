/// Numeric helpers.
///
/// This module holds the fixed tolerance used to compare literal leaves, the
/// predicates the simplifier uses to recognise literal zero and one, and the
/// locale-invariant decimal parser.
pub mod num;
