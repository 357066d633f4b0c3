use std::{
    fmt,
    ops::{Index, Range},
};

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        node::Node,
        registry::{NodeKind, Registry},
    },
    util::num::is_zero,
};

/// A non-empty rectangular grid of expression nodes.
///
/// Every cell belongs to the same registry. Operations never modify a matrix;
/// they return a new one whose cells share the untouched subtrees.
///
/// ## Usage
/// ```
/// use kinexpr::interpreter::registry::Registry;
///
/// let registry = Registry::new();
/// let rotation = registry.interpret_matrix("cos(t), -sin(t); sin(t), cos(t)").unwrap();
/// let point = registry.interpret_matrix("x; 0").unwrap();
///
/// let moved = rotation.dot_product(&point).unwrap();
/// assert_eq!(moved.to_string(), "[ (cos(t) * x) ; (sin(t) * x) ]");
/// ```
#[derive(Clone)]
pub struct Matrix {
    registry: Registry,
    rows:     usize,
    cols:     usize,
    cells:    Vec<Node>,
}

impl Matrix {
    /// Builds a matrix from rows of nodes.
    ///
    /// # Errors
    /// - `EmptyMatrix` if there are no rows or the rows are empty.
    /// - `RaggedMatrix` if the rows have different lengths.
    /// - `IncompatibleRegistry` if a cell belongs to another registry.
    pub fn new(registry: &Registry, rows: Vec<Vec<Node>>) -> EvalResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(RuntimeError::EmptyMatrix);
        }
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(RuntimeError::RaggedMatrix { expected: cols,
                                                        found: values.len(),
                                                        row });
            }
            for node in values {
                registry.check(node)?;
            }
        }
        Ok(Self::from_grid(registry.clone(), rows))
    }

    /// Builds a matrix from rows that are known to be rectangular, non-empty
    /// and owned by `registry`.
    pub(crate) fn from_grid(registry: Registry, rows: Vec<Vec<Node>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        Self { registry,
               rows: rows.len(),
               cols,
               cells: rows.into_iter().flatten().collect() }
    }

    /// Builds a matrix of literal leaves.
    ///
    /// # Errors
    /// The same shape errors as [`Matrix::new`].
    ///
    /// ## Example
    /// ```
    /// use kinexpr::interpreter::{matrix::Matrix, registry::Registry};
    ///
    /// let registry = Registry::new();
    /// let parsed = registry.interpret_matrix("1, 2; 3, 4").unwrap();
    /// let built = Matrix::from_literals(&registry, &[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(parsed, built);
    /// ```
    pub fn from_literals<R: AsRef<[f64]>>(registry: &Registry, values: &[R]) -> EvalResult<Self> {
        let rows = values.iter()
                         .map(|row| {
                             row.as_ref()
                                .iter()
                                .map(|&value| registry.literal(value))
                                .collect()
                         })
                         .collect();
        Self::new(registry, rows)
    }

    /// A `size` by `size` matrix with ones on the diagonal and zeros
    /// elsewhere.
    ///
    /// # Errors
    /// `EmptyMatrix` if `size` is zero.
    pub fn identity(registry: &Registry, size: usize) -> EvalResult<Self> {
        let rows = (0..size).map(|i| {
                                (0..size).map(|j| registry.literal(if i == j { 1.0 } else { 0.0 }))
                                         .collect()
                            })
                            .collect();
        Self::new(registry, rows)
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// The registry owning every cell.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The cell at `row`, `col`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Node> {
        (row < self.rows && col < self.cols).then(|| &self.cells[row * self.cols + col])
    }

    /// Iterates over the rows as slices.
    pub fn row_slices(&self) -> impl Iterator<Item = &[Node]> {
        self.cells.chunks(self.cols)
    }

    /// Matrix product, building each cell as a sum of products.
    ///
    /// Products with a literal zero factor are replaced by that zero, and
    /// zero terms after the first are left out of the sum, so sparse
    /// transformation matrices stay readable without a simplification pass.
    ///
    /// # Errors
    /// - `IncompatibleRegistry` if the matrices belong to different
    ///   registries.
    /// - `DimensionMismatch` if `self.cols() != other.rows()`.
    pub fn dot_product(&self, other: &Self) -> EvalResult<Self> {
        self.check_registry(other)?;
        if self.cols != other.rows {
            return Err(self.mismatch("dot product", other));
        }

        let mut rows = Vec::with_capacity(self.rows);
        for row in 0..self.rows {
            let mut values = Vec::with_capacity(other.cols);
            for col in 0..other.cols {
                values.push(self.multiply_and_sum(other, row, col)?);
            }
            rows.push(values);
        }
        Ok(Self::from_grid(self.registry.clone(), rows))
    }

    fn multiply_and_sum(&self, other: &Self, row: usize, col: usize) -> EvalResult<Node> {
        let is_zero_literal = |node: &Node| node.literal_value().is_some_and(is_zero);
        let mut total: Option<Node> = None;

        for i in 0..self.cols {
            let l = &self[(row, i)];
            let r = &other[(i, col)];
            let term = if is_zero_literal(l) {
                l.clone()
            } else if is_zero_literal(r) {
                r.clone()
            } else {
                self.registry.binary(BinaryOperator::Mul, l, r)?
            };

            total = match total {
                None => Some(term),
                Some(sum) if is_zero_literal(&term) => Some(sum),
                Some(sum) => Some(self.registry.binary(BinaryOperator::Plus, &sum, &term)?),
            };
        }

        Ok(total.unwrap_or_else(|| self.registry.literal(0.0)))
    }

    /// Cell-wise sum.
    ///
    /// # Errors
    /// - `IncompatibleRegistry` if the matrices belong to different
    ///   registries.
    /// - `DimensionMismatch` if the shapes differ.
    pub fn sum(&self, other: &Self) -> EvalResult<Self> {
        self.check_registry(other)?;
        if (self.rows, self.cols) != (other.rows, other.cols) {
            return Err(self.mismatch("sum", other));
        }

        let cells = self.cells
                        .iter()
                        .zip(&other.cells)
                        .map(|(l, r)| self.registry.binary(BinaryOperator::Plus, l, r))
                        .collect::<EvalResult<Vec<_>>>()?;
        Ok(self.with_cells(self.rows, self.cols, cells))
    }

    /// Multiplies every cell by a literal `scalar`.
    #[must_use]
    pub fn scale(&self, scalar: f64) -> Self {
        let factor = self.registry.literal(scalar);
        let cells = self.cells.iter().map(|cell| self.times(&factor, cell)).collect();
        self.with_cells(self.rows, self.cols, cells)
    }

    /// Swaps rows and columns.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let cells = (0..self.cols).flat_map(|col| (0..self.rows).map(move |row| (row, col)))
                                  .map(|at| self[at].clone())
                                  .collect();
        self.with_cells(self.cols, self.rows, cells)
    }

    /// Copies the cells within the half-open `rows` and `cols` ranges.
    ///
    /// # Errors
    /// `IndexOutOfBounds` if a range is empty or reaches past the matrix.
    ///
    /// ## Example
    /// ```
    /// use kinexpr::interpreter::registry::Registry;
    ///
    /// let registry = Registry::new();
    /// let frame = registry.interpret_matrix("1, 0, 0, dx; 0, 1, 0, dy; 0, 0, 1, dz; 0, 0, 0, 1")
    ///                     .unwrap();
    /// let translation = frame.sub_matrix(0..3, 3..4).unwrap();
    /// assert_eq!(translation.to_string(), "[ dx ; dy ; dz ]");
    /// assert!(frame.sub_matrix(2..5, 0..1).is_err());
    /// ```
    pub fn sub_matrix(&self, rows: Range<usize>, cols: Range<usize>) -> EvalResult<Self> {
        check_range(&rows, self.rows)?;
        check_range(&cols, self.cols)?;

        let cells = rows.clone()
                        .flat_map(|row| cols.clone().map(move |col| (row, col)))
                        .map(|at| self[at].clone())
                        .collect();
        Ok(self.with_cells(rows.len(), cols.len(), cells))
    }

    /// Simplifies every cell.
    #[must_use]
    pub fn simplify(&self) -> Self {
        self.map(Node::simplify)
    }

    /// Replaces bound variables by their values in every cell.
    #[must_use]
    pub fn substitute(&self) -> Self {
        self.map(Node::substitute)
    }

    /// Evaluates every cell, row by row.
    ///
    /// # Errors
    /// `NoBoundValue` if any cell references an unbound variable.
    pub fn eval(&self) -> EvalResult<Vec<Vec<f64>>> {
        self.row_slices()
            .map(|row| row.iter().map(Node::eval).collect::<EvalResult<Vec<_>>>())
            .collect()
    }

    fn map(&self, f: impl Fn(&Node) -> Node) -> Self {
        self.with_cells(self.rows, self.cols, self.cells.iter().map(f).collect())
    }

    fn with_cells(&self, rows: usize, cols: usize, cells: Vec<Node>) -> Self {
        Self { registry: self.registry.clone(),
               rows,
               cols,
               cells }
    }

    fn times(&self, factor: &Node, cell: &Node) -> Node {
        self.registry.push(NodeKind::Binary { op:  BinaryOperator::Mul,
                                              lhs: factor.id,
                                              rhs: cell.id, })
    }

    fn check_registry(&self, other: &Self) -> EvalResult<()> {
        if self.registry.same_as(&other.registry) {
            Ok(())
        } else {
            Err(RuntimeError::IncompatibleRegistry)
        }
    }

    fn mismatch(&self, operation: &'static str, other: &Self) -> RuntimeError {
        RuntimeError::DimensionMismatch { operation,
                                          left: (self.rows, self.cols),
                                          right: (other.rows, other.cols) }
    }
}

fn check_range(range: &Range<usize>, len: usize) -> EvalResult<()> {
    if range.start < range.end && range.end <= len {
        Ok(())
    } else {
        Err(RuntimeError::IndexOutOfBounds { range: (range.start, range.end),
                                             len })
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Node;

    /// # Panics
    /// If the position is outside the matrix.
    fn index(&self, (row, col): (usize, usize)) -> &Node {
        assert!(row < self.rows && col < self.cols,
                "index ({row}, {col}) out of bounds for a {}x{} matrix",
                self.rows,
                self.cols);
        &self.cells[row * self.cols + col]
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        (self.rows, self.cols) == (other.rows, other.cols) && self.cells == other.cells
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ")?;
        for (i, row) in self.row_slices().enumerate() {
            if i > 0 {
                write!(f, " ; ")?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{cell}")?;
            }
        }
        write!(f, " ]")
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix{self}")
    }
}
