/// Operator precedence tiers used while resolving infix chains.
///
/// Higher tiers bind tighter. Operators inside one tier associate to the left.
/// Prefix `-` binds tighter than every tier and is resolved with the operand.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// `+` and `-`
    Additive,
    /// `*`, `/` and `%`
    Multiplicative,
    /// `^`
    Exponent,
}

/// Number of operands an operator takes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Arity {
    /// One operand, written `op(a)` or `-a`.
    Unary,
    /// Two operands, written `a op b` or `op(a, b)`.
    Binary,
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unary => write!(f, "unary"),
            Self::Binary => write!(f, "binary"),
        }
    }
}

/// Represents a unary operator.
///
/// The catalog is closed: parsing resolves names through
/// [`UnaryOperator::from_name`] once, and every later stage matches on the
/// variant exhaustively.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-a`).
    Negate,
    /// Sine (`sin(a)`).
    Sin,
    /// Cosine (`cos(a)`).
    Cos,
    /// Tangent (`tan(a)`).
    Tan,
    /// Arc sine (`asin(a)`).
    Asin,
    /// Arc cosine (`acos(a)`).
    Acos,
    /// Arc tangent (`atan(a)`).
    Atan,
}

/// Lookup table for unary operators. Each entry lists every spelling that
/// resolves to the operator.
const UNARY_CATALOG: [(UnaryOperator, &[&str]); 7] = [(UnaryOperator::Negate, &["-", "negate"]),
                                                      (UnaryOperator::Sin, &["sin"]),
                                                      (UnaryOperator::Cos, &["cos"]),
                                                      (UnaryOperator::Tan, &["tan"]),
                                                      (UnaryOperator::Asin, &["asin"]),
                                                      (UnaryOperator::Acos, &["acos"]),
                                                      (UnaryOperator::Atan, &["atan"])];

impl UnaryOperator {
    /// Resolves an operator symbol or name (`"-"`, `"negate"`, `"sin"`, ...).
    ///
    /// Returns `None` for anything outside the catalog. Lookup is
    /// case-sensitive.
    ///
    /// ## Example
    /// ```
    /// use kinexpr::ast::UnaryOperator;
    ///
    /// assert_eq!(UnaryOperator::from_name("-"), Some(UnaryOperator::Negate));
    /// assert_eq!(UnaryOperator::from_name("acos"), Some(UnaryOperator::Acos));
    /// assert_eq!(UnaryOperator::from_name("atan2"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        UNARY_CATALOG.iter()
                     .find(|(_, spellings)| spellings.contains(&name))
                     .map(|(op, _)| *op)
    }

    /// The canonical name, as used in printed calls.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Negate => "negate",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
        }
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            _ => write!(f, "{}", self.name()),
        }
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Plus,
    /// Subtraction (`-`)
    Minus,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Floating-point remainder (`%`)
    Remainder,
    /// Exponentiation (`^`)
    Exp,
    /// Two-argument arc tangent, `atan2(y, x)`
    Atan2,
}

const BINARY_CATALOG: [(BinaryOperator, &[&str]); 7] = [(BinaryOperator::Plus, &["+", "plus"]),
                                                        (BinaryOperator::Minus, &["-", "minus"]),
                                                        (BinaryOperator::Mul, &["*", "mul"]),
                                                        (BinaryOperator::Div, &["/", "div"]),
                                                        (BinaryOperator::Remainder,
                                                         &["%", "remainder"]),
                                                        (BinaryOperator::Exp, &["^", "exp"]),
                                                        (BinaryOperator::Atan2, &["atan2"])];

impl BinaryOperator {
    /// Resolves an operator symbol or name (`"*"`, `"mul"`, `"atan2"`, ...).
    ///
    /// This is the lookup used for call syntax, so `*(2, 1)` and
    /// `atan2(1, 2)` both resolve here.
    ///
    /// ## Example
    /// ```
    /// use kinexpr::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::from_name("*"), Some(BinaryOperator::Mul));
    /// assert_eq!(BinaryOperator::from_name("atan2"), Some(BinaryOperator::Atan2));
    /// assert_eq!(BinaryOperator::from_name("sin"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        BINARY_CATALOG.iter()
                      .find(|(_, spellings)| spellings.contains(&name))
                      .map(|(op, _)| *op)
    }

    /// Resolves an infix symbol. Only operators with an infix spelling are
    /// returned; `atan2` has none.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::from_name(symbol).filter(|op| op.symbol() == Some(symbol))
    }

    /// The infix symbol, if the operator has one.
    #[must_use]
    pub const fn symbol(self) -> Option<&'static str> {
        match self {
            Self::Plus => Some("+"),
            Self::Minus => Some("-"),
            Self::Mul => Some("*"),
            Self::Div => Some("/"),
            Self::Remainder => Some("%"),
            Self::Exp => Some("^"),
            Self::Atan2 => None,
        }
    }

    /// The canonical name (`plus`, `mul`, `atan2`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Remainder => "remainder",
            Self::Exp => "exp",
            Self::Atan2 => "atan2",
        }
    }

    /// Precedence tier when written infix.
    #[must_use]
    pub const fn precedence(self) -> Precedence {
        match self {
            Self::Plus | Self::Minus => Precedence::Additive,
            Self::Mul | Self::Div | Self::Remainder | Self::Atan2 => Precedence::Multiplicative,
            Self::Exp => Precedence::Exponent,
        }
    }

    /// Whether operand order is irrelevant (`+` and `*`).
    ///
    /// Structural equality accepts swapped operands for these operators.
    #[must_use]
    pub const fn is_commutative(self) -> bool {
        matches!(self, Self::Plus | Self::Mul)
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol().unwrap_or(self.name()))
    }
}

/// The tag of an expression node.
///
/// Leaves are either named variables or literals; every other tag carries the
/// operator that determines the node's arity.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NodeTag {
    /// A named variable leaf.
    Name,
    /// A numeric literal leaf.
    Literal,
    /// A node with one child.
    Unary(UnaryOperator),
    /// A node with two children.
    Binary(BinaryOperator),
}

impl NodeTag {
    /// Number of children a node with this tag owns.
    #[must_use]
    pub const fn child_count(self) -> usize {
        match self {
            Self::Name | Self::Literal => 0,
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
        }
    }
}
