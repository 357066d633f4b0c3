/// Absolute tolerance used when comparing literal values.
///
/// Absorbs the round-off produced by constant folding and trigonometric
/// evaluation. It is not a relative comparison and is only meaningful for
/// values of moderate magnitude.
pub const LITERAL_TOLERANCE: f64 = 1e-6;

/// Returns `true` when `a` and `b` differ by less than [`LITERAL_TOLERANCE`].
///
/// `NaN` never compares equal, not even to itself.
///
/// ## Example
/// ```
/// use kinexpr::util::num::approx_eq;
///
/// assert!(approx_eq(0.1 + 0.2, 0.3));
/// assert!(!approx_eq(1.0, 1.001));
/// assert!(!approx_eq(f64::NAN, f64::NAN));
/// ```
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < LITERAL_TOLERANCE
}

/// Returns `true` when `value` is zero within [`LITERAL_TOLERANCE`].
#[must_use]
pub fn is_zero(value: f64) -> bool {
    approx_eq(value, 0.0)
}

/// Returns `true` when `value` is one within [`LITERAL_TOLERANCE`].
#[must_use]
pub fn is_one(value: f64) -> bool {
    approx_eq(value, 1.0)
}

/// Parses a locale-invariant decimal literal.
///
/// Accepted forms are an optional sign, digits, and at most one decimal
/// separator (`.` or `,`) followed by at least one digit. Identifiers such
/// as `inf` or `NaN` are not numbers, so a non-finite literal does not read
/// back from its printed form.
///
/// ## Example
/// ```
/// use kinexpr::util::num::parse_decimal;
///
/// assert_eq!(parse_decimal("-1,5"), Some(-1.5));
/// assert_eq!(parse_decimal(".25"), Some(0.25));
/// assert_eq!(parse_decimal("1e5"), None);
/// assert_eq!(parse_decimal("x"), None);
/// assert_eq!(parse_decimal("inf"), None);
/// ```
#[must_use]
pub fn parse_decimal(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once(['.', ',']) {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let valid = match fraction {
        Some(fraction) => !fraction.is_empty() && all_digits(fraction) && all_digits(whole),
        None => !whole.is_empty() && all_digits(whole),
    };
    if !valid {
        return None;
    }

    text.replace(',', ".").parse().ok()
}
