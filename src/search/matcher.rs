//! Type-aware comparison of a raw query string against a scalar.
//!
//! The matcher is pure and total: unparsable or type-incompatible queries
//! simply do not match.

use crate::document::node::Scalar;

/// Maximum absolute difference at which two floats are considered equal.
pub const FLOAT_EPSILON: f64 = 1e-5;

/// Returns true if `query` denotes the same value as `scalar`.
///
/// Typed comparisons ignore surrounding whitespace in `query`; string
/// comparisons do not.
///
/// - integers: `query` must parse as an `i64` and be equal
/// - floats: `query` must parse as an `f64` within [`FLOAT_EPSILON`]
/// - booleans: `query` is true-intent only if it lower-cases to `"true"`,
///   so any other string matches a `false` node
/// - string-like values: exact, case-sensitive equality
/// - null: never matches
///
/// # Example
///
/// ```
/// use serialquill::document::node::Scalar;
/// use serialquill::search::matcher::matches;
///
/// assert!(matches(&Scalar::Integer(42), "42"));
/// assert!(!matches(&Scalar::Integer(42), "42.0"));
/// assert!(matches(&Scalar::Float(3.0000049), "3.000004"));
/// assert!(matches(&Scalar::Boolean(true), "TRUE"));
/// assert!(matches(&Scalar::Boolean(false), "nope"));
/// assert!(!matches(&Scalar::Null, "null"));
/// ```
pub fn matches(scalar: &Scalar, query: &str) -> bool {
    match scalar {
        Scalar::Integer(i) => query.trim().parse::<i64>().map(|q| q == *i).unwrap_or(false),
        Scalar::Float(f) => query
            .trim()
            .parse::<f64>()
            .map(|q| (q - f).abs() < FLOAT_EPSILON)
            .unwrap_or(false),
        Scalar::Boolean(b) => (query.trim().to_lowercase() == "true") == *b,
        Scalar::String(s) => s.as_str() == query,
        Scalar::Null => false,
    }
}
