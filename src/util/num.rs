/// Converts an `i64` to the nearest `f64`.
///
/// Integers beyond `2^53` in magnitude round to the nearest representable
/// double, the same way a host language without a separate integer type
/// would store them.
///
/// ## Example
/// ```
/// use playscript::util::num::i64_to_f64;
///
/// assert_eq!(i64_to_f64(42), 42.0);
/// assert_eq!(i64_to_f64(-7), -7.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}
