/// Numeric conversion helpers.
///
/// The one lossy `i64` to `f64` conversion value coercion relies on, kept in
/// a single place so the precision loss is explicit.
pub mod num;
