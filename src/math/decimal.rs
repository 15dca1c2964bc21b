use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::InputError;

/// Converts an approximate coordinate to an exact decimal through its
/// shortest round-trip text, so `45.05_f64` becomes exactly `45.05`.
///
/// # Errors
///
/// - `InputError::NonFiniteCoordinate` for NaN or infinite values
/// - `InputError::Unparseable` when the value does not fit a `Decimal`
pub fn exact_from_f64(axis: &'static str, value: f64) -> Result<Decimal, InputError> {
    if !value.is_finite() {
        return Err(InputError::NonFiniteCoordinate { axis, value });
    }
    let text = value.to_string();
    Decimal::from_str(&text)
        .map(|d| d.normalize())
        .map_err(|_| InputError::Unparseable { value: text })
}

/// Smallest integer `n` such that `n * step >= offset`. `step` must be positive.
#[must_use]
pub fn ceil_steps(offset: Decimal, step: Decimal) -> Decimal {
    (offset / step).ceil()
}

/// Reports whether `value` is an integer multiple of `step` away from `origin`.
#[must_use]
pub fn is_on_lattice(value: Decimal, origin: Decimal, step: Decimal) -> bool {
    ((value - origin) % step).is_zero()
}
