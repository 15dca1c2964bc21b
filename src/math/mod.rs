pub mod decimal;

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// 2D point with exact decimal coordinates.
pub type Point2 = nalgebra::Point2<Decimal>;

/// Creates a point, normalizing both coordinates so equal values print alike.
#[must_use]
pub fn point(x: Decimal, y: Decimal) -> Point2 {
    Point2::new(x.normalize(), y.normalize())
}

/// Orders points by `(y, x)`, the output order of a support plan.
#[must_use]
pub fn cmp_yx(a: &Point2, b: &Point2) -> Ordering {
    a.y.cmp(&b.y).then_with(|| a.x.cmp(&b.x))
}

/// Returns the candidate closest to `target`.
///
/// Ties resolve to the earliest candidate in slice order.
#[must_use]
pub fn nearest(candidates: &[Decimal], target: Decimal) -> Option<Decimal> {
    candidates
        .iter()
        .copied()
        .min_by_key(|candidate| (*candidate - target).abs())
}

#[derive(Serialize)]
struct XyRecord<'a> {
    x: &'a Decimal,
    y: &'a Decimal,
}

/// Serializes a point as an `{x, y}` object.
///
/// # Errors
///
/// Returns the serializer's error if writing fails.
pub fn serialize_point<S: Serializer>(point: &Point2, serializer: S) -> Result<S::Ok, S::Error> {
    XyRecord {
        x: &point.x,
        y: &point.y,
    }
    .serialize(serializer)
}
