use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::decimal::exact_from_f64;
use crate::math::{point, Point2};

/// Caller-supplied top-left corner of a panel.
///
/// Deserializes from `{"x": .., "y": ..}` where each coordinate may be a JSON
/// number or a decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelOrigin {
    pub x: Decimal,
    pub y: Decimal,
}

impl PanelOrigin {
    #[must_use]
    pub fn new(x: Decimal, y: Decimal) -> Self {
        Self { x, y }
    }

    /// Creates an origin from approximate coordinates via their text form.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NonFiniteCoordinate` or `InputError::Unparseable`
    /// if either coordinate is not finite or out of the decimal range.
    pub fn from_f64(x: f64, y: f64) -> Result<Self> {
        Ok(Self {
            x: exact_from_f64("x", x)?,
            y: exact_from_f64("y", y)?,
        })
    }

    #[must_use]
    pub fn to_point(self) -> Point2 {
        point(self.x, self.y)
    }
}
