use rust_decimal::Decimal;

use super::Span;
use crate::math::{point, Point2};

/// A rectangular solar panel.
///
/// `origin` is the top-left corner; x grows to the right and y grows down the
/// roof, so `end_y` is the panel's lower edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    origin: Point2,
    width: Decimal,
    height: Decimal,
}

impl Panel {
    /// Creates a panel at `origin` with the given dimensions.
    #[must_use]
    pub fn new(origin: Point2, width: Decimal, height: Decimal) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    #[must_use]
    pub fn x(&self) -> Decimal {
        self.origin.x
    }

    #[must_use]
    pub fn y(&self) -> Decimal {
        self.origin.y
    }

    #[must_use]
    pub fn width(&self) -> Decimal {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> Decimal {
        self.height
    }

    #[must_use]
    pub fn end_x(&self) -> Decimal {
        self.origin.x + self.width
    }

    #[must_use]
    pub fn end_y(&self) -> Decimal {
        self.origin.y + self.height
    }

    #[must_use]
    pub fn center_x(&self) -> Decimal {
        self.origin.x + self.width / Decimal::TWO
    }

    #[must_use]
    pub fn center_y(&self) -> Decimal {
        self.origin.y + self.height / Decimal::TWO
    }

    /// Returns the panel's horizontal extent.
    #[must_use]
    pub fn span(&self) -> Span {
        Span::new(self.x(), self.end_x())
    }

    /// Returns the bottom-right corner.
    #[must_use]
    pub fn far_corner(&self) -> Point2 {
        point(self.end_x(), self.end_y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn reference_panel(x: Decimal, y: Decimal) -> Panel {
        Panel::new(point(x, y), dec!(44.7), dec!(71.1))
    }

    #[test]
    fn derived_edges() {
        let panel = reference_panel(dec!(135.15), dec!(71.6));
        assert_eq!(panel.end_x(), dec!(179.85));
        assert_eq!(panel.end_y(), dec!(142.7));
        assert_eq!(panel.center_x(), dec!(157.5));
        assert_eq!(panel.center_y(), dec!(107.15));
    }

    #[test]
    fn span_matches_horizontal_extent() {
        let panel = reference_panel(dec!(90.1), dec!(0));
        assert_eq!(panel.span(), Span::new(dec!(90.1), dec!(134.8)));
    }

    #[test]
    fn far_corner_is_bottom_right() {
        let panel = reference_panel(dec!(0), dec!(0));
        assert_eq!(panel.far_corner(), point(dec!(44.7), dec!(71.1)));
    }
}
