use rust_decimal::Decimal;

use crate::config::{require_non_negative, require_positive};
use crate::error::Result;
use crate::geometry::{Panel, Span};
use crate::math::decimal::{ceil_steps, is_on_lattice};

/// The rafters under a roof: the lines `first_rafter + n * spacing` for
/// `n >= 0`.
///
/// Mounts may only be placed on a rafter, and never closer than
/// `edge_clearance` to the edge of the span being supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RafterGrid {
    spacing: Decimal,
    first_rafter: Decimal,
    edge_clearance: Decimal,
}

impl RafterGrid {
    /// Creates a rafter grid.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` if `spacing` is not positive or
    /// `edge_clearance` is negative.
    pub fn new(spacing: Decimal, first_rafter: Decimal, edge_clearance: Decimal) -> Result<Self> {
        Ok(Self {
            spacing: require_positive("spacing", spacing)?,
            first_rafter,
            edge_clearance: require_non_negative("edge_clearance", edge_clearance)?,
        })
    }

    #[must_use]
    pub fn spacing(&self) -> Decimal {
        self.spacing
    }

    #[must_use]
    pub fn first_rafter(&self) -> Decimal {
        self.first_rafter
    }

    #[must_use]
    pub fn edge_clearance(&self) -> Decimal {
        self.edge_clearance
    }

    /// Returns every rafter `r` with
    /// `span.start_x + edge_clearance <= r <= span.end_x - edge_clearance`,
    /// ascending.
    ///
    /// Empty when the span is narrower than twice the clearance, lies left of
    /// `first_rafter`, or no rafter falls inside the cleared window.
    #[must_use]
    pub fn rafters_within(&self, span: Span) -> Vec<Decimal> {
        let Some(window) = span.inset(self.edge_clearance) else {
            return Vec::new();
        };

        let steps = ceil_steps(window.start_x() - self.first_rafter, self.spacing)
            .max(Decimal::ZERO);
        let mut candidate = self.first_rafter + steps * self.spacing;

        let mut rafters = Vec::new();
        while candidate <= window.end_x() {
            rafters.push(candidate.normalize());
            candidate += self.spacing;
        }
        rafters
    }

    /// Returns the rafters usable under a single panel.
    #[must_use]
    pub fn rafters_within_panel(&self, panel: &Panel) -> Vec<Decimal> {
        self.rafters_within(panel.span())
    }

    /// Reports whether `x` lies exactly on a rafter.
    #[must_use]
    pub fn is_on_grid(&self, x: Decimal) -> bool {
        x >= self.first_rafter && is_on_lattice(x, self.first_rafter, self.spacing)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, RaftlineError};
    use crate::math::point;
    use rust_decimal_macros::dec;

    fn reference_grid() -> RafterGrid {
        RafterGrid::new(dec!(16), dec!(5), dec!(2)).unwrap()
    }

    #[test]
    fn rafters_under_single_panel() {
        let panel = Panel::new(point(dec!(90.1), dec!(0)), dec!(44.7), dec!(71.1));
        assert_eq!(reference_grid().rafters_within_panel(&panel), vec![dec!(101), dec!(117)]);
    }

    #[test]
    fn rafters_under_row_span() {
        let rafters = reference_grid().rafters_within(Span::new(dec!(0), dec!(179.85)));
        assert_eq!(rafters.len(), 11);
        assert_eq!(rafters.first(), Some(&dec!(5)));
        assert_eq!(rafters.last(), Some(&dec!(165)));
    }

    #[test]
    fn clearance_bounds_are_inclusive() {
        // Window is exactly [5, 21].
        let rafters = reference_grid().rafters_within(Span::new(dec!(3), dec!(23)));
        assert_eq!(rafters, vec![dec!(5), dec!(21)]);
    }

    #[test]
    fn no_rafters_left_of_first_rafter() {
        let grid = reference_grid();
        assert!(grid.rafters_within(Span::new(dec!(-100), dec!(-55.3))).is_empty());
        assert!(!grid.is_on_grid(dec!(-11)));
    }

    #[test]
    fn span_straddling_first_rafter_starts_at_it() {
        let rafters = reference_grid().rafters_within(Span::new(dec!(-40), dec!(40)));
        assert_eq!(rafters, vec![dec!(5), dec!(21), dec!(37)]);
    }

    #[test]
    fn narrow_span_has_no_rafters() {
        let grid = reference_grid();
        assert!(grid.rafters_within(Span::new(dec!(6), dec!(19))).is_empty());
        assert!(grid.rafters_within(Span::new(dec!(0), dec!(3))).is_empty());
    }

    #[test]
    fn every_rafter_is_on_grid() {
        let grid = RafterGrid::new(dec!(16.5), dec!(-3.25), dec!(0)).unwrap();
        let rafters = grid.rafters_within(Span::new(dec!(-100), dec!(250)));
        assert!(!rafters.is_empty());
        assert!(rafters.iter().all(|&r| grid.is_on_grid(r)));
        assert!(rafters.windows(2).all(|w| w[1] - w[0] == dec!(16.5)));
        assert!(!grid.is_on_grid(dec!(0)));
    }

    #[test]
    fn rejects_non_positive_spacing() {
        let err = RafterGrid::new(dec!(0), dec!(5), dec!(2)).unwrap_err();
        assert!(matches!(
            err,
            RaftlineError::Config(ConfigError::InvalidParameter { parameter: "spacing", .. })
        ));
        assert!(RafterGrid::new(dec!(16), dec!(5), dec!(-1)).is_err());
    }
}
