use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{trace, warn};

use super::RafterGrid;
use crate::config::{require_non_negative, require_positive};
use crate::error::{PlacementError, Result};
use crate::geometry::{Panel, Span};
use crate::layout::row_extent;
use crate::math::decimal::ceil_steps;
use crate::math::{nearest, point, serialize_point, Point2};

/// A support point for panel mounting hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mount {
    pub position: Point2,
}

impl Mount {
    #[must_use]
    pub fn new(x: Decimal, y: Decimal) -> Self {
        Self {
            position: point(x, y),
        }
    }

    #[must_use]
    pub fn x(&self) -> Decimal {
        self.position.x
    }

    #[must_use]
    pub fn y(&self) -> Decimal {
        self.position.y
    }
}

impl Serialize for Mount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_point(&self.position, serializer)
    }
}

/// Which extent the mount rules are applied to.
///
/// The two modes disagree whenever a row holds more than one panel: per-row
/// placement treats the whole row as one continuous span (gaps between panels
/// included), per-panel placement supports every panel on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountingMode {
    #[default]
    PerRow,
    PerPanel,
}

/// Chooses rafter-aligned mounts that respect span and cantilever limits.
///
/// # Algorithm
///
/// 1. Collect the rafters inside the span (minus edge clearance). With none,
///    place a single mount at the span midpoint.
/// 2. Check that rafters continued at the grid spacing from the first
///    candidate reach the end edge within `cantilever_limit`.
/// 3. Walk the rafters left to right, mounting on each. When the gap to the
///    next rafter exceeds `max_span`, bridge it with the rafter nearest to
///    `last + max_span`, stopping once that no longer advances.
/// 4. If the end edge still overhangs the last mount by more than
///    `cantilever_limit`, add the rafter nearest to the end edge.
#[derive(Debug, Clone, Copy)]
pub struct MountCalculator {
    grid: RafterGrid,
    max_span: Decimal,
    cantilever_limit: Decimal,
}

impl MountCalculator {
    /// Creates a mount calculator over `grid`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` if `max_span` is not positive or
    /// `cantilever_limit` is negative.
    pub fn new(grid: RafterGrid, max_span: Decimal, cantilever_limit: Decimal) -> Result<Self> {
        Ok(Self {
            grid,
            max_span: require_positive("max_span", max_span)?,
            cantilever_limit: require_non_negative("cantilever_limit", cantilever_limit)?,
        })
    }

    #[must_use]
    pub fn grid(&self) -> &RafterGrid {
        &self.grid
    }

    #[must_use]
    pub fn max_span(&self) -> Decimal {
        self.max_span
    }

    #[must_use]
    pub fn cantilever_limit(&self) -> Decimal {
        self.cantilever_limit
    }

    /// Places mounts for a row of panels treated as one continuous span.
    ///
    /// The span runs from the leftmost panel edge to the rightmost one; mounts
    /// sit on the mean `center_y` of the row. An empty row yields no mounts.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError::UnsatisfiableCantilever` if the rafter grid
    /// cannot reach the row's end edge within the cantilever limit.
    pub fn calculate_row_mounts(&self, panels: &[&Panel]) -> Result<Vec<Mount>> {
        match row_extent(panels) {
            Some(extent) => self.place(extent.span, extent.center_y),
            None => Ok(Vec::new()),
        }
    }

    /// Places mounts for a single panel, ignoring its neighbours.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError::UnsatisfiableCantilever` if the rafter grid
    /// cannot reach the panel's end edge within the cantilever limit.
    pub fn calculate_panel_mounts(&self, panel: &Panel) -> Result<Vec<Mount>> {
        self.place(panel.span(), panel.center_y())
    }

    /// Places mounts along `span` at height `center_y`, sorted by x.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError::UnsatisfiableCantilever` if the rafter grid
    /// cannot reach the span's end edge within the cantilever limit.
    pub fn place(&self, span: Span, center_y: Decimal) -> Result<Vec<Mount>> {
        let rafters = self.grid.rafters_within(span);
        let Some(&first) = rafters.first() else {
            let x = span.midpoint();
            trace!(
                start_x = %span.start_x(),
                end_x = %span.end_x(),
                x = %x,
                "no rafter under span, mounting at midpoint"
            );
            return Ok(vec![Mount::new(x, center_y)]);
        };

        self.check_end_reach(span, first)?;

        let placed = self.walk(&rafters, span);
        self.report_violations(&placed, span, center_y);

        Ok(placed
            .into_iter()
            .map(|x| Mount::new(x, center_y))
            .collect())
    }

    fn check_end_reach(&self, span: Span, first: Decimal) -> std::result::Result<(), PlacementError> {
        let spacing = self.grid.spacing();
        let steps = ceil_steps(span.end_x() - first, spacing);
        let last_rafter = first + steps * spacing;
        end_reach(span.end_x(), last_rafter, self.cantilever_limit)
    }

    fn walk(&self, rafters: &[Decimal], span: Span) -> BTreeSet<Decimal> {
        let mut placed = BTreeSet::new();
        let Some((&first, rest)) = rafters.split_first() else {
            return placed;
        };

        placed.insert(first);
        let mut last = first;

        for &rafter in rest {
            while rafter - last > self.max_span {
                let Some(bridge) = nearest(rafters, last + self.max_span) else {
                    break;
                };
                if bridge <= last {
                    break;
                }
                placed.insert(bridge);
                last = bridge;
            }
            placed.insert(rafter);
            last = rafter;
        }

        if span.end_x() - last > self.cantilever_limit {
            if let Some(closing) = nearest(rafters, span.end_x()) {
                placed.insert(closing);
            }
        }

        placed
    }

    fn report_violations(&self, placed: &BTreeSet<Decimal>, span: Span, center_y: Decimal) {
        if let (Some(&first), Some(&last)) = (placed.first(), placed.last()) {
            let start_overhang = first - span.start_x();
            if start_overhang > self.cantilever_limit {
                warn!(
                    y = %center_y,
                    overhang = %start_overhang,
                    limit = %self.cantilever_limit,
                    "start cantilever exceeds limit, no closer rafter available"
                );
            }
            let end_overhang = span.end_x() - last;
            if end_overhang > self.cantilever_limit {
                warn!(
                    y = %center_y,
                    overhang = %end_overhang,
                    limit = %self.cantilever_limit,
                    "end cantilever exceeds limit, using closest rafter"
                );
            }
        }

        let mut previous: Option<Decimal> = None;
        for &x in placed {
            if let Some(prev) = previous {
                if x - prev > self.max_span {
                    warn!(
                        y = %center_y,
                        from = %prev,
                        to = %x,
                        max_span = %self.max_span,
                        "no rafter can bridge span"
                    );
                }
            }
            previous = Some(x);
        }
    }
}

/// Fails when the last reachable rafter leaves more than `limit` of the row
/// unsupported at its end.
fn end_reach(
    row_end_x: Decimal,
    last_rafter: Decimal,
    limit: Decimal,
) -> std::result::Result<(), PlacementError> {
    if row_end_x - last_rafter > limit {
        return Err(PlacementError::UnsatisfiableCantilever {
            row_end_x,
            last_rafter,
            limit,
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn reference_calculator() -> MountCalculator {
        let grid = RafterGrid::new(dec!(16), dec!(5), dec!(2)).unwrap();
        MountCalculator::new(grid, dec!(48), dec!(16)).unwrap()
    }

    fn panel(x: Decimal, y: Decimal) -> Panel {
        Panel::new(point(x, y), dec!(44.7), dec!(71.1))
    }

    fn xs(mounts: &[Mount]) -> Vec<Decimal> {
        mounts.iter().map(Mount::x).collect()
    }

    #[test]
    fn cantilevered_panel_uses_closest_rafter() {
        let calc = reference_calculator();
        let mounts = calc.calculate_panel_mounts(&panel(dec!(90.1), dec!(0))).unwrap();
        assert_eq!(xs(&mounts), vec![dec!(101), dec!(117)]);
        assert!(mounts.iter().all(|m| m.y() == dec!(35.55)));
    }

    #[test]
    fn full_row_mounts_every_rafter() {
        let calc = reference_calculator();
        let row = [
            panel(dec!(0), dec!(0)),
            panel(dec!(45.05), dec!(0)),
            panel(dec!(90.1), dec!(0)),
            panel(dec!(135.15), dec!(0)),
        ];
        let refs: Vec<&Panel> = row.iter().collect();
        let mounts = calc.calculate_row_mounts(&refs).unwrap();
        let expected: Vec<Decimal> = (0..11).map(|k| dec!(5) + dec!(16) * Decimal::from(k)).collect();
        assert_eq!(xs(&mounts), expected);
        assert!(mounts.contains(&Mount::new(dec!(117), dec!(35.55))));
    }

    #[test]
    fn row_shares_mounts_across_panel_gap() {
        let calc = reference_calculator();
        let left = panel(dec!(0), dec!(0));
        let right = panel(dec!(90.1), dec!(0));

        let per_row = calc.calculate_row_mounts(&[&left, &right]).unwrap();
        assert_eq!(
            xs(&per_row),
            vec![dec!(5), dec!(21), dec!(37), dec!(53), dec!(69), dec!(85), dec!(101), dec!(117)]
        );

        let mut per_panel = calc.calculate_panel_mounts(&left).unwrap();
        per_panel.extend(calc.calculate_panel_mounts(&right).unwrap());
        assert_eq!(xs(&per_panel), vec![dec!(5), dec!(21), dec!(37), dec!(101), dec!(117)]);
    }

    #[test]
    fn single_rafter_yields_single_mount() {
        let calc = reference_calculator();
        let mounts = calc.place(Span::new(dec!(0), dec!(10)), dec!(4)).unwrap();
        assert_eq!(mounts, vec![Mount::new(dec!(5), dec!(4))]);
    }

    #[test]
    fn no_rafter_falls_back_to_midpoint() {
        let calc = reference_calculator();
        let mounts = calc.place(Span::new(dec!(6), dec!(19)), dec!(10)).unwrap();
        assert_eq!(mounts, vec![Mount::new(dec!(12.5), dec!(10))]);
        assert!(!calc.grid().is_on_grid(mounts[0].x()));
    }

    #[test]
    fn span_left_of_grid_falls_back_to_midpoint() {
        let calc = reference_calculator();
        let mounts = calc.calculate_panel_mounts(&panel(dec!(-100), dec!(0))).unwrap();
        assert_eq!(mounts, vec![Mount::new(dec!(-77.65), dec!(35.55))]);
    }

    #[test]
    fn sparse_rafters_terminate_and_stay_on_grid() {
        let grid = RafterGrid::new(dec!(30), dec!(0), dec!(0)).unwrap();
        let calc = MountCalculator::new(grid, dec!(20), dec!(100)).unwrap();
        let mounts = calc.place(Span::new(dec!(0), dec!(100)), dec!(0)).unwrap();
        assert_eq!(xs(&mounts), vec![dec!(0), dec!(30), dec!(60), dec!(90)]);
    }

    #[test]
    fn empty_row_has_no_mounts() {
        let calc = reference_calculator();
        assert!(calc.calculate_row_mounts(&[]).unwrap().is_empty());
    }

    #[test]
    fn mounts_are_sorted_and_unique() {
        let calc = reference_calculator();
        let mounts = calc.place(Span::new(dec!(-60), dec!(300)), dec!(1)).unwrap();
        assert!(mounts.windows(2).all(|w| w[0].x() < w[1].x()));
    }

    #[test]
    fn end_reach_reports_offending_row() {
        assert!(end_reach(dec!(179.85), dec!(181), dec!(16)).is_ok());
        assert!(end_reach(dec!(197), dec!(181), dec!(16)).is_ok());
        assert_eq!(
            end_reach(dec!(200), dec!(181), dec!(16)),
            Err(PlacementError::UnsatisfiableCantilever {
                row_end_x: dec!(200),
                last_rafter: dec!(181),
                limit: dec!(16),
            })
        );
    }

    #[test]
    fn rejects_invalid_rules() {
        let grid = RafterGrid::new(dec!(16), dec!(5), dec!(2)).unwrap();
        assert!(MountCalculator::new(grid, dec!(0), dec!(16)).is_err());
        assert!(MountCalculator::new(grid, dec!(48), dec!(-1)).is_err());
    }
}
