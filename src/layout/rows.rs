use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PanelId, PanelLayout};
use crate::geometry::{Panel, Span};

/// How panels are grouped into rows by their y-coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowGrouping {
    /// Sort by y and open a new row once a panel sits more than the tolerance
    /// below the row's topmost panel. Independent of input order.
    #[default]
    Clustered,
    /// Scan panels in input order and join the first row whose key (its
    /// first-seen y) is within tolerance. Order dependent.
    InputOrder,
}

/// Panels sharing approximately the same y-coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    key_y: Decimal,
    panels: Vec<PanelId>,
}

impl Row {
    fn open(key_y: Decimal, first: PanelId) -> Self {
        Self {
            key_y,
            panels: vec![first],
        }
    }

    /// The y-coordinate the row is keyed by.
    #[must_use]
    pub fn key_y(&self) -> Decimal {
        self.key_y
    }

    #[must_use]
    pub fn panel_ids(&self) -> &[PanelId] {
        &self.panels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

/// Horizontal bounds and mounting line of a group of panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowExtent {
    pub span: Span,
    pub center_y: Decimal,
}

/// Computes `[min(x), max(end_x)]` and the mean `center_y` of `panels`.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn row_extent(panels: &[&Panel]) -> Option<RowExtent> {
    let span = Span::enclosing(panels.iter().map(|p| p.span()))?;
    let total: Decimal = panels.iter().map(|p| p.center_y()).sum();
    let center_y = total / Decimal::from(panels.len());
    Some(RowExtent { span, center_y })
}

/// Groups the panels of `layout` into rows.
///
/// Clustered rows come out in ascending y; input-order rows come out in
/// discovery order.
#[must_use]
pub fn group_rows(layout: &PanelLayout, tolerance: Decimal, grouping: RowGrouping) -> Vec<Row> {
    match grouping {
        RowGrouping::Clustered => cluster_by_y(layout, tolerance),
        RowGrouping::InputOrder => first_match(layout, tolerance),
    }
}

fn cluster_by_y(layout: &PanelLayout, tolerance: Decimal) -> Vec<Row> {
    let mut by_y: Vec<(PanelId, Decimal)> = layout.iter().map(|(id, p)| (id, p.y())).collect();
    by_y.sort_by(|a, b| a.1.cmp(&b.1));

    let mut rows: Vec<Row> = Vec::new();
    for (id, y) in by_y {
        match rows.last_mut() {
            Some(row) if y - row.key_y <= tolerance => row.panels.push(id),
            _ => rows.push(Row::open(y, id)),
        }
    }
    rows
}

fn first_match(layout: &PanelLayout, tolerance: Decimal) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    for (id, panel) in layout.iter() {
        let y = panel.y();
        match rows
            .iter_mut()
            .find(|row| (row.key_y - y).abs() <= tolerance)
        {
            Some(row) => row.panels.push(id),
            None => rows.push(Row::open(y, id)),
        }
    }
    rows
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::PanelOrigin;
    use rust_decimal_macros::dec;

    fn layout(points: &[(Decimal, Decimal)]) -> PanelLayout {
        let origins: Vec<PanelOrigin> = points
            .iter()
            .map(|&(x, y)| PanelOrigin::new(x, y))
            .collect();
        PanelLayout::from_origins(&origins, dec!(44.7), dec!(71.1))
    }

    fn row_ys(layout: &PanelLayout, rows: &[Row]) -> Vec<Vec<Decimal>> {
        rows.iter()
            .map(|row| {
                layout
                    .resolve(row.panel_ids())
                    .unwrap()
                    .iter()
                    .map(|p| p.y())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn clustered_groups_reference_grid_into_three_rows() {
        let layout = layout(&[
            (dec!(0), dec!(0)),
            (dec!(45.05), dec!(0)),
            (dec!(0), dec!(71.6)),
            (dec!(0), dec!(143.2)),
            (dec!(135.15), dec!(0)),
        ]);
        let rows = group_rows(&layout, dec!(0.1), RowGrouping::Clustered);
        let keys: Vec<Decimal> = rows.iter().map(Row::key_y).collect();
        assert_eq!(keys, vec![dec!(0), dec!(71.6), dec!(143.2)]);
        assert_eq!(rows[0].len(), 3);
    }

    #[test]
    fn clustered_does_not_chain_merge() {
        // 0.0 -> 0.08 -> 0.16: consecutive gaps fit the tolerance, the whole run does not.
        let layout = layout(&[
            (dec!(0), dec!(0.16)),
            (dec!(50), dec!(0.08)),
            (dec!(100), dec!(0)),
        ]);
        let rows = group_rows(&layout, dec!(0.1), RowGrouping::Clustered);
        assert_eq!(
            row_ys(&layout, &rows),
            vec![vec![dec!(0), dec!(0.08)], vec![dec!(0.16)]]
        );
    }

    #[test]
    fn clustered_is_independent_of_input_order() {
        let forward = layout(&[(dec!(0), dec!(0.08)), (dec!(50), dec!(0.16)), (dec!(100), dec!(0))]);
        let backward = layout(&[(dec!(100), dec!(0)), (dec!(50), dec!(0.16)), (dec!(0), dec!(0.08))]);
        let a = group_rows(&forward, dec!(0.1), RowGrouping::Clustered);
        let b = group_rows(&backward, dec!(0.1), RowGrouping::Clustered);
        let keys = |rows: &[Row]| rows.iter().map(|r| (r.key_y(), r.len())).collect::<Vec<_>>();
        assert_eq!(keys(&a), keys(&b));
    }

    #[test]
    fn input_order_keys_rows_by_first_seen_y() {
        let layout = layout(&[
            (dec!(0), dec!(0.08)),
            (dec!(50), dec!(0.16)),
            (dec!(100), dec!(0)),
        ]);
        let rows = group_rows(&layout, dec!(0.1), RowGrouping::InputOrder);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key_y(), dec!(0.08));
        assert_eq!(rows[0].len(), 3);
    }

    #[test]
    fn extent_spans_row_and_averages_centers() {
        let layout = layout(&[(dec!(90.1), dec!(0)), (dec!(0), dec!(0.1))]);
        let panels: Vec<&Panel> = layout.panels().collect();
        let extent = row_extent(&panels).unwrap();
        assert_eq!(extent.span, Span::new(dec!(0), dec!(134.8)));
        assert_eq!(extent.center_y, dec!(35.6));
        assert!(row_extent(&[]).is_none());
    }
}
