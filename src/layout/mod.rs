pub mod rows;

pub use rows::{group_rows, row_extent, Row, RowExtent, RowGrouping};

use rust_decimal::Decimal;
use slotmap::SlotMap;

use crate::error::LayoutError;
use crate::geometry::{Panel, PanelOrigin};

slotmap::new_key_type! {
    /// Unique identifier for a panel in a layout.
    pub struct PanelId;
}

/// Arena that owns the panels of one planning call.
///
/// Rows and calculators refer to panels by [`PanelId`] or by borrow; only the
/// layout owns them. Insertion order is remembered so that iteration follows
/// the caller's input order.
#[derive(Debug, Default)]
pub struct PanelLayout {
    panels: SlotMap<PanelId, Panel>,
    order: Vec<PanelId>,
}

impl PanelLayout {
    /// Creates a new, empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a layout of identically sized panels, one per origin.
    #[must_use]
    pub fn from_origins(origins: &[PanelOrigin], width: Decimal, height: Decimal) -> Self {
        let mut layout = Self::new();
        for origin in origins {
            layout.add_panel(Panel::new(origin.to_point(), width, height));
        }
        layout
    }

    /// Inserts a panel and returns its ID.
    pub fn add_panel(&mut self, panel: Panel) -> PanelId {
        let id = self.panels.insert(panel);
        self.order.push(id);
        id
    }

    /// Returns a reference to the panel, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the panel is not in this layout.
    pub fn panel(&self, id: PanelId) -> Result<&Panel, LayoutError> {
        self.panels.get(id).ok_or(LayoutError::PanelNotFound)
    }

    /// Resolves a list of IDs to panels, preserving order.
    ///
    /// # Errors
    ///
    /// Returns an error if any ID is not in this layout.
    pub fn resolve(&self, ids: &[PanelId]) -> Result<Vec<&Panel>, LayoutError> {
        ids.iter().map(|&id| self.panel(id)).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates `(id, panel)` pairs in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (PanelId, &Panel)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.panels.get(id).map(|panel| (id, panel)))
    }

    /// Iterates panels in insertion order.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> + '_ {
        self.iter().map(|(_, panel)| panel)
    }
}
