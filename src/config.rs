use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::RowGrouping;
use crate::operations::MountingMode;

/// Planner configuration.
///
/// The defaults describe the reference profile: 44.7 x 71.1 panels over
/// rafters every 16 units starting at x = 5.
///
/// Deserializing fills any missing field with its default, and decimal fields
/// accept either JSON numbers or strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Panel width, shared by every panel.
    pub width: Decimal,
    /// Panel height, shared by every panel.
    pub height: Decimal,
    /// Distance between neighbouring rafters.
    pub spacing: Decimal,
    /// x-coordinate of one rafter; fixes the phase of the grid.
    pub first_rafter: Decimal,
    /// Minimum distance between a span edge and a usable rafter.
    pub edge_clearance: Decimal,
    /// Maximum distance between consecutive mounts.
    pub max_span: Decimal,
    /// Maximum overhang from the outermost mount to the row edge.
    pub cantilever_limit: Decimal,
    /// Maximum edge misalignment for two panels to still share a joint.
    pub joint_tolerance: Decimal,
    /// Panels closer than this along the touching edge count as adjacent.
    pub joint_gap: Decimal,
    /// Maximum y difference for two panels to share a row.
    pub row_tolerance: Decimal,
    pub mounting_mode: MountingMode,
    pub row_grouping: RowGrouping,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            width: Decimal::new(447, 1),
            height: Decimal::new(711, 1),
            spacing: Decimal::new(16, 0),
            first_rafter: Decimal::new(5, 0),
            edge_clearance: Decimal::new(2, 0),
            max_span: Decimal::new(48, 0),
            cantilever_limit: Decimal::new(16, 0),
            joint_tolerance: Decimal::new(10, 1),
            joint_gap: Decimal::ONE,
            row_tolerance: Decimal::new(1, 1),
            mounting_mode: MountingMode::default(),
            row_grouping: RowGrouping::default(),
        }
    }
}

impl PlannerConfig {
    /// Checks every numeric parameter.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` for the first parameter that is
    /// out of range: dimensions, `spacing`, `max_span` and `joint_gap` must be
    /// positive; clearances and tolerances must be non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("width", self.width)?;
        require_positive("height", self.height)?;
        require_positive("spacing", self.spacing)?;
        require_non_negative("edge_clearance", self.edge_clearance)?;
        require_positive("max_span", self.max_span)?;
        require_non_negative("cantilever_limit", self.cantilever_limit)?;
        require_non_negative("joint_tolerance", self.joint_tolerance)?;
        require_positive("joint_gap", self.joint_gap)?;
        require_non_negative("row_tolerance", self.row_tolerance)?;
        Ok(())
    }
}

pub(crate) fn require_positive(
    parameter: &'static str,
    value: Decimal,
) -> Result<Decimal, ConfigError> {
    if value > Decimal::ZERO {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            parameter,
            value,
            requirement: "positive",
        })
    }
}

pub(crate) fn require_non_negative(
    parameter: &'static str,
    value: Decimal,
) -> Result<Decimal, ConfigError> {
    if value < Decimal::ZERO {
        Err(ConfigError::InvalidParameter {
            parameter,
            value,
            requirement: "non-negative",
        })
    } else {
        Ok(value)
    }
}
