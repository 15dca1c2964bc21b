use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::config::PlannerConfig;
use crate::error::Result;
use crate::geometry::PanelOrigin;
use crate::layout::{group_rows, row_extent, PanelLayout, Row};
use crate::math::cmp_yx;
use crate::operations::{
    Joint, JointCalculator, Mount, MountCalculator, MountingMode, RafterGrid,
};

/// Summary of one row as grouped by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowSummary {
    pub key_y: Decimal,
    pub start_x: Decimal,
    pub end_x: Decimal,
    pub center_y: Decimal,
    pub panel_count: usize,
    pub mount_count: usize,
}

/// Mounts and joints for one set of panels, both sorted by `(y, x)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SupportPlan {
    pub mounts: Vec<Mount>,
    pub joints: Vec<Joint>,
    #[serde(skip)]
    rows: Vec<RowSummary>,
}

impl SupportPlan {
    /// Rows in the order they were planned.
    #[must_use]
    pub fn rows(&self) -> &[RowSummary] {
        &self.rows
    }
}

/// Computes mounts and joints for panels laid out on a rafter grid.
///
/// Each call to [`SupportPlanner::plan`] is independent: panels are grouped
/// into rows, every row is mounted, joints are found across all panels, and
/// both outputs are sorted.
#[derive(Debug, Clone, Copy)]
pub struct SupportPlanner {
    config: PlannerConfig,
    mounts: MountCalculator,
    joints: JointCalculator,
}

impl SupportPlanner {
    /// Creates a planner, validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` for the first out-of-range
    /// parameter.
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        let grid = RafterGrid::new(config.spacing, config.first_rafter, config.edge_clearance)?;
        Ok(Self {
            config,
            mounts: MountCalculator::new(grid, config.max_span, config.cantilever_limit)?,
            joints: JointCalculator::new(config.joint_tolerance, config.joint_gap)?,
        })
    }

    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans mounts and joints for panels at `origins`.
    ///
    /// # Errors
    ///
    /// Returns `PlacementError::UnsatisfiableCantilever` if any row's end
    /// edge cannot be reached by the rafter grid within the cantilever limit.
    pub fn plan(&self, origins: &[PanelOrigin]) -> Result<SupportPlan> {
        let layout = PanelLayout::from_origins(origins, self.config.width, self.config.height);
        let rows = group_rows(&layout, self.config.row_tolerance, self.config.row_grouping);
        debug!(panels = layout.len(), rows = rows.len(), "grouped panels into rows");

        let mut mounts = Vec::new();
        let mut summaries = Vec::with_capacity(rows.len());
        for row in &rows {
            let (row_mounts, summary) = self.mount_row(&layout, row)?;
            summaries.extend(summary);
            mounts.extend(row_mounts);
        }

        let mut joints = self.joints.calculate_joints(layout.panels());

        mounts.sort_by(|a, b| cmp_yx(&a.position, &b.position));
        mounts.dedup();
        joints.sort_by(|a, b| cmp_yx(&a.position, &b.position));

        debug!(mounts = mounts.len(), joints = joints.len(), "support plan complete");
        Ok(SupportPlan {
            mounts,
            joints,
            rows: summaries,
        })
    }

    fn mount_row(&self, layout: &PanelLayout, row: &Row) -> Result<(Vec<Mount>, Option<RowSummary>)> {
        let panels = layout.resolve(row.panel_ids())?;
        let Some(extent) = row_extent(&panels) else {
            return Ok((Vec::new(), None));
        };

        let mounts = match self.config.mounting_mode {
            MountingMode::PerRow => self.mounts.place(extent.span, extent.center_y)?,
            MountingMode::PerPanel => {
                let mut mounts = Vec::new();
                for panel in &panels {
                    mounts.extend(self.mounts.calculate_panel_mounts(panel)?);
                }
                mounts
            }
        };

        debug!(
            key_y = %row.key_y(),
            start_x = %extent.span.start_x(),
            end_x = %extent.span.end_x(),
            panels = panels.len(),
            mounts = mounts.len(),
            "mounted row"
        );

        let summary = RowSummary {
            key_y: row.key_y(),
            start_x: extent.span.start_x(),
            end_x: extent.span.end_x(),
            center_y: extent.center_y,
            panel_count: panels.len(),
            mount_count: mounts.len(),
        };
        Ok((mounts, Some(summary)))
    }
}

/// Plans supports for `origins` with `config` in one call.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a row's cantilever
/// cannot be satisfied.
pub fn plan_supports(origins: &[PanelOrigin], config: PlannerConfig) -> Result<SupportPlan> {
    SupportPlanner::new(config)?.plan(origins)
}
