//! Support layout for rectangular solar panels on a rafter grid.
//!
//! [`SupportPlanner`] takes panel origins and a [`PlannerConfig`] and returns
//! rafter-aligned mounts for every row of panels plus the joints where panel
//! edges meet. All coordinates are exact decimals.

pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod math;
pub mod operations;
pub mod planner;

pub use config::PlannerConfig;
pub use error::{RaftlineError, Result};
pub use geometry::{Panel, PanelOrigin, Span};
pub use operations::{Joint, JointKind, Mount, MountingMode};
pub use planner::{plan_supports, RowSummary, SupportPlan, SupportPlanner};

#[cfg(test)]
pub(crate) fn init_test_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}
