mod joints;
mod mounts;
mod rafter_grid;

pub use joints::{Joint, JointCalculator, JointKind};
pub use mounts::{Mount, MountCalculator, MountingMode};
pub use rafter_grid::RafterGrid;
