use rust_decimal::Decimal;
use thiserror::Error;

/// Top-level error type for raftline.
#[derive(Debug, Error)]
pub enum RaftlineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Errors raised while validating planner or component configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {parameter} = {value} must be {requirement}")]
    InvalidParameter {
        parameter: &'static str,
        value: Decimal,
        requirement: &'static str,
    },
}

/// Errors related to caller-supplied panel origins.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{axis} coordinate {value} is not finite")]
    NonFiniteCoordinate { axis: &'static str, value: f64 },

    #[error("cannot represent {value} as an exact decimal")]
    Unparseable { value: String },
}

/// Errors related to the panel arena.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("panel not found in layout")]
    PanelNotFound,
}

/// Errors raised while placing mounts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error(
        "cannot satisfy cantilever for row: row_end_x={row_end_x}, \
         last rafter={last_rafter}, cantilever={limit}"
    )]
    UnsatisfiableCantilever {
        row_end_x: Decimal,
        last_rafter: Decimal,
        limit: Decimal,
    },
}

/// Convenience type alias for results using [`RaftlineError`].
pub type Result<T> = std::result::Result<T, RaftlineError>;
