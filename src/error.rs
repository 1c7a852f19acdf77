use thiserror::Error;

/// Top-level error type for the Atrium floor-plan kernel.
///
/// Bad geometry never errors — degenerate inputs degrade to sensible
/// defaults and rejected placements are ordinary `false` results. Errors are
/// reserved for dangling entity IDs and structurally invalid input.
#[derive(Debug, Error)]
pub enum AtriumError {
    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to the plan's entity topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

/// Errors related to plan operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`AtriumError`].
pub type Result<T> = std::result::Result<T, AtriumError>;
