use crate::grid::Grid;

/// Errors raised when building a solver or loading a scenario.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("grid {width}x{height} is too small, both sides must be at least {min}", min = Grid::MIN_SIZE)]
    GridTooSmall { width: usize, height: usize },
    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f32),
    #[error("viscosity must be non-negative and finite, got {0}")]
    InvalidViscosity(f32),
    #[error("density diffusion must be non-negative and finite, got {0}")]
    InvalidDiffusion(f32),
    #[error("relaxation needs at least one iteration")]
    ZeroIterations,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, SolverError>;
