use serde::{Deserialize, Serialize};

use crate::diffusion::DEFAULT_ITERATIONS;
use crate::error::{Result, SolverError};
use crate::grid::Grid;

/// Construction parameters of a [`crate::FluidSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub width: usize,
    pub height: usize,
    pub viscosity: f32,
    pub dt: f32,
    /// Diffusion rate of the density dye, separate from the viscosity.
    pub density_diffusion: f32,
    /// Gauss-Seidel sweeps per relaxation solve.
    pub iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            viscosity: 0.0001,
            dt: 0.016,
            density_diffusion: 0.0001,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl SolverConfig {
    pub fn new(width: usize, height: usize, viscosity: f32, dt: f32) -> Self {
        Self {
            width,
            height,
            viscosity,
            dt,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < Grid::MIN_SIZE || self.height < Grid::MIN_SIZE {
            return Err(SolverError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SolverError::InvalidTimestep(self.dt));
        }
        if !(self.viscosity.is_finite() && self.viscosity >= 0.0) {
            return Err(SolverError::InvalidViscosity(self.viscosity));
        }
        if !(self.density_diffusion.is_finite() && self.density_diffusion >= 0.0) {
            return Err(SolverError::InvalidDiffusion(self.density_diffusion));
        }
        if self.iterations == 0 {
            return Err(SolverError::ZeroIterations);
        }
        Ok(())
    }
}
