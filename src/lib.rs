//! Stable-fluids solver on a fixed 2D grid.
//!
//! [`FluidSolver`] owns velocity and density fields and advances them with
//! implicit diffusion, pressure projection and semi-Lagrangian advection.
//! The kernels are free functions over flat row-major buffers so they can be
//! driven and tested on their own.

pub mod advection;
pub mod analysis;
pub mod boundary;
pub mod config;
pub mod diffusion;
pub mod error;
pub mod export;
pub mod grid;
pub mod injection;
pub mod projection;
pub mod render;
pub mod scenario;
pub mod solver;

pub use analysis::{AnalysisRecorder, FluidMetrics};
pub use config::SolverConfig;
pub use error::{Result, SolverError};
pub use export::{FluidData, ImageExporter};
pub use grid::Grid;
pub use injection::Brush;
pub use render::Renderer;
pub use scenario::{Impulse, Scenario, ScenarioOutcome};
pub use solver::FluidSolver;
