use crate::advection::advect;
use crate::config::SolverConfig;
use crate::diffusion::diffuse;
use crate::error::Result;
use crate::grid::Grid;
use crate::injection::splat;
use crate::projection::{ProjectionScratch, project};

/// Stable-fluids solver on a fixed 2D grid.
///
/// Owns the velocity components, the density dye and a snapshot of each
/// taken at the start of every [`step`](Self::step). Readers get shared
/// slices only; all mutation goes through `step`, the injection methods
/// and [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct FluidSolver {
    grid: Grid,
    config: SolverConfig,
    u: Vec<f32>,
    v: Vec<f32>,
    u_prev: Vec<f32>,
    v_prev: Vec<f32>,
    density: Vec<f32>,
    density_prev: Vec<f32>,
    // Source copy for advection, overwritten in full before each pass.
    advect_source: Vec<f32>,
    projection: ProjectionScratch,
}

impl FluidSolver {
    pub fn new(width: usize, height: usize, viscosity: f32, dt: f32) -> Result<Self> {
        Self::from_config(SolverConfig::new(width, height, viscosity, dt))
    }

    pub fn from_config(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        log::debug!(
            "fluid solver {}x{} viscosity={} dt={} iterations={}",
            config.width,
            config.height,
            config.viscosity,
            config.dt,
            config.iterations
        );

        Ok(Self {
            grid,
            config,
            u: grid.zeros(),
            v: grid.zeros(),
            u_prev: grid.zeros(),
            v_prev: grid.zeros(),
            density: grid.zeros(),
            density_prev: grid.zeros(),
            advect_source: grid.zeros(),
            projection: ProjectionScratch::new(grid),
        })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn velocity_x(&self) -> &[f32] {
        &self.u
    }

    pub fn velocity_y(&self) -> &[f32] {
        &self.v
    }

    pub fn density(&self) -> &[f32] {
        &self.density
    }

    /// Density as raw native-endian bytes, ready for a texture upload.
    pub fn density_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.density.as_slice())
    }

    /// Fill `out` with interleaved `[u, v]` pairs, one per cell.
    pub fn velocity_rg(&self, out: &mut Vec<f32>) {
        out.clear();
        out.reserve(self.grid.size() * 2);
        out.extend(self.u.iter().zip(&self.v).flat_map(|(&u, &v)| [u, v]));
    }

    /// Advance the simulation by one timestep.
    pub fn step(&mut self) {
        self.check_buffers();
        let grid = self.grid;
        let SolverConfig {
            viscosity,
            dt,
            density_diffusion,
            iterations,
            ..
        } = self.config;

        self.u_prev.copy_from_slice(&self.u);
        self.v_prev.copy_from_slice(&self.v);
        self.density_prev.copy_from_slice(&self.density);

        diffuse(grid, &mut self.u, &self.u_prev, viscosity, dt, iterations);
        diffuse(grid, &mut self.v, &self.v_prev, viscosity, dt, iterations);

        project(grid, &mut self.u, &mut self.v, &mut self.projection, iterations);

        // `v` is traced with the already advected `u`.
        self.advect_source.copy_from_slice(&self.u);
        advect(grid, &mut self.u, &self.advect_source, &self.advect_source, &self.v, dt);
        self.advect_source.copy_from_slice(&self.v);
        advect(grid, &mut self.v, &self.advect_source, &self.u, &self.advect_source, dt);

        project(grid, &mut self.u, &mut self.v, &mut self.projection, iterations);

        diffuse(grid, &mut self.density, &self.density_prev, density_diffusion, dt, iterations);
        self.advect_source.copy_from_slice(&self.density);
        advect(grid, &mut self.density, &self.advect_source, &self.u, &self.v, dt);

        log::trace!("step complete");
    }

    /// Add a velocity impulse `(dx, dy)` around grid position `(x, y)`.
    pub fn add_force(&mut self, x: f32, y: f32, dx: f32, dy: f32, radius: f32) {
        splat(self.grid, &mut self.u, x, y, dx, radius);
        splat(self.grid, &mut self.v, x, y, dy, radius);
    }

    /// Add `amount` of dye around grid position `(x, y)`.
    pub fn add_density(&mut self, x: f32, y: f32, amount: f32, radius: f32) {
        splat(self.grid, &mut self.density, x, y, amount, radius);
    }

    /// Zero every field without reallocating.
    pub fn reset(&mut self) {
        for field in [
            &mut self.u,
            &mut self.v,
            &mut self.u_prev,
            &mut self.v_prev,
            &mut self.density,
            &mut self.density_prev,
        ] {
            field.fill(0.0);
        }
        log::debug!("fluid solver reset");
    }

    fn check_buffers(&self) {
        for field in [
            &self.u,
            &self.v,
            &self.u_prev,
            &self.v_prev,
            &self.density,
            &self.density_prev,
            &self.advect_source,
        ] {
            self.grid.check(field);
        }
    }
}
