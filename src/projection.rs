use crate::boundary::set_boundary;
use crate::diffusion::linear_solve;
use crate::grid::Grid;

/// Divergence and pressure buffers reused across projections.
///
/// Both are zeroed at the start of every [`project`] call, so nothing
/// carries over from one call to the next.
#[derive(Debug, Clone)]
pub struct ProjectionScratch {
    pub divergence: Vec<f32>,
    pub pressure: Vec<f32>,
}

impl ProjectionScratch {
    pub fn new(grid: Grid) -> Self {
        Self {
            divergence: grid.zeros(),
            pressure: grid.zeros(),
        }
    }

    fn reset(&mut self) {
        self.divergence.fill(0.0);
        self.pressure.fill(0.0);
    }
}

/// Discrete divergence of `(u, v)` into `out` for interior cells.
///
/// Both gradient terms are divided by the grid width, including the
/// vertical one. The boundary ring of `out` is left untouched.
pub fn divergence(grid: Grid, u: &[f32], v: &[f32], out: &mut [f32]) {
    grid.check(u);
    grid.check(v);
    grid.check(out);
    let w = grid.width();
    let n = w as f32;

    for j in 1..grid.height() - 1 {
        for i in 1..w - 1 {
            let idx = i + j * w;
            out[idx] = -0.5 * (u[idx + 1] - u[idx - 1] + v[idx + w] - v[idx - w]) / n;
        }
    }
}

/// Remove the divergent part of `(u, v)` with a pressure Poisson solve.
pub fn project(grid: Grid, u: &mut [f32], v: &mut [f32], scratch: &mut ProjectionScratch, iterations: usize) {
    scratch.reset();
    let ProjectionScratch { divergence: div, pressure: p } = scratch;

    divergence(grid, u, v, div);
    set_boundary(grid, div);
    set_boundary(grid, p);
    linear_solve(grid, p, div, 1.0, 4.0, iterations);

    let w = grid.width();
    let n = w as f32;
    for j in 1..grid.height() - 1 {
        for i in 1..w - 1 {
            let idx = i + j * w;
            u[idx] -= 0.5 * (p[idx + 1] - p[idx - 1]) * n;
            v[idx] -= 0.5 * (p[idx + w] - p[idx - w]) * n;
        }
    }

    set_boundary(grid, u);
    set_boundary(grid, v);
}

/// Mean absolute divergence over interior cells.
pub fn mean_abs_divergence(grid: Grid, u: &[f32], v: &[f32]) -> f32 {
    let mut div = grid.zeros();
    divergence(grid, u, v, &mut div);

    let w = grid.width();
    let mut total = 0.0f32;
    for j in 1..grid.height() - 1 {
        for i in 1..w - 1 {
            total += div[i + j * w].abs();
        }
    }
    total / ((w - 2) * (grid.height() - 2)) as f32
}
