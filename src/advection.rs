use crate::boundary::set_boundary;
use crate::grid::Grid;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Bilinear sample of `field` at fractional cell coordinates `(x, y)`.
///
/// The caller keeps `(x, y)` inside `[0, width - 1) × [0, height - 1)` so
/// that both corner indices exist.
#[inline]
pub fn sample_bilinear(grid: Grid, field: &[f32], x: f32, y: f32) -> f32 {
    let w = grid.width();
    let i0 = x.floor() as usize;
    let i1 = i0 + 1;
    let j0 = y.floor() as usize;
    let j1 = j0 + 1;

    let s1 = x - i0 as f32;
    let s0 = 1.0 - s1;
    let t1 = y - j0 as f32;
    let t0 = 1.0 - t1;

    s0 * (t0 * field[i0 + j0 * w] + t1 * field[i0 + j1 * w])
        + s1 * (t0 * field[i1 + j0 * w] + t1 * field[i1 + j1 * w])
}

/// Backtraced source position of interior cell `(i, j)`, clamped to the
/// interpolation range.
#[inline]
fn backtrace(grid: Grid, i: usize, j: usize, u: f32, v: f32, dt0: f32) -> (f32, f32) {
    let x = (i as f32 - dt0 * u).clamp(0.5, grid.width() as f32 - 1.5);
    let y = (j as f32 - dt0 * v).clamp(0.5, grid.height() as f32 - 1.5);
    (x, y)
}

fn advect_row(grid: Grid, j: usize, row: &mut [f32], d0: &[f32], u: &[f32], v: &[f32], dt0: f32) {
    let w = grid.width();
    for i in 1..w - 1 {
        let idx = i + j * w;
        let (x, y) = backtrace(grid, i, j, u[idx], v[idx], dt0);
        row[i] = sample_bilinear(grid, d0, x, y);
    }
}

/// Semi-Lagrangian transport of `d` along `(u, v)`.
///
/// Every interior cell is traced back by `dt * width * velocity` and takes
/// the bilinear sample of `d0` there. Each cell only reads `d0` and the
/// velocity at its own index, so rows are independent.
pub fn advect(grid: Grid, d: &mut [f32], d0: &[f32], u: &[f32], v: &[f32], dt: f32) {
    grid.check(d);
    grid.check(d0);
    grid.check(u);
    grid.check(v);
    let w = grid.width();
    let h = grid.height();
    let dt0 = dt * w as f32;

    let interior = &mut d[w..(h - 1) * w];

    #[cfg(feature = "parallel")]
    interior
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(row, cells)| advect_row(grid, row + 1, cells, d0, u, v, dt0));

    #[cfg(not(feature = "parallel"))]
    interior
        .chunks_mut(w)
        .enumerate()
        .for_each(|(row, cells)| advect_row(grid, row + 1, cells, d0, u, v, dt0));

    set_boundary(grid, d);
}
