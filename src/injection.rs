use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::solver::FluidSolver;

/// Default injection radius, in cells.
pub const DEFAULT_RADIUS: f32 = 2.0;

/// Linear falloff weight of a cell at integer offset `(di, dj)`.
///
/// A zero radius weights only the centre cell, at full strength.
pub fn falloff(di: i64, dj: i64, radius: f32) -> f32 {
    let radius = radius.max(0.0);
    if radius == 0.0 {
        return if di == 0 && dj == 0 { 1.0 } else { 0.0 };
    }
    let squared = di.saturating_mul(di).saturating_add(dj.saturating_mul(dj));
    let distance = (squared as f32).sqrt();
    (1.0 - distance / radius).max(0.0)
}

/// Visit every in-range cell of the square window around `(x, y)` with its
/// falloff weight.
///
/// Offsets are applied to the flat index, so a window that crosses the left
/// or right edge continues on the neighbouring row. Only flat indices
/// outside the buffer are skipped. Non-finite positions or radii inject
/// nothing.
pub fn for_each_weighted(grid: Grid, x: f32, y: f32, radius: f32, mut apply: impl FnMut(usize, f32)) {
    if !(x.is_finite() && y.is_finite() && radius.is_finite()) {
        return;
    }
    let radius = radius.max(0.0);
    let width = grid.width() as i64;
    let len = grid.size() as i64;
    // Reach is capped at the buffer length.
    let reach = (radius.floor() as i64).min(len);
    let Some(centre) = (y.floor() as i64)
        .checked_mul(width)
        .and_then(|row| row.checked_add(x.floor() as i64))
    else {
        return;
    };
    let span = reach * (width + 1);
    if centre < -span || centre >= len + span {
        return;
    }

    for dj in -reach..=reach {
        let row = centre + dj * width;
        // Only the offsets whose flat target falls inside the buffer.
        let first = (-reach).max(-row);
        let last = reach.min(len - 1 - row);
        for di in first..=last {
            let weight = falloff(di, dj, radius);
            if weight > 0.0 {
                apply((row + di) as usize, weight);
            }
        }
    }
}

/// Add `amount`, weighted by falloff, to the cells of `field` around `(x, y)`.
pub fn splat(grid: Grid, field: &mut [f32], x: f32, y: f32, amount: f32, radius: f32) {
    grid.check(field);
    for_each_weighted(grid, x, y, radius, |idx, weight| field[idx] += amount * weight);
}

/// Pointer-drag brush: turns a movement between two grid positions into a
/// velocity impulse along the movement and a density splat at its end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brush {
    pub force_gain: f32,
    pub density: f32,
    pub radius: f32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            force_gain: 0.1,
            density: 1.0,
            radius: 4.0,
        }
    }
}

impl Brush {
    pub fn stroke(&self, solver: &mut FluidSolver, from: Vec2, to: Vec2) {
        let force = (to - from) * self.force_gain;
        solver.add_force(to.x, to.y, force.x, force.y, self.radius);
        solver.add_density(to.x, to.y, self.density, self.radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falloff_formula() {
        let cases = [
            (0, 0, 2.0, 1.0),
            (1, 0, 2.0, 0.5),
            (0, -2, 2.0, 0.0),
            (1, 1, 2.0, 1.0 - 2.0f32.sqrt() / 2.0),
            (2, 1, 4.0, 1.0 - 5.0f32.sqrt() / 4.0),
            (3, 0, 3.0, 0.0),
            (1, 0, 0.0, 0.0),
            (0, 0, 0.0, 1.0),
        ];
        for (di, dj, r, expected) in cases {
            let got = falloff(di, dj, r);
            assert!((got - expected).abs() < 1e-6, "({di}, {dj}, {r}) -> {got}, expected {expected}");
        }
    }

    #[test]
    fn test_zero_radius_hits_single_cell() {
        let grid = Grid::new(8, 8);
        let mut field = grid.zeros();
        splat(grid, &mut field, 3.7, 4.2, 1.0, 0.0);

        assert_eq!(field[grid.idx(3, 4)], 1.0);
        assert_eq!(field.iter().filter(|&&x| x != 0.0).count(), 1);
    }

    #[test]
    fn test_splat_weights_window() {
        let grid = Grid::new(10, 10);
        let mut field = grid.zeros();
        splat(grid, &mut field, 5.0, 5.0, 2.0, 2.0);

        assert_eq!(field[grid.idx(5, 5)], 2.0);
        assert_eq!(field[grid.idx(6, 5)], 1.0);
        assert_eq!(field[grid.idx(5, 4)], 1.0);
        assert!((field[grid.idx(6, 6)] - 2.0 * (1.0 - 2.0f32.sqrt() / 2.0)).abs() < 1e-6);
        assert_eq!(field[grid.idx(7, 5)], 0.0);
        assert_eq!(field[grid.idx(8, 5)], 0.0);
    }

    #[test]
    fn test_out_of_buffer_targets_skipped() {
        let grid = Grid::new(5, 5);
        let mut field = grid.zeros();
        splat(grid, &mut field, 0.0, 0.0, 1.0, 3.0);
        splat(grid, &mut field, 4.0, 4.0, 1.0, 3.0);
        splat(grid, &mut field, -50.0, 80.0, 1.0, 2.0);

        assert_eq!(field[0], 1.0 + falloff(-4, -4, 3.0));
        assert_eq!(field[24], 1.0);
    }

    #[test]
    fn test_far_away_position_is_skipped() {
        let grid = Grid::new(10, 10);
        let mut field = grid.zeros();
        splat(grid, &mut field, 0.0, 1e18, 1.0, 1.0);
        splat(grid, &mut field, -1e30, 3.0, 1.0, 2.0);
        splat(grid, &mut field, 5.0, -1e12, 1.0, 2.0);

        assert!(field.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_non_finite_inputs_are_skipped() {
        let grid = Grid::new(10, 10);
        let mut field = grid.zeros();
        splat(grid, &mut field, 5.0, 5.0, 1.0, f32::INFINITY);
        splat(grid, &mut field, 5.0, 5.0, 1.0, f32::NAN);
        splat(grid, &mut field, f32::NAN, 5.0, 1.0, 2.0);
        splat(grid, &mut field, 5.0, f32::NEG_INFINITY, 1.0, 2.0);

        assert!(field.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_huge_radius_covers_buffer() {
        let grid = Grid::new(10, 10);
        let mut field = grid.zeros();
        splat(grid, &mut field, 5.0, 5.0, 1.0, 1e12);

        assert!(field.iter().all(|&x| x.is_finite() && x > 0.0));
    }

    #[test]
    fn test_window_wraps_along_rows() {
        let grid = Grid::new(6, 6);
        let mut field = grid.zeros();
        splat(grid, &mut field, 0.0, 2.0, 1.0, 1.0);

        // Offset -1 from (0, 2) lands on the last cell of row 1.
        assert_eq!(field[grid.idx(5, 1)], 0.0);
        let mut field = grid.zeros();
        splat(grid, &mut field, 0.0, 2.0, 1.0, 2.0);
        assert_eq!(field[grid.idx(5, 1)], 0.5);
    }

    #[test]
    fn test_fractional_radius_uses_integer_window() {
        let grid = Grid::new(9, 9);
        let mut field = grid.zeros();
        splat(grid, &mut field, 4.0, 4.0, 1.0, 1.5);

        assert!((field[grid.idx(5, 4)] - (1.0 - 1.0 / 1.5)).abs() < 1e-6);
        assert!((field[grid.idx(5, 5)] - (1.0 - 2.0f32.sqrt() / 1.5)).abs() < 1e-6);
        assert_eq!(field[grid.idx(6, 4)], 0.0);
    }
}
