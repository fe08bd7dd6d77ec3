use crate::boundary::set_boundary;
use crate::grid::Grid;

/// Relaxation sweeps used by the solver unless configured otherwise.
pub const DEFAULT_ITERATIONS: usize = 4;

/// Gauss-Seidel relaxation of the five-point system
/// `x[c] * c = x0[c] + a * (x[left] + x[right] + x[up] + x[down])`.
///
/// Each sweep updates `x` in place, so later cells see neighbours already
/// updated in the same pass. Rows are visited outer, columns inner. The
/// boundary ring is rewritten after every sweep because the next sweep
/// reads it.
pub fn linear_solve(grid: Grid, x: &mut [f32], x0: &[f32], a: f32, c: f32, iterations: usize) {
    grid.check(x);
    grid.check(x0);
    let w = grid.width();

    for _ in 0..iterations {
        for j in 1..grid.height() - 1 {
            for i in 1..w - 1 {
                let idx = i + j * w;
                x[idx] = (x0[idx] + a * (x[idx - 1] + x[idx + 1] + x[idx - w] + x[idx + w])) / c;
            }
        }
        set_boundary(grid, x);
    }
}

/// Implicit diffusion of `x` towards its neighbours, with `x0` as the
/// fixed right-hand side.
pub fn diffuse(grid: Grid, x: &mut [f32], x0: &[f32], rate: f32, dt: f32, iterations: usize) {
    let a = dt * rate * grid.size() as f32;
    linear_solve(grid, x, x0, a, 1.0 + 4.0 * a, iterations);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::is_consistent;

    #[test]
    fn test_zero_rate_keeps_interior() {
        let grid = Grid::new(6, 5);
        let x0: Vec<f32> = (0..grid.size()).map(|k| (k % 7) as f32).collect();
        let mut x = x0.clone();
        diffuse(grid, &mut x, &x0, 0.0, 0.016, DEFAULT_ITERATIONS);

        for j in 1..4 {
            for i in 1..5 {
                let idx = grid.idx(i, j);
                assert_eq!(x[idx], x0[idx]);
            }
        }
        assert!(is_consistent(grid, &x, 0.0));
    }

    #[test]
    fn test_spike_spreads_to_neighbours() {
        let grid = Grid::new(9, 9);
        let mut x0 = grid.zeros();
        let centre = grid.idx(4, 4);
        x0[centre] = 1.0;
        let mut x = x0.clone();
        diffuse(grid, &mut x, &x0, 0.01, 0.1, DEFAULT_ITERATIONS);

        assert!(x[centre] < 1.0);
        assert!(x[centre] > 0.0);
        for n in [grid.idx(3, 4), grid.idx(5, 4), grid.idx(4, 3), grid.idx(4, 5)] {
            assert!(x[n] > 0.0 && x[n] < x[centre]);
        }
    }

    #[test]
    fn test_gauss_seidel_uses_fresh_neighbours() {
        // One sweep on a 4x3 grid: the second interior cell must see the
        // first one's updated value, not the previous iterate.
        let grid = Grid::new(4, 3);
        let mut x0 = grid.zeros();
        x0[grid.idx(1, 1)] = 4.0;
        let mut x = grid.zeros();
        linear_solve(grid, &mut x, &x0, 1.0, 4.0, 1);

        assert_eq!(x[grid.idx(2, 1)], 0.25);
        assert!(is_consistent(grid, &x, 0.0));
    }

    #[test]
    fn test_update_divides_by_centre_coefficient() {
        let grid = Grid::new(3, 3);
        let mut x0 = grid.zeros();
        x0[grid.idx(1, 1)] = 5.0;
        let mut x = grid.zeros();
        linear_solve(grid, &mut x, &x0, 0.0, 3.0, 1);

        // 5 / 3 and 5 * (1 / 3) round differently in f32.
        assert_eq!(x[grid.idx(1, 1)].to_bits(), (5.0f32 / 3.0).to_bits());
    }

    #[test]
    fn test_relaxation_approaches_solution() {
        // Diffusion-style coefficients keep the system diagonally dominant,
        // so repeated sweeps must drive the residual down.
        let grid = Grid::new(8, 8);
        let w = grid.width();
        let (a, c) = (0.5, 3.0);
        let x0: Vec<f32> = (0..grid.size()).map(|k| ((k * 13) % 5) as f32).collect();

        let residual = |x: &[f32]| {
            let mut worst = 0.0f32;
            for j in 1..7 {
                for i in 1..7 {
                    let idx = grid.idx(i, j);
                    let r = x[idx] * c - (x0[idx] + a * (x[idx - 1] + x[idx + 1] + x[idx - w] + x[idx + w]));
                    worst = worst.max(r.abs());
                }
            }
            worst
        };

        let mut few = grid.zeros();
        linear_solve(grid, &mut few, &x0, a, c, 2);
        let mut many = grid.zeros();
        linear_solve(grid, &mut many, &x0, a, c, 40);

        assert!(residual(&few) > 1e-2);
        assert!(residual(&many) < residual(&few));
        assert!(residual(&many) < 1e-3);
    }
}
