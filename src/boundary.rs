use crate::grid::Grid;

/// Overwrite the outer ring of `x` from its interior.
///
/// Edge cells copy the cell one step inward; each corner is the mean of its
/// two neighbouring edge cells. Every field uses the same unsigned rule.
pub fn set_boundary(grid: Grid, x: &mut [f32]) {
    grid.check(x);
    let w = grid.width();
    let h = grid.height();

    for i in 1..w - 1 {
        x[i] = x[i + w];
        x[i + (h - 1) * w] = x[i + (h - 2) * w];
    }

    for j in 1..h - 1 {
        x[j * w] = x[1 + j * w];
        x[w - 1 + j * w] = x[w - 2 + j * w];
    }

    x[0] = 0.5 * (x[1] + x[w]);
    x[w - 1] = 0.5 * (x[w - 2] + x[2 * w - 1]);
    x[(h - 1) * w] = 0.5 * (x[(h - 2) * w] + x[1 + (h - 1) * w]);
    x[w * h - 1] = 0.5 * (x[w * h - 2] + x[(h - 1) * w - 1]);
}

/// True when the outer ring of `x` matches what [`set_boundary`] would write.
pub fn is_consistent(grid: Grid, x: &[f32], tolerance: f32) -> bool {
    grid.check(x);
    let w = grid.width();
    let h = grid.height();
    let close = |a: f32, b: f32| (a - b).abs() <= tolerance;

    let edges = (1..w - 1).all(|i| {
        close(x[i], x[i + w]) && close(x[i + (h - 1) * w], x[i + (h - 2) * w])
    }) && (1..h - 1).all(|j| {
        close(x[j * w], x[1 + j * w]) && close(x[w - 1 + j * w], x[w - 2 + j * w])
    });

    edges
        && close(x[0], 0.5 * (x[1] + x[w]))
        && close(x[w - 1], 0.5 * (x[w - 2] + x[2 * w - 1]))
        && close(x[(h - 1) * w], 0.5 * (x[(h - 2) * w] + x[1 + (h - 1) * w]))
        && close(x[w * h - 1], 0.5 * (x[w * h - 2] + x[(h - 1) * w - 1]))
}
