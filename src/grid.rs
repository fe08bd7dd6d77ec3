/// Fixed grid dimensions shared by every field of a solver.
///
/// Cells are addressed as `(i, j)` with `i` along the width and flattened
/// row-major to `i + j * width`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    /// Smallest size on either axis that still has an interior cell.
    pub const MIN_SIZE: usize = 3;

    pub fn new(width: usize, height: usize) -> Self {
        assert!(width >= Self::MIN_SIZE, "width must be >= {}", Self::MIN_SIZE);
        assert!(height >= Self::MIN_SIZE, "height must be >= {}", Self::MIN_SIZE);
        Self { width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> usize {
        self.width * self.height
    }

    pub fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.width && j < self.height);
        i + j * self.width
    }

    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i == self.width - 1 || j == self.height - 1
    }

    pub fn zeros(&self) -> Vec<f32> {
        vec![0.0; self.size()]
    }

    /// Panics unless `field` covers exactly this grid.
    pub fn check(&self, field: &[f32]) {
        assert_eq!(
            field.len(),
            self.size(),
            "field length {} does not match {}x{} grid",
            field.len(),
            self.width,
            self.height
        );
    }
}
