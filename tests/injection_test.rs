use glam::Vec2;
use stablefluid::injection::falloff;
use stablefluid::{Brush, FluidSolver};

fn density_at(sim: &FluidSolver, i: usize, j: usize) -> f32 {
    sim.density()[i + j * sim.width()]
}

#[test]
fn test_radius_zero_touches_only_target() {
    let mut sim = FluidSolver::new(12, 12, 0.0001, 0.016).unwrap();
    sim.add_density(6.4, 3.9, 1.0, 0.0);

    assert_eq!(density_at(&sim, 6, 3), 1.0);
    assert_eq!(sim.density().iter().filter(|&&d| d != 0.0).count(), 1);
}

#[test]
fn test_falloff_matches_distance_formula() {
    let triples = [(0, 1, 2.0), (1, 1, 2.0), (2, 0, 3.0), (2, 2, 3.0), (3, 1, 4.0), (1, 2, 2.5)];

    for (di, dj, r) in triples {
        let mut sim = FluidSolver::new(21, 21, 0.0001, 0.016).unwrap();
        sim.add_density(10.0, 10.0, 1.0, r);

        let expected = (1.0 - ((di * di + dj * dj) as f32).sqrt() / r).max(0.0);
        let got = density_at(&sim, (10 + di) as usize, (10 + dj) as usize);
        assert!((got - expected).abs() < 1e-6, "({di}, {dj}, {r}): got {got}, expected {expected}");
        assert!((falloff(di as i64, dj as i64, r) - expected).abs() < 1e-6);
    }
}

#[test]
fn test_force_writes_both_components() {
    let mut sim = FluidSolver::new(12, 12, 0.0001, 0.016).unwrap();
    sim.add_force(6.0, 6.0, 2.0, -1.0, 2.0);

    let centre = 6 + 6 * 12;
    assert_eq!(sim.velocity_x()[centre], 2.0);
    assert_eq!(sim.velocity_y()[centre], -1.0);
    assert_eq!(sim.velocity_x()[centre + 1], 1.0);
    assert_eq!(sim.velocity_y()[centre + 12], -0.5);
    assert_eq!(sim.velocity_x()[centre + 2], 0.0);
}

#[test]
fn test_injections_accumulate() {
    let mut sim = FluidSolver::new(8, 8, 0.0001, 0.016).unwrap();
    for _ in 0..3 {
        sim.add_density(4.0, 4.0, 0.5, 1.0);
    }
    assert_eq!(density_at(&sim, 4, 4), 1.5);
}

#[test]
fn test_out_of_range_is_silent() {
    let mut sim = FluidSolver::new(8, 8, 0.0001, 0.016).unwrap();
    sim.add_density(-100.0, -100.0, 1.0, 3.0);
    sim.add_density(500.0, 500.0, 1.0, 3.0);
    sim.add_force(1e6, 0.0, 1.0, 1.0, 2.0);

    assert!(sim.density().iter().all(|&d| d == 0.0));
    assert!(sim.velocity_x().iter().all(|&u| u == 0.0));
}

#[test]
fn test_corner_splat_keeps_in_buffer_cells() {
    let mut sim = FluidSolver::new(8, 8, 0.0001, 0.016).unwrap();
    sim.add_density(0.0, 0.0, 1.0, 2.0);

    assert_eq!(density_at(&sim, 0, 0), 1.0);
    assert_eq!(density_at(&sim, 1, 0), 0.5);
    assert_eq!(density_at(&sim, 0, 1), 0.5);
}

#[test]
fn test_brush_stroke() {
    let mut sim = FluidSolver::new(32, 32, 0.0001, 0.016).unwrap();
    let brush = Brush::default();
    brush.stroke(&mut sim, Vec2::new(10.0, 10.0), Vec2::new(14.0, 12.0));

    let target = 14 + 12 * 32;
    assert!((sim.velocity_x()[target] - 0.4).abs() < 1e-6);
    assert!((sim.velocity_y()[target] - 0.2).abs() < 1e-6);
    assert_eq!(sim.density()[target], 1.0);
    // Radius 4 reaches three cells out, not four.
    assert!(sim.density()[target + 3] > 0.0);
    assert_eq!(sim.density()[target + 4], 0.0);
}
