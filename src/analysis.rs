use glam::Vec2;

use crate::export::FluidData;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FluidMetrics {
    pub total_mass: f32,
    pub max_density: f32,
    pub avg_density: f32,
    pub total_kinetic_energy: f32,
    pub max_velocity: f32,
    pub avg_velocity: f32,
    /// Mean absolute divergence, same discretisation as the projection.
    pub velocity_divergence: f32,
    pub vorticity: f32,
    pub non_finite_cells: usize,
    pub frame: usize,
}

/// Per-row partial sums, merged into the final metrics.
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    mass: f32,
    max_density: f32,
    kinetic: f32,
    max_speed: f32,
    speed_sum: f32,
    divergence: f32,
    vorticity: f32,
    non_finite: usize,
}

impl Accumulator {
    fn merge(self, other: Self) -> Self {
        Self {
            mass: self.mass + other.mass,
            max_density: self.max_density.max(other.max_density),
            kinetic: self.kinetic + other.kinetic,
            max_speed: self.max_speed.max(other.max_speed),
            speed_sum: self.speed_sum + other.speed_sum,
            divergence: self.divergence + other.divergence,
            vorticity: self.vorticity + other.vorticity,
            non_finite: self.non_finite + other.non_finite,
        }
    }
}

fn accumulate_row(simulation: &impl FluidData, y: usize) -> Accumulator {
    let w = simulation.width();
    let density = simulation.density();
    let u = simulation.velocity_x();
    let v = simulation.velocity_y();
    let mut acc = Accumulator::default();

    for x in 1..w - 1 {
        let idx = y * w + x;
        let d = density[idx];
        let vel = Vec2::new(u[idx], v[idx]);

        if !(d.is_finite() && vel.is_finite()) {
            acc.non_finite += 1;
            continue;
        }

        let speed = vel.length();
        acc.mass += d;
        acc.max_density = acc.max_density.max(d);
        acc.kinetic += 0.5 * d * speed * speed;
        acc.max_speed = acc.max_speed.max(speed);
        acc.speed_sum += speed;

        let div = -0.5 * (u[idx + 1] - u[idx - 1] + v[idx + w] - v[idx - w]) / w as f32;
        acc.divergence += div.abs();

        let curl = 0.5 * (v[idx + 1] - v[idx - 1] - (u[idx + w] - u[idx - w]));
        acc.vorticity += curl.abs();
    }

    acc
}

impl FluidMetrics {
    /// Summarise the interior cells of `simulation`.
    ///
    /// Non-finite cells are counted and left out of every other figure.
    pub fn analyze(simulation: &(impl FluidData + Sync), frame: usize) -> Self {
        let rows = 1..simulation.height() - 1;
        let cells = ((simulation.width() - 2) * (simulation.height() - 2)) as f32;

        #[cfg(feature = "parallel")]
        let acc = rows
            .into_par_iter()
            .map(|y| accumulate_row(simulation, y))
            .reduce(Accumulator::default, Accumulator::merge);

        #[cfg(not(feature = "parallel"))]
        let acc = rows
            .map(|y| accumulate_row(simulation, y))
            .fold(Accumulator::default(), Accumulator::merge);

        Self {
            total_mass: acc.mass,
            max_density: acc.max_density,
            avg_density: acc.mass / cells,
            total_kinetic_energy: acc.kinetic,
            max_velocity: acc.max_speed,
            avg_velocity: acc.speed_sum / cells,
            velocity_divergence: acc.divergence / cells,
            vorticity: acc.vorticity / cells,
            non_finite_cells: acc.non_finite,
            frame,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.non_finite_cells == 0
    }

    pub fn log_summary(&self) {
        log::info!(
            "frame {}: mass={:.6} max_density={:.6} kinetic={:.6} max_speed={:.6} divergence={:.6e} vorticity={:.6}",
            self.frame,
            self.total_mass,
            self.max_density,
            self.total_kinetic_energy,
            self.max_velocity,
            self.velocity_divergence,
            self.vorticity
        );
        if !self.is_finite() {
            log::warn!("frame {}: {} non-finite cells", self.frame, self.non_finite_cells);
        }
    }
}

#[derive(Debug, Default)]
pub struct AnalysisRecorder {
    pub metrics_history: Vec<FluidMetrics>,
}

impl AnalysisRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self, simulation: &(impl FluidData + Sync), frame: usize) -> &FluidMetrics {
        self.metrics_history.push(FluidMetrics::analyze(simulation, frame));
        &self.metrics_history[self.metrics_history.len() - 1]
    }

    /// Relative change of total mass between the first and last record.
    pub fn mass_change(&self) -> Option<f32> {
        let first = self.metrics_history.first()?;
        let last = self.metrics_history.last()?;
        if first.total_mass == 0.0 {
            return None;
        }
        Some((last.total_mass - first.total_mass) / first.total_mass)
    }

    pub fn log_trends(&self) {
        let (Some(first), Some(last)) = (self.metrics_history.first(), self.metrics_history.last()) else {
            return;
        };
        if self.metrics_history.len() < 2 {
            return;
        }

        log::info!(
            "mass {:.6} -> {:.6} ({:+.3}%)",
            first.total_mass,
            last.total_mass,
            self.mass_change().unwrap_or(0.0) * 100.0
        );
        log::info!(
            "kinetic energy {:.6} -> {:.6}, divergence {:.6e} -> {:.6e}",
            first.total_kinetic_energy,
            last.total_kinetic_energy,
            first.velocity_divergence,
            last.velocity_divergence
        );
    }
}
