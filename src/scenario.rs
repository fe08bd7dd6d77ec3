use std::path::Path;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisRecorder, FluidMetrics};
use crate::config::SolverConfig;
use crate::error::Result;
use crate::injection::{Brush, DEFAULT_RADIUS};
use crate::solver::FluidSolver;

/// A single injection applied before the step of a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Impulse {
    Force {
        frame: usize,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        #[serde(default = "default_radius")]
        radius: f32,
    },
    Density {
        frame: usize,
        x: f32,
        y: f32,
        amount: f32,
        #[serde(default = "default_radius")]
        radius: f32,
    },
    /// A pointer drag from `from` to `to`, applied with the scenario brush.
    Stroke {
        frame: usize,
        from: [f32; 2],
        to: [f32; 2],
    },
}

fn default_radius() -> f32 {
    DEFAULT_RADIUS
}

impl Impulse {
    pub fn frame(&self) -> usize {
        match *self {
            Impulse::Force { frame, .. } | Impulse::Density { frame, .. } | Impulse::Stroke { frame, .. } => frame,
        }
    }

    fn apply(&self, solver: &mut FluidSolver, brush: &Brush, offset: Vec2) {
        match *self {
            Impulse::Force { x, y, dx, dy, radius, .. } => {
                solver.add_force(x + offset.x, y + offset.y, dx, dy, radius);
            }
            Impulse::Density { x, y, amount, radius, .. } => {
                solver.add_density(x + offset.x, y + offset.y, amount, radius);
            }
            Impulse::Stroke { from, to, .. } => {
                brush.stroke(solver, Vec2::from(from) + offset, Vec2::from(to) + offset);
            }
        }
    }
}

/// Headless run description: solver parameters plus a schedule of
/// injections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub solver: SolverConfig,
    pub steps: usize,
    pub impulses: Vec<Impulse>,
    pub brush: Brush,
    /// Write PNG frames every this many steps; `0` disables export.
    pub export_every: usize,
    /// Seed for positional jitter of scheduled impulses.
    pub seed: u64,
    /// Maximum jitter, in cells, added to impulse positions.
    pub jitter: f32,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            solver: SolverConfig {
                width: 128,
                height: 128,
                ..SolverConfig::default()
            },
            steps: 120,
            impulses: vec![
                Impulse::Density {
                    frame: 0,
                    x: 64.0,
                    y: 64.0,
                    amount: 4.0,
                    radius: 6.0,
                },
                Impulse::Force {
                    frame: 0,
                    x: 64.0,
                    y: 64.0,
                    dx: 2.0,
                    dy: 0.5,
                    radius: 6.0,
                },
                Impulse::Stroke {
                    frame: 30,
                    from: [40.0, 90.0],
                    to: [48.0, 84.0],
                },
            ],
            brush: Brush::default(),
            export_every: 20,
            seed: 7,
            jitter: 0.0,
        }
    }
}

/// Final state of a scenario run.
pub struct ScenarioOutcome {
    pub solver: FluidSolver,
    pub recorder: AnalysisRecorder,
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(text)?;
        scenario.solver.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Run every step, applying the impulses scheduled for each frame
    /// before its step. `on_frame` sees the solver after each step together
    /// with the metrics recorded for that frame.
    pub fn run(
        &self,
        mut on_frame: impl FnMut(&FluidSolver, &FluidMetrics) -> Result<()>,
    ) -> Result<ScenarioOutcome> {
        let mut solver = FluidSolver::from_config(self.solver)?;
        let mut recorder = AnalysisRecorder::new();
        let mut rng = StdRng::seed_from_u64(self.seed);
        log::info!(
            "running {} steps on {}x{} with {} impulses",
            self.steps,
            self.solver.width,
            self.solver.height,
            self.impulses.len()
        );

        for frame in 0..self.steps {
            for impulse in self.impulses.iter().filter(|impulse| impulse.frame() == frame) {
                let offset = if self.jitter > 0.0 {
                    Vec2::new(
                        rng.gen_range(-self.jitter..=self.jitter),
                        rng.gen_range(-self.jitter..=self.jitter),
                    )
                } else {
                    Vec2::ZERO
                };
                log::debug!("frame {frame}: applying {impulse:?} offset {offset}");
                impulse.apply(&mut solver, &self.brush, offset);
            }

            solver.step();
            let metrics = recorder.record_frame(&solver, frame);
            if !metrics.is_finite() {
                log::warn!("frame {frame}: non-finite values in fields");
            }
            on_frame(&solver, metrics)?;
        }

        recorder.log_trends();
        Ok(ScenarioOutcome { solver, recorder })
    }
}
