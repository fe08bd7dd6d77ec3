use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::render::Renderer;
use crate::FluidSolver;

/// Read-only view of the fields a renderer or analysis pass samples.
pub trait FluidData {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn density(&self) -> &[f32];
    fn velocity_x(&self) -> &[f32];
    fn velocity_y(&self) -> &[f32];
}

impl FluidData for FluidSolver {
    fn width(&self) -> usize { FluidSolver::width(self) }
    fn height(&self) -> usize { FluidSolver::height(self) }
    fn density(&self) -> &[f32] { FluidSolver::density(self) }
    fn velocity_x(&self) -> &[f32] { FluidSolver::velocity_x(self) }
    fn velocity_y(&self) -> &[f32] { FluidSolver::velocity_y(self) }
}

pub struct ImageExporter {
    renderer: Renderer,
}

impl ImageExporter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            renderer: Renderer::new(width, height),
        }
    }

    pub fn export_density_png(&self, simulation: &impl FluidData, path: &Path) -> Result<()> {
        let img = self.renderer.render_density(simulation);
        img.save(path)?;
        Ok(())
    }

    pub fn export_velocity_png(&self, simulation: &impl FluidData, path: &Path) -> Result<()> {
        let img = self.renderer.render_velocity(simulation);
        img.save(path)?;
        Ok(())
    }

    /// Write `<prefix>_density_NNNN.png` and `<prefix>_velocity_NNNN.png`
    /// into `output_dir`, returning both paths.
    pub fn export_frame(
        &self,
        simulation: &impl FluidData,
        output_dir: &Path,
        prefix: &str,
        frame: usize,
    ) -> Result<(PathBuf, PathBuf)> {
        let density = output_dir.join(format!("{prefix}_density_{frame:04}.png"));
        let velocity = output_dir.join(format!("{prefix}_velocity_{frame:04}.png"));
        self.export_density_png(simulation, &density)?;
        self.export_velocity_png(simulation, &velocity)?;
        log::info!("exported frame {frame} to {}", output_dir.display());
        Ok((density, velocity))
    }
}
