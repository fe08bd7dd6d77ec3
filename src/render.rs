use image::{ImageBuffer, Rgb, RgbImage};

use crate::export::FluidData;

/// Nearest-cell rasteriser from simulation fields to RGB images.
pub struct Renderer {
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn cell_at(&self, simulation: &impl FluidData, x: u32, y: u32) -> usize {
        let sim_x = (x as usize * simulation.width()) / self.width as usize;
        let sim_y = (y as usize * simulation.height()) / self.height as usize;
        sim_y * simulation.width() + sim_x
    }

    /// Density in `[0, 1]` mapped from deep blue to white.
    pub fn render_density(&self, simulation: &impl FluidData) -> RgbImage {
        let mut img = ImageBuffer::new(self.width, self.height);
        let density = simulation.density();

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let value = density[self.cell_at(simulation, x, y)].clamp(0.0, 1.0);
            let intensity = (value * 255.0) as u8;
            *pixel = Rgb([intensity, intensity, 255]);
        }

        img
    }

    /// Velocity components as red (x) and green (y) magnitude.
    pub fn render_velocity(&self, simulation: &impl FluidData) -> RgbImage {
        let mut img = ImageBuffer::new(self.width, self.height);
        let u = simulation.velocity_x();
        let v = simulation.velocity_y();

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let idx = self.cell_at(simulation, x, y);
            let r = (u[idx].abs() * 255.0).min(255.0) as u8;
            let g = (v[idx].abs() * 255.0).min(255.0) as u8;
            *pixel = Rgb([r, g, 128]);
        }

        img
    }
}
