use rayon::prelude::*;

use crate::dither::FramePass;
use crate::pixel::Rgba;
use crate::screen::Size;

/// The downscaled RGBA buffer one session paints into. Recreated on
/// resize, fully overwritten by every fill.
pub struct FrameBuffer {
    size: Size,
    pixels: Vec<Rgba>,
}

impl FrameBuffer {
    pub fn new(size: Size) -> Self {
        FrameBuffer {
            size,
            pixels: vec![Rgba::BLACK; size.area()],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.pixels = vec![Rgba::BLACK; size.area()];
    }

    #[cfg(test)]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.pixels[(y * self.size.width + x) as usize]
    }

    /// Shade every pixel from the pass, splitting the work across rows.
    /// Rows are independent, so the result is identical to a sequential
    /// pass whatever the scheduling.
    pub fn fill(&mut self, pass: &FramePass) {
        let width = self.size.width as usize;
        if width == 0 {
            return;
        }
        let min_rows = rows_per_task(self.size.height);
        self.pixels
            .par_chunks_mut(width)
            .with_min_len(min_rows)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.iter_mut().enumerate() {
                    *pixel = pass.shade(x as u32, y as u32);
                }
            });
    }
}

/// Lower bound on rows per rayon task, aiming for a few tasks per core
/// so tiny buffers do not get sliced into per-row jobs.
fn rows_per_task(height: u32) -> usize {
    let tasks = num_cpus::get() * 4;
    ((height as usize + tasks - 1) / tasks).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::session::RenderState;

    fn pass_at(time: f64) -> (RenderConfig, RenderState) {
        let config = RenderConfig::classic();
        let mut state = RenderState::new();
        state.time = time;
        (config, state)
    }

    #[test]
    fn new_buffer_is_black_and_opaque() {
        let buffer = FrameBuffer::new(Size::new(6, 4));
        assert_eq!(buffer.pixels().len(), 24);
        assert!(buffer.pixels().iter().all(|pixel| *pixel == Rgba::BLACK));
    }

    #[test]
    fn as_bytes_is_four_bytes_per_pixel() {
        let buffer = FrameBuffer::new(Size::new(6, 4));
        assert_eq!(buffer.as_bytes().len(), 6 * 4 * 4);
    }

    #[test]
    fn resize_replaces_the_grid() {
        let mut buffer = FrameBuffer::new(Size::new(6, 4));
        buffer.resize(Size::new(3, 2));
        assert_eq!(buffer.size(), Size::new(3, 2));
        assert_eq!(buffer.pixels().len(), 6);
    }

    #[test]
    fn fill_is_deterministic_for_fixed_inputs() {
        let (config, state) = pass_at(2.5);
        let size = Size::new(33, 17);

        let mut first = FrameBuffer::new(size);
        first.fill(&FramePass::new(&config, &state, size));
        let mut second = FrameBuffer::new(size);
        second.fill(&FramePass::new(&config, &state, size));

        assert_eq!(first.pixels(), second.pixels());
    }

    #[test]
    fn fill_leaves_every_pixel_opaque() {
        let (config, state) = pass_at(0.7);
        let size = Size::new(16, 16);
        let mut buffer = FrameBuffer::new(size);
        buffer.fill(&FramePass::new(&config, &state, size));
        assert!(buffer.pixels().iter().all(|pixel| pixel.alpha == 255));
    }

    #[test]
    fn fill_on_an_empty_buffer_is_a_no_op() {
        let (config, state) = pass_at(1.0);
        let mut buffer = FrameBuffer::new(Size::new(0, 9));
        buffer.fill(&FramePass::new(&config, &state, Size::new(0, 9)));
        assert!(buffer.pixels().is_empty());
    }
}
