use std::path::Path;

use log::info;

use crate::frame::FrameBuffer;

/// Write a frame to disk as an RGBA PNG at buffer resolution, without
/// the pixel-size upscale.
pub fn save_png(frame: &FrameBuffer, path: &Path) -> image::ImageResult<()> {
    let size = frame.size();
    image::save_buffer(
        path,
        frame.as_bytes(),
        size.width,
        size.height,
        image::ColorType::Rgba8,
    )?;
    info!(
        "wrote {}x{} frame to {}",
        size.width,
        size.height,
        path.display()
    );
    Ok(())
}
