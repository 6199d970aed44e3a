use std::path::PathBuf;

use clap::Parser;
use log::warn;

use crate::config::RenderConfig;
use crate::screen::Size;

#[derive(Parser, Debug)]
#[command(name = "wgpu-dither", about = "Animated dither-wave renderer")]
pub struct Args {
    /// Rendering preset: "smooth" (eased pointer halo) or "classic"
    /// (instant halo, finer grid)
    #[arg(long, value_name = "NAME", default_value = "smooth")]
    pub preset: String,

    /// Override the native pixels per buffer pixel
    #[arg(long, value_name = "N")]
    pub pixel_size: Option<u32>,

    /// Override the number of brightness bands
    #[arg(long, value_name = "N")]
    pub colour_levels: Option<u32>,

    /// Render without a window and write the final frame to this PNG
    #[arg(long, value_name = "PATH")]
    pub capture: Option<PathBuf>,

    /// Frames to advance before a capture is written
    #[arg(long, value_name = "N", default_value_t = 120)]
    pub capture_frames: u32,

    /// Viewport for headless captures
    #[arg(
        long,
        value_name = "WIDTHxHEIGHT",
        value_parser = parse_size,
        default_value = "1280x720"
    )]
    pub capture_size: Size,
}

impl Args {
    /// Resolve the preset and apply field overrides on top. Unknown
    /// preset names warn and fall back to the default.
    pub fn render_config(&self) -> RenderConfig {
        let mut config = match self.preset.to_lowercase().as_str() {
            "smooth" => RenderConfig::smooth(),
            "classic" => RenderConfig::classic(),
            other => {
                warn!("unknown preset '{}', falling back to smooth", other);
                RenderConfig::smooth()
            }
        };
        if let Some(pixel_size) = self.pixel_size {
            config.pixel_size = pixel_size;
        }
        if let Some(colour_levels) = self.colour_levels {
            config.colour_levels = colour_levels;
        }
        config
    }
}

fn parse_size(value: &str) -> Result<Size, String> {
    let lower = value.to_ascii_lowercase();
    let (width, height) = lower
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width = width
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("bad width in '{value}'"))?;
    let height = height
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("bad height in '{value}'"))?;
    if width == 0 || height == 0 {
        return Err(format!("capture size must be non-zero, got '{value}'"));
    }
    Ok(Size::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_size_accepts_both_cases() {
        assert_eq!(parse_size("1280x720"), Ok(Size::new(1280, 720)));
        assert_eq!(parse_size("640X480"), Ok(Size::new(640, 480)));
    }

    #[test]
    fn parse_size_rejects_garbage() {
        assert!(parse_size("1280").is_err());
        assert!(parse_size("axb").is_err());
        assert!(parse_size("0x720").is_err());
        assert!(parse_size("1280x").is_err());
    }

    #[test]
    fn overrides_apply_on_top_of_the_preset() {
        let args = Args::parse_from(["wgpu-dither", "--preset", "classic", "--pixel-size", "8"]);
        let config = args.render_config();
        assert_eq!(config.pixel_size, 8);
        assert!(!config.eased());
        assert_eq!(
            config.colour_levels,
            RenderConfig::classic().colour_levels
        );
    }

    #[test]
    fn unknown_preset_falls_back_to_default() {
        let args = Args::parse_from(["wgpu-dither", "--preset", "bogus"]);
        assert_eq!(args.render_config(), RenderConfig::smooth());
    }

    #[test]
    fn capture_defaults_are_set() {
        let args = Args::parse_from(["wgpu-dither"]);
        assert!(args.capture.is_none());
        assert_eq!(args.capture_frames, 120);
        assert_eq!(args.capture_size, Size::new(1280, 720));
    }
}
