//! The brightness field behind every frame: a travelling wave product,
//! an exponential pointer halo, banded quantization, and a radial
//! vignette. All of it is pure per pixel given a frame's snapshot,
//! which is what lets `frame` shade rows in parallel.

use crate::config::RenderConfig;
use crate::pixel::Rgba;
use crate::screen::Size;
use crate::session::RenderState;

/// Spatial scale applied to pixel coordinates before the configured
/// wave frequency.
pub const WAVE_SCALE: f64 = 0.05;

/// Multiplier applied to the pointer influence when the radius is eased.
pub const INFLUENCE_BOOST: f64 = 1.5;

/// Eased radii at or below this are treated as no pointer halo at all.
pub const RADIUS_EPSILON: f64 = 0.1;

/// Exponent shaping the vignette falloff towards the corners.
pub const VIGNETTE_EXPONENT: f64 = 2.5;

/// Product of two orthogonal travelling waves. The multiplication is
/// what produces the checkered interference pattern; summing the two
/// terms gives plain diagonal bands instead.
pub fn wave_term(x: f64, y: f64, time: f64, frequency: f64, amplitude: f64) -> f64 {
    (x * WAVE_SCALE * frequency + time).sin() * (y * WAVE_SCALE * frequency + time).cos()
        * amplitude
}

/// Exponential falloff around the pointer. `radius` is in buffer
/// pixels; a radius of zero means the halo is off.
pub fn pointer_influence(distance: f64, radius: f64, boost: f64) -> f64 {
    if radius <= 0.0 {
        return 0.0;
    }
    (-distance / radius).exp() * boost
}

/// Snap a brightness value to one of `levels` bands. Flooring sends
/// small positive values to zero but pushes negative values a whole
/// band further down; the asymmetry is part of the look.
pub fn quantise(value: f64, levels: f64) -> f64 {
    (value * levels).floor() / levels
}

/// Darkening factor for a pixel at `ratio` (0 at the centre, 1 at the
/// corners) of the maximum centre distance.
pub fn vignette_factor(ratio: f64, strength: f64) -> f64 {
    (1.0 - ratio.powf(VIGNETTE_EXPONENT) * strength).clamp(0.0, 1.0)
}

/// Everything the per-pixel shading needs for one frame, resolved once
/// per tick. Shading through a snapshot keeps each pixel independent of
/// state mutation order.
pub struct FramePass {
    colour: [u8; 3],
    amplitude: f64,
    frequency: f64,
    levels: f64,
    vignette_strength: f64,
    time: f64,
    pointer: [f64; 2],
    /// Effective halo radius in buffer pixels, zero when the halo is off.
    radius: f64,
    boost: f64,
    centre: (f64, f64),
    max_distance: f64,
}

impl FramePass {
    pub fn new(config: &RenderConfig, state: &RenderState, size: Size) -> Self {
        let pixel_size = config.pixel_size as f64;
        let (radius, boost) = match config.ease_factor {
            // The halo only exists once the eased radius has grown past
            // the epsilon; below it the pointer leaves no trace.
            Some(_) if state.radius > RADIUS_EPSILON => {
                (state.radius / pixel_size, INFLUENCE_BOOST)
            }
            Some(_) => (0.0, 0.0),
            None => (config.mouse_radius / pixel_size, 1.0),
        };
        FramePass {
            colour: config.wave_colour,
            amplitude: config.wave_amplitude,
            frequency: config.wave_frequency,
            levels: config.colour_levels as f64,
            vignette_strength: config.vignette_strength,
            time: state.time,
            pointer: state.pointer,
            radius,
            boost,
            centre: size.centre(),
            max_distance: size.max_centre_distance(),
        }
    }

    /// Shade one buffer pixel. Pure: the same pass and coordinates
    /// always produce the same pixel.
    pub fn shade(&self, x: u32, y: u32) -> Rgba {
        let x = x as f64;
        let y = y as f64;

        let wave = wave_term(x, y, self.time, self.frequency, self.amplitude);

        let distance = (x - self.pointer[0]).hypot(y - self.pointer[1]);
        let influence = pointer_influence(distance, self.radius, self.boost);

        let mut brightness = quantise(wave + influence, self.levels);

        let ratio = (x - self.centre.0).hypot(y - self.centre.1) / self.max_distance;
        brightness *= vignette_factor(ratio, self.vignette_strength);

        Rgba::from_scaled(self.colour, brightness)
    }
}
