use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    pub const BLACK: Self = Rgba {
        red: 0,
        green: 0,
        blue: 0,
        alpha: u8::MAX,
    };

    /// Scale a base colour by a brightness factor. Channels are rounded
    /// and clamped to the byte range; alpha stays fully opaque.
    pub fn from_scaled(colour: [u8; 3], brightness: f64) -> Self {
        Rgba {
            red: scale_channel(colour[0], brightness),
            green: scale_channel(colour[1], brightness),
            blue: scale_channel(colour[2], brightness),
            alpha: u8::MAX,
        }
    }
}

fn scale_channel(channel: u8, brightness: f64) -> u8 {
    (channel as f64 * brightness).round().clamp(0.0, 255.0) as u8
}
