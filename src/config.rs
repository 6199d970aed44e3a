use thiserror::Error;

/// Parameters of one render session. Fixed once the session starts.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Base colour scaled by per-pixel brightness.
    pub wave_colour: [u8; 3],
    /// Native pixels per buffer pixel. The frame buffer is the viewport
    /// floor-divided by this on both axes.
    pub pixel_size: u32,
    /// Peak of the wave term before quantization.
    pub wave_amplitude: f64,
    /// Spatial frequency of the wave field.
    pub wave_frequency: f64,
    /// Phase advance per frame.
    pub wave_speed: f64,
    /// Pointer influence radius in native pixels.
    pub mouse_radius: f64,
    /// Number of brightness bands the quantizer snaps to.
    pub colour_levels: u32,
    /// How hard the radial vignette darkens the edges.
    pub vignette_strength: f64,
    /// Per-frame interpolation rate for the influence radius. `None`
    /// applies the full radius instantly and unconditionally.
    pub ease_factor: Option<f64>,
}

impl RenderConfig {
    /// Eased pointer halo that grows on hover and collapses on leave.
    pub fn smooth() -> Self {
        RenderConfig {
            wave_colour: [36, 255, 80],
            pixel_size: 5,
            wave_amplitude: 0.3,
            wave_frequency: 5.0,
            wave_speed: 0.01,
            mouse_radius: 400.0,
            colour_levels: 4,
            vignette_strength: 1.8,
            ease_factor: Some(0.08),
        }
    }

    /// Instantaneous pointer halo, finer grid, faster phase.
    pub fn classic() -> Self {
        RenderConfig {
            wave_colour: [36, 255, 80],
            pixel_size: 2,
            wave_amplitude: 0.3,
            wave_frequency: 3.0,
            wave_speed: 0.05,
            mouse_radius: 150.0,
            colour_levels: 4,
            vignette_strength: 1.5,
            ease_factor: None,
        }
    }

    pub fn eased(&self) -> bool {
        self.ease_factor.is_some()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pixel_size == 0 {
            return Err(ConfigError::PixelSize);
        }
        if self.colour_levels == 0 {
            return Err(ConfigError::ColourLevels);
        }
        for (name, value) in [
            ("wave amplitude", self.wave_amplitude),
            ("wave frequency", self.wave_frequency),
            ("wave speed", self.wave_speed),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        if !self.mouse_radius.is_finite() || self.mouse_radius <= 0.0 {
            return Err(ConfigError::MouseRadius(self.mouse_radius));
        }
        if !self.vignette_strength.is_finite() || self.vignette_strength < 0.0 {
            return Err(ConfigError::VignetteStrength(self.vignette_strength));
        }
        if let Some(ease) = self.ease_factor {
            if !ease.is_finite() || ease <= 0.0 || ease > 1.0 {
                return Err(ConfigError::EaseFactor(ease));
            }
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::smooth()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("pixel size must be at least 1")]
    PixelSize,
    #[error("colour levels must be at least 1")]
    ColourLevels,
    #[error("mouse radius must be positive and finite, got {0}")]
    MouseRadius(f64),
    #[error("ease factor must lie in (0, 1], got {0}")]
    EaseFactor(f64),
    #[error("vignette strength must be non-negative and finite, got {0}")]
    VignetteStrength(f64),
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, RenderConfig};

    #[test]
    fn presets_validate() {
        assert_eq!(RenderConfig::smooth().validate(), Ok(()));
        assert_eq!(RenderConfig::classic().validate(), Ok(()));
    }

    #[test]
    fn default_is_the_eased_preset() {
        assert!(RenderConfig::default().eased());
    }

    #[test]
    fn zero_pixel_size_is_rejected() {
        let config = RenderConfig {
            pixel_size: 0,
            ..RenderConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::PixelSize));
    }

    #[test]
    fn zero_colour_levels_is_rejected() {
        let config = RenderConfig {
            colour_levels: 0,
            ..RenderConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ColourLevels));
    }

    #[test]
    fn non_positive_mouse_radius_is_rejected() {
        for radius in [0.0, -150.0, f64::NAN, f64::INFINITY] {
            let config = RenderConfig {
                mouse_radius: radius,
                ..RenderConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::MouseRadius(_))
            ));
        }
    }

    #[test]
    fn ease_factor_outside_unit_interval_is_rejected() {
        for ease in [0.0, -0.08, 1.5, f64::NAN] {
            let config = RenderConfig {
                ease_factor: Some(ease),
                ..RenderConfig::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::EaseFactor(_))));
        }
    }

    #[test]
    fn non_finite_wave_terms_are_rejected() {
        let config = RenderConfig {
            wave_frequency: f64::INFINITY,
            ..RenderConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NonFinite { .. })));
    }

    #[test]
    fn negative_vignette_strength_is_rejected() {
        let config = RenderConfig {
            vignette_strength: -1.0,
            ..RenderConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::VignetteStrength(_))
        ));
    }
}
