#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Size { width, height }
    }

    /// Buffer dimensions for a viewport of this size, flooring each axis.
    pub fn downscaled(self, factor: u32) -> Self {
        Size {
            width: self.width / factor,
            height: self.height / factor,
        }
    }

    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn centre(self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Distance from the centre to a corner, the largest distance any
    /// pixel can have from the centre.
    pub fn max_centre_distance(self) -> f64 {
        let (centre_x, centre_y) = self.centre();
        (centre_x * centre_x + centre_y * centre_y).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::Size;

    #[test]
    fn downscaled_floors_both_axes() {
        let viewport = Size::new(1283, 722);
        assert_eq!(viewport.downscaled(5), Size::new(256, 144));
    }

    #[test]
    fn downscaled_by_one_is_identity() {
        let viewport = Size::new(640, 480);
        assert_eq!(viewport.downscaled(1), viewport);
    }

    #[test]
    fn viewport_smaller_than_factor_is_empty() {
        assert!(Size::new(3, 900).downscaled(5).is_empty());
        assert!(Size::new(900, 3).downscaled(5).is_empty());
        assert_eq!(Size::new(3, 900).downscaled(5).area(), 0);
    }

    #[test]
    fn max_centre_distance_reaches_the_corners() {
        let size = Size::new(4, 4);
        let (centre_x, centre_y) = size.centre();
        let corner = centre_x.hypot(centre_y);
        assert!((size.max_centre_distance() - corner).abs() < 1e-12);
    }
}
